pub mod decode;
pub mod handlers;
