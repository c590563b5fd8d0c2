pub mod handlers;
pub mod tokens;
