pub mod handlers;
pub mod status;
pub mod storage;
pub mod validation;
