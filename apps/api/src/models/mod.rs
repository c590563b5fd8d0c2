pub mod interview;
pub mod share;
pub mod summary;
pub mod template;
pub mod user;
