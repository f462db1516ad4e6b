pub mod handlers;
pub mod tools;
