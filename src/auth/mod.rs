pub mod bearer;
pub mod exchange;
pub mod token;
