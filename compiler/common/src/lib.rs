pub mod constant;
pub mod error;
pub mod limits;
pub mod types;
