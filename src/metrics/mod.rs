pub mod error;
pub mod regression;
pub mod wind;
