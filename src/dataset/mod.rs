pub mod cache;
pub mod cleaner;
pub mod error;
pub mod loader;
