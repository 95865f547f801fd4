pub mod dataset;
pub mod fit_config;
pub mod observation;
