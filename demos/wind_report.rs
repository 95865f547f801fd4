//! demos/wind_report.rs
//!
//! Runs the pipeline over a track file and prints the JSON a web endpoint would
//! return, for both fit configurations.
//!
//! To run this demo:
//! RUST_LOG=info cargo run --example wind_report -- data/katrina.csv

use hurricane_metrics::{
    present, FitConfig, GraphData, HurricanePipeline, PipelineConfig, Presentation,
    ResponseShape,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/katrina.csv".to_string());
    let pipeline = HurricanePipeline::new(PipelineConfig::new(path));

    for fit in [FitConfig::pressure_trend(), FitConfig::wind_from_pressure()] {
        match pipeline.report().fit(fit).call() {
            Ok(report) => {
                if let Presentation::Json(body) = present(&report, ResponseShape::Json)? {
                    println!("{}", serde_json::to_string_pretty(&body["trend"])?);
                }
            }
            Err(e) => {
                // What an HTTP adapter would send back.
                println!("{} {}", e.status_code(), serde_json::to_string(&e.to_body())?);
            }
        }
    }

    let dataset = pipeline.run()?;
    let chart = GraphData::wind_speed(&dataset);
    println!("{}", serde_json::to_string(&chart)?);

    Ok(())
}
