//! The main entry point: load → clean → derive wind speed → (optionally) fit.
//!
//! A [`HurricanePipeline`] is built once from a [`PipelineConfig`] and can be run
//! for every request. Each run reads the source file again unless caching was
//! enabled in the configuration, in which case the cleaned rows are reused for
//! as long as the file's modification time does not change.

use crate::config::PipelineConfig;
use crate::dataset::cache::DatasetCache;
use crate::dataset::cleaner::clean;
use crate::dataset::error::DatasetError;
use crate::dataset::loader::DatasetLoader;
use crate::error::HurricaneError;
use crate::metrics::error::FitError;
use crate::metrics::regression::{fit_linear_trend, FitResult};
use crate::response::{Report, TrendReport};
use crate::types::dataset::Dataset;
use crate::types::fit_config::FitConfig;
use crate::types::observation::RawRow;
use bon::bon;
use log::{info, warn};

pub struct HurricanePipeline {
    config: PipelineConfig,
    loader: DatasetLoader,
    cache: Option<DatasetCache>,
}

#[bon]
impl HurricanePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let loader = DatasetLoader::new(
            &config.source_path,
            config.separator,
            &config.timestamp_column,
            &config.pressure_column,
        );
        let cache = config.cache.then(DatasetCache::new);
        Self {
            config,
            loader,
            cache,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Reads the raw timestamp and pressure cells of the source file.
    ///
    /// # Errors
    ///
    /// [`HurricaneError::Dataset`] wrapping [`DatasetError::MissingColumn`] when a
    /// required column is absent, or a load error when the file cannot be read.
    pub fn load(&self) -> Result<Vec<RawRow>, HurricaneError> {
        Ok(self.loader.load()?)
    }

    /// Loads, cleans and enriches the source dataset.
    ///
    /// The returned dataset holds at least one observation; every observation
    /// whose pressure lies in `(0, P_env)` carries a wind speed.
    ///
    /// # Errors
    ///
    /// Besides the load errors of [`HurricanePipeline::load`], returns
    /// [`DatasetError::Empty`] when no row survives cleaning.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hurricane_metrics::{HurricanePipeline, HurricaneError, PipelineConfig};
    ///
    /// # fn main() -> Result<(), HurricaneError> {
    /// let pipeline = HurricanePipeline::new(PipelineConfig::new("data/katrina.csv"));
    /// let dataset = pipeline.run()?;
    /// println!("{} observations, {} with a wind estimate", dataset.len(), dataset.wind_speed_count());
    /// # Ok(())
    /// # }
    /// ```
    pub fn run(&self) -> Result<Dataset, HurricaneError> {
        let mut dataset = match &self.cache {
            Some(cache) => cache
                .get_or_load(self.loader.path(), || self.load_clean())?
                .as_ref()
                .clone(),
            None => self.load_clean()?,
        };

        dataset.derive_wind_speed(self.config.environmental_pressure_hpa);
        info!(
            "Derived wind speed for {} of {} observations (P_env = {} hPa)",
            dataset.wind_speed_count(),
            dataset.len(),
            self.config.environmental_pressure_hpa
        );
        Ok(dataset)
    }

    /// Fits the line selected by `fit` over an enriched dataset.
    ///
    /// # Errors
    ///
    /// [`FitError::NoUsableObservations`] when no observation provides the fitted
    /// columns, [`FitError::InsufficientData`] when fewer than two distinct X
    /// values remain for fitting.
    pub fn fit(dataset: &Dataset, fit: FitConfig) -> Result<FitResult, HurricaneError> {
        let (x, y) = dataset.fit_series(fit.target);
        if x.is_empty() {
            warn!("No observations usable for the {} fit", fit.target);
            return Err(FitError::NoUsableObservations { target: fit.target }.into());
        }
        let result = fit_linear_trend(&x, &y, fit.hold_out)?;
        info!(
            "Fitted {}: slope {:.4}, intercept {:.4} over {} rows",
            fit.target, result.slope, result.intercept, result.train_rows
        );
        Ok(result)
    }

    /// Runs the pipeline and, when `.fit(..)` is given, fits a trend over the result.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hurricane_metrics::{FitConfig, HurricanePipeline, HurricaneError, PipelineConfig};
    ///
    /// # fn main() -> Result<(), HurricaneError> {
    /// let pipeline = HurricanePipeline::new(PipelineConfig::new("data/katrina.csv"));
    /// let report = pipeline
    ///     .report()
    ///     .fit(FitConfig::wind_from_pressure())
    ///     .call()?;
    /// println!("{}", report.to_json()?);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn report(&self, fit: Option<FitConfig>) -> Result<Report, HurricaneError> {
        let dataset = self.run()?;
        let trend = match fit {
            Some(fit) => Some(TrendReport {
                target: fit.target,
                fit: Self::fit(&dataset, fit)?,
            }),
            None => None,
        };
        Ok(Report { dataset, trend })
    }

    fn load_clean(&self) -> Result<Dataset, DatasetError> {
        let rows = self.loader.load()?;
        let dataset = clean(&rows);
        if dataset.is_empty() {
            warn!(
                "None of the {} rows in {:?} has a valid timestamp and pressure",
                rows.len(),
                self.loader.path()
            );
            return Err(DatasetError::Empty(self.loader.path().to_path_buf()));
        }
        Ok(dataset)
    }
}
