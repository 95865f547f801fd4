use crate::dataset::error::DatasetError;
use crate::types::observation::RawRow;
use log::info;
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Reads the timestamp and pressure columns of a delimited file as text.
///
/// Header names are compared after trimming surrounding whitespace and
/// ignoring case, so `" date "` satisfies a configured `Date` column.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    path: PathBuf,
    separator: u8,
    timestamp_column: String,
    pressure_column: String,
}

impl DatasetLoader {
    pub fn new(
        path: &Path,
        separator: u8,
        timestamp_column: &str,
        pressure_column: &str,
    ) -> DatasetLoader {
        DatasetLoader {
            path: path.to_path_buf(),
            separator,
            timestamp_column: timestamp_column.to_string(),
            pressure_column: pressure_column.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every data row of the file.
    ///
    /// # Errors
    ///
    /// [`DatasetError::MissingColumn`] when a configured column is not in the
    /// header; [`DatasetError::CsvOpen`] / [`DatasetError::CsvParse`] when the file
    /// cannot be read as a delimited table.
    pub fn load(&self) -> Result<Vec<RawRow>, DatasetError> {
        let df = self.read_frame()?;

        let timestamp_name = self.resolve_column(&df, &self.timestamp_column)?;
        let pressure_name = self.resolve_column(&df, &self.pressure_column)?;

        let timestamps = self.text_values(&df, &timestamp_name)?;
        let pressures = self.text_values(&df, &pressure_name)?;

        let rows: Vec<RawRow> = timestamps
            .into_iter()
            .zip(pressures)
            .map(|(timestamp, pressure)| RawRow {
                timestamp,
                pressure,
            })
            .collect();

        info!("Loaded {} rows from {:?}", rows.len(), self.path);
        Ok(rows)
    }

    // Every column is read as text; type normalization belongs to cleaning.
    fn read_frame(&self) -> Result<DataFrame, DatasetError> {
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .map_parse_options(|options| options.with_separator(self.separator))
            .try_into_reader_with_file_path(Some(self.path.clone()))
            .map_err(|e| DatasetError::CsvOpen(self.path.clone(), e))?
            .finish()
            .map_err(|e| DatasetError::CsvParse(self.path.clone(), e))
    }

    fn resolve_column(&self, df: &DataFrame, wanted: &str) -> Result<String, DatasetError> {
        let wanted_key = header_key(wanted);
        df.get_column_names()
            .into_iter()
            .find(|name| header_key(name.as_str()) == wanted_key)
            .map(|name| name.to_string())
            .ok_or_else(|| DatasetError::MissingColumn {
                path: self.path.clone(),
                column: wanted.trim().to_string(),
            })
    }

    fn text_values(&self, df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, DatasetError> {
        let read_error = |source: PolarsError| DatasetError::ColumnRead {
            path: self.path.clone(),
            column: name.to_string(),
            source,
        };

        let column = df
            .column(name)
            .and_then(|column| column.cast(&DataType::String))
            .map_err(read_error)?;
        let values = column
            .as_materialized_series()
            .str()
            .map_err(read_error)?
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect();
        Ok(values)
    }
}

fn header_key(name: &str) -> String {
    name.trim().to_lowercase()
}
