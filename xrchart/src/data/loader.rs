use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder as CsvReaderBuilder;
use arrow::error::ArrowError;
use arrow::json::reader::infer_json_schema_from_iterator;
use arrow::json::ReaderBuilder as JsonReaderBuilder;
use serde_json::{Map, Value};

use crate::data::fetcher::{is_remote_url, make_data_fetcher, DataFetcher};
use crate::data::table::DataTable;
use crate::error::XrChartError;
use crate::spec::data::{DataFormat, DataSpec};

/// Loads the data of a chart into a [`DataTable`]
#[derive(Clone, Default)]
pub struct DataLoader {
    fetcher: Option<Arc<dyn DataFetcher>>,
    base_dir: Option<PathBuf>,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom fetcher for http(s) sources
    pub fn with_fetcher(mut self, fetcher: Arc<dyn DataFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Resolve relative file paths against `base_dir`
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    pub fn load(&self, data: &DataSpec) -> Result<DataTable, XrChartError> {
        match data {
            DataSpec::Values { values } => table_from_records(values),
            DataSpec::Url { url, format } => {
                let format = match format {
                    Some(format) => *format,
                    None => DataFormat::from_path(url)?,
                };
                let bytes = self.read_source(url)?;
                if bytes.iter().all(|b| b.is_ascii_whitespace()) {
                    return Err(XrChartError::DataError(format!(
                        "Data source is empty: `{url}`"
                    )));
                }
                log::debug!("Loaded {} bytes of {format} data from {url}", bytes.len());
                match format {
                    DataFormat::Csv => read_csv(bytes),
                    DataFormat::Json => read_json(&bytes, url),
                }
            }
        }
    }

    fn read_source(&self, url: &str) -> Result<Vec<u8>, XrChartError> {
        if is_remote_url(url) {
            let fetcher = match &self.fetcher {
                Some(fetcher) => fetcher.clone(),
                None => make_data_fetcher()?,
            };
            return fetcher.fetch(url);
        }
        let path = self.resolve_path(url);
        if !path.is_file() {
            return Err(XrChartError::SourceNotFound(path.display().to_string()));
        }
        Ok(std::fs::read(path)?)
    }

    fn resolve_path(&self, url: &str) -> PathBuf {
        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        match &self.base_dir {
            Some(base_dir) if path.is_relative() => base_dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Build a table from row objects, inferring column types from the values
pub fn table_from_records(records: &[Map<String, Value>]) -> Result<DataTable, XrChartError> {
    if records.is_empty() {
        return Err(XrChartError::DataError(
            "Inline data `values` is empty".to_string(),
        ));
    }
    let rows: Vec<Value> = records.iter().cloned().map(Value::Object).collect();
    let schema = infer_json_schema_from_iterator(rows.iter().map(Ok::<_, ArrowError>))?;
    if schema.fields().is_empty() {
        return Err(XrChartError::DataError(
            "Inline data rows have no fields".to_string(),
        ));
    }

    let mut decoder = JsonReaderBuilder::new(Arc::new(schema))
        .with_batch_size(rows.len())
        .with_coerce_primitive(true)
        .build_decoder()?;
    decoder.serialize(&rows)?;
    let batch = decoder
        .flush()?
        .ok_or_else(|| XrChartError::InternalError("JSON decoder produced no rows".to_string()))?;
    Ok(DataTable::new(batch))
}

fn read_json(bytes: &[u8], source: &str) -> Result<DataTable, XrChartError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|err| {
        XrChartError::DataError(format!("Invalid JSON data in `{source}`: {err}"))
    })?;
    let Value::Array(items) = value else {
        return Err(XrChartError::DataError(format!(
            "JSON data in `{source}` must be an array of objects"
        )));
    };
    let records = items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            other => Err(XrChartError::DataError(format!(
                "JSON data in `{source}` must be an array of objects, found `{other}`"
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;
    table_from_records(&records)
}

fn read_csv(bytes: Vec<u8>) -> Result<DataTable, XrChartError> {
    let (schema, _) = Format::default()
        .with_header(true)
        .infer_schema(Cursor::new(&bytes), None)?;
    let schema = Arc::new(schema);
    let reader = CsvReaderBuilder::new(schema.clone())
        .with_header(true)
        .build(Cursor::new(bytes))?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok(DataTable::new(concat_batches(&schema, &batches)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::DataType;
    use serde_json::json;

    fn records(value: Value) -> Vec<Map<String, Value>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_inline_values() -> Result<(), XrChartError> {
        let table = table_from_records(&records(json!([
            {"model": "leon", "sales": 10},
            {"model": "ibiza", "sales": 2.5},
        ])))?;
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.field("model")?.data_type(), &DataType::Utf8);
        assert_eq!(table.field("sales")?.data_type(), &DataType::Float64);
        Ok(())
    }

    #[test]
    fn test_empty_inline_values() {
        let err = table_from_records(&[]).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_read_csv() -> Result<(), XrChartError> {
        let table = read_csv(b"model,doors\nleon,5\nibiza,3\n".to_vec())?;
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.field("doors")?.data_type(), &DataType::Int64);
        Ok(())
    }

    #[test]
    fn test_read_json_rejects_scalars() {
        let err = read_json(b"[1, 2]", "numbers.json").unwrap_err();
        assert!(err.to_string().contains("numbers.json"));
    }

    #[test]
    fn test_missing_file() {
        let loader = DataLoader::new().with_base_dir("/nonexistent-dir");
        let data = DataSpec::Url {
            url: "cars.csv".to_string(),
            format: None,
        };
        let err = loader.load(&data).unwrap_err();
        assert!(matches!(err, XrChartError::SourceNotFound(_)));
    }
}
