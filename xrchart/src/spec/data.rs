use std::fmt::{Display, Formatter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::XrChartError;

/// Where the rows of a chart come from: inline records or a file/URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataSpec {
    Values {
        values: Vec<Map<String, Value>>,
    },
    Url {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<DataFormat>,
    },
}

impl DataSpec {
    pub fn url(&self) -> Option<&str> {
        match self {
            DataSpec::Url { url, .. } => Some(url),
            DataSpec::Values { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &str) -> Result<Self, XrChartError> {
        let stripped = path.split(['?', '#']).next().unwrap_or(path);
        let extension = Path::new(stripped)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => Ok(DataFormat::Csv),
            Some("json") => Ok(DataFormat::Json),
            _ => Err(XrChartError::UnsupportedFileType(path.to_string())),
        }
    }
}

impl Display for DataFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DataFormat::Csv => write!(f, "csv"),
            DataFormat::Json => write!(f, "json"),
        }
    }
}
