pub mod html;

use std::path::Path;
use std::str::FromStr;

use crate::error::XrChartError;

/// File formats a specification can be saved as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Standalone A-Frame page with the compiled scene
    Html,
    /// The specification itself
    Json,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, XrChartError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("html") => Ok(OutputFormat::Html),
            Some("json") => Ok(OutputFormat::Json),
            _ => Err(XrChartError::ValidationError(format!(
                "Invalid file format: `{}`, expected a .html or .json file",
                path.display()
            ))),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = XrChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            _ => Err(XrChartError::ValidationError(format!(
                "Invalid file format: `{s}`, expected html or json"
            ))),
        }
    }
}
