use serde::{Deserialize, Serialize};

use crate::error::XrChartError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    #[default]
    Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionSpec {
    #[serde(rename = "type", default)]
    pub selection_type: SelectionType,
    pub fields: Vec<String>,
}

/// A named selection over data fields. Filters reference it with
/// `{"filter": {"param": name}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamSpec {
    pub name: String,
    pub select: SelectionSpec,
}

impl ParamSpec {
    pub fn new(name: &str, fields: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            select: SelectionSpec {
                selection_type: SelectionType::Point,
                fields: fields.iter().map(|f| f.to_string()).collect(),
            },
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.select.fields
    }

    pub fn validate(&self) -> Result<(), XrChartError> {
        if self.name.trim().is_empty() {
            return Err(XrChartError::ValidationError(
                "Parameter requires a non-empty `name`".to_string(),
            ));
        }
        if self.select.fields.is_empty() {
            return Err(XrChartError::ValidationError(format!(
                "Parameter `{}` requires at least one field in `select.fields`",
                self.name
            )));
        }
        Ok(())
    }
}
