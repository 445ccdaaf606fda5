pub mod chart;
pub mod data;
pub mod element;
pub mod encoding;
pub mod mark;
pub mod params;
pub mod transform;

use std::ops::Add;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::XrChartError;
use crate::spec::chart::ChartSpec;
use crate::spec::element::ElementSpec;

/// Horizontal composition of specifications sharing one scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConcatSpec {
    pub concat: Vec<ChartSpecification>,
}

/// Top-level specification: a chart, a standalone element, or a
/// concatenation of either
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartSpecification {
    Chart(ChartSpec),
    Element(ElementSpec),
    Concat(ConcatSpec),
}

impl ChartSpecification {
    /// Parse and validate a specification object
    pub fn from_dict(value: Value) -> Result<Self, XrChartError> {
        let spec = Self::parse_value(value)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn from_json(json: &str) -> Result<Self, XrChartError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|err| XrChartError::ValidationError(format!("Invalid JSON: {err}")))?;
        Self::from_dict(value)
    }

    pub fn to_dict(&self) -> Result<Value, XrChartError> {
        self.validate()?;
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json(&self) -> Result<String, XrChartError> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn parse_value(value: Value) -> Result<Self, XrChartError> {
        let Value::Object(map) = &value else {
            return Err(XrChartError::ValidationError(format!(
                "Specification must be an object, got `{value}`"
            )));
        };
        let result = if map.contains_key("concat") {
            serde_json::from_value(value).map(ChartSpecification::Concat)
        } else if map.contains_key("element") {
            if map.contains_key("mark") {
                return Err(XrChartError::ValidationError(
                    "Specification must contain exactly one of `mark` or `element`".to_string(),
                ));
            }
            serde_json::from_value(value).map(ChartSpecification::Element)
        } else {
            serde_json::from_value(value).map(ChartSpecification::Chart)
        };
        result.map_err(|err| XrChartError::ValidationError(err.to_string()))
    }

    pub fn validate(&self) -> Result<(), XrChartError> {
        match self {
            ChartSpecification::Chart(chart) => chart.validate(),
            ChartSpecification::Element(element) => element.validate(),
            ChartSpecification::Concat(concat) => {
                if concat.concat.is_empty() {
                    return Err(XrChartError::ValidationError(
                        "`concat` requires at least one specification".to_string(),
                    ));
                }
                concat.concat.iter().try_for_each(|spec| spec.validate())
            }
        }
    }

    /// Charts and elements in scene order, with concatenations flattened
    pub fn leaves(&self) -> Vec<&ChartSpecification> {
        match self {
            ChartSpecification::Concat(concat) => {
                concat.concat.iter().flat_map(|spec| spec.leaves()).collect()
            }
            leaf => vec![leaf],
        }
    }
}

impl<'de> Deserialize<'de> for ChartSpecification {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ChartSpecification::parse_value(value).map_err(D::Error::custom)
    }
}

impl From<ChartSpec> for ChartSpecification {
    fn from(chart: ChartSpec) -> Self {
        ChartSpecification::Chart(chart)
    }
}

impl From<ElementSpec> for ChartSpecification {
    fn from(element: ElementSpec) -> Self {
        ChartSpecification::Element(element)
    }
}

impl Add for &ChartSpecification {
    type Output = ChartSpecification;

    /// Concatenate two specifications, flattening nested concatenations
    fn add(self, rhs: Self) -> ChartSpecification {
        let concat = self.leaves().into_iter().chain(rhs.leaves()).cloned().collect();
        ChartSpecification::Concat(ConcatSpec { concat })
    }
}

impl Add for ChartSpecification {
    type Output = ChartSpecification;

    fn add(self, rhs: Self) -> ChartSpecification {
        &self + &rhs
    }
}
