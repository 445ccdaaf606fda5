use serde::{Deserialize, Serialize};
use xrchart_common::vec3::Vec3;

use crate::error::XrChartError;
use crate::spec::data::DataSpec;
use crate::spec::encoding::EncodingSpec;
use crate::spec::mark::MarkSpec;
use crate::spec::params::ParamSpec;
use crate::spec::transform::{FilterSpec, TransformSpec};

/// A single data-driven chart, or an image/glTF mark
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark: Option<MarkSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<EncodingSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<TransformSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
}

impl ChartSpec {
    pub fn mark_spec(&self) -> Result<&MarkSpec, XrChartError> {
        self.mark.as_ref().ok_or_else(|| {
            XrChartError::ValidationError("Chart specification requires a `mark`".to_string())
        })
    }

    pub fn data_spec(&self) -> Result<&DataSpec, XrChartError> {
        self.data.as_ref().ok_or_else(|| {
            XrChartError::ValidationError("Chart specification requires `data`".to_string())
        })
    }

    pub fn encoding_spec(&self) -> Result<&EncodingSpec, XrChartError> {
        self.encoding.as_ref().ok_or_else(|| {
            XrChartError::ValidationError("Chart specification requires an `encoding`".to_string())
        })
    }

    /// Group position and rotation, defaulting to the origin
    pub fn placement(&self) -> Result<(Vec3, Vec3), XrChartError> {
        let position = match &self.position {
            Some(position) => Vec3::parse_named(position, "position")?,
            None => Vec3::ZERO,
        };
        let rotation = match &self.rotation {
            Some(rotation) => Vec3::parse_named(rotation, "rotation")?,
            None => Vec3::ZERO,
        };
        Ok((position, rotation))
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn validate(&self) -> Result<(), XrChartError> {
        let mark = self.mark_spec()?;
        mark.validate()?;
        if mark.is_chart() {
            self.data_spec()?;
            self.encoding_spec()?.validate_for(mark.mark_type())?;
        } else {
            if self.data_spec()?.url().is_none() {
                return Err(XrChartError::ValidationError(format!(
                    "The {} mark requires `data.url`",
                    mark.mark_type()
                )));
            }
            if let Some(encoding) = &self.encoding {
                encoding.validate_for(mark.mark_type())?;
            }
            if !self.transform.is_empty() || !self.params.is_empty() {
                return Err(XrChartError::ValidationError(format!(
                    "The {} mark does not accept `transform` or `params`",
                    mark.mark_type()
                )));
            }
        }

        self.placement()?;
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if let Some(value) = value {
                if !(value.is_finite() && value > 0.0) {
                    return Err(XrChartError::ValidationError(format!(
                        "Invalid `{name}`: expected a positive number, got {value}"
                    )));
                }
            }
        }

        for param in &self.params {
            param.validate()?;
        }
        for transform in &self.transform {
            transform.validate()?;
            if let TransformSpec::Filter {
                filter: FilterSpec::Param { param },
            } = transform
            {
                if self.param(param).is_none() {
                    return Err(XrChartError::ValidationError(format!(
                        "Filter references undefined parameter `{param}`"
                    )));
                }
            }
        }
        Ok(())
    }
}
