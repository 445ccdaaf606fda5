use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use strum::{Display, EnumString, VariantNames};
use xrchart_common::vec3::Vec3;

use crate::error::XrChartError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum MarkType {
    Bar,
    Arc,
    Point,
    Image,
    Gltf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BarMarkOptions {
    /// Slot width of nominal x/z bars and extent along absent x/z channels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ArcMarkOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct PointMarkOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_radius: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageMarkOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GltfMarkOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
}

/// Mark type with its optional parameters.
///
/// Serialized as the bare type name when no parameter is set, otherwise as
/// an object such as `{"type": "arc", "innerRadius": 0.5}`.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkSpec {
    Bar(BarMarkOptions),
    Arc(ArcMarkOptions),
    Point(PointMarkOptions),
    Image(ImageMarkOptions),
    Gltf(GltfMarkOptions),
}

impl MarkSpec {
    pub fn mark_type(&self) -> MarkType {
        match self {
            MarkSpec::Bar(_) => MarkType::Bar,
            MarkSpec::Arc(_) => MarkType::Arc,
            MarkSpec::Point(_) => MarkType::Point,
            MarkSpec::Image(_) => MarkType::Image,
            MarkSpec::Gltf(_) => MarkType::Gltf,
        }
    }

    /// Whether the mark is driven by data rows and encodings
    pub fn is_chart(&self) -> bool {
        matches!(self, MarkSpec::Bar(_) | MarkSpec::Arc(_) | MarkSpec::Point(_))
    }

    pub fn from_type(mark_type: MarkType) -> Self {
        match mark_type {
            MarkType::Bar => MarkSpec::Bar(Default::default()),
            MarkType::Arc => MarkSpec::Arc(Default::default()),
            MarkType::Point => MarkSpec::Point(Default::default()),
            MarkType::Image => MarkSpec::Image(Default::default()),
            MarkType::Gltf => MarkSpec::Gltf(Default::default()),
        }
    }

    pub fn parse_type(name: &str) -> Result<MarkType, XrChartError> {
        name.parse().map_err(|_| {
            XrChartError::ValidationError(format!(
                "Invalid mark type: `{name}`, expected one of: {}",
                MarkType::VARIANTS.join(", ")
            ))
        })
    }

    pub fn validate(&self) -> Result<(), XrChartError> {
        match self {
            MarkSpec::Bar(options) => check_positive("size", options.size),
            MarkSpec::Arc(options) => {
                check_positive("radius", options.radius)?;
                if let Some(inner_radius) = options.inner_radius {
                    let radius = options.radius.unwrap_or(f64::INFINITY);
                    if !(inner_radius >= 0.0 && inner_radius < radius) {
                        return Err(XrChartError::ValidationError(format!(
                            "Invalid mark parameter `innerRadius`: expected a non-negative number smaller than the radius, got {inner_radius}"
                        )));
                    }
                }
                Ok(())
            }
            MarkSpec::Point(options) => check_positive("maxRadius", options.max_radius),
            MarkSpec::Image(options) => {
                check_positive("width", options.width)?;
                check_positive("height", options.height)
            }
            MarkSpec::Gltf(_) => Ok(()),
        }
    }

    fn options_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            MarkSpec::Bar(options) => serde_json::to_value(options),
            MarkSpec::Arc(options) => serde_json::to_value(options),
            MarkSpec::Point(options) => serde_json::to_value(options),
            MarkSpec::Image(options) => serde_json::to_value(options),
            MarkSpec::Gltf(options) => serde_json::to_value(options),
        }
    }

    fn from_options(mark_type: MarkType, options: Value) -> Result<Self, serde_json::Error> {
        Ok(match mark_type {
            MarkType::Bar => MarkSpec::Bar(serde_json::from_value(options)?),
            MarkType::Arc => MarkSpec::Arc(serde_json::from_value(options)?),
            MarkType::Point => MarkSpec::Point(serde_json::from_value(options)?),
            MarkType::Image => MarkSpec::Image(serde_json::from_value(options)?),
            MarkType::Gltf => MarkSpec::Gltf(serde_json::from_value(options)?),
        })
    }
}

fn check_positive(name: &str, value: Option<f64>) -> Result<(), XrChartError> {
    match value {
        Some(value) if !(value.is_finite() && value > 0.0) => Err(XrChartError::ValidationError(
            format!("Invalid mark parameter `{name}`: expected a positive number, got {value}"),
        )),
        _ => Ok(()),
    }
}

impl Serialize for MarkSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mark_type = self.mark_type().to_string();
        let options = self.options_value().map_err(serde::ser::Error::custom)?;
        match options {
            Value::Object(mut map) if !map.is_empty() => {
                map.insert("type".to_string(), Value::String(mark_type));
                map.serialize(serializer)
            }
            _ => serializer.serialize_str(&mark_type),
        }
    }
}

impl<'de> Deserialize<'de> for MarkSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(name) => {
                let mark_type = MarkSpec::parse_type(&name).map_err(D::Error::custom)?;
                Ok(MarkSpec::from_type(mark_type))
            }
            Value::Object(mut map) => {
                let Some(Value::String(name)) = map.remove("type") else {
                    return Err(D::Error::custom("mark object requires a string `type`"));
                };
                let mark_type = MarkSpec::parse_type(&name).map_err(D::Error::custom)?;
                MarkSpec::from_options(mark_type, Value::Object(map)).map_err(D::Error::custom)
            }
            other => Err(D::Error::custom(format!(
                "mark must be a string or an object, got `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mark_serde() {
        let mark: MarkSpec = serde_json::from_value(json!("bar")).unwrap();
        assert_eq!(mark, MarkSpec::Bar(Default::default()));
        assert_eq!(serde_json::to_value(&mark).unwrap(), json!("bar"));

        let mark: MarkSpec =
            serde_json::from_value(json!({"type": "arc", "innerRadius": 0.5})).unwrap();
        assert_eq!(
            mark,
            MarkSpec::Arc(ArcMarkOptions {
                radius: None,
                inner_radius: Some(0.5)
            })
        );
        assert_eq!(
            serde_json::to_value(&mark).unwrap(),
            json!({"type": "arc", "innerRadius": 0.5})
        );
    }

    #[test]
    fn test_invalid_mark_type() {
        let err = serde_json::from_value::<MarkSpec>(json!("pie")).unwrap_err();
        assert!(err.to_string().contains("pie"));
        assert!(err.to_string().contains("bar, arc, point, image, gltf"));
    }

    #[test]
    fn test_invalid_mark_parameter() {
        let mark = MarkSpec::Bar(BarMarkOptions { size: Some(-1.0) });
        let err = mark.validate().unwrap_err();
        assert!(err.to_string().contains("size"));

        let mark = MarkSpec::Arc(ArcMarkOptions {
            radius: Some(1.0),
            inner_radius: Some(1.5),
        });
        assert!(mark.validate().unwrap_err().to_string().contains("innerRadius"));
    }
}
