use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString, VariantNames};
use xrchart_common::color::validate_color;
use xrchart_common::vec3::Vec3;

use crate::error::XrChartError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ElementShape {
    Box,
    Cone,
    Cylinder,
    Dodecahedron,
    Icosahedron,
    Octahedron,
    Plane,
    Sphere,
    Tetrahedron,
    Text,
    Torus,
}

/// A standalone primitive placed in the scene without data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    pub element: ElementShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Shape attributes passed through to the scene, e.g. `radius` or `value`
    #[serde(flatten)]
    pub attributes: IndexMap<String, Value>,
}

impl ElementSpec {
    pub fn new(element: ElementShape) -> Self {
        Self {
            element,
            position: None,
            rotation: None,
            color: None,
            attributes: IndexMap::new(),
        }
    }

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

    /// Attributes rendered as strings, color first
    pub fn attribute_strings(&self) -> Result<IndexMap<String, String>, XrChartError> {
        let mut attributes = IndexMap::new();
        if let Some(color) = &self.color {
            attributes.insert("color".to_string(), color.clone());
        }
        for (name, value) in &self.attributes {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(XrChartError::ValidationError(format!(
                        "Invalid element attribute `{name}`: expected a string, number or boolean, got `{other}`"
                    )));
                }
            };
            attributes.insert(name.clone(), value);
        }
        Ok(attributes)
    }

    pub fn validate(&self) -> Result<(), XrChartError> {
        self.placement()?;
        if let Some(color) = &self.color {
            validate_color(color)?;
        }
        self.attribute_strings()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_element_serde() {
        let value = json!({"element": "sphere", "position": "0 1 -3", "color": "red", "radius": 0.5});
        let element: ElementSpec = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(element.element, ElementShape::Sphere);
        assert_eq!(element.attributes.get("radius"), Some(&json!(0.5)));
        assert_eq!(serde_json::to_value(&element).unwrap(), value);

        let attributes = element.attribute_strings().unwrap();
        assert_eq!(attributes.get_index(0).unwrap(), (&"color".to_string(), &"red".to_string()));
        assert_eq!(attributes.get("radius").unwrap(), "0.5");
    }

    #[test]
    fn test_invalid_element() {
        let element: ElementSpec =
            serde_json::from_value(json!({"element": "box", "position": "1 2"})).unwrap();
        assert!(element.validate().unwrap_err().to_string().contains("position"));

        let element: ElementSpec =
            serde_json::from_value(json!({"element": "box", "depth": [1, 2]})).unwrap();
        assert!(element.validate().unwrap_err().to_string().contains("depth"));

        assert!(serde_json::from_value::<ElementSpec>(json!({"element": "teapot"})).is_err());
    }
}
