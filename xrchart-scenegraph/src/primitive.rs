use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use xrchart_common::value::ScalarOrArray;

use crate::error::XrSceneGraphError;

/// A flat shape descriptor: element tag plus ordered attributes.
///
/// This is the boundary between the scene graph and markup writers. Tags are
/// bare shape names (`box`, `sphere`, `entity`, ...) and attribute names are
/// already in kebab-case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Primitive>,
}

impl Primitive {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: IndexMap::new(),
            children: vec![],
        }
    }

    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.attributes.insert(name.replace('_', "-"), value.to_string());
        self
    }

    pub fn maybe_attr(self, name: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    pub fn children(mut self, children: Vec<Primitive>) -> Self {
        self.children = children;
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }
}

pub trait ToPrimitives {
    fn to_primitives(&self) -> Result<Vec<Primitive>, XrSceneGraphError>;
}

pub(crate) fn check_len<T: Sync + Clone>(
    mark: &str,
    attribute: &str,
    value: &ScalarOrArray<T>,
    len: usize,
) -> Result<(), XrSceneGraphError> {
    if value.fits_len(len) {
        Ok(())
    } else {
        Err(XrSceneGraphError::AttributeLengthMismatch {
            mark: mark.to_string(),
            attribute: attribute.to_string(),
            len,
        })
    }
}

pub(crate) fn check_ids(
    mark: &str,
    ids: &Option<Vec<String>>,
    len: usize,
) -> Result<(), XrSceneGraphError> {
    match ids {
        Some(ids) if ids.len() != len => Err(XrSceneGraphError::AttributeLengthMismatch {
            mark: mark.to_string(),
            attribute: "ids".to_string(),
            len,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("position", "position")]
    #[case("radius_inner", "radius-inner")]
    #[case("theta_start", "theta-start")]
    fn test_attr_name(#[case] name: &str, #[case] expected: &str) {
        let p = Primitive::new("ring").attr(name, 1);
        assert_eq!(p.get(expected), Some("1"));
    }

    #[test]
    fn test_attr_kebab_case_and_order() {
        let p = Primitive::new("cylinder")
            .attr("theta_start", 0)
            .attr("theta_length", 90)
            .maybe_attr("id", None::<String>);
        let keys: Vec<_> = p.attributes.keys().cloned().collect();
        assert_eq!(keys, vec!["theta-start", "theta-length"]);
        assert_eq!(p.get("theta-length"), Some("90"));
    }
}
