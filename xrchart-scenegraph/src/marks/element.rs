use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::XrSceneGraphError;
use crate::primitive::{Primitive, ToPrimitives};

use super::mark::SceneMark;

/// A standalone shape whose attributes were given directly by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneElementMark {
    pub name: String,
    pub shape: String,
    pub attributes: IndexMap<String, String>,
}

impl Default for SceneElementMark {
    fn default() -> Self {
        Self {
            name: "element_mark".to_string(),
            shape: "box".to_string(),
            attributes: IndexMap::new(),
        }
    }
}

impl ToPrimitives for SceneElementMark {
    fn to_primitives(&self) -> Result<Vec<Primitive>, XrSceneGraphError> {
        let primitive = self
            .attributes
            .iter()
            .fold(Primitive::new(&self.shape), |p, (k, v)| p.attr(k, v));
        Ok(vec![primitive])
    }
}

impl From<SceneElementMark> for SceneMark {
    fn from(mark: SceneElementMark) -> Self {
        SceneMark::Element(mark)
    }
}
