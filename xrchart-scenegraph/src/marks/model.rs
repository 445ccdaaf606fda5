use serde::{Deserialize, Serialize};
use xrchart_common::vec3::Vec3;

use crate::error::XrSceneGraphError;
use crate::primitive::{Primitive, ToPrimitives};

use super::mark::SceneMark;

/// An external glTF model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneModelMark {
    pub name: String,
    pub src: String,
    pub position: Vec3,
    pub scale: Vec3,
}

impl Default for SceneModelMark {
    fn default() -> Self {
        Self {
            name: "model_mark".to_string(),
            src: "".to_string(),
            position: Vec3::ZERO,
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl ToPrimitives for SceneModelMark {
    fn to_primitives(&self) -> Result<Vec<Primitive>, XrSceneGraphError> {
        Ok(vec![Primitive::new("gltf-model")
            .attr("src", &self.src)
            .attr("position", self.position)
            .attr("scale", self.scale)])
    }
}

impl From<SceneModelMark> for SceneMark {
    fn from(mark: SceneModelMark) -> Self {
        SceneMark::Model(mark)
    }
}
