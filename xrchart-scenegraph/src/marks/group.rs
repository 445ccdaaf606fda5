use serde::{Deserialize, Serialize};
use xrchart_common::vec3::Vec3;

use crate::error::XrSceneGraphError;
use crate::marks::mark::SceneMark;
use crate::primitive::{Primitive, ToPrimitives};

/// A positioned, rotated container of marks. Each compiled chart becomes one
/// group so that charts keep their own placement inside a combined scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneGroup {
    pub name: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub visible: bool,
    pub marks: Vec<SceneMark>,
}

impl Default for SceneGroup {
    fn default() -> Self {
        Self {
            name: "".to_string(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            visible: true,
            marks: vec![],
        }
    }
}

impl ToPrimitives for SceneGroup {
    fn to_primitives(&self) -> Result<Vec<Primitive>, XrSceneGraphError> {
        let mut children = vec![];
        for mark in &self.marks {
            children.extend(mark.to_primitives()?);
        }
        let mut group = Primitive::new("entity");
        if !self.name.is_empty() {
            group = group.attr("id", &self.name);
        }
        group = group
            .attr("position", self.position)
            .attr("rotation", self.rotation);
        if !self.visible {
            group = group.attr("visible", "false");
        }
        Ok(vec![group.children(children)])
    }
}

impl From<SceneGroup> for SceneMark {
    fn from(mark: SceneGroup) -> Self {
        SceneMark::Group(mark)
    }
}
