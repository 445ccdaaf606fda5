use serde::{Deserialize, Serialize};

use crate::error::XrSceneGraphError;
use crate::marks::{group::SceneGroup, mark::SceneMark};
use crate::primitive::{Primitive, ToPrimitives};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    pub marks: Vec<SceneMark>,
}

impl SceneGraph {
    pub fn groups(&self) -> Vec<&SceneGroup> {
        self.marks
            .iter()
            .filter_map(|m| {
                let SceneMark::Group(g) = m else {
                    return None;
                };
                Some(g)
            })
            .collect()
    }

    pub fn to_primitives(&self) -> Result<Vec<Primitive>, XrSceneGraphError> {
        let mut primitives = vec![];
        for mark in &self.marks {
            primitives.extend(mark.to_primitives()?);
        }
        Ok(primitives)
    }
}
