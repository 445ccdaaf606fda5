use serde::{Deserialize, Serialize};

use crate::error::XrSceneGraphError;
use crate::marks::arc::SceneArcMark;
use crate::marks::box_mark::SceneBoxMark;
use crate::marks::element::SceneElementMark;
use crate::marks::group::SceneGroup;
use crate::marks::image::SceneImageMark;
use crate::marks::line::SceneLineMark;
use crate::marks::model::SceneModelMark;
use crate::marks::sphere::SceneSphereMark;
use crate::marks::text::SceneTextMark;
use crate::primitive::{Primitive, ToPrimitives};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SceneMark {
    Box(SceneBoxMark),
    Arc(SceneArcMark),
    Sphere(SceneSphereMark),
    Line(SceneLineMark),
    Text(SceneTextMark),
    Image(SceneImageMark),
    Model(SceneModelMark),
    Element(SceneElementMark),
    Group(SceneGroup),
}

impl SceneMark {
    pub fn name(&self) -> &str {
        match self {
            Self::Box(mark) => &mark.name,
            Self::Arc(mark) => &mark.name,
            Self::Sphere(mark) => &mark.name,
            Self::Line(mark) => &mark.name,
            Self::Text(mark) => &mark.name,
            Self::Image(mark) => &mark.name,
            Self::Model(mark) => &mark.name,
            Self::Element(mark) => &mark.name,
            Self::Group(mark) => &mark.name,
        }
    }

    /// Number of rendered instances, or of child marks for a group
    pub fn instance_count(&self) -> usize {
        match self {
            Self::Box(mark) => mark.len as usize,
            Self::Arc(mark) => mark.len as usize,
            Self::Sphere(mark) => mark.len as usize,
            Self::Text(mark) => mark.len as usize,
            Self::Group(mark) => mark.marks.len(),
            Self::Line(_) | Self::Image(_) | Self::Model(_) | Self::Element(_) => 1,
        }
    }
}

impl ToPrimitives for SceneMark {
    fn to_primitives(&self) -> Result<Vec<Primitive>, XrSceneGraphError> {
        match self {
            Self::Box(mark) => mark.to_primitives(),
            Self::Arc(mark) => mark.to_primitives(),
            Self::Sphere(mark) => mark.to_primitives(),
            Self::Line(mark) => mark.to_primitives(),
            Self::Text(mark) => mark.to_primitives(),
            Self::Image(mark) => mark.to_primitives(),
            Self::Model(mark) => mark.to_primitives(),
            Self::Element(mark) => mark.to_primitives(),
            Self::Group(mark) => mark.to_primitives(),
        }
    }
}
