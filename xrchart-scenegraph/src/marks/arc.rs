use serde::{Deserialize, Serialize};
use xrchart_common::format::format_number;
use xrchart_common::value::ScalarOrArray;
use xrchart_common::vec3::Vec3;

use crate::error::XrSceneGraphError;
use crate::primitive::{check_ids, check_len, Primitive, ToPrimitives};

use super::mark::SceneMark;

/// Circular sectors. A zero inner radius draws a pie slice (a cylinder
/// sector of the given thickness), otherwise a flat ring sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneArcMark {
    pub name: String,
    pub len: u32,
    pub ids: Option<Vec<String>>,
    pub position: ScalarOrArray<Vec3>,
    pub outer_radius: ScalarOrArray<f64>,
    pub inner_radius: ScalarOrArray<f64>,
    pub thickness: f64,
    pub theta_start: ScalarOrArray<f64>,
    pub theta_length: ScalarOrArray<f64>,
    pub color: ScalarOrArray<String>,
}

impl SceneArcMark {
    pub fn position_iter(&self) -> Box<dyn Iterator<Item = &Vec3> + '_> {
        self.position.as_iter(self.len as usize)
    }
    pub fn outer_radius_iter(&self) -> Box<dyn Iterator<Item = &f64> + '_> {
        self.outer_radius.as_iter(self.len as usize)
    }
    pub fn inner_radius_iter(&self) -> Box<dyn Iterator<Item = &f64> + '_> {
        self.inner_radius.as_iter(self.len as usize)
    }
    pub fn theta_start_iter(&self) -> Box<dyn Iterator<Item = &f64> + '_> {
        self.theta_start.as_iter(self.len as usize)
    }
    pub fn theta_length_iter(&self) -> Box<dyn Iterator<Item = &f64> + '_> {
        self.theta_length.as_iter(self.len as usize)
    }
    pub fn color_iter(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        self.color.as_iter(self.len as usize)
    }
}

impl Default for SceneArcMark {
    fn default() -> Self {
        Self {
            name: "arc_mark".to_string(),
            len: 1,
            ids: None,
            position: ScalarOrArray::Scalar(Vec3::ZERO),
            outer_radius: ScalarOrArray::Scalar(1.0),
            inner_radius: ScalarOrArray::Scalar(0.0),
            thickness: 0.2,
            theta_start: ScalarOrArray::Scalar(0.0),
            theta_length: ScalarOrArray::Scalar(360.0),
            color: ScalarOrArray::Scalar("blue".to_string()),
        }
    }
}

impl ToPrimitives for SceneArcMark {
    fn to_primitives(&self) -> Result<Vec<Primitive>, XrSceneGraphError> {
        let len = self.len as usize;
        check_ids(&self.name, &self.ids, len)?;
        check_len(&self.name, "position", &self.position, len)?;
        check_len(&self.name, "outer_radius", &self.outer_radius, len)?;
        check_len(&self.name, "inner_radius", &self.inner_radius, len)?;
        check_len(&self.name, "theta_start", &self.theta_start, len)?;
        check_len(&self.name, "theta_length", &self.theta_length, len)?;
        check_len(&self.name, "color", &self.color, len)?;

        let mut primitives = Vec::with_capacity(len);
        for i in 0..len {
            let outer = self.outer_radius.get(i).copied().unwrap_or_default();
            let inner = self.inner_radius.get(i).copied().unwrap_or_default();
            let primitive = if inner > 0.0 {
                Primitive::new("ring")
                    .attr("radius_inner", format_number(inner))
                    .attr("radius_outer", format_number(outer))
            } else {
                Primitive::new("cylinder")
                    .attr("radius", format_number(outer))
                    .attr("height", format_number(self.thickness))
            };
            let primitive = primitive
                .maybe_attr("id", self.ids.as_ref().map(|ids| &ids[i]))
                .maybe_attr("position", self.position.get(i))
                .maybe_attr("theta_start", self.theta_start.get(i).map(|v| format_number(*v)))
                .maybe_attr("theta_length", self.theta_length.get(i).map(|v| format_number(*v)))
                .maybe_attr("color", self.color.get(i));
            primitives.push(primitive);
        }
        Ok(primitives)
    }
}

impl From<SceneArcMark> for SceneMark {
    fn from(mark: SceneArcMark) -> Self {
        SceneMark::Arc(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pie_and_ring_primitives() {
        let mark = SceneArcMark {
            len: 2,
            inner_radius: vec![0.0, 0.5].into(),
            theta_start: vec![0.0, 90.0].into(),
            theta_length: vec![90.0, 270.0].into(),
            ..Default::default()
        };
        let primitives = mark.to_primitives().unwrap();
        assert_eq!(primitives[0].tag, "cylinder");
        assert_eq!(primitives[0].get("theta-length"), Some("90"));
        assert_eq!(primitives[1].tag, "ring");
        assert_eq!(primitives[1].get("radius-inner"), Some("0.5"));
        assert_eq!(primitives[1].get("theta-start"), Some("90"));
    }

    #[test]
    fn test_length_mismatch() {
        let mark = SceneArcMark {
            len: 3,
            theta_start: vec![0.0, 90.0].into(),
            ..Default::default()
        };
        assert!(matches!(
            mark.to_primitives(),
            Err(XrSceneGraphError::AttributeLengthMismatch { .. })
        ));
    }
}
