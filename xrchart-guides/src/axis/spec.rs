use serde::{Deserialize, Serialize};
use xrchart_common::vec3::Vec3;
use xrchart_scenegraph::marks::text::TextAlign;

use crate::error::XrGuidesError;

use super::opts::AxisDimension;

/// Line extent and labels of one rendered axis.
///
/// An axis without `start` is suppressed: either the channel is absent or the
/// user disabled it with `axis: false`. Label positions and values always
/// have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    start: Option<Vec3>,
    end: Option<Vec3>,
    labels_pos: Vec<Vec3>,
    labels_values: Vec<String>,
    labels_rotation: Vec3,
    labels_align: TextAlign,
}

impl AxisSpec {
    pub fn try_new(
        start: Vec3,
        end: Vec3,
        labels_pos: Vec<Vec3>,
        labels_values: Vec<String>,
        labels_rotation: Vec3,
        labels_align: TextAlign,
    ) -> Result<Self, XrGuidesError> {
        if labels_pos.len() != labels_values.len() {
            return Err(XrGuidesError::LabelLengthMismatch {
                positions: labels_pos.len(),
                values: labels_values.len(),
            });
        }
        Ok(Self {
            start: Some(start),
            end: Some(end),
            labels_pos,
            labels_values,
            labels_rotation,
            labels_align,
        })
    }

    /// An axis that is not rendered
    pub fn suppressed() -> Self {
        Self {
            start: None,
            end: None,
            labels_pos: vec![],
            labels_values: vec![],
            labels_rotation: Vec3::ZERO,
            labels_align: TextAlign::Center,
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.start.is_none()
    }

    pub fn start(&self) -> Option<Vec3> {
        self.start
    }

    pub fn end(&self) -> Option<Vec3> {
        self.end
    }

    pub fn labels_pos(&self) -> &[Vec3] {
        &self.labels_pos
    }

    pub fn labels_values(&self) -> &[String] {
        &self.labels_values
    }

    pub fn labels_rotation(&self) -> Vec3 {
        self.labels_rotation
    }

    pub fn labels_align(&self) -> TextAlign {
        self.labels_align
    }
}

impl Default for AxisSpec {
    fn default() -> Self {
        Self::suppressed()
    }
}

/// The three axes of a chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub x: AxisSpec,
    pub y: AxisSpec,
    pub z: AxisSpec,
}

impl Axes {
    pub fn get(&self, dimension: AxisDimension) -> &AxisSpec {
        match dimension {
            AxisDimension::X => &self.x,
            AxisDimension::Y => &self.y,
            AxisDimension::Z => &self.z,
        }
    }

    /// Non-suppressed axes in x, y, z order
    pub fn visible(&self) -> Vec<(AxisDimension, &AxisSpec)> {
        [AxisDimension::X, AxisDimension::Y, AxisDimension::Z]
            .into_iter()
            .map(|d| (d, self.get(d)))
            .filter(|(_, axis)| !axis.is_suppressed())
            .collect()
    }
}
