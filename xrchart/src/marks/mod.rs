pub mod arc;
pub mod bar;
pub mod media;
pub mod point;

use xrchart_common::vec3::Vec3;
use xrchart_guides::axis::spec::Axes;
use xrchart_scenegraph::marks::mark::SceneMark;

use crate::config::ChartDefaults;
use crate::data::table::DataTable;
use crate::encoding::ResolvedEncoding;
use crate::error::XrChartError;
use crate::spec::chart::ChartSpec;
use crate::spec::mark::MarkSpec;

/// Bounds of the box a chart is laid out in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl ChartLayout {
    pub fn new(chart: &ChartSpec, defaults: &ChartDefaults) -> Self {
        Self {
            width: chart.width.unwrap_or(defaults.width),
            height: chart.height.unwrap_or(defaults.height),
            depth: chart.depth.unwrap_or(defaults.depth),
        }
    }
}

/// Geometry of one chart before it is wrapped into a scene group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledChart {
    pub marks: Vec<SceneMark>,
    pub axes: Axes,
    /// Rotation added to the chart's own group rotation
    pub rotation_offset: Vec3,
}

/// Compile a data-driven mark from resolved encodings and transformed rows
pub fn compile_chart_mark(
    mark: &MarkSpec,
    encoding: &ResolvedEncoding,
    table: &DataTable,
    layout: &ChartLayout,
    defaults: &ChartDefaults,
) -> Result<CompiledChart, XrChartError> {
    match mark {
        MarkSpec::Bar(options) => bar::compile_bar(options, encoding, table, layout, defaults),
        MarkSpec::Arc(options) => arc::compile_arc(options, encoding, table, defaults),
        MarkSpec::Point(options) => point::compile_point(options, encoding, table, layout, defaults),
        MarkSpec::Image(_) | MarkSpec::Gltf(_) => Err(XrChartError::InternalError(format!(
            "{} is not a data-driven mark",
            mark.mark_type()
        ))),
    }
}

/// Composite id per row: the display values of `columns` joined with ` : `
pub(crate) fn row_ids(columns: &[Vec<String>], len: usize) -> Vec<String> {
    (0..len)
        .map(|i| {
            columns
                .iter()
                .map(|values| values[i].as_str())
                .collect::<Vec<_>>()
                .join(" : ")
        })
        .collect()
}
