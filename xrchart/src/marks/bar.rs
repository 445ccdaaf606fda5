use itertools::izip;
use xrchart_common::value::ScalarOrArray;
use xrchart_common::vec3::Vec3;
use xrchart_guides::axis::band::make_band_axis;
use xrchart_guides::axis::numeric::make_numeric_axis;
use xrchart_guides::axis::opts::{AxisConfig, AxisDimension};
use xrchart_guides::axis::spec::{AxisSpec, Axes};
use xrchart_scales::scales::band::BandScale;
use xrchart_scales::scales::linear::ExtentScale;
use xrchart_scenegraph::marks::box_mark::SceneBoxMark;

use crate::config::ChartDefaults;
use crate::data::column::{category_values, display_values, numeric_values_or_zero};
use crate::data::kind::ColumnKind;
use crate::data::table::DataTable;
use crate::encoding::{ResolvedChannel, ResolvedEncoding};
use crate::error::XrChartError;
use crate::marks::{row_ids, ChartLayout, CompiledChart};
use crate::spec::encoding::Channel;
use crate::spec::mark::BarMarkOptions;

/// Per-row placement of bars along one spatial dimension
struct BarDimension {
    /// Center of each bar, before the baseline shift
    centers: Vec<f64>,
    extents: Vec<f64>,
    /// Translation that keeps negative bars inside the chart
    shift: f64,
    axis: AxisSpec,
}

struct DimensionOptions<'a> {
    dimension: AxisDimension,
    max_extent: f64,
    /// Fixed slot width of nominal bars, otherwise slots fill `max_extent`
    slot_width: Option<f64>,
    /// Extent when the channel is absent
    absent_extent: f64,
    shift_negative: bool,
    axis_config: &'a AxisConfig,
}

fn bar_dimension(
    channel: Option<&ResolvedChannel>,
    table: &DataTable,
    opts: DimensionOptions,
) -> Result<BarDimension, XrChartError> {
    let len = table.num_rows();
    let Some(channel) = channel else {
        return Ok(BarDimension {
            centers: vec![opts.absent_extent / 2.0; len],
            extents: vec![opts.absent_extent; len],
            shift: 0.0,
            axis: AxisSpec::suppressed(),
        });
    };

    let column = table.column(&channel.field)?;
    match channel.kind {
        ColumnKind::Quantitative => {
            let values = numeric_values_or_zero(column)?;
            let scale = ExtentScale::try_new(&values, opts.max_extent)?;
            let shift = if opts.shift_negative {
                scale.baseline_shift()
            } else {
                0.0
            };
            let axis = if channel.axis {
                let ticks = scale.ticks(opts.axis_config.tick_count, shift);
                make_numeric_axis(opts.dimension, opts.max_extent, &ticks, opts.axis_config)?
            } else {
                AxisSpec::suppressed()
            };
            Ok(BarDimension {
                centers: values.iter().map(|v| scale.offset(*v)).collect(),
                extents: values.iter().map(|v| scale.extent(*v)).collect(),
                shift,
                axis,
            })
        }
        ColumnKind::Nominal => {
            let values = category_values(column)?;
            let scale = match opts.slot_width {
                Some(width) => BandScale::try_new(&values, width)?,
                None => BandScale::try_new_fill(&values, opts.max_extent)?,
            };
            let axis = if channel.axis {
                make_band_axis(opts.dimension, &scale, opts.axis_config)?
            } else {
                AxisSpec::suppressed()
            };
            Ok(BarDimension {
                centers: values
                    .iter()
                    .map(|v| scale.center(v))
                    .collect::<Result<_, _>>()?,
                extents: vec![scale.step(); len],
                shift: 0.0,
                axis,
            })
        }
    }
}

/// Lay out one box per row.
///
/// Quantitative channels scale bar lengths from a zero baseline so that the
/// longest bar spans the chart extent. Bars stand on the floor (y = 0); along
/// x and z, negative bars are shifted so the whole chart stays inside its
/// bounds. Nominal channels place bars in equal slots in sorted category
/// order. Colors cycle through the palette by row.
pub fn compile_bar(
    options: &BarMarkOptions,
    encoding: &ResolvedEncoding,
    table: &DataTable,
    layout: &ChartLayout,
    defaults: &ChartDefaults,
) -> Result<CompiledChart, XrChartError> {
    let len = table.num_rows();
    if len == 0 {
        return Ok(CompiledChart::default());
    }

    let x = bar_dimension(
        encoding.get(Channel::X),
        table,
        DimensionOptions {
            dimension: AxisDimension::X,
            max_extent: layout.width,
            slot_width: options.size,
            absent_extent: options.size.unwrap_or(defaults.bar_size),
            shift_negative: true,
            axis_config: &defaults.axis,
        },
    )?;
    let y = bar_dimension(
        encoding.get(Channel::Y),
        table,
        DimensionOptions {
            dimension: AxisDimension::Y,
            max_extent: layout.height,
            slot_width: None,
            absent_extent: defaults.bar_height_without_y.min(layout.height),
            shift_negative: false,
            axis_config: &defaults.axis,
        },
    )?;
    let z = bar_dimension(
        encoding.get(Channel::Z),
        table,
        DimensionOptions {
            dimension: AxisDimension::Z,
            max_extent: layout.depth,
            slot_width: options.size,
            absent_extent: options.size.unwrap_or(defaults.bar_size),
            shift_negative: true,
            axis_config: &defaults.axis,
        },
    )?;

    let positions = izip!(&x.centers, &y.centers, &z.centers)
        .map(|(cx, cy, cz)| Vec3::new(cx + x.shift, *cy, -(cz + z.shift)))
        .collect();

    let mut id_columns = vec![];
    for channel in [Channel::X, Channel::Y, Channel::Z] {
        if let Some(resolved) = encoding.get(channel) {
            id_columns.push(display_values(table.column(&resolved.field)?)?);
        }
    }

    let bars = SceneBoxMark {
        name: "bars".to_string(),
        len: len as u32,
        ids: Some(row_ids(&id_columns, len)),
        position: ScalarOrArray::Array(positions),
        width: ScalarOrArray::Array(x.extents),
        height: ScalarOrArray::Array(y.extents),
        depth: ScalarOrArray::Array(z.extents),
        color: ScalarOrArray::Array(
            (0..len)
                .map(|i| defaults.palette.color_at(i).to_string())
                .collect(),
        ),
    };

    Ok(CompiledChart {
        marks: vec![bars.into()],
        axes: Axes {
            x: x.axis,
            y: y.axis,
            z: z.axis,
        },
        rotation_offset: Default::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::table_from_records;
    use crate::encoding::resolve_encoding;
    use crate::spec::encoding::EncodingSpec;
    use crate::spec::mark::MarkType;
    use float_cmp::assert_approx_eq;
    use serde_json::{json, Value};

    fn compile(data: Value, encoding: Value, options: BarMarkOptions) -> CompiledChart {
        let table = table_from_records(&serde_json::from_value(data).unwrap()).unwrap();
        let encoding: EncodingSpec = serde_json::from_value(encoding).unwrap();
        let resolved = resolve_encoding(&encoding, MarkType::Bar, &table).unwrap();
        let defaults = ChartDefaults::default();
        let layout = ChartLayout {
            width: defaults.width,
            height: defaults.height,
            depth: defaults.depth,
        };
        compile_bar(&options, &resolved, &table, &layout, &defaults).unwrap()
    }

    fn bars(chart: &CompiledChart) -> &SceneBoxMark {
        match &chart.marks[0] {
            xrchart_scenegraph::marks::mark::SceneMark::Box(bars) => bars,
            other => panic!("expected box mark, got {other:?}"),
        }
    }

    #[test]
    fn test_simple_bars() {
        let chart = compile(
            json!([{"model": "x", "sales": 10}, {"model": "y", "sales": 20}]),
            json!({"x": "model", "y": "sales"}),
            Default::default(),
        );
        let bars = bars(&chart);
        let heights = bars.height.as_vec(2);
        assert_approx_eq!(f64, heights[1], 2.0 * heights[0]);
        assert_approx_eq!(f64, heights[1], 4.0);

        // Bases on the floor
        let positions = bars.position.as_vec(2);
        for (position, height) in positions.iter().zip(&heights) {
            assert_approx_eq!(f64, position.y - height / 2.0, 0.0);
        }

        // Nominal x slots fill the width in sorted order
        assert_approx_eq!(f64, positions[0].x, 1.0);
        assert_approx_eq!(f64, positions[1].x, 3.0);
        assert_eq!(bars.width.as_vec(2), vec![2.0, 2.0]);
        assert_eq!(bars.ids.clone().unwrap(), vec!["x : 10", "y : 20"]);
        assert_eq!(bars.color.as_vec(2), vec!["red", "green"]);

        assert_eq!(chart.axes.x.labels_values(), ["x", "y"]);
        assert_eq!(chart.axes.y.labels_values(), ["4", "8", "12", "16", "20"]);
        assert!(chart.axes.z.is_suppressed());
    }

    #[test]
    fn test_bar_size_and_depth() {
        let chart = compile(
            json!([{"model": "a", "motor": "d", "sales": 1}, {"model": "b", "motor": "g", "sales": 3}]),
            json!({"x": "model", "y": "sales", "z": "motor"}),
            BarMarkOptions { size: Some(0.5) },
        );
        let bars = bars(&chart);
        let positions = bars.position.as_vec(2);
        assert_approx_eq!(f64, positions[0].x, 0.25);
        assert_approx_eq!(f64, positions[1].x, 0.75);
        assert_approx_eq!(f64, positions[0].z, -0.25);
        assert_approx_eq!(f64, positions[1].z, -0.75);
        assert_eq!(bars.depth.as_vec(2), vec![0.5, 0.5]);
        assert_eq!(chart.axes.z.labels_values(), ["d", "g"]);
    }

    #[test]
    fn test_negative_x_values_are_shifted() {
        let chart = compile(
            json!([{"model": "a", "delta": -2}, {"model": "b", "delta": 6}]),
            json!({"x": "delta", "y": "model"}),
            Default::default(),
        );
        let bars = bars(&chart);
        let positions = bars.position.as_vec(2);
        let widths = bars.width.as_vec(2);
        for (position, width) in positions.iter().zip(&widths) {
            assert!(position.x - width / 2.0 >= -1e-9);
            assert!(position.x + width / 2.0 <= 4.0 + 1e-9);
        }
        // Both bars start at the shifted zero baseline
        assert_approx_eq!(f64, positions[0].x + widths[0] / 2.0, 1.0);
        assert_approx_eq!(f64, positions[1].x - widths[1] / 2.0, 1.0);
    }

    #[test]
    fn test_single_negative_bar_hangs_from_floor() {
        let chart = compile(
            json!([{"model": "a", "sales": -5}]),
            json!({"x": "model", "y": "sales"}),
            Default::default(),
        );
        let bars = bars(&chart);
        let position = bars.position.as_vec(1)[0];
        let height = bars.height.as_vec(1)[0];
        assert_approx_eq!(f64, height, 4.0);
        assert_approx_eq!(f64, position.y + height / 2.0, 0.0);
        assert_approx_eq!(f64, position.y - height / 2.0, -4.0);
    }

    #[test]
    fn test_zero_values_have_no_height() {
        let chart = compile(
            json!([{"model": "a", "sales": 0}, {"model": "b", "sales": 0}]),
            json!({"x": "model", "y": "sales"}),
            Default::default(),
        );
        let bars = bars(&chart);
        assert_eq!(bars.height.as_vec(2), vec![0.0, 0.0]);
        assert!(bars.position.as_vec(2).iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_default_height_without_y() {
        let chart = compile(
            json!([{"model": "a", "motor": "d"}, {"model": "b", "motor": "g"}]),
            json!({"x": "model", "z": "motor"}),
            Default::default(),
        );
        let bars = bars(&chart);
        let defaults = ChartDefaults::default();
        assert_eq!(bars.height.as_vec(2), vec![defaults.bar_height_without_y; 2]);
        for position in bars.position.as_vec(2) {
            assert_approx_eq!(f64, position.y - defaults.bar_height_without_y / 2.0, 0.0);
        }
        assert!(chart.axes.y.is_suppressed());
        assert_eq!(chart.axes.z.labels_values(), ["d", "g"]);
    }

    #[test]
    fn test_hidden_axis() {
        let chart = compile(
            json!([{"model": "x", "sales": 10}]),
            json!({"x": {"field": "model", "axis": false}, "y": "sales"}),
            Default::default(),
        );
        assert!(chart.axes.x.is_suppressed());
        assert!(!chart.axes.y.is_suppressed());
    }

    #[test]
    fn test_absent_z() {
        let chart = compile(
            json!([{"model": "x", "sales": 10}]),
            json!({"x": "model", "y": "sales"}),
            Default::default(),
        );
        let bars = bars(&chart);
        assert_eq!(bars.depth.as_vec(1), vec![0.5]);
        assert_approx_eq!(f64, bars.position.as_vec(1)[0].z, -0.25);
    }
}
