pub mod params;

use tokio::runtime::Runtime;
use xrchart_guides::axis::marks::make_axes_marks;
use xrchart_scenegraph::marks::element::SceneElementMark;
use xrchart_scenegraph::marks::group::SceneGroup;
use xrchart_scenegraph::marks::mark::SceneMark;
use xrchart_scenegraph::scene_graph::SceneGraph;

use crate::config::ChartDefaults;
use crate::data::loader::DataLoader;
use crate::data::table::DataTable;
use crate::encoding::resolve_encoding;
use crate::error::XrChartError;
use crate::marks::media::compile_media;
use crate::marks::{compile_chart_mark, ChartLayout};
use crate::render::params::{param_combinations, param_group_name, param_transforms};
use crate::spec::chart::ChartSpec;
use crate::spec::element::ElementSpec;
use crate::spec::transform::{FilterSpec, TransformSpec};
use crate::spec::ChartSpecification;
use crate::transforms::apply_transforms;

/// A compiled scene plus the non-fatal diagnostics raised while building it
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledScene {
    pub scene: SceneGraph,
    pub warnings: Vec<String>,
}

/// Compiles specifications into scene graphs.
///
/// Every chart or element of the specification becomes one top-level group,
/// named `chart_<i>` or `element_<i>` by its position in the flattened
/// specification. Compilation is synchronous; transforms run on a private
/// current-thread runtime, so `compile` must not be called from within an
/// async runtime.
#[derive(Clone, Default)]
pub struct SceneCompiler {
    defaults: ChartDefaults,
    loader: DataLoader,
}

impl SceneCompiler {
    pub fn new(defaults: ChartDefaults, loader: DataLoader) -> Self {
        Self { defaults, loader }
    }

    pub fn with_defaults(mut self, defaults: ChartDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_loader(mut self, loader: DataLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn defaults(&self) -> &ChartDefaults {
        &self.defaults
    }

    pub fn compile(&self, spec: &ChartSpecification) -> Result<CompiledScene, XrChartError> {
        spec.validate()?;
        let runtime = tokio::runtime::Builder::new_current_thread().build()?;

        let mut marks: Vec<SceneMark> = vec![];
        let mut warnings: Vec<String> = vec![];
        for (index, leaf) in spec.leaves().into_iter().enumerate() {
            match leaf {
                ChartSpecification::Chart(chart) => {
                    let groups = self.compile_chart(chart, index, &runtime, &mut warnings)?;
                    marks.extend(groups.into_iter().map(SceneMark::from));
                }
                ChartSpecification::Element(element) => {
                    marks.push(compile_element(element, index)?.into());
                }
                ChartSpecification::Concat(_) => {
                    return Err(XrChartError::InternalError(
                        "Nested concatenation was not flattened".to_string(),
                    ));
                }
            }
        }
        log::debug!("Compiled scene with {} top-level groups", marks.len());
        for mark in &marks {
            log::debug!("Group `{}` holds {} marks", mark.name(), mark.instance_count());
        }

        Ok(CompiledScene {
            scene: SceneGraph { marks },
            warnings,
        })
    }

    /// The chart's group, followed by one hidden group per parameter value
    /// combination
    fn compile_chart(
        &self,
        chart: &ChartSpec,
        index: usize,
        runtime: &Runtime,
        warnings: &mut Vec<String>,
    ) -> Result<Vec<SceneGroup>, XrChartError> {
        let mark = chart.mark_spec()?;
        let (position, rotation) = chart.placement()?;
        let name = format!("chart_{index}");

        if !mark.is_chart() {
            let compiled = compile_media(mark, chart.data_spec()?, &self.defaults)?;
            return Ok(vec![SceneGroup {
                name,
                position,
                rotation: rotation + compiled.rotation_offset,
                visible: true,
                marks: compiled.marks,
            }]);
        }

        // Loading may block on network requests, so it happens outside the runtime
        let raw = self.loader.load(chart.data_spec()?)?;

        let main_transforms: Vec<TransformSpec> = chart
            .transform
            .iter()
            .filter(|t| {
                !matches!(
                    t,
                    TransformSpec::Filter {
                        filter: FilterSpec::Param { .. }
                    }
                )
            })
            .cloned()
            .collect();
        let mut groups = vec![self.compile_chart_group(
            chart,
            raw.clone(),
            &main_transforms,
            &name,
            runtime,
            warnings,
        )?];

        for param in &chart.params {
            for combination in param_combinations(&raw, param)? {
                let transforms = param_transforms(&chart.transform, param, &combination);
                let mut group = self.compile_chart_group(
                    chart,
                    raw.clone(),
                    &transforms,
                    &param_group_name(param, &combination),
                    runtime,
                    warnings,
                )?;
                group.visible = false;
                groups.push(group);
            }
        }
        Ok(groups)
    }

    fn compile_chart_group(
        &self,
        chart: &ChartSpec,
        raw: DataTable,
        transforms: &[TransformSpec],
        name: &str,
        runtime: &Runtime,
        warnings: &mut Vec<String>,
    ) -> Result<SceneGroup, XrChartError> {
        let mark = chart.mark_spec()?;
        let encoding = chart.encoding_spec()?;
        let (position, rotation) = chart.placement()?;

        let output = runtime.block_on(apply_transforms(raw, transforms, encoding))?;
        warnings.extend(output.warnings);

        let resolved = resolve_encoding(encoding, mark.mark_type(), &output.table)?;
        let layout = ChartLayout::new(chart, &self.defaults);
        let compiled = compile_chart_mark(mark, &resolved, &output.table, &layout, &self.defaults)?;

        let mut marks = compiled.marks;
        marks.extend(make_axes_marks(&compiled.axes, &self.defaults.axis));
        Ok(SceneGroup {
            name: name.to_string(),
            position,
            rotation: rotation + compiled.rotation_offset,
            visible: true,
            marks,
        })
    }
}

fn compile_element(element: &ElementSpec, index: usize) -> Result<SceneGroup, XrChartError> {
    let (position, rotation) = element.placement()?;
    let shape = SceneElementMark {
        name: "element".to_string(),
        shape: element.element.to_string(),
        attributes: element.attribute_strings()?,
    };
    Ok(SceneGroup {
        name: format!("element_{index}"),
        position,
        rotation,
        visible: true,
        marks: vec![shape.into()],
    })
}
