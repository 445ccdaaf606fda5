pub mod aggregate;
pub mod filter;

use datafusion::prelude::SessionContext;

use crate::data::table::DataTable;
use crate::error::XrChartError;
use crate::spec::encoding::EncodingSpec;
use crate::spec::transform::{FilterSpec, TransformSpec};
use crate::transforms::aggregate::{apply_aggregate, apply_encoding_aggregates};
use crate::transforms::filter::apply_filter;

/// Transformed rows plus any non-fatal diagnostics
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub table: DataTable,
    pub warnings: Vec<String>,
}

/// Apply a transform list to a table.
///
/// Filters run first, in declaration order, followed by aggregate steps in
/// declaration order, followed by any inline aggregates of the encoding.
/// Parameter filters are resolved by the scene assembler and skipped here.
pub async fn apply_transforms(
    table: DataTable,
    transforms: &[TransformSpec],
    encoding: &EncodingSpec,
) -> Result<TransformOutput, XrChartError> {
    let ctx = SessionContext::new();
    let mut df = table.to_dataframe(&ctx)?;
    let mut warnings = vec![];

    for transform in transforms {
        match transform {
            TransformSpec::Filter {
                filter: FilterSpec::Predicate(predicate),
            } => {
                df = apply_filter(df, predicate)?;
                if df.clone().count().await? == 0 {
                    let warning = format!("Data does not contain values for the filter: {predicate}");
                    log::warn!("{warning}");
                    warnings.push(warning);
                }
            }
            TransformSpec::Filter {
                filter: FilterSpec::Param { param },
            } => {
                log::debug!("Skipping filter on parameter `{param}`");
            }
            TransformSpec::Aggregate { .. } => {}
        }
    }

    for transform in transforms {
        if let TransformSpec::Aggregate { aggregate, groupby } = transform {
            df = apply_aggregate(df, aggregate, groupby.as_deref(), encoding)?;
        }
    }
    df = apply_encoding_aggregates(df, encoding)?;

    let table = DataTable::from_dataframe(df).await?;
    Ok(TransformOutput { table, warnings })
}
