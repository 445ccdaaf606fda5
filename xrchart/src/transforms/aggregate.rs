use datafusion::functions_aggregate::expr_fn::{avg, count, median, stddev, sum, var_sample};
use datafusion::functions_aggregate::min_max::{max, min};
use datafusion::logical_expr::{ident, SortExpr};
use datafusion::prelude::{lit, DataFrame, Expr};

use crate::error::XrChartError;
use crate::spec::encoding::EncodingSpec;
use crate::spec::transform::{AggregateOp, AggregateSpec};

/// Aggregate expression for `op` over `field`, aliased to `alias`.
/// `count` without a field counts rows.
pub fn aggregate_expr(op: AggregateOp, field: Option<&str>, alias: &str) -> Result<Expr, XrChartError> {
    let expr = match (op, field) {
        (AggregateOp::Count, None) => count(lit(1)),
        (AggregateOp::Count, Some(field)) => count(ident(field)),
        (_, None) => {
            return Err(XrChartError::ValidationError(format!(
                "Aggregate operation `{op}` requires a `field`"
            )));
        }
        (AggregateOp::Sum, Some(field)) => sum(ident(field)),
        (AggregateOp::Mean, Some(field)) => avg(ident(field)),
        (AggregateOp::Median, Some(field)) => median(ident(field)),
        (AggregateOp::Min, Some(field)) => min(ident(field)),
        (AggregateOp::Max, Some(field)) => max(ident(field)),
        (AggregateOp::Std, Some(field)) => stddev(ident(field)),
        (AggregateOp::Var, Some(field)) => var_sample(ident(field)),
    };
    Ok(expr.alias(alias))
}

/// Apply one aggregate transform step.
///
/// Without an explicit `groupby` the rows are grouped by every encoding
/// field that is not an output of this step. An explicit `groupby` that
/// leaves out such a field is rejected, since the field would not survive
/// the aggregation.
pub fn apply_aggregate(
    df: DataFrame,
    aggregates: &[AggregateSpec],
    groupby: Option<&[String]>,
    encoding: &EncodingSpec,
) -> Result<DataFrame, XrChartError> {
    check_fields(&df, aggregates.iter().filter_map(|a| a.field.as_deref()))?;
    let outputs: Vec<String> = aggregates.iter().map(|a| a.output_name()).collect();
    let aggr_exprs = aggregates
        .iter()
        .zip(&outputs)
        .map(|(a, output)| aggregate_expr(a.op, a.field.as_deref(), output))
        .collect::<Result<Vec<_>, _>>()?;
    let required: Vec<String> = encoding
        .source_fields()
        .into_iter()
        .filter(|field| !outputs.contains(field))
        .collect();
    let group_fields = group_fields(required, groupby)?;
    aggregate_dataframe(df, &group_fields, aggr_exprs)
}

/// Resolve aggregates written inline on encoding channels, such as
/// `"y": "mean(sales)"`, as one final aggregate step
pub fn apply_encoding_aggregates(
    df: DataFrame,
    encoding: &EncodingSpec,
) -> Result<DataFrame, XrChartError> {
    let aggregated: Vec<_> = encoding
        .iter()
        .filter_map(|(_, e)| e.aggregate.map(|op| (op, e)))
        .collect();
    if aggregated.is_empty() {
        return Ok(df);
    }

    check_fields(&df, aggregated.iter().filter_map(|(_, e)| e.source_field()))?;
    let mut outputs: Vec<String> = vec![];
    let mut aggr_exprs = vec![];
    for (op, channel_encoding) in &aggregated {
        let output = channel_encoding.output_field();
        if outputs.contains(&output) {
            continue;
        }
        aggr_exprs.push(aggregate_expr(*op, channel_encoding.source_field(), &output)?);
        outputs.push(output);
    }

    let aggregated_fields: Vec<&str> = aggregated
        .iter()
        .filter_map(|(_, e)| e.source_field())
        .collect();
    let required: Vec<String> = encoding
        .iter()
        .filter(|(_, e)| e.aggregate.is_none())
        .filter_map(|(_, e)| e.source_field())
        .filter(|field| !aggregated_fields.contains(field))
        .fold(vec![], |mut fields, field| {
            if !fields.iter().any(|f: &String| f == field) {
                fields.push(field.to_string());
            }
            fields
        });

    let explicit: Vec<String> = aggregated
        .iter()
        .filter_map(|(_, e)| e.groupby.clone())
        .flatten()
        .collect();
    let groupby = (!explicit.is_empty()).then_some(explicit.as_slice());
    let group_fields = group_fields(required, groupby)?;
    aggregate_dataframe(df, &group_fields, aggr_exprs)
}

fn group_fields(required: Vec<String>, groupby: Option<&[String]>) -> Result<Vec<String>, XrChartError> {
    let Some(groupby) = groupby else {
        return Ok(required);
    };
    let missing: Vec<String> = required
        .into_iter()
        .filter(|field| !groupby.contains(field))
        .collect();
    if !missing.is_empty() {
        return Err(XrChartError::GroupByDropsChannel {
            fields: missing,
            groupby: groupby.to_vec(),
        });
    }
    let mut fields: Vec<String> = vec![];
    for field in groupby {
        if !fields.contains(field) {
            fields.push(field.clone());
        }
    }
    Ok(fields)
}

fn check_fields<'a>(
    df: &DataFrame,
    fields: impl IntoIterator<Item = &'a str>,
) -> Result<(), XrChartError> {
    for field in fields {
        if df.schema().field_with_unqualified_name(field).is_err() {
            return Err(XrChartError::FieldNotFound(field.to_string()));
        }
    }
    Ok(())
}

fn aggregate_dataframe(
    df: DataFrame,
    group_fields: &[String],
    aggr_exprs: Vec<Expr>,
) -> Result<DataFrame, XrChartError> {
    check_fields(&df, group_fields.iter().map(|f| f.as_str()))?;
    let group_exprs: Vec<Expr> = group_fields.iter().map(|f| ident(f)).collect();
    let sort_exprs: Vec<SortExpr> = group_fields
        .iter()
        .map(|f| ident(f).sort(true, false))
        .collect();

    let df = df.aggregate(group_exprs, aggr_exprs)?;
    if sort_exprs.is_empty() {
        Ok(df)
    } else {
        Ok(df.sort(sort_exprs)?)
    }
}
