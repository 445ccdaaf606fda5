use arrow::datatypes::DataType;
use datafusion::logical_expr::{cast, ident};
use datafusion::prelude::{lit, DataFrame, Expr};
use datafusion_common::DFSchema;

use crate::data::kind::{infer_column_kind, ColumnKind};
use crate::error::XrChartError;
use crate::spec::transform::{FilterOp, FilterPredicate};

pub fn apply_filter(df: DataFrame, predicate: &FilterPredicate) -> Result<DataFrame, XrChartError> {
    let expr = filter_expr(predicate, df.schema())?;
    Ok(df.filter(expr)?)
}

/// Build the boolean expression for a predicate.
///
/// Numeric values compare numerically against quantitative fields. Anything
/// else compares as text, which only supports `=` and `!=`.
pub fn filter_expr(predicate: &FilterPredicate, schema: &DFSchema) -> Result<Expr, XrChartError> {
    let field = schema
        .field_with_unqualified_name(&predicate.field)
        .map_err(|_| XrChartError::FieldNotFound(predicate.field.clone()))?;
    let kind = infer_column_kind(field)?;
    let column = ident(&predicate.field);

    match (kind, predicate.numeric_value()) {
        (ColumnKind::Quantitative, Some(value)) => Ok(compare(column, predicate.op, lit(value))),
        _ if !predicate.op.is_ordering() => Ok(compare(
            cast(column, DataType::Utf8),
            predicate.op,
            lit(predicate.value.clone()),
        )),
        _ => Err(XrChartError::DataError(format!(
            "Filter `{predicate}` applies an ordering operator to nominal field `{}`",
            predicate.field
        ))),
    }
}

fn compare(left: Expr, op: FilterOp, right: Expr) -> Expr {
    match op {
        FilterOp::Eq => left.eq(right),
        FilterOp::NotEq => left.not_eq(right),
        FilterOp::Gt => left.gt(right),
        FilterOp::GtEq => left.gt_eq(right),
        FilterOp::Lt => left.lt(right),
        FilterOp::LtEq => left.lt_eq(right),
    }
}
