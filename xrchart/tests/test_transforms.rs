use arrow::array::{ArrayRef, AsArray};
use arrow::datatypes::Float64Type;
use serde_json::{json, Map, Value};
use xrchart::data::column::{display_values, numeric_values};
use xrchart::data::loader::table_from_records;
use xrchart::data::table::DataTable;
use xrchart::error::{ErrorKind, XrChartError};
use xrchart::spec::encoding::EncodingSpec;
use xrchart::spec::transform::TransformSpec;
use xrchart::transforms::apply_transforms;

fn cars() -> DataTable {
    let records: Vec<Map<String, Value>> = serde_json::from_value(json!([
        {"model": "leon", "motor": "diesel", "doors": 5, "sales": 10},
        {"model": "leon", "motor": "gasoline", "doors": 5, "sales": 20},
        {"model": "ibiza", "motor": "diesel", "doors": 3, "sales": 4},
        {"model": "ibiza", "motor": "gasoline", "doors": 5, "sales": 8},
        {"model": "arona", "motor": "electric", "doors": 5, "sales": 6},
    ]))
    .unwrap();
    table_from_records(&records).unwrap()
}

fn encoding(value: Value) -> EncodingSpec {
    serde_json::from_value(value).unwrap()
}

fn transforms(value: Value) -> Vec<TransformSpec> {
    serde_json::from_value(value).unwrap()
}

fn column<'a>(table: &'a DataTable, name: &str) -> &'a ArrayRef {
    table.column(name).unwrap()
}

#[tokio::test]
async fn test_filter_then_aggregate() -> Result<(), XrChartError> {
    let output = apply_transforms(
        cars(),
        &transforms(json!([
            {"aggregate": [{"op": "sum", "field": "sales", "as": "total"}]},
            {"filter": "datum.motor = 'diesel'"}
        ])),
        &encoding(json!({"x": "model", "y": "total"})),
    )
    .await?;

    assert!(output.warnings.is_empty());
    let table = output.table;
    assert_eq!(display_values(column(&table, "model"))?, vec!["ibiza", "leon"]);
    assert_eq!(numeric_values(column(&table, "total"))?, vec![Some(4.0), Some(10.0)]);
    Ok(())
}

#[tokio::test]
async fn test_numeric_filter() -> Result<(), XrChartError> {
    let output = apply_transforms(
        cars(),
        &transforms(json!([{"filter": "datum.doors >= 4"}, {"filter": "sales < 15"}])),
        &encoding(json!({"x": "model", "y": "sales"})),
    )
    .await?;
    assert_eq!(output.table.num_rows(), 3);
    Ok(())
}

#[tokio::test]
async fn test_empty_filter_warns() -> Result<(), XrChartError> {
    let output = apply_transforms(
        cars(),
        &transforms(json!([{"filter": "datum.doors > 100"}])),
        &encoding(json!({"x": "model", "y": "sales"})),
    )
    .await?;
    assert!(output.table.is_empty());
    assert_eq!(output.warnings.len(), 1);
    assert!(output.warnings[0].contains("datum.doors > 100"));
    Ok(())
}

#[tokio::test]
async fn test_inline_mean() -> Result<(), XrChartError> {
    let output = apply_transforms(
        cars(),
        &[],
        &encoding(json!({"x": "model", "y": "mean(sales)"})),
    )
    .await?;
    let table = output.table;
    assert_eq!(display_values(column(&table, "model"))?, vec!["arona", "ibiza", "leon"]);
    let means = column(&table, "mean_sales").as_primitive::<Float64Type>();
    assert_eq!(means.values().to_vec(), vec![6.0, 6.0, 15.0]);
    Ok(())
}

#[tokio::test]
async fn test_inline_count() -> Result<(), XrChartError> {
    let output = apply_transforms(
        cars(),
        &[],
        &encoding(json!({"x": "motor", "y": "count()"})),
    )
    .await?;
    let table = output.table;
    assert_eq!(
        display_values(column(&table, "motor"))?,
        vec!["diesel", "electric", "gasoline"]
    );
    assert_eq!(numeric_values(column(&table, "count"))?, vec![Some(2.0), Some(1.0), Some(2.0)]);
    Ok(())
}

#[tokio::test]
async fn test_groupby_drops_channel() {
    let err = apply_transforms(
        cars(),
        &transforms(json!([
            {"aggregate": [{"op": "mean", "field": "sales", "as": "sales"}], "groupby": ["model"]}
        ])),
        &encoding(json!({"x": "model", "y": "sales", "color": "motor"})),
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Semantic);
    assert!(err.to_string().contains("motor"));
}

#[tokio::test]
async fn test_missing_filter_field() {
    let err = apply_transforms(
        cars(),
        &transforms(json!([{"filter": "datum.price > 3"}])),
        &encoding(json!({"x": "model", "y": "sales"})),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, XrChartError::FieldNotFound(ref field) if field == "price"));
}
