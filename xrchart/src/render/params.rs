use std::collections::BTreeSet;

use xrchart_scales::category::CategoryValue;

use crate::data::column::category_values;
use crate::data::table::DataTable;
use crate::error::XrChartError;
use crate::spec::params::ParamSpec;
use crate::spec::transform::{FilterOp, FilterPredicate, FilterSpec, TransformSpec};

/// Sorted distinct value combinations of the parameter's fields. Rows with
/// a null in any of the fields are skipped.
pub fn param_combinations(
    table: &DataTable,
    param: &ParamSpec,
) -> Result<Vec<Vec<CategoryValue>>, XrChartError> {
    let columns = param
        .fields()
        .iter()
        .map(|field| category_values(table.column(field)?))
        .collect::<Result<Vec<_>, _>>()?;

    let combinations: BTreeSet<Vec<CategoryValue>> = (0..table.num_rows())
        .map(|row| columns.iter().map(|values| values[row].clone()).collect::<Vec<_>>())
        .filter(|combination| !combination.contains(&CategoryValue::Null))
        .collect();
    Ok(combinations.into_iter().collect())
}

/// Group id of one combination, e.g. `brush:model=leon;motor=diesel`
pub fn param_group_name(param: &ParamSpec, combination: &[CategoryValue]) -> String {
    let values: Vec<String> = param
        .fields()
        .iter()
        .zip(combination)
        .map(|(field, value)| format!("{field}={value}"))
        .collect();
    format!("{}:{}", param.name, values.join(";"))
}

/// The chart's transforms for one combination: equality filters on the
/// combination come first, and filters on other parameters are dropped
pub fn param_transforms(
    transforms: &[TransformSpec],
    param: &ParamSpec,
    combination: &[CategoryValue],
) -> Vec<TransformSpec> {
    let selection = param.fields().iter().zip(combination).map(|(field, value)| {
        let value = match value {
            CategoryValue::Number(v) => v.0.to_string(),
            other => other.to_string(),
        };
        TransformSpec::Filter {
            filter: FilterSpec::Predicate(FilterPredicate::new(field, FilterOp::Eq, &value)),
        }
    });
    let rest = transforms
        .iter()
        .filter(|t| !matches!(t, TransformSpec::Filter { filter: FilterSpec::Param { .. } }))
        .cloned();
    selection.chain(rest).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::table_from_records;
    use serde_json::json;

    #[test]
    fn test_combinations() -> Result<(), XrChartError> {
        let table = table_from_records(&serde_json::from_value(json!([
            {"model": "leon", "doors": 5},
            {"model": "ibiza", "doors": 3},
            {"model": "leon", "doors": 5},
            {"model": null, "doors": 3},
        ]))?)?;
        let param = ParamSpec::new("brush", &["model", "doors"]);
        let combinations = param_combinations(&table, &param)?;
        assert_eq!(combinations.len(), 2);
        assert_eq!(param_group_name(&param, &combinations[0]), "brush:model=ibiza;doors=3");
        assert_eq!(param_group_name(&param, &combinations[1]), "brush:model=leon;doors=5");

        let transforms = param_transforms(
            &[TransformSpec::Filter {
                filter: FilterSpec::Param {
                    param: "brush".to_string(),
                },
            }],
            &param,
            &combinations[0],
        );
        assert_eq!(
            transforms,
            vec![
                TransformSpec::Filter {
                    filter: FilterSpec::Predicate(FilterPredicate::new("model", FilterOp::Eq, "ibiza"))
                },
                TransformSpec::Filter {
                    filter: FilterSpec::Predicate(FilterPredicate::new("doors", FilterOp::Eq, "3"))
                },
            ]
        );
        Ok(())
    }
}
