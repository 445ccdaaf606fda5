use std::fmt::{Display, Formatter};

use ordered_float::OrderedFloat;
use xrchart_common::format::format_number;

/// A discrete domain value.
///
/// The derived ordering sorts numbers numerically, then strings
/// lexicographically, then nulls. Nominal slots, colors and labels all follow
/// this order so that repeated renders are identical.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryValue {
    Number(OrderedFloat<f64>),
    Text(String),
    Null,
}

impl CategoryValue {
    pub fn number(value: f64) -> Self {
        CategoryValue::Number(OrderedFloat(value))
    }

    pub fn text(value: &str) -> Self {
        CategoryValue::Text(value.to_string())
    }
}

impl Display for CategoryValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryValue::Number(v) => write!(f, "{}", format_number(v.0)),
            CategoryValue::Text(v) => write!(f, "{v}"),
            CategoryValue::Null => write!(f, "?"),
        }
    }
}

/// Sorted distinct values
pub fn unique_sorted<'a>(values: impl IntoIterator<Item = &'a CategoryValue>) -> Vec<CategoryValue> {
    let mut domain: Vec<CategoryValue> = values.into_iter().cloned().collect();
    domain.sort();
    domain.dedup();
    domain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let values = vec![
            CategoryValue::Null,
            CategoryValue::text("b"),
            CategoryValue::number(10.0),
            CategoryValue::text("a"),
            CategoryValue::number(2.0),
            CategoryValue::text("b"),
        ];
        let domain = unique_sorted(&values);
        assert_eq!(
            domain,
            vec![
                CategoryValue::number(2.0),
                CategoryValue::number(10.0),
                CategoryValue::text("a"),
                CategoryValue::text("b"),
                CategoryValue::Null,
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CategoryValue::number(4.0).to_string(), "4");
        assert_eq!(CategoryValue::number(2.5).to_string(), "2.5");
        assert_eq!(CategoryValue::text("sedan").to_string(), "sedan");
        assert_eq!(CategoryValue::Null.to_string(), "?");
    }
}
