use std::fmt::{Display, Formatter};
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::XrCommonError;
use crate::format::format_number;

/// A point or rotation in chart-local 3D space.
///
/// The textual form is `"x y z"`: exactly three numbers separated by any amount
/// of whitespace. This is the form used for `position` and `rotation` in chart
/// specifications and for every coordinate attribute in the generated scene.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Parse a triple, naming the parameter in the error message
    pub fn parse_named(value: &str, name: &str) -> Result<Self, XrCommonError> {
        let invalid = || XrCommonError::InvalidTriple {
            name: name.to_string(),
            value: value.to_string(),
        };
        let parts = value
            .split_whitespace()
            .map(|part| part.parse::<f64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        match parts.as_slice() {
            [x, y, z] if x.is_finite() && y.is_finite() && z.is_finite() => {
                Ok(Self::new(*x, *y, *z))
            }
            _ => Err(invalid()),
        }
    }
}

impl FromStr for Vec3 {
    type Err = XrCommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_named(s, "triple")
    }
}

impl Display for Vec3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            format_number(self.x),
            format_number(self.y),
            format_number(self.z)
        )
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(value: [f64; 3]) -> Self {
        Vec3::new(value[0], value[1], value[2])
    }
}

impl Serialize for Vec3 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Vec3 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Vec3::from_str(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    #[case("0 0 0", Vec3::ZERO)]
    #[case("1 -2.5 3", Vec3::new(1.0, -2.5, 3.0))]
    #[case("  1\t2   3 ", Vec3::new(1.0, 2.0, 3.0))]
    fn test_parse_valid(#[case] input: &str, #[case] expected: Vec3) {
        assert_eq!(Vec3::from_str(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("1 2")]
    #[case("1 2 3 4")]
    #[case("a b c")]
    #[case("1,2,3")]
    #[case("1 2 NaN")]
    fn test_parse_invalid(#[case] input: &str) {
        let err = Vec3::parse_named(input, "position").unwrap_err();
        assert!(err.to_string().contains("position"));
    }

    #[test]
    fn test_display_trims_precision() {
        let v = Vec3::new(1.0, 0.123_456, -0.0);
        assert_eq!(v.to_string(), "1 0.1235 0");
    }

    #[test]
    fn test_add() {
        let v = Vec3::new(1.0, 2.0, 3.0) + Vec3::new(-1.0, 0.5, 0.0);
        assert_eq!(v, Vec3::new(0.0, 2.5, 3.0));

        let v = Vec3::new(0.1, 0.0, -90.0) + Vec3::new(0.2, 45.0, 0.0);
        assert_approx_eq!(f64, v.x, 0.3);
        assert_approx_eq!(f64, v.y, 45.0);
        assert_approx_eq!(f64, v.z, -90.0);
    }
}
