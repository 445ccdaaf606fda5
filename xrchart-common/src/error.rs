use thiserror::Error;

#[derive(Error, Debug)]
pub enum XrCommonError {
    #[error("Invalid {name}: `{value}`, expected three numbers separated by whitespace")]
    InvalidTriple { name: String, value: String },

    #[error("Invalid color `{0}`: {1}")]
    InvalidColor(String, csscolorparser::ParseColorError),

    #[error("Color palette must contain at least one color")]
    EmptyPalette,
}
