use thiserror::Error;
use xrchart_scales::error::XrScaleError;

#[derive(Error, Debug)]
pub enum XrGuidesError {
    #[error("Axis has {positions} label positions but {values} label values")]
    LabelLengthMismatch { positions: usize, values: usize },

    #[error("Invalid scale: {0}")]
    InvalidScale(#[from] XrScaleError),
}
