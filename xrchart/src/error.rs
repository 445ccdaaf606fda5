use arrow::error::ArrowError;
use datafusion::error::DataFusionError;
use thiserror::Error;
use xrchart_common::error::XrCommonError;
use xrchart_guides::error::XrGuidesError;
use xrchart_scales::error::XrScaleError;
use xrchart_scenegraph::error::XrSceneGraphError;

#[derive(Error, Debug)]
pub enum XrChartError {
    #[error("Internal error: `{0}`")]
    InternalError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid aggregate operation: `{op}`, expected one of: {expected}")]
    InvalidAggregateOp { op: String, expected: String },

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Data has no field `{0}`")]
    FieldNotFound(String),

    #[error("Data source not found: `{0}`")]
    SourceNotFound(String),

    #[error("Unsupported file type: `{0}`, expected csv or json")]
    UnsupportedFileType(String),

    #[error(
        "Encoding channel field(s) {fields:?} must be defined in aggregate groupby {groupby:?}, otherwise they would disappear from the aggregated data"
    )]
    GroupByDropsChannel {
        fields: Vec<String>,
        groupby: Vec<String>,
    },

    #[error("Common error: `{0}`")]
    CommonError(#[from] XrCommonError),

    #[error("SceneGraph error: `{0}`")]
    SceneGraphError(#[from] XrSceneGraphError),

    #[error("Scale error: `{0}`")]
    ScaleError(#[from] XrScaleError),

    #[error("Guides error: `{0}`")]
    GuidesError(#[from] XrGuidesError),

    #[error("DataFusion error: `{0}`")]
    DataFusionError(#[from] DataFusionError),

    #[error("Arrow error: `{0}`")]
    ArrowError(#[from] ArrowError),

    #[error("JSON error: `{0}`")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: `{0}`")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "reqwest")]
    #[error("Request error: `{0}`")]
    ReqwestError(#[from] reqwest::Error),
}

/// Coarse classification used by callers to decide how to report an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed specification
    Validation,
    /// Missing field, unreadable source, or data that cannot be laid out
    Data,
    /// Conflicting instructions that cannot be resolved either way
    Semantic,
    Internal,
}

impl XrChartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationError(_)
            | Self::InvalidAggregateOp { .. }
            | Self::CommonError(_)
            | Self::JsonError(_) => ErrorKind::Validation,
            Self::DataError(_)
            | Self::FieldNotFound(_)
            | Self::SourceNotFound(_)
            | Self::UnsupportedFileType(_)
            | Self::ScaleError(_)
            | Self::DataFusionError(_)
            | Self::ArrowError(_)
            | Self::IoError(_) => ErrorKind::Data,
            #[cfg(feature = "reqwest")]
            Self::ReqwestError(_) => ErrorKind::Data,
            Self::GroupByDropsChannel { .. } => ErrorKind::Semantic,
            Self::InternalError(_) | Self::SceneGraphError(_) | Self::GuidesError(_) => {
                ErrorKind::Internal
            }
        }
    }
}
