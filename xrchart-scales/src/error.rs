#[derive(Debug, PartialEq, thiserror::Error)]
pub enum XrScaleError {
    #[error("Empty domain")]
    EmptyDomain,

    #[error("Empty range")]
    EmptyRange,

    #[error("Domain value not found: {0}")]
    DomainValueNotFound(String),

    #[error("Scale extent must be a positive finite number, got {0}")]
    InvalidExtent(f64),

    #[error("Domain contains a non-finite value: {0}")]
    NonFiniteValue(f64),
}
