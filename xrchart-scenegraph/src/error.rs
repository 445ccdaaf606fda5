use thiserror::Error;

#[derive(Error, Debug)]
pub enum XrSceneGraphError {
    #[error("Internal error: `{0}`")]
    InternalError(String),

    #[error("Mark `{mark}` has {len} instances but attribute `{attribute}` has a different length")]
    AttributeLengthMismatch {
        mark: String,
        attribute: String,
        len: usize,
    },
}
