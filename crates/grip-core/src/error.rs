use thiserror::Error;

/// Why a canvas transform could not be turned into a `CanvasTransform`.
///
/// Only the parsing entry points return this; `resolve::resolve` swallows it
/// and falls back to the identity transform.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("malformed transform {input:?}: {message}")]
    Syntax { input: String, message: String },

    #[error("unsupported transform function `{0}`")]
    UnknownFunction(String),

    #[error("`{function}` takes {expected} argument(s), found {found}")]
    Arity {
        function: String,
        expected: &'static str,
        found: usize,
    },

    #[error("transform is not invertible (scale = {scale})")]
    Degenerate { scale: f64 },
}
