/// Convenience result type used across pixblit.
pub type BlitResult<T> = Result<T, BlitError>;

/// Top-level error taxonomy used by the image and asset APIs.
///
/// Drawing itself never fails: [`crate::draw_image`] folds every variant into a
/// [`crate::DrawStatus::Skipped`] so a bad image cannot abort a render pass.
#[derive(thiserror::Error, Debug)]
pub enum BlitError {
    /// Header `format` field outside the defined color formats.
    #[error("unknown color format code {0}")]
    UnknownFormat(u8),

    /// The source reference could not be mapped to an image.
    #[error("unresolved image source: {0}")]
    UnresolvedSource(String),

    /// Image area and clip do not overlap.
    #[error("empty draw region")]
    EmptyRegion,

    /// Header is valid but the payload does not match it.
    #[error("malformed image: {0}")]
    MalformedImage(String),

    /// Invalid caller-provided data (buffers, dimensions, scene values).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlitError {
    /// Build a [`BlitError::UnresolvedSource`] value.
    pub fn unresolved(msg: impl Into<String>) -> Self {
        Self::UnresolvedSource(msg.into())
    }

    /// Build a [`BlitError::MalformedImage`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedImage(msg.into())
    }

    /// Build a [`BlitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
