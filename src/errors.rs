//! Error Types
//!
//! The main error type [`UmbraError`] covers the failure modes of the scene
//! component: pipeline/shader validation failures at first initialization and
//! texture decoding failures during member synchronization.
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, UmbraError>`.

use thiserror::Error;

/// The main error type for the umbra scene component.
#[derive(Error, Debug)]
pub enum UmbraError {
    // ========================================================================
    // GPU & Rendering Errors
    // ========================================================================
    /// Shader compilation or pipeline validation failed.
    ///
    /// Raised at most once, from the first synchronize callback that builds
    /// the shared pipeline state. There is no fallback pipeline.
    #[error("Pipeline creation failed: {0}")]
    PipelineCreation(String),

    // ========================================================================
    // Image & Texture Errors
    // ========================================================================
    /// Image decoding error, including an unreadable source file.
    /// Recoverable: the member keeps its previous texture bound and
    /// continues rendering.
    #[error("Image decode error: {0}")]
    ImageDecode(String),
}

impl From<image::ImageError> for UmbraError {
    fn from(err: image::ImageError) -> Self {
        UmbraError::ImageDecode(err.to_string())
    }
}

/// Alias for `Result<T, UmbraError>`.
pub type Result<T> = std::result::Result<T, UmbraError>;
