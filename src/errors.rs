//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`MantleError`] covers all reported failure modes:
//! - Asset loading failures (model or default texture)
//! - Decoding failures of user-uploaded images
//! - Malformed commands and colors on the command surface
//! - Settings parse errors
//!
//! Degenerate geometry (flat bounding axes, zero radius) is never an error:
//! the projection engine guards those cases internally.
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for `std::result::Result<T, MantleError>`.
//!
//! ```rust,ignore
//! use mantle::errors::{MantleError, Result};
//!
//! fn upload(bytes: &[u8]) -> Result<()> {
//!     let _image = mantle::assets::decode_image(bytes)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the crate.
///
/// None of these are fatal: every transition that fails leaves the previous
/// state untouched and reports the error to the caller.
#[derive(Error, Debug)]
pub enum MantleError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// A mesh or default-texture asset could not be fetched or decoded.
    #[error("Failed to load asset '{path}': {reason}")]
    AssetLoadFailure {
        /// Path or URI of the asset
        path: String,
        /// Human readable cause
        reason: String,
    },

    /// A loaded model contained no usable mesh parts.
    #[error("Model '{0}' contains no mesh primitives")]
    EmptyModel(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // Image & Texture Errors
    // ========================================================================
    /// User-provided image bytes are not a decodable image.
    #[error("Upload decode error: {0}")]
    UploadDecodeFailure(String),

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// glTF parsing or loading error.
    #[cfg(feature = "gltf")]
    #[error("glTF error: {0}")]
    GltfError(String),

    /// Data URI parsing error.
    #[cfg(feature = "gltf")]
    #[error("Data URI error: {0}")]
    DataUriError(String),

    /// JSON parsing error (settings files).
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ========================================================================
    // Command Surface Errors
    // ========================================================================
    /// A command line could not be parsed.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// A brush color string could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    // ========================================================================
    // Async & Threading Errors
    // ========================================================================
    /// Task join error (when async tasks fail to complete).
    #[error("Task join error: {0}")]
    TaskJoinError(String),
}

impl MantleError {
    /// Wraps any displayable cause into an [`MantleError::AssetLoadFailure`].
    pub fn asset_load(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        MantleError::AssetLoadFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

// ============================================================================
// Convenient conversion implementations
// ============================================================================

impl From<image::ImageError> for MantleError {
    fn from(err: image::ImageError) -> Self {
        MantleError::UploadDecodeFailure(err.to_string())
    }
}

#[cfg(feature = "gltf")]
impl From<gltf::Error> for MantleError {
    fn from(err: gltf::Error) -> Self {
        MantleError::GltfError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for MantleError {
    fn from(err: tokio::task::JoinError) -> Self {
        MantleError::TaskJoinError(err.to_string())
    }
}

/// Alias for `Result<T, MantleError>`.
pub type Result<T> = std::result::Result<T, MantleError>;
