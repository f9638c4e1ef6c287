//! Error types for the yolk_scan library

use thiserror::Error;

/// Result type alias for yolk_scan operations
pub type Result<T> = std::result::Result<T, ClassificationError>;

/// Error kinds raised while grading a yolk color
#[derive(Error, Debug)]
pub enum ClassificationError {
    /// Point-sample coordinates fall outside the image
    #[error("Point ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// Segmentation found no candidate region
    #[error("No yolk region detected in image")]
    NoRegionDetected,

    /// Calibration data or thresholds are unusable
    #[error("Invalid configuration: {parameter} ({reason})")]
    InvalidConfiguration { parameter: String, reason: String },

    /// Mask and image sizes differ
    #[error("Mask is {mask_width}x{mask_height} but image is {width}x{height}")]
    DimensionMismatch {
        mask_width: u32,
        mask_height: u32,
        width: u32,
        height: u32,
    },

    /// Image file could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration file could not be read, written or parsed
    #[error("Configuration file error: {message}")]
    ConfigIoError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ClassificationError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration file error with context
    pub fn config_io<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigIoError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error indicates a recoverable, per-call condition
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ClassificationError::OutOfBounds { .. } | ClassificationError::NoRegionDetected
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            ClassificationError::OutOfBounds { width, height, .. } => {
                format!(
                    "The selected point is outside the image. Please pick a point within {}x{}.",
                    width, height
                )
            }
            ClassificationError::NoRegionDetected => {
                "No yolk region was found. Please try another photo or frame.".to_string()
            }
            ClassificationError::InvalidConfiguration { parameter, .. } => {
                format!("The calibration setting '{}' is invalid.", parameter)
            }
            ClassificationError::DimensionMismatch { .. } => {
                "Internal detection error. Please try again.".to_string()
            }
            ClassificationError::ImageLoadError { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            ClassificationError::ConfigIoError { .. } => {
                "Could not read the configuration file.".to_string()
            }
        }
    }
}
