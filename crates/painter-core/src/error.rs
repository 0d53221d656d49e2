use thiserror::Error;

/// Initialization failures. Any of these means no controller was built
/// and no listener was attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("surface not found: no element with id `{id}`")]
    SurfaceNotFound { id: String },

    #[error("wrong element type: `{id}` is a <{tag}>, not a <canvas>")]
    WrongElementType { id: String, tag: String },

    #[error("surface `{id}` has no 2d rendering context")]
    ContextUnavailable { id: String },

    #[error("invalid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A pencil control delivered a value the painter refuses to apply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PencilError {
    #[error("pencil size `{0}` is not a positive number")]
    InvalidSize(String),

    #[error("pencil opacity `{0}` is not a number in [0, 1]")]
    InvalidOpacity(String),
}

#[derive(Debug, Error)]
pub enum PainterError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("image export failed: {0}")]
    Export(#[from] image::ImageError),
}

pub type Result<T, E = PainterError> = std::result::Result<T, E>;
