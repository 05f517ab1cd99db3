//! Error types for carousel construction.

/// Errors raised while building a [`Carousel`](crate::Carousel).
///
/// Runtime operations never fail; they degrade to no-ops instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CarouselError {
    /// A configuration value is out of range
    #[error("invalid carousel config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Viewport measurements are not usable
    #[error("invalid viewport: width={width}, container_width={container_width}")]
    InvalidViewport { width: f32, container_width: f32 },
}
