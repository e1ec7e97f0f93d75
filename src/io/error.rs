use std::path::PathBuf;

/// Errors raised while reading resources at startup or writing the output
/// image. Nothing in the per-frame path returns these.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("file not found: '{0}'")]
    NotFound(PathBuf),

    #[error("failed to read '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse OBJ '{0}': {1}")]
    Obj(PathBuf, #[source] tobj::LoadError),

    #[error("failed to decode image '{0}': {1}")]
    Image(PathBuf, #[source] image::ImageError),

    #[error("failed to parse config '{0}': {1}")]
    Config(PathBuf, #[source] toml::de::Error),

    #[error("failed to write image '{0}': {1}")]
    Save(PathBuf, #[source] image::ImageError),

    #[error("malformed mesh: {0}")]
    MalformedMesh(String),
}
