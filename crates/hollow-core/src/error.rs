use crate::scene::{NodeId, TextureId};
use thiserror::Error;

/// Failures raised while constructing the scene. Any of these aborts the
/// experience before the first frame is drawn.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("texture canvas must be non-empty (got {width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("texture canvas {width}x{height} exceeds the {max}px limit")]
    CanvasTooLarge { width: u32, height: u32, max: u32 },
    #[error("parent node {0:?} does not exist")]
    UnknownParent(NodeId),
    #[error("material references missing texture {0:?}")]
    MissingTexture(TextureId),
}
