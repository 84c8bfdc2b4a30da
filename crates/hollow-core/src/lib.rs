pub mod audio;
pub mod camera;
pub mod constants;
pub mod door;
pub mod error;
pub mod eyes;
pub mod house;
pub mod input;
pub mod launch;
pub mod mesh;
pub mod scene;
pub mod session;
pub mod texture;
pub mod world;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use audio::{proximity_volume, AudioCue, Track};
pub use camera::FirstPersonCamera;
pub use constants::SessionConfig;
pub use door::{DoorController, DoorTransition};
pub use error::SceneError;
pub use input::{InputState, Key};
pub use launch::{CancellationToken, LaunchSequence, LaunchStep};
pub use scene::{Material, Mesh, Node, NodeId, Scene, TextureId, Transform};
pub use session::Session;
pub use texture::PixelCanvas;
pub use world::World;
