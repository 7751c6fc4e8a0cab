pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod geometry;
pub mod math;
pub mod ocean;
pub mod render;
pub mod scenes;
pub mod shader;
pub mod traits;

pub use cli::{Cli, SceneKind};
pub use config::Settings;
pub use scenes::create_scene;
