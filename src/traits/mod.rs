mod ocean_scene;

pub use ocean_scene::OceanScene;
