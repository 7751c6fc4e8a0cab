pub mod gerstner;
pub mod seascape;
pub mod sun;

pub use gerstner::{GerstnerWaves, WaveLayer, WaveUniform};
pub use seascape::SeascapeCamera;
pub use sun::Sun;
