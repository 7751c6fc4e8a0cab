mod color;
mod noise;

pub use color::{hex_to_linear_rgb, srgb_to_linear};
pub use noise::{fbm, hash, next_octave, value_noise, OCTAVE_ROTATION};
