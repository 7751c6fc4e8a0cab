/// Convert one sRGB-encoded channel to linear light.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Decode a `0xRRGGBB` sRGB color into linear RGB.
pub fn hex_to_linear_rgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_srgb_midpoint_is_darker() {
        let mid = srgb_to_linear(0.5);
        assert!(mid > 0.2 && mid < 0.22);
    }

    #[test]
    fn test_hex_white_and_black() {
        let white = hex_to_linear_rgb(0xffffff);
        for c in white {
            assert!((c - 1.0).abs() < 1e-6);
        }
        assert_eq!(hex_to_linear_rgb(0x000000), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_hex_channel_order() {
        let water = hex_to_linear_rgb(0x001e0f);
        assert_eq!(water[0], 0.0);
        assert!(water[1] > water[2]);
        assert!(water[1] < 0.02);
    }
}
