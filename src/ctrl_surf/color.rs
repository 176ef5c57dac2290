//! 24-bit `0xRRGGBB` colors and their 7-bit device representation.

pub type Color = u32;

pub fn rgb_to_int(red: u32, green: u32, blue: u32) -> Color {
    ((red & 0xff) << 16) | ((green & 0xff) << 8) | (blue & 0xff)
}

pub fn int_to_rgb(color: Color) -> (u32, u32, u32) {
    ((color >> 16) & 0xff, (color >> 8) & 0xff, color & 0xff)
}

/// Compresses an 8-bit channel to the device's 7 bits.
pub fn to_7bit(value: u32) -> u32 {
    (value & 0xff) * 127 / 255
}

pub fn to_7bit_color(color: Color) -> Color {
    let (r, g, b) = int_to_rgb(color);
    rgb_to_int(to_7bit(r), to_7bit(g), to_7bit(b))
}

/// Channels ready to be sent to the device.
pub fn to_7bit_channels(color: Color) -> [u8; 3] {
    let (r, g, b) = int_to_rgb(to_7bit_color(color));
    [r as u8, g as u8, b as u8]
}

/// Keeps the hue of `color` with the given saturation and value.
pub fn map_to_closest_hue(color: Color, sat: f64, val: f64) -> Color {
    let (hue, _, _) = rgb_to_hsv(color);
    let (r, g, b) = hsv_to_rgb(hue, sat.clamp(0.0, 1.0), val.clamp(0.0, 1.0));

    rgb_to_int(
        (255.0 * r) as u32,
        (255.0 * g) as u32,
        (255.0 * b) as u32,
    )
}

/// Dim variant used for idle indications.
pub fn faded_color(color: Color) -> Color {
    map_to_closest_hue(color, 1.0, 0.02)
}

/// Bright variant used for active indications.
pub fn full_color(color: Color) -> Color {
    map_to_closest_hue(color, 1.0, 0.2)
}

/// Returns `(hue, saturation, value)`, hue in `[0, 1)`.
pub fn rgb_to_hsv(color: Color) -> (f64, f64, f64) {
    let (r, g, b) = int_to_rgb(color);
    let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let sat = if max > 0.0 { delta / max } else { 0.0 };

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };

    (hue, sat, max)
}

/// Returns `(r, g, b)` in `[0, 1]`.
pub fn hsv_to_rgb(hue: f64, sat: f64, val: f64) -> (f64, f64, f64) {
    let sector = (hue * 6.0).rem_euclid(6.0);
    let idx = sector.floor();
    let frac = sector - idx;

    let p = val * (1.0 - sat);
    let q = val * (1.0 - sat * frac);
    let t = val * (1.0 - sat * (1.0 - frac));

    match idx as u8 {
        0 => (val, t, p),
        1 => (q, val, p),
        2 => (p, val, t),
        3 => (p, q, val),
        4 => (t, p, val),
        _ => (val, p, q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn int_rgb_round_trip(color in 0u32..=0xff_ffff) {
            let (r, g, b) = int_to_rgb(color);
            prop_assert_eq!(rgb_to_int(r, g, b), color);
        }

        #[test]
        fn channels_fit_7_bits(color in any::<u32>()) {
            for channel in to_7bit_channels(color) {
                prop_assert!(channel <= 0x7f);
            }
        }
    }

    #[test]
    fn out_of_range_channels_are_masked() {
        assert_eq!(rgb_to_int(0x1ff, 0x100, 0x2ab), 0xff00ab);
        assert_eq!(int_to_rgb(0xff12_3456), (0x12, 0x34, 0x56));
    }

    #[test]
    fn compress_to_7bit() {
        assert_eq!(to_7bit(255), 127);
        assert_eq!(to_7bit(128), 63);
        assert_eq!(to_7bit(0), 0);
        assert_eq!(to_7bit_color(0xff8000), 0x7f3f00);
        assert_eq!(to_7bit_channels(0x00ff02), [0, 127, 0]);
    }

    #[test]
    fn hsv() {
        let (h, s, v) = rgb_to_hsv(0x0000ff);
        assert!((h - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!((s, v), (1.0, 1.0));

        assert_eq!(rgb_to_hsv(0x808080).1, 0.0);
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (1.0, 0.0, 0.0));
    }

    #[test]
    fn faded_and_full_keep_hue() {
        assert_eq!(full_color(0xff0000), 0x330000);
        assert_eq!(faded_color(0xff0000), 0x050000);
        assert_eq!(full_color(0x800000), 0x330000);

        let (r, g, b) = int_to_rgb(full_color(0x0000ff));
        assert_eq!((r, g), (0, 0));
        assert_eq!(b, 51);
    }
}
