// THEORY:
// `Color` is the output currency of the heatmap: fill colors come from the
// density ramp, stroke and label colors from fixed palettes. The ramp
// interpolates in floating point, so channels are kept as `f64` until a
// consumer asks for bytes or CSS.
//
// Every constructor clamps: channels to [0, 255] and alpha to [0, 1]. A
// drawing surface downstream never sees an out-of-range value, whatever
// rounding drift happened while interpolating.

pub type Channel = f64;
pub type Alpha = f64;

/// An RGBA color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// The red channel intensity (0.0-255.0).
    pub red: Channel,
    /// The green channel intensity (0.0-255.0).
    pub green: Channel,
    /// The blue channel intensity (0.0-255.0).
    pub blue: Channel,
    /// The opacity (0.0-1.0).
    pub alpha: Alpha,
}

impl Color {
    pub const WHITE: Color = Color::rgb8(0xff, 0xff, 0xff);
    pub const TRANSPARENT: Color = Color {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 0.0,
    };

    /// Builds a color, clamping every component into range. NaN collapses to 0.
    pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Alpha) -> Self {
        Self {
            red: clamp_component(red, 255.0),
            green: clamp_component(green, 255.0),
            blue: clamp_component(blue, 255.0),
            alpha: clamp_component(alpha, 1.0),
        }
    }

    /// An opaque color from byte channels.
    pub const fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f64,
            green: green as f64,
            blue: blue as f64,
            alpha: 1.0,
        }
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Rounds the color to RGBA bytes, alpha scaled to 0-255.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            self.red.round() as u8,
            self.green.round() as u8,
            self.blue.round() as u8,
            (self.alpha * 255.0).round() as u8,
        ]
    }

    /// CSS `rgba()` notation with integral channels and alpha rounded to
    /// three decimals, e.g. `rgba(177, 172, 158, 0.62)`.
    pub fn to_css(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        let alpha = (self.alpha * 1000.0).round() / 1000.0;
        format!("rgba({r}, {g}, {b}, {alpha})")
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn to_hex(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

fn clamp_component(value: f64, max: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, max) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_out_of_range_components() {
        let color = Color::new(-3.0, 255.000_000_1, 300.0, 1.2);
        assert_eq!(color.red, 0.0);
        assert_eq!(color.green, 255.0);
        assert_eq!(color.blue, 255.0);
        assert_eq!(color.alpha, 1.0);
    }

    #[test]
    fn nan_components_collapse_to_zero() {
        let color = Color::new(f64::NAN, 10.0, 10.0, f64::NAN);
        assert_eq!(color.red, 0.0);
        assert_eq!(color.alpha, 0.0);
    }

    #[test]
    fn hex_round_trips_through_bytes() {
        let amber = Color::from_hex("#f59e0b").unwrap();
        assert_eq!(amber.to_rgba8(), [0xf5, 0x9e, 0x0b, 255]);
        assert_eq!(amber.to_hex(), "#f59e0b");
        assert_eq!(Color::from_hex("3b82f6"), Some(Color::rgb8(0x3b, 0x82, 0xf6)));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(Color::from_hex("#fff").is_none());
        assert!(Color::from_hex("#gg0000").is_none());
        assert!(Color::from_hex("#ééé").is_none());
    }

    #[test]
    fn css_rounds_channels_and_alpha() {
        let color = Color::new(176.6, 172.000_000_000_03, 158.4, 0.620_000_000_000_1);
        assert_eq!(color.to_css(), "rgba(177, 172, 158, 0.62)");
        assert_eq!(Color::WHITE.to_css(), "rgba(255, 255, 255, 1)");
    }
}
