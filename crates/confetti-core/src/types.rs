//! Drawing and screen types

use crate::error::{ConfettiError, Result};
use serde::{Deserialize, Serialize};

/// RGBA color, components in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse a CSS hex color: `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional)
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || ConfettiError::InvalidColor(s.to_string());
        let digits = s.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

        match digits.len() {
            3 => {
                let v = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                // Expand each nibble: 0xabc -> 0xaabbcc
                let (r, g, b) = ((v >> 8) & 0xF, (v >> 4) & 0xF, v & 0xF);
                Ok(Self::from_hex((r * 17) << 16 | (g * 17) << 8 | (b * 17)))
            }
            6 => {
                let v = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                Ok(Self::from_hex(v))
            }
            8 => Ok(Self {
                r: channel(0)? as f32 / 255.0,
                g: channel(2)? as f32 / 255.0,
                b: channel(4)? as f32 / 255.0,
                a: channel(6)? as f32 / 255.0,
            }),
            _ => Err(invalid()),
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// `#rrggbb` (alpha dropped when opaque)
    pub fn to_hex_string(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Visible viewport in CSS pixels plus device pixel density
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    pub fn center(&self) -> [f32; 2] {
        [self.width / 2.0, self.height / 2.0]
    }

    /// Density used for backing-store scaling; non-positive ratios count as 1
    pub fn pixel_ratio(&self) -> f32 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        }
    }

    /// Backing-store size in device pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpr = self.pixel_ratio();
        (
            (self.width.max(0.0) * dpr).round() as u32,
            (self.height.max(0.0) * dpr).round() as u32,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex(0xFF8844);
        assert!((c.r - 1.0).abs() < 0.01);
        assert!((c.g - 0.533).abs() < 0.01);
        assert!((c.b - 0.267).abs() < 0.01);
    }

    #[test]
    fn test_color_parse_forms() {
        assert_eq!(Color::parse("#ff0000").unwrap(), Color::from_hex(0xFF0000));
        assert_eq!(Color::parse("0f0").unwrap(), Color::from_hex(0x00FF00));
        let c = Color::parse("#0000ff80").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert!(Color::parse("#ff00").is_err());
        assert!(Color::parse("#gg0000").is_err());
        assert!(Color::parse("").is_err());
    }

    #[test]
    fn test_color_hex_string() {
        assert_eq!(Color::from_hex(0x1A2B3C).to_hex_string(), "#1a2b3c");
        assert_eq!(Color::new(1.0, 0.0, 0.0, 0.0).to_hex_string(), "#ff000000");
    }

    #[test]
    fn test_viewport_pixel_size() {
        let vp = Viewport::new(800.0, 600.0, 2.0);
        assert_eq!(vp.pixel_size(), (1600, 1200));
        assert_eq!(vp.center(), [400.0, 300.0]);

        let odd = Viewport::new(100.0, 50.0, 0.0);
        assert_eq!(odd.pixel_ratio(), 1.0);
        assert_eq!(odd.pixel_size(), (100, 50));
    }
}
