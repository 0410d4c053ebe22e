//! Colors shared by the simulation and the renderer
//!
//! Colors are linear `[r, g, b, a]` floats in 0..1, the layout the vertex
//! buffer expects. Anything parsed from outside the game (settings, skins)
//! degrades to a fallback instead of failing.

use serde::{Deserialize, Serialize};

/// RGBA color, components in 0..1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub const BLACK: Rgba = Rgba([0.0, 0.0, 0.0, 1.0]);
    pub const WHITE: Rgba = Rgba([1.0, 1.0, 1.0, 1.0]);

    /// Default player car color (#00bfff)
    pub const DEFAULT_CAR: Rgba = Rgba([0.0, 191.0 / 255.0, 1.0, 1.0]);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a])
    }

    /// Build from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0])
    }

    /// Parse `#rrggbb` or `#rgb`, returning `None` for anything else
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?)),
            3 => {
                let short = |i: usize| {
                    let v = u8::from_str_radix(hex.get(i..i + 1)?, 16).ok()?;
                    Some(v * 17)
                };
                Some(Self::from_rgb8(short(0)?, short(1)?, short(2)?))
            }
            _ => None,
        }
    }

    /// Parse a hex color, falling back to `fallback` when malformed
    pub fn parse_or(s: &str, fallback: Rgba) -> Self {
        match Self::parse_hex(s) {
            Some(c) => c,
            None => {
                log::warn!("Invalid color {:?}, using fallback", s);
                fallback
            }
        }
    }

    /// HSL (hue in degrees, saturation/lightness 0..1) to RGB
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Self([r + m, g + m, b + m, 1.0])
    }

    /// Shift every channel by `amount` in 8-bit units, clamped
    pub fn shifted(self, amount: i16) -> Self {
        let delta = amount as f32 / 255.0;
        let [r, g, b, a] = self.0;
        Self([
            (r + delta).clamp(0.0, 1.0),
            (g + delta).clamp(0.0, 1.0),
            (b + delta).clamp(0.0, 1.0),
            a,
        ])
    }

    /// Same color with alpha multiplied by `alpha`
    pub fn faded(self, alpha: f32) -> Self {
        let [r, g, b, a] = self.0;
        Self([r, g, b, a * alpha.clamp(0.0, 1.0)])
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgba, b: Rgba) -> bool {
        a.0.iter().zip(b.0.iter()).all(|(x, y)| (x - y).abs() < 1e-3)
    }

    #[test]
    fn test_parse_hex() {
        assert!(close(Rgba::parse_hex("#00bfff").unwrap(), Rgba::DEFAULT_CAR));
        assert!(close(Rgba::parse_hex("#fff").unwrap(), Rgba::WHITE));
        assert!(Rgba::parse_hex("00bfff").is_none());
        assert!(Rgba::parse_hex("#zzzzzz").is_none());
        assert!(Rgba::parse_hex("#12345").is_none());
        assert!(Rgba::parse_hex("#ééé").is_none());
    }

    #[test]
    fn test_invalid_color_falls_back() {
        assert_eq!(Rgba::parse_or("banana", Rgba::DEFAULT_CAR), Rgba::DEFAULT_CAR);
        assert_eq!(Rgba::parse_or("", Rgba::BLACK), Rgba::BLACK);
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(Rgba::from_hsl(0.0, 1.0, 0.5), Rgba::new(1.0, 0.0, 0.0, 1.0)));
        assert!(close(Rgba::from_hsl(60.0, 1.0, 0.5), Rgba::new(1.0, 1.0, 0.0, 1.0)));
        assert!(close(Rgba::from_hsl(120.0, 1.0, 0.5), Rgba::new(0.0, 1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_shift_clamps() {
        let c = Rgba::from_rgb8(20, 128, 250).shifted(-30);
        assert!(close(c, Rgba::from_rgb8(0, 98, 220)));
        let c = Rgba::from_rgb8(250, 0, 0).shifted(30);
        assert_eq!(c.0[0], 1.0);
    }
}
