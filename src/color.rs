//! Color helpers for the hero engine and the editor's contrast readout.
//!
//! Luminance and contrast follow WCAG 2.x: each sRGB channel is linearized
//! with the piecewise gamma curve, weighted 0.2126 / 0.7152 / 0.0722, and the
//! contrast ratio is `(L_lighter + 0.05) / (L_darker + 0.05)`, ranging from
//! 1 (same color) to 21 (black on white).

use thiserror::Error;

pub const WHITE: &str = "#ffffff";
pub const BLACK: &str = "#000000";

/// WCAG AA threshold for normal-size text.
pub const AA_NORMAL_TEXT: f64 = 4.5;

#[derive(Error, Debug, PartialEq)]
pub enum ColorError {
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#rgb` or `#rrggbb` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Rgb, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Relative luminance in `0.0..=1.0`.
    pub fn relative_luminance(self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let c = f64::from(channel) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }
}

/// Contrast ratio between two colors, in `1.0..=21.0`. Order does not matter.
pub fn contrast_ratio(a: &str, b: &str) -> Result<f64, ColorError> {
    let la = Rgb::from_hex(a)?.relative_luminance();
    let lb = Rgb::from_hex(b)?.relative_luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    Ok((lighter + 0.05) / (darker + 0.05))
}

/// White or black, whichever reads better on `background`.
///
/// Unparseable backgrounds get white, matching the dark default hero.
pub fn best_text_color_bw(background: &str) -> &'static str {
    let Ok(bg) = Rgb::from_hex(background) else {
        return WHITE;
    };
    let l = bg.relative_luminance();
    let on_white = (1.0 + 0.05) / (l + 0.05);
    let on_black = (l + 0.05) / 0.05;
    if on_black > on_white { BLACK } else { WHITE }
}

/// CSS `rgba()` for `hex` at `opacity_percent` (clamped to 0–100).
///
/// Falls back to the input string when it is not a hex color, so named
/// colors and existing `rgba()` values pass through.
pub fn to_rgba(hex: &str, opacity_percent: f64) -> String {
    match Rgb::from_hex(hex) {
        Ok(Rgb { r, g, b }) => {
            let alpha = if opacity_percent.is_finite() {
                opacity_percent.clamp(0.0, 100.0) / 100.0
            } else {
                1.0
            };
            format!("rgba({r}, {g}, {b}, {})", format_alpha(alpha))
        }
        Err(_) => hex.trim().to_string(),
    }
}

fn format_alpha(alpha: f64) -> String {
    let rounded = (alpha * 100.0).round() / 100.0;
    let s = format!("{rounded:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
