//! The Color Assigner
//!
//! Evenly spaced hues in HUSL space (a human-friendly remap of CIE LCh(uv)),
//! so that every pitch type gets a color of the same perceived lightness and
//! saturation.
//!
//! Conversion chain: HUSL → LCh(uv) → Luv → XYZ (D65) → linear sRGB → sRGB.

use nalgebra::{Matrix3, Vector3};
use serde::{Serialize, Serializer};
use std::f64::consts::PI;

// =============================================================================
// COLOR TYPE
// =============================================================================

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const GRASS: Rgb = Rgb::new(0, 128, 0);
    pub const MOUND: Rgb = Rgb::new(165, 42, 42);
    pub const CLAY: Rgb = Rgb::new(205, 133, 63);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS notation, e.g. `rgb(247, 112, 136)`.
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// RGBA with the given alpha.
    pub fn with_alpha(&self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }

    fn from_unit(rgb: Vector3<f64>) -> Self {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(channel(rgb.x), channel(rgb.y), channel(rgb.z))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.css())
    }
}

// =============================================================================
// PALETTE
// =============================================================================

/// Hue offset of the first color, as a fraction of the circle
const HUE_OFFSET: f64 = 0.01;
const SATURATION: f64 = 0.9 * 99.0;
const LIGHTNESS: f64 = 0.65 * 99.0;

/// Returns `k` evenly spaced HUSL colors.
///
/// Color `i` depends only on `i` and `k`.
pub fn husl_palette(k: usize) -> Vec<Rgb> {
    (0..k)
        .map(|i| {
            let hue = ((i as f64 / k as f64 + HUE_OFFSET) % 1.0) * 359.0;
            husl_to_rgb(hue, SATURATION, LIGHTNESS)
        })
        .collect()
}

/// Pairs each label with its palette color, preserving order.
pub fn assign_colors<'a, I>(labels: I) -> Vec<(&'a str, Rgb)>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: ExactSizeIterator,
{
    let labels = labels.into_iter();
    let palette = husl_palette(labels.len());
    labels.zip(palette).collect()
}

// =============================================================================
// HUSL CONVERSION
// =============================================================================

/// XYZ → linear sRGB
const M: [[f64; 3]; 3] = [
    [3.2406, -1.5372, -0.4986],
    [-0.9689, 1.8758, 0.0415],
    [0.0557, -0.2040, 1.0570],
];

const REF_Y: f64 = 1.0;
const REF_U: f64 = 0.19784;
const REF_V: f64 = 0.46834;
const LAB_E: f64 = 0.008856;
const LAB_K: f64 = 903.3;

/// Converts HUSL (`h` in degrees, `s` and `l` in `[0, 100]`) to sRGB.
pub fn husl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let (l, c, h) = husl_to_lch(h, s, l);
    let luv = lch_to_luv(l, c, h);
    let xyz = luv_to_xyz(luv);
    Rgb::from_unit(xyz_to_rgb(xyz))
}

fn husl_to_lch(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if l > 99.9999999 {
        return (100.0, 0.0, h);
    }
    if l < 0.00000001 {
        return (0.0, 0.0, h);
    }
    let c = max_chroma(l, h) / 100.0 * s;
    (l, c, h)
}

/// Largest chroma at lightness `l` and hue `h` that stays inside sRGB.
fn max_chroma(l: f64, h: f64) -> f64 {
    let hrad = h / 360.0 * 2.0 * PI;
    let (sin_h, cos_h) = hrad.sin_cos();

    let sub1 = (l + 16.0).powi(3) / 1_560_896.0;
    let sub2 = if sub1 > LAB_E { sub1 } else { l / LAB_K };

    let mut result = f64::INFINITY;
    for [m1, m2, m3] in M {
        let top = (0.99915 * m1 + 1.05122 * m2 + 1.14460 * m3) * sub2;
        let rbottom = 0.86330 * m3 - 0.17266 * m2;
        let lbottom = 0.12949 * m3 - 0.38848 * m1;
        let bottom = (rbottom * sin_h + lbottom * cos_h) * sub2;

        for t in [0.0, 1.0] {
            let c = l * (top - 1.05122 * t) / (bottom + 0.17266 * sin_h * t);
            if c > 0.0 && c < result {
                result = c;
            }
        }
    }
    result
}

fn lch_to_luv(l: f64, c: f64, h: f64) -> Vector3<f64> {
    let hrad = h.to_radians();
    Vector3::new(l, hrad.cos() * c, hrad.sin() * c)
}

fn luv_to_xyz(luv: Vector3<f64>) -> Vector3<f64> {
    let (l, u, v) = (luv.x, luv.y, luv.z);
    if l == 0.0 {
        return Vector3::zeros();
    }

    let var_y = f_inv((l + 16.0) / 116.0);
    let var_u = u / (13.0 * l) + REF_U;
    let var_v = v / (13.0 * l) + REF_V;

    let y = var_y * REF_Y;
    let x = -(9.0 * y * var_u) / ((var_u - 4.0) * var_v - var_u * var_v);
    let z = (9.0 * y - 15.0 * var_v * y - var_v * x) / (3.0 * var_v);
    Vector3::new(x, y, z)
}

fn f_inv(t: f64) -> f64 {
    let cubed = t.powi(3);
    if cubed > LAB_E {
        cubed
    } else {
        (116.0 * t - 16.0) / LAB_K
    }
}

fn xyz_to_rgb(xyz: Vector3<f64>) -> Vector3<f64> {
    let m = Matrix3::from_row_slice(&M.concat());
    (m * xyz).map(from_linear)
}

/// sRGB gamma encoding.
fn from_linear(c: f64) -> f64 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dominant(c: Rgb) -> char {
        if c.r >= c.g && c.r >= c.b {
            'r'
        } else if c.g >= c.b {
            'g'
        } else {
            'b'
        }
    }

    #[test]
    fn test_three_colors_cover_the_wheel() {
        let palette = husl_palette(3);
        assert_eq!(palette.len(), 3);

        // hues 3.59°, 123.26°, 242.93°
        assert_eq!(dominant(palette[0]), 'r');
        assert_eq!(dominant(palette[1]), 'g');
        assert_eq!(dominant(palette[2]), 'b');
    }

    #[test]
    fn test_colors_distinct() {
        let palette = husl_palette(12);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_extreme_lightness() {
        assert_eq!(husl_to_rgb(120.0, 90.0, 100.0), Rgb::new(255, 255, 255));
        assert_eq!(husl_to_rgb(120.0, 90.0, 0.0), Rgb::BLACK);
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        let gray = husl_to_rgb(200.0, 0.0, 50.0);
        assert_eq!(gray.r, gray.g);
        assert_eq!(gray.g, gray.b);
    }

    #[test]
    fn test_assignment_depends_on_position_only() {
        let forward = assign_colors(["CU", "FF", "SL"]);
        let reversed = assign_colors(["SL", "FF", "CU"]);

        assert_eq!(forward[0].0, "CU");
        assert_eq!(reversed[0].0, "SL");
        for i in 0..3 {
            assert_eq!(forward[i].1, reversed[i].1);
        }
    }

    #[test]
    fn test_css_serialization() {
        let c = Rgb::new(12, 200, 7);
        assert_eq!(c.css(), "rgb(12, 200, 7)");
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"rgb(12, 200, 7)\"");
        assert_eq!(c.with_alpha(128), [12, 200, 7, 128]);
    }

    proptest! {
        #[test]
        fn prop_palette_deterministic(k in 0usize..40) {
            let a = husl_palette(k);
            let b = husl_palette(k);
            prop_assert_eq!(a.len(), k);
            prop_assert_eq!(a, b);
        }
    }
}
