use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::GroupLabel;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Continuous ramps
// ---------------------------------------------------------------------------

/// Red-blue diverging ramp with a zero midpoint: `t` in [-1, 1], cold
/// anomalies blue, warm anomalies red, fading to near-white at zero.
pub fn diverging(t: f64) -> Color32 {
    let t = t.clamp(-1.0, 1.0) as f32;
    let (hue, strength) = if t < 0.0 { (215.0, -t) } else { (10.0, t) };
    hsl_to_color32(Hsl::new(hue, 0.75, 0.9 - 0.45 * strength))
}

/// Sequential reds ramp: `t` in [0, 1], light red to dark red.
pub fn sequential_red(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    hsl_to_color32(Hsl::new(10.0, 0.8, 0.82 - 0.5 * t))
}

/// Largest magnitude of the values, floored away from zero so ramp
/// inputs can be divided by it.
pub fn max_abs(values: impl IntoIterator<Item = f64>) -> f64 {
    values
        .into_iter()
        .map(f64::abs)
        .fold(f64::EPSILON, f64::max)
}

// ---------------------------------------------------------------------------
// Fixed series colors
// ---------------------------------------------------------------------------

/// Group colours matching the original dashboard's encoding: green for
/// developed, orange for developing.
pub fn group_color(group: GroupLabel) -> Color32 {
    match group {
        GroupLabel::Developed => Color32::from_rgb(0x2c, 0xa0, 0x2c),
        GroupLabel::Developing => Color32::from_rgb(0xff, 0x7f, 0x0e),
    }
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(6).len(), 6);
    }

    #[test]
    fn diverging_separates_signs() {
        // Warm anomalies are red-dominant, cold ones blue-dominant.
        let warm = diverging(1.0);
        let cold = diverging(-1.0);
        assert!(warm.r() > warm.b());
        assert!(cold.b() > cold.r());
    }

    #[test]
    fn max_abs_never_returns_zero() {
        assert!(max_abs([]) > 0.0);
        assert_eq!(max_abs([-2.0, 1.0]), 2.0);
    }
}
