use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

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
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Diverging scale for the correlation heatmap
// ---------------------------------------------------------------------------

const COLD: (f32, f32, f32) = (0.23, 0.30, 0.75);
const NEUTRAL: (f32, f32, f32) = (0.87, 0.87, 0.87);
const WARM: (f32, f32, f32) = (0.71, 0.02, 0.15);

/// Blue → grey → red over `[-1, 1]`, blended in linear RGB. Out-of-range
/// input is clamped.
pub fn diverging(value: f64) -> Color32 {
    let t = value.clamp(-1.0, 1.0) as f32;
    let neutral = linear(NEUTRAL);
    let mixed = if t < 0.0 {
        neutral.mix(linear(COLD), -t)
    } else {
        neutral.mix(linear(WARM), t)
    };
    to_color32(Srgb::from_linear(mixed))
}

fn linear((r, g, b): (f32, f32, f32)) -> LinSrgb {
    Srgb::new(r, g, b).into_linear()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(7);
        assert_eq!(colors.len(), 7);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn diverging_ends_differ() {
        let cold = diverging(-1.0);
        let warm = diverging(1.0);
        assert!(cold.b() > cold.r());
        assert!(warm.r() > warm.b());
        assert_eq!(diverging(5.0), warm);
    }
}
