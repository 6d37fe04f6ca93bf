use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// Colour of series `index` out of `count`, hues evenly spaced on the wheel.
pub fn series_color(index: usize, count: usize) -> Color32 {
    if count == 0 {
        return Color32::LIGHT_BLUE;
    }
    let hue = (index % count) as f32 / count as f32 * 360.0;
    let rgb: Srgb = Hsl::new(hue, 0.70, 0.55).into_color();
    let [r, g, b] = [rgb.red, rgb.green, rgb.blue].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgb(r, g, b)
}

/// One colour per plotted series.
pub fn series_palette(count: usize) -> Vec<Color32> {
    (0..count).map(|i| series_color(i, count)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colors = series_palette(6);
        assert_eq!(colors.len(), 6);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn empty_palette() {
        assert!(series_palette(0).is_empty());
    }
}
