//! Studio colours: a stable hue per studio name.

use std::collections::HashMap;

const SATURATION: f32 = 0.60;
const LIGHTNESS: f32 = 0.55;

/// Colour used for studios outside the palette.
pub const FALLBACK_RGB: [u8; 3] = [0x66, 0x66, 0x66];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudioColor {
    Hue(u16),
    Fallback,
}

impl StudioColor {
    /// Hue from an FNV-1a hash of the name.
    pub fn for_name(name: &str) -> Self {
        let hash = name.bytes().fold(0x811c_9dc5_u32, |acc, byte| {
            (acc ^ u32::from(byte)).wrapping_mul(0x0100_0193)
        });
        StudioColor::Hue((hash % 360) as u16)
    }

    pub fn css(self) -> String {
        match self {
            StudioColor::Hue(hue) => format!(
                "hsl({}, {}%, {}%)",
                hue,
                (SATURATION * 100.0).round(),
                (LIGHTNESS * 100.0).round()
            ),
            StudioColor::Fallback => "#666".to_string(),
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            StudioColor::Hue(hue) => hsl_to_rgb(f32::from(hue), SATURATION, LIGHTNESS),
            StudioColor::Fallback => FALLBACK_RGB,
        }
    }
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [u8; 3] {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [channel(r), channel(g), channel(b)]
}

/// Colours for the studios of one loaded table.
#[derive(Debug, Clone, Default)]
pub struct StudioPalette {
    colors: HashMap<String, StudioColor>,
}

impl StudioPalette {
    pub fn new<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            colors: locations
                .into_iter()
                .map(|name| {
                    let name = name.into();
                    let color = StudioColor::for_name(&name);
                    (name, color)
                })
                .collect(),
        }
    }

    pub fn color_of(&self, location: &str) -> StudioColor {
        self.colors
            .get(location)
            .copied()
            .unwrap_or(StudioColor::Fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_same_color() {
        let palette = StudioPalette::new(["Altona", "St. Georg"]);
        assert_eq!(palette.color_of("Altona"), StudioColor::for_name("Altona"));
        assert_eq!(palette.color_of("Altona"), palette.color_of("Altona"));
        assert_eq!(palette.color_of("Harburg"), StudioColor::Fallback);
    }

    #[test]
    fn css_matches_hsl_notation() {
        assert_eq!(StudioColor::Hue(120).css(), "hsl(120, 60%, 55%)");
        assert_eq!(StudioColor::Fallback.css(), "#666");
    }

    #[test]
    fn rgb_conversion_hits_primary_hues() {
        // l = 0.55, s = 0.6: chroma 0.54, m = 0.28
        assert_eq!(StudioColor::Hue(0).rgb(), [209, 71, 71]);
        assert_eq!(StudioColor::Hue(120).rgb(), [71, 209, 71]);
        assert_eq!(StudioColor::Hue(240).rgb(), [71, 71, 209]);
    }
}
