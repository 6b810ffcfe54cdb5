use image::Rgb;
use serde::Serialize;

/// One representative color of a garment with its relative frequency in the
/// sampled pixel set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorSwatch {
    pub rgb: [u8; 3],
    pub hex: String,
    pub frequency: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ColorSwatch {
    pub fn new(rgb: Rgb<u8>, frequency: f32) -> Self {
        let [r, g, b] = rgb.0;
        Self {
            rgb: [r, g, b],
            hex: format!("#{:02x}{:02x}{:02x}", r, g, b),
            frequency,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_derived_from_rgb() {
        let swatch = ColorSwatch::new(Rgb([255, 0, 10]), 0.5);
        assert_eq!(swatch.hex, "#ff000a");
        assert_eq!(swatch.rgb, [255, 0, 10]);
    }
}
