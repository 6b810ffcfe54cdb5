use image::{DynamicImage, Rgb, RgbImage};
use tracing::debug;

/// Extracts a foreground-biased pixel sample from a garment photo.
///
/// The photographed garment is assumed to be centered with background around
/// the border, so sampling is restricted to a center ellipse and pixels in
/// shadow or blown-out highlight are dropped. Every degenerate case falls back
/// to a coarser selection instead of failing: the output is non-empty for any
/// image of at least 1x1 pixels.
pub struct ColorSampler {
    /// Images larger than this on either side are downscaled first. Purely a
    /// throughput knob, the sample stays representative.
    pub max_dimension: u32,
    /// Pixels with mean channel brightness at or below this are treated as shadow.
    pub brightness_floor: f32,
    /// Pixels with mean channel brightness at or above this are treated as glare.
    pub brightness_ceiling: f32,
    /// Below this many surviving pixels the brightness filter is discarded,
    /// which guards nearly-monochrome or extreme-lighting garments.
    pub min_filtered_pixels: usize,
}

impl ColorSampler {
    pub fn new(max_dimension: u32) -> Self {
        Self {
            max_dimension,
            brightness_floor: 30.0,
            brightness_ceiling: 225.0,
            min_filtered_pixels: 100,
        }
    }

    pub fn sample(&self, image: &DynamicImage) -> Vec<Rgb<u8>> {
        // to_rgb8 drops the alpha channel when present.
        let rgb = if image.width() > self.max_dimension || image.height() > self.max_dimension {
            image
                .resize(
                    self.max_dimension,
                    self.max_dimension,
                    image::imageops::FilterType::Triangle,
                )
                .to_rgb8()
        } else {
            image.to_rgb8()
        };

        let mut selected = self.select_ellipse(&rgb);
        if selected.is_empty() {
            debug!("Center ellipse selected no pixels, falling back to border crop");
            selected = self.select_border_crop(&rgb);
        }

        let filtered: Vec<Rgb<u8>> = selected
            .iter()
            .copied()
            .filter(|px| {
                let brightness = (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0;
                brightness > self.brightness_floor && brightness < self.brightness_ceiling
            })
            .collect();

        if filtered.len() < self.min_filtered_pixels {
            debug!(
                "Only {} pixels survived the brightness filter, using the unfiltered selection",
                filtered.len()
            );
            selected
        } else {
            filtered
        }
    }

    /// Pixels inside the center ellipse with semi-axes 35% of width and height.
    ///
    /// For images too small to carry an ellipse (a semi-axis truncates to
    /// zero) this yields nothing and the caller falls back.
    fn select_ellipse(&self, rgb: &RgbImage) -> Vec<Rgb<u8>> {
        let (w, h) = rgb.dimensions();
        let radius_x = (w as f32 * 0.35) as u32;
        let radius_y = (h as f32 * 0.35) as u32;
        if radius_x == 0 || radius_y == 0 {
            return Vec::new();
        }

        let (cx, cy) = (w / 2, h / 2);
        let (rx, ry) = (radius_x as f64, radius_y as f64);
        let mut pixels = Vec::new();
        for y in 0..h {
            for x in 0..w {
                let dx = (x as f64 - cx as f64) / rx;
                let dy = (y as f64 - cy as f64) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    pixels.push(*rgb.get_pixel(x, y));
                }
            }
        }
        pixels
    }

    /// Fallback selection: the full image minus a 10%-of-min-dimension border,
    /// or the whole image when even that border leaves nothing.
    fn select_border_crop(&self, rgb: &RgbImage) -> Vec<Rgb<u8>> {
        let (w, h) = rgb.dimensions();
        let border = w.min(h) / 10;
        let (x0, x1) = (border, w.saturating_sub(border));
        let (y0, y1) = (border, h.saturating_sub(border));

        if x0 >= x1 || y0 >= y1 {
            return rgb.pixels().copied().collect();
        }

        let mut pixels = Vec::new();
        for y in y0..y1 {
            for x in x0..x1 {
                pixels.push(*rgb.get_pixel(x, y));
            }
        }
        pixels
    }
}

impl Default for ColorSampler {
    fn default() -> Self {
        Self::new(400)
    }
}
