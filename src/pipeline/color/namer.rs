use image::Rgb;

/// Maps an RGB triple to a coarse human color label.
///
/// Pure and total: every one of the 256^3 inputs gets a non-empty label.
/// Achromatic tiers are decided on value and saturation first, then the hue
/// wheel is bucketed with half-open `[low, high)` ranges.
pub struct ColorNamer;

impl ColorNamer {
    pub fn name(&self, rgb: Rgb<u8>) -> &'static str {
        let (hue, saturation, value) = rgb_to_hsv(rgb);

        if value < 20.0 {
            return "black";
        }
        if value > 80.0 && saturation < 20.0 {
            return "white";
        }
        if saturation < 20.0 {
            return if value < 40.0 {
                "dark gray"
            } else if value < 70.0 {
                "gray"
            } else {
                "light gray"
            };
        }

        if hue < 15.0 {
            "red"
        } else if hue < 45.0 {
            "orange"
        } else if hue < 75.0 {
            "yellow"
        } else if hue < 150.0 {
            "green"
        } else if hue < 210.0 {
            "blue"
        } else if hue < 270.0 {
            "purple"
        } else if hue < 330.0 {
            "pink"
        } else {
            "red"
        }
    }
}

/// Hue in degrees [0, 360), saturation and value as percentages [0, 100].
fn rgb_to_hsv(rgb: Rgb<u8>) -> (f32, f32, f32) {
    let r = rgb[0] as f32 / 255.0;
    let g = rgb[1] as f32 / 255.0;
    let b = rgb[2] as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        let mut h = 60.0 * ((g - b) / delta);
        if h < 0.0 {
            h += 360.0;
        }
        h
    } else if max == g {
        60.0 * ((b - r) / delta) + 120.0
    } else {
        60.0 * ((r - g) / delta) + 240.0
    };

    let saturation = if max == 0.0 { 0.0 } else { (delta / max) * 100.0 };
    (hue, saturation, max * 100.0)
}
