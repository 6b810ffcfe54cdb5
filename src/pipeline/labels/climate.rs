/// Maps raw climate labels from the classifier vocabulary onto the small
/// canonical set exposed to consumers.
///
/// The raw vocabulary drifted over training runs: Spanish labels, mojibake
/// variants of the accented ones, and a few semantic aliases all occur. The
/// mapping runs in two stages so upstream drift degrades to a safe default
/// instead of failing a request:
///
/// 1. repair known raw variants into an intermediate canonical set
///    {cold, cold-extreme, hot, mild, indoor, rain, wind, snow};
/// 2. collapse the intermediate set onto the public vocabulary
///    {cold, hot, mild, rain, wind, snow}.
///
/// Anything stage 1 does not recognize passes through lowercased; anything
/// stage 2 does not recognize becomes "mild".
pub struct ClimateNormalizer;

impl ClimateNormalizer {
    pub fn normalize(&self, raw: &str) -> &'static str {
        let lowered = raw.trim().to_lowercase();
        collapse(repair(&lowered))
    }
}

/// Stage 1: raw variant repair. `frã­o` is the mojibake left behind when the
/// UTF-8 bytes of `frío` are decoded as Latin-1.
fn repair(lowered: &str) -> &str {
    match lowered {
        "frio" | "frío" | "frã­o" | "invierno" => "cold",
        "frio extremo" | "frío extremo" | "frio_extremo" => "cold-extreme",
        "calor" | "sunny" | "soleado" | "verano" => "hot",
        "entretiempo" | "templado" | "medio" => "mild",
        "interior" => "indoor",
        "lluvia" | "lluvioso" => "rain",
        "viento" | "ventoso" => "wind",
        "nieve" | "nevado" => "snow",
        other => other,
    }
}

/// Stage 2: collapse onto the public vocabulary, defaulting to "mild".
fn collapse(intermediate: &str) -> &'static str {
    match intermediate {
        "cold" | "cold-extreme" => "cold",
        "hot" => "hot",
        "mild" | "indoor" => "mild",
        "rain" => "rain",
        "wind" => "wind",
        "snow" => "snow",
        _ => "mild",
    }
}
