// File: crates/plot-env/src/theme.rs
// Summary: Fill color palettes and perceptually uniform (LCh) color ramps for categorical scales.

use palette::{FromColor, Lch, Mix, Srgb};

/// Named set of color stops a categorical fill ramp is interpolated through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub fill_stops: &'static [&'static str],
}

impl Theme {
    /// Cyan, purple, orange.
    pub fn nineteen_eighty_four() -> Self {
        Self { name: "1984", fill_stops: &["#31C0F6", "#A500A5", "#FF7E27"] }
    }

    pub fn solarized() -> Self {
        Self { name: "solarized", fill_stops: &["#268bd2", "#2aa198", "#b58900", "#dc322f"] }
    }

    pub fn high_contrast() -> Self {
        Self { name: "high-contrast", fill_stops: &["#00aaff", "#ffff00", "#ff0000"] }
    }

    /// `count` colors spread evenly along the stops, interpolated in LCh.
    pub fn fill_ramp(&self, count: usize) -> Vec<String> {
        lch_ramp(self.fill_stops, count)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::nineteen_eighty_four()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::nineteen_eighty_four(), Theme::solarized(), Theme::high_contrast()]
}

/// Find a theme by its `name`, falling back to the default.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_default()
}

/// Interpolate `count` hex colors through `stops` in CIE LCh.
/// Colors are sampled evenly from both ends; a single color is taken from the
/// middle. Unparseable stops are skipped; with no usable stop the ramp is empty.
pub fn lch_ramp(stops: &[&str], count: usize) -> Vec<String> {
    let stops: Vec<Lch> = stops
        .iter()
        .filter_map(|s| s.parse::<Srgb<u8>>().ok())
        .map(|c| Lch::from_color(c.into_format::<f32>()))
        .collect();

    if count == 0 || stops.is_empty() {
        return Vec::new();
    }
    if stops.len() == 1 {
        return vec![to_hex(stops[0]); count];
    }

    let segments = stops.len() - 1;
    (0..count)
        .map(|i| {
            let position = if count == 1 { 0.5 } else { i as f32 / (count - 1) as f32 };
            let t = position * segments as f32;
            let seg = (t.floor() as usize).min(segments - 1);
            to_hex(stops[seg].mix(stops[seg + 1], t - seg as f32))
        })
        .collect()
}

fn to_hex(color: Lch) -> String {
    let rgb: Srgb<u8> = Srgb::from_color(color).into_format();
    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}
