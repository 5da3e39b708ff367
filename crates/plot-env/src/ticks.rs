// File: crates/plot-env/src/ticks.rs
// Summary: Nice tick generation ({1,2,5} x 10^k steps) and label-width driven tick density.

use crate::types::{Extent, LayoutConfig};

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Upper bound on the requested tick count, whatever the axis length.
pub const MAX_TICKS: usize = 1000;

/// Evenly spaced round values inside `[start, stop]`, roughly `count` of them.
///
/// Steps are drawn from {1, 2, 5} x 10^k. Negative powers are handled by
/// dividing integers instead of multiplying by a fractional step, so labels
/// come out as `0.3` rather than `0.30000000000000004`.
///
/// `count` is capped at [`MAX_TICKS`]; a result longer than `2 * MAX_TICKS + 1`
/// is dropped.
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    let count = count.min(MAX_TICKS);
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let Some((i1, i2, inc)) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    let span = i2 - i1 + 1.0;
    if !(1.0..=(2 * MAX_TICKS + 1) as f64).contains(&span) {
        return Vec::new();
    }
    let n = span as usize;
    let at = |i: f64| if inc < 0.0 { i / -inc } else { i * inc };
    if reverse {
        (0..n).map(|k| at(i2 - k as f64)).collect()
    } else {
        (0..n).map(|k| at(i1 + k as f64)).collect()
    }
}

/// Integer tick bounds and increment; a negative increment means "divide by".
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(f64, f64, f64)> {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    if !power.is_finite() {
        return None;
    }
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scale = 10f64.powf(-power) / factor;
        i1 = (start * scale).round();
        i2 = (stop * scale).round();
        if i1 / scale < start { i1 += 1.0; }
        if i2 / scale > stop { i2 -= 1.0; }
        inc = -scale;
    } else {
        inc = 10f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start { i1 += 1.0; }
        if i2 * inc > stop { i2 -= 1.0; }
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

/// Shortest round-trip text for a number; used for tick labels and for the
/// label-width estimate. Magnitudes of 1e21 and above or below 1e-6 switch to
/// exponent form (`1e+21`, `1.5e-7`).
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        // also covers -0.0
        return "0".to_string();
    }
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity".into() } else { "-Infinity".into() };
    }
    let magnitude = v.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let text = format!("{v:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    format!("{v}")
}

/// Tick labels for `domain` drawn across `length` pixels.
///
/// The target count is proportional to how many estimated label widths fit in
/// `length`, scaled by the configured density. An undefined domain yields no
/// ticks.
pub fn tick_labels(domain: Option<Extent>, length: f64, config: &LayoutConfig) -> Vec<String> {
    let Some(Extent { min, max }) = domain else {
        return Vec::new();
    };
    let chars = format_number(min).chars().count().max(format_number(max).chars().count());
    let approx_tick_width = chars as f64 * config.tick_char_width;
    if approx_tick_width <= 0.0 || !length.is_finite() || length <= 0.0 {
        return Vec::new();
    }
    let count = ((length / approx_tick_width) * config.tick_density).round().min(MAX_TICKS as f64);
    nice_ticks(min, max, count as usize).into_iter().map(format_number).collect()
}
