use std::fmt::Display;

/// Separator between per-level values in a joined parameter.
pub const LEVEL_SEPARATOR: &str = "x";

/// Join per-level values with [`LEVEL_SEPARATOR`]; an empty input joins to `""`.
pub fn join_levels<T: Display>(values: impl IntoIterator<Item = T>) -> String {
    let mut out = String::new();
    for (i, v) in values.into_iter().enumerate() {
        if i > 0 {
            out.push_str(LEVEL_SEPARATOR);
        }
        out.push_str(&v.to_string());
    }
    out
}

/// Shortest round-trip text for a sigma value.
///
/// Integral values keep a trailing `.0`, and magnitudes outside `[1e-4, 1e16)`
/// switch to exponent form with a signed, at least two digit exponent
/// (`1.5e-05`, `1e+16`).
pub fn sigma_text(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = v.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let sci = format!("{v:e}");
        if let Some((mantissa, exp)) = sci.split_once('e') {
            if let Ok(exp) = exp.parse::<i32>() {
                let sign = if exp < 0 { '-' } else { '+' };
                return format!("{mantissa}e{sign}{:02}", exp.unsigned_abs());
            }
        }
        return sci;
    }

    let mut s = format!("{v}");
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
