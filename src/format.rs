//! Locale-aware number formatting for tooltips and axis ticks.

use num_format::{Locale, ToFormattedString};

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Format a number with thousands separators, keeping up to three fraction
/// digits (trailing zeros dropped): `12345` -> `12,345`, `1234.5` -> `1,234.5`.
pub fn format_thousands(value: f64, locale_tag: &str) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let (locale, dec_sep) = map_locale(locale_tag);
    let abs = value.abs();
    let mut int = abs.trunc();
    let mut frac = ((abs - int) * 1000.0).round() as u64;
    if frac >= 1000 {
        int += 1.0;
        frac -= 1000;
    }

    let mut out = String::new();
    if value < 0.0 && (int > 0.0 || frac > 0) {
        out.push('-');
    }
    out.push_str(&format_integer(int, locale));
    if frac > 0 {
        let digits = format!("{frac:03}");
        out.push(dec_sep);
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// Group the digits of a whole, non-negative `int`. Values past `u128` keep
/// every digit instead of saturating.
fn format_integer(int: f64, locale: &Locale) -> String {
    let digits = format!("{int:.0}");
    if let Ok(n) = digits.parse::<u128>() {
        return n.to_formatted_string(locale);
    }
    let sep = locale.separator();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * sep.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(ch);
    }
    out
}
