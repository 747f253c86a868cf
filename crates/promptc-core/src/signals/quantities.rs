//! Numeric literals with units, currencies and ranges.

use lazy_static::lazy_static;
use promptc_ir::{Quantity, QuantityKind};
use regex::Regex;

lazy_static! {
    static ref QUANTITY: Regex = Regex::new(
        r"(?i)(?P<pre>[$€£₺])?\s*(?P<a>[0-9]{1,3}(?:[.,][0-9]{3})+(?:[.,][0-9]{1,2})?|[0-9]+(?:[.,][0-9]+)?)(?:\s*(?:-|–|to|a|ile)\s*[$€£₺]?\s*(?P<b>[0-9]{1,3}(?:[.,][0-9]{3})+(?:[.,][0-9]{1,2})?|[0-9]+(?:[.,][0-9]+)?))?(?:\s*(?P<unit>\p{L}+|[$€£₺]))?"
    )
    .unwrap();
    /// Digit groups of three (`5,000`, `1.500.000`), optionally with 1-2 decimals.
    static ref GROUPED: Regex =
        Regex::new(r"^[0-9]{1,3}(?:[.,][0-9]{3})+(?:[.,][0-9]{1,2})?$").unwrap();
}

/// Unit spellings -> (kind, canonical unit).
const UNITS: &[(&[&str], QuantityKind, &str)] = &[
    (
        &["m", "min", "mins", "minute", "minutes", "dk", "dakika", "dakikada", "dakikalık", "minuto", "minutos"],
        QuantityKind::Duration,
        "minute",
    ),
    (
        &["h", "hr", "hrs", "hour", "hours", "saat", "saatte", "saatlik", "hora", "horas"],
        QuantityKind::Duration,
        "hour",
    ),
    (
        &["sec", "secs", "second", "seconds", "saniye", "segundo", "segundos"],
        QuantityKind::Duration,
        "second",
    ),
    (&["day", "days", "gün", "günde", "día", "días"], QuantityKind::Duration, "day"),
    (&["week", "weeks", "hafta", "semana", "semanas"], QuantityKind::Duration, "week"),
    (
        &["bullet", "bullets", "point", "points", "madde", "maddede", "punto", "puntos", "viñeta", "viñetas"],
        QuantityKind::Count,
        "bullet",
    ),
    (
        &["variant", "variants", "version", "versions", "variation", "variations", "alternative", "alternatives", "option", "options", "varyasyon", "alternatif", "seçenek", "variante", "variantes", "alternativas", "opciones", "versiones"],
        QuantityKind::Count,
        "variant",
    ),
    (&["item", "items", "öğe", "elemento", "elementos"], QuantityKind::Count, "item"),
    (&["example", "examples", "örnek", "ejemplo", "ejemplos"], QuantityKind::Count, "example"),
    (&["question", "questions", "soru", "pregunta", "preguntas"], QuantityKind::Count, "question"),
    (&["step", "steps", "adım", "paso", "pasos"], QuantityKind::Count, "step"),
    (&["word", "words", "kelime", "palabra", "palabras"], QuantityKind::Count, "word"),
    (&["sentence", "sentences", "cümle", "oración", "oraciones"], QuantityKind::Count, "sentence"),
    (&["paragraph", "paragraphs", "paragraf", "párrafo", "párrafos"], QuantityKind::Count, "paragraph"),
    (&["page", "pages", "sayfa", "página", "páginas"], QuantityKind::Count, "page"),
    (&["usd", "dollar", "dollars", "dólar", "dólares", "$"], QuantityKind::Currency, "usd"),
    (&["eur", "euro", "euros", "€"], QuantityKind::Currency, "eur"),
    (&["gbp", "pound", "pounds", "£"], QuantityKind::Currency, "gbp"),
    (&["try", "tl", "lira", "₺"], QuantityKind::Currency, "try"),
];

fn unit_of(spelling: &str) -> Option<(QuantityKind, &'static str)> {
    let lower = spelling.to_lowercase();
    UNITS
        .iter()
        .find(|(spellings, _, _)| spellings.contains(&lower.as_str()))
        .map(|(_, kind, unit)| (*kind, *unit))
}

/// `,` and `.` are both accepted as the decimal point. In a grouped number the
/// first separator is the group separator.
fn parse_number(raw: &str) -> Option<f64> {
    if GROUPED.is_match(raw) {
        let group = raw.chars().find(|c| matches!(c, ',' | '.'))?;
        let ungrouped: String = raw.chars().filter(|&c| c != group).collect();
        return ungrouped.replace(',', ".").parse().ok();
    }
    raw.replace(',', ".").parse().ok()
}

/// Quantities in order of appearance. Bare numbers without a unit are skipped.
pub fn detect(raw: &str) -> Vec<Quantity> {
    let mut out = Vec::new();
    for caps in QUANTITY.captures_iter(raw) {
        let unit = match (caps.name("pre"), caps.name("unit")) {
            (Some(pre), _) => unit_of(pre.as_str()),
            (None, Some(unit)) => unit_of(unit.as_str()),
            (None, None) => None,
        };
        let Some((kind, unit)) = unit else {
            continue;
        };
        let Some(value) = caps.name("a").and_then(|m| parse_number(m.as_str())) else {
            continue;
        };
        let upper = caps.name("b").and_then(|m| parse_number(m.as_str()));

        let Some(whole) = caps.get(0) else {
            continue;
        };
        // Drop a trailing word that was captured but is not the unit ("$500 budget")
        let end = match (caps.name("pre"), caps.name("unit")) {
            (Some(_), Some(u)) if unit_of(u.as_str()).is_none() => caps
                .name("b")
                .or_else(|| caps.name("a"))
                .map_or(u.start(), |m| m.end()),
            _ => whole.end(),
        };
        let text = raw.get(whole.start()..end).unwrap_or("").trim();

        out.push(Quantity {
            raw: text.to_string(),
            kind,
            value,
            upper,
            unit: unit.to_string(),
        });
    }
    out
}

/// First duration in minutes or hours, as a compact token (`10m`, `1.5h`).
///
/// Ranges use their upper bound.
pub fn duration_token(quantities: &[Quantity]) -> Option<(String, f64, bool)> {
    quantities.iter().find_map(|q| {
        let hours = match (q.kind, q.unit.as_str()) {
            (QuantityKind::Duration, "minute") => false,
            (QuantityKind::Duration, "hour") => true,
            _ => return None,
        };
        let value = q.upper.unwrap_or(q.value);
        let suffix = if hours { "h" } else { "m" };
        Some((
            format!("{}{suffix}", crate::phrases::format_number(value)),
            value,
            hours,
        ))
    })
}

/// First count with the given canonical unit, as a positive integer.
pub fn count_of(quantities: &[Quantity], unit: &str) -> Option<u32> {
    quantities
        .iter()
        .find(|q| q.kind == QuantityKind::Count && q.unit == unit)
        .and_then(|q| {
            let value = q.value.trunc();
            (value >= 0.0).then(|| value.min(f64::from(u32::MAX)) as u32)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let found = detect("teach me binary search in 10 minutes beginner level");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, QuantityKind::Duration);
        assert_eq!(found[0].unit, "minute");
        assert_eq!(found[0].value, 10.0);
        assert_eq!(found[0].raw, "10 minutes");
        assert_eq!(duration_token(&found).map(|d| d.0), Some("10m".to_string()));
    }

    #[test]
    fn test_compact_units_and_ranges() {
        let found = detect("a 1.5h workshop, then 10-20 min of practice");
        assert_eq!(duration_token(&found).map(|d| d.0), Some("1.5h".to_string()));
        assert_eq!(found[1].value, 10.0);
        assert_eq!(found[1].upper, Some(20.0));
        assert_eq!(found[1].raw, "10-20 min");
    }

    #[test]
    fn test_counts() {
        let found = detect("summarize the text in 5 bullet points");
        assert_eq!(count_of(&found, "bullet"), Some(5));
        let found = detect("give me 4 variants");
        assert_eq!(count_of(&found, "variant"), Some(4));
    }

    #[test]
    fn test_currency() {
        let found = detect("a laptop for $500 budget or 800-900 EUR");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, QuantityKind::Currency);
        assert_eq!(found[0].unit, "usd");
        assert_eq!(found[0].raw, "$500");
        assert_eq!(found[1].unit, "eur");
        assert_eq!(found[1].upper, Some(900.0));
    }

    #[test]
    fn test_grouped_currency() {
        let found = detect("plan a trip with a $1,500,000 budget");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw, "$1,500,000");
        assert_eq!(found[0].value, 1_500_000.0);
        assert_eq!(found[0].unit, "usd");

        let found = detect("a used car for $5,000");
        assert_eq!(found[0].value, 5000.0);

        let found = detect("bütçe €2.500 civarı");
        assert_eq!(found[0].raw, "€2.500");
        assert_eq!(found[0].value, 2500.0);
        assert_eq!(found[0].unit, "eur");
    }

    #[test]
    fn test_grouped_number_with_decimals() {
        assert_eq!(parse_number("1,500.75"), Some(1500.75));
        assert_eq!(parse_number("2.500,5"), Some(2500.5));
        assert_eq!(parse_number("1,5"), Some(1.5));
        assert_eq!(parse_number("12345"), Some(12345.0));
    }

    #[test]
    fn test_non_ascii_digits_skipped() {
        assert!(detect("٥ minutes and ५ bullets").is_empty());
    }

    #[test]
    fn test_bare_numbers_skipped() {
        assert!(detect("sales in 2024 grew 15 percent").is_empty());
        assert!(detect("no numbers here").is_empty());
    }
}
