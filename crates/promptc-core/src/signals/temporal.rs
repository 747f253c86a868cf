//! Temporal expressions: years, quarters, months and relative phrases.

use lazy_static::lazy_static;
use promptc_ir::Language;
use regex::Regex;

use crate::text::Text;

lazy_static! {
    static ref YEAR: Regex = Regex::new(r"\b(?:19|20)[0-9]{2}\b").unwrap();
    static ref QUARTER: Regex = Regex::new(r"(?i)\bq([1-4])\b").unwrap();
}

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "june", "july", "august", "september",
    "october", "november", "december", "ocak", "şubat", "mart", "nisan", "mayıs", "haziran",
    "temmuz", "ağustos", "eylül", "ekim", "kasım", "aralık", "enero", "febrero", "marzo",
    "abril", "mayo", "junio", "julio", "agosto", "septiembre", "octubre", "noviembre",
    "diciembre",
];

/// Relative phrases per language; the boolean marks a recency request.
fn relative_phrases(language: Language) -> &'static [(&'static str, bool)] {
    match language {
        Language::En => &[
            ("today", false),
            ("tomorrow", false),
            ("yesterday", false),
            ("this week", false),
            ("last week", false),
            ("next week", false),
            ("this month", true),
            ("last month", false),
            ("next month", false),
            ("this year", true),
            ("last year", false),
            ("next year", false),
            ("recent", true),
            ("recently", true),
            ("latest", true),
            ("current", true),
            ("nowadays", true),
            ("up to date", true),
            ("up-to-date", true),
        ],
        Language::Tr => &[
            ("bugün", false),
            ("yarın", false),
            ("dün", false),
            ("bu hafta", false),
            ("geçen hafta", false),
            ("bu ay", true),
            ("geçen ay", false),
            ("bu yıl", true),
            ("geçen yıl", false),
            ("güncel", true),
            ("en son", true),
            ("son zamanlarda", true),
        ],
        Language::Es => &[
            ("hoy", false),
            ("mañana", false),
            ("ayer", false),
            ("esta semana", false),
            ("este mes", true),
            ("el mes pasado", false),
            ("este año", true),
            ("el año pasado", false),
            ("reciente", true),
            ("recientes", true),
            ("actual", true),
            ("actualizado", true),
            ("último", true),
        ],
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemporalFindings {
    /// `year:2024`, `quarter:q3`, `month:march`, `relative:this month`
    pub flags: Vec<String>,
    /// The request asks for current information.
    pub recency: bool,
}

pub fn detect(text: &Text<'_>, language: Language) -> TemporalFindings {
    let mut findings = TemporalFindings::default();

    for m in YEAR.find_iter(text.raw) {
        push(format!("year:{}", m.as_str()), &mut findings.flags);
    }
    for caps in QUARTER.captures_iter(text.raw) {
        push(format!("quarter:q{}", &caps[1]), &mut findings.flags);
    }
    for month in MONTHS {
        if text.has_word(month) {
            push(format!("month:{month}"), &mut findings.flags);
        }
    }
    for (phrase, recency) in relative_phrases(language) {
        if text.has_phrase(phrase) {
            push(format!("relative:{phrase}"), &mut findings.flags);
            findings.recency |= *recency;
        }
    }
    findings
}

fn push(flag: String, flags: &mut Vec<String>) {
    if !flags.contains(&flag) {
        flags.push(flag);
    }
}
