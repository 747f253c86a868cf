//! Personal data detection: email, phone, credit card, IBAN.

use lazy_static::lazy_static;
use promptc_ir::PiiKind;
use regex::Regex;
use std::ops::Range;

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap();
    static ref CARD: Regex = Regex::new(r"\b(?:[0-9][ \-]?){12,18}[0-9]\b").unwrap();
    static ref IBAN: Regex =
        Regex::new(r"\b[A-Z]{2}[0-9]{2}(?: ?[A-Z0-9]{4}){2,7}(?: ?[A-Z0-9]{1,4})?\b").unwrap();
    static ref PHONE: Regex =
        Regex::new(r"(?:\+[0-9]{1,3}[\s.\-]?)?(?:\([0-9]{2,4}\)[\s.\-]?)?\b[0-9]{3}[\s.\-]?[0-9]{2,4}[\s.\-]?[0-9]{2,4}\b")
            .unwrap();
}

/// Detected kinds, deduplicated, in [`PiiKind`] declaration order.
pub fn detect(raw: &str) -> Vec<PiiKind> {
    let mut found = Vec::new();
    let mut claimed: Vec<Range<usize>> = Vec::new();

    if EMAIL.is_match(raw) {
        found.push(PiiKind::Email);
    }

    let ibans: Vec<_> = IBAN
        .find_iter(raw)
        .filter(|m| iban_checksum_ok(m.as_str()))
        .map(|m| m.range())
        .collect();

    let cards: Vec<_> = CARD
        .find_iter(raw)
        .filter(|m| !overlaps(&ibans, &m.range()) && luhn_ok(m.as_str()))
        .map(|m| m.range())
        .collect();

    claimed.extend(ibans.iter().cloned());
    claimed.extend(cards.iter().cloned());

    let phone = PHONE.find_iter(raw).any(|m| {
        let digits = m.as_str().chars().filter(char::is_ascii_digit).count();
        (7..=15).contains(&digits) && !overlaps(&claimed, &m.range())
    });

    if phone {
        found.push(PiiKind::Phone);
    }
    if !cards.is_empty() {
        found.push(PiiKind::CreditCard);
    }
    if !ibans.is_empty() {
        found.push(PiiKind::Iban);
    }
    found
}

fn overlaps(ranges: &[Range<usize>], range: &Range<usize>) -> bool {
    ranges
        .iter()
        .any(|r| r.start < range.end && range.start < r.end)
}

fn luhn_ok(candidate: &str) -> bool {
    let digits: Vec<u32> = candidate.chars().filter_map(|c| c.to_digit(10)).collect();
    if !(13..=19).contains(&digits.len()) {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

/// ISO 13616 mod-97 check.
fn iban_checksum_ok(candidate: &str) -> bool {
    let compact: String = candidate.chars().filter(|c| !c.is_whitespace()).collect();
    if !compact.is_ascii() || !(15..=34).contains(&compact.len()) {
        return false;
    }
    let (head, tail) = compact.split_at(4);
    let mut remainder: u32 = 0;
    for c in tail.chars().chain(head.chars()) {
        let value = match c.to_digit(36) {
            Some(v) => v,
            None => return false,
        };
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }
    remainder == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert_eq!(detect("my email is a@b.com"), vec![PiiKind::Email]);
        assert!(detect("email me at some point").is_empty());
    }

    #[test]
    fn test_phone() {
        assert_eq!(detect("call +1 415-555-2671 today"), vec![PiiKind::Phone]);
        assert_eq!(detect("ara beni 0532 123 45 67"), vec![PiiKind::Phone]);
    }

    #[test]
    fn test_credit_card_requires_luhn() {
        assert_eq!(detect("card 4111 1111 1111 1111"), vec![PiiKind::CreditCard]);
        assert!(!detect("card 4111 1111 1111 1112").contains(&PiiKind::CreditCard));
    }

    #[test]
    fn test_iban() {
        assert_eq!(detect("IBAN: GB82 WEST 1234 5698 7654 32"), vec![PiiKind::Iban]);
        assert_eq!(detect("send to GB82WEST12345698765432"), vec![PiiKind::Iban]);
        assert!(detect("GB00WEST12345698765432").is_empty());
    }

    #[test]
    fn test_non_ascii_digits_are_ignored() {
        assert!(detect("send to GB१२WEST12345698765432 please").is_empty());
        assert!(detect("kart ٤١١١ ١١١١ ١١١١ ١١١١").is_empty());
        assert!(detect("ara ۰۵۳۲ ۱۲۳ ۴۵ ۶۷").is_empty());
    }

    #[test]
    fn test_plain_numbers_are_not_pii() {
        assert!(detect("teach me binary search in 10 minutes").is_empty());
        assert!(detect("sales grew 2024 vs 2023 by 15%").is_empty());
    }
}
