//! Domain classification from keyword-family evidence.

use promptc_ir::{Language, GENERAL_DOMAIN};
use std::collections::BTreeMap;
use tracing::debug;

use crate::tables::Tables;
use crate::text::Text;

#[derive(Debug, Clone, PartialEq)]
pub struct DomainClassification {
    pub domain: String,
    /// Other domains with evidence, best first.
    pub candidates: Vec<String>,
    /// `primary / total`, rounded to 3 decimals; `None` without evidence.
    pub confidence: Option<f64>,
    pub scores: BTreeMap<String, u32>,
    /// `domain:keyword` snippets in registration order.
    pub evidence: Vec<String>,
}

impl DomainClassification {
    pub fn evidence_count(&self) -> usize {
        self.evidence.len()
    }

    pub fn is_general(&self) -> bool {
        self.domain == GENERAL_DOMAIN
    }
}

/// Score every domain by the number of distinct keywords found.
///
/// The primary domain has the highest score; ties go to the domain registered
/// first.
pub fn classify(text: &Text<'_>, language: Language, tables: &Tables) -> DomainClassification {
    let mut ranked: Vec<(usize, &str, u32)> = Vec::new();
    let mut evidence = Vec::new();
    let mut scores = BTreeMap::new();

    for (index, family) in tables.domains.iter().enumerate() {
        let found = text.matches(family.keywords(language));
        if found.is_empty() {
            continue;
        }
        evidence.extend(found.iter().map(|k| format!("{}:{k}", family.name)));
        let score = found.len() as u32;
        scores.insert(family.name.clone(), score);
        ranked.push((index, family.name.as_str(), score));
    }

    // score desc, then registration order
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

    let total: u32 = ranked.iter().map(|(_, _, s)| s).sum();
    let classification = match ranked.split_first() {
        Some((&(_, name, score), rest)) if total > 0 => DomainClassification {
            domain: name.to_string(),
            candidates: rest.iter().map(|(_, n, _)| n.to_string()).collect(),
            confidence: Some(round3(f64::from(score) / f64::from(total))),
            scores,
            evidence,
        },
        _ => DomainClassification {
            domain: GENERAL_DOMAIN.to_string(),
            candidates: Vec::new(),
            confidence: None,
            scores,
            evidence,
        },
    };

    debug!(
        domain = %classification.domain,
        evidence = classification.evidence_count(),
        confidence = ?classification.confidence,
        "domain classified"
    );
    classification
}

pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatternConfig;

    fn classify_en(source: &str) -> DomainClassification {
        classify(&Text::new(source), Language::En, &Tables::builtin())
    }

    #[test]
    fn test_cloud_with_confidence() {
        let result = classify_en("deploy to aws lambda with terraform");
        assert_eq!(result.domain, "cloud");
        assert_eq!(result.scores.get("cloud"), Some(&4));
        assert_eq!(result.confidence, Some(1.0));
        assert!(result.candidates.is_empty());
        assert_eq!(result.evidence[0], "cloud:aws");
    }

    #[test]
    fn test_general_without_evidence() {
        let result = classify_en("write me a poem about autumn");
        assert_eq!(result.domain, GENERAL_DOMAIN);
        assert_eq!(result.confidence, None);
        assert!(result.scores.is_empty());
    }

    #[test]
    fn test_candidates_and_ratio() {
        let result = classify_en("python api on kubernetes");
        assert_eq!(result.domain, "software");
        assert_eq!(result.candidates, vec!["cloud"]);
        assert_eq!(result.confidence, Some(0.667));
    }

    #[test]
    fn test_tie_goes_to_registration_order() {
        let result = classify_en("python on aws");
        assert_eq!(result.domain, "software");
        assert_eq!(result.confidence, Some(0.5));
    }

    #[test]
    fn test_locale_keywords() {
        let text = Text::new("bulut sunucu kurulumu");
        let tr = classify(&text, Language::Tr, &Tables::builtin());
        assert_eq!(tr.domain, "cloud");
        let en = classify(&text, Language::En, &Tables::builtin());
        assert_eq!(en.domain, GENERAL_DOMAIN);
    }

    #[test]
    fn test_external_domain() {
        let config =
            PatternConfig::from_json_str(r#"{"domains": {"gaming": ["unity", "shader"]}}"#)
                .unwrap();
        let tables = Tables::from_config(&config);
        let result = classify(&Text::new("unity shader tips"), Language::En, &tables);
        assert_eq!(result.domain, "gaming");
        assert_eq!(result.evidence, vec!["gaming:unity", "gaming:shader"]);
    }
}
