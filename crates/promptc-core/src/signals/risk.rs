//! Financial, health and legal risk flags.

use promptc_ir::Language;

use crate::tables::Tables;
use crate::text::Text;

/// Names of the risk categories with keyword evidence, in registration order.
pub fn detect(text: &Text<'_>, language: Language, tables: &Tables) -> Vec<String> {
    tables
        .risk
        .iter()
        .filter(|family| family.keywords(language).any(|k| text.has_phrase(k)))
        .map(|family| family.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatternConfig;

    #[test]
    fn test_categories() {
        let tables = Tables::builtin();
        let flags = detect(
            &Text::new("should I invest in bitcoin while my pain medication is expensive"),
            Language::En,
            &tables,
        );
        assert_eq!(flags, vec!["financial", "health"]);
        assert!(detect(&Text::new("sort a list"), Language::En, &tables).is_empty());
    }

    #[test]
    fn test_localized_keywords() {
        let flags = detect(&Text::new("avukat ile dava süreci"), Language::Tr, &Tables::builtin());
        assert_eq!(flags, vec!["legal"]);
    }

    #[test]
    fn test_external_category() {
        let config =
            PatternConfig::from_json_str(r#"{"risk": {"gambling": ["casino", "betting"]}}"#)
                .unwrap();
        let tables = Tables::from_config(&config);
        let flags = detect(&Text::new("best betting strategy"), Language::En, &tables);
        assert_eq!(flags, vec!["gambling"]);
    }
}
