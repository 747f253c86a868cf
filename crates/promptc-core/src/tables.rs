//! Keyword tables for domain, ambiguity and risk detection.
//!
//! Built-in tables are compiled once; an external [`PatternConfig`] produces a
//! new immutable [`Tables`] value layered on top of them.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use promptc_ir::{AmbiguityCategory, Language};
use std::sync::Arc;

use crate::config::PatternConfig;

/// A named keyword family with locale-specific additions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordFamily {
    pub name: String,
    /// Matched for every language.
    pub common: Vec<String>,
    /// Matched only when the text is in the given language.
    pub localized: Vec<(Language, Vec<String>)>,
}

impl KeywordFamily {
    fn builtin(def: &FamilyDef) -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            name: def.name.to_string(),
            common: owned(def.common),
            localized: vec![
                (Language::En, owned(def.en)),
                (Language::Tr, owned(def.tr)),
                (Language::Es, owned(def.es)),
            ],
        }
    }

    fn external(name: &str, keywords: &[String]) -> Self {
        Self {
            name: name.to_string(),
            common: keywords.iter().map(|k| k.trim().to_lowercase()).collect(),
            localized: Vec::new(),
        }
    }

    /// Keywords that apply to text in `language`: common ones first.
    pub fn keywords(&self, language: Language) -> impl Iterator<Item = &str> {
        self.common.iter().map(String::as_str).chain(
            self.localized
                .iter()
                .filter(move |(lang, _)| *lang == language)
                .flat_map(|(_, list)| list.iter().map(String::as_str)),
        )
    }
}

/// Immutable lookup tables shared by every stage of a compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    /// Domains in registration order.
    pub domains: Vec<KeywordFamily>,
    /// Ambiguous term -> category, in vocabulary order.
    pub ambiguous_terms: IndexMap<String, AmbiguityCategory>,
    /// Risk categories in registration order.
    pub risk: Vec<KeywordFamily>,
}

lazy_static! {
    static ref BUILTIN: Arc<Tables> = Arc::new(Tables::build_builtin());
}

impl Tables {
    /// The built-in tables.
    pub fn builtin() -> Arc<Tables> {
        Arc::clone(&BUILTIN)
    }

    /// Built-in tables with an external configuration layered on top.
    ///
    /// Same-named domain and risk entries replace the built-in keyword list in
    /// place; new names are appended in file order.
    pub fn from_config(config: &PatternConfig) -> Tables {
        let mut tables = Tables::build_builtin();
        for (name, keywords) in &config.domains {
            merge_family(&mut tables.domains, name, keywords);
        }
        for (name, keywords) in &config.risk {
            merge_family(&mut tables.risk, name, keywords);
        }
        for (term, category) in &config.ambiguous_terms {
            tables
                .ambiguous_terms
                .insert(term.trim().to_lowercase(), *category);
        }
        tables
    }

    fn build_builtin() -> Tables {
        Tables {
            domains: DOMAINS.iter().map(KeywordFamily::builtin).collect(),
            ambiguous_terms: AMBIGUOUS_TERMS
                .iter()
                .map(|(term, category)| (term.to_string(), *category))
                .collect(),
            risk: RISK.iter().map(KeywordFamily::builtin).collect(),
        }
    }
}

fn merge_family(families: &mut Vec<KeywordFamily>, name: &str, keywords: &[String]) {
    let family = KeywordFamily::external(name, keywords);
    match families.iter_mut().find(|f| f.name == name) {
        Some(existing) => *existing = family,
        None => families.push(family),
    }
}

struct FamilyDef {
    name: &'static str,
    common: &'static [&'static str],
    en: &'static [&'static str],
    tr: &'static [&'static str],
    es: &'static [&'static str],
}

const DOMAINS: &[FamilyDef] = &[
    FamilyDef {
        name: "software",
        common: &[
            "python", "rust", "javascript", "typescript", "java", "golang", "kotlin", "c++",
            "c#", "node.js", "react", "django", "api", "sql", "git", "regex", "binary search",
            "linked list", "hashmap", "recursion", "stack trace", "unit test",
        ],
        en: &[
            "code", "coding", "program", "programming", "software", "function", "bug",
            "debug", "refactor", "algorithm", "data structure", "compiler", "library",
            "framework", "backend", "frontend", "exception",
        ],
        tr: &["kod", "yazılım", "fonksiyon", "algoritma", "program*", "hata ayıklama"],
        es: &["código", "programación", "función", "algoritmo", "depurar", "software"],
    },
    FamilyDef {
        name: "cloud",
        common: &[
            "aws", "gcp", "azure", "kubernetes", "k8s", "docker", "terraform", "lambda", "s3",
            "ec2", "serverless", "devops", "ci/cd", "helm",
        ],
        en: &[
            "cloud", "deployment", "deploy", "container", "cluster", "infrastructure",
            "load balancer", "microservices",
        ],
        tr: &["bulut", "sunucu", "dağıtım", "konteyner"],
        es: &["nube", "despliegue", "servidor", "contenedor"],
    },
    FamilyDef {
        name: "data_science",
        common: &["pandas", "numpy", "scikit-learn", "tensorflow", "pytorch", "jupyter"],
        en: &[
            "machine learning", "data science", "dataset", "regression", "classification",
            "neural network", "deep learning", "statistics",
        ],
        tr: &["veri bilimi", "makine öğrenmesi", "veri seti", "istatistik"],
        es: &[
            "ciencia de datos", "aprendizaje automático", "conjunto de datos", "estadística",
        ],
    },
    FamilyDef {
        name: "security",
        common: &["owasp", "xss", "csrf", "sql injection", "tls", "oauth", "jwt"],
        en: &[
            "security", "vulnerability", "encryption", "authentication", "exploit",
            "firewall", "penetration test", "malware",
        ],
        tr: &["güvenlik", "şifreleme", "zafiyet", "kimlik doğrulama"],
        es: &["seguridad", "vulnerabilidad", "cifrado", "autenticación"],
    },
    FamilyDef {
        name: "finance",
        common: &["bitcoin", "etf"],
        en: &[
            "stock", "stocks", "investment", "invest", "portfolio", "tax", "loan", "mortgage",
            "crypto", "trading", "interest rate", "dividend", "retirement",
        ],
        tr: &["yatırım", "borsa", "hisse", "vergi", "kredi", "bütçe", "faiz"],
        es: &[
            "inversión", "bolsa", "acciones", "impuesto", "préstamo", "presupuesto", "hipoteca",
        ],
    },
    FamilyDef {
        name: "health",
        common: &[],
        en: &[
            "health", "symptom", "symptoms", "diet", "medication", "medicine", "doctor",
            "disease", "pain", "fitness", "workout", "nutrition", "sleep",
        ],
        tr: &["sağlık", "belirti", "ilaç", "doktor", "hastalık", "ağrı", "diyet", "beslenme"],
        es: &["salud", "síntoma", "síntomas", "medicamento", "médico", "enfermedad", "dolor", "dieta"],
    },
    FamilyDef {
        name: "legal",
        common: &["gdpr", "kvkk"],
        en: &["law", "legal", "contract", "lawsuit", "attorney", "lawyer", "court", "copyright", "liability"],
        tr: &["hukuk", "sözleşme", "dava", "avukat", "mahkeme"],
        es: &["ley", "legal", "contrato", "demanda", "abogado", "tribunal"],
    },
    FamilyDef {
        name: "education",
        common: &[],
        en: &["lesson", "curriculum", "student", "students", "course", "classroom", "homework", "exam", "syllabus"],
        tr: &["ders", "öğrenci", "müfredat", "sınav", "ödev", "kurs"],
        es: &["lección", "estudiante", "estudiantes", "curso", "examen", "tarea"],
    },
    FamilyDef {
        name: "marketing",
        common: &["seo"],
        en: &[
            "marketing", "campaign", "brand", "branding", "social media", "advertising", "ads",
            "conversion", "funnel", "newsletter", "copywriting", "slogan",
        ],
        tr: &["pazarlama", "reklam", "kampanya", "marka"],
        es: &["mercadotecnia", "marketing", "publicidad", "campaña", "marca"],
    },
];

const RISK: &[FamilyDef] = &[
    FamilyDef {
        name: "financial",
        common: &["bitcoin"],
        en: &[
            "invest", "investment", "investing", "stock", "stocks", "crypto", "trading", "loan",
            "mortgage", "tax", "retirement", "portfolio",
        ],
        tr: &["yatırım", "borsa", "hisse", "kredi", "vergi", "kripto"],
        es: &["inversión", "acciones", "bolsa", "préstamo", "hipoteca", "impuesto", "cripto"],
    },
    FamilyDef {
        name: "health",
        common: &[],
        en: &[
            "symptom", "symptoms", "medication", "medicine", "dosage", "dose", "diagnosis",
            "disease", "treatment", "pain", "pregnancy",
        ],
        tr: &["belirti", "ilaç", "doz", "teşhis", "hastalık", "tedavi", "ağrı"],
        es: &["síntoma", "síntomas", "medicamento", "dosis", "diagnóstico", "enfermedad", "tratamiento", "dolor"],
    },
    FamilyDef {
        name: "legal",
        common: &[],
        en: &["lawsuit", "contract", "attorney", "lawyer", "court", "sue", "divorce", "custody", "legal advice"],
        tr: &["dava", "sözleşme", "avukat", "mahkeme", "boşanma"],
        es: &["demanda", "contrato", "abogado", "tribunal", "divorcio"],
    },
];

use AmbiguityCategory::*;

const AMBIGUOUS_TERMS: &[(&str, AmbiguityCategory)] = &[
    ("optimize", Performance),
    ("optimise", Performance),
    ("fast", Performance),
    ("faster", Performance),
    ("efficient", Performance),
    ("performant", Performance),
    ("scalable", Scale),
    ("scalability", Scale),
    ("secure", Security),
    ("safe", Security),
    ("resilient", Reliability),
    ("robust", Reliability),
    ("reliable", Reliability),
    ("highly available", Reliability),
    ("better", Quality),
    ("improve", Quality),
    ("clean", Quality),
    ("modern", Quality),
    ("user-friendly", Quality),
    ("etc", Scope),
    ("everything", Scope),
    ("and so on", Scope),
    // tr
    ("optimize et", Performance),
    ("hızlı", Performance),
    ("ölçeklenebilir", Scale),
    ("güvenli", Security),
    ("sağlam", Reliability),
    ("güvenilir", Reliability),
    ("daha iyi", Quality),
    ("temiz", Quality),
    ("vb", Scope),
    // es
    ("optimizar", Performance),
    ("rápido", Performance),
    ("escalable", Scale),
    ("seguro", Security),
    ("robusto", Reliability),
    ("fiable", Reliability),
    ("mejor", Quality),
    ("limpio", Quality),
];
