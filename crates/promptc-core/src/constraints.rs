//! Constraint synthesis: dedup, priority ordering and provenance.

use promptc_ir::normalize_text;
use smol_str::SmolStr;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

/// The stage that produced a constraint.
///
/// Declaration order is the origin registration order used for tie-breaks;
/// plugins rank after every built-in origin, in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Origin {
    Pii,
    Risk,
    Debug,
    Teaching,
    Comparison,
    Summary,
    Variants,
    Code,
    Recency,
    Domain,
    Ambiguity,
    Format,
    Hybrid,
    Plugin(SmolStr),
}

impl Origin {
    const BUILTIN: usize = 13;

    /// Registration rank; lower registers first.
    pub fn rank(&self, plugin_order: &[SmolStr]) -> usize {
        match self {
            Origin::Pii => 0,
            Origin::Risk => 1,
            Origin::Debug => 2,
            Origin::Teaching => 3,
            Origin::Comparison => 4,
            Origin::Summary => 5,
            Origin::Variants => 6,
            Origin::Code => 7,
            Origin::Recency => 8,
            Origin::Domain => 9,
            Origin::Ambiguity => 10,
            Origin::Format => 11,
            Origin::Hybrid => 12,
            Origin::Plugin(name) => plugin_order
                .iter()
                .position(|p| p == name)
                .map_or(usize::MAX, |i| Self::BUILTIN + i),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Origin::Pii => "pii".into(),
            Origin::Risk => "risk_flags".into(),
            Origin::Debug => "debug".into(),
            Origin::Teaching => "teaching".into(),
            Origin::Comparison => "comparison".into(),
            Origin::Summary => "summary".into(),
            Origin::Variants => "variants".into(),
            Origin::Code => "code".into(),
            Origin::Recency => "recency".into(),
            Origin::Domain => "domain".into(),
            Origin::Ambiguity => "ambiguity".into(),
            Origin::Format => "format".into(),
            Origin::Hybrid => "hybrid".into(),
            Origin::Plugin(name) => format!("plugin:{name}"),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One constraint as emitted by a stage, before synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub text: String,
    pub origin: Origin,
    pub priority: i32,
    /// Position within the emitting stage's own output.
    pub seq: u32,
}

/// Collects a stage's emissions, numbering them in emission order.
#[derive(Debug)]
pub struct Emitter {
    origin: Origin,
    out: Vec<Emission>,
}

impl Emitter {
    pub fn new(origin: Origin) -> Self {
        Self {
            origin,
            out: Vec::new(),
        }
    }

    pub fn emit(&mut self, priority: i32, text: impl Into<String>) -> &mut Self {
        let seq = self.out.len() as u32;
        self.out.push(Emission {
            text: text.into(),
            origin: self.origin.clone(),
            priority,
            seq,
        });
        self
    }

    pub fn finish(self) -> Vec<Emission> {
        self.out
    }
}

/// A deduplicated, ordered constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesized {
    pub text: String,
    pub origin: Origin,
    pub priority: i32,
}

/// Merge emissions into the final constraint list.
///
/// Duplicates (same normalized text) collapse into one entry that keeps the
/// earliest-registered origin (then lowest `seq`, then text) and the highest
/// priority. Output order is priority desc, origin rank, `seq`, normalized
/// text: a total order, so any permutation of the input yields the same list.
pub fn synthesize(emissions: &[Emission], plugin_order: &[SmolStr]) -> Vec<Synthesized> {
    let mut groups: BTreeMap<String, Vec<&Emission>> = BTreeMap::new();
    for emission in emissions {
        let key = normalize_text(&emission.text);
        if key.is_empty() {
            continue;
        }
        groups.entry(key).or_default().push(emission);
    }

    let mut merged: Vec<(String, usize, u32, Synthesized)> = groups
        .into_iter()
        .filter_map(|(key, group)| {
            let priority = group.iter().map(|e| e.priority).max()?;
            let winner = group
                .into_iter()
                .min_by(|a, b| {
                    (a.origin.rank(plugin_order), a.seq, a.text.trim())
                        .cmp(&(b.origin.rank(plugin_order), b.seq, b.text.trim()))
                })?;
            let rank = winner.origin.rank(plugin_order);
            Some((
                key,
                rank,
                winner.seq,
                Synthesized {
                    text: winner.text.split_whitespace().collect::<Vec<_>>().join(" "),
                    origin: winner.origin.clone(),
                    priority,
                },
            ))
        })
        .collect();

    merged.sort_by(|a, b| {
        (Reverse(a.3.priority), a.1, a.2, &a.0).cmp(&(Reverse(b.3.priority), b.1, b.2, &b.0))
    });
    merged.into_iter().map(|(_, _, _, c)| c).collect()
}

/// Constraint text -> origin label.
pub fn origin_map(constraints: &[Synthesized]) -> BTreeMap<String, String> {
    constraints
        .iter()
        .map(|c| (c.text.clone(), c.origin.label()))
        .collect()
}
