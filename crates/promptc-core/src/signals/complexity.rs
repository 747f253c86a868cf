//! Coarse request complexity from length and hard-concept signals.

use promptc_ir::Complexity;

use crate::text::Text;

/// Concepts that make a request harder to answer well.
const HARD_CONCEPTS: &[&str] = &[
    "architecture", "distributed", "concurrency", "concurrent", "race condition", "deadlock",
    "optimization", "migration", "microservices", "consensus", "multi-tenant", "real-time",
    "trade-off", "trade-offs", "tradeoffs", "compliance", "integration", "machine learning",
    "kubernetes", "cryptography", "scalability", "fault tolerance", "asynchronous",
    "mimari", "dağıtık", "eşzamanlı", "ölçeklenebilirlik", "arquitectura", "distribuido",
    "concurrencia", "escalabilidad",
];

/// Points: 2 for 60+ words, 1 for 25+; one per distinct hard concept, up to 3.
/// 0-1 is low, 2-3 medium, 4+ high.
pub fn score(text: &Text<'_>) -> (Complexity, u32) {
    let words = text.word_count();
    let length_points = match words {
        n if n >= 60 => 2,
        n if n >= 25 => 1,
        _ => 0,
    };
    let concepts = text.matches(HARD_CONCEPTS.iter().copied()).len().min(3) as u32;
    let points = length_points + concepts;

    let level = match points {
        0 | 1 => Complexity::Low,
        2 | 3 => Complexity::Medium,
        _ => Complexity::High,
    };
    (level, points)
}
