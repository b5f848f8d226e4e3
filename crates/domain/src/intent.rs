//! Keyword-based intent classification
//!
//! Questions are matched against ordered keyword tables using plain substring
//! containment. The first matching row wins, so the order of the tables decides
//! the outcome for questions that mention several groups or metrics.

use crate::model::{Category, Intent, Metric};

/// Category keywords in priority order
const CATEGORY_KEYWORDS: &[(&[&str], Category)] = &[
    (&["모돈"], Category::Sow),
    (&["포유자돈", "포유"], Category::SucklingPiglet),
    (&["이유자돈", "이유"], Category::WeanedPiglet),
    (&["육성돈", "육성"], Category::Grower),
    (&["비육돈", "비육"], Category::Finisher),
    // Bare 자돈 only after every specific piglet stage had its chance
    (&["자돈"], Category::AllPiglets),
];

/// Metric keywords in priority order
const METRIC_KEYWORDS: &[(&[&str], Metric)] = &[
    (&["분만", "새끼"], Metric::FarrowingRate),
    (&["폐사", "죽"], Metric::MortalityRate),
    (&["사료", "먹이"], Metric::FeedAmount),
    (&["체중", "무게", "몸무게"], Metric::Weight),
];

/// Classify a free-text question into a `(Category, Metric)` pair.
///
/// Total over all inputs: unmatched text falls back to `(All, General)`.
pub fn classify(question: &str) -> Intent {
    let lowered = question.to_lowercase();

    let category = first_match(&lowered, CATEGORY_KEYWORDS).unwrap_or(Category::All);
    let metric = first_match(&lowered, METRIC_KEYWORDS).unwrap_or(Metric::General);

    tracing::debug!(%category, %metric, "Classified question");

    Intent { category, metric }
}

fn first_match<T: Copy>(text: &str, table: &[(&[&str], T)]) -> Option<T> {
    table
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, value)| *value)
}
