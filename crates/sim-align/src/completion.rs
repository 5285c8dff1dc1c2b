//! Substance bar each strategic tool must meet to count as completed.

use sim_core::{BcgAnalysis, PestelAnalysis, PorterAnalysis, SwotAnalysis};

/// Notes must be longer than this many characters.
pub const MIN_NOTE_CHARS: usize = 10;
/// Shortest list item that still says something.
const MIN_ITEM_CHARS: usize = 3;

const PLACEHOLDERS: &[&str] = &[
    "n/a",
    "na",
    "-",
    "--",
    "...",
    "todo",
    "tbd",
    "a definir",
    "preencher",
    "lorem ipsum",
    "xxx",
];

pub fn is_placeholder(text: &str) -> bool {
    let t = text.trim().to_lowercase();
    t.is_empty() || PLACEHOLDERS.contains(&t.as_str())
}

fn is_substantive_item(text: &str) -> bool {
    !is_placeholder(text) && text.trim().chars().count() >= MIN_ITEM_CHARS
}

pub fn is_substantive_note(text: &str) -> bool {
    !is_placeholder(text) && text.trim().chars().count() > MIN_NOTE_CHARS
}

fn has_substance(items: &[String]) -> bool {
    items.iter().any(|i| is_substantive_item(i))
}

pub fn swot_complete(s: &SwotAnalysis) -> bool {
    [&s.strengths, &s.weaknesses, &s.opportunities, &s.threats]
        .iter()
        .all(|q| has_substance(q))
}

pub fn porter_complete(p: &PorterAnalysis) -> bool {
    p.forces()
        .iter()
        .all(|f| (1..=10).contains(&f.score) && is_substantive_note(&f.notes))
}

pub fn bcg_complete(b: &BcgAnalysis) -> bool {
    b.products
        .iter()
        .any(|p| !is_placeholder(&p.product_name) && is_substantive_note(&p.notes))
}

pub fn pestel_complete(p: &PestelAnalysis) -> bool {
    p.dimensions().iter().all(|d| has_substance(d))
}

/// Percent of the four tools that meet the substance bar.
pub fn completion_score(
    swot: Option<&SwotAnalysis>,
    porter: Option<&PorterAnalysis>,
    bcg: Option<&BcgAnalysis>,
    pestel: Option<&PestelAnalysis>,
) -> f64 {
    let done = [
        swot.is_some_and(swot_complete),
        porter.is_some_and(porter_complete),
        bcg.is_some_and(bcg_complete),
        pestel.is_some_and(pestel_complete),
    ]
    .iter()
    .filter(|c| **c)
    .count();
    done as f64 / 4.0 * 100.0
}
