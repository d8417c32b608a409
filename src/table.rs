use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-student record as the scoring store reports it. Each question score
/// is either absent or an integer; the daemon trusts what the store sends
/// and does not re-validate the range on this side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StudentMarks {
    pub q1: Option<u32>,
    pub q2: Option<u32>,
    pub q3: Option<u32>,
    pub q4: Option<u32>,
}

/// The store-authoritative mapping from roll-number string to scores. Every
/// store response fully replaces the previous view; nothing is merged or
/// retained between renders.
pub type MarksDataset = HashMap<String, StudentMarks>;

/// One display row: question cells already formatted (placeholder `-` for an
/// absent score) plus the derived total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRow {
    pub roll_number: String,
    pub q1: String,
    pub q2: String,
    pub q3: String,
    pub q4: String,
    pub total: u32,
}

/// Best of q1/q2 plus best of q3/q4. An absent score counts as 0 for the
/// pairing only; it still renders as the placeholder, never as 0.
pub fn total(marks: &StudentMarks) -> u32 {
    let first_pair = marks.q1.unwrap_or(0).max(marks.q2.unwrap_or(0));
    let second_pair = marks.q3.unwrap_or(0).max(marks.q4.unwrap_or(0));
    // Scores come from the store unvalidated; cap rather than overflow.
    first_pair.saturating_add(second_pair)
}

fn cell(score: Option<u32>) -> String {
    match score {
        Some(n) => n.to_string(),
        None => "-".to_string(),
    }
}

/// Sort key for roll-number strings: ascending numeric value, with lexical
/// order breaking numeric ties ("01" and "1" stay distinct rows). Strings
/// that do not parse as a number sort after all numeric ones, lexically.
fn sort_key(roll: &str) -> (u8, u64, &str) {
    match roll.parse::<u64>() {
        Ok(n) => (0, n, roll),
        Err(_) => (1, 0, roll),
    }
}

/// Derive the full replacement row set for a dataset. Pure function of its
/// input: rendering the same dataset twice yields the same rows.
pub fn render_rows(dataset: &MarksDataset) -> Vec<DerivedRow> {
    let mut entries: Vec<(&String, &StudentMarks)> = dataset.iter().collect();
    entries.sort_by(|a, b| sort_key(a.0).cmp(&sort_key(b.0)));

    entries
        .into_iter()
        .map(|(roll, marks)| DerivedRow {
            roll_number: roll.clone(),
            q1: cell(marks.q1),
            q2: cell(marks.q2),
            q3: cell(marks.q3),
            q4: cell(marks.q4),
            total: total(marks),
        })
        .collect()
}
