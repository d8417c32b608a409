use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// One fixed sentence shape: an introducer drawn from common phonetic
/// misrecognitions of "roll", an optional "number", the roll number, a
/// question introducer, a single question digit 1-4, the raw score, and an
/// optional trailing "marks". Separators are one-or-more whitespace; the
/// match may start anywhere in the utterance.
static MARK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:roll|role|rol|rule|rel)(?:\s+number)?\s+(\d+)\s+(?:question|q)\s+([1-4])\s+(\d+)(?:\s+marks?)?",
    )
    .expect("mark pattern compiles")
});

/// A single parsed (roll, question, score) update request. Transient: flows
/// from the parser straight into the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkEntry {
    pub roll_number: String,
    pub question: u8,
    pub marks: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Entry(MarkEntry),
    /// Pattern matched but the score is outside 0..=10 (or too large to
    /// parse at all). Distinct from a plain no-match.
    InvalidMarks { raw: String },
    Unrecognized,
}

pub fn parse_utterance(utterance: &str) -> ParseOutcome {
    let Some(caps) = MARK_PATTERN.captures(utterance) else {
        return ParseOutcome::Unrecognized;
    };

    // Captured as a string on purpose: "04" stays "04".
    let roll_number = caps[1].to_string();

    let question: u8 = match &caps[2] {
        "1" => 1,
        "2" => 2,
        "3" => 3,
        "4" => 4,
        _ => return ParseOutcome::Unrecognized,
    };

    match caps[3].parse::<u32>() {
        Ok(marks) if marks <= 10 => ParseOutcome::Entry(MarkEntry {
            roll_number,
            question,
            marks,
        }),
        _ => ParseOutcome::InvalidMarks {
            raw: caps[3].to_string(),
        },
    }
}
