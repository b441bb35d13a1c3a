// Line-level classification for rank sheet text.
//
// Every line is exactly one of: a position section header, a player record,
// or noise. Headers win ties: a line containing a section marker never
// yields a record, even when it also happens to match the record pattern.

use regex::Regex;
use std::sync::LazyLock;

use crate::extract::sheet::{Position, NOT_AVAILABLE};

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Section header markers, matched by substring (case-sensitive), checked
/// in this priority order.
const SECTION_MARKERS: [(&str, Position); 6] = [
    ("Quarterbacks", Position::QB),
    ("Running Backs", Position::RB),
    ("Wide Receivers", Position::WR),
    ("Tight Ends", Position::TE),
    ("Defenses", Position::DEF),
    ("Kickers", Position::K),
];

/// Trailing name suffix tokens stripped during normalization.
const NAME_SUFFIXES: [&str; 5] = ["Sr.", "Jr.", "II", "III", "IV"];

// Rank at the start of the line, whitespace, then a name of word
// characters / apostrophes / hyphens / periods / spaces, then an optional
// parenthesized team code and an optional decimal ADP. Anchored at the
// start only; trailing text the pattern does not consume is ignored.
//
// The name class is deliberately permissive and will match numeric-prefixed
// furniture such as "12 of 34" page footers once a section is open. That
// matches the upstream sheet exports we consume today; tightening it is
// pending a decision with the product owner.
static RECORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+([\w\s'\-.]+)\s*\(?(\w+)?\)?\s*([\d.]+)?")
        .expect("record pattern compiles")
});

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Captured fields from a record line, before any id lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub rank: u32,
    pub name: String,
    pub team: String,
    pub adp: String,
}

/// Classification outcome for a single line of sheet text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// A section header; switches the current position group.
    Header(Position),
    /// A player record belonging to the current section.
    Record(RawRecord),
    /// Blank lines, column headings, page furniture.
    Noise,
}

/// Classify one line of sheet text.
pub fn classify(line: &str) -> LineKind {
    for (marker, pos) in SECTION_MARKERS {
        if line.contains(marker) {
            return LineKind::Header(pos);
        }
    }

    let Some(caps) = RECORD_RE.captures(line) else {
        return LineKind::Noise;
    };
    // A rank too large for u32 is not a rank.
    let Ok(rank) = caps[1].parse::<u32>() else {
        return LineKind::Noise;
    };
    let name = normalize_name(&caps[2]);
    let team = caps
        .get(3)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let adp = caps
        .get(4)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    LineKind::Record(RawRecord {
        rank,
        name,
        team,
        adp,
    })
}

/// Normalize a player name: trim whitespace, then drop a single trailing
/// suffix token (Sr., Jr., II, III, IV) if present. Only one suffix is ever
/// stripped.
pub fn normalize_name(name: &str) -> String {
    let name = name.trim();
    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.split_last() {
        Some((last, head)) if NAME_SUFFIXES.contains(last) => head.join(" "),
        _ => name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
