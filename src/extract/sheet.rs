// Rank sheet data model: position groups, parsed player records, and the
// per-extraction diagnostic counters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder for a field the source line did not carry.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Fantasy football position groups recognized in rank sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    DEF,
    K,
}

impl Position {
    /// All position groups, in sheet display order.
    pub const ALL: [Position; 6] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::DEF,
        Position::K,
    ];

    /// Parse a position code string.
    ///
    /// Accepts the common defense aliases "DEF" and "DST".
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "QB" => Some(Position::QB),
            "RB" => Some(Position::RB),
            "WR" => Some(Position::WR),
            "TE" => Some(Position::TE),
            "DEF" | "DST" => Some(Position::DEF),
            "K" => Some(Position::K),
            _ => None,
        }
    }

    /// Return the display string for this position group.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::DEF => "DEF",
            Position::K => "K",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

// ---------------------------------------------------------------------------
// RankedPlayer
// ---------------------------------------------------------------------------

/// One parsed row from a rank sheet.
///
/// `team` and `adp` fall back to [`NOT_AVAILABLE`] when the source line did
/// not carry them. `player_id` is only present when a Sleeper lookup found
/// a match; it is omitted from JSON output otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedPlayer {
    #[serde(rename = "Rank")]
    pub rank: u32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "ADP")]
    pub adp: String,
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
}

// ---------------------------------------------------------------------------
// RankSheet
// ---------------------------------------------------------------------------

/// A fully parsed rank sheet.
///
/// All six position groups are always present, possibly empty, and records
/// within a group keep document order. Serializes as a JSON object with
/// keys exactly `QB, RB, WR, TE, DEF, K`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankSheet {
    #[serde(rename = "QB")]
    pub qb: Vec<RankedPlayer>,
    #[serde(rename = "RB")]
    pub rb: Vec<RankedPlayer>,
    #[serde(rename = "WR")]
    pub wr: Vec<RankedPlayer>,
    #[serde(rename = "TE")]
    pub te: Vec<RankedPlayer>,
    #[serde(rename = "DEF")]
    pub def: Vec<RankedPlayer>,
    #[serde(rename = "K")]
    pub k: Vec<RankedPlayer>,
}

impl RankSheet {
    /// An empty sheet with all six groups present.
    pub fn new() -> Self {
        Self::default()
    }

    /// The records for one position group, in document order.
    pub fn group(&self, pos: Position) -> &[RankedPlayer] {
        match pos {
            Position::QB => &self.qb,
            Position::RB => &self.rb,
            Position::WR => &self.wr,
            Position::TE => &self.te,
            Position::DEF => &self.def,
            Position::K => &self.k,
        }
    }

    /// Mutable access to one position group.
    pub fn group_mut(&mut self, pos: Position) -> &mut Vec<RankedPlayer> {
        match pos {
            Position::QB => &mut self.qb,
            Position::RB => &mut self.rb,
            Position::WR => &mut self.wr,
            Position::TE => &mut self.te,
            Position::DEF => &mut self.def,
            Position::K => &mut self.k,
        }
    }

    /// Append a record to the given position group.
    pub fn push(&mut self, pos: Position, player: RankedPlayer) {
        self.group_mut(pos).push(player);
    }

    /// Total number of records across all groups.
    pub fn len(&self) -> usize {
        Position::ALL.iter().map(|p| self.group(*p).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every record, group by group in display order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RankedPlayer> {
        self.qb
            .iter_mut()
            .chain(self.rb.iter_mut())
            .chain(self.wr.iter_mut())
            .chain(self.te.iter_mut())
            .chain(self.def.iter_mut())
            .chain(self.k.iter_mut())
    }
}

// ---------------------------------------------------------------------------
// ExtractStats
// ---------------------------------------------------------------------------

/// Diagnostic counters for one extraction run.
///
/// Skipped pages and lines are expected with export-tool documents, so they
/// are counted here for the caller to log instead of being raised as errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Pages visited, including ones that yielded no text.
    pub pages_seen: usize,
    /// Pages that yielded no extractable text.
    pub pages_skipped: usize,
    /// Lines visited across all readable pages (or CSV rows visited).
    pub lines_seen: usize,
    /// Lines that produced neither a section switch nor a record.
    pub lines_skipped: usize,
    /// Records appended to the sheet.
    pub records_parsed: usize,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
