// CSV rank sheet loading.
//
// Accepts exported tier sheets with POS, Rank, Name, Team, ADP columns.
// Export tools leave stray whitespace in headers and fields, so everything
// is trimmed, and names are normalized the same way as the PDF path.
// Malformed rows are skipped with a warning rather than failing the load.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::extract::line::normalize_name;
use crate::extract::sheet::{ExtractStats, Position, RankSheet, RankedPlayer, NOT_AVAILABLE};
use crate::extract::Extraction;

/// Raw CSV row. Field names match the sheet's column headers; extra
/// columns are ignored.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawRow {
    POS: String,
    Rank: u32,
    Name: String,
    #[serde(default)]
    Team: String,
    #[serde(default)]
    ADP: String,
}

/// Load a CSV rank sheet from disk. An unreadable file degrades to an
/// empty sheet, same as the PDF path.
pub fn load_sheet(path: &Path) -> Extraction {
    match std::fs::File::open(path) {
        Ok(file) => load_from_reader(file),
        Err(e) => {
            warn!("cannot open rank sheet {}: {e}", path.display());
            Extraction::default()
        }
    }
}

fn load_from_reader<R: Read>(rdr: R) -> Extraction {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut sheet = RankSheet::new();
    let mut stats = ExtractStats::default();

    for result in reader.deserialize::<RawRow>() {
        stats.lines_seen += 1;
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed rank sheet row: {e}");
                stats.lines_skipped += 1;
                continue;
            }
        };
        let Some(pos) = Position::from_str_pos(&raw.POS) else {
            warn!("skipping row for '{}': unknown position '{}'", raw.Name, raw.POS);
            stats.lines_skipped += 1;
            continue;
        };
        stats.records_parsed += 1;
        sheet.push(
            pos,
            RankedPlayer {
                rank: raw.Rank,
                name: normalize_name(&raw.Name),
                team: or_sentinel(raw.Team),
                adp: or_sentinel(raw.ADP),
                player_id: None,
            },
        );
    }

    Extraction { sheet, stats }
}

fn or_sentinel(field: String) -> String {
    if field.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        field
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Basic rows land in their position groups --

    #[test]
    fn rows_grouped_by_position() {
        let csv_data = "\
POS,Rank,Name,Team,ADP
QB,1,Patrick Mahomes,KC,1.2
RB,1,Christian McCaffrey,SF,1.1
QB,2,Josh Allen,BUF,2.4";

        let Extraction { sheet, stats } = load_from_reader(csv_data.as_bytes());
        assert_eq!(sheet.group(Position::QB).len(), 2);
        assert_eq!(sheet.group(Position::RB).len(), 1);
        assert_eq!(sheet.group(Position::QB)[0].name, "Patrick Mahomes");
        assert_eq!(sheet.group(Position::QB)[1].name, "Josh Allen");
        assert_eq!(stats.records_parsed, 3);
        assert_eq!(stats.lines_skipped, 0);
    }

    // -- Whitespace trimmed from headers and fields --

    #[test]
    fn whitespace_trimmed() {
        let csv_data = "\
 POS , Rank , Name , Team , ADP
 QB , 1 ,  Patrick Mahomes  , KC , 1.2 ";

        let Extraction { sheet, .. } = load_from_reader(csv_data.as_bytes());
        let qb = &sheet.group(Position::QB)[0];
        assert_eq!(qb.name, "Patrick Mahomes");
        assert_eq!(qb.team, "KC");
        assert_eq!(qb.adp, "1.2");
    }

    // -- Names normalized like the PDF path --

    #[test]
    fn names_normalized() {
        let csv_data = "\
POS,Rank,Name,Team,ADP
WR,12,Odell Beckham Jr.,BAL,38.5";

        let Extraction { sheet, .. } = load_from_reader(csv_data.as_bytes());
        assert_eq!(sheet.group(Position::WR)[0].name, "Odell Beckham");
    }

    // -- Missing team and ADP fall back to the sentinel --

    #[test]
    fn missing_fields_use_sentinel() {
        let csv_data = "\
POS,Rank,Name,Team,ADP
K,5,Justin Tucker,,";

        let Extraction { sheet, .. } = load_from_reader(csv_data.as_bytes());
        let k = &sheet.group(Position::K)[0];
        assert_eq!(k.team, NOT_AVAILABLE);
        assert_eq!(k.adp, NOT_AVAILABLE);
    }

    // -- Unknown position codes skipped --

    #[test]
    fn unknown_position_skipped() {
        let csv_data = "\
POS,Rank,Name,Team,ADP
QB,1,Patrick Mahomes,KC,1.2
FLEX,2,Somebody Else,DAL,9.9";

        let Extraction { sheet, stats } = load_from_reader(csv_data.as_bytes());
        assert_eq!(sheet.len(), 1);
        assert_eq!(stats.lines_skipped, 1);
    }

    // -- DST alias accepted for defenses --

    #[test]
    fn dst_alias_accepted() {
        let csv_data = "\
POS,Rank,Name,Team,ADP
DST,1,49ers,SF,14.2";

        let Extraction { sheet, .. } = load_from_reader(csv_data.as_bytes());
        assert_eq!(sheet.group(Position::DEF).len(), 1);
    }

    // -- Malformed rank skipped, remaining rows kept --

    #[test]
    fn malformed_rows_skipped() {
        let csv_data = "\
POS,Rank,Name,Team,ADP
QB,1,Patrick Mahomes,KC,1.2
QB,not_a_number,Broken Row,KC,1.2
QB,3,Josh Allen,BUF,2.4";

        let Extraction { sheet, stats } = load_from_reader(csv_data.as_bytes());
        assert_eq!(sheet.group(Position::QB).len(), 2);
        assert_eq!(sheet.group(Position::QB)[1].name, "Josh Allen");
        assert_eq!(stats.lines_skipped, 1);
    }

    // -- Unreadable file degrades to an empty sheet --

    #[test]
    fn missing_file_yields_empty_sheet() {
        let Extraction { sheet, stats } = load_sheet(Path::new("does-not-exist.csv"));
        assert!(sheet.is_empty());
        assert_eq!(stats, ExtractStats::default());
    }
}
