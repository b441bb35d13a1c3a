// Rank sheet extraction: turns tier sheet documents (PDF or CSV exports)
// into position-grouped player rankings.
//
// A bad document is never an error. Extraction degrades to whatever was
// parsed before the failure point, and the diagnostic counters record what
// was skipped along the way.

pub mod csv;
pub mod line;
pub mod pdf;
pub mod sheet;

use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::extract::line::LineKind;
use crate::extract::pdf::PageSource;
use crate::extract::sheet::{ExtractStats, Position, RankSheet, RankedPlayer};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// The one failure visible to callers: a sheet in a format we do not
/// handle at all. Everything else degrades to a partial or empty sheet.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("unsupported sheet format: {path} (only .csv and .pdf are supported)")]
    UnsupportedFormat { path: String },
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// A parsed sheet plus the diagnostic counters for the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub sheet: RankSheet,
    pub stats: ExtractStats,
}

/// Parse a rank sheet document, dispatching on the file extension.
///
/// `.pdf` and `.csv` are recognized (case-insensitive); anything else is
/// [`SheetError::UnsupportedFormat`].
pub fn extract_from_path(path: &Path) -> Result<Extraction, SheetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => Ok(extract_pdf(path)),
        Some("csv") => Ok(csv::load_sheet(path)),
        _ => Err(SheetError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// Open a PDF and run the page/line pass. A document that cannot be loaded
/// at all degrades to an empty sheet.
fn extract_pdf(path: &Path) -> Extraction {
    match pdf::PdfPages::open(path) {
        Ok(pages) => extract_from_pages(&pages),
        Err(e) => {
            warn!("cannot open rank sheet {}: {e}", path.display());
            Extraction::default()
        }
    }
}

/// Single linear pass over a page source, in document order.
///
/// The only parse state is the current section: a header marker switches
/// it, record lines land in it, and lines seen before the first header are
/// dropped. Pages with no extractable text are skipped and counted.
pub fn extract_from_pages<S: PageSource>(source: &S) -> Extraction {
    let mut sheet = RankSheet::new();
    let mut stats = ExtractStats::default();
    let mut current_section: Option<Position> = None;

    for index in 0..source.page_count() {
        stats.pages_seen += 1;
        let Some(text) = source.page_text(index) else {
            stats.pages_skipped += 1;
            continue;
        };
        for raw_line in text.lines() {
            stats.lines_seen += 1;
            match line::classify(raw_line) {
                LineKind::Header(pos) => {
                    current_section = Some(pos);
                }
                LineKind::Record(record) => {
                    let Some(section) = current_section else {
                        // Record-shaped line before any section header.
                        stats.lines_skipped += 1;
                        continue;
                    };
                    stats.records_parsed += 1;
                    sheet.push(
                        section,
                        RankedPlayer {
                            rank: record.rank,
                            name: record.name,
                            team: record.team,
                            adp: record.adp,
                            player_id: None,
                        },
                    );
                }
                LineKind::Noise => {
                    stats.lines_skipped += 1;
                }
            }
        }
    }

    Extraction { sheet, stats }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::pdf::TextPages;

    const QB_PAGE: &str = "\
Quarterbacks
1 Patrick Mahomes (KC) 1.2
2 Josh Allen (BUF) 2.4";

    // -- Records land in the section opened by the most recent header --

    #[test]
    fn records_follow_current_section() {
        let pages = TextPages::from_strs(&[
            "Quarterbacks\n1 Patrick Mahomes (KC) 1.2",
            "Running Backs\n1 Christian McCaffrey (SF) 1.1\n2 Bijan Robinson (ATL) 4.2",
        ]);
        let Extraction { sheet, stats } = extract_from_pages(&pages);

        assert_eq!(sheet.group(Position::QB).len(), 1);
        assert_eq!(sheet.group(Position::RB).len(), 2);
        assert_eq!(sheet.group(Position::QB)[0].name, "Patrick Mahomes");
        assert_eq!(sheet.group(Position::QB)[0].team, "KC");
        assert_eq!(sheet.group(Position::QB)[0].adp, "1.2");
        assert_eq!(sheet.group(Position::RB)[1].name, "Bijan Robinson");
        assert_eq!(stats.records_parsed, 3);
    }

    // -- A section stays open across page boundaries --

    #[test]
    fn section_persists_across_pages() {
        let pages = TextPages::from_strs(&[
            "Wide Receivers\n1 Justin Jefferson (MIN) 2.0",
            "2 Ja'Marr Chase (CIN) 3.1",
        ]);
        let Extraction { sheet, .. } = extract_from_pages(&pages);
        assert_eq!(sheet.group(Position::WR).len(), 2);
        assert_eq!(sheet.group(Position::WR)[1].name, "Ja'Marr Chase");
    }

    // -- Lines before the first header never produce records --

    #[test]
    fn records_before_first_header_dropped() {
        let pages = TextPages::from_strs(&[
            "1 Patrick Mahomes (KC) 1.2\nQuarterbacks\n2 Josh Allen (BUF) 2.4",
        ]);
        let Extraction { sheet, stats } = extract_from_pages(&pages);
        assert_eq!(sheet.group(Position::QB).len(), 1);
        assert_eq!(sheet.group(Position::QB)[0].name, "Josh Allen");
        assert_eq!(stats.records_parsed, 1);
        assert_eq!(stats.lines_skipped, 1);
    }

    // -- A header line never doubles as a record --

    #[test]
    fn header_line_yields_no_record() {
        let pages = TextPages::from_strs(&["Quarterbacks\n40 Quarterbacks\n1 Patrick Mahomes (KC) 1.2"]);
        let Extraction { sheet, .. } = extract_from_pages(&pages);
        assert_eq!(sheet.group(Position::QB).len(), 1);
        assert_eq!(sheet.group(Position::QB)[0].name, "Patrick Mahomes");
    }

    // -- Unreadable pages are skipped and counted --

    #[test]
    fn unreadable_pages_skipped() {
        let pages = TextPages(vec![
            Some(QB_PAGE.to_string()),
            None,
            Some("Kickers\n1 Justin Tucker".to_string()),
        ]);
        let Extraction { sheet, stats } = extract_from_pages(&pages);
        assert_eq!(stats.pages_seen, 3);
        assert_eq!(stats.pages_skipped, 1);
        assert_eq!(sheet.group(Position::QB).len(), 2);
        assert_eq!(sheet.group(Position::K).len(), 1);
    }

    // -- All groups present even when the document covers only one --

    #[test]
    fn untouched_groups_stay_empty() {
        let pages = TextPages::from_strs(&[QB_PAGE]);
        let Extraction { sheet, .. } = extract_from_pages(&pages);
        assert_eq!(sheet.group(Position::QB).len(), 2);
        for pos in [
            Position::RB,
            Position::WR,
            Position::TE,
            Position::DEF,
            Position::K,
        ] {
            assert!(sheet.group(pos).is_empty());
        }
    }

    // -- Duplicate and gapped ranks recorded as printed --

    #[test]
    fn ranks_recorded_as_printed() {
        let pages = TextPages::from_strs(&[
            "Tight Ends\n1 Travis Kelce (KC) 12.0\n1 Sam LaPorta (DET) 20.1\n9 Mark Andrews (BAL) 33.3",
        ]);
        let Extraction { sheet, .. } = extract_from_pages(&pages);
        let ranks: Vec<u32> = sheet.group(Position::TE).iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1, 1, 9]);
    }

    // -- Extension dispatch --

    #[test]
    fn unsupported_extension_rejected() {
        let err = extract_from_path(Path::new("sheet.xlsx")).unwrap_err();
        assert!(matches!(err, SheetError::UnsupportedFormat { .. }));
    }

    #[test]
    fn missing_pdf_degrades_to_empty_sheet() {
        let Extraction { sheet, stats } =
            extract_from_path(Path::new("does-not-exist.pdf")).unwrap();
        assert!(sheet.is_empty());
        assert_eq!(stats.pages_seen, 0);
    }
}
