// Page-oriented text access for rank sheet documents.
//
// The extractor only needs "a sequence of pages, each optionally yielding
// plain text". `PageSource` is that seam; `PdfPages` is the lopdf-backed
// implementation used in production. Tests use `TextPages`.

use std::path::Path;

use lopdf::Document;
use tracing::warn;

// ---------------------------------------------------------------------------
// PageSource
// ---------------------------------------------------------------------------

/// A document readable as a sequence of pages of optional plain text.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Plain text for the page at `index` (0-based), or `None` when the
    /// page yields no extractable text.
    fn page_text(&self, index: usize) -> Option<String>;
}

// ---------------------------------------------------------------------------
// PdfPages (lopdf)
// ---------------------------------------------------------------------------

/// lopdf-backed page source over a PDF file on disk.
pub struct PdfPages {
    doc: Document,
    page_numbers: Vec<u32>,
}

impl PdfPages {
    /// Load a PDF from disk.
    pub fn open(path: &Path) -> Result<Self, lopdf::Error> {
        let doc = Document::load(path)?;
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        Ok(Self { doc, page_numbers })
    }
}

impl PageSource for PdfPages {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Option<String> {
        let number = *self.page_numbers.get(index)?;
        match self.doc.extract_text(&[number]) {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => None,
            Err(e) => {
                warn!("no text extracted from page {number}: {e}");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// TextPages (in-memory)
// ---------------------------------------------------------------------------

/// In-memory page source for fixtures and tests. Each entry is one page;
/// `None` models a page with no extractable text.
pub struct TextPages(pub Vec<Option<String>>);

impl TextPages {
    /// Build from plain string pages, all readable.
    pub fn from_strs(pages: &[&str]) -> Self {
        Self(pages.iter().map(|p| Some(p.to_string())).collect())
    }
}

impl PageSource for TextPages {
    fn page_count(&self) -> usize {
        self.0.len()
    }

    fn page_text(&self, index: usize) -> Option<String> {
        self.0.get(index).cloned().flatten()
    }
}
