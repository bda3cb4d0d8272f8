use std::path::Path;

use pdfplumber::{Page, Pdf, WordOptions};
use serde::Serialize;
use tracing::{debug, info};

use crate::anchor::{Anchor, Glyph, build_anchor};
use crate::cli::Origin;
use crate::error::AnchorError;

/// The JSON document printed for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageAnchors {
    pub page: usize,
    pub items: Vec<Anchor>,
}

/// Settings for a single extraction run.
#[derive(Debug, Clone)]
pub struct ExtractSettings {
    pub words: WordOptions,
    pub origin: Origin,
    pub password: Option<String>,
}

/// Open a PDF file, mapping library failures onto [`AnchorError`].
pub fn open_pdf(file: &Path, password: Option<&str>) -> Result<Pdf, AnchorError> {
    if !file.exists() {
        return Err(AnchorError::FileNotFound(file.to_path_buf()));
    }

    let pdf = match password {
        Some(pw) => Pdf::open_file_with_password(file, pw.as_bytes(), None),
        None => Pdf::open_file(file, None),
    }
    .map_err(AnchorError::Open)?;

    info!(path = %file.display(), pages = pdf.page_count(), "opened document");
    Ok(pdf)
}

/// Check a 1-based page number against the document and return its 0-based index.
pub fn select_page(page: i128, page_count: usize) -> Result<usize, AnchorError> {
    if page < 1 {
        return Err(AnchorError::PageTooLow(page));
    }
    match usize::try_from(page) {
        Ok(n) if n <= page_count => Ok(n - 1),
        _ => Err(AnchorError::PageOutOfRange {
            requested: page,
            total: page_count,
        }),
    }
}

/// Build anchors for every word on `page`, in the order the word extractor yields them.
pub fn extract_page_items(page: &Page, words: &WordOptions, origin: Origin) -> Vec<Anchor> {
    let height = page.height();
    let extracted = page.extract_words(words);

    let items: Vec<Anchor> = extracted
        .iter()
        .filter_map(|word| {
            let glyphs: Vec<Glyph<'_>> = word
                .chars
                .iter()
                .map(|ch| Glyph::from_char(ch, origin, height))
                .collect();
            build_anchor(&glyphs)
        })
        .collect();

    debug!(
        page = page.page_number() + 1,
        words = extracted.len(),
        anchors = items.len(),
        "extracted anchors"
    );
    items
}

/// Open `file`, validate `page`, and collect its anchors.
///
/// The document is dropped before returning, on success and on every error.
pub fn run(file: &Path, page: i128, settings: &ExtractSettings) -> Result<PageAnchors, AnchorError> {
    let pdf = open_pdf(file, settings.password.as_deref())?;
    let index = select_page(page, pdf.page_count())?;

    let handle = pdf.page(index).map_err(|source| AnchorError::Page {
        page: index + 1,
        source,
    })?;
    let items = extract_page_items(&handle, &settings.words, settings.origin);

    Ok(PageAnchors {
        page: index + 1,
        items,
    })
}
