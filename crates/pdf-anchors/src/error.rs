use std::path::PathBuf;

use pdfplumber::PdfError;

/// Everything that can stop an extraction run.
#[derive(Debug, thiserror::Error)]
pub enum AnchorError {
    /// The page number was zero or negative.
    #[error("page must be 1 or greater (got {0})")]
    PageTooLow(i128),

    /// The page number is past the end of the document.
    #[error("page {requested} out of range: document has {total} pages")]
    PageOutOfRange { requested: i128, total: usize },

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The PDF could not be read or parsed.
    #[error("failed to open PDF: {0}")]
    Open(#[source] PdfError),

    #[error("failed to read page {page}: {source}")]
    Page {
        page: usize,
        #[source]
        source: PdfError,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl AnchorError {
    /// Process exit code for this error.
    ///
    /// Argument problems exit with 1; anything the PDF library or the
    /// output stream reports exits with 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            AnchorError::PageTooLow(_) | AnchorError::PageOutOfRange { .. } => 1,
            AnchorError::FileNotFound(_)
            | AnchorError::Open(_)
            | AnchorError::Page { .. }
            | AnchorError::Output(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_too_low_message() {
        let err = AnchorError::PageTooLow(0);
        assert_eq!(err.to_string(), "page must be 1 or greater (got 0)");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn out_of_range_names_both_counts() {
        let err = AnchorError::PageOutOfRange {
            requested: 5,
            total: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains('2'));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn library_failures_exit_with_two() {
        let err = AnchorError::Open(PdfError::ParseError("bad xref".to_string()));
        assert!(err.to_string().contains("bad xref"));
        assert_eq!(err.exit_code(), 2);

        let err = AnchorError::FileNotFound(PathBuf::from("/nope.pdf"));
        assert_eq!(err.to_string(), "file not found: /nope.pdf");
        assert_eq!(err.exit_code(), 2);
    }
}
