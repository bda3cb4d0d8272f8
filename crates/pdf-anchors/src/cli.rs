use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Print word-level text anchors (position, size, font) of a PDF page as JSON.
#[derive(Debug, Parser)]
#[command(name = "pdf-anchors", about, version)]
pub struct Cli {
    /// Path to the PDF file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Page number, starting at 1
    #[arg(
        value_name = "PAGE",
        default_value_t = 1,
        allow_negative_numbers = true,
        value_parser = parse_page
    )]
    pub page: i128,

    /// Horizontal tolerance for word grouping (default: 3.0)
    #[arg(long, default_value_t = 3.0)]
    pub x_tolerance: f64,

    /// Vertical tolerance for word grouping (default: 3.0)
    #[arg(long, default_value_t = 3.0)]
    pub y_tolerance: f64,

    /// Keep whitespace characters inside words instead of splitting on them
    #[arg(long)]
    pub keep_blank_chars: bool,

    /// Vertical origin used for the `y` coordinate
    #[arg(long, value_enum, default_value_t = Origin::Bottom)]
    pub origin: Origin,

    /// Password for encrypted PDFs
    #[arg(long, env = "PDF_ANCHORS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Vertical coordinate convention for anchor boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Origin {
    /// PDF user space: y grows upward from the bottom edge of the page
    Bottom,
    /// Page space: y grows downward from the top edge of the page
    Top,
}

/// Parse a page argument, saturating numbers too large for `i128`.
///
/// Oversized values still reach page validation, which reports them
/// against the document's page count.
fn parse_page(value: &str) -> Result<i128, String> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid page number: '{value}'"));
    }
    Ok(value.parse::<i128>().unwrap_or(if value.starts_with('-') {
        i128::MIN
    } else {
        i128::MAX
    }))
}
