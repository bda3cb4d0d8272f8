use pdfplumber::Char;
use serde::{Serialize, Serializer};

use crate::cli::Origin;

/// A borrowed view of one extracted character.
///
/// Attributes the PDF did not provide are `None` rather than placeholder
/// values, so they can be left out of the font/size tallies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph<'a> {
    pub text: &'a str,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub fontname: Option<&'a str>,
    pub size: Option<f64>,
}

impl<'a> Glyph<'a> {
    /// View a pdfplumber character in the given vertical convention.
    ///
    /// pdfplumber stores boxes in top-left page space; with
    /// [`Origin::Bottom`] the vertical extent is flipped against
    /// `page_height` to get PDF user-space `y0`/`y1`.
    pub fn from_char(ch: &'a Char, origin: Origin, page_height: f64) -> Self {
        let (y0, y1) = match origin {
            Origin::Bottom => (page_height - ch.bbox.bottom, page_height - ch.bbox.top),
            Origin::Top => (ch.bbox.top, ch.bbox.bottom),
        };
        let fontname = Some(ch.fontname.as_str()).filter(|name| !name.is_empty());
        let size = Some(ch.size).filter(|s| s.is_finite() && *s > 0.0);

        Self {
            text: &ch.text,
            x0: ch.bbox.x0,
            x1: ch.bbox.x1,
            y0,
            y1,
            fontname,
            size,
        }
    }
}

/// A word's bounding box and dominant font, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anchor {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub font: String,
    #[serde(serialize_with = "serialize_size")]
    pub size: f64,
}

/// A word without size data reports the integer `0`, not `0.0`.
fn serialize_size<S: Serializer>(size: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if *size == 0.0 {
        serializer.serialize_u8(0)
    } else {
        serializer.serialize_f64(*size)
    }
}

/// Aggregate a word's glyphs into an [`Anchor`].
///
/// Returns `None` for an empty slice or when the joined text is blank.
/// The box is the min/max envelope of every glyph; `font` and `size` are
/// the most frequent values, with ties going to the one seen first.
pub fn build_anchor(glyphs: &[Glyph<'_>]) -> Option<Anchor> {
    let first = glyphs.first()?;

    let joined: String = glyphs.iter().map(|g| g.text).collect();
    let text = joined.trim();
    if text.is_empty() {
        return None;
    }

    let mut x0 = first.x0;
    let mut x1 = first.x1;
    let mut y0 = first.y0;
    let mut y1 = first.y1;
    for g in &glyphs[1..] {
        x0 = x0.min(g.x0);
        x1 = x1.max(g.x1);
        y0 = y0.min(g.y0);
        y1 = y1.max(g.y1);
    }

    let font = most_common(glyphs.iter().filter_map(|g| g.fontname))
        .unwrap_or_default()
        .to_string();
    let size = most_common(glyphs.iter().filter_map(|g| g.size)).unwrap_or(0.0);

    Some(Anchor {
        text: text.to_string(),
        x: round2(x0),
        y: round2(y0),
        w: round2(x1 - x0),
        h: round2(y1 - y0),
        font,
        size: round2(size),
    })
}

/// Most frequent value; on equal counts the earliest value wins.
///
/// Words are short, so a linear tally keeps first-seen order without
/// needing `Hash` (which `f64` lacks).
fn most_common<T: PartialEq + Copy>(values: impl IntoIterator<Item = T>) -> Option<T> {
    let mut tally: Vec<(T, usize)> = Vec::new();
    for value in values {
        match tally.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => tally.push((value, 1)),
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in tally {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Round to two decimal places, half away from zero.
///
/// Exact half-cents round up in magnitude (`0.125` becomes `0.13`), so
/// they can differ from banker's rounding in older captures.
pub(crate) fn round2(value: f64) -> f64 {
    // `+ 0.0` folds -0.0 into 0.0 so serialized output is stable.
    (value * 100.0).round() / 100.0 + 0.0
}
