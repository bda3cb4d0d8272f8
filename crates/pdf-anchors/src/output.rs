//! JSON output with two-space indentation and ASCII-only strings.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};

/// Pretty formatter that escapes every non-ASCII character as `\uXXXX`.
///
/// Characters outside the Basic Multilingual Plane are written as UTF-16
/// surrogate pairs.
struct AsciiPrettyFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl AsciiPrettyFormatter<'_> {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for AsciiPrettyFormatter<'_> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Serialize `value` into `writer`, followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> io::Result<()> {
    let mut ser = serde_json::Serializer::with_formatter(&mut *writer, AsciiPrettyFormatter::new());
    value.serialize(&mut ser).map_err(io::Error::from)?;
    writer.write_all(b"\n")
}

#[cfg(test)]
fn to_json_string<T: Serialize + ?Sized>(value: &T) -> io::Result<String> {
    let mut buf = Vec::new();
    write_json(&mut buf, value)?;
    // Output is pure ASCII by construction.
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::Anchor;
    use crate::extract::PageAnchors;

    fn anchor(text: &str) -> Anchor {
        Anchor {
            text: text.to_string(),
            x: 72.0,
            y: 717.52,
            w: 27.34,
            h: 12.0,
            font: "Helvetica".to_string(),
            size: 12.0,
        }
    }

    #[test]
    fn two_space_indentation() {
        let doc = PageAnchors {
            page: 1,
            items: vec![anchor("Hello")],
        };
        let out = to_json_string(&doc).unwrap();
        let expected = "{\n  \"page\": 1,\n  \"items\": [\n    {\n      \"text\": \"Hello\",\n      \"x\": 72.0,\n      \"y\": 717.52,\n      \"w\": 27.34,\n      \"h\": 12.0,\n      \"font\": \"Helvetica\",\n      \"size\": 12.0\n    }\n  ]\n}\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_items_render_as_empty_array() {
        let doc = PageAnchors {
            page: 2,
            items: Vec::new(),
        };
        let out = to_json_string(&doc).unwrap();
        assert_eq!(out, "{\n  \"page\": 2,\n  \"items\": []\n}\n");
    }

    #[test]
    fn missing_size_prints_as_integer() {
        let mut item = anchor("x");
        item.font = String::new();
        item.size = 0.0;
        let out = to_json_string(&item).unwrap();
        assert!(out.contains("\"font\": \"\",\n"));
        assert!(out.ends_with("\"size\": 0\n}\n"));
    }

    #[test]
    fn non_ascii_is_escaped() {
        let out = to_json_string("Café").unwrap();
        assert_eq!(out, "\"Caf\\u00e9\"\n");
    }

    #[test]
    fn astral_chars_become_surrogate_pairs() {
        let out = to_json_string("a\u{1F600}b").unwrap();
        assert_eq!(out, "\"a\\ud83d\\ude00b\"\n");
    }

    #[test]
    fn control_chars_keep_standard_escapes() {
        let out = to_json_string("line\n\"q\"").unwrap();
        assert_eq!(out, "\"line\\n\\\"q\\\"\"\n");
    }

    #[test]
    fn escaped_output_parses_back() {
        let out = to_json_string(&anchor("Größe")).unwrap();
        assert!(out.is_ascii());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["text"], "Größe");
    }
}
