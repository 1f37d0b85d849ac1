use crate::error::Result;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Layout of a written JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonLayout {
    /// No whitespace, non-ASCII characters written as UTF-8.
    Compact,
    /// `", "` and `": "` separators, every non-ASCII character escaped as `\uXXXX`.
    SpacedAscii,
}

/// Formatter producing `{"a": 1, "b": [1, 2]}` with ASCII-only output.
#[derive(Debug, Default)]
pub struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

pub struct JsonWriter {
    layout: JsonLayout,
}

impl JsonWriter {
    pub fn compact() -> Self {
        Self {
            layout: JsonLayout::Compact,
        }
    }

    pub fn spaced_ascii() -> Self {
        Self {
            layout: JsonLayout::SpacedAscii,
        }
    }

    /// Serialize `value` in this writer's layout
    pub fn to_bytes<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        match self.layout {
            JsonLayout::Compact => {
                let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, CompactFormatter);
                value.serialize(&mut serializer)?;
            }
            JsonLayout::SpacedAscii => {
                let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedAsciiFormatter);
                value.serialize(&mut serializer)?;
            }
        }
        Ok(buffer)
    }

    /// Serialize `value` and atomically replace `path` with it.
    ///
    /// The document is written to a temporary file next to `path` and renamed
    /// into place, so a failure never leaves a partial file behind. Returns
    /// the number of bytes written.
    pub fn write<T: Serialize + ?Sized>(&self, value: &T, path: &Path) -> Result<usize> {
        let bytes = self.to_bytes(value)?;

        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut temp_file = NamedTempFile::new_in(parent)?;
        temp_file.write_all(&bytes)?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(path)?;

        Ok(bytes.len())
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::compact()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_compact_keeps_unicode() -> Result<()> {
        let value = json!({"name": "Zürich", "tags": ["a", "b"]});
        let bytes = JsonWriter::compact().to_bytes(&value)?;
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"name":"Zürich","tags":["a","b"]}"#);
        Ok(())
    }

    #[test]
    fn test_spaced_ascii_layout() -> Result<()> {
        let value = json!({"name": "Zürich", "tags": ["a", "b"], "empty": {}, "none": []});
        let bytes = JsonWriter::spaced_ascii().to_bytes(&value)?;
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"name": "Z\u00fcrich", "tags": ["a", "b"], "empty": {}, "none": []}"#
        );
        Ok(())
    }

    #[test]
    fn test_spaced_ascii_escapes_astral_and_control() -> Result<()> {
        let value = json!(["😀", "tab\there", "\u{7f}"]);
        let bytes = JsonWriter::spaced_ascii().to_bytes(&value)?;
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"["\ud83d\ude00", "tab\there", "\u007f"]"#
        );
        Ok(())
    }

    #[test]
    fn test_reserialization_is_byte_identical() -> Result<()> {
        let value = json!({"EU": {"name": "Europe", "lat": "48.69096", "bbox": {"east": 41.7, "south": 27.6}}});
        for writer in [JsonWriter::compact(), JsonWriter::spaced_ascii()] {
            let first = writer.to_bytes(&value)?;
            let parsed: serde_json::Value = serde_json::from_slice(&first)?;
            assert_eq!(writer.to_bytes(&parsed)?, first);
        }
        Ok(())
    }

    #[test]
    fn test_write_creates_parent_directories() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("out.json");

        let written = JsonWriter::compact().write(&vec![1, 2, 3], &path)?;

        assert_eq!(written, 7);
        assert_eq!(fs::read_to_string(&path)?, "[1,2,3]");
        let leftovers = fs::read_dir(path.parent().unwrap())?.count();
        assert_eq!(leftovers, 1);
        Ok(())
    }
}
