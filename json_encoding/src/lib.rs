use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;

/// How non-ASCII characters are rendered inside JSON strings.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Every non-ASCII character becomes a `\uXXXX` escape (surrogate pairs above the BMP).
    #[default]
    #[serde(alias = "ascii-safe", alias = "ascii_safe")]
    Ascii,
    /// Non-ASCII characters are written through as UTF-8.
    Raw,
}

impl Encoding {
    pub fn label(self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Raw => "raw",
        }
    }
}

/// Single-line formatter using `", "` and `": "` separators.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpacedFormatter {
    encoding: Encoding,
}

impl SpacedFormatter {
    pub fn new(encoding: Encoding) -> Self {
        Self { encoding }
    }
}

impl Formatter for SpacedFormatter {
    #[inline]
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    #[inline]
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    #[inline]
    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if self.encoding == Encoding::Raw || !fragment.chars().any(needs_ascii_escape) {
            return writer.write_all(fragment.as_bytes());
        }
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if !needs_ascii_escape(ch) {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Non-ASCII characters and DEL are escaped in ASCII mode.
#[inline]
fn needs_ascii_escape(ch: char) -> bool {
    !ch.is_ascii() || ch == '\x7f'
}

/// Serialize `value` into `writer` as a single JSON line (no trailing newline).
pub fn to_writer<W, T>(writer: W, value: &T, encoding: Encoding) -> serde_json::Result<()>
where
    W: Write,
    T: ?Sized + Serialize,
{
    let mut serializer =
        serde_json::Serializer::with_formatter(writer, SpacedFormatter::new(encoding));
    value.serialize(&mut serializer)
}

pub fn to_vec<T>(value: &T, encoding: Encoding) -> serde_json::Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let mut buffer = Vec::with_capacity(128);
    to_writer(&mut buffer, value, encoding)?;
    Ok(buffer)
}

pub fn to_string<T>(value: &T, encoding: Encoding) -> serde_json::Result<String>
where
    T: ?Sized + Serialize,
{
    let bytes = to_vec(value, encoding)?;
    String::from_utf8(bytes)
        .map_err(|err| serde_json::Error::io(io::Error::new(io::ErrorKind::InvalidData, err)))
}
