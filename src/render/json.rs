//! JSON rendering of ranking output and requests.

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};

/// Indentation used for pretty output.
const PRETTY_INDENT: &[u8] = b"    ";

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Four-space indented JSON
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a value to a JSON string.
pub fn to_json<T: Serialize + ?Sized>(output: &T, format: JsonFormat) -> Result<String> {
    let mut buf = Vec::new();
    write_json(&mut buf, output, format)?;
    String::from_utf8(buf).map_err(|e| Error::Render(format!("JSON is not UTF-8: {}", e)))
}

/// Write a value as JSON.
pub fn write_json<W, T>(writer: W, output: &T, format: JsonFormat) -> Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    let result = match format {
        JsonFormat::Pretty => {
            let formatter = PrettyFormatter::with_indent(PRETTY_INDENT);
            let mut ser = Serializer::with_formatter(writer, formatter);
            output.serialize(&mut ser)
        }
        JsonFormat::Compact => serde_json::to_writer(writer, output),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
