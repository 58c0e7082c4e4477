use std::borrow::Cow;
use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Error, Indent, KeyStyle, Result, WriteOptions};

pub fn to_json_string(value: &Value, options: &WriteOptions) -> Result<String> {
    let mut out = Vec::new();
    to_json_writer(&mut out, value, options)?;
    String::from_utf8(out).map_err(|err| Error::encode(format!("invalid utf-8: {err}")))
}

/// Writes `value` as JSON. Keys keep insertion order and non-ASCII text is
/// written as-is.
pub fn to_json_writer<W: Write>(writer: W, value: &Value, options: &WriteOptions) -> Result<()> {
    let value = match options.key_style {
        KeyStyle::Verbatim => Cow::Borrowed(value),
        KeyStyle::TrimUnderscore => Cow::Owned(trim_keys(value)),
    };

    let Indent::Spaces(indent) = options.indent;
    let result = if indent == 0 {
        serde_json::to_writer(writer, value.as_ref())
    } else {
        let indent_bytes = vec![b' '; indent];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        value.as_ref().serialize(&mut serializer)
    };
    result.map_err(|err| Error::io(format!("write failed: {err}")))
}

fn trim_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let trimmed: Map<String, Value> = map
                .iter()
                .map(|(key, value)| {
                    let key = key.strip_prefix('_').unwrap_or(key);
                    (key.to_string(), trim_keys(value))
                })
                .collect();
            Value::Object(trimmed)
        }
        Value::Array(items) => Value::Array(items.iter().map(trim_keys).collect()),
        other => other.clone(),
    }
}
