//! Renders JSON trees back into the dump line grammar.
//!
//! Objects keyed by decimal indices become `[n]` markers, scalars become
//! typed assignments and arrays of scalars become `vector` blocks. Only trees
//! the parser could have produced are accepted.

mod writer;

use serde::Serialize;
use serde_json::{Map, Value};

use self::writer::Writer;
use crate::decode::line::ValueKind;
use crate::num::number::{format_f64, format_json_number, is_integer};
use crate::{Error, Result};

pub fn to_dump_string<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value)
        .map_err(|err| Error::encode(format!("serialize failed: {err}")))?;
    let Value::Object(root) = &value else {
        return Err(Error::encode("dump root must be an object"));
    };
    let mut writer = Writer::new();
    encode_node(&mut writer, root, 0)?;
    Ok(writer.finish())
}

fn encode_node(writer: &mut Writer, node: &Map<String, Value>, level: usize) -> Result<()> {
    let mut children = Vec::new();

    for (key, value) in node {
        if let Some(index) = index_key(key) {
            match value {
                Value::Object(child) => children.push((index, child)),
                _ => return Err(Error::encode(format!("index {key} must hold an object"))),
            }
            continue;
        }

        if !is_field_name(key) {
            return Err(Error::encode(format!("{key} is not a dump field name")));
        }
        match value {
            Value::Array(items) => {
                if level == 0 {
                    return Err(Error::encode(format!(
                        "array {key} needs an enclosing index"
                    )));
                }
                encode_array(writer, key, items, level)?;
            }
            Value::Object(_) => {
                return Err(Error::encode(format!(
                    "nested object {key} has no dump representation"
                )))
            }
            scalar => {
                let (kind, text) = scalar_text(scalar)?;
                writer.write_assignment(level, kind, key, &text);
            }
        }
    }

    for (index, child) in children {
        writer.write_marker(level, index);
        encode_node(writer, child, level + 1)?;
    }
    Ok(())
}

fn encode_array(writer: &mut Writer, name: &str, items: &[Value], level: usize) -> Result<()> {
    // `size = 0` would leave the array open and swallow the following markers.
    if items.is_empty() {
        return Ok(());
    }
    writer.write_array_header(level, name, items.len());
    for item in items {
        if item.is_array() || item.is_object() {
            return Err(Error::encode(format!("array {name} may only hold scalars")));
        }
        let (kind, text) = scalar_text(item)?;
        writer.write_assignment(level + 1, kind, "data", &text);
    }
    Ok(())
}

fn scalar_text(value: &Value) -> Result<(ValueKind, String)> {
    match value {
        Value::Bool(flag) => Ok((ValueKind::UInt8, if *flag { "1" } else { "0" }.to_string())),
        Value::Number(number) if is_integer(number) => {
            Ok((ValueKind::Int, format_json_number(number)))
        }
        Value::Number(number) => {
            let value = number
                .as_f64()
                .ok_or_else(|| Error::encode(format!("unsupported number {number}")))?;
            Ok((ValueKind::Float, format_f64(value)))
        }
        Value::String(text) => {
            if text.contains(['"', '\n', '\r']) {
                return Err(Error::encode(format!(
                    "string {text:?} cannot be written on one dump line"
                )));
            }
            Ok((ValueKind::String, format!("\"{text}\"")))
        }
        Value::Null => Err(Error::encode("null has no dump representation")),
        Value::Array(_) | Value::Object(_) => {
            Err(Error::encode("nested containers have no dump representation"))
        }
    }
}

/// Canonical decimal keys only, so the index reads back to the same key.
fn index_key(key: &str) -> Option<u64> {
    let index: u64 = key.parse().ok()?;
    let mut buffer = itoa::Buffer::new();
    (buffer.format(index) == key).then_some(index)
}

fn is_field_name(key: &str) -> bool {
    key.strip_prefix('_')
        .is_some_and(|tail| !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_alphanumeric()))
}
