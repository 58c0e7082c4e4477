use memchr::memchr;
use serde_json::{Number, Value};

use super::line::ValueKind;
use crate::labels::LabelLookup;
use crate::{Error, Result};

/// A converted value plus its truthiness, which decides zero suppression.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Converted {
    pub value: Value,
    pub truthy: bool,
}

impl Converted {
    fn new(value: Value, truthy: bool) -> Self {
        Self { value, truthy }
    }
}

pub(crate) fn convert(
    kind: ValueKind,
    raw: &str,
    labels: Option<&dyn LabelLookup>,
) -> Result<Converted> {
    match kind {
        ValueKind::Int | ValueKind::UInt8 => convert_int(raw),
        ValueKind::Float => convert_float(raw),
        ValueKind::String => Ok(convert_string(raw, labels)),
        ValueKind::Inferred => Ok(convert_int(raw)
            .or_else(|_| convert_float(raw))
            .unwrap_or_else(|_| convert_string(raw, labels))),
    }
}

fn convert_int(raw: &str) -> Result<Converted> {
    let text = raw.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Ok(Converted::new(Value::from(value), value != 0));
    }
    if let Ok(value) = text.parse::<u64>() {
        return Ok(Converted::new(Value::from(value), value != 0));
    }
    Err(Error::convert(format!("invalid integer literal: {raw}")))
}

fn convert_float(raw: &str) -> Result<Converted> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::convert(format!("invalid float literal: {raw}")))?;
    let truthy = value != 0.0;
    match Number::from_f64(value) {
        Some(number) => Ok(Converted::new(Value::Number(number), truthy)),
        None => {
            log::warn!("float {raw} has no JSON representation, writing null");
            Ok(Converted::new(Value::Null, truthy))
        }
    }
}

fn convert_string(raw: &str, labels: Option<&dyn LabelLookup>) -> Converted {
    let unquoted = unquote(raw);
    let text = match labels.and_then(|labels| labels.lookup(&unquoted)) {
        Some(label) => label.to_string(),
        None => unquoted,
    };
    let truthy = !text.is_empty();
    Converted::new(Value::String(text), truthy)
}

/// Removes every `"` from the text, not just the surrounding pair.
pub(crate) fn unquote(raw: &str) -> String {
    if memchr(b'"', raw.as_bytes()).is_none() {
        return raw.to_string();
    }
    raw.replace('"', "")
}
