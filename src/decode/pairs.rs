use serde_json::{Map, Value};

use super::convert::convert;
use super::line::{classify, LineKind};
use crate::labels::LabelLookup;
use crate::num::number::format_json_number;
use crate::Result;

/// Field that starts a new entry in a key/value pair dump.
pub const ID_FIELD: &str = "_Id";

/// Reads a dump as flat key/value pairs.
///
/// Every `_Id` scalar starts a new key; each following truthy scalar is stored
/// under it, later ones replacing earlier ones. Index markers and arrays are
/// ignored. Values that appear before the first `_Id` are logged and dropped
/// rather than collected under a `"null"` key as the reference converter did.
pub fn parse_pairs<I, S>(lines: I, labels: Option<&dyn LabelLookup>) -> Result<Map<String, Value>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut pairs = Map::new();
    let mut current: Option<String> = None;

    for (idx, line) in lines.into_iter().enumerate() {
        let LineKind::Scalar { kind, name, raw } = classify(line.as_ref().trim()) else {
            continue;
        };
        let converted = convert(kind, raw, labels).map_err(|err| err.at_line(idx + 1))?;
        if name == ID_FIELD {
            current = Some(key_text(&converted.value));
        } else if converted.truthy {
            match current.as_ref() {
                Some(key) => {
                    pairs.insert(key.clone(), converted.value);
                }
                None => log::warn!("line {}: {name} appears before any {ID_FIELD}", idx + 1),
            }
        }
    }

    Ok(pairs)
}

fn key_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => format_json_number(number),
        other => other.to_string(),
    }
}
