pub mod line;

mod convert;
mod pairs;
mod path;

use std::io::BufRead;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use smol_str::SmolStr;

use self::convert::convert;
use self::line::{classify, tab_depth, ElementSlot, LineKind, ValueKind};
use self::path::Path;
use crate::labels::LabelLookup;
use crate::{Error, Result};

pub use self::pairs::parse_pairs;

pub fn parse_lines<I, S>(lines: I, labels: Option<&dyn LabelLookup>) -> Result<Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut decoder = Decoder::new(labels);
    for (idx, line) in lines.into_iter().enumerate() {
        decoder
            .feed(line.as_ref())
            .map_err(|err| err.at_line(idx + 1))?;
    }
    Ok(decoder.finish())
}

pub fn parse_str(input: &str, labels: Option<&dyn LabelLookup>) -> Result<Value> {
    parse_lines(input.lines(), labels)
}

pub fn parse_reader<R: BufRead>(reader: R, labels: Option<&dyn LabelLookup>) -> Result<Value> {
    let mut decoder = Decoder::new(labels);
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| Error::io(format!("read failed: {err}")).at_line(idx + 1))?;
        decoder.feed(&line).map_err(|err| err.at_line(idx + 1))?;
    }
    Ok(decoder.finish())
}

pub fn from_str<T: DeserializeOwned>(input: &str, labels: Option<&dyn LabelLookup>) -> Result<T> {
    let value = parse_str(input, labels)?;
    serde_json::from_value(value)
        .map_err(|err| Error::deserialize(format!("deserialize failed: {err}")))
}

/// The array currently collecting `data` elements.
#[derive(Debug)]
struct OpenArray {
    name: SmolStr,
    remaining: Option<i64>,
}

/// Single-pass state of one dump parse.
struct Decoder<'l> {
    labels: Option<&'l dyn LabelLookup>,
    open_array: Option<OpenArray>,
    path: Path,
    root: Map<String, Value>,
}

impl<'l> Decoder<'l> {
    fn new(labels: Option<&'l dyn LabelLookup>) -> Self {
        Self {
            labels,
            open_array: None,
            path: Path::new(),
            root: Map::new(),
        }
    }

    fn feed(&mut self, source: &str) -> Result<()> {
        let line = source.trim();
        match classify(line) {
            LineKind::ArrayDecl { name } => {
                self.open_array = Some(OpenArray {
                    name: SmolStr::new(name),
                    remaining: None,
                });
            }
            LineKind::IndexMarker { index } if self.open_array.is_none() => {
                self.path.enter(tab_depth(source), index);
                log::trace!(
                    "index {index} at depth {}",
                    self.path.max_depth().unwrap_or_default()
                );
            }
            LineKind::Scalar { kind, name, raw } => self.assign(kind, name, raw)?,
            LineKind::Element { kind, slot, raw } if self.open_array.is_some() => {
                self.element(kind, slot, raw)?
            }
            _ => log::trace!("skipping line {line:?}"),
        }
        Ok(())
    }

    fn assign(&mut self, kind: ValueKind, name: &str, raw: &str) -> Result<()> {
        self.open_array = None;
        let converted = convert(kind, raw, self.labels)?;
        if converted.truthy || kind == ValueKind::UInt8 {
            self.path
                .node(&mut self.root)
                .insert(name.to_string(), converted.value);
        }
        Ok(())
    }

    fn element(&mut self, kind: ValueKind, slot: ElementSlot, raw: &str) -> Result<()> {
        let converted = convert(kind, raw, self.labels)?;
        let Some(array) = self.open_array.as_mut() else {
            return Ok(());
        };

        match slot {
            ElementSlot::Size => {
                let count = element_count(&converted.value).ok_or_else(|| {
                    Error::array(format!("array {} has an invalid size {raw}", array.name))
                })?;
                array.remaining = Some(count);
            }
            ElementSlot::Data => {
                let Some(remaining) = array.remaining.as_mut() else {
                    return Err(Error::array(format!(
                        "array {} received data before its size",
                        array.name
                    )));
                };
                if self.path.is_empty() {
                    log::debug!("dropping element of {} outside any index", array.name);
                } else {
                    append(self.path.node(&mut self.root), &array.name, converted.value);
                }
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    self.open_array = None;
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> Value {
        Value::Object(self.root)
    }
}

/// Non-negative integral value of a `size` line; float counts such as `2.0`
/// are accepted.
fn element_count(value: &Value) -> Option<i64> {
    if let Some(count) = value.as_i64() {
        return (count >= 0).then_some(count);
    }
    let count = value.as_f64()?;
    let in_range = (0.0..i64::MAX as f64).contains(&count);
    (count.fract() == 0.0 && in_range).then_some(count as i64)
}

fn append(node: &mut Map<String, Value>, name: &str, value: Value) {
    match node.get_mut(name) {
        Some(Value::Array(items)) => items.push(value),
        _ => {
            node.insert(name.to_string(), Value::Array(vec![value]));
        }
    }
}
