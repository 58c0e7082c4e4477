//! Converts Unity MonoBehaviour text dumps into nested JSON trees.
//!
//! A dump is a flat list of typed assignments (`int _Id = 3`), array blocks
//! (`vector _Rates` followed by `size`/`data` lines) and `[n]` index markers
//! whose tab depth positions the following assignments in the output tree.

pub mod batch;
pub mod decode;
pub mod encode;
pub mod error;
pub mod json;
pub mod labels;
pub mod num;
pub mod options;

mod parallel;

use std::io::{BufRead, Write};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub use crate::batch::{convert_dir, convert_file, read_label_file, BatchReport};
pub use crate::encode::to_dump_string;
pub use crate::error::{Error, ErrorKind, Location};
pub use crate::labels::{LabelLookup, LabelTable};
pub use crate::options::{BatchOptions, Indent, KeyStyle, WriteOptions};

pub type Result<T> = std::result::Result<T, Error>;

pub fn parse_str(input: &str) -> Result<Value> {
    decode::parse_str(input, None)
}

pub fn parse_str_with_labels(input: &str, labels: &dyn LabelLookup) -> Result<Value> {
    decode::parse_str(input, Some(labels))
}

pub fn parse_lines<I, S>(lines: I) -> Result<Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    decode::parse_lines(lines, None)
}

pub fn parse_lines_with_labels<I, S>(lines: I, labels: &dyn LabelLookup) -> Result<Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    decode::parse_lines(lines, Some(labels))
}

pub fn parse_reader<R: BufRead>(reader: R) -> Result<Value> {
    decode::parse_reader(reader, None)
}

pub fn parse_reader_with_labels<R: BufRead>(reader: R, labels: &dyn LabelLookup) -> Result<Value> {
    decode::parse_reader(reader, Some(labels))
}

/// Reads a key/value pair dump keyed by `_Id` fields.
///
/// Values before the first `_Id` are dropped with a warning; see
/// [`decode::parse_pairs`].
pub fn parse_pairs<I, S>(lines: I) -> Result<Map<String, Value>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    decode::parse_pairs(lines, None)
}

pub fn parse_pairs_with_labels<I, S>(lines: I, labels: &dyn LabelLookup) -> Result<Map<String, Value>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    decode::parse_pairs(lines, Some(labels))
}

pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T> {
    decode::from_str(input, None)
}

pub fn from_str_with_labels<T: DeserializeOwned>(input: &str, labels: &dyn LabelLookup) -> Result<T> {
    decode::from_str(input, Some(labels))
}

pub fn to_json_string(value: &Value) -> Result<String> {
    to_json_string_with_options(value, &WriteOptions::default())
}

pub fn to_json_string_with_options(value: &Value, options: &WriteOptions) -> Result<String> {
    json::to_json_string(value, options)
}

pub fn to_json_writer<W: Write>(writer: W, value: &Value) -> Result<()> {
    to_json_writer_with_options(writer, value, &WriteOptions::default())
}

pub fn to_json_writer_with_options<W: Write>(
    writer: W,
    value: &Value,
    options: &WriteOptions,
) -> Result<()> {
    json::to_json_writer(writer, value, options)
}
