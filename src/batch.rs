//! Directory conversion of extracted `.mono` dumps into `.json` files.

use std::collections::BTreeMap;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde_json::Value;
use walkdir::WalkDir;

use crate::decode::{parse_pairs, parse_reader};
use crate::json::to_json_writer;
use crate::labels::{LabelLookup, LabelTable};
use crate::options::LABEL_FILE_MARKER;
use crate::parallel::map_files;
use crate::{BatchOptions, Error, Result, WriteOptions};

pub const DUMP_EXTENSION: &str = "mono";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Label tables read, in conversion order.
    pub label_files: Vec<PathBuf>,
    /// Every JSON file written, label tables included.
    pub written: Vec<PathBuf>,
}

/// Converts every dump under `source` into `destination`.
///
/// Files are handled one directory at a time. `TextLabel` dumps of a directory
/// are read first and resolve string values of the remaining dumps in that
/// directory only. Several label dumps in one directory are merged in file
/// name order, later keys winning, where the reference converter kept only
/// the last table.
pub fn convert_dir(source: &Path, destination: &Path, options: &BatchOptions) -> Result<BatchReport> {
    let mut directories: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|err| Error::io(format!("walk failed: {err}")))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let dir = entry.path().parent().unwrap_or(source).to_path_buf();
        directories.entry(dir).or_default().push(entry.into_path());
    }

    fs::create_dir_all(destination).map_err(|err| Error::from(err).in_file(destination))?;

    let mut report = BatchReport::default();
    for (dir, files) in &directories {
        log::debug!("converting {} ({} files)", dir.display(), files.len());
        let labels = read_labels(files, destination, options, &mut report)?;

        let dumps: Vec<&PathBuf> = files
            .iter()
            .filter(|path| has_dump_extension(path) && !is_label_file(path))
            .collect();
        let results = map_files(&dumps, |path| {
            convert_dump(path, destination, labels.as_ref(), options)
        });
        for written in results {
            report.written.push(written?);
        }
    }
    Ok(report)
}

/// Converts one tree dump into `<destination>/<stem>.json`, creating
/// `destination` when missing.
pub fn convert_file(
    input: &Path,
    destination: &Path,
    labels: Option<&dyn LabelLookup>,
    options: &WriteOptions,
) -> Result<PathBuf> {
    let value = read_tree(input, labels)?;
    fs::create_dir_all(destination).map_err(|err| Error::from(err).in_file(destination))?;
    write_output(input, destination, &value, options)
}

/// Reads a `TextLabel` style pair dump into a label table.
pub fn read_label_file(path: &Path) -> Result<LabelTable> {
    let pairs = read_pairs(path, None)?;
    Ok(LabelTable::from_pairs(&pairs))
}

fn read_labels(
    files: &[PathBuf],
    destination: &Path,
    options: &BatchOptions,
    report: &mut BatchReport,
) -> Result<Option<LabelTable>> {
    let mut labels: Option<LabelTable> = None;
    for path in files.iter().filter(|path| is_label_file(path)) {
        log::info!("{}", display_name(path));
        let pairs = read_pairs(path, None)?;
        labels
            .get_or_insert_with(LabelTable::new)
            .extend_from_pairs(&pairs);
        let written = write_output(path, destination, &Value::Object(pairs), &options.write)?;
        report.label_files.push(path.clone());
        report.written.push(written);
    }
    Ok(labels)
}

fn convert_dump(
    path: &Path,
    destination: &Path,
    labels: Option<&LabelTable>,
    options: &BatchOptions,
) -> Result<PathBuf> {
    log::info!("{}", display_name(path));
    let labels = labels.map(|table| table as &dyn LabelLookup);
    let value = if options.is_pair_file(&display_name(path)) {
        Value::Object(read_pairs(path, labels)?)
    } else {
        read_tree(path, labels)?
    };
    write_output(path, destination, &value, &options.write)
}

fn read_tree(path: &Path, labels: Option<&dyn LabelLookup>) -> Result<Value> {
    let file = fs::File::open(path).map_err(|err| Error::from(err).in_file(path))?;
    parse_reader(BufReader::new(file), labels).map_err(|err| err.in_file(path))
}

fn read_pairs(
    path: &Path,
    labels: Option<&dyn LabelLookup>,
) -> Result<serde_json::Map<String, Value>> {
    let text = fs::read_to_string(path).map_err(|err| Error::from(err).in_file(path))?;
    parse_pairs(text.lines(), labels).map_err(|err| err.in_file(path))
}

fn write_output(
    input: &Path,
    destination: &Path,
    value: &Value,
    options: &WriteOptions,
) -> Result<PathBuf> {
    let target = output_path(input, destination);
    let file = fs::File::create(&target).map_err(|err| Error::from(err).in_file(&target))?;
    let mut writer = std::io::BufWriter::new(file);
    to_json_writer(&mut writer, value, options).map_err(|err| err.in_file(&target))?;
    std::io::Write::flush(&mut writer).map_err(|err| Error::from(err).in_file(&target))?;
    Ok(target)
}

/// `<destination>/<file name with a .json extension>`.
pub fn output_path(input: &Path, destination: &Path) -> PathBuf {
    let name = input.file_name().map(Path::new).unwrap_or(input);
    destination.join(name.with_extension("json"))
}

fn is_label_file(path: &Path) -> bool {
    display_name(path).contains(LABEL_FILE_MARKER)
}

fn has_dump_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == DUMP_EXTENSION)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
