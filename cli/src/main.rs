use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use log::LevelFilter;
use mono_dump::batch::output_path;
use mono_dump::{BatchOptions, Indent, KeyStyle, LabelLookup, LabelTable, WriteOptions};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(name = "mono2json", version, about = "MonoBehaviour dump to JSON converter")]
struct Args {
    /// Dump file or directory of dumps. Use '-' to read one dump from stdin.
    #[arg(default_value = "./extract")]
    input: String,

    /// Output directory (stdin input is always written to stdout).
    #[arg(short, long, value_name = "dir", default_value = "./mono")]
    output: String,

    /// JSON indentation size; 0 writes compact JSON.
    #[arg(long, value_name = "number", default_value_t = 2)]
    indent: usize,

    /// Drop the leading underscore of field names.
    #[arg(long)]
    trim_underscore: bool,

    /// TextLabel dump used to resolve strings of a single file or stdin.
    #[arg(long, value_name = "file")]
    labels: Option<PathBuf>,

    /// File name fragment selecting key/value pair parsing in directory mode.
    /// Repeatable; replaces the built-in list.
    #[arg(long = "pair-file", value_name = "name")]
    pair_files: Vec<String>,

    /// Read a single file or stdin as a key/value pair dump.
    #[arg(long)]
    pairs: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(PathBuf),
    Dir(PathBuf),
}

impl InputSource {
    fn from_arg(input: &str) -> Self {
        if input == "-" {
            return InputSource::Stdin;
        }
        let path = PathBuf::from(input);
        if path.is_dir() {
            InputSource::Dir(path)
        } else {
            InputSource::File(path)
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let write_options = WriteOptions::new()
        .with_indent(Indent::Spaces(args.indent))
        .with_key_style(if args.trim_underscore {
            KeyStyle::TrimUnderscore
        } else {
            KeyStyle::Verbatim
        });

    match InputSource::from_arg(&args.input) {
        InputSource::Dir(source) => run_dir(args, &source, write_options),
        InputSource::File(path) => {
            let labels = load_labels(args.labels.as_deref())?;
            let input = fs::read_to_string(&path)?;
            let value = convert_text(args, &input, labels.as_ref())?;
            let destination = Path::new(&args.output);
            fs::create_dir_all(destination)?;
            let target = output_path(&path, destination);
            let mut file = io::BufWriter::new(fs::File::create(&target)?);
            mono_dump::to_json_writer_with_options(&mut file, &value, &write_options)?;
            file.flush()?;
            report_status(&path, &target);
            Ok(())
        }
        InputSource::Stdin => {
            let labels = load_labels(args.labels.as_deref())?;
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            let value = convert_text(args, &input, labels.as_ref())?;
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            mono_dump::to_json_writer_with_options(&mut handle, &value, &write_options)?;
            Ok(())
        }
    }
}

fn run_dir(args: &Args, source: &Path, write_options: WriteOptions) -> Result<(), Box<dyn Error>> {
    if args.labels.is_some() {
        log::warn!("--labels is ignored in directory mode; TextLabel dumps are picked up per directory");
    }
    let mut options = BatchOptions::new().with_write_options(write_options);
    if !args.pair_files.is_empty() {
        options = options.with_pair_files(args.pair_files.iter().cloned());
    }
    let destination = Path::new(&args.output);
    let report = mono_dump::convert_dir(source, destination, &options)?;
    println!(
        "✔ Converted {} files ({} label tables) → {}",
        report.written.len(),
        report.label_files.len(),
        destination.display()
    );
    Ok(())
}

fn load_labels(path: Option<&Path>) -> Result<Option<LabelTable>, Box<dyn Error>> {
    match path {
        Some(path) => {
            let table = mono_dump::read_label_file(path)?;
            log::info!("loaded {} labels from {}", table.len(), path.display());
            Ok(Some(table))
        }
        None => Ok(None),
    }
}

fn convert_text(
    args: &Args,
    input: &str,
    labels: Option<&LabelTable>,
) -> Result<Value, Box<dyn Error>> {
    let value = match (args.pairs, labels) {
        (true, Some(labels)) => Value::Object(mono_dump::parse_pairs_with_labels(
            input.lines(),
            labels as &dyn LabelLookup,
        )?),
        (true, None) => Value::Object(mono_dump::parse_pairs(input.lines())?),
        (false, Some(labels)) => mono_dump::parse_str_with_labels(input, labels)?,
        (false, None) => mono_dump::parse_str(input)?,
    };
    Ok(value)
}

fn report_status(input: &Path, output: &Path) {
    println!("✔ Converted {} → {}", input.display(), output.display());
}
