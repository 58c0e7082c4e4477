#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
}

impl Indent {
    pub fn spaces(count: usize) -> Self {
        Indent::Spaces(count)
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(2)
    }
}

/// How field names are written to JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStyle {
    #[default]
    Verbatim,
    /// Drop one leading `_` from every object key (`_Foo` becomes `Foo`).
    TrimUnderscore,
}

#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    pub indent: Indent,
    pub key_style: KeyStyle,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_key_style(mut self, key_style: KeyStyle) -> Self {
        self.key_style = key_style;
        self
    }
}

pub const DEFAULT_PAIR_FILES: [&str; 3] = [
    "AbilityGroup",
    "AchievementGameCenter",
    "AchievementGooglePlay",
];

pub const LABEL_FILE_MARKER: &str = "TextLabel";

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub write: WriteOptions,
    /// File name fragments selecting key/value pair parsing.
    pub pair_files: Vec<String>,
}

impl BatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_write_options(mut self, write: WriteOptions) -> Self {
        self.write = write;
        self
    }

    pub fn with_pair_files<I, S>(mut self, pair_files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pair_files = pair_files.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn is_pair_file(&self, file_name: &str) -> bool {
        self.pair_files
            .iter()
            .any(|fragment| file_name.contains(fragment.as_str()))
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            write: WriteOptions::default(),
            pair_files: DEFAULT_PAIR_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
