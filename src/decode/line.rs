use memchr::memchr;

/// Declared type of a value in a dump line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    UInt8,
    Float,
    String,
    /// Element line written without a type prefix.
    Inferred,
}

impl ValueKind {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "int" => Some(ValueKind::Int),
            "UInt8" => Some(ValueKind::UInt8),
            "float" => Some(ValueKind::Float),
            "string" => Some(ValueKind::String),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::UInt8 => "UInt8",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Inferred => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementSlot {
    Size,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Unrecognized,
    /// `vector _Name`
    ArrayDecl { name: &'a str },
    /// `[n]`
    IndexMarker { index: u64 },
    /// `<type> _Name = <value>`
    Scalar {
        kind: ValueKind,
        name: &'a str,
        raw: &'a str,
    },
    /// `<type> size = <n>` or `<type> data = <value>`
    Element {
        kind: ValueKind,
        slot: ElementSlot,
        raw: &'a str,
    },
}

pub const ARRAY_KEYWORD: &str = "vector ";
pub const ASSIGN: &str = " = ";

/// Number of leading tab characters of an untrimmed line.
pub fn tab_depth(raw: &str) -> usize {
    raw.bytes().take_while(|&byte| byte == b'\t').count()
}

/// Classifies a trimmed line. Matching is anchored at the start of the line.
pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(rest) = line.strip_prefix(ARRAY_KEYWORD) {
        return match field_name(rest) {
            Some(name) => LineKind::ArrayDecl { name },
            None => LineKind::Unrecognized,
        };
    }

    if line.starts_with('[') {
        return match index_marker(line) {
            Some(index) => LineKind::IndexMarker { index },
            None => LineKind::Unrecognized,
        };
    }

    if let Some(kind) = untyped_element(line) {
        return kind;
    }

    let bytes = line.as_bytes();
    let Some(space) = memchr(b' ', bytes) else {
        return LineKind::Unrecognized;
    };
    let Some(kind) = ValueKind::from_token(&line[..space]) else {
        return LineKind::Unrecognized;
    };
    let rest = &line[space + 1..];

    if let Some(name) = field_name(rest) {
        return match assigned_value(&rest[name.len()..]) {
            Some(raw) => LineKind::Scalar { kind, name, raw },
            None => LineKind::Unrecognized,
        };
    }

    match element(rest) {
        Some((slot, raw)) => LineKind::Element { kind, slot, raw },
        None => LineKind::Unrecognized,
    }
}

/// `_` followed by the longest run of ASCII alphanumerics, at least one.
fn field_name(text: &str) -> Option<&str> {
    let tail = text.strip_prefix('_')?;
    let len = tail
        .bytes()
        .take_while(|byte| byte.is_ascii_alphanumeric())
        .count();
    if len == 0 {
        return None;
    }
    Some(&text[..len + 1])
}

fn index_marker(line: &str) -> Option<u64> {
    let inner = &line[1..];
    let digits = inner.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || inner.as_bytes().get(digits) != Some(&b']') {
        return None;
    }
    inner[..digits].parse().ok()
}

fn assigned_value(text: &str) -> Option<&str> {
    let raw = text.strip_prefix(ASSIGN)?;
    if raw.is_empty() {
        return None;
    }
    Some(raw)
}

fn element(text: &str) -> Option<(ElementSlot, &str)> {
    let (slot, rest) = if let Some(rest) = text.strip_prefix("size") {
        (ElementSlot::Size, rest)
    } else if let Some(rest) = text.strip_prefix("data") {
        (ElementSlot::Data, rest)
    } else {
        return None;
    };
    assigned_value(rest).map(|raw| (slot, raw))
}

fn untyped_element(line: &str) -> Option<LineKind<'_>> {
    if !(line.starts_with("size") || line.starts_with("data")) {
        return None;
    }
    element(line).map(|(slot, raw)| LineKind::Element {
        kind: ValueKind::Inferred,
        slot,
        raw,
    })
}
