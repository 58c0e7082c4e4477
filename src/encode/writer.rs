use crate::decode::line::{ValueKind, ARRAY_KEYWORD, ASSIGN};

/// Line-oriented buffer for dump text. Indentation is one tab per level.
pub(crate) struct Writer {
    buffer: String,
    indent_cache: Vec<String>,
}

impl Writer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_cache: vec![String::new()],
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self, depth: usize) {
        if depth == 0 {
            return;
        }
        while depth >= self.indent_cache.len() {
            let next = "\t".repeat(self.indent_cache.len());
            self.indent_cache.push(next);
        }
        self.buffer.push_str(&self.indent_cache[depth]);
    }

    fn start_line(&mut self, depth: usize) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.write_indent(depth);
    }

    pub fn write_marker(&mut self, depth: usize, index: u64) {
        self.start_line(depth);
        let mut buffer = itoa::Buffer::new();
        self.buffer.push('[');
        self.buffer.push_str(buffer.format(index));
        self.buffer.push(']');
    }

    pub fn write_assignment(&mut self, depth: usize, kind: ValueKind, name: &str, text: &str) {
        self.start_line(depth);
        self.buffer.push_str(kind.as_str());
        self.buffer.push(' ');
        self.buffer.push_str(name);
        self.buffer.push_str(ASSIGN);
        self.buffer.push_str(text);
    }

    pub fn write_array_header(&mut self, depth: usize, name: &str, len: usize) {
        self.start_line(depth);
        self.buffer.push_str(ARRAY_KEYWORD);
        self.buffer.push_str(name);
        let mut buffer = itoa::Buffer::new();
        self.write_assignment(depth + 1, ValueKind::Int, "size", buffer.format(len));
    }
}
