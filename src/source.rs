use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Line-terminator convention detected when a file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// One source file held in memory for a single rewrite pass.
///
/// Lines are stored without terminators; the original terminator convention
/// and final-newline presence are restored on render, so an untouched file
/// round-trips byte-identical.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    lines: Vec<String>,
    ending: LineEnding,
    final_newline: bool,
    pub modified: bool,
}

impl SourceFile {
    pub fn parse(path: &Path, content: &str) -> Self {
        let ending = if content.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };
        let final_newline = content.ends_with('\n');

        let mut lines: Vec<String> = content
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        // split() leaves an empty trailing element when the file ends in a newline
        if final_newline {
            lines.pop();
        }

        Self {
            path: path.to_path_buf(),
            lines,
            ending,
            final_newline,
            modified: false,
        }
    }

    pub fn read(path: &Path) -> Result<Self, io::Error> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(path, &content))
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn set_line(&mut self, index: usize, text: String) {
        if self.lines[index] != text {
            self.lines[index] = text;
            self.modified = true;
        }
    }

    /// Whole-file content with LF terminators, for content rules. Content
    /// rules always see and produce LF; the original convention is restored
    /// when the file is rendered.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    pub fn replace_content(&mut self, content: &str) {
        let lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        if lines != self.lines {
            self.lines = lines;
            self.modified = true;
        }
    }

    pub fn render(&self) -> String {
        let mut out = self.lines.join(self.ending.as_str());
        if self.final_newline {
            out.push_str(self.ending.as_str());
        }
        out
    }

    /// Write the file back in place. Callers only invoke this when
    /// `modified` is true; the write is a single whole-file replacement.
    pub fn write(&self) -> Result<(), io::Error> {
        fs::write(&self.path, self.render())
    }
}
