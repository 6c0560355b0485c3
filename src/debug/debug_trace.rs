use std::fmt;

/// Part of the column view a [`DebugSection`] describes. The declaration
/// order is the order sections appear in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    IndexSpaces,
    IntendedOrder,
    HiddenColumns,
    Selection,
}

impl SectionKind {
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::IndexSpaces => "INDEX SPACES",
            SectionKind::IntendedOrder => "INTENDED ORDER",
            SectionKind::HiddenColumns => "HIDDEN COLUMNS",
            SectionKind::Selection => "SELECTION",
        }
    }
}

/// One titled block of a debug report, kept as lines until rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugSection {
    pub kind: SectionKind,
    pub lines: Vec<String>,
}

impl DebugSection {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
        }
    }

    /// `name: value` line
    pub fn field(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.lines.push(format!("{}: {}", name, value));
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// One indented line per item, a `None` line when there are none
    pub fn items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let before = self.lines.len();
        self.lines
            .extend(items.into_iter().map(|item| format!("  {}", item)));
        if self.lines.len() == before {
            self.lines.push("  None".to_string());
        }
        self
    }
}

impl fmt::Display for DebugSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n========== {} ==========", self.kind.title())?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Something that can describe its state for the debug report
pub trait DebugTrace: Send + Sync {
    fn name(&self) -> &str;

    fn debug_sections(&self) -> Vec<DebugSection>;

    /// Optional one-line summary
    fn debug_summary(&self) -> Option<String> {
        None
    }
}
