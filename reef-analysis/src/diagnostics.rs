#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Warning,
    Note,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub level: DiagnosticLevel,
    pub line: Option<usize>,
}

/// Accumulated, non-fatal observations about a run. The engine never
/// aborts on malformed input; recovery decisions are recorded here.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push_warning<S: Into<String>>(&mut self, message: S, line: Option<usize>) {
        self.entries.push(Diagnostic {
            message: message.into(),
            level: DiagnosticLevel::Warning,
            line,
        });
    }

    pub fn push_note<S: Into<String>>(&mut self, message: S, line: Option<usize>) {
        self.entries.push(Diagnostic {
            message: message.into(),
            level: DiagnosticLevel::Note,
            line,
        });
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }
}
