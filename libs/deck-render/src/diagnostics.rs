use serde::Serialize;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

/// A message reported by the CAD tool or the configuration check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Script line the tool pointed at, when it named one.
    pub line: Option<usize>,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: String) -> Self {
        Self {
            severity,
            message,
            line: None,
            hint: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_hint(mut self, hint: String) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn error(message: String) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: String) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Extracts `ERROR:` and `WARNING:` lines from tool stderr.
///
/// # Examples
/// ```
/// use deck_render::diagnostics::{parse_stderr, Severity};
/// let found = parse_stderr("ERROR: Parser error in file \"a.scad\", line 3: syntax error\n");
/// assert_eq!(found[0].severity, Severity::Error);
/// assert_eq!(found[0].line, Some(3));
/// ```
pub fn parse_stderr(stderr: &str) -> Vec<Diagnostic> {
    stderr
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let (severity, message) = if let Some(rest) = line.strip_prefix("ERROR:") {
                (Severity::Error, rest.trim())
            } else if let Some(rest) = line.strip_prefix("WARNING:") {
                (Severity::Warning, rest.trim())
            } else {
                return None;
            };

            let mut diagnostic = Diagnostic::new(severity, message.to_string());
            if let Some(number) = line_number(message) {
                diagnostic = diagnostic.with_line(number);
            }
            if message.contains("Can't open import file") {
                diagnostic = diagnostic.with_hint("check paths.asset_root".to_string());
            }
            Some(diagnostic)
        })
        .collect()
}

fn line_number(message: &str) -> Option<usize> {
    let (_, rest) = message.rsplit_once("line ")?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
