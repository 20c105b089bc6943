use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    EmptyFile,
    NotInsert,
    Unterminated,
    DuplicateTopicId,
    EmptyName,
    DuplicateName,
    UnbalancedQuotes,
    TooFewStatements,
}

impl FindingKind {
    pub fn severity(self) -> Severity {
        match self {
            Self::DuplicateName | Self::UnbalancedQuotes => Severity::Warning,
            Self::EmptyFile
            | Self::NotInsert
            | Self::Unterminated
            | Self::DuplicateTopicId
            | Self::EmptyName
            | Self::TooFewStatements => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// One-based line number; absent for file-level findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub severity: Severity,
    pub kind: FindingKind,
    pub message: String,
}

impl Finding {
    fn at_line(line: usize, kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            severity: kind.severity(),
            kind,
            message: message.into(),
        }
    }

    fn for_file(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            line: None,
            severity: kind.severity(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Result of scanning one SQL file. The id and name sets live only as long as
/// this value.
#[derive(Debug, Default)]
pub struct ValidationOutcome {
    pub total_statements: usize,
    pub seen_topic_ids: HashSet<u64>,
    pub seen_names: HashSet<String>,
    pub findings: Vec<Finding>,
}

impl ValidationOutcome {
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn passed(&self) -> bool {
        self.error_count() == 0
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == severity)
            .count()
    }
}

pub struct SqlValidator {
    topic_id: Regex,
    name: Regex,
}

impl SqlValidator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            topic_id: Regex::new(r"VALUES \((\d+),")
                .context("failed to compile topic id regex")?,
            name: Regex::new(r"VALUES \(\d+, \d+, '([^']*(?:''[^']*)*)'")
                .context("failed to compile topic name regex")?,
        })
    }

    pub fn validate(&self, sql_text: &str, min_statements: usize) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::default();

        if sql_text.is_empty() {
            outcome
                .findings
                .push(Finding::for_file(FindingKind::EmptyFile, "File is empty"));
        }

        for (index, line) in sql_text.lines().enumerate() {
            outcome.total_statements += 1;
            self.check_line(index + 1, line, &mut outcome);
        }

        if outcome.total_statements < min_statements {
            outcome.findings.push(Finding::for_file(
                FindingKind::TooFewStatements,
                format!(
                    "Only {} statements generated (expected at least {min_statements})",
                    outcome.total_statements
                ),
            ));
        }

        outcome
    }

    fn check_line(&self, line_no: usize, line: &str, outcome: &mut ValidationOutcome) {
        if !line.starts_with(INSERT_PREFIX) {
            outcome.findings.push(Finding::at_line(
                line_no,
                FindingKind::NotInsert,
                "Not an INSERT statement",
            ));
            return;
        }

        if !line.ends_with(");") {
            outcome.findings.push(Finding::at_line(
                line_no,
                FindingKind::Unterminated,
                "Statement not terminated with );",
            ));
        }

        if let Some(topic_id) = self
            .topic_id
            .captures(line)
            .and_then(|captures| captures[1].parse::<u64>().ok())
        {
            if !outcome.seen_topic_ids.insert(topic_id) {
                outcome.findings.push(Finding::at_line(
                    line_no,
                    FindingKind::DuplicateTopicId,
                    format!("Duplicate help_topic_id {topic_id}"),
                ));
            }
        }

        if let Some(captures) = self.name.captures(line) {
            let name = &captures[1];
            if name.trim().is_empty() {
                outcome.findings.push(Finding::at_line(
                    line_no,
                    FindingKind::EmptyName,
                    "Empty name",
                ));
            }
            if !outcome.seen_names.insert(name.to_string()) {
                outcome.findings.push(Finding::at_line(
                    line_no,
                    FindingKind::DuplicateName,
                    format!("Duplicate name '{name}'"),
                ));
            }
        }

        if let Some(values_start) = line.find("VALUES") {
            if ends_inside_literal(&line[values_start..]) {
                outcome.findings.push(Finding::at_line(
                    line_no,
                    FindingKind::UnbalancedQuotes,
                    "Unbalanced single quotes in VALUES",
                ));
            }
        }
    }
}

/// Walks a VALUES tuple tracking whether the cursor sits inside a quoted
/// literal. Inside a literal, `''` is an escaped quote and a backslash escapes
/// the next character.
pub fn ends_inside_literal(values: &str) -> bool {
    let mut in_literal = false;
    let mut chars = values.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' if in_literal => {
                chars.next();
            }
            '\'' if in_literal && chars.peek() == Some(&'\'') => {
                chars.next();
            }
            '\'' => in_literal = !in_literal,
            _ => {}
        }
    }

    in_literal
}
