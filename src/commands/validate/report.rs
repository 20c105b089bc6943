use super::*;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    pub total_statements: usize,
    pub unique_topic_ids: usize,
    pub unique_names: usize,
    pub error_count: usize,
    pub warning_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub generated_at: String,
    pub sql_path: String,
    pub status: String,
    pub summary: ValidationSummary,
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn from_outcome(sql_path: String, outcome: &ValidationOutcome) -> Self {
        Self {
            generated_at: now_utc_string(),
            sql_path,
            status: if outcome.passed() { "passed" } else { "failed" }.to_string(),
            summary: ValidationSummary {
                total_statements: outcome.total_statements,
                unique_topic_ids: outcome.seen_topic_ids.len(),
                unique_names: outcome.seen_names.len(),
                error_count: outcome.error_count(),
                warning_count: outcome.warning_count(),
            },
            findings: outcome.findings.clone(),
        }
    }

    pub fn passed(&self) -> bool {
        self.summary.error_count == 0
    }
}

/// Human-readable report: counts, every warning, then at most `max_errors`
/// errors followed by a truncation notice.
pub fn render_text_report(report: &ValidationReport, max_errors: usize) -> String {
    let summary = &report.summary;
    let mut lines = vec![
        "=== SQL Validation Report ===".to_string(),
        format!("Total statements: {}", summary.total_statements),
        format!("Unique topic IDs: {}", summary.unique_topic_ids),
        format!("Unique names: {}", summary.unique_names),
        String::new(),
    ];

    let warnings = findings_with(&report.findings, Severity::Warning);
    if !warnings.is_empty() {
        lines.push(format!("WARNINGS ({}):", warnings.len()));
        lines.extend(warnings.iter().map(|warning| format!("  - {warning}")));
        lines.push(String::new());
    }

    let errors = findings_with(&report.findings, Severity::Error);
    if errors.is_empty() {
        lines.push("ALL CHECKS PASSED".to_string());
    } else {
        lines.push(format!("ERRORS ({}):", errors.len()));
        lines.extend(
            errors
                .iter()
                .take(max_errors)
                .map(|error| format!("  - {error}")),
        );
        if errors.len() > max_errors {
            lines.push(format!("  ... and {} more", errors.len() - max_errors));
        }
        lines.push(String::new());
        lines.push("VALIDATION FAILED".to_string());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn findings_with(findings: &[Finding], severity: Severity) -> Vec<&Finding> {
    findings
        .iter()
        .filter(|finding| finding.severity == severity)
        .collect()
}
