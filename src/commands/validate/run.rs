use super::*;

pub fn run(args: ValidateArgs) -> Result<()> {
    let sql_path = &args.sql_path;
    info!(path = %sql_path.display(), min_statements = args.min_statements, "validating sql file");

    let sql_text = fs::read_to_string(sql_path)
        .with_context(|| format!("failed to read {}", sql_path.display()))?;

    let validator = SqlValidator::new()?;
    let outcome = validator.validate(&sql_text, args.min_statements);
    let report = ValidationReport::from_outcome(sql_path.display().to_string(), &outcome);

    if let Some(report_path) = &args.report_path {
        write_json_pretty(report_path, &report)?;
        info!(path = %report_path.display(), "wrote validation report");
    }

    print!("{}", render_text_report(&report, MAX_DISPLAYED_ERRORS));

    if !report.passed() {
        warn!(
            errors = report.summary.error_count,
            warnings = report.summary.warning_count,
            "validation failed"
        );
        bail!(
            "validation failed: {} errors in {}",
            report.summary.error_count,
            sql_path.display()
        );
    }

    info!(
        statements = report.summary.total_statements,
        warnings = report.summary.warning_count,
        "validation passed"
    );

    Ok(())
}
