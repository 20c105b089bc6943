use super::*;

pub fn run(args: GenerateArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        args.docs_root.join(OUTPUT_DIR_NAME).join(format!(
            "generate_run_{}.json",
            utc_compact_string(started_ts)
        ))
    });

    info!(docs_root = %args.docs_root.display(), run_id = %run_id, "starting generate");

    let sources = inventory::discover_markdown(&args.docs_root)?;
    let parser = DocumentParser::new()?;

    let documents = sources
        .iter()
        .map(|source| (source.relative_path.clone(), read_lines(&source.path)));
    let outcome = generate_batch(&parser, documents, &args.base_url, args.start_id);

    write_lines(&args.output, &outcome.statements)?;
    info!(
        path = %args.output.display(),
        statements = outcome.statements.len(),
        "wrote help topic statements"
    );

    if let Some(failures_path) = &args.failures_path {
        let failed_paths = outcome
            .failures
            .iter()
            .map(|failure| failure.path.as_str())
            .collect::<Vec<&str>>();
        write_lines(failures_path, &failed_paths)?;
        info!(path = %failures_path.display(), failed = failed_paths.len(), "wrote failure list");
    }

    let manifest = GenerateRunManifest {
        manifest_version: 1,
        run_id,
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_generate_command(&args),
        paths: GeneratePaths {
            docs_root: args.docs_root.display().to_string(),
            output_path: args.output.display().to_string(),
            failures_path: args
                .failures_path
                .as_ref()
                .map(|path| path.display().to_string()),
            manifest_path: manifest_path.display().to_string(),
        },
        counts: GenerateCounts {
            documents_discovered: sources.len(),
            records_generated: outcome.statements.len(),
            documents_failed: outcome.failures.len(),
            first_topic_id: outcome.first_topic_id(),
            last_topic_id: outcome.last_topic_id(),
        },
        category_counts: outcome.category_counts.clone(),
        failures: outcome.failures.clone(),
    };
    write_json_pretty(&manifest_path, &manifest)
        .with_context(|| format!("failed to write run manifest for {}", manifest.run_id))?;

    info!(
        discovered = sources.len(),
        generated = outcome.statements.len(),
        failed = outcome.failures.len(),
        manifest = %manifest_path.display(),
        "generate completed"
    );

    Ok(())
}

pub(super) fn render_generate_command(args: &GenerateArgs) -> String {
    let mut command = vec![
        "helptopics".to_string(),
        "generate".to_string(),
        "--docs-root".to_string(),
        args.docs_root.display().to_string(),
        "--output".to_string(),
        args.output.display().to_string(),
        "--base-url".to_string(),
        args.base_url.clone(),
        "--start-id".to_string(),
        args.start_id.to_string(),
    ];

    let optional_paths: [(&str, &Option<PathBuf>); 2] = [
        ("--failures-path", &args.failures_path),
        ("--manifest-path", &args.manifest_path),
    ];
    for (flag, value) in optional_paths {
        if let Some(path) = value {
            command.push(flag.to_string());
            command.push(path.display().to_string());
        }
    }

    command.join(" ")
}
