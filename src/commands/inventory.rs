use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;
use walkdir::{DirEntry, WalkDir};

use crate::cli::InventoryArgs;
use crate::commands::generate::category_id_for_path;
use crate::model::{MarkdownEntry, MarkdownInventoryManifest};
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

pub const OUTPUT_DIR_NAME: &str = ".helptopics";

/// A markdown file found under the docs root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownSource {
    /// Path relative to the docs root, always `/`-separated.
    pub relative_path: String,
    pub path: PathBuf,
}

pub fn run(args: InventoryArgs) -> Result<()> {
    let manifest = build_manifest(&args.docs_root)?;

    if args.dry_run {
        info!(
            markdown_count = manifest.markdown_count,
            docs_root = %manifest.docs_root,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args.manifest_path.unwrap_or_else(|| {
        args.docs_root
            .join(OUTPUT_DIR_NAME)
            .join("markdown_inventory.json")
    });

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote inventory manifest");
    info!(markdown_count = manifest.markdown_count, "inventory completed");

    Ok(())
}

pub fn build_manifest(docs_root: &Path) -> Result<MarkdownInventoryManifest> {
    let sources = discover_markdown(docs_root)?;

    let mut entries = Vec::with_capacity(sources.len());
    for source in sources {
        let sha256 = sha256_file(&source.path)?;
        entries.push(MarkdownEntry {
            category_id: category_id_for_path(&source.relative_path),
            path: source.relative_path,
            sha256,
        });
    }

    Ok(MarkdownInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        docs_root: docs_root.display().to_string(),
        markdown_count: entries.len(),
        sources: entries,
    })
}

/// Recursively lists `*.md` files under `docs_root`, sorted by relative path.
/// Hidden directories (including the tool's own output directory) are skipped.
pub fn discover_markdown(docs_root: &Path) -> Result<Vec<MarkdownSource>> {
    let mut sources = Vec::new();

    let walker = WalkDir::new(docs_root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry =
            entry.with_context(|| format!("failed to walk {}", docs_root.display()))?;
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }

        let path = entry.path().to_path_buf();
        let relative = path.strip_prefix(docs_root).unwrap_or(&path);
        sources.push(MarkdownSource {
            relative_path: relative_path_string(relative),
            path,
        });
    }

    if sources.is_empty() {
        bail!("no markdown files found under {}", docs_root.display());
    }

    sources.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(sources)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

fn relative_path_string(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
