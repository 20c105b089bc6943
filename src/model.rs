use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownEntry {
    pub path: String,
    pub category_id: u32,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub docs_root: String,
    pub markdown_count: usize,
    pub sources: Vec<MarkdownEntry>,
}

/// A document that produced no help topic, with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFailure {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratePaths {
    pub docs_root: String,
    pub output_path: String,
    pub failures_path: Option<String>,
    pub manifest_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateCounts {
    pub documents_discovered: usize,
    pub records_generated: usize,
    pub documents_failed: usize,
    pub first_topic_id: Option<u32>,
    pub last_topic_id: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub paths: GeneratePaths,
    pub counts: GenerateCounts,
    pub category_counts: BTreeMap<u32, usize>,
    pub failures: Vec<DocumentFailure>,
}
