//! `depsentry scan` command handler

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use depsentry_core::config::DepsentryConfig;
use depsentry_extractor::{FormatDispatcher, ManifestDetector};

use crate::cli::ScanArgs;
use crate::commands::extract::{FileReport, build_dispatcher, extract_file};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `scan` command.
///
/// Individual manifest failures are reported in the output but do not
/// fail the command.
pub async fn execute(
    args: ScanArgs,
    config: &DepsentryConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let dispatcher = build_dispatcher(config)?;
    let report = scan_dir(&dispatcher, &args.path).await?;
    writer.render(&report)
}

/// Scan one directory level and extract every recognised manifest.
pub async fn scan_dir(dispatcher: &FormatDispatcher, dir: &Path) -> Result<ScanReport, CliError> {
    info!(path = %dir.display(), "starting manifest scan");

    let max = dispatcher.config().max_content_size as u64;
    let mut report = ScanReport {
        path: dir.display().to_string(),
        ..ScanReport::default()
    };

    for path in discover_manifests(dir).await? {
        let display_path = path.display().to_string();

        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.len() > max => {
                warn!(path = %display_path, size = metadata.len(), max, "manifest too large, skipping");
                report.skipped.push(display_path);
                continue;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(path = %display_path, error = %e, "failed to read file metadata");
                report.failures.push(ScanFailure {
                    file: display_path,
                    error: e.to_string(),
                });
                continue;
            }
        }

        match extract_file(dispatcher, &path).await {
            Ok(file) => {
                report.total += file.coordinates.len();
                report.manifests.push(file);
            }
            Err(e) => {
                warn!(path = %display_path, error = %e, "manifest extraction failed");
                report.failures.push(ScanFailure {
                    file: display_path,
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        manifests = report.manifests.len(),
        failures = report.failures.len(),
        skipped = report.skipped.len(),
        total = report.total,
        "manifest scan complete"
    );
    Ok(report)
}

/// Collect recognised manifest files directly inside `dir`, sorted by path.
async fn discover_manifests(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let detector = ManifestDetector::new();
    let mut found = Vec::new();

    // 재귀 없이 1단계만 탐색
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        match entry.file_type().await {
            Ok(file_type) if file_type.is_file() => {}
            Ok(_) => continue,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read directory entry");
                continue;
            }
        }
        if detector.is_manifest(&path) {
            found.push(path);
        }
    }

    found.sort();
    Ok(found)
}

/// A manifest that could not be extracted.
#[derive(Debug, Serialize)]
pub struct ScanFailure {
    pub file: String,
    pub error: String,
}

/// Result of the `scan` command.
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    pub path: String,
    pub manifests: Vec<FileReport>,
    pub failures: Vec<ScanFailure>,
    pub skipped: Vec<String>,
    pub total: usize,
}

impl Render for ScanReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Scan: {}", self.path.bold())?;
        writeln!(w, "Manifests extracted: {}", self.manifests.len())?;
        writeln!(w, "Total coordinates: {}", self.total)?;
        writeln!(w)?;

        if self.manifests.is_empty() && self.failures.is_empty() {
            writeln!(w, "{}", "No manifests found.".yellow())?;
        }

        for manifest in &self.manifests {
            manifest.render_text(w)?;
            writeln!(w)?;
        }

        for failure in &self.failures {
            writeln!(w, "{} {}: {}", "FAILED".red().bold(), failure.file, failure.error)?;
        }
        for skipped in &self.skipped {
            writeln!(w, "{} {} (too large)", "SKIPPED".yellow(), skipped)?;
        }

        Ok(())
    }
}
