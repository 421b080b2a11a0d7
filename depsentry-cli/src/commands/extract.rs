//! `depsentry extract` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use depsentry_core::config::DepsentryConfig;
use depsentry_extractor::{CoordinateSet, ExtractorConfig, ExtractorError, FormatDispatcher};

use crate::cli::ExtractArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `extract` command.
///
/// Files are processed in argument order; the first failing file aborts
/// the command with its error.
pub async fn execute(
    args: ExtractArgs,
    config: &DepsentryConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let dispatcher = build_dispatcher(config)?;
    let report = extract_files(&dispatcher, &args.files).await?;
    writer.render(&report)
}

/// Build a dispatcher from the `[extractor]` section.
pub fn build_dispatcher(config: &DepsentryConfig) -> Result<FormatDispatcher, CliError> {
    FormatDispatcher::with_config(ExtractorConfig::from_core(&config.extractor))
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Read and extract every file, stopping at the first failure.
pub async fn extract_files(
    dispatcher: &FormatDispatcher,
    files: &[impl AsRef<Path>],
) -> Result<ExtractReport, CliError> {
    let mut report = ExtractReport::default();

    for path in files {
        let path = path.as_ref();
        let file = extract_file(dispatcher, path).await?;
        report.total += file.coordinates.len();
        report.files.push(file);
    }

    info!(
        files = report.files.len(),
        total = report.total,
        "extraction complete"
    );
    Ok(report)
}

/// Read one manifest from disk and extract its coordinates.
pub async fn extract_file(
    dispatcher: &FormatDispatcher,
    path: &Path,
) -> Result<FileReport, CliError> {
    let display_path = path.display().to_string();

    // 형식 판별은 읽기 전에 (지원하지 않는 파일은 열지 않음)
    if dispatcher.detect(&display_path).is_none() {
        return Err(CliError::extract(
            &display_path,
            ExtractorError::UnsupportedFormat {
                filename: display_path.clone(),
            },
        ));
    }

    let size = tokio::fs::metadata(path).await?.len();
    let max = dispatcher.config().max_content_size;
    if size > max as u64 {
        return Err(CliError::extract(
            &display_path,
            ExtractorError::ContentTooLarge {
                size: usize::try_from(size).unwrap_or(usize::MAX),
                max,
            },
        ));
    }

    let content = tokio::fs::read_to_string(path).await?;
    debug!(path = %display_path, size = content.len(), "read manifest");

    let extraction = dispatcher
        .extract_detailed(&display_path, &content)
        .map_err(|e| CliError::extract(&display_path, e))?;

    Ok(FileReport {
        file: display_path,
        format: extraction.parsed_as.to_owned(),
        coordinates: extraction.coordinates,
    })
}

/// Coordinates extracted from a single manifest file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    pub format: String,
    pub coordinates: CoordinateSet,
}

/// Result of the `extract` command.
#[derive(Debug, Default, Serialize)]
pub struct ExtractReport {
    pub files: Vec<FileReport>,
    pub total: usize,
}

impl Render for FileReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "{} ({}, {} packages)",
            self.file.bold(),
            self.format,
            self.coordinates.len()
        )?;
        for coordinate in self.coordinates.iter() {
            writeln!(w, "  {coordinate}")?;
        }
        Ok(())
    }
}

impl Render for ExtractReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for file in &self.files {
            file.render_text(w)?;
            writeln!(w)?;
        }
        writeln!(
            w,
            "Total: {}",
            format!("{} coordinates", self.total).green().bold()
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depsentry_extractor::{Ecosystem, PackageCoordinate};

    fn sample_report() -> ExtractReport {
        let coordinates: CoordinateSet = [
            PackageCoordinate::new(Ecosystem::Npm, "lodash", "4.17.21"),
            PackageCoordinate::new(Ecosystem::Npm, "@types/node", "20.4.1"),
        ]
        .into_iter()
        .collect();
        ExtractReport {
            total: coordinates.len(),
            files: vec![FileReport {
                file: "web/yarn.lock".to_owned(),
                format: "yarn.lock (classic)".to_owned(),
                coordinates,
            }],
        }
    }

    #[test]
    fn test_extract_report_render_text() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        sample_report()
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("web/yarn.lock (yarn.lock (classic), 2 packages)"));
        assert!(output.contains("  pkg:npm/@types/node@20.4.1\n  pkg:npm/lodash@4.17.21\n"));
        assert!(output.contains("Total: 2 coordinates"));
    }

    #[test]
    fn test_extract_report_json_shape() {
        let json = serde_json::to_value(sample_report()).expect("serialization should succeed");

        assert_eq!(json["total"].as_u64(), Some(2));
        let file = &json["files"][0];
        assert_eq!(file["file"].as_str(), Some("web/yarn.lock"));
        assert_eq!(file["format"].as_str(), Some("yarn.lock (classic)"));
        assert_eq!(
            file["coordinates"],
            serde_json::json!(["pkg:npm/@types/node@20.4.1", "pkg:npm/lodash@4.17.21"])
        );
    }

    #[test]
    fn test_build_dispatcher_uses_extractor_section() {
        let mut config = DepsentryConfig::default();
        config.extractor.max_content_size = 2048;
        let dispatcher = build_dispatcher(&config).expect("valid config");
        assert_eq!(dispatcher.config().max_content_size, 2048);
    }

    #[test]
    fn test_build_dispatcher_rejects_zero_limit() {
        let mut config = DepsentryConfig::default();
        config.extractor.max_content_size = 0;
        let err = build_dispatcher(&config)
            .err()
            .expect("zero limit should be rejected");
        assert_eq!(err.exit_code(), 2);
    }
}
