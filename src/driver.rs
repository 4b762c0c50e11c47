use crate::client::MealieClient;
use crate::config::ImporterConfig;
use crate::error::ImportError;
use crate::flows::UploadFlow;
use crate::mapper::map_recipe;
use crate::model::MelaRecipe;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{error, info, warn};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of a full import run.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub success: usize,
    pub failed: usize,
    pub failed_files: Vec<String>,
}

impl ImportReport {
    /// Human-readable end-of-run summary.
    pub fn summary(&self) -> String {
        let mut out = String::from("Import completed!\n");
        let _ = writeln!(out, "Successfully imported: {} recipes", self.success);
        let _ = write!(out, "Failed to import: {} recipes", self.failed);
        if !self.failed_files.is_empty() {
            out.push_str("\n\nFailed files:");
            for file in &self.failed_files {
                let _ = write!(out, "\n- {}", file);
            }
        }
        out
    }
}

/// Drives the per-file import loop: parse, map, upload, image, account.
///
/// A failing file is logged and counted; the loop never aborts because
/// of one. Only a missing recipes directory stops the run up front.
pub struct Importer {
    client: MealieClient,
    flow: Box<dyn UploadFlow>,
    recipes_dir: PathBuf,
    delay: Duration,
}

impl Importer {
    pub fn new(client: MealieClient, flow: Box<dyn UploadFlow>, config: &ImporterConfig) -> Self {
        Importer {
            client,
            flow,
            recipes_dir: PathBuf::from(&config.recipes_dir),
            delay: Duration::from_millis(config.delay_ms),
        }
    }

    /// Import every export file in the configured directory.
    pub async fn run(&self) -> Result<ImportReport, ImportError> {
        if !self.recipes_dir.is_dir() {
            return Err(ImportError::MissingDirectory(
                self.recipes_dir.display().to_string(),
            ));
        }

        let files = discover_exports(&self.recipes_dir).await?;
        info!(
            "Importing {} recipes from {}",
            files.len(),
            self.recipes_dir.display()
        );

        let mut report = ImportReport::default();
        for path in files {
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default()
                .to_string();
            info!("Processing {}...", file_name);

            match self.import_file(&path).await {
                Ok(()) => {
                    report.success += 1;
                    tokio::time::sleep(self.delay).await;
                }
                Err(e) => {
                    error!("Failed to import {}: {}", file_name, e);
                    report.failed += 1;
                    report.failed_files.push(file_name);
                }
            }
        }
        Ok(report)
    }

    async fn import_file(&self, path: &Path) -> Result<(), ImportError> {
        let content = tokio::fs::read_to_string(path).await?;
        let source: MelaRecipe = serde_json::from_str(&content)?;
        let mapped = map_recipe(&source);

        let slug = self.flow.upload(&self.client, &source, &mapped).await?;

        // The recipe exists on the server at this point; a failed image
        // upload must not mark the whole file as failed.
        if let Some(image) = source.images.first() {
            if let Err(e) = self.upload_first_image(&slug, image).await {
                warn!("Image upload failed for '{}': {}", slug, e);
            }
        }
        Ok(())
    }

    async fn upload_first_image(&self, slug: &str, blob: &str) -> Result<(), ImportError> {
        // Exports wrap long base64 blobs; strip the line breaks first.
        let cleaned: String = blob.split_whitespace().collect();
        let bytes = STANDARD.decode(cleaned.as_bytes())?;
        let extension = image_extension(&bytes);
        self.client.upload_image(slug, bytes, extension).await
    }
}

/// Enumerate export files (`.json` / `.melarecipe`) in the directory,
/// sorted for a stable processing order.
async fn discover_exports(dir: &Path) -> Result<Vec<PathBuf>, ImportError> {
    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("json") | Some("melarecipe")
        ) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Best-effort image format detection from magic bytes.
///
/// Mela exports carry JPEG or HEIC blobs in practice; JPEG is the
/// fallback for anything unrecognized.
fn image_extension(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "png"
    } else if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        "heic"
    } else {
        "jpg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extension_png() {
        let bytes = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(image_extension(&bytes), "png");
    }

    #[test]
    fn test_image_extension_heic() {
        let mut bytes = vec![0x00, 0x00, 0x00, 0x18];
        bytes.extend_from_slice(b"ftypheic");
        assert_eq!(image_extension(&bytes), "heic");
    }

    #[test]
    fn test_image_extension_defaults_to_jpg() {
        assert_eq!(image_extension(&[0xFF, 0xD8, 0xFF, 0xE0]), "jpg");
        assert_eq!(image_extension(b"garbage data"), "jpg");
    }

    #[tokio::test]
    async fn test_discover_exports_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("b.melarecipe"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let files = discover_exports(dir.path()).await.unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.melarecipe"]);
    }

    #[test]
    fn test_summary_lists_failed_files() {
        let report = ImportReport {
            success: 2,
            failed: 1,
            failed_files: vec!["broken.melarecipe".to_string()],
        };
        let summary = report.summary();
        assert!(summary.contains("Successfully imported: 2 recipes"));
        assert!(summary.contains("Failed to import: 1 recipes"));
        assert!(summary.contains("- broken.melarecipe"));
    }

    #[test]
    fn test_summary_without_failures() {
        let report = ImportReport {
            success: 3,
            failed: 0,
            failed_files: Vec::new(),
        };
        assert!(!report.summary().contains("Failed files"));
    }
}
