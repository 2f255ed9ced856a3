use std::path::{Path, PathBuf};

use oapi_model::models::{LoadedSpec, SourceKind, SourceReport, SpecOrigin};
use tracing::debug;

use super::{LoadCollector, LoadError, prepare_spec};

const SPEC_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Loads every spec file directly inside `dir`, in file-name order.
pub(super) async fn load_folder(dir: &Path, collector: &mut LoadCollector) {
    let mut report = SourceReport {
        kind: SourceKind::Folder,
        location: dir.display().to_string(),
        loaded: 0,
        failed: 0,
    };

    match list_spec_files(dir).await {
        Ok(files) => {
            for path in files {
                let id = file_id(&path);
                match load_file(&path).await {
                    Ok(document) => {
                        let origin = SpecOrigin::folder(path.display().to_string());
                        if collector.push(LoadedSpec::new(id, document, origin)) {
                            report.loaded += 1;
                        } else {
                            report.failed += 1;
                        }
                    }
                    Err(err) => {
                        report.failed += 1;
                        collector.warn(&id, err);
                    }
                }
            }
        }
        Err(err) => {
            report.failed += 1;
            collector.warn(&report.location, err);
        }
    }

    collector.sources.push(report);
}

async fn list_spec_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_err = |source: std::io::Error| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_err)?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let path = entry.path();
        if !has_spec_extension(&path) {
            debug!(path = %path.display(), "skipping non-spec file");
            continue;
        }
        let is_file = entry
            .file_type()
            .await
            .map(|kind| kind.is_file())
            .unwrap_or(false);
        if is_file {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

async fn load_file(path: &Path) -> Result<serde_json::Value, LoadError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    prepare_spec(&text)
}

fn has_spec_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SPEC_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

fn file_id(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
