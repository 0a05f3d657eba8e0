// src/output/writer.rs
//! Executes output operations by performing actual I/O.
//!
//! This module is the only place where output files are written, keeping
//! the fetch and render stages free of side effects.

use super::types::*;
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Delivers the output plan, performing all I/O operations.
///
/// A failing operation does not stop the ones after it; check
/// [`OutputReport::is_success`].
pub fn deliver(plan: OutputPlan) -> OutputReport {
    let mut report = OutputReport::new();
    let start_time = Instant::now();

    log::debug!(
        "Executing output plan with {} operations",
        plan.operations.len()
    );

    for operation in plan.operations {
        let target = operation.describe();
        match execute_operation(operation) {
            Ok(bytes_written) => {
                report = report.with_completed(CompletedOperation {
                    target,
                    bytes_written,
                });
            }
            Err(e) => {
                log::error!("Output to {} failed: {}", target, e);
                report = report.with_failed(FailedOperation {
                    target,
                    error: e.to_string(),
                });
            }
        }
    }

    report.stats.total_duration_ms = start_time.elapsed().as_millis() as u64;
    log::debug!(
        "Output plan complete: {} succeeded, {} failed in {}ms",
        report.stats.operations_completed,
        report.stats.operations_failed,
        report.stats.total_duration_ms
    );

    report
}

fn execute_operation(operation: DeliveryTarget) -> Result<usize, AppError> {
    match operation {
        DeliveryTarget::WriteFile { path, content } => write_file(&path, content.as_bytes()),
        DeliveryTarget::ReplaceFile { path, bytes } => replace_file(&path, &bytes),
        DeliveryTarget::PrintToStdout { content } => {
            print_to_stdout(&content)?;
            Ok(content.len())
        }
    }
}

fn write_file(path: &Path, content: &[u8]) -> Result<usize, AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    log::info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(content.len())
}

/// Writes beside the target, then renames over it, so readers never see a
/// half-written file.
fn replace_file(path: &Path, bytes: &[u8]) -> Result<usize, AppError> {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".part");
    let staging = std::path::PathBuf::from(staging);

    write_file(&staging, bytes)?;
    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }
    Ok(bytes.len())
}

fn print_to_stdout(content: &str) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_replace() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("out/page.md");
        let image = dir.path().join("background.jpg");
        fs::write(&image, b"old").unwrap();

        let plan = OutputPlan::new()
            .with_operation(DeliveryTarget::WriteFile {
                path: page.clone(),
                content: "# Title".to_string(),
            })
            .with_operation(DeliveryTarget::ReplaceFile {
                path: image.clone(),
                bytes: b"new image".to_vec(),
            });

        let report = deliver(plan);
        assert!(report.is_success());
        assert_eq!(report.stats.bytes_written, 7 + 9);
        assert_eq!(fs::read_to_string(page).unwrap(), "# Title");
        assert_eq!(fs::read(&image).unwrap(), b"new image");
        assert!(!dir.path().join("background.jpg.part").exists());
    }

    #[test]
    fn test_failure_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();

        // A regular file cannot act as a parent directory
        let plan = OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
            path: blocker.join("child.md"),
            content: "x".to_string(),
        });

        let report = deliver(plan);
        assert!(!report.is_success());
        assert_eq!(report.stats.operations_failed, 1);
    }
}
