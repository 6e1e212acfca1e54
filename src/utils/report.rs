use crate::domain::model::BatchSummary;
use crate::utils::error::{EtlError, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    path: &'a str,
    status: &'a str,
    midpoint: Option<f64>,
    samples: Option<usize>,
    message: Option<&'a str>,
}

/// One row per file with the header `path,status,midpoint,samples,message`.
pub fn to_csv(summary: &BatchSummary) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for outcome in &summary.outcomes {
        writer.serialize(ReportRow {
            path: &outcome.path,
            status: outcome.status.as_str(),
            midpoint: outcome.midpoint,
            samples: outcome.samples,
            message: outcome.message.as_deref(),
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    summary: &'a BatchSummary,
    processed: usize,
    skipped: usize,
    failed: usize,
}

pub fn to_json(summary: &BatchSummary) -> Result<String> {
    let report = JsonReport {
        summary,
        processed: summary.processed(),
        skipped: summary.skipped(),
        failed: summary.failed(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Writes the summary as CSV for `.csv` paths and as JSON otherwise.
pub async fn write_report(summary: &BatchSummary, path: &str) -> Result<()> {
    let is_csv = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let content = if is_csv {
        to_csv(summary)?
    } else {
        to_json(summary)?
    };

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, content).await?;
    tracing::info!("📝 Report written to {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FileOutcome;
    use chrono::{TimeZone, Utc};

    fn sample_summary() -> BatchSummary {
        BatchSummary {
            directory: "beats".to_string(),
            pattern: "*.json".to_string(),
            scale_factor: 0.75,
            dry_run: false,
            started_at: Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap(),
            finished_at: Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 1).unwrap(),
            outcomes: vec![
                FileOutcome::processed("a.json", -1.5, 3),
                FileOutcome::skipped("b.json", "no amplitudes array found"),
                FileOutcome::failed("c.json", "Serialization error: EOF"),
            ],
        }
    }

    #[test]
    fn test_csv_report() {
        let csv = to_csv(&sample_summary()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "path,status,midpoint,samples,message");
        assert_eq!(lines[1], "a.json,processed,-1.5,3,");
        assert_eq!(lines[2], "b.json,skipped,,,no amplitudes array found");
        assert_eq!(lines[3], "c.json,failed,,,Serialization error: EOF");
    }

    #[test]
    fn test_json_report_counts() {
        let json = to_json(&sample_summary()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["processed"], 1);
        assert_eq!(value["skipped"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["directory"], "beats");
        assert_eq!(value["outcomes"][0]["status"], "processed");
        assert_eq!(value["outcomes"][2]["message"], "Serialization error: EOF");
    }

    #[tokio::test]
    async fn test_write_report_picks_format_from_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let csv_path = dir.path().join("out").join("report.csv");
        let json_path = dir.path().join("report.json");

        write_report(&sample_summary(), csv_path.to_str().unwrap())
            .await
            .unwrap();
        write_report(&sample_summary(), json_path.to_str().unwrap())
            .await
            .unwrap();

        let csv = std::fs::read_to_string(&csv_path).unwrap();
        assert!(csv.starts_with("path,status"));
        let json = std::fs::read_to_string(&json_path).unwrap();
        assert!(json.trim_start().starts_with('{'));
    }
}
