use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::utils::time;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};

pub const CSV_HEADERS: [&str; 6] = ["Name", "Email", "Phone", "Position", "Status", "Applied Date"];

/// How exported fields are written.
///
/// `Naive` joins raw values with commas and newlines, exactly as the web
/// client did, so a comma inside a value shifts columns. `Rfc4180` quotes any
/// field containing a comma, quote, CR or LF and doubles embedded quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvDialect {
    #[default]
    Naive,
    Rfc4180,
}

impl fmt::Display for CsvDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvDialect::Naive => f.write_str("naive"),
            CsvDialect::Rfc4180 => f.write_str("rfc4180"),
        }
    }
}

impl std::str::FromStr for CsvDialect {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naive" => Ok(CsvDialect::Naive),
            "rfc4180" | "quoted" => Ok(CsvDialect::Rfc4180),
            other => Err(format!("expected naive or rfc4180, got {}", other)),
        }
    }
}

pub struct ExportService;

impl ExportService {
    fn field(value: &str, dialect: CsvDialect) -> String {
        match dialect {
            CsvDialect::Naive => value.to_string(),
            CsvDialect::Rfc4180 => {
                if value.contains([',', '"', '\r', '\n']) {
                    format!("\"{}\"", value.replace('"', "\"\""))
                } else {
                    value.to_string()
                }
            }
        }
    }

    /// Header line plus one line per candidate, in list order, joined with
    /// `\n` and no trailing newline.
    pub fn render_candidates_csv(candidates: &[Candidate], dialect: CsvDialect) -> String {
        let mut lines = Vec::with_capacity(candidates.len() + 1);
        lines.push(CSV_HEADERS.join(","));
        for c in candidates {
            let row = [
                c.name.as_str(),
                c.email.as_str(),
                c.phone.as_str(),
                c.position.as_str(),
                c.status.as_str(),
                c.applied_date.as_str(),
            ];
            lines.push(
                row.iter()
                    .map(|v| Self::field(v, dialect))
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }
        lines.join("\n")
    }

    pub fn download_filename(at: DateTime<Utc>) -> String {
        format!("candidates-{}.csv", time::epoch_millis(at))
    }

    /// Writes `content` into `dir` under the timestamped download name.
    pub fn save_download(dir: &Path, content: &str, at: DateTime<Utc>) -> Result<PathBuf> {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|e| {
                Error::Internal(format!(
                    "Cannot create export directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }
        let path = dir.join(Self::download_filename(at));
        std::fs::write(&path, content)?;
        tracing::info!(path = %path.display(), "Candidates exported");
        Ok(path)
    }
}
