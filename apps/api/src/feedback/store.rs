//! Feedback persistence.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::io::AsyncWriteExt;

/// One validated submission.
#[derive(Debug, Clone)]
pub struct FeedbackRecord {
    pub feedback: String,
    pub rating: u8,
    pub email: Option<String>,
    pub session_id: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// `feedback-<ISO timestamp>.txt`, with `:` swapped for `-` so the name is portable.
    pub fn file_name(&self) -> String {
        format!("feedback-{}.txt", self.timestamp().replace(':', "-"))
    }

    fn timestamp(&self) -> String {
        self.submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Timestamp: {}", self.timestamp());
        let _ = writeln!(out, "Rating: {}/5", self.rating);
        if let Some(email) = &self.email {
            let _ = writeln!(out, "Email: {email}");
        }
        if let Some(session_id) = &self.session_id {
            let _ = writeln!(out, "Session ID: {session_id}");
        }
        let _ = writeln!(out, "Feedback:\n{}", self.feedback);
        out
    }
}

/// Appends `record` to its file under `dir`, creating the directory if needed.
pub async fn save_feedback(dir: &Path, record: &FeedbackRecord) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(record.file_name());

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await?;
    file.write_all(record.render().as_bytes()).await?;
    file.flush().await?;

    Ok(path)
}
