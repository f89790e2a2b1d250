use serde::{Deserialize, Serialize};

/// Work mode ENUM
pub const REMOTE_WORK_LABELS: &[&str] = &["On-site", "Remote", "Hybrid"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteWork {
    #[serde(rename = "On-site")]
    OnSite,
    #[serde(rename = "Remote")]
    Remote,
    #[serde(rename = "Hybrid")]
    Hybrid,
}

impl RemoteWork {
    /// Tolerant parse for dropdown drift ("onsite", "work from home",
    /// "wfh"). Unknown input returns None.
    pub fn parse(input: &str) -> Option<Self> {
        let lower = input.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }

        if lower == "remote" || lower.contains("work from home") || lower == "wfh" {
            return Some(RemoteWork::Remote);
        }
        if lower.contains("hybrid") {
            return Some(RemoteWork::Hybrid);
        }
        if lower.contains("on-site") || lower.contains("onsite") || lower.contains("on site") {
            return Some(RemoteWork::OnSite);
        }

        None
    }

    pub fn label(&self) -> &'static str {
        match self {
            RemoteWork::OnSite => "On-site",
            RemoteWork::Remote => "Remote",
            RemoteWork::Hybrid => "Hybrid",
        }
    }
}
