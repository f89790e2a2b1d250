use serde::{Deserialize, Serialize};

/// Notice period ENUM as shown in the requirement form dropdown
pub const NOTICE_PERIOD_LABELS: &[&str] =
    &["Immediately", "15 days", "30 days", "60 days", "90 days"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NoticePeriod {
    #[serde(rename = "Immediately")]
    Immediately,
    #[serde(rename = "15 days")]
    Days15,
    #[serde(rename = "30 days")]
    Days30,
    #[serde(rename = "60 days")]
    Days60,
    #[serde(rename = "90 days")]
    Days90,
}

impl NoticePeriod {
    /// Tolerant parse for dropdown values that drifted across page variants
    /// ("15 Days", "15days", "immediate").
    pub fn parse(input: &str) -> Option<Self> {
        let lower = input.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }
        if lower.starts_with("immediate") {
            return Some(NoticePeriod::Immediately);
        }
        if lower.contains("15") {
            return Some(NoticePeriod::Days15);
        }
        if lower.contains("30") {
            return Some(NoticePeriod::Days30);
        }
        if lower.contains("60") {
            return Some(NoticePeriod::Days60);
        }
        if lower.contains("90") {
            return Some(NoticePeriod::Days90);
        }
        None
    }

    pub fn label(&self) -> &'static str {
        match self {
            NoticePeriod::Immediately => "Immediately",
            NoticePeriod::Days15 => "15 days",
            NoticePeriod::Days30 => "30 days",
            NoticePeriod::Days60 => "60 days",
            NoticePeriod::Days90 => "90 days",
        }
    }

    /// Days until the candidate can start.
    pub fn days(&self) -> u32 {
        match self {
            NoticePeriod::Immediately => 0,
            NoticePeriod::Days15 => 15,
            NoticePeriod::Days30 => 30,
            NoticePeriod::Days60 => 60,
            NoticePeriod::Days90 => 90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_label_variants() {
        assert_eq!(NoticePeriod::parse("Immediately"), Some(NoticePeriod::Immediately));
        assert_eq!(NoticePeriod::parse("immediate joiner"), Some(NoticePeriod::Immediately));
        assert_eq!(NoticePeriod::parse("15 Days"), Some(NoticePeriod::Days15));
        assert_eq!(NoticePeriod::parse("90days"), Some(NoticePeriod::Days90));
        assert_eq!(NoticePeriod::parse("45 days"), None);
        assert_eq!(NoticePeriod::parse(""), None);
    }

    #[test]
    fn labels_match_dropdown_enum() {
        for label in NOTICE_PERIOD_LABELS {
            let parsed = NoticePeriod::parse(label).expect("dropdown label must parse");
            assert_eq!(parsed.label(), *label);
        }
    }

    #[test]
    fn ordering_follows_days() {
        assert!(NoticePeriod::Immediately < NoticePeriod::Days15);
        assert!(NoticePeriod::Days30.days() <= NoticePeriod::Days60.days());
    }
}
