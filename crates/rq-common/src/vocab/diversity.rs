use serde::{Deserialize, Serialize};

/// Diversity preference ENUM ("all" is exclusive with the specific values)
pub const DIVERSITY_LABELS: &[&str] = &["all", "male", "female", "other"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiversityTag {
    All,
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl DiversityTag {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "all" => Some(DiversityTag::All),
            "male" => Some(DiversityTag::Male),
            "female" => Some(DiversityTag::Female),
            "other" => Some(DiversityTag::Other),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiversityTag::All => "all",
            DiversityTag::Male => "male",
            DiversityTag::Female => "female",
            DiversityTag::Other => "other",
        }
    }

    /// Whether a candidate's recorded gender satisfies this tag.
    pub fn admits(&self, gender: Gender) -> bool {
        match self {
            DiversityTag::All => true,
            DiversityTag::Male => gender == Gender::Male,
            DiversityTag::Female => gender == Gender::Female,
            DiversityTag::Other => gender == Gender::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels() {
        for label in DIVERSITY_LABELS {
            let parsed = DiversityTag::parse(label).expect("label must parse");
            assert_eq!(parsed.label(), *label);
        }
        assert_eq!(DiversityTag::parse("ALL "), Some(DiversityTag::All));
        assert_eq!(DiversityTag::parse("nonbinary"), None);
    }

    #[test]
    fn all_admits_every_gender() {
        for gender in [Gender::Male, Gender::Female, Gender::Other] {
            assert!(DiversityTag::All.admits(gender));
        }
        assert!(DiversityTag::Female.admits(Gender::Female));
        assert!(!DiversityTag::Female.admits(Gender::Male));
    }
}
