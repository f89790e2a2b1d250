pub mod currency;
pub mod diversity;
pub mod notice_period;
pub mod remote_work;

pub use currency::Currency;
pub use diversity::{DiversityTag, Gender};
pub use notice_period::NoticePeriod;
pub use remote_work::RemoteWork;

/// Region a requirement is created from. Only `Gulf` is ever sent on the
/// wire; the default region is implied by absence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Default,
    Gulf,
}

impl Region {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "" | "default" => Some(Region::Default),
            "gulf" => Some(Region::Gulf),
            _ => None,
        }
    }
}
