use serde::{Deserialize, Serialize};

use super::Region;

/// Currency ENUM (ISO codes accepted by the submission backend)
pub const CURRENCY_CODES: &[&str] = &["INR", "AED", "SAR", "QAR", "KWD", "BHD", "OMR"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "INR")]
    Inr,
    #[serde(rename = "AED")]
    Aed,
    #[serde(rename = "SAR")]
    Sar,
    #[serde(rename = "QAR")]
    Qar,
    #[serde(rename = "KWD")]
    Kwd,
    #[serde(rename = "BHD")]
    Bhd,
    #[serde(rename = "OMR")]
    Omr,
}

impl Currency {
    /// Strict parse; unknown codes are a caller fault, not user input to
    /// be validated at finalize.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "INR" => Some(Currency::Inr),
            "AED" => Some(Currency::Aed),
            "SAR" => Some(Currency::Sar),
            "QAR" => Some(Currency::Qar),
            "KWD" => Some(Currency::Kwd),
            "BHD" => Some(Currency::Bhd),
            "OMR" => Some(Currency::Omr),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Aed => "AED",
            Currency::Sar => "SAR",
            Currency::Qar => "QAR",
            Currency::Kwd => "KWD",
            Currency::Bhd => "BHD",
            Currency::Omr => "OMR",
        }
    }

    /// Region default shown before the employer picks a currency.
    pub fn default_for(region: Region) -> Self {
        match region {
            Region::Default => Currency::Inr,
            Region::Gulf => Currency::Aed,
        }
    }
}
