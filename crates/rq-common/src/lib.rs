pub mod logging;
pub mod matching;
pub mod normalize;
pub mod spec;
pub mod vocab;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use vocab::{Gender, NoticePeriod, RemoteWork};

// Candidate record shape as the evaluator sees it. Every non-identity field
// is optional: missing data is resolved per-filter through
// `include_not_mentioned`, never by guessing a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Candidate {
    pub id: i64,
    pub name: Option<String>,
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub willing_to_relocate: bool,
    pub experience_years: Option<f64>,
    pub current_salary: Option<f64>,
    pub education: Option<String>,
    pub industry: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub current_company: Option<String>,
    pub institute: Option<String>,
    pub notice_period: Option<NoticePeriod>,
    pub remote_preference: Option<RemoteWork>,
    pub travel_ok: Option<bool>,
    pub gender: Option<Gender>,
    pub resume_updated_at: Option<NaiveDate>,
    pub last_active_days: Option<u32>,
}
