use chrono::NaiveDate;

use crate::normalize::{dedup_exact, location_key, normalize_locations, title_case};
use crate::vocab::{Currency, DiversityTag, NoticePeriod, Region, RemoteWork};

use super::requirement::RequirementSpec;
use super::validate::{ValidationError, ValidationFailure};

/// Which numeric range a bound update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Experience,
    Salary,
}

impl RangeField {
    /// Wire-facing name used in validation messages.
    pub fn name(&self) -> &'static str {
        match self {
            RangeField::Experience => "experience",
            RangeField::Salary => "salary",
        }
    }
}

/// Accumulates filter criteria field by field and produces one normalized,
/// validated `RequirementSpec` at finalize.
///
/// One builder per requirement-creation session; no operation validates
/// across fields — all cross-field rules run in `finalize`. Abandoning the
/// builder discards it with nothing to roll back.
#[derive(Debug, Clone)]
pub struct RequirementBuilder {
    title: String,
    description: String,
    job_location: String,
    include_skills: Vec<String>,
    exclude_skills: Vec<String>,
    key_skills: Vec<String>,
    include_locations: Vec<String>,
    exclude_locations: Vec<String>,
    candidate_designations: Vec<String>,
    experience_min: Option<f64>,
    experience_max: Option<f64>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    currency: Currency,
    education: Option<String>,
    industry: Option<String>,
    department: Option<String>,
    notice_period: Option<NoticePeriod>,
    remote_work: Option<RemoteWork>,
    travel_required: Option<bool>,
    include_willing_to_relocate: bool,
    include_not_mentioned: bool,
    benefits: Vec<String>,
    institute: Option<String>,
    current_company: Option<String>,
    resume_freshness: Option<NaiveDate>,
    last_active_days: Option<u32>,
    diversity_preference: Vec<DiversityTag>,
    valid_till: Option<NaiveDate>,
    region: Region,
}

impl Default for RequirementBuilder {
    fn default() -> Self {
        Self::new(Region::Default)
    }
}

impl RequirementBuilder {
    pub fn new(region: Region) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            job_location: String::new(),
            include_skills: Vec::new(),
            exclude_skills: Vec::new(),
            key_skills: Vec::new(),
            include_locations: Vec::new(),
            exclude_locations: Vec::new(),
            candidate_designations: Vec::new(),
            experience_min: None,
            experience_max: None,
            salary_min: None,
            salary_max: None,
            currency: Currency::default_for(region),
            education: None,
            industry: None,
            department: None,
            notice_period: None,
            remote_work: None,
            travel_required: None,
            include_willing_to_relocate: false,
            include_not_mentioned: false,
            benefits: Vec::new(),
            institute: None,
            current_company: None,
            resume_freshness: None,
            last_active_days: None,
            diversity_preference: Vec::new(),
            valid_till: None,
            region,
        }
    }

    // === scalar fields ===

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_job_location(&mut self, location: impl Into<String>) {
        self.job_location = location.into();
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    pub fn set_education(&mut self, value: Option<String>) {
        self.education = none_if_blank(value);
    }

    pub fn set_industry(&mut self, value: Option<String>) {
        self.industry = none_if_blank(value);
    }

    pub fn set_department(&mut self, value: Option<String>) {
        self.department = none_if_blank(value);
    }

    pub fn set_notice_period(&mut self, value: Option<NoticePeriod>) {
        self.notice_period = value;
    }

    pub fn set_remote_work(&mut self, value: Option<RemoteWork>) {
        self.remote_work = value;
    }

    pub fn set_travel_required(&mut self, value: Option<bool>) {
        self.travel_required = value;
    }

    pub fn set_include_willing_to_relocate(&mut self, value: bool) {
        self.include_willing_to_relocate = value;
    }

    pub fn set_include_not_mentioned(&mut self, value: bool) {
        self.include_not_mentioned = value;
    }

    pub fn set_institute(&mut self, value: Option<String>) {
        self.institute = none_if_blank(value);
    }

    pub fn set_current_company(&mut self, value: Option<String>) {
        self.current_company = none_if_blank(value);
    }

    pub fn set_resume_freshness(&mut self, value: Option<NaiveDate>) {
        self.resume_freshness = value;
    }

    pub fn set_last_active_days(&mut self, value: Option<u32>) {
        self.last_active_days = value;
    }

    pub fn set_valid_till(&mut self, value: Option<NaiveDate>) {
        self.valid_till = value;
    }

    // === skills ===

    /// Formats (trim + title case) and adds an include skill. No-op when
    /// the formatted value is empty or already present.
    pub fn add_include_skill(&mut self, raw: &str) {
        push_formatted_skill(&mut self.include_skills, raw);
    }

    /// Removes by exact match against the formatted value. No-op if absent.
    pub fn remove_include_skill(&mut self, skill: &str) {
        self.include_skills.retain(|s| s != skill);
    }

    pub fn add_exclude_skill(&mut self, raw: &str) {
        push_formatted_skill(&mut self.exclude_skills, raw);
    }

    pub fn remove_exclude_skill(&mut self, skill: &str) {
        self.exclude_skills.retain(|s| s != skill);
    }

    /// Key skills of the posting itself; unioned into the include filter
    /// at finalize.
    pub fn add_key_skill(&mut self, raw: &str) {
        push_formatted_skill(&mut self.key_skills, raw);
    }

    pub fn remove_key_skill(&mut self, skill: &str) {
        self.key_skills.retain(|s| s != skill);
    }

    // === locations ===

    /// Adds an include location. Dedup is by case-insensitive key with
    /// first-seen casing retained; any exclude entry with the same key is
    /// removed (a location lives in at most one set, last write wins).
    pub fn add_include_location(&mut self, raw: &str) {
        add_location(&mut self.include_locations, &mut self.exclude_locations, raw);
    }

    pub fn add_exclude_location(&mut self, raw: &str) {
        add_location(&mut self.exclude_locations, &mut self.include_locations, raw);
    }

    pub fn remove_include_location(&mut self, location: &str) {
        let key = location_key(location);
        self.include_locations.retain(|l| location_key(l) != key);
    }

    pub fn remove_exclude_location(&mut self, location: &str) {
        let key = location_key(location);
        self.exclude_locations.retain(|l| location_key(l) != key);
    }

    // === designations / benefits ===

    pub fn add_designation(&mut self, raw: &str) {
        push_formatted_skill(&mut self.candidate_designations, raw);
    }

    pub fn remove_designation(&mut self, designation: &str) {
        self.candidate_designations.retain(|d| d != designation);
    }

    pub fn add_benefit(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() || self.benefits.iter().any(|b| b == trimmed) {
            return;
        }
        self.benefits.push(trimmed.to_string());
    }

    pub fn remove_benefit(&mut self, benefit: &str) {
        self.benefits.retain(|b| b != benefit);
    }

    // === numeric ranges ===

    /// Stores bounds as given; ordering and sign are checked at finalize.
    pub fn set_numeric_range(&mut self, which: RangeField, min: Option<f64>, max: Option<f64>) {
        match which {
            RangeField::Experience => {
                self.experience_min = min;
                self.experience_max = max;
            }
            RangeField::Salary => {
                self.salary_min = min;
                self.salary_max = max;
            }
        }
    }

    // === diversity ===

    /// Checking "all" replaces every selection; checking a specific value
    /// first evicts "all". Unchecking simply removes. The set may end
    /// empty, meaning no preference was expressed.
    pub fn set_diversity_preference(&mut self, toggled: DiversityTag, checked: bool) {
        if !checked {
            self.diversity_preference.retain(|t| *t != toggled);
            return;
        }

        if toggled == DiversityTag::All {
            self.diversity_preference = vec![DiversityTag::All];
            return;
        }

        self.diversity_preference.retain(|t| *t != DiversityTag::All);
        if !self.diversity_preference.contains(&toggled) {
            self.diversity_preference.push(toggled);
        }
    }

    // === read access (used by the UI to echo state) ===

    pub fn include_skills(&self) -> &[String] {
        &self.include_skills
    }

    pub fn exclude_skills(&self) -> &[String] {
        &self.exclude_skills
    }

    pub fn include_locations(&self) -> &[String] {
        &self.include_locations
    }

    pub fn exclude_locations(&self) -> &[String] {
        &self.exclude_locations
    }

    pub fn diversity_preference(&self) -> &[DiversityTag] {
        &self.diversity_preference
    }

    /// Runs the full normalization + validation pass and consumes the
    /// builder.
    ///
    /// Order: required fields, numeric ranges, location reconciliation
    /// (normalize both sets, union the job location into includes, then
    /// drop include keys that are excluded), skill reconciliation (union
    /// key skills, then exclude wins overlap), dedup pass-through. Every
    /// violated rule is collected before returning; user input never
    /// produces a panic here.
    pub fn finalize(self) -> Result<RequirementSpec, ValidationFailure> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("jobLocation", &self.job_location),
        ] {
            if value.trim().is_empty() {
                errors.push(ValidationError::MissingRequiredField { field });
            }
        }

        check_range(
            &mut errors,
            RangeField::Experience,
            self.experience_min,
            self.experience_max,
        );
        check_range(&mut errors, RangeField::Salary, self.salary_min, self.salary_max);

        if !errors.is_empty() {
            return Err(ValidationFailure::new(errors));
        }

        let mut include_locations = normalize_locations(&self.include_locations);
        let exclude_locations = normalize_locations(&self.exclude_locations);

        // The posting's own location is always an implicit include filter.
        let job_location = self.job_location.trim().to_string();
        let job_key = location_key(&job_location);
        if !include_locations.iter().any(|l| location_key(l) == job_key) {
            include_locations.push(job_location.clone());
        }

        // Residual overlap: exclude wins.
        let exclude_keys: Vec<String> = exclude_locations.iter().map(|l| location_key(l)).collect();
        include_locations.retain(|l| !exclude_keys.contains(&location_key(l)));

        let mut include_skills = self.include_skills;
        for key_skill in &self.key_skills {
            if !include_skills.iter().any(|s| s == key_skill) {
                include_skills.push(key_skill.clone());
            }
        }
        // Same tie-break policy as locations: exclude wins.
        include_skills.retain(|s| !self.exclude_skills.contains(s));

        Ok(RequirementSpec {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            job_location,
            include_skills,
            exclude_skills: self.exclude_skills,
            key_skills: self.key_skills,
            include_locations,
            exclude_locations,
            candidate_designations: self.candidate_designations,
            experience_min: self.experience_min,
            experience_max: self.experience_max,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            currency: self.currency,
            education: self.education,
            industry: self.industry,
            department: self.department,
            notice_period: self.notice_period,
            remote_work: self.remote_work,
            travel_required: self.travel_required,
            include_willing_to_relocate: self.include_willing_to_relocate,
            include_not_mentioned: self.include_not_mentioned,
            benefits: dedup_exact(&self.benefits),
            institute: self.institute,
            current_company: self.current_company,
            resume_freshness: self.resume_freshness,
            last_active_days: self.last_active_days,
            diversity_preference: self.diversity_preference,
            valid_till: self.valid_till,
            region: self.region,
        })
    }
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn push_formatted_skill(list: &mut Vec<String>, raw: &str) {
    let formatted = title_case(raw);
    if formatted.is_empty() || list.iter().any(|s| *s == formatted) {
        return;
    }
    list.push(formatted);
}

fn add_location(target: &mut Vec<String>, counterpart: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }

    let key = location_key(trimmed);
    counterpart.retain(|l| location_key(l) != key);

    if target.iter().any(|l| location_key(l) == key) {
        return;
    }
    target.push(trimmed.to_string());
}

fn check_range(
    errors: &mut Vec<ValidationError>,
    which: RangeField,
    min: Option<f64>,
    max: Option<f64>,
) {
    let field = which.name();

    for bound in [min, max].into_iter().flatten() {
        if bound < 0.0 {
            errors.push(ValidationError::InvalidRange {
                field,
                detail: format!("bounds must be non-negative, got {bound}"),
            });
            return;
        }
    }

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            errors.push(ValidationError::InvalidRange {
                field,
                detail: format!("min {min} exceeds max {max}"),
            });
        }
    }
}
