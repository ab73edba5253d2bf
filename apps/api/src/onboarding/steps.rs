//! Typed onboarding steps for skill workers and skill finders.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::AppError;
use crate::models::profile::{NewFinder, NewWorker};
use crate::skills::resolver::SkillResolver;
use crate::skills::same_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Worker,
    Finder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    #[default]
    BasicInfo,
    Skills,
    Location,
    Complete,
}

impl OnboardingStep {
    fn next(self) -> Self {
        match self {
            OnboardingStep::BasicInfo => OnboardingStep::Skills,
            OnboardingStep::Skills => OnboardingStep::Location,
            OnboardingStep::Location | OnboardingStep::Complete => OnboardingStep::Complete,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            OnboardingStep::BasicInfo => "basic_info",
            OnboardingStep::Skills => "skills",
            OnboardingStep::Location => "location",
            OnboardingStep::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDetails {
    pub address: String,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
}

/// Input for one step. The tag must name the draft's current step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepInput {
    BasicInfo {
        name: String,
        email: String,
        #[serde(default)]
        phone: Option<String>,
    },
    Skills {
        /// Comma-separated list.
        skills: String,
        #[serde(default)]
        project_description: Option<String>,
    },
    Location {
        address: String,
        lat: f64,
        lon: f64,
        #[serde(default)]
        country: Option<String>,
    },
}

impl StepInput {
    fn step(&self) -> OnboardingStep {
        match self {
            StepInput::BasicInfo { .. } => OnboardingStep::BasicInfo,
            StepInput::Skills { .. } => OnboardingStep::Skills,
            StepInput::Location { .. } => OnboardingStep::Location,
        }
    }
}

/// Everything collected so far; `step` is the step awaiting input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingDraft {
    pub role: Role,
    #[serde(default)]
    pub step: OnboardingStep,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub project_description: Option<String>,
    #[serde(default)]
    pub location: Option<LocationDetails>,
}

/// A finished draft, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub enum Registration {
    Worker(NewWorker),
    Finder(NewFinder),
}

#[derive(Debug, Error, PartialEq)]
pub enum OnboardingError {
    #[error("Please provide at least your Name and Email.")]
    MissingNameOrEmail,

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("Please enter at least one skill.")]
    NoSkills,

    #[error("Please select an address.")]
    MissingAddress,

    #[error("coordinate ({lat}, {lon}) is out of range")]
    CoordinateOutOfRange { lat: f64, lon: f64 },

    #[error("expected input for step '{expected}', got '{got}'")]
    StepOutOfOrder {
        expected: &'static str,
        got: &'static str,
    },

    #[error("onboarding is already complete")]
    AlreadyComplete,

    #[error("onboarding is not complete yet (awaiting '{0}')")]
    Incomplete(&'static str),
}

impl From<OnboardingError> for AppError {
    fn from(e: OnboardingError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl OnboardingDraft {
    pub fn new(role: Role) -> Self {
        OnboardingDraft {
            role,
            step: OnboardingStep::BasicInfo,
            name: None,
            email: None,
            phone: None,
            skills: Vec::new(),
            project_description: None,
            location: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.step == OnboardingStep::Complete
    }

    /// Validates `input` against the current step and moves to the next one.
    pub fn advance(
        mut self,
        input: StepInput,
        resolver: &SkillResolver,
    ) -> Result<Self, OnboardingError> {
        if self.is_complete() {
            return Err(OnboardingError::AlreadyComplete);
        }
        if input.step() != self.step {
            return Err(OnboardingError::StepOutOfOrder {
                expected: self.step.as_str(),
                got: input.step().as_str(),
            });
        }

        match input {
            StepInput::BasicInfo { name, email, phone } => {
                let (name, email) = check_basic_info(&name, &email)?;
                self.name = Some(name);
                self.email = Some(email);
                self.phone = non_blank(phone);
            }
            StepInput::Skills {
                skills,
                project_description,
            } => {
                self.skills = check_skills(&skills, resolver)?;
                if self.role == Role::Finder {
                    self.project_description = non_blank(project_description);
                }
            }
            StepInput::Location {
                address,
                lat,
                lon,
                country,
            } => {
                self.location = Some(LocationDetails {
                    address: check_location(&address, lat, lon)?,
                    lat,
                    lon,
                    country: non_blank(country),
                });
            }
        }

        self.step = self.step.next();
        Ok(self)
    }

    /// Builds the profile to persist. The draft round-trips through the
    /// client, so every field is validated again here.
    pub fn into_registration(
        self,
        resolver: &SkillResolver,
    ) -> Result<Registration, OnboardingError> {
        if !self.is_complete() {
            return Err(OnboardingError::Incomplete(self.step.as_str()));
        }
        let (name, email) = check_basic_info(
            self.name.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default(),
        )?;
        let skills = check_skills(&self.skills.join(","), resolver)?;
        let Some(location) = self.location else {
            return Err(OnboardingError::Incomplete(OnboardingStep::Location.as_str()));
        };
        let location = LocationDetails {
            address: check_location(&location.address, location.lat, location.lon)?,
            lat: location.lat,
            lon: location.lon,
            country: non_blank(location.country),
        };
        let phone = non_blank(self.phone);
        let project_description = match self.role {
            Role::Finder => non_blank(self.project_description),
            Role::Worker => None,
        };

        Ok(match self.role {
            Role::Worker => Registration::Worker(NewWorker {
                name,
                email,
                phone_number: phone,
                skills,
                location_lat: Some(location.lat),
                location_lon: Some(location.lon),
                country: location.country,
                address_text: Some(location.address),
            }),
            Role::Finder => Registration::Finder(NewFinder {
                name,
                email,
                phone_number: phone,
                skill_needed: skills,
                project_description,
                location_lat: Some(location.lat),
                location_lon: Some(location.lon),
                country: location.country,
                address_text: Some(location.address),
            }),
        })
    }
}

fn check_basic_info(name: &str, email: &str) -> Result<(String, String), OnboardingError> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(OnboardingError::MissingNameOrEmail);
    }
    if !is_plausible_email(email) {
        return Err(OnboardingError::InvalidEmail(email.to_string()));
    }
    Ok((name.to_string(), email.to_string()))
}

fn check_skills(raw: &str, resolver: &SkillResolver) -> Result<Vec<String>, OnboardingError> {
    let skills = parse_skill_list(raw, resolver);
    if skills.is_empty() {
        return Err(OnboardingError::NoSkills);
    }
    Ok(skills)
}

/// Returns the trimmed address.
fn check_location(address: &str, lat: f64, lon: f64) -> Result<String, OnboardingError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(OnboardingError::MissingAddress);
    }
    if !(lat.is_finite() && lon.is_finite())
        || !(-90.0..=90.0).contains(&lat)
        || !(-180.0..=180.0).contains(&lon)
    {
        return Err(OnboardingError::CoordinateOutOfRange { lat, lon });
    }
    Ok(address.to_string())
}

/// Splits a comma-separated skill list, files each entry under its
/// canonical label when one exists, and drops blanks and duplicates.
pub fn parse_skill_list(raw: &str, resolver: &SkillResolver) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let label = resolver
            .canonicalize(entry)
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| entry.to_string());
        if !skills.iter().any(|s| same_label(s, &label)) {
            skills.push(label);
        }
    }
    skills
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
