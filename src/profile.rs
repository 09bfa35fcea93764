// src/profile.rs

use crate::constants::ASSISTANT_NAME;
use crate::errors::{FolioError, FolioResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUNDLED_PROFILE: &str = include_str!("../data/profile.json");

/// The portfolio owner's public facts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub time_span: String,
    #[serde(default)]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub major: String,
    #[serde(default)]
    pub time_span: String,
}

/// Static datasets the assistant answers from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub assistant_name: String,
    pub owner: Owner,
    pub projects: Vec<Project>,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            assistant_name: ASSISTANT_NAME.to_string(),
            owner: Owner::default(),
            projects: Vec::new(),
            experiences: Vec::new(),
            education: Vec::new(),
        }
    }
}

impl Profile {
    /// The assistant's name, or the default one when the profile leaves it blank.
    pub fn display_name(&self) -> &str {
        if self.assistant_name.trim().is_empty() {
            ASSISTANT_NAME
        } else {
            &self.assistant_name
        }
    }

    /// The profile shipped with the crate.
    pub fn bundled() -> FolioResult<Self> {
        Self::from_json(BUNDLED_PROFILE)
    }

    pub fn from_json(json: &str) -> FolioResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FolioError::profile_error(format!("Failed to parse profile: {}", e)))
    }

    pub fn load(path: &Path) -> FolioResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            FolioError::profile_error(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let profile = Self::from_json(&json)?;
        debug!(
            "Loaded profile from {}: {} projects, {} experiences, {} education entries",
            path.display(),
            profile.projects.len(),
            profile.experiences.len(),
            profile.education.len()
        );
        Ok(profile)
    }

    /// Loads `path` when given, otherwise falls back to the bundled profile.
    pub fn load_or_bundled(path: Option<&Path>) -> FolioResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }
}
