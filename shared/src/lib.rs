use serde::{Deserialize, Serialize};
use std::fmt;
use chrono::NaiveDate;
use thiserror::Error;

/// Storage key holding the serialized pet profile
pub const PET_INFO_KEY: &str = "petInfo";
/// Storage key holding the serialized visit list
pub const VISITS_KEY: &str = "visits";

/// Static attributes of the pet. There is exactly one profile per record store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PetProfile {
    pub name: String,
    /// Free text, deliberately not validated as a number
    pub age: String,
    pub allergies: String,
    pub favorite_food: String,
    pub personality_traits: String,
    /// Picture encoded as a `data:` URL
    pub picture: Option<String>,
}

impl PetProfile {
    /// Read a single text field
    pub fn field(&self, field: PetField) -> &str {
        match field {
            PetField::Name => &self.name,
            PetField::Age => &self.age,
            PetField::Allergies => &self.allergies,
            PetField::FavoriteFood => &self.favorite_food,
            PetField::PersonalityTraits => &self.personality_traits,
        }
    }

    /// Replace a single text field, leaving the rest untouched
    pub fn set_field(&mut self, field: PetField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PetField::Name => self.name = value,
            PetField::Age => self.age = value,
            PetField::Allergies => self.allergies = value,
            PetField::FavoriteFood => self.favorite_food = value,
            PetField::PersonalityTraits => self.personality_traits = value,
        }
    }

    pub fn has_picture(&self) -> bool {
        self.picture.is_some()
    }
}

/// One medical visit log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    /// Calendar date of the visit, stored as `YYYY-MM-DD`
    pub date: NaiveDate,
    #[serde(default)]
    pub reasons: String,
    #[serde(default)]
    pub symptoms: String,
    #[serde(default)]
    pub behavior_changes: String,
}

impl VisitRecord {
    /// Blank visit dated on the given day
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            date,
            reasons: String::new(),
            symptoms: String::new(),
            behavior_changes: String::new(),
        }
    }

    /// ISO 8601 representation of the visit date
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Editable text fields of a [`PetProfile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PetField {
    Name,
    Age,
    Allergies,
    FavoriteFood,
    PersonalityTraits,
}

impl PetField {
    pub const ALL: [PetField; 5] = [
        PetField::Name,
        PetField::Age,
        PetField::Allergies,
        PetField::FavoriteFood,
        PetField::PersonalityTraits,
    ];

    /// Key used in the persisted JSON document
    pub fn key(&self) -> &'static str {
        match self {
            PetField::Name => "name",
            PetField::Age => "age",
            PetField::Allergies => "allergies",
            PetField::FavoriteFood => "favoriteFood",
            PetField::PersonalityTraits => "personalityTraits",
        }
    }

    /// Human readable label, as used in the CSV export
    pub fn label(&self) -> &'static str {
        match self {
            PetField::Name => "Name",
            PetField::Age => "Age",
            PetField::Allergies => "Allergies",
            PetField::FavoriteFood => "Favorite Food",
            PetField::PersonalityTraits => "Personality Traits",
        }
    }
}

impl fmt::Display for PetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Editable fields of a [`VisitRecord`] draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitField {
    Date,
    Reasons,
    Symptoms,
    BehaviorChanges,
}

impl VisitField {
    pub const ALL: [VisitField; 4] = [
        VisitField::Date,
        VisitField::Reasons,
        VisitField::Symptoms,
        VisitField::BehaviorChanges,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            VisitField::Date => "date",
            VisitField::Reasons => "reasons",
            VisitField::Symptoms => "symptoms",
            VisitField::BehaviorChanges => "behaviorChanges",
        }
    }

    /// Column header used in the CSV export
    pub fn label(&self) -> &'static str {
        match self {
            VisitField::Date => "Date",
            VisitField::Reasons => "Reasons for Visit",
            VisitField::Symptoms => "Symptoms",
            VisitField::BehaviorChanges => "Behavior Changes",
        }
    }
}

impl fmt::Display for VisitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Parse a visit date in ISO 8601 calendar form (`YYYY-MM-DD`)
pub fn parse_visit_date(value: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| FieldError::InvalidDate(value.to_string()))
}

/// Rejected input for a visit draft field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Response after saving the pet profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePetProfileResponse {
    pub profile: PetProfile,
    pub success_message: String,
}

/// Response after saving a visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveVisitResponse {
    pub visit: VisitRecord,
    pub visit_count: usize,
    pub success_message: String,
}

/// Response after a clear request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearDataResponse {
    /// False when the user declined the confirmation
    pub cleared: bool,
    pub success_message: Option<String>,
}

/// Rendered CSV export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataResponse {
    pub csv_content: String,
    pub filename: String,
    pub visit_count: usize,
    pub pet_name: String,
}

/// Request to export into a directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathRequest {
    /// Target directory; the configured or default location is used when absent
    pub custom_path: Option<String>,
}

/// Result of writing an export file to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub visit_count: usize,
}

/// One row of the visit history listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitHistoryEntry {
    pub formatted_date: String,
    pub symptoms: String,
}
