//! Partial-update document produced by a translation batch.
//!
//! A sparse overlay of translated values keyed by entry id. It never carries
//! source fields, so merging it cannot touch what the user typed.

use serde::{Deserialize, Serialize};

use crate::resume::{EntryId, Skills};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialUpdate {
    pub work_experience: Vec<WorkTranslation>,
    pub education: Vec<EducationTranslation>,
    pub translated_skills: Skills,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkTranslation {
    pub id: EntryId,
    pub translated_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationTranslation {
    pub id: EntryId,
    pub translated_institution: String,
    pub translated_degree: String,
}

impl PartialUpdate {
    pub fn work(&self, id: &EntryId) -> Option<&WorkTranslation> {
        self.work_experience.iter().find(|w| &w.id == id)
    }

    pub fn education(&self, id: &EntryId) -> Option<&EducationTranslation> {
        self.education.iter().find(|e| &e.id == id)
    }

    /// Number of fields the backend actually produced text for.
    /// Institution names are copied, not translated, so they do not count.
    pub fn translated_field_count(&self) -> usize {
        let work = self
            .work_experience
            .iter()
            .filter(|w| !w.translated_description.is_empty())
            .count();
        let education = self
            .education
            .iter()
            .filter(|e| !e.translated_degree.is_empty())
            .count();
        let skills = usize::from(!self.translated_skills.language_level.is_empty());
        work + education + skills
    }

    /// Number of fields a batch attempted
    pub fn field_count(&self) -> usize {
        self.work_experience.len() + self.education.len() + 1
    }
}
