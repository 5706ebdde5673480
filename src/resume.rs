//! Resume record model.
//!
//! Field names serialize in camelCase so that records written by the browser
//! wizard load unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tokio::fs;

use crate::error::{Result, RirekishoError};

/// Stable identifier of an education, work or certification entry.
/// Assigned once at creation, never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Fresh random identifier for a newly created entry
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub personal_info: PersonalInfo,
    pub visa: Visa,
    pub education: Vec<Education>,
    pub work_experience: Vec<WorkExperience>,
    pub certifications: Vec<Certification>,
    pub skills: Skills,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_skills: Option<Skills>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub furigana: String,
    pub gender: Gender,
    pub birth_date: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visa {
    #[serde(rename = "type")]
    pub visa_type: String,
    pub expiry_date: String,
    pub validity_remaining: String,
}

impl Default for Visa {
    fn default() -> Self {
        Self {
            visa_type: "Working Holiday".to_string(),
            expiry_date: String::new(),
            validity_remaining: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: EntryId,
    pub institution: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
    pub country: String,
    pub status: EducationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_degree: Option<String>,
}

impl Education {
    /// Empty entry with the given id and degree label
    pub fn new(id: EntryId, degree: &str) -> Self {
        Self {
            id,
            institution: String::new(),
            degree: degree.to_string(),
            start_date: String::new(),
            end_date: String::new(),
            country: String::new(),
            status: EducationStatus::Graduated,
            translated_institution: None,
            translated_degree: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationStatus {
    Enrolled,
    #[default]
    Graduated,
    Withdrawn,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub id: EntryId,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub country: String,
    pub contract_type: ContractType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_description: Option<String>,
}

impl WorkExperience {
    pub fn new(id: EntryId) -> Self {
        Self {
            id,
            company: String::new(),
            position: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            country: String::new(),
            contract_type: ContractType::FullTime,
            description: String::new(),
            translated_description: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    #[default]
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Internship,
    Contract,
    Freelance,
    Volunteer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: EntryId,
    pub name: String,
    pub date: String,
    pub country: String,
    pub is_driving_license: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_international_permit: Option<bool>,
}

impl Certification {
    pub fn new(id: EntryId) -> Self {
        Self {
            id,
            name: String::new(),
            date: String::new(),
            country: String::new(),
            is_driving_license: false,
            has_international_permit: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skills {
    pub language_level: String,
    pub technical_skills: String,
    pub hobbies: String,
}

impl Resume {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RirekishoError::FileNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_wizard_json() {
        let json = r#"{
            "personalInfo": {
                "firstName": "John", "lastName": "Smith", "furigana": "",
                "gender": "Prefer not to say", "birthDate": "1990-04-12",
                "email": "john@example.com", "phone": "", "address": ""
            },
            "visa": { "type": "Working Holiday", "expiryDate": "", "validityRemaining": "" },
            "education": [{
                "id": "edu-uni", "institution": "MIT", "degree": "Computer Science",
                "startDate": "2008-09-01", "endDate": "2012-06-01", "country": "USA",
                "status": "Graduated", "translatedDegree": "コンピューターサイエンス"
            }],
            "workExperience": [{
                "id": "w1", "company": "Acme", "position": "Lead", "startDate": "2012-07-01",
                "endDate": "", "country": "USA", "contractType": "Part-time",
                "description": "Managed a team of 5."
            }],
            "certifications": [],
            "skills": { "languageLevel": "English: Native", "technicalSkills": "", "hobbies": "" }
        }"#;

        let resume: Resume = serde_json::from_str(json).unwrap();
        assert_eq!(resume.personal_info.gender, Gender::PreferNotToSay);
        assert_eq!(resume.education[0].id, EntryId::from("edu-uni"));
        assert_eq!(resume.education[0].translated_institution, None);
        assert_eq!(
            resume.education[0].translated_degree.as_deref(),
            Some("コンピューターサイエンス")
        );
        assert_eq!(resume.work_experience[0].contract_type, ContractType::PartTime);
        assert!(resume.translated_skills.is_none());
    }

    #[test]
    fn test_serializes_camel_case_and_skips_missing_translations() {
        let work = WorkExperience::new(EntryId::from("w1"));
        let value = serde_json::to_value(&work).unwrap();

        assert_eq!(value["contractType"], "Full-time");
        assert!(value.get("translatedDescription").is_none());
        assert!(value.get("startDate").is_some());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(EntryId::generate(), EntryId::generate());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = Resume::load("/nonexistent/resume.json").await.unwrap_err();
        assert!(matches!(err, RirekishoError::FileNotFound(_)));
    }
}
