use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, RirekishoError};
use crate::resume::{Certification, Education, EntryId, Resume, Skills, WorkExperience};
use crate::translate::batch::combine_skills;
use crate::update::PartialUpdate;

/// Fixed education slots every new resume starts with
const DEFAULT_EDUCATION_SLOTS: [(&str, &str); 4] = [
    ("edu-elem", "Elementary School"),
    ("edu-mid", "Middle School"),
    ("edu-high", "High School"),
    ("edu-uni", "University / Vocational"),
];

/// Owns the resume being edited. Entries are created and deleted only here;
/// translation results come in through [`ResumeState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeState {
    resume: Resume,
}

impl Default for ResumeState {
    fn default() -> Self {
        let education = DEFAULT_EDUCATION_SLOTS
            .iter()
            .map(|(id, degree)| Education::new(EntryId::from(*id), degree))
            .collect();

        Self {
            resume: Resume {
                education,
                skills: Skills {
                    language_level: "English: Native\nJapanese: Conversational".to_string(),
                    technical_skills: String::new(),
                    hobbies: String::new(),
                },
                ..Resume::default()
            },
        }
    }
}

impl ResumeState {
    pub fn new(resume: Resume) -> Self {
        Self { resume }
    }

    pub fn resume(&self) -> &Resume {
        &self.resume
    }

    pub fn into_resume(self) -> Resume {
        self.resume
    }

    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(Resume::load(path).await?))
    }

    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.resume.save(path).await
    }

    pub fn add_education(&mut self) -> EntryId {
        let id = EntryId::generate();
        self.resume
            .education
            .push(Education::new(id.clone(), "Additional Education"));
        id
    }

    pub fn add_work(&mut self) -> EntryId {
        let id = EntryId::generate();
        self.resume.work_experience.push(WorkExperience::new(id.clone()));
        id
    }

    pub fn add_certification(&mut self) -> EntryId {
        let id = EntryId::generate();
        self.resume.certifications.push(Certification::new(id.clone()));
        id
    }

    pub fn update_education<F>(&mut self, id: &EntryId, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Education),
    {
        let entry = self
            .resume
            .education
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| not_found("education", id))?;
        edit(entry);
        Ok(())
    }

    pub fn update_work<F>(&mut self, id: &EntryId, edit: F) -> Result<()>
    where
        F: FnOnce(&mut WorkExperience),
    {
        let entry = self
            .resume
            .work_experience
            .iter_mut()
            .find(|w| &w.id == id)
            .ok_or_else(|| not_found("work", id))?;
        edit(entry);
        Ok(())
    }

    pub fn update_certification<F>(&mut self, id: &EntryId, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Certification),
    {
        let entry = self
            .resume
            .certifications
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| not_found("certification", id))?;
        edit(entry);
        Ok(())
    }

    pub fn remove_education(&mut self, id: &EntryId) -> Result<Education> {
        let index = self
            .resume
            .education
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| not_found("education", id))?;
        Ok(self.resume.education.remove(index))
    }

    pub fn remove_work(&mut self, id: &EntryId) -> Result<WorkExperience> {
        let index = self
            .resume
            .work_experience
            .iter()
            .position(|w| &w.id == id)
            .ok_or_else(|| not_found("work", id))?;
        Ok(self.resume.work_experience.remove(index))
    }

    pub fn remove_certification(&mut self, id: &EntryId) -> Result<Certification> {
        let index = self
            .resume
            .certifications
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| not_found("certification", id))?;
        Ok(self.resume.certifications.remove(index))
    }

    /// Store a furigana suggestion. Empty suggestions leave the field alone.
    pub fn set_furigana(&mut self, furigana: &str) -> bool {
        let furigana = furigana.trim();
        if furigana.is_empty() {
            return false;
        }
        self.resume.personal_info.furigana = furigana.to_string();
        true
    }

    /// Merge a translation batch into the resume.
    ///
    /// Only translated-* fields of entries whose id appears in the update are
    /// written. An empty value means "nothing came back" and keeps whatever
    /// was there before, unless the source text itself is now blank, in which
    /// case the stale translation is dropped. Ids that no longer exist are
    /// skipped.
    pub fn apply(&mut self, update: &PartialUpdate) -> usize {
        let mut written = 0;

        for translation in &update.work_experience {
            let Some(entry) = self
                .resume
                .work_experience
                .iter_mut()
                .find(|w| w.id == translation.id)
            else {
                debug!("Skipping translation for removed work entry {}", translation.id);
                continue;
            };
            written += merge_field(
                &mut entry.translated_description,
                &entry.description,
                &translation.translated_description,
            );
        }

        for translation in &update.education {
            let Some(entry) = self
                .resume
                .education
                .iter_mut()
                .find(|e| e.id == translation.id)
            else {
                debug!("Skipping translation for removed education entry {}", translation.id);
                continue;
            };
            written += merge_field(
                &mut entry.translated_institution,
                &entry.institution,
                &translation.translated_institution,
            );
            written += merge_field(
                &mut entry.translated_degree,
                &entry.degree,
                &translation.translated_degree,
            );
        }

        if combine_skills(&self.resume.skills).trim().is_empty() {
            if self.resume.translated_skills.take().is_some() {
                debug!("Dropped skills translation of an empty skills section");
            }
        } else {
            let incoming = &update.translated_skills;
            let skills = self.resume.translated_skills.get_or_insert_with(Skills::default);
            written += merge_text(&mut skills.language_level, &incoming.language_level);
            written += merge_text(&mut skills.technical_skills, &incoming.technical_skills);
            written += merge_text(&mut skills.hobbies, &incoming.hobbies);
            if skills == &Skills::default() {
                self.resume.translated_skills = None;
            }
        }

        info!("Merged {} translated fields into resume", written);
        written
    }
}

fn merge_field(slot: &mut Option<String>, source: &str, value: &str) -> usize {
    if source.trim().is_empty() {
        *slot = None;
        return 0;
    }
    if value.is_empty() {
        return 0;
    }
    *slot = Some(value.to_string());
    1
}

fn merge_text(slot: &mut String, value: &str) -> usize {
    if value.is_empty() {
        return 0;
    }
    *slot = value.to_string();
    1
}

fn not_found(kind: &'static str, id: &EntryId) -> RirekishoError {
    RirekishoError::EntryNotFound {
        kind,
        id: id.to_string(),
    }
}
