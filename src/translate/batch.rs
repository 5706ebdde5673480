use futures::future::join_all;
use tracing::{debug, info};

use crate::resume::{Education, Resume, Skills, WorkExperience};
use crate::update::{EducationTranslation, PartialUpdate, WorkTranslation};
use super::field::FieldTranslator;
use super::prompts::category;

/// A translatable text field of one entry type
struct Field<E> {
    source: fn(&E) -> &str,
    category: &'static str,
}

fn work_description(entry: &WorkExperience) -> &str {
    &entry.description
}

fn education_degree(entry: &Education) -> &str {
    &entry.degree
}

const WORK_DESCRIPTION: Field<WorkExperience> = Field {
    source: work_description,
    category: category::WORK_TASKS,
};

const EDUCATION_DEGREE: Field<Education> = Field {
    source: education_degree,
    category: category::DEGREE,
};

fn skill_languages(skills: &Skills) -> &str {
    &skills.language_level
}

fn skill_technical(skills: &Skills) -> &str {
    &skills.technical_skills
}

fn skill_hobbies(skills: &Skills) -> &str {
    &skills.hobbies
}

/// Labelled lines of the combined skills block, in output order
const SKILL_LINES: [(&str, fn(&Skills) -> &str); 3] = [
    ("Languages", skill_languages),
    ("Technical", skill_technical),
    ("Hobbies", skill_hobbies),
];

/// Translates every translatable field of a resume in one concurrent batch.
///
/// The resume is only read. Results are keyed by entry id and returned as a
/// [`PartialUpdate`] for the caller to merge.
pub struct BatchOrchestrator {
    translator: FieldTranslator,
}

impl BatchOrchestrator {
    pub fn new(translator: FieldTranslator) -> Self {
        Self { translator }
    }

    pub fn translator(&self) -> &FieldTranslator {
        &self.translator
    }

    pub async fn translate_all(&self, resume: &Resume) -> PartialUpdate {
        info!(
            "Translating {} work entries, {} education entries and skills",
            resume.work_experience.len(),
            resume.education.len()
        );

        let work = join_all(resume.work_experience.iter().map(|entry| async move {
            WorkTranslation {
                id: entry.id.clone(),
                translated_description: self.translate_field(entry, &WORK_DESCRIPTION).await,
            }
        }));

        let education = join_all(resume.education.iter().map(|entry| async move {
            EducationTranslation {
                id: entry.id.clone(),
                // School names stay in their original script
                translated_institution: entry.institution.clone(),
                translated_degree: self.translate_field(entry, &EDUCATION_DEGREE).await,
            }
        }));

        let skills_input = combine_skills(&resume.skills);
        let skills = async {
            if skills_input.is_empty() {
                return String::new();
            }
            self.translator.translate(&skills_input, category::SKILLS).await
        };

        let (work_experience, education, language_level) = tokio::join!(work, education, skills);

        let update = PartialUpdate {
            work_experience,
            education,
            translated_skills: Skills {
                language_level,
                // Folded into language_level by the combined skills block
                technical_skills: String::new(),
                hobbies: String::new(),
            },
        };

        info!(
            "Translation batch finished: {}/{} fields translated",
            update.translated_field_count(),
            update.field_count()
        );
        update
    }

    async fn translate_field<E>(&self, entry: &E, field: &Field<E>) -> String {
        let text = (field.source)(entry);
        let translation = self.translator.translate(text, field.category).await;
        debug!(
            "{}: {} chars in, {} chars out",
            field.category,
            text.chars().count(),
            translation.chars().count()
        );
        translation
    }
}

/// Build the combined skills input, one labelled line per non-empty entry
pub fn combine_skills(skills: &Skills) -> String {
    SKILL_LINES
        .iter()
        .filter_map(|(label, source)| {
            let value = source(skills);
            (!value.is_empty()).then(|| format!("{}: {}", label, value))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::RirekishoError;
    use crate::resume::EntryId;
    use crate::translate::MockTextGenerator;
    use std::sync::Arc;

    fn orchestrator(mock: MockTextGenerator) -> BatchOrchestrator {
        BatchOrchestrator::new(FieldTranslator::new(
            Arc::new(mock),
            &Config::default().translate,
        ))
    }

    fn work(id: &str, description: &str) -> WorkExperience {
        WorkExperience {
            description: description.to_string(),
            ..WorkExperience::new(EntryId::from(id))
        }
    }

    fn education(id: &str, institution: &str, degree: &str) -> Education {
        Education {
            institution: institution.to_string(),
            ..Education::new(EntryId::from(id), degree)
        }
    }

    #[test]
    fn test_combine_skills_skips_empty_lines() {
        let skills = Skills {
            language_level: "English: Native".to_string(),
            technical_skills: String::new(),
            hobbies: "Hiking".to_string(),
        };
        assert_eq!(combine_skills(&skills), "Languages: English: Native\nHobbies: Hiking");
        assert_eq!(combine_skills(&Skills::default()), "");
    }

    #[tokio::test]
    async fn test_single_work_entry() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .withf(|request| request.content.ends_with("Managed a team of 5."))
            .times(1)
            .returning(|_| Ok("・チームを5名管理".to_string()));

        let resume = Resume {
            work_experience: vec![work("w1", "Managed a team of 5.")],
            ..Resume::default()
        };
        let update = orchestrator(mock).translate_all(&resume).await;

        assert_eq!(
            update.work_experience,
            vec![WorkTranslation {
                id: EntryId::from("w1"),
                translated_description: "・チームを5名管理".to_string(),
            }]
        );
        assert_eq!(update.translated_skills, Skills::default());
    }

    #[tokio::test]
    async fn test_single_education_entry_keeps_institution() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .withf(|request| request.content.contains("academic degree or major"))
            .times(1)
            .returning(|_| Ok("コンピューターサイエンス".to_string()));

        let resume = Resume {
            education: vec![education("e1", "MIT", "Computer Science")],
            ..Resume::default()
        };
        let update = orchestrator(mock).translate_all(&resume).await;

        assert_eq!(
            update.education,
            vec![EducationTranslation {
                id: EntryId::from("e1"),
                translated_institution: "MIT".to_string(),
                translated_degree: "コンピューターサイエンス".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_skills_make_no_call() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().never();

        let update = orchestrator(mock).translate_all(&Resume::default()).await;
        assert_eq!(update.translated_skills.language_level, "");
        assert!(update.work_experience.is_empty());
        assert!(update.education.is_empty());
    }

    #[tokio::test]
    async fn test_skills_failure_does_not_affect_other_fields() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .withf(|request| request.content.contains("skills and hobbies"))
            .returning(|_| Err(RirekishoError::Translation("connection reset".to_string())));
        mock.expect_generate()
            .withf(|request| request.content.contains("work experience tasks"))
            .returning(|_| Ok("・販売".to_string()));
        mock.expect_generate()
            .withf(|request| request.content.contains("academic degree or major"))
            .returning(|_| Ok("経済学".to_string()));

        let resume = Resume {
            work_experience: vec![work("w1", "Sold things")],
            education: vec![education("e1", "LSE", "Economics")],
            skills: Skills {
                language_level: "English: Native".to_string(),
                ..Skills::default()
            },
            ..Resume::default()
        };
        let update = orchestrator(mock).translate_all(&resume).await;

        assert_eq!(update.translated_skills.language_level, "");
        assert_eq!(update.work_experience[0].translated_description, "・販売");
        assert_eq!(update.education[0].translated_degree, "経済学");
        assert_eq!(update.education[0].translated_institution, "LSE");
    }

    #[tokio::test]
    async fn test_skills_sent_as_one_labelled_block() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .withf(|request| {
                request.content.ends_with("Languages: English\nTechnical: Rust\nHobbies: Go")
            })
            .times(1)
            .returning(|_| Ok("英語\nRust\n囲碁".to_string()));

        let resume = Resume {
            skills: Skills {
                language_level: "English".to_string(),
                technical_skills: "Rust".to_string(),
                hobbies: "Go".to_string(),
            },
            ..Resume::default()
        };
        let update = orchestrator(mock).translate_all(&resume).await;

        assert_eq!(update.translated_skills.language_level, "英語\nRust\n囲碁");
        assert_eq!(update.translated_skills.technical_skills, "");
        assert_eq!(update.translated_skills.hobbies, "");
    }

    #[tokio::test]
    async fn test_resume_is_not_modified() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().returning(|_| Ok("・訳".to_string()));

        let resume = Resume {
            work_experience: vec![work("w1", "Did work")],
            education: vec![education("e1", "MIT", "Physics")],
            ..Resume::default()
        };
        let before = resume.clone();
        orchestrator(mock).translate_all(&resume).await;

        assert_eq!(resume, before);
    }
}
