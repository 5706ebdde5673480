//! Rirekisho layout rendering and Word export.

use chrono::{Datelike, NaiveDate};
use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::config::RenderConfig;
use crate::error::{Result, RirekishoError};
use crate::resume::{EducationStatus, Gender, PersonalInfo, Resume};

const PRINT_STYLE: &str = "\
body { font-family: 'Noto Sans JP', sans-serif; font-size: 10.5pt; }
table { border-collapse: collapse; width: 100%; margin-bottom: 16px; }
td, th { border: 1px solid black; padding: 4px; }
.center { text-align: center; }
.right { text-align: right; }
.pre { white-space: pre-wrap; }
@media print { body { margin: 0; } }
";

/// Parse a form date. Accepts `YYYY-MM-DD` and `YYYY-MM`.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", date), "%Y-%m-%d"))
        .ok()
}

/// Format a date as `{year}年 {month}月`; empty when it cannot be read
pub fn format_date_japanese(date: &str) -> String {
    parse_date(date)
        .map(|d| format!("{}年 {}月", d.year(), d.month()))
        .unwrap_or_default()
}

/// Full years between `birth` and `today`
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "男",
        Gender::Female => "女",
        Gender::Other | Gender::PreferNotToSay => "",
    }
}

fn completion_label(status: EducationStatus) -> &'static str {
    match status {
        EducationStatus::Graduated => "卒業",
        _ => "終了",
    }
}

fn with_country(text: &str, country: &str) -> String {
    if country.trim().is_empty() {
        escape_html(text)
    } else {
        format!("{} ({})", escape_html(text), escape_html(country))
    }
}

fn history_row(date: Option<NaiveDate>, content: &str) -> String {
    let (year, month) = date
        .map(|d| (d.year().to_string(), d.month().to_string()))
        .unwrap_or_default();
    format!(
        "<tr><td class=\"center\">{}</td><td class=\"center\">{}</td><td>{}</td></tr>\n",
        year, month, content
    )
}

fn heading_row(title: &str) -> String {
    format!(
        "<tr><td></td><td></td><td class=\"center\"><strong>{}</strong></td></tr>\n",
        title
    )
}

fn render_birth_date(personal: &PersonalInfo, today: NaiveDate) -> String {
    match parse_date(&personal.birth_date) {
        Some(birth) => format!(
            "{}年 {}月 {}日生 (満 {} 歳)",
            birth.year(),
            birth.month(),
            birth.day(),
            age_on(birth, today)
        ),
        None => "____年 __月 __日生 (満 __ 歳)".to_string(),
    }
}

/// Render the rirekisho body markup
pub fn render_html(resume: &Resume, config: &RenderConfig, today: NaiveDate) -> String {
    let personal = &resume.personal_info;
    let mut html = String::new();

    html.push_str("<div id=\"resume-preview-content\">\n");
    html.push_str(&format!(
        "<h1>履 歴 書</h1>\n<p class=\"right\">{}年 {}月 {}日 現在</p>\n",
        today.year(),
        today.month(),
        today.day()
    ));

    // Personal details
    html.push_str("<table>\n");
    html.push_str(&format!(
        "<tr><td colspan=\"2\">ふりがな: {}</td></tr>\n",
        escape_html(&personal.furigana)
    ));
    html.push_str(&format!(
        "<tr><td colspan=\"2\"><strong>{} {}</strong> ({})</td></tr>\n",
        escape_html(&personal.last_name),
        escape_html(&personal.first_name),
        gender_label(personal.gender)
    ));
    html.push_str(&format!(
        "<tr><td>生年月日</td><td>{}</td></tr>\n",
        render_birth_date(personal, today)
    ));
    html.push_str(&format!(
        "<tr><td colspan=\"2\">住所: {}</td></tr>\n",
        escape_html(&personal.address)
    ));
    html.push_str(&format!(
        "<tr><td>電話: {}</td><td>E-mail: {}</td></tr>\n",
        escape_html(&personal.phone),
        escape_html(&personal.email)
    ));
    html.push_str("</table>\n");

    // Visa status
    let visa_type = if resume.visa.visa_type.trim().is_empty() {
        config.default_visa_type.as_str()
    } else {
        resume.visa.visa_type.as_str()
    };
    let expiry = format_date_japanese(&resume.visa.expiry_date);
    html.push_str(&format!(
        "<p><strong>在留資格 / Visa Status:</strong> {} (Expiry: {})</p>\n",
        escape_html(visa_type),
        if expiry.is_empty() { "Not specified".to_string() } else { expiry }
    ));

    // Education and work history
    html.push_str("<table>\n<tr><th>年</th><th>月</th><th>学歴・職歴</th></tr>\n");
    html.push_str(&heading_row("学 歴"));
    for edu in resume.education.iter().filter(|e| !e.institution.trim().is_empty()) {
        let institution = edu
            .translated_institution
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&edu.institution);
        let degree = edu
            .translated_degree
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&edu.degree);

        if let Some(start) = parse_date(&edu.start_date) {
            let text = format!("{} {} 入学", institution, degree);
            html.push_str(&history_row(Some(start), &with_country(&text, &edu.country)));
        }
        if let Some(end) = parse_date(&edu.end_date) {
            let text = format!("{} {}", institution, completion_label(edu.status));
            html.push_str(&history_row(Some(end), &with_country(&text, &edu.country)));
        }
    }

    html.push_str(&heading_row("職 歴"));
    for work in resume.work_experience.iter().filter(|w| !w.company.trim().is_empty()) {
        if let Some(start) = parse_date(&work.start_date) {
            let text = format!("{} 入社", work.company);
            html.push_str(&history_row(Some(start), &with_country(&text, &work.country)));
        }
        if let Some(description) = work.translated_description.as_deref().filter(|s| !s.is_empty()) {
            html.push_str(&history_row(
                None,
                &format!("<div class=\"pre\">{}</div>", escape_html(description)),
            ));
        }
        if let Some(end) = parse_date(&work.end_date) {
            let text = format!("{} 一身上の都合により退社", work.company);
            html.push_str(&history_row(Some(end), &escape_html(&text)));
        }
    }
    html.push_str("<tr><td></td><td></td><td class=\"right\">以上</td></tr>\n</table>\n");

    // Licenses and certifications
    html.push_str("<table>\n<tr><th>年</th><th>月</th><th>免許・資格</th></tr>\n");
    for cert in resume.certifications.iter().filter(|c| !c.name.trim().is_empty()) {
        let verb = if cert.is_driving_license { "取得" } else { "合格" };
        let mut content = with_country(&format!("{} {}", cert.name, verb), &cert.country);
        if cert.has_international_permit.unwrap_or(false) {
            content.push_str("<div>※ 国際免許証 取得 (日本国内での運転可能)</div>");
        }
        html.push_str(&history_row(parse_date(&cert.date), &content));
    }
    html.push_str("</table>\n");

    // Skills and hobbies
    let skills = resume
        .translated_skills
        .as_ref()
        .map(|t| t.language_level.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(resume.skills.language_level.as_str());
    html.push_str("<table>\n");
    html.push_str(&format!(
        "<tr><th>語学・スキル (Languages &amp; Skills)</th></tr>\n<tr><td class=\"pre\">{}</td></tr>\n",
        escape_html(skills)
    ));
    html.push_str(&format!(
        "<tr><th>趣味・特技 (Hobbies &amp; Interests)</th></tr>\n<tr><td class=\"pre\">{}</td></tr>\n",
        escape_html(&resume.skills.hobbies)
    ));
    html.push_str("</table>\n</div>\n");

    html
}

/// Standalone page meant for the browser print dialog
pub fn render_page(resume: &Resume, config: &RenderConfig, today: NaiveDate) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ja\">\n<head><meta charset=\"utf-8\"><title>履歴書</title>\n<style>\n{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        PRINT_STYLE.replace("Noto Sans JP", &config.font_family),
        render_html(resume, config, today)
    )
}

/// Wrap the rendered markup in the Office HTML envelope Word opens as a document
pub fn export_word(resume: &Resume, config: &RenderConfig, today: NaiveDate) -> String {
    let header = format!(
        "<html xmlns:o='urn:schemas-microsoft-com:office:office' \
         xmlns:w='urn:schemas-microsoft-com:office:word' \
         xmlns='http://www.w3.org/TR/REC-html40'>\n\
         <head><meta charset='utf-8'><title>Resume</title>\n\
         <style>\n\
         body {{ font-family: '{}', sans-serif; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         td, th {{ border: 1px solid black; padding: 5px; }}\n\
         </style>\n\
         </head><body>\n",
        config.font_family
    );
    format!(
        "\u{feff}{}{}</body></html>",
        header,
        render_html(resume, config, today)
    )
}

/// `{lastName}_{firstName}_Resume.doc`
pub fn export_file_name(personal: &PersonalInfo) -> String {
    format!("{}_{}_Resume.doc", personal.last_name.trim(), personal.first_name.trim())
}

pub async fn write_output<P: AsRef<Path>>(content: &str, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!("Writing rendered resume: {}", output_path.display());

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            return Err(RirekishoError::Render(format!(
                "Output directory does not exist: {}",
                parent.display()
            )));
        }
    }

    fs::write(output_path, content).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::resume::{Certification, Education, EntryId, Skills, WorkExperience};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn render(resume: &Resume) -> String {
        render_html(resume, &Config::default().render, today())
    }

    #[test]
    fn test_format_date_japanese() {
        assert_eq!(format_date_japanese("2012-06-15"), "2012年 6月");
        assert_eq!(format_date_japanese("2008-09"), "2008年 9月");
        assert_eq!(format_date_japanese(""), "");
        assert_eq!(format_date_japanese("someday"), "");
    }

    #[test]
    fn test_age_counts_full_years() {
        let birth = NaiveDate::from_ymd_opt(1990, 10, 18).unwrap();
        assert_eq!(age_on(birth, today()), 35);
        let birth = NaiveDate::from_ymd_opt(1990, 10, 17).unwrap();
        assert_eq!(age_on(birth, today()), 36);
    }

    #[test]
    fn test_education_without_institution_is_hidden() {
        let resume = Resume {
            education: vec![
                Education {
                    start_date: "2000-04-01".to_string(),
                    ..Education::new(EntryId::from("edu-elem"), "Elementary School")
                },
                Education {
                    institution: "MIT".to_string(),
                    start_date: "2008-09-01".to_string(),
                    end_date: "2012-06-01".to_string(),
                    country: "USA".to_string(),
                    translated_degree: Some("コンピューターサイエンス".to_string()),
                    ..Education::new(EntryId::from("e1"), "Computer Science")
                },
            ],
            ..Resume::default()
        };
        let html = render(&resume);

        assert!(!html.contains("Elementary School"));
        assert!(html.contains("MIT コンピューターサイエンス 入学 (USA)"));
        assert!(html.contains("<td class=\"center\">2012</td><td class=\"center\">6</td><td>MIT 卒業 (USA)</td>"));
    }

    #[test]
    fn test_work_rows_and_description() {
        let resume = Resume {
            work_experience: vec![
                WorkExperience {
                    company: "Acme".to_string(),
                    start_date: "2012-07-01".to_string(),
                    end_date: "2015-03-31".to_string(),
                    translated_description: Some("・チームを5名管理".to_string()),
                    description: "Managed a team of 5.".to_string(),
                    ..WorkExperience::new(EntryId::from("w1"))
                },
                WorkExperience::new(EntryId::from("w2")),
            ],
            ..Resume::default()
        };
        let html = render(&resume);

        assert!(html.contains("<td>Acme 入社</td>"));
        assert!(!html.contains("正社員"));
        assert!(html.contains("・チームを5名管理"));
        assert!(!html.contains("Managed a team of 5."));
        assert!(html.contains("Acme 一身上の都合により退社"));
        assert!(html.contains("以上"));
    }

    #[test]
    fn test_unfinished_education_ends_with_shuuryou() {
        let resume = Resume {
            education: vec![Education {
                institution: "Universität Wien".to_string(),
                start_date: "2016-10-01".to_string(),
                end_date: "2018-02-01".to_string(),
                status: EducationStatus::Withdrawn,
                ..Education::new(EntryId::from("e1"), "Philosophy")
            }],
            ..Resume::default()
        };
        let html = render(&resume);

        assert!(html.contains("<td>Universität Wien 終了</td>"));
        assert!(!html.contains("卒業"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut resume = Resume::default();
        resume.personal_info.address = "<script>alert(1)</script>".to_string();
        let html = render(&resume);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_skills_prefer_translation() {
        let mut resume = Resume {
            skills: Skills {
                language_level: "English: Native".to_string(),
                technical_skills: "Rust".to_string(),
                hobbies: "Hiking".to_string(),
            },
            ..Resume::default()
        };
        let html = render(&resume);
        assert!(html.contains("English: Native"));
        assert!(!html.contains("Rust"));

        resume.translated_skills = Some(Skills {
            language_level: "英語: ネイティブ".to_string(),
            ..Skills::default()
        });
        let html = render(&resume);
        assert!(html.contains("英語: ネイティブ"));
        assert!(!html.contains("English: Native"));
        assert!(html.contains("Hiking"));
    }

    #[test]
    fn test_certification_with_international_permit() {
        let resume = Resume {
            certifications: vec![Certification {
                name: "Driver's License".to_string(),
                date: "2010-05-01".to_string(),
                is_driving_license: true,
                has_international_permit: Some(true),
                ..Certification::new(EntryId::from("c1"))
            }],
            ..Resume::default()
        };
        let html = render(&resume);

        assert!(html.contains("Driver&#39;s License 取得"));
        assert!(html.contains("国際免許証"));
    }

    #[test]
    fn test_birth_date_and_placeholders() {
        let mut resume = Resume::default();
        assert!(render(&resume).contains("____年 __月 __日生"));

        resume.personal_info.birth_date = "1990-04-12".to_string();
        assert!(render(&resume).contains("1990年 4月 12日生 (満 36 歳)"));
    }

    #[test]
    fn test_word_export_envelope() {
        let doc = export_word(&Resume::default(), &Config::default().render, today());
        assert!(doc.starts_with('\u{feff}'));
        assert!(doc.contains("urn:schemas-microsoft-com:office:word"));
        assert!(doc.contains("'Noto Sans JP'"));
        assert!(doc.ends_with("</body></html>"));
    }

    #[test]
    fn test_export_file_name() {
        let personal = PersonalInfo {
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            ..PersonalInfo::default()
        };
        assert_eq!(export_file_name(&personal), "Smith_John_Resume.doc");
    }

    #[tokio::test]
    async fn test_write_output_requires_existing_directory() {
        let err = write_output("x", "/nonexistent/dir/resume.html").await.unwrap_err();
        assert!(matches!(err, RirekishoError::Render(_)));
    }
}
