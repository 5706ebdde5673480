//! Instructions sent to the text generation backend.

/// Category labels steering the register of a field translation
pub mod category {
    pub const WORK_TASKS: &str = "work experience tasks";
    pub const DEGREE: &str = "academic degree or major";
    pub const SKILLS: &str = "skills and hobbies";
}

pub const RESUME_SYSTEM_INSTRUCTION: &str = "\
You are a professional Japanese resume (Rirekisho) translator.
Your goal is to convert English resume details into concise, professional Japanese.

Follow these strict rules:
1. DO NOT translate names of Companies, Schools, or Organizations. Leave them in their original English/Latin script.
2. Use bullet points for tasks/descriptions.
3. Use professional, concise Japanese (Teinei-go but avoid over-long sentences). Avoid \"Desu/Masu\" in bullet points.
4. For \"Contract Types\", use appropriate Japanese: 正社員 (Full-time), アルバイト (Part-time), インターンシップ (Internship), 業務委託 (Contract/Freelance).
5. Ensure the tone is appropriate for a Japanese employer.
6. For skills, format as \"Skill Name: Level\" (e.g. \"English: Native level\").
7. IMPORTANT: If a field is empty or lacks meaningful content, return an EMPTY STRING.
8. DO NOT provide placeholders like \"Please describe your skills here\" or \"（こちらに具体的な技術スキルを記載してください）\".
";

pub const TRANSLITERATION_SYSTEM_INSTRUCTION: &str =
    "You are a Japanese linguistics expert. Provide accurate Katakana transliterations for Western names.";

/// User content for a single field translation
pub fn field_prompt(category: &str, text: &str) -> String {
    format!(
        "Translate the following {} content into professional Japanese for a resume. \
         If the content is empty or generic, return an empty string: \n\n{}",
        category, text
    )
}

/// User content for a name transliteration
pub fn transliteration_prompt(full_name: &str) -> String {
    format!(
        "Provide the Katakana (furigana) transliteration for this Western name: \"{}\". \
         Return ONLY the Katakana characters, nothing else. Example: \"John Smith\" -> \"ジョン スミス\"",
        full_name
    )
}
