//! Markup stripping and resume section text extraction

use crate::scoring::weights::Section;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The five scored section texts plus the overall concatenation used for the
/// empty-resume short-circuit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeSectionTexts {
    pub overall: String,
    pub summary: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub projects: String,
}

impl ResumeSectionTexts {
    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Summary => &self.summary,
            Section::Skills => &self.skills,
            Section::Experience => &self.experience,
            Section::Education => &self.education,
            Section::Projects => &self.projects,
        }
    }
}

/// Strip HTML markup down to plain text: style/script blocks and tags are
/// collapsed to spaces, a small set of named entities is decoded and
/// whitespace is normalized.
pub fn strip_html_to_text(input: &str) -> String {
    let style_regex = Regex::new(r"(?is)<style.*?</style>").expect("Invalid style regex");
    let script_regex = Regex::new(r"(?is)<script.*?</script>").expect("Invalid script regex");
    let tag_regex = Regex::new(r"<[^>]+>").expect("Invalid tag regex");
    let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

    let mut text = style_regex.replace_all(input, " ").to_string();
    text = script_regex.replace_all(&text, " ").to_string();
    text = tag_regex.replace_all(&text, " ").to_string();
    text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">");
    whitespace_regex.replace_all(&text, " ").trim().to_string()
}

/// Extract the scored section texts from a resume document (reactive-resume
/// style JSON: `basics` plus `sections.{summary,experience,projects,education,skills}`).
pub fn extract_resume_sections_text(resume: &Value) -> ResumeSectionTexts {
    let data = resume.get("data").unwrap_or(resume);
    let basics = data.get("basics").cloned().unwrap_or(Value::Null);
    let sections = data.get("sections").cloned().unwrap_or(Value::Null);

    let mut overall_parts: Vec<String> = Vec::new();

    for key in ["name", "headline", "location"] {
        if let Some(value) = basics.get(key).and_then(Value::as_str) {
            if !value.is_empty() {
                overall_parts.push(value.to_string());
            }
        }
    }

    let summary = sections
        .get("summary")
        .and_then(|s| s.get("content"))
        .and_then(Value::as_str)
        .map(strip_html_to_text)
        .unwrap_or_default();
    if !summary.is_empty() {
        overall_parts.push(summary.clone());
    }

    let experience = join_items(&sections, "experience", &["company", "position", "location", "summary"]);
    if !experience.is_empty() {
        overall_parts.push(experience.clone());
    }

    let projects = join_items(&sections, "projects", &["name", "description", "summary"]);
    if !projects.is_empty() {
        overall_parts.push(projects.clone());
    }

    let education = join_items(&sections, "education", &["institution", "area", "studyType", "summary"]);
    if !education.is_empty() {
        overall_parts.push(education.clone());
    }

    let skills = join_skill_items(&sections);
    if !skills.is_empty() {
        overall_parts.push(skills.clone());
    }

    ResumeSectionTexts {
        overall: overall_parts.join("\n"),
        summary,
        skills,
        experience,
        education,
        projects,
    }
}

/// Concatenate the named fields of each item in a section, one line per item.
fn join_items(sections: &Value, section_key: &str, fields: &[&str]) -> String {
    let items = sections
        .get(section_key)
        .and_then(|s| s.get("items"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut lines = Vec::new();
    for item in &items {
        let mut parts = Vec::new();
        for field in fields {
            if let Some(value) = item.get(field).and_then(Value::as_str) {
                let cleaned = strip_html_to_text(value);
                if !cleaned.is_empty() {
                    parts.push(cleaned);
                }
            }
        }
        if !parts.is_empty() {
            lines.push(parts.join(" "));
        }
    }
    lines.join("\n")
}

/// Skills items carry a keyword array alongside name/description.
fn join_skill_items(sections: &Value) -> String {
    let items = sections
        .get("skills")
        .and_then(|s| s.get("items"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut lines = Vec::new();
    for item in &items {
        let mut parts = Vec::new();
        for field in ["name", "description"] {
            if let Some(value) = item.get(field).and_then(Value::as_str) {
                if !value.is_empty() {
                    parts.push(value.to_string());
                }
            }
        }
        if let Some(keywords) = item.get("keywords").and_then(Value::as_array) {
            let joined: Vec<&str> = keywords.iter().filter_map(Value::as_str).collect();
            if !joined.is_empty() {
                parts.push(joined.join(", "));
            }
        }
        if !parts.is_empty() {
            lines.push(parts.join(" "));
        }
    }
    lines.join("\n")
}
