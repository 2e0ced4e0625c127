//! Parsing and normalization of the static `data.json` document.
//!
//! Three layouts are accepted for course data:
//! - `{ "courses": [ ... ] }`
//! - `[ ... ]` at the top level
//! - `{ "courses": { "<category>": [ ... ], ... } }`
//!
//! All of them flatten into one `Vec<CourseRecord>` with category metadata
//! attached to every record. Entries that cannot be read are skipped with a
//! warning; they never fail the whole document.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::a001_course::{CourseRecord, Instructor};
use crate::domain::a002_category::CategoryDescriptor;
use crate::domain::a003_help_item::HelpItem;
use crate::shared::error::LoadError;

/// Содержимое data.json после нормализации
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub courses: Vec<CourseRecord>,
    pub faqs: Vec<HelpItem>,
    pub guide: Vec<HelpItem>,
}

impl Catalog {
    /// Parse a raw `data.json` body.
    pub fn from_json(text: &str, page_dir: &str) -> Result<Self, LoadError> {
        let document: Value =
            serde_json::from_str(text).map_err(|e| LoadError::Parse(e.to_string()))?;
        Ok(Self::from_value(&document, page_dir))
    }

    pub fn from_value(document: &Value, page_dir: &str) -> Self {
        Self {
            courses: normalize_courses(document, page_dir),
            faqs: help_items(document.get("faqs"), "faqs"),
            guide: help_items(document.get("guide"), "guide"),
        }
    }

    /// Records that belong on the category page `page_file`
    /// (for example `courses-languages.html`).
    pub fn courses_for_page<'a>(&'a self, page_file: &'a str) -> impl Iterator<Item = &'a CourseRecord> + 'a {
        self.courses
            .iter()
            .filter(move |course| course.category_page_file() == page_file)
    }
}

/// Raw course entry exactly as found in the document.
#[derive(Debug, Default, Deserialize)]
struct RawCourse {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, rename = "categoryPage")]
    category_page: Option<String>,
    #[serde(default)]
    credits: Option<Value>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    instructors: Option<Vec<Value>>,
}

/// Flatten any of the supported layouts into course records.
pub fn normalize_courses(document: &Value, page_dir: &str) -> Vec<CourseRecord> {
    match document {
        Value::Array(entries) => flat_courses(entries, page_dir),
        Value::Object(map) => match map.get("courses") {
            Some(Value::Array(entries)) => flat_courses(entries, page_dir),
            Some(Value::Object(categories)) => {
                let mut courses = Vec::new();
                for (key, entries) in categories {
                    let Value::Array(entries) = entries else {
                        log::warn!("courses.{} is not a list, skipped", key);
                        continue;
                    };
                    if !CategoryDescriptor::is_known(key) {
                        log::info!("unknown category `{}`, using its key as the label", key);
                    }
                    let descriptor = CategoryDescriptor::resolve(key, page_dir);
                    courses.extend(
                        entries
                            .iter()
                            .filter_map(read_course)
                            .map(|raw| categorized_course(raw, &descriptor)),
                    );
                }
                courses
            }
            Some(other) => {
                log::warn!("unsupported `courses` value: {}", type_name(other));
                Vec::new()
            }
            None => Vec::new(),
        },
        other => {
            log::warn!("unsupported data document: {}", type_name(other));
            Vec::new()
        }
    }
}

fn flat_courses(entries: &[Value], page_dir: &str) -> Vec<CourseRecord> {
    entries
        .iter()
        .filter_map(read_course)
        .map(|raw| {
            let descriptor = match non_empty(raw.category.clone()) {
                Some(key) => CategoryDescriptor::resolve(&key, page_dir),
                None => CategoryDescriptor::fallback(page_dir),
            };
            let page = non_empty(raw.category_page.clone()).unwrap_or_else(|| descriptor.page.clone());
            let id = record_id(&raw, "course");
            finish(raw, id, descriptor.key, page)
        })
        .collect()
}

fn categorized_course(raw: RawCourse, descriptor: &CategoryDescriptor) -> CourseRecord {
    let id = record_id(&raw, &descriptor.key);
    finish(raw, id, descriptor.key.clone(), descriptor.page.clone())
}

fn read_course(entry: &Value) -> Option<RawCourse> {
    if !entry.is_object() {
        log::warn!("invalid course entry skipped: {}", entry);
        return None;
    }
    match RawCourse::deserialize(entry) {
        Ok(raw) => Some(raw),
        Err(e) => {
            log::warn!("invalid course entry skipped ({}): {}", e, entry);
            None
        }
    }
}

fn record_id(raw: &RawCourse, prefix: &str) -> String {
    raw.id
        .as_ref()
        .and_then(scalar_text)
        .or_else(|| raw.code.as_ref().and_then(scalar_text))
        .unwrap_or_else(|| format!("{}-{}", prefix, Uuid::new_v4()))
}

fn finish(raw: RawCourse, id: String, category: String, category_page: String) -> CourseRecord {
    CourseRecord {
        id,
        code: raw.code.as_ref().and_then(scalar_text).unwrap_or_default(),
        title: non_empty(raw.title),
        category,
        category_page,
        credits: raw.credits.as_ref().and_then(scalar_text),
        description: non_empty(raw.description),
        instructors: raw
            .instructors
            .unwrap_or_default()
            .iter()
            .filter_map(read_instructor)
            .collect(),
    }
}

/// A broken instructor entry is dropped; the course itself stays.
fn read_instructor(entry: &Value) -> Option<Instructor> {
    match Instructor::deserialize(entry) {
        Ok(instructor) => Some(instructor),
        Err(e) => {
            log::warn!("invalid instructor entry skipped ({}): {}", e, entry);
            None
        }
    }
}

fn help_items(value: Option<&Value>, field: &str) -> Vec<HelpItem> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match HelpItem::deserialize(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("invalid {} entry skipped ({}): {}", field, e, entry);
                None
            }
        })
        .collect()
}

/// Strings and numbers as display text; empty strings count as missing.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
