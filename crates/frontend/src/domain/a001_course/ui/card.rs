//! Markup for course cards.
//!
//! Category pages use [`render_course_card`]; the index search uses
//! [`render_search_results`]. Output is a pure function of the records, and
//! all record text is escaped.

use contracts::domain::a001_course::CourseRecord;
use contracts::domain::a002_category::CategoryDescriptor;

use crate::shared::escape::{escape_html, escape_html_text};
use crate::shared::icons::icon;
use crate::shared::search::CategoryGroup;

/// Текст заглушки, когда преподаватель не назначен
pub const NO_INSTRUCTOR_LABEL: &str = "استاد اعلام نشده";

fn code_class(category: &str) -> String {
    CategoryDescriptor::resolve(category, "").style_class
}

/// Collapsible card for a category page.
pub fn render_course_card(record: &CourseRecord) -> String {
    let badges = if record.instructors.is_empty() {
        format!(r#"<li class="instructor-badge">{}</li>"#, NO_INSTRUCTOR_LABEL)
    } else {
        record
            .instructors
            .iter()
            .map(|instructor| {
                let name = escape_html_text(&instructor.name);
                if instructor.telegram.is_empty() {
                    format!(r#"<li class="instructor-badge">{}</li>"#, name)
                } else {
                    format!(
                        r#"<li class="instructor-badge"><a href="{}">{}</a></li>"#,
                        escape_html(&instructor.telegram),
                        name
                    )
                }
            })
            .collect()
    };

    format!(
        r#"<article class="course-card" data-course-id="{id}"><details><summary class="course-summary"><div class="course-code {class}">{code}</div><h2 class="course-title">{title}</h2><div class="expand-icon">{chevron}</div></summary><div class="course-details"><h3 class="instructors-label">استاد ها</h3><ul class="instructors-list">{badges}</ul></div></details></article>"#,
        id = escape_html(record.handoff_id()),
        class = escape_html(&code_class(&record.category)),
        code = escape_html_text(&record.code),
        title = escape_html_text(record.title_text()),
        chevron = icon("chevron-down"),
        badges = badges,
    )
}

/// Cards for every titled record. A record without a title can never match
/// a search, so it is left off the page.
pub fn render_course_cards<'a>(records: impl IntoIterator<Item = &'a CourseRecord>) -> String {
    records
        .into_iter()
        .filter(|record| {
            if record.title.is_none() {
                log::warn!("course {} has no title, not rendered", record.handoff_id());
            }
            record.title.is_some()
        })
        .map(render_course_card)
        .collect()
}

/// Card shown in the index search results. Clicking it hands off to the
/// category page (see `searchbar`), so it carries the id and target page.
pub fn render_search_result_card(record: &CourseRecord) -> String {
    let mut content = format!(
        r#"<h3 class="course-title">{}</h3>"#,
        escape_html_text(record.title_text())
    );
    if let Some(credits) = &record.credits {
        content.push_str(&format!(
            r#"<p class="course-credits">{} واحد</p>"#,
            escape_html_text(credits)
        ));
    }
    if !record.instructors.is_empty() {
        let badges: String = record
            .instructors
            .iter()
            .map(|i| format!(r#"<span class="instructor-badge">{}</span>"#, escape_html_text(&i.name)))
            .collect();
        content.push_str(&format!(r#"<div class="instructor-list">{}</div>"#, badges));
    }
    if let Some(description) = &record.description {
        content.push_str(&format!(
            r#"<p class="course-description">{}</p>"#,
            escape_html_text(description)
        ));
    }

    format!(
        r#"<article class="course-card search-result-card" data-course-id="{id}" data-category-page="{page}"><div class="course-header"><div class="course-code {class}">{code}</div><div class="course-meta"><a href="{page}" class="category-link">{label}</a></div></div><div class="course-content">{content}</div></article>"#,
        id = escape_html(record.handoff_id()),
        page = escape_html(&record.category_page),
        class = escape_html(&code_class(&record.category)),
        code = escape_html_text(&record.code),
        label = escape_html_text(&CategoryDescriptor::label_for(&record.category)),
        content = content,
    )
}

pub fn render_category_header(group: &CategoryGroup<'_>) -> String {
    format!(
        r#"<div class="search-category-header"><h3 class="category-title">{}</h3><span class="course-count">{} درس</span></div>"#,
        escape_html_text(&group.label),
        group.records.len()
    )
}

/// Headers and cards for every group, in group order.
pub fn render_search_results(groups: &[CategoryGroup<'_>]) -> String {
    let mut html = String::new();
    for group in groups {
        html.push_str(&render_category_header(group));
        for record in &group.records {
            html.push_str(&render_search_result_card(record));
        }
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::search::fixtures::course;
    use crate::shared::search::group_by_category;
    use contracts::domain::a001_course::Instructor;
    use contracts::domain::a002_category::DEFAULT_COURSE_PAGE_DIR;
    use contracts::shared::Catalog;

    #[test]
    fn test_lab_page_placeholder_badge() {
        let catalog = Catalog::from_json(
            r#"{"courses":{"lab":[{"code":"LB101","title":"Circuits","instructors":[]}]}}"#,
            DEFAULT_COURSE_PAGE_DIR,
        )
        .unwrap();
        let html = render_course_cards(catalog.courses_for_page("courses-lab.html"));
        assert_eq!(html.matches(r#"class="course-card""#).count(), 1);
        assert_eq!(html.matches("instructor-badge").count(), 1);
        assert!(html.contains(NO_INSTRUCTOR_LABEL));
        assert!(html.contains(r#"<div class="course-code course-lab">LB101</div>"#));
        assert!(html.contains(r#"<h2 class="course-title">Circuits</h2>"#));
    }

    #[test]
    fn test_untitled_records_are_not_rendered() {
        let records = vec![
            course("XX000", None, "main", &[]),
            course("MN1", Some("Calculus"), "main", &[]),
        ];
        let html = render_course_cards(&records);
        assert_eq!(html.matches(r#"class="course-card""#).count(), 1);
        assert!(!html.contains("XX000"));
        assert!(html.contains("MN1"));
    }

    #[test]
    fn test_one_badge_per_instructor() {
        let mut record = course("GN1", Some("History"), "general", &["A", "B"]);
        record.instructors.push(Instructor {
            name: "C".into(),
            telegram: "https://t.me/c".into(),
            gender: None,
        });
        let html = render_course_card(&record);
        assert_eq!(html.matches(r#"<li class="instructor-badge">"#).count(), 3);
        assert!(html.contains(r#"<a href="https://t.me/c">C</a>"#));
        assert!(!html.contains(NO_INSTRUCTOR_LABEL));
    }

    #[test]
    fn test_rendering_is_deterministic_and_escaped() {
        let record = course("X<1>", Some("A & B"), "main", &["<script>"]);
        let a = render_course_card(&record);
        assert_eq!(a, render_course_card(&record));
        assert!(a.contains("X&lt;1&gt;"));
        assert!(a.contains("A &amp; B"));
        assert!(!a.contains("<script>"));
    }

    #[test]
    fn test_language_alias_uses_shared_class() {
        let html = render_course_card(&course("EN1", Some("English"), "language", &[]));
        assert!(html.contains("course-code course-language"));
    }

    #[test]
    fn test_search_result_card_links_category() {
        let mut record = course("LB101", Some("Circuits"), "lab", &[]);
        record.credits = Some("2".into());
        let html = render_search_result_card(&record);
        assert!(html.contains(r#"data-category-page="./src/templates/courses/courses-lab.html""#));
        assert!(html.contains(r#"class="category-link">دروس آزمایشگاهی</a>"#));
        assert!(html.contains("2 واحد"));
        assert!(!html.contains("instructor-list"));
        assert!(!html.contains("course-description"));
    }

    #[test]
    fn test_unknown_category_result_uses_key_and_pattern() {
        let record = course("E1", Some("Elective"), "elective", &[]);
        let html = render_search_result_card(&record);
        assert!(html.contains(r#"class="category-link">elective</a>"#));
        assert!(html.contains("courses-elective.html"));
        assert!(html.contains("course-code course-elective"));
    }

    #[test]
    fn test_grouped_results_markup() {
        let records = vec![
            course("LB101", Some("Circuits"), "lab", &[]),
            course("GN1", Some("History"), "general", &[]),
            course("LB102", Some("Digital"), "lab", &[]),
        ];
        let refs: Vec<&CourseRecord> = records.iter().collect();
        let html = render_search_results(&group_by_category(&refs));
        assert_eq!(html.matches("search-category-header").count(), 2);
        assert!(html.contains("<span class=\"course-count\">2 درس</span>"));
        let lab = html.find("LB102").unwrap();
        let general = html.find("GN1").unwrap();
        assert!(lab < general);
    }
}
