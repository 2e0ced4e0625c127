//! Which page script runs on the current document.

use crate::domain::a003_help_item::ui::page::{HelpScope, HELP_GRID_SELECTOR};
use crate::shared::dom;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    /// Landing page with the global search.
    Index,
    /// `courses-<key>.html`
    Category { page_file: String },
    Help(HelpScope),
    Other,
}

pub fn is_index(path: &str) -> bool {
    path.is_empty() || path.ends_with('/') || path.contains("index.html")
}

/// Last path segment when it names a category page.
pub fn category_page_file(path: &str) -> Option<&str> {
    let file = path.rsplit('/').next()?;
    (file.starts_with("courses-") && file.ends_with(".html")).then_some(file)
}

pub fn detect(path: &str, body_classes: &str, has_help_grid: bool) -> PageKind {
    if is_index(path) {
        return PageKind::Index;
    }
    if let Some(file) = category_page_file(path) {
        return PageKind::Category {
            page_file: file.to_string(),
        };
    }
    if has_help_grid {
        return PageKind::Help(HelpScope::detect(path, body_classes));
    }
    PageKind::Other
}

pub fn current() -> PageKind {
    let path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default();
    let classes = dom::body().map(|b| b.class_name()).unwrap_or_default();
    let kind = detect(&path, &classes, dom::query(HELP_GRID_SELECTOR).is_some());
    log::debug!("page kind for {}: {:?}", path, kind);
    kind
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_paths() {
        for path in ["/", "", "/site/", "/index.html", "/site/index.html"] {
            assert_eq!(detect(path, "", false), PageKind::Index, "{}", path);
        }
    }

    #[test]
    fn test_category_pages() {
        assert_eq!(
            detect("/src/templates/courses/courses-lab.html", "", false),
            PageKind::Category {
                page_file: "courses-lab.html".into()
            }
        );
        assert_eq!(
            detect("/courses-elective.html", "", true),
            PageKind::Category {
                page_file: "courses-elective.html".into()
            }
        );
    }

    #[test]
    fn test_help_and_other_pages() {
        assert_eq!(detect("/faq.html", "", true), PageKind::Help(HelpScope::Faq));
        assert_eq!(detect("/help.html", "guide-page", true), PageKind::Help(HelpScope::Guide));
        assert_eq!(detect("/faq.html", "", false), PageKind::Other);
        assert_eq!(detect("/aboutme.html", "", false), PageKind::Other);
    }
}
