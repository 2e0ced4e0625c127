//! Site configuration.
//!
//! Defaults match the published site layout. A page can override them with
//! data attributes on `<body>`:
//!
//! ```html
//! <body data-catalog-src="../../public/data.json" data-course-pages="./">
//! ```

use contracts::domain::a002_category::DEFAULT_COURSE_PAGE_DIR;

/// Путь к data.json по умолчанию
pub const DEFAULT_DATA_URL: &str = "/public/data.json";

const DATA_URL_ATTR: &str = "data-catalog-src";
const PAGE_DIR_ATTR: &str = "data-course-pages";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// URL of the static data file.
    pub data_url: String,
    /// Directory that holds the `courses-<key>.html` pages.
    pub course_page_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            course_page_dir: DEFAULT_COURSE_PAGE_DIR.to_string(),
        }
    }
}

impl SiteConfig {
    /// Defaults plus any overrides declared on `<body>`.
    pub fn from_document() -> Self {
        let body = crate::shared::dom::body();
        let attr = |name: &str| body.as_ref().and_then(|b| b.get_attribute(name));
        Self::default().with_overrides(attr(DATA_URL_ATTR), attr(PAGE_DIR_ATTR))
    }

    pub fn with_overrides(mut self, data_url: Option<String>, page_dir: Option<String>) -> Self {
        if let Some(url) = data_url.filter(|v| !v.trim().is_empty()) {
            self.data_url = url.trim().to_string();
        }
        if let Some(dir) = page_dir {
            self.course_page_dir = dir.trim().to_string();
        }
        self
    }
}
