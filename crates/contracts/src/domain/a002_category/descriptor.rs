//! Category descriptors: display label, target page and style class per
//! category key.
//!
//! Keys missing from the static table still resolve: the label is the key
//! itself and the page follows the `courses-<key>.html` pattern.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Категория по умолчанию для записей без категории
pub const DEFAULT_CATEGORY: &str = "main";

/// Каталог, в котором лежат страницы категорий
pub const DEFAULT_COURSE_PAGE_DIR: &str = "./src/templates/courses";

struct KnownCategory {
    keys: &'static [&'static str],
    label: &'static str,
    slug: &'static str,
    style_class: &'static str,
}

const KNOWN_CATEGORIES: &[KnownCategory] = &[
    KnownCategory {
        keys: &["main"],
        label: "دروس اصلی",
        slug: "main",
        style_class: "course-main",
    },
    KnownCategory {
        keys: &["general"],
        label: "دروس عمومی",
        slug: "general",
        style_class: "course-general",
    },
    KnownCategory {
        keys: &["lab"],
        label: "دروس آزمایشگاهی",
        slug: "lab",
        style_class: "course-lab",
    },
    KnownCategory {
        keys: &["fundamental"],
        label: "دروس پایه",
        slug: "fundamental",
        style_class: "course-fundamental",
    },
    KnownCategory {
        keys: &["languages", "language"],
        label: "دروس زبان",
        slug: "languages",
        style_class: "course-language",
    },
    KnownCategory {
        keys: &["practical"],
        label: "دروس عملی",
        slug: "practical",
        style_class: "course-practical",
    },
];

static BY_KEY: Lazy<HashMap<&'static str, &'static KnownCategory>> = Lazy::new(|| {
    KNOWN_CATEGORIES
        .iter()
        .flat_map(|known| known.keys.iter().map(move |key| (*key, known)))
        .collect()
});

/// Описание категории курсов
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDescriptor {
    pub key: String,
    pub label: String,
    pub page: String,
    pub style_class: String,
}

impl CategoryDescriptor {
    /// Resolve a category key against the static table, synthesizing a
    /// descriptor for unknown keys.
    pub fn resolve(key: &str, page_dir: &str) -> Self {
        match BY_KEY.get(key) {
            Some(known) => Self {
                key: key.to_string(),
                label: known.label.to_string(),
                page: page_path(page_dir, known.slug),
                style_class: known.style_class.to_string(),
            },
            None => Self {
                key: key.to_string(),
                label: key.to_string(),
                page: page_path(page_dir, key),
                style_class: format!("course-{}", key),
            },
        }
    }

    /// Descriptor used for records that carry no category at all.
    pub fn fallback(page_dir: &str) -> Self {
        Self::resolve(DEFAULT_CATEGORY, page_dir)
    }

    pub fn is_known(key: &str) -> bool {
        BY_KEY.contains_key(key)
    }

    /// Display label for a key without building a full descriptor.
    pub fn label_for(key: &str) -> String {
        BY_KEY
            .get(key)
            .map(|known| known.label.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

/// Имя файла страницы категории: `courses-<slug>.html`
pub fn page_file_name(slug: &str) -> String {
    format!("courses-{}.html", slug)
}

fn page_path(page_dir: &str, slug: &str) -> String {
    let dir = page_dir.trim_end_matches('/');
    if dir.is_empty() {
        page_file_name(slug)
    } else {
        format!("{}/{}", dir, page_file_name(slug))
    }
}
