use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Instructor
// ============================================================================

/// Преподаватель курса, как он описан в data.json
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Instructor {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,

    /// Ссылка на профиль в Telegram (может быть пустой)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub telegram: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

/// `null` reads as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Course Record
// ============================================================================

/// Нормализованная запись курса.
///
/// Загрузчик гарантирует, что `category` и `category_page` не пусты,
/// а `id` заполнен (код курса или сгенерированный идентификатор).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,

    #[serde(default)]
    pub code: String,

    /// Записи без названия загружаются, но никогда не попадают в поиск.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub category: String,

    #[serde(rename = "categoryPage")]
    pub category_page: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub instructors: Vec<Instructor>,
}

impl CourseRecord {
    pub fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Идентификатор для передачи между страницами: `id`, иначе код курса.
    pub fn handoff_id(&self) -> &str {
        if self.id.is_empty() {
            &self.code
        } else {
            &self.id
        }
    }

    /// Имя файла страницы категории без каталога (`courses-lab.html`).
    pub fn category_page_file(&self) -> &str {
        self.category_page
            .rsplit('/')
            .next()
            .unwrap_or(&self.category_page)
    }
}
