//! Course search: one substring predicate shared by the global search over
//! loaded records and the local filter over cards already on the page.

pub mod controller;
pub mod dom_surface;
pub mod handoff;
pub mod local;
pub mod searchbar;

use std::borrow::Cow;

use contracts::domain::a001_course::CourseRecord;
use contracts::domain::a002_category::CategoryDescriptor;

/// Поисковый запрос: обрезанный и в нижнем регистре
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query(String);

impl Query {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring containment.
    pub fn found_in(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.0)
    }
}

/// Источник полей для поиска (запись курса или карточка на странице)
pub trait Searchable {
    /// Title text; `None` excludes the item from matching entirely.
    fn search_title(&self) -> Option<Cow<'_, str>>;

    /// Every other field the query is tested against.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;
}

/// True when the title or any other field contains the query.
pub fn matches_query<T: Searchable + ?Sized>(item: &T, query: &Query) -> bool {
    let Some(title) = item.search_title() else {
        return false;
    };
    query.found_in(&title) || item.search_fields().iter().any(|f| query.found_in(f))
}

impl Searchable for CourseRecord {
    fn search_title(&self) -> Option<Cow<'_, str>> {
        self.title.as_deref().map(Cow::Borrowed)
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields: Vec<Cow<'_, str>> = self
            .instructors
            .iter()
            .map(|i| Cow::Borrowed(i.name.as_str()))
            .collect();
        fields.push(Cow::Borrowed(self.code.as_str()));
        if let Some(description) = &self.description {
            fields.push(Cow::Borrowed(description.as_str()));
        }
        fields
    }
}

/// Linear filter in input order. An empty query keeps every item.
pub fn filter_records<'a, T, I>(items: I, query: &Query) -> Vec<&'a T>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if query.is_empty() {
        return items.into_iter().collect();
    }
    items
        .into_iter()
        .filter(|item| matches_query(*item, query))
        .collect()
}

/// Результаты одной категории
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub key: &'a str,
    pub label: String,
    pub records: Vec<&'a CourseRecord>,
}

/// Group records by category key, in order of first appearance.
pub fn group_by_category<'a>(records: &[&'a CourseRecord]) -> Vec<CategoryGroup<'a>> {
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
    for &record in records {
        match groups.iter_mut().find(|g| g.key == record.category) {
            Some(group) => group.records.push(record),
            None => groups.push(CategoryGroup {
                key: &record.category,
                label: CategoryDescriptor::label_for(&record.category),
                records: vec![record],
            }),
        }
    }
    groups
}
