use serde::{Deserialize, Serialize};

/// Вид справочной карточки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelpKind {
    Faq,
    Guide,
}

impl HelpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HelpKind::Faq => "faq",
            HelpKind::Guide => "guide",
        }
    }
}

/// FAQ entry (`question`/`answer`) or guide entry (`title`/`content`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HelpItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl HelpItem {
    /// Summary line for the card; `None` marks the item as invalid for `kind`.
    pub fn heading(&self, kind: HelpKind) -> Option<&str> {
        let heading = match kind {
            HelpKind::Faq => self.question.as_deref(),
            HelpKind::Guide => self.title.as_deref(),
        };
        heading.filter(|h| !h.trim().is_empty())
    }

    pub fn body(&self, kind: HelpKind) -> &str {
        match kind {
            HelpKind::Faq => self.answer.as_deref(),
            HelpKind::Guide => self.content.as_deref(),
        }
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_depends_on_kind() {
        let item = HelpItem {
            question: Some("q".into()),
            answer: Some("a".into()),
            ..Default::default()
        };
        assert_eq!(item.heading(HelpKind::Faq), Some("q"));
        assert_eq!(item.heading(HelpKind::Guide), None);
        assert_eq!(item.body(HelpKind::Faq), "a");
        assert_eq!(item.body(HelpKind::Guide), "");
    }

    #[test]
    fn test_blank_heading_is_invalid() {
        let item = HelpItem {
            title: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(item.heading(HelpKind::Guide), None);
    }
}
