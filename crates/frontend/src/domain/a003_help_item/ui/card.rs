//! FAQ and guide cards.

use contracts::domain::a003_help_item::{HelpItem, HelpKind};

use crate::shared::escape::escape_html_text;
use crate::shared::icons::icon;

/// Правило вставки ссылки в ответ FAQ
#[derive(Debug, Clone, Copy)]
pub struct LinkRule {
    /// The rule applies when the question contains any of these.
    pub questions: &'static [&'static str],
    /// Text in the answer that becomes the anchor; first occurrence only.
    pub needle: &'static str,
    pub href: &'static str,
}

impl LinkRule {
    fn applies_to(&self, question: &str) -> bool {
        self.questions.iter().any(|q| question.contains(q))
    }

    fn anchor(&self) -> String {
        format!(r#"<a class="btn--link" href="{}">{}</a>"#, self.href, self.needle)
    }
}

pub const FAQ_LINK_RULES: &[LinkRule] = &[
    LinkRule {
        questions: &[
            "از لیست ارائه ها گروهی پیدا نکردم",
            "اگه گروهی بر روی سایت قرار نداشت",
            "من هم می توانم لینک بر روی سایت قرار بدم",
        ],
        needle: "گزارش مشکل",
        href: "https://t.me/Ariyan_Bolandi",
    },
    LinkRule {
        questions: &["برای استفاده از سایت باید هزینه ای پرداخت کنم"],
        needle: "توسعه دهنده",
        href: "aboutme.html",
    },
    LinkRule {
        questions: &["من چند تا ایده خوب دارم برای سایت"],
        needle: "مراحل مشارکت:",
        href: "https://www.freecodecamp.org/news/git-and-github-workflow-for-open-source/",
    },
];

/// Apply `rules` in order to an already escaped answer.
pub fn apply_link_rules(question: &str, escaped_answer: &str, rules: &[LinkRule]) -> String {
    rules
        .iter()
        .filter(|rule| rule.applies_to(question))
        .fold(escaped_answer.to_string(), |text, rule| {
            text.replacen(rule.needle, &rule.anchor(), 1)
        })
}

/// Card markup, or an empty string when the item has no question (FAQ) or
/// title (guide).
pub fn render_help_card(item: &HelpItem, kind: HelpKind) -> String {
    let Some(heading) = item.heading(kind) else {
        log::warn!("Invalid {} item skipped: {:?}", kind.as_str(), item);
        return String::new();
    };

    let escaped = escape_html_text(item.body(kind));
    let body = match kind {
        HelpKind::Faq => apply_link_rules(heading, &escaped, FAQ_LINK_RULES),
        HelpKind::Guide => escaped,
    };
    let class = match kind {
        HelpKind::Faq => "course-card",
        HelpKind::Guide => "course-card guide-card",
    };

    format!(
        r#"<article class="{class}"><details><summary class="course-summary"><h2 class="course-title">{title}</h2><div class="expand-icon">{chevron}</div></summary><div class="course-details"><p>{body}</p></div></details></article>"#,
        class = class,
        title = escape_html_text(heading),
        chevron = icon("chevron-down"),
        body = body,
    )
}

pub fn render_help_cards(items: &[HelpItem], kind: HelpKind) -> String {
    items.iter().map(|item| render_help_card(item, kind)).collect()
}
