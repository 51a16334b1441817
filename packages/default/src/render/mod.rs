//! The rendered environment list.
//!
//! A [`RenderedList`] is a plain value built from one fetched list. It is
//! never patched in place: every refresh builds a new one and swaps it in.

mod html;

pub use html::{escape, render_page, take_down_action};

use crate::models::environments::EnvironmentRecord;
use serde::Serialize;

/// Removal control attached to a rendered entry, tagged with the entry's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveControl {
    pub data_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEntry {
    /// Link label
    pub label: String,
    /// Link target
    pub href: String,
    pub remove: RemoveControl,
}

impl RenderedEntry {
    fn from_record(record: &EnvironmentRecord) -> Self {
        Self {
            label: record.id.clone(),
            href: record.url.clone(),
            remove: RemoveControl {
                data_id: record.id.clone(),
            },
        }
    }

    /// `<li>` markup for this entry.
    pub fn to_html(&self) -> String {
        self.markup(&self.button(""))
    }

    /// `<li>` markup with the removal control wrapped in a form posting to
    /// `action`. With no action the control is rendered disabled.
    pub fn to_html_with_action(&self, action: Option<&str>) -> String {
        match action {
            Some(action) => self.markup(&format!(
                "<form method=\"post\" action=\"{action}\">{button}</form>",
                action = escape(action),
                button = self.button(""),
            )),
            None => self.markup(&self.button(" disabled")),
        }
    }

    fn button(&self, attrs: &str) -> String {
        format!(
            "<button class=\"take-down btn btn-danger btn-sm\" data-id=\"{id}\"{attrs}>Take down</button>",
            id = escape(&self.remove.data_id),
            attrs = attrs,
        )
    }

    fn markup(&self, control: &str) -> String {
        format!(
            concat!(
                "<li class=\"list-group-item d-flex justify-content-between align-items-center\">",
                "<div><a href=\"{href}\" target=\"_blank\">{label}</a></div>",
                "{control}",
                "</li>"
            ),
            href = escape(&self.href),
            label = escape(&self.label),
            control = control,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedList {
    entries: Vec<RenderedEntry>,
}

impl RenderedList {
    /// Builds the list from `records` in the order given, with no sorting,
    /// filtering or de-duplication.
    pub fn render(records: &[EnvironmentRecord]) -> Self {
        Self {
            entries: records.iter().map(RenderedEntry::from_record).collect(),
        }
    }

    pub fn entries(&self) -> &[RenderedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of the rendered removal controls, in display order.
    pub fn ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.remove.data_id.as_str())
            .collect()
    }

    /// The records this list was rendered from.
    pub fn records(&self) -> Vec<EnvironmentRecord> {
        self.entries
            .iter()
            .map(|e| EnvironmentRecord::new(e.label.clone(), e.href.clone()))
            .collect()
    }

    /// Concatenated `<li>` items, suitable for the body of `<ul id="environments">`.
    pub fn to_html(&self) -> String {
        self.entries.iter().map(RenderedEntry::to_html).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<EnvironmentRecord> {
        vec![
            EnvironmentRecord::new("env-1", "http://a"),
            EnvironmentRecord::new("env-2", "http://b"),
        ]
    }

    #[test]
    fn test_render_keeps_server_order_and_tags_controls() {
        let list = RenderedList::render(&sample());

        assert_eq!(list.len(), 2);
        assert_eq!(list.ids(), vec!["env-1", "env-2"]);
        assert_eq!(list.entries()[0].href, "http://a");
        assert_eq!(list.entries()[1].label, "env-2");

        let html = list.to_html();
        let first = html.find("data-id=\"env-1\"").unwrap();
        let second = html.find("data-id=\"env-2\"").unwrap();
        assert!(first < second);
        assert!(html.contains("<a href=\"http://a\" target=\"_blank\">env-1</a>"));
        assert!(html.contains("<a href=\"http://b\" target=\"_blank\">env-2</a>"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let records = sample();
        let once = RenderedList::render(&records);
        let twice = RenderedList::render(&RenderedList::render(&records).records());

        assert_eq!(once, twice);
        assert_eq!(once.to_html(), twice.to_html());
    }

    #[test]
    fn test_render_replaces_rather_than_merges() {
        let before = RenderedList::render(&sample());
        let after = RenderedList::render(&[EnvironmentRecord::new("env-3", "http://c")]);

        assert_ne!(before, after);
        assert_eq!(after.ids(), vec!["env-3"]);
    }

    #[test]
    fn test_duplicate_ids_are_rendered_as_given() {
        let records = vec![
            EnvironmentRecord::new("dup", "http://one"),
            EnvironmentRecord::new("dup", "http://two"),
        ];
        let list = RenderedList::render(&records);
        assert_eq!(list.ids(), vec!["dup", "dup"]);
    }

    #[test]
    fn test_markup_is_escaped() {
        let list = RenderedList::render(&[EnvironmentRecord::new(
            "<script>",
            "http://x/?a=1&b=\"2\"",
        )]);
        let html = list.to_html();

        assert!(html.contains("&lt;script&gt;</a>"));
        assert!(html.contains("data-id=\"&lt;script&gt;\""));
        assert!(html.contains("href=\"http://x/?a=1&amp;b=&quot;2&quot;\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_action_wraps_the_same_control_in_a_form() {
        let list = RenderedList::render(&sample());
        let entry = &list.entries()[0];

        let plain = entry.to_html();
        let with_form = entry.to_html_with_action(Some("/environments/env-1/take-down"));
        assert_eq!(
            with_form,
            plain.replace(
                "<button",
                "<form method=\"post\" action=\"/environments/env-1/take-down\"><button"
            )
            .replace("</button>", "</button></form>")
        );

        let disabled = entry.to_html_with_action(None);
        assert!(disabled.contains("data-id=\"env-1\" disabled>Take down</button>"));
        assert!(!disabled.contains("<form"));
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        let list = RenderedList::render(&[]);
        assert!(list.is_empty());
        assert_eq!(list.to_html(), "");
    }
}
