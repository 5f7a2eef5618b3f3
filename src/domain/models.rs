use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of entries kept in [`History`].
pub const HISTORY_CAPACITY: usize = 20;

/// A submitted expression and its formatted result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    expression: String,
    result: String,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn result(&self) -> &str {
        &self.result
    }
}

/// Bounded list of past calculations, most recent first.
///
/// # Examples
///
/// ```
/// use tcalc::domain::History;
///
/// let mut history = History::default();
/// history.record("1+1", "2");
/// history.record("2*3", "6");
///
/// let first = history.list().next().unwrap();
/// assert_eq!(first.expression(), "2*3");
/// assert_eq!(history.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    /// Inserts at the front, dropping the oldest entry beyond capacity.
    pub fn record(&mut self, expression: impl Into<String>, result: impl Into<String>) {
        self.entries.push_front(HistoryEntry::new(expression, result));
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn list(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Colour scheme of the terminal front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_orders_most_recent_first() {
        let mut history = History::default();
        history.record("1+1", "2");
        history.record("2+2", "4");
        history.record("3+3", "6");

        let expressions: Vec<&str> = history.list().map(|e| e.expression()).collect();
        assert_eq!(expressions, vec!["3+3", "2+2", "1+1"]);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = History::default();
        for i in 0..25 {
            history.record(format!("{}+0", i), i.to_string());
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        let results: Vec<&str> = history.list().map(|e| e.result()).collect();
        assert_eq!(results.first(), Some(&"24"));
        assert_eq!(results.last(), Some(&"5"));
        for old in 0..5 {
            assert!(!results.contains(&old.to_string().as_str()));
        }
    }

    #[test]
    fn test_clear() {
        let mut history = History::default();
        history.record("1", "1");
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.list().len(), 0);
    }

    #[test]
    fn test_get() {
        let mut history = History::default();
        history.record("1+2", "3");
        assert_eq!(history.get(0), Some(&HistoryEntry::new("1+2", "3")));
        assert_eq!(history.get(1), None);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
    }
}
