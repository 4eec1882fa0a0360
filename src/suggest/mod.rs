//! Mention-style autocomplete suggestions.
//!
//! Typing a trigger character (e.g. `@`) opens a list of suggestions
//! filtered by the text typed after it. Accepting one replaces the
//! trigger and query with the suggestion's value.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// One entry in the suggestion list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    /// What the dropdown shows.
    pub preview: String,
    /// What gets inserted.
    pub value: String,
}

impl Suggestion {
    pub fn new(preview: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            preview: preview.into(),
            value: value.into(),
        }
    }
}

/// Supplies suggestions for a mention query.
pub trait SuggestionSource {
    fn suggestions(&self, query: &str) -> Vec<Suggestion>;
}

/// A fixed list filtered by case-insensitive substring of the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSuggestions {
    entries: Vec<Suggestion>,
}

impl StaticSuggestions {
    pub const fn new(entries: Vec<Suggestion>) -> Self {
        Self { entries }
    }

    /// Load a JSON array of `{"preview", "value"}` objects.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read suggestions {}", path.display()))?;
        let entries: Vec<Suggestion> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse suggestions {}", path.display()))?;
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[Suggestion] {
        &self.entries
    }
}

impl Default for StaticSuggestions {
    fn default() -> Self {
        Self::new(vec![
            Suggestion::new("Andre", "@andre"),
            Suggestion::new("Angela", "@angela"),
            Suggestion::new("David", "@david"),
            Suggestion::new("Louise", "@louise"),
        ])
    }
}

impl SuggestionSource for StaticSuggestions {
    fn suggestions(&self, query: &str) -> Vec<Suggestion> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.preview.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }
}

/// A mention being typed: the trigger's byte offset and the query
/// between the trigger and the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionQuery {
    pub trigger: char,
    pub start: usize,
    pub query: String,
}

impl MentionQuery {
    /// Byte range to replace when a suggestion is accepted.
    pub const fn replace_range(&self, cursor: usize) -> std::ops::Range<usize> {
        self.start..cursor
    }
}

/// Find the mention being typed at `cursor`, if any.
///
/// The trigger must be at the start of the text or follow whitespace,
/// and no whitespace may sit between it and the cursor.
pub fn active_mention(text: &str, cursor: usize, triggers: &[char]) -> Option<MentionQuery> {
    let before = text.get(..cursor)?;
    let (start, trigger) = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| !c.is_whitespace())
        .find(|(_, c)| triggers.contains(c))?;

    let preceded_ok = before[..start]
        .chars()
        .next_back()
        .is_none_or(char::is_whitespace);
    if !preceded_ok {
        return None;
    }
    Some(MentionQuery {
        trigger,
        start,
        query: before[start + trigger.len_utf8()..].to_string(),
    })
}

/// Open suggestion list with a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionState {
    pub mention: MentionQuery,
    pub items: Vec<Suggestion>,
    pub selected: usize,
}

impl SuggestionState {
    pub const fn new(mention: MentionQuery, items: Vec<Suggestion>) -> Self {
        Self {
            mention,
            items,
            selected: 0,
        }
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
    }

    pub fn current(&self) -> Option<&Suggestion> {
        self.items.get(self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_static_filter_is_case_insensitive() {
        let source = StaticSuggestions::default();
        let values: Vec<_> = source
            .suggestions("AN")
            .into_iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(values, vec!["@andre", "@angela"]);
    }

    #[test]
    fn test_empty_query_returns_all() {
        assert_eq!(StaticSuggestions::default().suggestions("").len(), 4);
    }

    #[test]
    fn test_active_mention_at_cursor() {
        let text = "hello @an";
        let mention = active_mention(text, text.len(), &['@']).unwrap();
        assert_eq!(mention.start, 6);
        assert_eq!(mention.query, "an");
        assert_eq!(mention.replace_range(text.len()), 6..9);
    }

    #[test]
    fn test_active_mention_at_text_start() {
        let mention = active_mention("@", 1, &['@']).unwrap();
        assert_eq!(mention.query, "");
    }

    #[test]
    fn test_active_mention_ignores_email_like_text() {
        assert_eq!(active_mention("mail me@host", 12, &['@']), None);
    }

    #[test]
    fn test_active_mention_closed_by_whitespace() {
        assert_eq!(active_mention("@andre ", 7, &['@']), None);
    }

    #[test]
    fn test_active_mention_cursor_mid_text() {
        let mention = active_mention("x @da y", 5, &['@']).unwrap();
        assert_eq!(mention.query, "da");
    }

    #[test]
    fn test_selection_wraps() {
        let mention = active_mention("@", 1, &['@']).unwrap();
        let mut state = SuggestionState::new(mention, StaticSuggestions::default().suggestions(""));
        state.select_prev();
        assert_eq!(state.current().map(|s| s.value.as_str()), Some("@louise"));
        state.select_next();
        assert_eq!(state.current().map(|s| s.value.as_str()), Some("@andre"));
    }

    #[test]
    fn test_load_suggestions_from_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("people.json");
        std::fs::write(&path, r#"[{"preview": "Zed", "value": "@zed"}]"#).unwrap();
        let source = StaticSuggestions::load(&path).unwrap();
        assert_eq!(source.entries(), &[Suggestion::new("Zed", "@zed")]);
    }

    #[test]
    fn test_load_suggestions_reports_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{").unwrap();
        let err = StaticSuggestions::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse suggestions"));
    }
}
