//! Highlight specifications and the highlighters that produce them.

use serde_json::Value;

use super::markup::Pattern;
use super::ranges::Interval;
use super::HighlightError;

/// What a highlighter wants marked in the current text.
#[derive(Debug, Clone)]
pub enum HighlightSpec {
    /// Explicit ranges, possibly unsorted and overlapping.
    Ranges(Vec<Interval>),
    /// Every match of a pattern.
    Pattern(Pattern),
}

impl HighlightSpec {
    pub const fn none() -> Self {
        Self::Ranges(Vec::new())
    }

    /// Resolve a dynamically shaped payload into a spec.
    ///
    /// Accepted shapes:
    /// - `[[start, end], ...]` or `[{"start": s, "end": e, "class": "c"}, ...]`
    /// - `"regex"` or `{"pattern": "regex"}`
    ///
    /// # Errors
    /// [`HighlightError::Misuse`] for any other shape,
    /// [`HighlightError::InvalidPattern`] when the regex does not compile.
    pub fn from_value(value: &Value) -> Result<Self, HighlightError> {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| interval_from_value(idx, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Ranges),
            Value::String(source) => Pattern::new(source).map(Self::Pattern),
            Value::Object(map) => match map.get("pattern") {
                Some(Value::String(source)) => Pattern::new(source).map(Self::Pattern),
                Some(other) => Err(HighlightError::misuse(format!(
                    "object whose `pattern` is {}",
                    describe(other)
                ))),
                None => Err(HighlightError::misuse("object without a `pattern` key")),
            },
            other => Err(HighlightError::misuse(describe(other))),
        }
    }
}

impl From<Vec<Interval>> for HighlightSpec {
    fn from(ranges: Vec<Interval>) -> Self {
        Self::Ranges(ranges)
    }
}

impl From<Pattern> for HighlightSpec {
    fn from(pattern: Pattern) -> Self {
        Self::Pattern(pattern)
    }
}

fn interval_from_value(idx: usize, item: &Value) -> Result<Interval, HighlightError> {
    match item {
        Value::Array(pair) => match pair.as_slice() {
            [start, end] => {
                let (Some(start), Some(end)) = (offset(start), offset(end)) else {
                    return Err(HighlightError::misuse(format!(
                        "range {idx} with non-offset bounds"
                    )));
                };
                Ok(Interval::new(start, end))
            }
            _ => Err(HighlightError::misuse(format!(
                "range {idx} with {} elements",
                pair.len()
            ))),
        },
        Value::Object(map) => {
            let (Some(start), Some(end)) = (
                map.get("start").and_then(offset),
                map.get("end").and_then(offset),
            ) else {
                return Err(HighlightError::misuse(format!(
                    "range {idx} without numeric `start`/`end`"
                )));
            };
            let mut interval = Interval::new(start, end);
            if let Some(class) = map.get("class").and_then(Value::as_str) {
                interval = interval.with_class(class);
            }
            Ok(interval)
        }
        other => Err(HighlightError::misuse(format!(
            "range {idx} given as {}",
            describe(other)
        ))),
    }
}

fn offset(value: &Value) -> Option<usize> {
    value.as_u64().and_then(|v| usize::try_from(v).ok())
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Maps the current text to a [`HighlightSpec`].
pub trait Highlighter {
    /// # Errors
    /// Returns [`HighlightError`] when no usable spec can be produced.
    fn highlight(&self, text: &str) -> Result<HighlightSpec, HighlightError>;
}

impl<F> Highlighter for F
where
    F: Fn(&str) -> HighlightSpec,
{
    fn highlight(&self, text: &str) -> Result<HighlightSpec, HighlightError> {
        Ok(self(text))
    }
}

/// Marks every occurrence of a literal needle, overlapping ones included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeedleHighlighter {
    needle: String,
}

impl NeedleHighlighter {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }
}

impl Highlighter for NeedleHighlighter {
    fn highlight(&self, text: &str) -> Result<HighlightSpec, HighlightError> {
        Ok(HighlightSpec::Ranges(
            find_indices(text, &self.needle)
                .into_iter()
                .map(|start| Interval::new(start, start + self.needle.len()))
                .collect(),
        ))
    }
}

/// Byte offsets of every occurrence of `needle` in `source`.
///
/// An empty needle matches at every char position.
pub fn find_indices(source: &str, needle: &str) -> Vec<usize> {
    source
        .char_indices()
        .map(|(idx, _)| idx)
        .filter(|&idx| source[idx..].starts_with(needle))
        .collect()
}

/// Highlights every match of a compiled pattern.
#[derive(Debug, Clone)]
pub struct PatternHighlighter {
    pattern: Pattern,
}

impl PatternHighlighter {
    pub const fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }
}

impl Highlighter for PatternHighlighter {
    fn highlight(&self, _text: &str) -> Result<HighlightSpec, HighlightError> {
        Ok(HighlightSpec::Pattern(self.pattern.clone()))
    }
}

/// Adapts a function returning a loosely shaped JSON payload.
///
/// The payload is resolved with [`HighlightSpec::from_value`] on every
/// call, so a bad shape surfaces as [`HighlightError::Misuse`].
pub struct PayloadHighlighter<F> {
    produce: F,
}

impl<F> PayloadHighlighter<F>
where
    F: Fn(&str) -> Value,
{
    pub const fn new(produce: F) -> Self {
        Self { produce }
    }
}

impl<F> Highlighter for PayloadHighlighter<F>
where
    F: Fn(&str) -> Value,
{
    fn highlight(&self, text: &str) -> Result<HighlightSpec, HighlightError> {
        HighlightSpec::from_value(&(self.produce)(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ranges(spec: HighlightSpec) -> Vec<(usize, usize)> {
        match spec {
            HighlightSpec::Ranges(list) => list.iter().map(|i| (i.start, i.end)).collect(),
            HighlightSpec::Pattern(p) => panic!("expected ranges, got pattern {}", p.as_str()),
        }
    }

    #[test]
    fn test_find_indices_includes_overlaps() {
        assert_eq!(find_indices("aaa", "aa"), vec![0, 1]);
    }

    #[test]
    fn test_find_indices_empty_source() {
        assert!(find_indices("", "Hello").is_empty());
    }

    #[test]
    fn test_find_indices_empty_needle_marks_every_char() {
        assert_eq!(find_indices("aé", ""), vec![0, 1]);
    }

    #[test]
    fn test_needle_highlighter_emits_ranges() {
        let spec = NeedleHighlighter::new("Hello")
            .highlight("Hello, Hello")
            .unwrap();
        assert_eq!(ranges(spec), vec![(0, 5), (7, 12)]);
    }

    #[test]
    fn test_closure_is_a_highlighter() {
        let highlighter = |text: &str| HighlightSpec::Ranges(vec![Interval::new(0, text.len())]);
        assert_eq!(ranges(highlighter.highlight("abc").unwrap()), vec![(0, 3)]);
    }

    #[test]
    fn test_from_value_pairs() {
        let spec = HighlightSpec::from_value(&json!([[5, 10], [1, 3]])).unwrap();
        assert_eq!(ranges(spec), vec![(5, 10), (1, 3)]);
    }

    #[test]
    fn test_from_value_objects_with_class() {
        let spec =
            HighlightSpec::from_value(&json!([{"start": 0, "end": 2, "class": "err"}])).unwrap();
        let HighlightSpec::Ranges(list) = spec else {
            panic!("expected ranges");
        };
        assert_eq!(list[0].class.as_deref(), Some("err"));
    }

    #[test]
    fn test_from_value_pattern_forms() {
        assert!(matches!(
            HighlightSpec::from_value(&json!("He(l+)o")),
            Ok(HighlightSpec::Pattern(_))
        ));
        assert!(matches!(
            HighlightSpec::from_value(&json!({"pattern": "x"})),
            Ok(HighlightSpec::Pattern(_))
        ));
    }

    #[test]
    fn test_from_value_plain_object_is_misuse() {
        let err = HighlightSpec::from_value(&json!({"start": 1})).unwrap_err();
        assert!(matches!(err, HighlightError::Misuse { .. }));
        assert!(err.to_string().contains("object without a `pattern` key"));
    }

    #[test]
    fn test_from_value_scalar_is_misuse() {
        for value in [json!(null), json!(true), json!(3)] {
            assert!(matches!(
                HighlightSpec::from_value(&value),
                Err(HighlightError::Misuse { .. })
            ));
        }
    }

    #[test]
    fn test_from_value_bad_range_element_is_misuse() {
        let err = HighlightSpec::from_value(&json!([[1, 2], [3]])).unwrap_err();
        assert!(err.to_string().contains("range 1 with 1 elements"));
        let err = HighlightSpec::from_value(&json!([[-1, 2]])).unwrap_err();
        assert!(matches!(err, HighlightError::Misuse { .. }));
    }

    #[test]
    fn test_from_value_bad_regex_is_invalid_pattern() {
        assert!(matches!(
            HighlightSpec::from_value(&json!("(")),
            Err(HighlightError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_payload_highlighter_surfaces_misuse() {
        let highlighter = PayloadHighlighter::new(|_: &str| json!({"nope": 1}));
        assert!(matches!(
            highlighter.highlight("text"),
            Err(HighlightError::Misuse { .. })
        ));
    }
}
