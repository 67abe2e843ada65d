use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A question's difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Cycle used by the list view's difficulty control: all → Easy → Medium → Hard → all.
    pub fn cycle(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::Easy),
            Some(Self::Easy) => Some(Self::Medium),
            Some(Self::Medium) => Some(Self::Hard),
            Some(Self::Hard) => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Numeric question id. Data files may carry it as a number or as a numeral string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct QuestionId(pub u64);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| serde::de::Error::custom(format!("invalid question id {s:?}"))),
        }
    }
}

/// Normalized id used for matching: the decimal text of the id.
///
/// An integer id and a numeral-as-string id compare equal through this key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdKey(String);

impl IdKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<QuestionId> for IdKey {
    fn from(id: QuestionId) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for IdKey {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for IdKey {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for IdKey {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&String> for IdKey {
    fn from(id: &String) -> Self {
        Self(id.clone())
    }
}

/// One entry of the catalog index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub id: QuestionId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub difficulty: Difficulty,
    /// Tag labels in source order. May repeat; membership treats them as a set.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl QuestionSummary {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn heading(&self) -> String {
        format!("{}. {}", self.id, self.title)
    }
}

/// A full question record as served per id.
///
/// Only the summary fields take part in filtering and navigation; the rest is
/// handed to the renderer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionDetail {
    #[serde(flatten)]
    pub summary: QuestionSummary,
    /// Description markup.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub java_snippet: Option<String>,
    /// Solution markup.
    #[serde(default)]
    pub solution: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_accepts_string_and_numeric_ids() {
        let a: QuestionSummary =
            serde_json::from_str(r#"{"id":7,"title":"x","difficulty":"Easy","tags":[]}"#).unwrap();
        let b: QuestionSummary =
            serde_json::from_str(r#"{"id":"7","title":"x","difficulty":"Easy","tags":[]}"#)
                .unwrap();
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn missing_or_null_tags_default_to_empty() {
        let a: QuestionSummary =
            serde_json::from_str(r#"{"id":1,"title":"x","difficulty":"Hard"}"#).unwrap();
        let b: QuestionSummary =
            serde_json::from_str(r#"{"id":1,"title":"x","difficulty":"Hard","tags":null}"#)
                .unwrap();
        assert!(a.tags.is_empty());
        assert!(b.tags.is_empty());
    }

    #[test]
    fn difficulty_is_case_sensitive() {
        assert!(
            serde_json::from_str::<QuestionSummary>(
                r#"{"id":1,"title":"x","difficulty":"easy"}"#
            )
            .is_err()
        );
    }

    #[test]
    fn difficulty_cycle_wraps_through_all() {
        let mut d = None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            d = Difficulty::cycle(d);
            seen.push(d);
        }
        assert_eq!(
            seen,
            vec![
                Some(Difficulty::Easy),
                Some(Difficulty::Medium),
                Some(Difficulty::Hard),
                None
            ]
        );
    }

    #[test]
    fn detail_flattens_summary_and_keeps_passthrough_fields() {
        let d: QuestionDetail = serde_json::from_str(
            r#"{"id":"2","title":"Add Two Numbers","difficulty":"Medium","tags":["Linked List"],
                "content":"<p>hi</p>","java_snippet":"class Solution {}","solution":null}"#,
        )
        .unwrap();
        assert_eq!(d.summary.id, QuestionId(2));
        assert_eq!(d.content.as_deref(), Some("<p>hi</p>"));
        assert!(d.solution.is_none());
    }

    #[test]
    fn id_keys_compare_by_decimal_text() {
        assert_eq!(IdKey::from(QuestionId(20)), IdKey::from("20"));
        assert_eq!(IdKey::from(20u64), IdKey::from(String::from("20")));
        assert_ne!(IdKey::from(20u64), IdKey::from("020"));
    }
}
