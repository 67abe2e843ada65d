//! Shareable locations: `index?tag=…` for the list, `question?id=…` for a detail.
//!
//! The TUI keeps the current location in its title bar; `qdeck open <location>`
//! lands on the same view.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("unknown page {0:?} (expected `index` or `question`)")]
    UnknownPage(String),
    #[error("invalid percent-encoding in {0:?}")]
    BadEncoding(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    List { tag: Option<String> },
    Detail { id: Option<String> },
}

impl Location {
    pub fn list() -> Self {
        Self::List { tag: None }
    }

    pub fn list_with_tag(tag: impl Into<String>) -> Self {
        Self::List {
            tag: Some(tag.into()),
        }
    }

    pub fn detail(id: impl ToString) -> Self {
        Self::Detail {
            id: Some(id.to_string()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List { tag: None } => f.write_str("index"),
            Self::List { tag: Some(tag) } => write!(f, "index?tag={}", encode_component(tag)),
            Self::Detail { id: None } => f.write_str("question"),
            Self::Detail { id: Some(id) } => write!(f, "question?id={}", encode_component(id)),
        }
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (page, query) = raw.trim().split_once('?').unwrap_or((raw.trim(), ""));
        let page = page.trim_start_matches('/');
        let page = page.strip_suffix(".html").unwrap_or(page);
        let param = |name: &str| -> Result<Option<String>, LocationError> {
            for pair in query.split('&').filter(|p| !p.is_empty()) {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                if decode_component(key)? == name {
                    return Ok(Some(decode_component(value)?));
                }
            }
            Ok(None)
        };
        match page {
            "" | "index" => Ok(Self::List { tag: param("tag")? }),
            "question" => Ok(Self::Detail {
                id: param("id")?.filter(|id| !id.is_empty()),
            }),
            other => Err(LocationError::UnknownPage(other.to_string())),
        }
    }
}

/// Percent-encode everything except RFC 3986 unreserved characters.
pub fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Form-style decode: `+` is a space, `%XX` a byte. The result must be UTF-8.
pub fn decode_component(raw: &str) -> Result<String, LocationError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| LocationError::BadEncoding(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_location_round_trips_tag_with_spaces() {
        let loc = Location::list_with_tag("Hash Table");
        assert_eq!(loc.to_string(), "index?tag=Hash%20Table");
        assert_eq!("index?tag=Hash%20Table".parse::<Location>().unwrap(), loc);
    }

    #[test]
    fn html_suffix_and_plus_spaces_are_accepted() {
        assert_eq!(
            "index.html?tag=Linked+List".parse::<Location>().unwrap(),
            Location::list_with_tag("Linked List")
        );
        assert_eq!(
            "/question.html?id=20".parse::<Location>().unwrap(),
            Location::detail(20)
        );
    }

    #[test]
    fn detail_without_id_parses_to_missing_id() {
        assert_eq!(
            "question".parse::<Location>().unwrap(),
            Location::Detail { id: None }
        );
        assert_eq!(
            "question?id=".parse::<Location>().unwrap(),
            Location::Detail { id: None }
        );
    }

    #[test]
    fn unrelated_params_are_ignored() {
        assert_eq!(
            "question?x=1&id=7".parse::<Location>().unwrap(),
            Location::detail(7)
        );
        assert_eq!("index?foo=bar".parse::<Location>().unwrap(), Location::list());
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(matches!(
            "settings?x=1".parse::<Location>(),
            Err(LocationError::UnknownPage(_))
        ));
        assert!(matches!(
            "index?tag=%FF".parse::<Location>(),
            Err(LocationError::BadEncoding(_))
        ));
    }

    #[test]
    fn signed_escapes_are_not_hex() {
        assert_eq!(decode_component("a%+1").unwrap(), "a% 1");
        assert_eq!(decode_component("%41%2B").unwrap(), "A+");
    }

    #[test]
    fn encoding_keeps_unreserved_characters() {
        assert_eq!(encode_component("Two-Sum_v2.~"), "Two-Sum_v2.~");
        assert_eq!(encode_component("C++ & Go"), "C%2B%2B%20%26%20Go");
        assert_eq!(decode_component(&encode_component("C++ & Go")).unwrap(), "C++ & Go");
    }
}
