//! `qdeck browse` / `show` / `open`: the interactive views.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::route::Location;
use crate::source::DirSource;
use crate::tui::app;
use crate::workspace::Workspace;

pub fn run(ws: &Workspace, location: Location) -> Result<()> {
    let source = Arc::new(DirSource::new(&ws.data_dir));
    info!(data = %source.root().display(), start = %location, "starting browser");
    app::run(source, location, ws.config.tag_preview)
}

/// Location for `qdeck browse [--tag T]`.
pub fn list_location(tag: Option<String>) -> Location {
    match tag {
        Some(tag) => Location::list_with_tag(tag),
        None => Location::list(),
    }
}

/// Location for `qdeck show [ID]`. A missing id still opens the detail view,
/// which reports it.
pub fn detail_location(id: Option<String>) -> Location {
    Location::Detail {
        id: id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browse_locations() {
        assert_eq!(list_location(None).to_string(), "index");
        assert_eq!(
            list_location(Some("Hash Table".into())).to_string(),
            "index?tag=Hash%20Table"
        );
    }

    #[test]
    fn show_without_id_keeps_detail_page() {
        assert_eq!(detail_location(None), Location::Detail { id: None });
        assert_eq!(detail_location(Some("  ".into())), Location::Detail { id: None });
        assert_eq!(detail_location(Some("42".into())).to_string(), "question?id=42");
    }

    #[test]
    fn show_trims_padded_ids() {
        let location = detail_location(Some(" 7 ".into()));
        assert_eq!(location, Location::Detail { id: Some("7".into()) });
        assert_eq!(location.to_string(), "question?id=7");
    }
}
