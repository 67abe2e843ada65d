//! `qdeck list`: print the filtered catalog without the TUI.

use anyhow::{Context, Result, bail};

use crate::catalog::model::{Difficulty, QuestionSummary};
use crate::catalog::selection::SelectionState;
use crate::catalog::{Catalog, derive_tags, filter};
use crate::source::{self, DirSource};
use crate::tui::render::tag_preview_text;
use crate::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Rows,
    Ids,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub tag: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub search: Option<String>,
    pub format: OutputFormat,
}

pub fn run(ws: &Workspace, args: &ListArgs) -> Result<()> {
    let catalog = load_catalog(ws)?;
    let state = selection_for(&catalog, args)?;
    let shown = filter::apply(&catalog, &state);

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
        OutputFormat::Ids => {
            for q in &shown {
                println!("{}", q.id);
            }
        }
        OutputFormat::Rows => {
            for line in list_rows(&shown, ws.config.tag_preview) {
                println!("  {}", line);
            }
            println!("\n  Showing {} questions", shown.len());
        }
    }
    Ok(())
}

pub(crate) fn load_catalog(ws: &Workspace) -> Result<Catalog> {
    let source = DirSource::new(&ws.data_dir);
    source::fetch_catalog(&source)
        .with_context(|| format!("Failed to load questions index from {}", ws.data_dir.display()))
}

fn selection_for(catalog: &Catalog, args: &ListArgs) -> Result<SelectionState> {
    let mut state = SelectionState::new();
    if let Some(tag) = &args.tag
        && !state.seed_from_tag(tag, &derive_tags(catalog))
    {
        bail!("unknown tag {tag:?} (see `qdeck tags`)");
    }
    state.set_difficulty(args.difficulty);
    if let Some(search) = &args.search {
        state.set_search_text(search);
    }
    Ok(state)
}

fn list_rows(shown: &[&QuestionSummary], tag_preview: usize) -> Vec<String> {
    shown
        .iter()
        .map(|q| {
            let tags = tag_preview_text(&q.tags, tag_preview);
            let badge = format!("[{}]", q.difficulty.label());
            if tags.is_empty() {
                format!("{:<8} {}", badge, q.heading())
            } else {
                format!("{:<8} {}  ({})", badge, q.heading(), tags)
            }
        })
        .collect()
}
