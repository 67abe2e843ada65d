//! `qdeck split`: turn one full question dump into per-id records plus the index.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use crossterm::style::Stylize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::catalog::model::QuestionSummary;
use crate::config::{self, Config};
use crate::source::{INDEX_KEY, is_record_key};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitReport {
    pub questions: usize,
    /// Records left out: unusable id, or no valid index summary.
    pub skipped: usize,
    pub index_bytes: u64,
    pub total_bytes: u64,
    pub input_bytes: u64,
    /// Set when a default `qdeck.conf` was created next to the output.
    pub config_written: Option<PathBuf>,
}

pub fn run(input: &Path, out_dir: &Path) -> Result<()> {
    println!("  {} {}", "Reading".cyan().bold(), input.display());
    let report = split_file(input, out_dir)?;
    print_report(&report, out_dir);
    Ok(())
}

pub fn split_file(input: &Path, out_dir: &Path) -> Result<SplitReport> {
    let raw =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let questions = parse_dump(&raw).with_context(|| format!("parsing {}", input.display()))?;
    info!(count = questions.len(), "parsed question dump");

    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut index = Vec::with_capacity(questions.len());
    let mut skipped = 0;
    for (position, q) in questions.iter().enumerate() {
        let key = record_key(q).filter(|k| is_record_key(k) && k.as_str() != INDEX_KEY);
        let Some(key) = key else {
            warn!(position, id = ?q.get("id"), "skipping record with unusable id");
            skipped += 1;
            continue;
        };
        let entry = index_entry(q);
        if let Err(err) = serde_json::from_value::<QuestionSummary>(entry.clone()) {
            warn!(id = %key, error = %err, "skipping record the index cannot hold");
            skipped += 1;
            continue;
        }
        let path = record_path(out_dir, &key);
        fs::write(&path, serde_json::to_vec(q)?)
            .with_context(|| format!("writing {}", path.display()))?;
        debug!(path = %path.display(), "wrote record");
        index.push(entry);
    }

    let index_path = record_path(out_dir, INDEX_KEY);
    fs::write(&index_path, serde_json::to_vec(&index)?)
        .with_context(|| format!("writing {}", index_path.display()))?;

    let mut total_bytes = 0;
    for entry in fs::read_dir(out_dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            total_bytes += fs::metadata(&path)?.len();
        }
    }
    Ok(SplitReport {
        questions: index.len(),
        skipped,
        index_bytes: fs::metadata(&index_path)?.len(),
        total_bytes,
        input_bytes: raw.len() as u64,
        config_written: write_default_config(out_dir)?,
    })
}

/// Drop a commented `qdeck.conf` beside `out_dir` so later runs find the data.
/// An existing config is left alone.
fn write_default_config(out_dir: &Path) -> Result<Option<PathBuf>> {
    let root = out_dir
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let path = config::config_path(root);
    if path.exists() {
        return Ok(None);
    }
    let config = Config {
        data_dir: out_dir.file_name().map(PathBuf::from),
        ..Config::default()
    };
    fs::write(&path, config::serialize_config(&config))
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(Some(path))
}

/// Parse either a bare JSON array or `const questionsData = [...];`.
fn parse_dump(raw: &str) -> Result<Vec<Value>> {
    let body = strip_js_wrapper(raw)?;
    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::Array(items) => Ok(items),
        _ => bail!("expected a JSON array of questions"),
    }
}

fn strip_js_wrapper(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        return Ok(trimmed);
    }
    let body = trimmed
        .strip_prefix("const")
        .map(str::trim_start)
        .and_then(|s| s.strip_prefix("questionsData"))
        .map(str::trim_start)
        .and_then(|s| s.strip_prefix('='))
        .map(|s| s.trim().trim_end_matches(';').trim_end());
    match body {
        Some(body) if body.starts_with('[') && body.ends_with(']') => Ok(body),
        _ => bail!("expected `const questionsData = [...]` or a JSON array"),
    }
}

fn record_key(q: &Value) -> Option<String> {
    match q.get("id") {
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn record_path(out_dir: &Path, key: &str) -> PathBuf {
    out_dir.join(format!("{key}.json"))
}

fn index_entry(q: &Value) -> Value {
    let field = |name: &str| q.get(name).cloned().unwrap_or(Value::Null);
    json!({
        "id": field("id"),
        "title": field("title"),
        "difficulty": field("difficulty"),
        "tags": q.get("tags").cloned().unwrap_or_else(|| json!([])),
    })
}

fn kib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

fn print_report(r: &SplitReport, out_dir: &Path) {
    println!("\n  {}", "Done".green().bold());
    println!(
        "    individual files : {} × {}/<id>.json",
        r.questions.to_string().green(),
        out_dir.display()
    );
    if r.skipped > 0 {
        println!(
            "    skipped          : {} (see log for ids)",
            r.skipped.to_string().yellow()
        );
    }
    println!("    index.json size  : {:.1} KB", kib(r.index_bytes));
    println!(
        "    total JSON size  : {:.1} MB  (input {:.1} MB)",
        kib(r.total_bytes) / 1024.0,
        kib(r.input_bytes) / 1024.0
    );
    if let Some(path) = &r.config_written {
        println!("  {} {}", "Created".green().bold(), path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::catalog::model::QuestionDetail;
    use tempfile::TempDir;

    const DUMP: &str = r#"const questionsData = [
        {"id":1,"title":"Two Sum","difficulty":"Easy","tags":["Array"],
         "content":"<p>Find two.</p>","java_snippet":"class Solution {}","solution":null},
        {"id":"2","title":"Add Two Numbers","difficulty":"Medium"}
    ];
    "#;

    #[test]
    fn wrapper_is_stripped() {
        assert_eq!(strip_js_wrapper(" [1] ").unwrap(), "[1]");
        assert_eq!(strip_js_wrapper("const questionsData=[1];").unwrap(), "[1]");
        assert!(strip_js_wrapper("let x = [1]").is_err());
        assert!(strip_js_wrapper("const questionsData = {}").is_err());
    }

    #[test]
    fn split_writes_records_and_loadable_index() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("data.js");
        fs::write(&input, DUMP).unwrap();
        let out = dir.path().join("data");

        let report = split_file(&input, &out).unwrap();
        assert_eq!(report.questions, 2);
        assert!(report.index_bytes > 0);
        assert!(report.total_bytes > report.index_bytes);

        let index = fs::read(out.join("index.json")).unwrap();
        let catalog = Catalog::from_json(&index).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.items()[1].tags, Vec::<String>::new());

        let detail: QuestionDetail =
            serde_json::from_slice(&fs::read(out.join("1.json")).unwrap()).unwrap();
        assert_eq!(detail.content.as_deref(), Some("<p>Find two.</p>"));
        assert_eq!(detail.solution, None);
        assert!(out.join("2.json").exists());

        assert_eq!(report.config_written, Some(dir.path().join("qdeck.conf")));
        let ws = crate::workspace::resolve_from(dir.path(), None).unwrap();
        assert_eq!(ws.data_dir, out);
    }

    #[test]
    fn existing_config_is_kept() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("qdeck.conf"), "tag_preview: 5\n").unwrap();
        let input = dir.path().join("dump.json");
        fs::write(&input, "[]").unwrap();
        let report = split_file(&input, &dir.path().join("data")).unwrap();
        assert_eq!(report.questions, 0);
        assert_eq!(report.config_written, None);
        assert_eq!(
            fs::read_to_string(dir.path().join("qdeck.conf")).unwrap(),
            "tag_preview: 5\n"
        );
    }

    fn split_dump(dump: &str) -> (TempDir, PathBuf, SplitReport) {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("dump.json");
        fs::write(&input, dump).unwrap();
        let out = dir.path().join("data");
        let report = split_file(&input, &out).unwrap();
        (dir, out, report)
    }

    #[test]
    fn records_without_difficulty_stay_out_of_the_index() {
        let (_dir, out, report) = split_dump(
            r#"[{"id":1,"title":"Two Sum","difficulty":"Easy"},{"id":2,"title":"Locked"}]"#,
        );
        assert_eq!(report.questions, 1);
        assert_eq!(report.skipped, 1);
        let catalog = Catalog::from_json(&fs::read(out.join("index.json")).unwrap()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(!out.join("2.json").exists());
    }

    #[test]
    fn ids_that_are_not_plain_file_names_are_skipped() {
        let (dir, out, report) = split_dump(
            r#"[{"id":"../escaped","title":"x","difficulty":"Easy"},
                {"id":"index","title":"y","difficulty":"Easy"},
                {"title":"no id","difficulty":"Easy"},
                {"id":" 7 ","title":"z","difficulty":"Easy"}]"#,
        );
        assert!(!dir.path().join("escaped.json").exists());
        assert_eq!(report.skipped, 3);
        assert_eq!(report.questions, 1);
        assert!(out.join("7.json").exists());
        let catalog = Catalog::from_json(&fs::read(out.join("index.json")).unwrap()).unwrap();
        assert_eq!(catalog.items()[0].id.0, 7);
    }

    #[test]
    fn non_array_dump_is_rejected() {
        assert!(parse_dump(r#"{"id":1}"#).is_err());
    }
}
