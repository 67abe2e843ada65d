//! `qdeck audit`: content quality report over the per-question records.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use tracing::warn;

use crate::catalog::model::QuestionDetail;
use crate::source::INDEX_KEY;
use crate::workspace::Workspace;

/// Descriptions shorter than this are probably truncated.
const MIN_CONTENT_CHARS: usize = 100;

/// Markers that show a solution actually contains Java code.
const JAVA_MARKERS: [&str; 10] = [
    "class Solution",
    "public int",
    "public boolean",
    "public void",
    "public String",
    "public List",
    "public char",
    "public double",
    "public long",
    "public Node",
];

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

pub fn run(ws: &Workspace) -> Result<()> {
    let records = read_records(&ws.data_dir)?;
    println!("  Auditing {} question files...", records.len());
    let report = compute(&records);
    print_report(&report);
    Ok(())
}

fn read_records(data_dir: &Path) -> Result<Vec<QuestionDetail>> {
    let mut paths = Vec::new();
    for entry in
        fs::read_dir(data_dir).with_context(|| format!("reading {}", data_dir.display()))?
    {
        let path = entry?.path();
        let is_record = path.extension().is_some_and(|ext| ext == "json")
            && path.file_stem().is_some_and(|stem| stem != INDEX_KEY);
        if is_record {
            paths.push(path);
        }
    }
    paths.sort();

    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        match serde_json::from_slice::<QuestionDetail>(&bytes) {
            Ok(detail) => records.push(detail),
            Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable record"),
        }
    }
    records.sort_by_key(|d| d.summary.id);
    Ok(records)
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AuditReport {
    pub total: usize,
    /// No description at all (premium-locked upstream).
    pub null_content: Vec<String>,
    pub empty_content: Vec<String>,
    /// Label and description length.
    pub short_content: Vec<(String, usize)>,
    /// Label and the remote image URLs still referenced.
    pub remote_images: Vec<(String, Vec<String>)>,
    pub no_java_snippet: Vec<String>,
    pub no_solution: Vec<String>,
    /// Informational: a solution exists but carries no Java code.
    pub no_java_in_solution: Vec<String>,
}

impl AuditReport {
    /// Issue count for the summary line; the Java-in-solution check is advisory.
    pub fn issue_count(&self) -> usize {
        self.null_content.len()
            + self.empty_content.len()
            + self.short_content.len()
            + self.remote_images.len()
            + self.no_java_snippet.len()
            + self.no_solution.len()
    }
}

pub fn compute(records: &[QuestionDetail]) -> AuditReport {
    let mut report = AuditReport {
        total: records.len(),
        ..AuditReport::default()
    };
    for d in records {
        let label = format!("[{}] {}", d.summary.id, d.summary.title);

        match d.content.as_deref() {
            None => report.null_content.push(label.clone()),
            Some("") => report.empty_content.push(label.clone()),
            Some(content) => {
                let len = content.chars().count();
                if len < MIN_CONTENT_CHARS {
                    report.short_content.push((label.clone(), len));
                }
                let remote = remote_image_urls(content);
                if !remote.is_empty() {
                    report.remote_images.push((label.clone(), remote));
                }
            }
        }

        if d.java_snippet.as_deref().is_none_or(str::is_empty) {
            report.no_java_snippet.push(label.clone());
        }

        match d.solution.as_deref() {
            None | Some("") => report.no_solution.push(label),
            Some(solution) => {
                if !JAVA_MARKERS.iter().any(|m| solution.contains(m)) {
                    report.no_java_in_solution.push(label);
                }
            }
        }
    }
    report
}

/// `src="http(s)://…"` attribute values.
fn remote_image_urls(html: &str) -> Vec<String> {
    let mut urls = Vec::new();
    let mut rest = html;
    while let Some(at) = rest.find("src=\"") {
        rest = &rest[at + 5..];
        let Some(end) = rest.find('"') else { break };
        let url = &rest[..end];
        if url.starts_with("http://") || url.starts_with("https://") {
            urls.push(url.to_string());
        }
        rest = &rest[end + 1..];
    }
    urls
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn section_header(title: &str, count: usize, total: usize) {
    let line = format!("{title}: {count}/{total}");
    if count == 0 {
        println!("\n  {} {}", "ok".green().bold(), line);
    } else {
        println!("\n  {} {}", "!!".yellow().bold(), line.bold());
    }
}

fn print_labels(title: &str, labels: &[String], total: usize) {
    section_header(title, labels.len(), total);
    for label in labels {
        println!("      {label}");
    }
}

fn print_report(r: &AuditReport) {
    print_labels("Null descriptions", &r.null_content, r.total);
    print_labels("Empty descriptions", &r.empty_content, r.total);

    section_header(
        "Suspiciously short descriptions (<100 chars)",
        r.short_content.len(),
        r.total,
    );
    for (label, len) in &r.short_content {
        println!("      {label}  [{len} chars]");
    }

    section_header(
        "Remote images still in description",
        r.remote_images.len(),
        r.total,
    );
    for (label, urls) in &r.remote_images {
        println!("      {label}");
        for url in urls.iter().take(3) {
            println!("        {}", format!("img: {url}").dark_grey());
        }
        if urls.len() > 3 {
            println!("        {}", format!("... +{} more", urls.len() - 3).dark_grey());
        }
    }

    print_labels("Missing Java starter snippet", &r.no_java_snippet, r.total);
    print_labels("Missing solution", &r.no_solution, r.total);
    print_labels(
        "Solution without Java code",
        &r.no_java_in_solution,
        r.total,
    );

    let issues = r.issue_count();
    if issues == 0 {
        println!("\n  {}", format!("All {} questions look good.", r.total).green().bold());
    } else {
        println!(
            "\n  {}",
            format!("{} total issues found across {} questions", issues, r.total)
                .yellow()
                .bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn detail(json: &str) -> QuestionDetail {
        serde_json::from_str(json).unwrap()
    }

    fn good_content() -> String {
        format!("<p>{}</p>", "x".repeat(120))
    }

    #[test]
    fn clean_record_has_no_issues() {
        let d = detail(&format!(
            r#"{{"id":1,"title":"Two Sum","difficulty":"Easy","content":"{}",
                "java_snippet":"class Solution {{}}","solution":"class Solution {{ public int f() {{}} }}"}}"#,
            good_content()
        ));
        let report = compute(&[d]);
        assert_eq!(report.total, 1);
        assert_eq!(report.issue_count(), 0);
        assert!(report.no_java_in_solution.is_empty());
    }

    #[test]
    fn content_checks_distinguish_null_empty_and_short() {
        let records = [
            detail(r#"{"id":1,"title":"A","difficulty":"Easy","content":null}"#),
            detail(r#"{"id":2,"title":"B","difficulty":"Easy","content":""}"#),
            detail(r#"{"id":3,"title":"C","difficulty":"Easy","content":"short"}"#),
        ];
        let report = compute(&records);
        assert_eq!(report.null_content, vec!["[1] A".to_string()]);
        assert_eq!(report.empty_content, vec!["[2] B".to_string()]);
        assert_eq!(report.short_content, vec![("[3] C".to_string(), 5)]);
        assert_eq!(report.no_java_snippet.len(), 3);
        assert_eq!(report.no_solution.len(), 3);
        assert_eq!(report.issue_count(), 9);
    }

    #[test]
    fn remote_images_are_found_but_local_ones_are_not() {
        let html = r#"<img src="https://cdn.example.com/a.png"/><img src="images/b.png"><img src="http://x/c.jpg">"#;
        assert_eq!(
            remote_image_urls(html),
            vec![
                "https://cdn.example.com/a.png".to_string(),
                "http://x/c.jpg".to_string()
            ]
        );
    }

    #[test]
    fn solution_without_java_is_advisory() {
        let d = detail(
            r#"{"id":4,"title":"D","difficulty":"Hard","java_snippet":"class Solution {}","solution":"<p>Use a heap.</p>"}"#,
        );
        let report = compute(&[d]);
        assert_eq!(report.no_java_in_solution, vec!["[4] D".to_string()]);
        assert!(report.no_solution.is_empty());
    }

    #[test]
    fn read_records_skips_index_and_sorts_by_id() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.json"), "[]").unwrap();
        fs::write(
            dir.path().join("10.json"),
            r#"{"id":10,"title":"Ten","difficulty":"Easy"}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("9.json"),
            r#"{"id":9,"title":"Nine","difficulty":"Easy"}"#,
        )
        .unwrap();
        fs::write(dir.path().join("broken.json"), "{").unwrap();
        let ids: Vec<u64> = read_records(dir.path())
            .unwrap()
            .iter()
            .map(|d| d.summary.id.0)
            .collect();
        assert_eq!(ids, vec![9, 10]);
    }
}
