//! Flatten description/solution markup into terminal lines.
//!
//! Block tags become line breaks, `<pre>` keeps its whitespace, list items get
//! a bullet, images and media are dropped, and common entities are decoded.

const BLOCK_TAGS: [&str; 12] = [
    "p", "div", "br", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote",
];

pub fn to_lines(markup: &str) -> Vec<String> {
    let mut out = String::with_capacity(markup.len());
    let mut in_pre = false;
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        push_text(&mut out, &rest[..open], in_pre);
        let Some(close) = rest[open..].find('>') else {
            push_text(&mut out, &rest[open..], in_pre);
            rest = "";
            break;
        };
        let tag = &rest[open + 1..open + close];
        rest = &rest[open + close + 1..];

        let closing = tag.starts_with('/');
        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match name.as_str() {
            "pre" => {
                in_pre = !closing;
                newline(&mut out);
            }
            "li" if !closing => {
                newline(&mut out);
                out.push_str("• ");
            }
            "li" => newline(&mut out),
            n if BLOCK_TAGS.contains(&n) => {
                newline(&mut out);
                if !closing && n != "br" && !out.ends_with("\n\n") && !out.is_empty() {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
    push_text(&mut out, rest, in_pre);

    let mut lines: Vec<String> = out
        .split('\n')
        .map(|l| decode_entities(l.trim_end()))
        .collect();
    collapse_blank_runs(&mut lines);
    lines
}

fn push_text(out: &mut String, text: &str, in_pre: bool) {
    if in_pre {
        out.push_str(text);
        return;
    }
    let mut last_space = out.ends_with([' ', '\n']) || out.is_empty();
    for c in text.chars() {
        if c.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(c);
            last_space = false;
        }
    }
}

fn newline(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn collapse_blank_runs(lines: &mut Vec<String>) {
    lines.dedup_by(|a, b| a.is_empty() && b.is_empty());
    while lines.first().is_some_and(String::is_empty) {
        lines.remove(0);
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
}

pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').filter(|&end| end <= 10).and_then(|end| {
            let entity = &tail[1..end];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|d| d.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, end))
        });
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_become_separate_lines() {
        let lines = to_lines("<p>Given an array <code>nums</code>.</p><p>Return   indices.</p>");
        assert_eq!(lines, vec!["Given an array nums.", "", "Return indices."]);
    }

    #[test]
    fn pre_blocks_keep_spacing() {
        let lines = to_lines("<pre>\nInput: nums = [2,7]\n    Output: [0,1]\n</pre>");
        assert_eq!(lines, vec!["Input: nums = [2,7]", "    Output: [0,1]"]);
    }

    #[test]
    fn list_items_get_bullets() {
        let lines = to_lines("<ul><li>one</li><li>two</li></ul>");
        assert_eq!(lines, vec!["• one", "• two"]);
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(
            decode_entities("a &lt;= b &amp;&amp; c&#39;s &#x41; &bogus; &"),
            "a <= b && c's A &bogus; &"
        );
    }

    #[test]
    fn images_are_dropped() {
        assert_eq!(to_lines("see <img src=\"x.png\"/> here"), vec!["see here"]);
    }
}
