use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

use crate::catalog::model::{Difficulty, QuestionDetail, QuestionSummary};
use crate::catalog::navigation::NavigationContext;
use crate::tui::list::{ListController, ListFocus};
use crate::tui::markup;
use crate::tui::resize::ResizeState;

const NO_DESCRIPTION: &str = "No description available.";
const NO_SNIPPET: &str = "// No Java snippet available.\nclass Solution {\n}\n";
const NO_SOLUTION: &str = "No detailed solution available for this question.";

/// Common chrome around every view.
#[derive(Debug)]
pub struct Chrome<'a> {
    pub location: &'a str,
    pub hints: &'a str,
    pub message: Option<&'a str>,
    pub show_help: bool,
}

#[derive(Debug)]
pub struct ListRenderData<'a> {
    pub list: &'a ListController,
    pub tag_preview: usize,
}

#[derive(Debug)]
pub struct DetailRenderData<'a> {
    pub detail: Option<&'a QuestionDetail>,
    pub nav: &'a NavigationContext,
    pub resize: &'a ResizeState,
    pub loading: bool,
    pub left_scroll: u16,
    pub right_scroll: u16,
}

/// Screen regions the detail view needs for pointer hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailLayout {
    pub panes: Rect,
    pub left: Rect,
    pub right: Rect,
}

impl DetailLayout {
    /// The two border columns where the panes meet act as the drag handle.
    pub fn is_on_handle(&self, column: u16, row: u16) -> bool {
        if self.panes.width == 0 || row < self.panes.y || row >= self.panes.bottom() {
            return false;
        }
        let seam = self.left.right();
        column.saturating_add(1) == seam || column == seam
    }
}

fn frame_block<'a>(chrome: &Chrome<'_>) -> Block<'a> {
    let title = Line::from(vec![
        Span::styled("qdeck", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(chrome.location.to_string(), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled("[?] help", Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled("[q] quit", Style::default().fg(Color::DarkGray)),
    ]);
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::DarkGray))
        .padding(Padding::new(1, 1, 0, 0))
        .title(title)
}

fn outer_area(frame: &Frame) -> Rect {
    frame.area().inner(Margin {
        horizontal: 1,
        vertical: 0,
    })
}

fn draw_status(frame: &mut Frame, area: Rect, headline: Line<'static>, chrome: &Chrome<'_>) {
    let mut hint_line = chrome.hints.to_string();
    if let Some(msg) = chrome.message {
        hint_line.push_str("   ");
        hint_line.push_str(msg);
    }
    let status = Paragraph::new(vec![
        headline,
        Line::from(Span::styled(hint_line, Style::default().fg(Color::DarkGray))),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::new(1, 1, 0, 0)),
    );
    frame.render_widget(status, area);
}

pub fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::LightRed,
    }
}

fn badge(difficulty: Difficulty) -> Span<'static> {
    Span::styled(
        format!("[{}]", difficulty.label()),
        Style::default()
            .fg(difficulty_color(difficulty))
            .add_modifier(Modifier::BOLD),
    )
}

fn pane_block(title: &str, focused: bool) -> Block<'static> {
    let (border, title_style) = if focused {
        (
            Style::default().fg(Color::White),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        )
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(Span::styled(title.to_string(), title_style))
}

// ---------------------------------------------------------------------------
// List view
// ---------------------------------------------------------------------------

pub fn draw_list(frame: &mut Frame, data: &ListRenderData<'_>, chrome: &Chrome<'_>) {
    let area = outer_area(frame);
    let block = frame_block(chrome);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [filters_area, panes_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(4),
        Constraint::Length(4),
    ])
    .areas(inner);

    draw_filter_bar(frame, filters_area, data.list);

    let [tags_area, _gap, rows_area] = Layout::horizontal([
        Constraint::Length(26),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(panes_area);

    draw_tag_panel(frame, tags_area, data.list);
    draw_question_rows(frame, rows_area, data);

    let headline = Line::from(Span::styled(
        data.list.summary(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    draw_status(frame, status_area, headline, chrome);

    if chrome.show_help {
        render_help_overlay(frame);
    }
}

fn draw_filter_bar(frame: &mut Frame, area: Rect, list: &ListController) {
    let selection = list.selection();
    let label = Style::default().fg(Color::Gray);
    let mut spans = vec![Span::styled("search ", label)];
    if list.is_searching() {
        spans.push(Span::styled(
            format!("{}▌", list.search_input()),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ));
    } else if list.search_input().is_empty() {
        spans.push(Span::styled("[/]", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(
            list.search_input().to_string(),
            Style::default().fg(Color::White),
        ));
    }
    spans.push(Span::raw("   "));
    spans.push(Span::styled("difficulty ", label));
    match selection.difficulty() {
        Some(d) => spans.push(badge(d)),
        None => spans.push(Span::styled("All [d]", Style::default().fg(Color::DarkGray))),
    }
    spans.push(Span::raw("   "));
    spans.push(Span::styled("tag ", label));
    match selection.active_tag() {
        Some(tag) => spans.push(Span::styled(
            tag.to_string(),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        None => spans.push(Span::styled("none", Style::default().fg(Color::DarkGray))),
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if list.is_searching() {
                Color::Cyan
            } else {
                Color::DarkGray
            })),
    );
    frame.render_widget(bar, area);
}

fn draw_tag_panel(frame: &mut Frame, area: Rect, list: &ListController) {
    let focused = list.focus() == ListFocus::Tags;
    let block = pane_block("TAGS", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let active = list.selection().active_tag();
    let lines: Vec<Line> = list
        .tags()
        .iter()
        .enumerate()
        .map(|(idx, tag)| {
            let on_cursor = focused && idx == list.tag_cursor();
            let mut style = if active == Some(tag) {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            if on_cursor {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            let marker = if active == Some(tag) { "●" } else { " " };
            Line::from(Span::styled(format!("{marker} {tag}"), style))
        })
        .collect();

    let scroll = scroll_to_keep(list.tag_cursor(), inner.height);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn draw_question_rows(frame: &mut Frame, area: Rect, data: &ListRenderData<'_>) {
    let list = data.list;
    let focused = list.focus() == ListFocus::Questions;
    let block = pane_block("QUESTIONS", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if list.visible_len() == 0 {
        let text = if list.catalog().is_empty() {
            "The question index is empty."
        } else {
            "0 results. Adjust the search, difficulty or tag."
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(empty, inner);
        return;
    }

    // Two lines per question: heading and tag strip.
    let mut lines = Vec::with_capacity(list.visible_len() * 2);
    for (idx, q) in list.visible().enumerate() {
        let selected = idx == list.row_cursor();
        lines.push(question_heading(q, selected && focused, inner.width));
        lines.push(tag_strip(q, data.tag_preview));
    }
    let scroll = scroll_to_keep(list.row_cursor() * 2 + 1, inner.height);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn question_heading(q: &QuestionSummary, selected: bool, width: u16) -> Line<'static> {
    let heading = q.heading();
    let badge_text = format!("[{}]", q.difficulty.label());
    let pad = (width as usize)
        .saturating_sub(heading.chars().count() + badge_text.len() + 2)
        .max(1);
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    Line::from(vec![
        Span::styled(format!(" {heading}"), style),
        Span::raw(" ".repeat(pad)),
        badge(q.difficulty),
    ])
}

/// The first `preview` tags, then `+N` for the rest.
pub fn tag_preview_text(tags: &[String], preview: usize) -> String {
    let mut text = tags
        .iter()
        .take(preview)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" · ");
    if tags.len() > preview {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&format!("+{}", tags.len() - preview));
    }
    text
}

fn tag_strip(q: &QuestionSummary, preview: usize) -> Line<'static> {
    Line::from(Span::styled(
        format!("   {}", tag_preview_text(&q.tags, preview)),
        Style::default().fg(Color::DarkGray),
    ))
}

fn scroll_to_keep(row: usize, height: u16) -> u16 {
    let height = height.max(1) as usize;
    row.saturating_sub(height - 1).min(u16::MAX as usize) as u16
}

// ---------------------------------------------------------------------------
// Detail view
// ---------------------------------------------------------------------------

pub fn draw_detail(
    frame: &mut Frame,
    data: &DetailRenderData<'_>,
    chrome: &Chrome<'_>,
) -> DetailLayout {
    let area = outer_area(frame);
    let block = frame_block(chrome);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header_area, panes_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(4),
        Constraint::Length(4),
    ])
    .areas(inner);

    draw_detail_header(frame, header_area, data);

    let [left, right] = data.resize.split(panes_area);
    let dragging = data.resize.is_dragging();

    let left_block = pane_block("DESCRIPTION", dragging);
    let left_inner = left_block.inner(left);
    frame.render_widget(left_block, left);
    let right_block = pane_block("SOLUTION", dragging);
    let right_inner = right_block.inner(right);
    frame.render_widget(right_block, right);

    match data.detail {
        Some(detail) => {
            let description = Paragraph::new(description_lines(detail))
                .wrap(Wrap { trim: false })
                .scroll((data.left_scroll, 0));
            frame.render_widget(description, left_inner);
            let solution = Paragraph::new(solution_lines(detail))
                .wrap(Wrap { trim: false })
                .scroll((data.right_scroll, 0));
            frame.render_widget(solution, right_inner);
        }
        None => {
            let waiting = Paragraph::new(Line::from(Span::styled(
                "Loading…",
                Style::default().fg(Color::DarkGray),
            )));
            frame.render_widget(waiting, left_inner);
        }
    }

    let mut headline = Line::from(vec![
        nav_control("◀ prev", data.nav.has_prev),
        Span::raw("  "),
        Span::styled(
            data.nav.label(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        nav_control("next ▶", data.nav.has_next),
        Span::raw("   "),
        Span::styled(
            format!(
                "split {:.0}/{:.0}",
                data.resize.left_percent(),
                data.resize.right_percent()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    if !data.nav.is_known() {
        headline.spans.push(Span::styled(
            "  (not in index)",
            Style::default().fg(Color::Yellow),
        ));
    }
    draw_status(frame, status_area, headline, chrome);

    if chrome.show_help {
        render_help_overlay(frame);
    }

    DetailLayout {
        panes: panes_area,
        left,
        right,
    }
}

fn nav_control(label: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(label.to_string(), style)
}

fn draw_detail_header(frame: &mut Frame, area: Rect, data: &DetailRenderData<'_>) {
    let mut spans = Vec::new();
    match data.detail {
        Some(detail) => {
            let q = &detail.summary;
            spans.push(Span::styled(
                q.heading(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw("  "));
            spans.push(badge(q.difficulty));
            for (idx, tag) in q.tags.iter().enumerate() {
                spans.push(Span::raw("  "));
                let label = if idx < 9 {
                    format!("{}:{}", idx + 1, tag)
                } else {
                    tag.clone()
                };
                spans.push(Span::styled(
                    label,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                ));
            }
        }
        None => spans.push(Span::styled(
            "Loading…",
            Style::default().fg(Color::DarkGray),
        )),
    }
    if data.loading && data.detail.is_some() {
        spans.push(Span::styled("  ⟳", Style::default().fg(Color::Yellow)));
    }
    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

fn description_lines(detail: &QuestionDetail) -> Vec<Line<'static>> {
    match detail.content.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(content) => markup::to_lines(content)
            .into_iter()
            .map(Line::from)
            .collect(),
        None => vec![Line::from(Span::styled(
            NO_DESCRIPTION,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))],
    }
}

fn solution_lines(detail: &QuestionDetail) -> Vec<Line<'static>> {
    let code_style = Style::default().fg(Color::LightGreen);
    let snippet = detail
        .java_snippet
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(NO_SNIPPET);
    let mut lines: Vec<Line> = snippet
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), code_style)))
        .collect();
    lines.push(Line::from(""));
    match detail.solution.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(solution) => lines.extend(markup::to_lines(solution).into_iter().map(Line::from)),
        None => lines.push(Line::from(Span::styled(
            NO_SOLUTION,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))),
    }
    lines
}

// ---------------------------------------------------------------------------
// Error view and overlays
// ---------------------------------------------------------------------------

/// Replaces the whole view with a message; nothing partial is drawn.
pub fn draw_error(frame: &mut Frame, message: &str, chrome: &Chrome<'_>) {
    let area = outer_area(frame);
    let block = frame_block(chrome);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [body, status_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(4)]).areas(inner);
    let text = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::LightRed),
    )))
    .wrap(Wrap { trim: true })
    .block(Block::default().padding(Padding::new(4, 4, 2, 0)));
    frame.render_widget(text, body);

    let headline = Line::from(Span::styled(
        "Nothing to show",
        Style::default().fg(Color::DarkGray),
    ));
    draw_status(frame, status_area, headline, chrome);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect(frame.area(), 70, 70);
    frame.render_widget(Clear, area);
    let help = Paragraph::new(vec![
        Line::from("LIST"),
        Line::from("  j/k or arrows move, Tab switches TAGS/QUESTIONS"),
        Line::from("  Enter on a tag toggles it (one tag at a time)"),
        Line::from("  Enter on a question opens it"),
        Line::from("  / search titles, d cycles difficulty"),
        Line::from(""),
        Line::from("QUESTION"),
        Line::from("  [ / ] or h/l previous / next question"),
        Line::from("  j/k scroll description, J/K or PgUp/PgDn scroll solution"),
        Line::from("  1-9 browse questions with that tag"),
        Line::from("  drag the seam between panes with the mouse to resize"),
        Line::from(""),
        Line::from("r reloads the current location, Esc/b goes back to the list."),
    ])
    .block(Block::default().title("Help").borders(Borders::ALL));
    frame.render_widget(help, area);
}

fn centered_rect(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .flex(Flex::Center)
    .split(area);
    Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .flex(Flex::Center)
    .split(vertical[1])[1]
}
