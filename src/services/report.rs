//! Mood log report rendering.
//!
//! The report is laid out on A4-sized pages using the same vertical cursor a
//! PDF canvas would use, then emitted as plain text with a form feed between
//! pages.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::mood::MoodEntry;
use crate::services::aggregator::summarize;

pub const DEFAULT_WRAP_WIDTH: usize = 85;

pub const REPORT_TITLE: &str = "MindMate Mood Log Report";
pub const DAILY_REPORT_TITLE: &str = "Daily Mood Report";
const NOTE_PREFIX: &str = "📝 ";
const RULE_WIDTH: usize = 90;
const PAGE_BREAK: &str = "\u{000C}\n";

// Vertical layout in points.
const PAGE_HEIGHT: i32 = 842;
const TOP_MARGIN: i32 = 50;
const BOTTOM_THRESHOLD: i32 = 100;
const TITLE_ADVANCE: i32 = 20;
const TIMESTAMP_ADVANCE: i32 = 30;
const TOTAL_ADVANCE: i32 = 20;
const SUMMARY_LINE_ADVANCE: i32 = 15;
const SUMMARY_GAP: i32 = 10;
const SUMMARY_RULE_ADVANCE: i32 = 30;
const ENTRY_HEADER_ADVANCE: i32 = 20;
const NOTE_LINE_ADVANCE: i32 = 15;
const NOTE_GAP: i32 = 5;
const ENTRY_RULE_ADVANCE: i32 = 25;

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub wrap_width: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub pages: Vec<Page>,
    pub entry_count: usize,
}

impl Report {
    pub fn to_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| {
                let mut text = page.lines.join("\n");
                text.push('\n');
                text
            })
            .collect::<Vec<_>>()
            .join(PAGE_BREAK)
    }
}

#[cfg(test)]
impl Report {
    fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.pages.iter().flat_map(|p| p.lines.iter().map(String::as_str))
    }
}

/// Greedy line fill.
///
/// A word joins the current line while `line + " " + word` fits in
/// `max_width` characters. Words are never split, so a word longer than
/// `max_width` occupies a line of its own.
///
/// The separator is counted even before the first word, so a leading word of
/// `max_width` characters or more flushes the still-empty line first and the
/// output starts with `""`. Report layout gives that line its normal advance.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len + 1 + word_len <= max_width {
            if !line.is_empty() {
                line.push(' ');
                line_len += 1;
            }
            line.push_str(word);
            line_len += word_len;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_len = word_len;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

struct Layout {
    pages: Vec<Page>,
    y: i32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: PAGE_HEIGHT - TOP_MARGIN,
        }
    }

    fn write(&mut self, line: impl Into<String>, advance: i32) {
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(line.into());
        }
        self.y -= advance;
    }

    fn skip(&mut self, advance: i32) {
        self.y -= advance;
    }

    fn break_if_low(&mut self) {
        if self.y < BOTTOM_THRESHOLD {
            self.pages.push(Page::default());
            self.y = PAGE_HEIGHT - TOP_MARGIN;
        }
    }
}

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Full mood log report. Entries are listed newest first.
pub fn render(entries: &[MoodEntry], generated_at: NaiveDateTime, options: ReportOptions) -> Report {
    let mut layout = Layout::new();

    layout.write(REPORT_TITLE, TITLE_ADVANCE);
    layout.write(
        format!("Generated on: {}", generated_at.format("%B %d, %Y - %I:%M %p")),
        TIMESTAMP_ADVANCE,
    );

    let summary = summarize(entries);
    layout.write(format!("Total Entries: {}", summary.total), TOTAL_ADVANCE);
    for c in &summary.counts {
        layout.write(format!("  {}: {}", c.mood, c.count), SUMMARY_LINE_ADVANCE);
    }
    layout.skip(SUMMARY_GAP);
    layout.write(rule(), SUMMARY_RULE_ADVANCE);

    for (idx, entry) in entries.iter().rev().enumerate() {
        layout.break_if_low();

        layout.write(
            format!("{}. {} — {}", idx + 1, entry.date, entry.mood),
            ENTRY_HEADER_ADVANCE,
        );

        if !entry.note.is_empty() {
            for line in wrap_text(&entry.note, options.wrap_width) {
                layout.write(format!("    {}{}", NOTE_PREFIX, line), NOTE_LINE_ADVANCE);
            }
            layout.skip(NOTE_GAP);
        }

        layout.write(rule(), ENTRY_RULE_ADVANCE);
    }

    Report {
        pages: layout.pages,
        entry_count: entries.len(),
    }
}

/// Single-page report for one entry.
pub fn render_daily(entry: &MoodEntry, options: ReportOptions) -> Report {
    let mut lines = vec![
        DAILY_REPORT_TITLE.to_string(),
        String::new(),
        format!("Date: {}", entry.date),
        format!("Mood: {}", entry.mood),
    ];
    lines.extend(wrap_text(&format!("Note: {}", entry.note), options.wrap_width));

    Report {
        pages: vec![Page { lines }],
        entry_count: 1,
    }
}
