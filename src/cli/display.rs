// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the orgsearch CLI.
//!
//! OneDark colors on dark terminals, One Light on light ones. The theme comes
//! from `ORGSEARCH_THEME` ("dark"/"light") if set, else the `COLORFGBG` hint,
//! else dark. Colors are dropped entirely when stdout is not a TTY or
//! `NO_COLOR` is set, so piping into `jq` or a file gives plain text.

use orgsearch::{Corpus, Record, SearchHit, Suggestion, Tag};
use std::sync::OnceLock;

/// Visible width between the box borders.
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("ORGSEARCH_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg", background 7 or above (except 8) is a light terminal
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
    pub const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 46);
}

mod onelight {
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
    pub const BRIGHT_GREEN: (u8, u8, u8) = (68, 140, 39);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            match theme() {
                Theme::Dark => rgb(onedark::$name),
                Theme::Light => rgb(onelight::$name),
            }
        }
    };
}

theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_GREEN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Theme color plus modifiers, or plain text without a TTY.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Length without ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Cut `text` to `max` visible characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn border(text: &str) -> String {
    themed(GRAY, &[], text)
}

fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}{}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("┌"),
        label_part,
        border(&format!("{}┐", "─".repeat(remaining)))
    );
}

fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Similarity as a fixed-width, color-graded number.
pub fn similarity_value(similarity: f64) -> String {
    let text = format!("{:.3}", similarity);
    if !use_colors() {
        return text;
    }
    let color = if similarity >= 0.999 {
        BRIGHT_GREEN()
    } else if similarity >= 0.6 {
        GREEN()
    } else if similarity >= 0.3 {
        YELLOW()
    } else {
        GRAY()
    };
    format!("{}{}{}", color, text, RESET)
}

// ═══════════════════════════════════════════════════════════════════════════
// PRINTERS
// ═══════════════════════════════════════════════════════════════════════════

pub fn print_hits(query: &str, hits: &[SearchHit], total: usize) {
    let label = if query.is_empty() {
        "ALL ORGANIZATIONS".to_string()
    } else {
        format!("RESULTS FOR {:?}", query)
    };
    section_top(&label);
    if hits.is_empty() {
        row(&themed(GRAY, &[DIM], " no matches"));
    }
    for (rank, hit) in hits.iter().enumerate() {
        let title = truncate(&hit.title, BOX_WIDTH - 20);
        row(&format!(
            " {:>3}. {}  {}",
            rank + 1,
            similarity_value(hit.similarity),
            themed(BLUE, &[BOLD], &title)
        ));
        if !hit.description.is_empty() {
            let desc = truncate(&hit.description, BOX_WIDTH - 14);
            row(&format!("{}{}", " ".repeat(13), themed(GRAY, &[], &desc)));
        }
    }
    section_bot();
    if total > hits.len() {
        println!(
            "{}",
            themed(GRAY, &[DIM], &format!("showing {} of {} results", hits.len(), total))
        );
    }
}

pub fn print_suggestions(suggestions: &[Suggestion]) {
    for suggestion in suggestions {
        println!(
            "{}  {}",
            themed(GRAY, &[], &format!("{:>6}", suggestion.id.to_string())),
            suggestion.name
        );
    }
}

pub fn print_records(records: &[Record]) {
    section_top("ORGANIZATIONS");
    for record in records {
        let id = themed(GRAY, &[], &format!("{:>6}", record.id.to_string()));
        let name = themed(BLUE, &[BOLD], &truncate(&record.name, BOX_WIDTH - 10));
        row(&format!("{} {}", id, name));
        if !record.tag_names.is_empty() {
            let tags = truncate(&record.tag_names.join(", "), BOX_WIDTH - 10);
            row(&format!("{}{}", " ".repeat(8), themed(CYAN, &[], &tags)));
        }
    }
    section_bot();
}

pub fn print_tags(tags: &[Tag]) {
    for tag in tags {
        println!("{}  {}", themed(GRAY, &[], &format!("{:>6}", tag.id.get())), tag.name);
    }
}

pub fn print_inspect(path: &str, corpus: &Corpus) {
    let tagged = corpus.records().iter().filter(|r| !r.tags.is_empty()).count();
    section_top("CORPUS");
    row(&format!(" store        {}", truncate(path, BOX_WIDTH - 16)));
    row(&format!(" records      {}", corpus.len()));
    row(&format!(" tagged       {}", tagged));
    row(&format!(" vocabulary   {}", corpus.index().vocabulary_size()));
    row(&format!(
        " fingerprint  {}",
        themed(YELLOW, &[], &format!("{:08x}", corpus.fingerprint()))
    ));
    section_bot();
}
