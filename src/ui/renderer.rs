//! Line-oriented terminal renderer.
//!
//! Every print method has a `*_line` twin that builds the text without
//! writing it, so formatting can be checked without a terminal.

use crossterm::style::Stylize;

use crate::ui::settings;

/// Handles all terminal output formatting.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Whether ANSI color/style output is enabled.
    color: bool,
}

impl Renderer {
    /// Create a renderer with optional color output.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Print a section header (to stdout).
    pub fn section(&self, title: &str) {
        println!("{}", self.section_line(title));
    }

    pub fn section_line(&self, title: &str) -> String {
        if self.color {
            format!(
                "{} {}",
                settings::GLYPH_SECTION_BULLET.with(settings::COLOR_SECTION_BULLET),
                title.with(settings::COLOR_SECTION_TITLE).bold()
            )
        } else {
            format!("{title}:")
        }
    }

    /// Print a key/value line under a section (to stdout).
    pub fn field(&self, key: &str, value: &str) {
        println!("{}", self.field_line(key, value));
    }

    pub fn field_line(&self, key: &str, value: &str) -> String {
        if self.color {
            format!(
                "{}{} {}",
                settings::INDENT_1,
                format!("{key}:").with(settings::COLOR_FIELD_KEY),
                value.with(settings::COLOR_FIELD_VALUE),
            )
        } else {
            format!("{}{key}: {value}", settings::INDENT_1)
        }
    }

    /// Print a nested detail line (to stdout).
    pub fn detail(&self, text: &str) {
        println!("{}", self.detail_line(text));
    }

    pub fn detail_line(&self, text: &str) -> String {
        if self.color {
            format!(
                "{}{}",
                settings::INDENT_2,
                text.with(settings::COLOR_FIELD_VALUE)
            )
        } else {
            format!("{}{text}", settings::INDENT_2)
        }
    }

    /// Print a lifecycle line such as "loading scan" (to stderr).
    pub fn activity(&self, text: &str) {
        eprintln!("{}", self.activity_line(text));
    }

    pub fn activity_line(&self, text: &str) -> String {
        if self.color {
            format!(
                "{} {}",
                settings::GLYPH_SECTION_BULLET.with(settings::COLOR_SECTION_BULLET),
                text.with(settings::COLOR_ACTIVITY_TEXT).bold()
            )
        } else {
            text.to_string()
        }
    }

    /// Print a terminal-outcome line (to stdout).
    pub fn outcome(&self, succeeded: bool, text: &str) {
        println!("{}", self.outcome_line(succeeded, text));
    }

    pub fn outcome_line(&self, succeeded: bool, text: &str) -> String {
        match (self.color, succeeded) {
            (true, true) => format!(
                "{} {}",
                settings::GLYPH_COMPLETE.with(settings::COLOR_SUCCESS).bold(),
                text
            ),
            (true, false) => format!(
                "{} {}",
                settings::GLYPH_FAILED.with(settings::COLOR_ERROR).bold(),
                text
            ),
            (false, true) => format!("{} {text}", settings::GLYPH_COMPLETE_PLAIN),
            (false, false) => format!("{} {text}", settings::GLYPH_FAILED_PLAIN),
        }
    }

    /// Print a warning (to stderr).
    pub fn warn(&self, msg: &str) {
        eprintln!("{}", self.warn_line(msg));
    }

    pub fn warn_line(&self, msg: &str) -> String {
        if self.color {
            format!(
                "{} {msg}",
                settings::LABEL_WARNING.with(settings::COLOR_WARNING).bold()
            )
        } else {
            format!("{} {msg}", settings::LABEL_WARNING)
        }
    }

    /// Print an error (to stderr).
    pub fn error(&self, msg: &str) {
        eprintln!("{}", self.error_line(msg));
    }

    pub fn error_line(&self, msg: &str) -> String {
        if self.color {
            format!(
                "{} {msg}",
                settings::LABEL_ERROR.with(settings::COLOR_ERROR).bold()
            )
        } else {
            format!("{} {msg}", settings::LABEL_ERROR)
        }
    }

    /// Fixed-width progress bar followed by the percentage.
    pub fn progress_bar(&self, percent: u8) -> String {
        let bar = progress_bar_text(percent);
        if self.color {
            bar.with(settings::COLOR_PROGRESS).to_string()
        } else {
            bar
        }
    }
}

fn progress_bar_text(percent: u8) -> String {
    let percent = percent.min(100) as usize;
    let filled = percent * settings::PROGRESS_BAR_WIDTH / 100;
    let mut bar = String::with_capacity(settings::PROGRESS_BAR_WIDTH + 8);
    bar.push('[');
    bar.extend(std::iter::repeat(settings::PROGRESS_FILLED).take(filled));
    bar.extend(
        std::iter::repeat(settings::PROGRESS_EMPTY).take(settings::PROGRESS_BAR_WIDTH - filled),
    );
    bar.push_str(&format!("] {percent}%"));
    bar
}
