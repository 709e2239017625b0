//! Terminal glyphs, labels, and colors.

use crossterm::style::Color;

pub const INDENT_1: &str = "  ";
pub const INDENT_2: &str = "    ";

pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_ERROR: &str = "error:";

pub const GLYPH_SECTION_BULLET: &str = "•";
pub const GLYPH_COMPLETE: &str = "✔";
pub const GLYPH_FAILED: &str = "✘";
pub const GLYPH_COMPLETE_PLAIN: &str = "ok";
pub const GLYPH_FAILED_PLAIN: &str = "failed";

pub const PROGRESS_BAR_WIDTH: usize = 20;
pub const PROGRESS_FILLED: char = '#';
pub const PROGRESS_EMPTY: char = '.';

pub const COLOR_SECTION_BULLET: Color = Color::DarkGrey;
pub const COLOR_SECTION_TITLE: Color = Color::White;
pub const COLOR_FIELD_KEY: Color = Color::DarkGrey;
pub const COLOR_FIELD_VALUE: Color = Color::Grey;
pub const COLOR_ACTIVITY_TEXT: Color = Color::Grey;
pub const COLOR_PROGRESS: Color = Color::Cyan;
pub const COLOR_SUCCESS: Color = Color::Green;
pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;
