//! Terminal rendering for markdown output.
//!
//! Rich mode colours headers and styles inline markdown with termimad. Plain
//! mode prints the markdown untouched, which is what tests and pipes see.

use std::io::{self, Write};

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Renders markdown either styled or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        if !self.rich_enabled {
            write!(out, "{markdown}")?;
            return Ok(());
        }

        for line in markdown.lines() {
            match header_colour(line) {
                // hashes stay visible
                Some(code) => writeln!(out, "\x1b[{code}m{line}\x1b[0m")?,
                None => writeln!(out, "{}", self.skin.inline(line))?,
            }
        }
        Ok(())
    }

    /// Print text exactly as given, without markdown styling.
    pub fn raw(&self, text: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        write!(out, "{text}")?;
        if !text.ends_with('\n') {
            writeln!(out)?;
        }
        Ok(())
    }

    /// One-line progress note on stderr.
    pub fn progress(&self, message: &str) {
        if self.rich_enabled {
            eprintln!("\x1b[2m{message}\x1b[0m");
        } else {
            eprintln!("{message}");
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// ANSI colour for a markdown header line, by level.
fn header_colour(line: &str) -> Option<u8> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || !line[level..].starts_with(' ') {
        return None;
    }
    Some(match level {
        1 => 36,
        2 => 34,
        _ => 35,
    })
}
