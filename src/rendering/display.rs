//! # Display Management
//!
//! Display sinks: a colored full-screen terminal view using crossterm, and a
//! plain-text writer for headless runs and tests.

use crate::rendering::{
    frame_lines, status_line, DisplaySink, RenderFrame, Symbol, CONTROLS_LINE, TAGLINE,
};
use crate::DimlightResult;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};
use std::io::{self, Write};

fn symbol_color(symbol: Symbol) -> Color {
    match symbol {
        Symbol::Player => Color::Yellow,
        Symbol::Entity => Color::Red,
        Symbol::Wall => Color::DarkGrey,
        Symbol::Floor => Color::Grey,
        Symbol::Altar => Color::Magenta,
        Symbol::Note => Color::Cyan,
        Symbol::Unknown => Color::Reset,
    }
}

/// Full-screen terminal display.
///
/// Call [`TerminalDisplay::enter`] before drawing and always call
/// [`TerminalDisplay::exit`] afterwards, even on error, to restore the
/// terminal.
pub struct TerminalDisplay {
    stdout: io::Stdout,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> DimlightResult<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> DimlightResult<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Clears the screen and prints plain lines from the top.
    pub fn show_lines(&mut self, lines: &[String]) -> DimlightResult<()> {
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        for (row, line) in lines.iter().enumerate() {
            self.stdout.queue(cursor::MoveTo(0, row as u16))?;
            self.stdout.queue(Print(line))?;
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for TerminalDisplay {
    fn present(&mut self, frame: &RenderFrame) -> DimlightResult<()> {
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;

        let mut row: u16 = 0;
        for symbols in &frame.symbols {
            self.stdout.queue(cursor::MoveTo(0, row))?;
            for &symbol in symbols {
                self.stdout.queue(SetForegroundColor(symbol_color(symbol)))?;
                self.stdout.queue(Print(symbol.glyph()))?;
            }
            row += 1;
        }
        self.stdout.queue(ResetColor)?;

        row += 1;
        let battery_color = if frame.battery.saturating_mul(4) <= frame.max_battery {
            Color::Red
        } else {
            Color::Green
        };
        self.stdout.queue(cursor::MoveTo(0, row))?;
        self.stdout.queue(SetForegroundColor(battery_color))?;
        self.stdout.queue(Print(status_line(frame)))?;
        self.stdout.queue(ResetColor)?;

        for line in [CONTROLS_LINE, TAGLINE] {
            row += 1;
            self.stdout.queue(cursor::MoveTo(0, row))?;
            self.stdout.queue(Print(line))?;
        }

        row += 1;
        for message in &frame.messages {
            row += 1;
            self.stdout.queue(cursor::MoveTo(0, row))?;
            self.stdout.queue(Print(message))?;
        }

        self.stdout.flush()?;
        Ok(())
    }

    fn show_intro(&mut self, lines: &[&str]) -> DimlightResult<()> {
        let lines: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
        self.show_lines(&lines)
    }
}

/// Writes every frame as plain text to any writer.
///
/// # Examples
///
/// ```
/// use dimlight::{DisplaySink, RenderFrame, Symbol, TextDisplay};
///
/// let frame = RenderFrame {
///     symbols: vec![vec![Symbol::Player]],
///     battery: 2,
///     max_battery: 40,
///     flashlight_on: false,
///     messages: vec![],
/// };
/// let mut display = TextDisplay::new(Vec::new());
/// display.present(&frame).unwrap();
/// let text = String::from_utf8(display.into_inner()).unwrap();
/// assert!(text.starts_with("@\n"));
/// ```
pub struct TextDisplay<W: Write> {
    out: W,
    frames: usize,
}

impl<W: Write> TextDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Frames written so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for TextDisplay<W> {
    fn present(&mut self, frame: &RenderFrame) -> DimlightResult<()> {
        if self.frames > 0 {
            writeln!(self.out)?;
        }
        for line in frame_lines(frame) {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(messages: Vec<String>) -> RenderFrame {
        RenderFrame {
            symbols: vec![
                vec![Symbol::Wall, Symbol::Wall, Symbol::Wall],
                vec![Symbol::Wall, Symbol::Player, Symbol::Note],
            ],
            battery: 10,
            max_battery: 40,
            flashlight_on: true,
            messages,
        }
    }

    #[test]
    fn test_text_display_writes_frames() {
        let mut display = TextDisplay::new(Vec::new());
        display.present(&frame(Vec::new())).unwrap();
        display
            .present(&frame(vec!["You switch the flashlight on.".to_string()]))
            .unwrap();
        assert_eq!(display.frames(), 2);

        let text = String::from_utf8(display.into_inner()).unwrap();
        assert!(text.starts_with("###\n#@?\n"));
        assert!(text.contains("Flashlight: ON"));
        assert!(text.trim_end().ends_with("You switch the flashlight on."));
    }

    #[test]
    fn test_symbol_colors_highlight_danger() {
        assert_eq!(symbol_color(Symbol::Entity), Color::Red);
        assert_ne!(symbol_color(Symbol::Player), symbol_color(Symbol::Floor));
    }
}
