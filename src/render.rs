use crossterm::{
    cursor::{Hide, MoveLeft, MoveTo, Show},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};

use crate::layout::{Layout, Placement};
use crate::theme::{Palette, Rgb};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Untyped,
    Correct,
    Incorrect,
    Background,
}

/// A single screen effect requested by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderCommand {
    Text {
        text: String,
        style: Style,
    },
    /// move the cursor `n` columns left on the current row
    MoveLeft(u16),
    /// absolute cursor placement, used to start a centred line
    MoveTo {
        column: u16,
        row: u16,
    },
    Clear,
    ShowCursor,
    HideCursor,
}

impl RenderCommand {
    pub fn text(text: impl Into<String>, style: Style) -> Self {
        Self::Text {
            text: text.into(),
            style,
        }
    }
}

/// Output side of the terminal as seen by the engine.
pub trait Renderer {
    fn apply(&mut self, command: &RenderCommand) -> io::Result<()>;

    /// (width, height) in cells.
    fn size(&self) -> io::Result<(u16, u16)>;

    fn flush(&mut self) -> io::Result<()>;

    fn apply_all(&mut self, commands: &[RenderCommand]) -> io::Result<()> {
        for command in commands {
            self.apply(command)?;
        }
        self.flush()
    }
}

/// Commands that draw the whole layout untyped and park the cursor at the
/// first line's start. The cursor stays hidden while the lines are drawn.
pub fn layout_commands(layout: &Layout, placement: &Placement) -> Vec<RenderCommand> {
    let mut commands = vec![RenderCommand::Clear, RenderCommand::HideCursor];

    for (idx, &(column, row)) in placement.origins.iter().enumerate() {
        if let Some(text) = layout.line_text(idx) {
            commands.push(RenderCommand::MoveTo { column, row });
            commands.push(RenderCommand::text(text, Style::Untyped));
        }
    }

    let (column, row) = placement.origin(0);
    commands.push(RenderCommand::MoveTo { column, row });
    commands.push(RenderCommand::ShowCursor);
    commands
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

/// Renderer writing crossterm escape sequences to any writer.
pub struct TerminalRenderer<W: Write> {
    out: W,
    palette: Palette,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, palette: Palette) -> Self {
        Self { out, palette }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn apply(&mut self, command: &RenderCommand) -> io::Result<()> {
        match command {
            RenderCommand::Text { text, style } => queue!(
                self.out,
                SetBackgroundColor(to_color(self.palette.background)),
                SetForegroundColor(to_color(self.palette.color(*style))),
                Print(text)
            ),
            RenderCommand::MoveLeft(0) => Ok(()),
            RenderCommand::MoveLeft(n) => queue!(self.out, MoveLeft(*n)),
            RenderCommand::MoveTo { column, row } => queue!(self.out, MoveTo(*column, *row)),
            RenderCommand::Clear => queue!(
                self.out,
                SetBackgroundColor(to_color(self.palette.background)),
                Clear(ClearType::All),
                MoveTo(0, 0)
            ),
            RenderCommand::ShowCursor => queue!(self.out, Show),
            RenderCommand::HideCursor => queue!(self.out, Hide),
        }
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn flush(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

/// Renderer that keeps every command, for headless runs and tests.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    pub commands: Vec<RenderCommand>,
    pub width: u16,
    pub height: u16,
}

impl RecordingRenderer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            commands: Vec::new(),
            width,
            height,
        }
    }

    /// Concatenated text of every command drawn in `style`.
    pub fn text_in(&self, style: Style) -> String {
        self.commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Text { text, style: s } if *s == style => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn apply(&mut self, command: &RenderCommand) -> io::Result<()> {
        self.commands.push(command.clone());
        Ok(())
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        Ok((self.width, self.height))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::wrap;
    use crate::theme::ThemeChoice;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_layout_commands_draw_every_line_then_park_cursor() {
        let layout = wrap(&words(&["aaa", "bbb", "ccc"]), 10);
        let placement = Placement::centered(&layout, 80, 24);
        let commands = layout_commands(&layout, &placement);

        assert_eq!(commands[0], RenderCommand::Clear);
        assert_eq!(commands[1], RenderCommand::HideCursor);
        assert!(commands.contains(&RenderCommand::text("aaa bbb", Style::Untyped)));
        assert!(commands.contains(&RenderCommand::text("ccc", Style::Untyped)));
        assert_eq!(
            commands[commands.len() - 2],
            RenderCommand::MoveTo {
                column: 37,
                row: 10
            }
        );
        assert_eq!(commands.last(), Some(&RenderCommand::ShowCursor));
    }

    #[test]
    fn test_recording_renderer_collects_text_by_style() {
        let mut renderer = RecordingRenderer::new(80, 24);
        renderer
            .apply_all(&[
                RenderCommand::text("c", Style::Correct),
                RenderCommand::text("x", Style::Incorrect),
                RenderCommand::text("t", Style::Correct),
            ])
            .unwrap();

        assert_eq!(renderer.text_in(Style::Correct), "ct");
        assert_eq!(renderer.text_in(Style::Incorrect), "x");
        assert_eq!(renderer.size().unwrap(), (80, 24));
    }

    #[test]
    fn test_terminal_renderer_emits_text_and_motion() {
        let mut renderer = TerminalRenderer::new(Vec::new(), ThemeChoice::Monokai.palette());
        renderer
            .apply_all(&[
                RenderCommand::text("hello", Style::Correct),
                RenderCommand::MoveLeft(2),
                RenderCommand::MoveLeft(0),
            ])
            .unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.contains("hello"));
        assert!(out.contains("\x1b[2D"));
        // correct style of the monokai palette
        assert!(out.contains("38;2;226;226;220"));
    }
}
