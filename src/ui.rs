use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
    Terminal,
};
use std::io;
use unicode_width::UnicodeWidthStr;

use crate::stats::Report;
use crate::theme::{Palette, Rgb};

const LABEL_WIDTH: usize = 12;
const DISMISS_HINT: &str = "Press Enter to continue...";

fn color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// End-of-session summary, centred on a cleared screen.
pub struct ReportView<'a> {
    pub report: &'a Report,
    pub palette: Palette,
}

impl ReportView<'_> {
    fn lines(&self) -> Vec<String> {
        self.report
            .rows()
            .into_iter()
            .map(|(label, value)| format!("{label:<LABEL_WIDTH$}{value}"))
            .collect()
    }
}

impl Widget for &ReportView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let background = Style::default().bg(color(self.palette.background));
        let text_style = background.fg(color(self.palette.correct));
        let hint_style = background
            .fg(color(self.palette.untyped))
            .add_modifier(Modifier::ITALIC);

        Block::default().style(background).render(area, buf);

        let lines = self.lines();
        let block_width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        let block_height = lines.len() as u16 + 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(area.height.saturating_sub(block_height) / 2),
                Constraint::Length(lines.len() as u16),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        // left-aligned rows inside a horizontally centred column
        let left = area.x + area.width.saturating_sub(block_width) / 2;
        let rows_area = Rect {
            x: left,
            width: block_width.min(area.width),
            ..chunks[1]
        };

        let rows = lines
            .into_iter()
            .map(|l| Line::from(Span::styled(l, text_style)))
            .collect::<Vec<Line>>();
        Paragraph::new(rows)
            .style(background)
            .render(rows_area, buf);

        Paragraph::new(Span::styled(DISMISS_HINT, hint_style))
            .alignment(Alignment::Center)
            .style(background)
            .render(chunks[3], buf);
    }
}

/// Clear the screen and draw the report.
pub fn draw_report<B: Backend>(
    terminal: &mut Terminal<B>,
    report: &Report,
    palette: Palette,
) -> io::Result<()> {
    let view = ReportView { report, palette };
    terminal.clear()?;
    terminal.draw(|f| f.render_widget(&view, f.area()))?;
    Ok(())
}
