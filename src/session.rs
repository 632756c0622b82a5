use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

use crate::keys::Key;
use crate::layout::{fits, wrap, Layout, Placement};
use crate::render::{RenderCommand, Style};
use crate::stats::{self, Report};

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// One character typed against the current word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypedChar {
    pub char: char,
    pub outcome: Outcome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Completed,
}

/// Keystroke-driven state of one typing test.
///
/// `handle` updates the state and returns the screen effects of the
/// keystroke; it never touches the terminal itself.
#[derive(Clone, Debug)]
pub struct TypingSession {
    words: Vec<String>,
    layout: Layout,
    placement: Placement,
    current_word: usize,
    current_line: usize,
    typed: Vec<TypedChar>,
    /// committed words of the current display line, joined by single spaces
    line_buffer: String,
    wrong_char_count: usize,
    mistaken_words: Vec<String>,
    /// wrong keystrokes the current word has received so far
    word_errors: usize,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
}

impl TypingSession {
    /// Lay `words` out in lines of at most `max_width` columns, centred on a
    /// `viewport` of (width, height) cells.
    pub fn new(words: Vec<String>, max_width: usize, viewport: (u16, u16)) -> Self {
        let layout = wrap(&words, max_width);
        let placement = Placement::centered(&layout, viewport.0, viewport.1);

        Self {
            words,
            layout,
            placement,
            current_word: 0,
            current_line: 0,
            typed: Vec::new(),
            line_buffer: String::new(),
            wrong_char_count: 0,
            mistaken_words: Vec::new(),
            word_errors: 0,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn current_word_index(&self) -> usize {
        self.current_word
    }

    pub fn current_line_index(&self) -> usize {
        self.current_line
    }

    pub fn typed(&self) -> &[TypedChar] {
        &self.typed
    }

    pub fn typed_buffer(&self) -> String {
        self.typed.iter().map(|t| t.char).collect()
    }

    pub fn line_buffer(&self) -> &str {
        &self.line_buffer
    }

    pub fn wrong_char_count(&self) -> usize {
        self.wrong_char_count
    }

    pub fn mistaken_words(&self) -> &[String] {
        &self.mistaken_words
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn state(&self) -> SessionState {
        if self.is_completed() {
            SessionState::Completed
        } else if self.started_at.is_some() {
            SessionState::InProgress
        } else {
            SessionState::NotStarted
        }
    }

    pub fn is_completed(&self) -> bool {
        self.current_word >= self.words.len()
    }

    /// Characters in the sample including the single spaces between words.
    pub fn total_char_count(&self) -> usize {
        let letters: usize = self.words.iter().map(|w| w.chars().count()).sum();
        letters + self.words.len().saturating_sub(1)
    }

    /// Time from the first accepted keystroke to completion, or to `now`
    /// while still in progress.
    pub fn elapsed(&self, now: Instant) -> Duration {
        let Some(start) = self.started_at else {
            return Duration::ZERO;
        };
        let end = self.finished_at.unwrap_or(now);
        end.saturating_duration_since(start)
    }

    /// Final figures, available once every word has been finished.
    pub fn report(&self) -> Option<Report> {
        if !self.is_completed() {
            return None;
        }
        let elapsed = self.elapsed(Instant::now()).as_secs_f64();
        Some(stats::compute(
            elapsed,
            self.words.len(),
            self.total_char_count(),
            self.wrong_char_count,
            &self.mistaken_words,
        ))
    }

    pub fn handle(&mut self, key: Key) -> Vec<RenderCommand> {
        self.handle_at(key, Instant::now())
    }

    /// Apply `key` as if it arrived at `now`.
    pub fn handle_at(&mut self, key: Key, now: Instant) -> Vec<RenderCommand> {
        if self.is_completed() || !key.is_accepted() {
            return Vec::new();
        }
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        let commands = match key {
            Key::Letter(c) => self.letter(c),
            Key::Space => self.space(),
            Key::LineBreak => self.line_break(),
            Key::DeleteChar => self.delete_char(),
            Key::DeleteWord => self.delete_word(),
            Key::Ignored => Vec::new(),
        };

        if self.is_completed() {
            self.finished_at = Some(now);
        }
        commands
    }

    fn current_target(&self) -> &str {
        self.words.get(self.current_word).map_or("", String::as_str)
    }

    fn letter(&mut self, c: char) -> Vec<RenderCommand> {
        let Some(expected) = self.current_target().chars().nth(self.typed.len()) else {
            return Vec::new();
        };

        let outcome = if chars_match(c, expected) {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };

        let style = match outcome {
            Outcome::Correct => Style::Correct,
            Outcome::Incorrect => {
                self.wrong_char_count += 1;
                self.word_errors += 1;
                self.mark_mistaken();
                Style::Incorrect
            }
        };

        self.typed.push(TypedChar { char: c, outcome });
        vec![RenderCommand::text(c.to_string(), style)]
    }

    fn space(&mut self) -> Vec<RenderCommand> {
        if self.typed.is_empty() {
            return Vec::new();
        }

        let mut commands = self.finish_word();
        if self.overflows_line(self.current_word) {
            commands.push(self.next_line());
        } else {
            commands.push(RenderCommand::text(" ", Style::Untyped));
        }
        commands
    }

    /// Jumps to the next line only when the word after the current one
    /// would not fit behind the words already committed to this line.
    fn line_break(&mut self) -> Vec<RenderCommand> {
        if !self.overflows_line(self.current_word + 1) {
            return Vec::new();
        }

        let mut commands = self.finish_word();
        commands.push(self.next_line());
        commands
    }

    /// Whether the word at `index` exists and would not fit behind the
    /// words already committed to this line.
    fn overflows_line(&self, index: usize) -> bool {
        let Some(word) = self.words.get(index) else {
            return false;
        };
        let max_width = self.layout.max_width;
        !fits(self.line_buffer.width(), word.width(), max_width)
    }

    fn delete_char(&mut self) -> Vec<RenderCommand> {
        let Some(removed) = self.typed.pop() else {
            return Vec::new();
        };
        if removed.outcome == Outcome::Incorrect {
            self.forgive_sole_error();
        }

        let restored = self
            .current_target()
            .chars()
            .nth(self.typed.len())
            .unwrap_or(' ');

        vec![
            RenderCommand::MoveLeft(1),
            RenderCommand::text(restored.to_string(), Style::Untyped),
            RenderCommand::MoveLeft(1),
        ]
    }

    fn delete_word(&mut self) -> Vec<RenderCommand> {
        if self.typed.is_empty() {
            return Vec::new();
        }
        if self.typed.iter().any(|t| t.outcome == Outcome::Incorrect) {
            self.forgive_sole_error();
        }

        let count = self.typed.len();
        let restored: String = self.current_target().chars().take(count).collect();
        self.typed.clear();

        let cells = count as u16;
        vec![
            RenderCommand::MoveLeft(cells),
            RenderCommand::text(restored, Style::Untyped),
            RenderCommand::MoveLeft(cells),
        ]
    }

    /// Score the untyped tail of the current word as wrong and commit the
    /// word to the line.
    fn finish_word(&mut self) -> Vec<RenderCommand> {
        let word = self.current_target().to_string();
        let remaining: String = word.chars().skip(self.typed.len()).collect();

        let mut commands = Vec::new();
        if !remaining.is_empty() {
            self.wrong_char_count += remaining.chars().count();
            self.mark_mistaken();
            commands.push(RenderCommand::text(remaining, Style::Incorrect));
        }

        if !self.line_buffer.is_empty() {
            self.line_buffer.push(' ');
        }
        self.line_buffer.push_str(&word);

        self.current_word += 1;
        self.typed.clear();
        self.word_errors = 0;
        commands
    }

    fn next_line(&mut self) -> RenderCommand {
        let last = self.layout.len().saturating_sub(1);
        self.current_line = (self.current_line + 1).min(last);
        self.line_buffer.clear();

        let (column, row) = self.placement.origin(self.current_line);
        RenderCommand::MoveTo { column, row }
    }

    fn mark_mistaken(&mut self) {
        let word = self.current_target().to_string();
        if !self.mistaken_words.contains(&word) {
            self.mistaken_words.push(word);
        }
    }

    /// Erasing the only wrong keystroke a word ever received clears its mark.
    fn forgive_sole_error(&mut self) {
        if self.word_errors == 1 {
            let word = self.current_target().to_string();
            self.mistaken_words.retain(|w| *w != word);
        }
    }
}

fn chars_match(typed: char, expected: char) -> bool {
    typed.to_lowercase().eq(expected.to_lowercase())
}
