use std::io;
use std::sync::mpsc::Receiver;

use crossterm::event::{self, Event};
use tracing::{debug, info};

use crate::keys::{classify, Input, Key};
use crate::render::{layout_commands, Renderer};
use crate::session::TypingSession;
use crate::stats::Report;

/// Input side of the terminal: blocks until the next keystroke.
pub trait KeySource {
    fn next_input(&mut self) -> io::Result<Input>;
}

/// Production key source reading crossterm events on the calling thread.
#[derive(Debug, Default)]
pub struct CrosstermKeySource;

impl KeySource for CrosstermKeySource {
    fn next_input(&mut self) -> io::Result<Input> {
        loop {
            if let Event::Key(key) = event::read()? {
                return Ok(classify(&key));
            }
        }
    }
}

/// Key source fed through a channel, for headless runs and tests.
/// A closed channel reads as `Abort`.
pub struct ChannelKeySource {
    rx: Receiver<Input>,
}

impl ChannelKeySource {
    pub fn new(rx: Receiver<Input>) -> Self {
        Self { rx }
    }
}

impl KeySource for ChannelKeySource {
    fn next_input(&mut self) -> io::Result<Input> {
        Ok(self.rx.recv().unwrap_or(Input::Abort))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEnd {
    Completed(Report),
    Aborted,
}

/// Draw the layout, then feed keystrokes to `session` until it completes
/// or the player aborts.
pub fn run_session<K, R>(
    session: &mut TypingSession,
    keys: &mut K,
    renderer: &mut R,
) -> io::Result<SessionEnd>
where
    K: KeySource + ?Sized,
    R: Renderer + ?Sized,
{
    renderer.apply_all(&layout_commands(session.layout(), session.placement()))?;
    debug!(
        words = session.words().len(),
        lines = session.layout().len(),
        max_width = session.layout().max_width,
        "layout drawn"
    );

    while !session.is_completed() {
        match keys.next_input()? {
            Input::Abort => {
                info!(word = session.current_word_index(), "session aborted");
                return Ok(SessionEnd::Aborted);
            }
            Input::Key(key) => {
                let commands = session.handle(key);
                if !commands.is_empty() {
                    renderer.apply_all(&commands)?;
                }
            }
        }
    }

    match session.report() {
        Some(report) => {
            info!(
                elapsed_secs = report.elapsed_secs,
                wpm = report.wpm,
                cpm = report.cpm,
                accuracy = report.accuracy,
                wrong_chars = session.wrong_char_count(),
                "session completed"
            );
            Ok(SessionEnd::Completed(report))
        }
        None => Ok(SessionEnd::Aborted),
    }
}

/// Block until the player acknowledges the report with Enter (or aborts).
pub fn wait_for_dismissal<K: KeySource + ?Sized>(keys: &mut K) -> io::Result<()> {
    loop {
        match keys.next_input()? {
            Input::Key(Key::LineBreak) | Input::Abort => return Ok(()),
            Input::Key(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingRenderer, Style};
    use std::sync::mpsc;

    fn session(list: &[&str]) -> TypingSession {
        TypingSession::new(list.iter().map(|w| w.to_string()).collect(), 64, (80, 24))
    }

    fn keys_for(text: &str) -> ChannelKeySource {
        let (tx, rx) = mpsc::channel();
        for c in text.chars() {
            tx.send(Input::Key(Key::from_char(c))).unwrap();
        }
        ChannelKeySource::new(rx)
    }

    #[test]
    fn run_session_completes_and_reports() {
        let mut session = session(&["cat", "dog"]);
        let mut keys = keys_for("cag dog ");
        let mut renderer = RecordingRenderer::new(80, 24);

        let end = run_session(&mut session, &mut keys, &mut renderer).unwrap();

        match end {
            SessionEnd::Completed(report) => {
                assert_eq!(report.mistakes, Some(vec!["cat".to_string()]));
                assert_eq!(report.accuracy, 85.71);
            }
            SessionEnd::Aborted => panic!("expected a completed session"),
        }
        assert_eq!(renderer.text_in(Style::Incorrect), "g");
        assert_eq!(renderer.text_in(Style::Correct), "cadog");
    }

    #[test]
    fn run_session_stops_on_abort() {
        let (tx, rx) = mpsc::channel();
        tx.send(Input::Key(Key::Letter('c'))).unwrap();
        tx.send(Input::Abort).unwrap();
        tx.send(Input::Key(Key::Letter('a'))).unwrap();

        let mut session = session(&["cat"]);
        let mut keys = ChannelKeySource::new(rx);
        let mut renderer = RecordingRenderer::new(80, 24);

        let end = run_session(&mut session, &mut keys, &mut renderer).unwrap();

        assert_eq!(end, SessionEnd::Aborted);
        assert_eq!(session.typed_buffer(), "c");
    }

    #[test]
    fn closed_channel_reads_as_abort() {
        let (tx, rx) = mpsc::channel::<Input>();
        drop(tx);
        let mut keys = ChannelKeySource::new(rx);

        assert_eq!(keys.next_input().unwrap(), Input::Abort);
    }

    #[test]
    fn dismissal_waits_for_enter() {
        let (tx, rx) = mpsc::channel();
        tx.send(Input::Key(Key::Letter('x'))).unwrap();
        tx.send(Input::Key(Key::Space)).unwrap();
        tx.send(Input::Key(Key::LineBreak)).unwrap();
        tx.send(Input::Key(Key::Letter('y'))).unwrap();
        let mut keys = ChannelKeySource::new(rx);

        wait_for_dismissal(&mut keys).unwrap();

        assert_eq!(keys.next_input().unwrap(), Input::Key(Key::Letter('y')));
    }
}
