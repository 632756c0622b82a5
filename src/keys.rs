use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A keystroke as the typing engine understands it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Letter(char),
    Space,
    LineBreak,
    DeleteChar,
    DeleteWord,
    Ignored,
}

impl Key {
    /// Everything except `Ignored` counts as an accepted keystroke.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Key::Ignored)
    }

    /// Classify a single raw character.
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => Key::Space,
            '\r' | '\n' => Key::LineBreak,
            '\u{7f}' | '\u{8}' => Key::DeleteChar,
            '\u{17}' => Key::DeleteWord,
            c if c.is_whitespace() || c.is_control() => Key::Ignored,
            c => Key::Letter(c),
        }
    }
}

/// Input as delivered by a key source: a keystroke for the session or a
/// request to stop the program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Key(Key),
    Abort,
}

/// Map a crossterm key event onto the engine's vocabulary.
pub fn classify(event: &KeyEvent) -> Input {
    if event.kind == KeyEventKind::Release {
        return Input::Key(Key::Ignored);
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);

    let key = match event.code {
        KeyCode::Esc => return Input::Abort,
        KeyCode::Char('c') | KeyCode::Char('C') if ctrl => return Input::Abort,
        KeyCode::Char('w') | KeyCode::Char('W') if ctrl => Key::DeleteWord,
        // a terminal sending ^H for backspace shows up as ctrl+h
        KeyCode::Char('h') if ctrl => Key::DeleteChar,
        KeyCode::Backspace if ctrl || alt => Key::DeleteWord,
        KeyCode::Backspace | KeyCode::Delete => Key::DeleteChar,
        KeyCode::Enter => Key::LineBreak,
        KeyCode::Char(_) if ctrl || alt => Key::Ignored,
        KeyCode::Char(c) => Key::from_char(c),
        _ => Key::Ignored,
    };

    Input::Key(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Input {
        classify(&KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_letters_and_space() {
        assert_eq!(
            press(KeyCode::Char('a'), KeyModifiers::NONE),
            Input::Key(Key::Letter('a'))
        );
        assert_eq!(
            press(KeyCode::Char('A'), KeyModifiers::SHIFT),
            Input::Key(Key::Letter('A'))
        );
        assert_eq!(
            press(KeyCode::Char('\''), KeyModifiers::NONE),
            Input::Key(Key::Letter('\''))
        );
        assert_eq!(
            press(KeyCode::Char(' '), KeyModifiers::NONE),
            Input::Key(Key::Space)
        );
    }

    #[test]
    fn test_editing_keys() {
        assert_eq!(
            press(KeyCode::Backspace, KeyModifiers::NONE),
            Input::Key(Key::DeleteChar)
        );
        assert_eq!(
            press(KeyCode::Backspace, KeyModifiers::CONTROL),
            Input::Key(Key::DeleteWord)
        );
        assert_eq!(
            press(KeyCode::Backspace, KeyModifiers::ALT),
            Input::Key(Key::DeleteWord)
        );
        assert_eq!(
            press(KeyCode::Char('w'), KeyModifiers::CONTROL),
            Input::Key(Key::DeleteWord)
        );
        assert_eq!(
            press(KeyCode::Enter, KeyModifiers::NONE),
            Input::Key(Key::LineBreak)
        );
    }

    #[test]
    fn test_ctrl_h_deletes_a_single_char() {
        assert_eq!(
            press(KeyCode::Char('h'), KeyModifiers::CONTROL),
            Input::Key(Key::DeleteChar)
        );
    }

    #[test]
    fn test_abort_keys() {
        assert_eq!(press(KeyCode::Esc, KeyModifiers::NONE), Input::Abort);
        assert_eq!(
            press(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Input::Abort
        );
    }

    #[test]
    fn test_unrecognised_keys_are_ignored() {
        assert_eq!(
            press(KeyCode::Left, KeyModifiers::NONE),
            Input::Key(Key::Ignored)
        );
        assert_eq!(
            press(KeyCode::F(5), KeyModifiers::NONE),
            Input::Key(Key::Ignored)
        );
        assert_eq!(
            press(KeyCode::Char('x'), KeyModifiers::CONTROL),
            Input::Key(Key::Ignored)
        );
        assert_eq!(
            press(KeyCode::Tab, KeyModifiers::NONE),
            Input::Key(Key::Ignored)
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(classify(&event), Input::Key(Key::Ignored));
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Key::from_char('\r'), Key::LineBreak);
        assert_eq!(Key::from_char('\u{7f}'), Key::DeleteChar);
        assert_eq!(Key::from_char('\u{17}'), Key::DeleteWord);
        assert_eq!(Key::from_char('\t'), Key::Ignored);
        assert!(!Key::Ignored.is_accepted());
        assert!(Key::Space.is_accepted());
    }
}
