use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::render::Style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Colours for the four render styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub untyped: Rgb,
    pub correct: Rgb,
    pub incorrect: Rgb,
    pub background: Rgb,
}

impl Palette {
    pub fn color(&self, style: Style) -> Rgb {
        match style {
            Style::Untyped => self.untyped,
            Style::Correct => self.correct,
            Style::Incorrect => self.incorrect,
            Style::Background => self.background,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    Monokai,
    Paper,
    Slate,
    /// pick one of the others at startup
    Random,
}

impl ThemeChoice {
    const FIXED: [ThemeChoice; 3] = [Self::Monokai, Self::Paper, Self::Slate];

    /// Resolve to a concrete palette, using `rng` only for `Random`.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> (ThemeChoice, Palette) {
        let choice = match self {
            ThemeChoice::Random => Self::FIXED[rng.gen_range(0..Self::FIXED.len())],
            fixed => fixed,
        };
        (choice, choice.palette())
    }

    /// Palette of a fixed theme; `Random` falls back to monokai.
    pub fn palette(self) -> Palette {
        let hex = |s| Rgb::from_hex(s).unwrap_or(Rgb(255, 255, 255));
        match self {
            ThemeChoice::Monokai | ThemeChoice::Random => Palette {
                untyped: hex("#E6DB74"),
                correct: hex("#E2E2DC"),
                incorrect: hex("#F92672"),
                background: hex("#272822"),
            },
            ThemeChoice::Paper => Palette {
                untyped: hex("#000000"),
                correct: hex("#0000FF"),
                incorrect: hex("#F92672"),
                background: hex("#FFFFFF"),
            },
            ThemeChoice::Slate => Palette {
                untyped: hex("#34282C"),
                correct: hex("#7FFFD4"),
                incorrect: hex("#F92672"),
                background: hex("#808080"),
            },
        }
    }
}
