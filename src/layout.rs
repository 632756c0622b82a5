use unicode_width::UnicodeWidthStr;

/// Upper bound on line width regardless of terminal size.
pub const DEFAULT_MAX_LINE_WIDTH: usize = 64;
/// Columns kept free around the text block.
pub const HORIZONTAL_MARGIN: usize = 6;

/// Sample words grouped into display lines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub lines: Vec<Vec<String>>,
    pub max_width: usize,
}

impl Layout {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Words of line `idx` joined by single spaces.
    pub fn line_text(&self, idx: usize) -> Option<String> {
        self.lines.get(idx).map(|words| words.join(" "))
    }

    pub fn words(&self) -> impl Iterator<Item = &String> {
        self.lines.iter().flatten()
    }
}

/// Whether a word of `word_width` columns can follow a line that is already
/// `line_width` columns wide, with one separating space.
/// An empty line accepts any word.
pub fn fits(line_width: usize, word_width: usize, max_width: usize) -> bool {
    line_width == 0 || line_width + 1 + word_width <= max_width
}

/// Greedy left-to-right packing. Oversized words sit alone on their own line.
pub fn wrap(words: &[String], max_width: usize) -> Layout {
    let mut lines = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_width = 0;

    for word in words {
        let width = word.width();
        if !fits(current_width, width, max_width) {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if current_width > 0 {
            current_width += 1;
        }
        current_width += width;
        current.push(word.clone());
    }

    if !current.is_empty() {
        lines.push(current);
    }

    Layout { lines, max_width }
}

/// Columns taken by `words` joined with single spaces.
fn line_width(words: &[String]) -> usize {
    let letters: usize = words.iter().map(|w| w.width()).sum();
    letters + words.len().saturating_sub(1)
}

/// Line width for a terminal `terminal_width` columns wide.
pub fn max_line_width(configured: usize, terminal_width: u16) -> usize {
    configured
        .min((terminal_width as usize).saturating_sub(HORIZONTAL_MARGIN))
        .max(1)
}

/// Left padding that centres `text_width` columns in `area_width`.
pub fn center_column(text_width: usize, area_width: u16) -> u16 {
    ((area_width as usize / 2).saturating_sub(text_width / 2)) as u16
}

/// First row of a block of `lines` rows centred in `area_height`.
pub fn center_row(lines: usize, area_height: u16) -> u16 {
    ((area_height as usize / 2).saturating_sub(lines / 2 + 2) + 1) as u16
}

/// Screen origin of every layout line once centred on the terminal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Placement {
    pub origins: Vec<(u16, u16)>,
}

impl Placement {
    pub fn centered(layout: &Layout, width: u16, height: u16) -> Self {
        let top = center_row(layout.len(), height);
        let origins = layout
            .lines
            .iter()
            .enumerate()
            .map(|(i, words)| {
                let column = center_column(line_width(words), width);
                (column, top.saturating_add(i as u16))
            })
            .collect();

        Self { origins }
    }

    /// Origin of line `idx`, clamped to the last line.
    pub fn origin(&self, idx: usize) -> (u16, u16) {
        self.origins
            .get(idx)
            .or_else(|| self.origins.last())
            .copied()
            .unwrap_or((0, 0))
    }
}
