//! Pipe-table rows and column alignment.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::escape::{encode, EscapeMode};

static ALIGNMENT_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^:?-+:?$").unwrap());

/// Horizontal alignment of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Right,
    Center,
}

impl Alignment {
    /// Parse an alignment-row cell (`---`, `:---`, `---:`, `:---:`)
    pub fn parse(cell: &str) -> Option<Self> {
        if !ALIGNMENT_CELL.is_match(cell) {
            return None;
        }
        Some(match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) => Alignment::Center,
            (true, false) => Alignment::Left,
            (false, true) => Alignment::Right,
            (false, false) => Alignment::None,
        })
    }

    /// Value of the cell `style` attribute, if any
    pub fn style(self) -> Option<&'static str> {
        match self {
            Alignment::None => None,
            Alignment::Left => Some("text-align: left"),
            Alignment::Right => Some("text-align: right"),
            Alignment::Center => Some("text-align: center"),
        }
    }
}

/// One pipe-delimited line, split into trimmed cells.
///
/// Escaped pipes (`\|`) are kept inside their cell as placeholders, which
/// the inline pipeline decodes when the cell is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<String>,
}

impl Row {
    /// Split a `| a | b |` line; `None` if the line is not row-shaped
    pub fn parse(line: &str) -> Option<Self> {
        let encoded = encode(line.trim(), &['|'], EscapeMode::Escaped);
        if encoded.len() < 2 || !encoded.starts_with('|') || !encoded.ends_with('|') {
            return None;
        }

        let inner = &encoded[1..encoded.len() - 1];
        let cells = inner.split('|').map(|cell| cell.trim().to_string()).collect();
        Some(Self { cells })
    }

    /// True if no cell has any text
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(String::is_empty)
    }

    /// Interpret the row as an alignment-marker row.
    ///
    /// Empty cells are skipped, so `|| --- |  | --- ||` has two columns.
    pub fn alignments(&self) -> Option<Vec<Alignment>> {
        let alignments = self
            .cells
            .iter()
            .filter(|cell| !cell.is_empty())
            .map(|cell| Alignment::parse(cell))
            .collect::<Option<Vec<_>>>()?;

        if alignments.is_empty() {
            None
        } else {
            Some(alignments)
        }
    }
}
