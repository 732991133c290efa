//! Explicit parser state held next to the tree.

use super::list::ListKind;
use super::table::Alignment;

/// Index path from the root to a node
pub type Path = Vec<usize>;

/// Which kind of block is receiving lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BlockState {
    /// A paragraph-like node takes text
    #[default]
    Paragraph,
    /// Lines starting with `>` extend the open blockquote
    Blockquote,
    /// Inside a code fence; every line is literal
    Fence,
    /// One entry per open list level, outermost first
    List(Vec<ListLevel>),
    /// Rows extend the open table
    Table(TableState),
}

/// One open list level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLevel {
    /// Marker column that identifies this level
    pub indent: usize,
    pub kind: ListKind,
    /// Path of the `ul`/`ol` node
    pub path: Path,
}

/// A table that is being built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    /// Path of the `table` node
    pub path: Path,
    /// Per-column alignment, set by the alignment row
    pub alignments: Vec<Alignment>,
    /// True until the line after the header has been seen
    pub expecting_alignment: bool,
}

impl TableState {
    pub fn new(path: Path, columns: usize) -> Self {
        Self {
            path,
            alignments: vec![Alignment::None; columns],
            expecting_alignment: true,
        }
    }

    /// Alignment of column `index`; columns past the header have none
    pub fn alignment(&self, index: usize) -> Alignment {
        self.alignments.get(index).copied().unwrap_or_default()
    }
}
