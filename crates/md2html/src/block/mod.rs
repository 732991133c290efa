//! Block tree builder.
//!
//! [`HtmlTree`] takes the document one line at a time. Each line either
//! extends the block under the cursor, closes it, or opens new blocks
//! (several levels at once for nested lists). The kind of block being built
//! is tracked explicitly in [`BlockState`] instead of being inferred from the
//! shape of the tree.

mod list;
mod state;
mod table;

pub use list::{ListKind, ListMarker};
pub use state::{BlockState, ListLevel, Path, TableState};
pub use table::{Alignment, Row};

use std::collections::HashSet;
use std::fmt;

use md2html_core::{serialize, Node};
use tracing::trace;

use crate::inline::InlinePipeline;
use crate::scan::{count_leading, indent_width, only_runes};
use crate::service::Options;
use crate::utilities::{slugify, strip_closing_hashes, FENCE, LOOSE_ITEM_MARKER};
use crate::{Md2HtmlError, Result};

/// Document tree under construction plus the cursor into it.
///
/// The cursor is an index path from the root to the node receiving input. It
/// always names an existing node.
///
/// # Example
///
/// ```rust
/// use md2html::HtmlTree;
///
/// let mut tree = HtmlTree::new("r");
/// for line in ["hdr1", "==="] {
///     tree.build(line).unwrap();
/// }
/// assert_eq!(tree.to_string(), "r{h1:id=\"hdr1\"{hdr1} p{}}");
/// ```
#[derive(Debug)]
pub struct HtmlTree {
    root: Node,
    cursor: Path,
    state: BlockState,
    /// The previous line added text to a top-level paragraph
    after_text: bool,
    /// Heading ids handed out so far
    ids: HashSet<String>,
    inline: InlinePipeline,
    options: Options,
}

enum Placement {
    /// Add the item to this list
    Sibling(Path),
    /// Open a nested list inside this list
    Nested(Path),
    /// Replace the innermost level with a list of the other kind under this parent
    Replace(Path),
    /// Start a new top-level list
    TopLevel,
}

impl HtmlTree {
    /// Create a tree whose root has the given tag, with default options
    pub fn new(root_tag: &str) -> Self {
        Self::with_options(Options {
            root_tag: root_tag.to_string(),
            ..Default::default()
        })
    }

    /// Create a tree with custom options
    pub fn with_options(options: Options) -> Self {
        Self::with_pipeline(options, InlinePipeline::new())
    }

    /// Create a tree with custom options and inline rules
    pub fn with_pipeline(options: Options, inline: InlinePipeline) -> Self {
        let root = Node::element(&options.root_tag).with_child(Node::element("p"));
        Self {
            root,
            cursor: vec![0],
            state: BlockState::Paragraph,
            after_text: false,
            ids: HashSet::new(),
            inline,
            options,
        }
    }

    /// The root node
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Consume the tree and return its root
    pub fn into_root(self) -> Node {
        self.root
    }

    /// Path of the node currently receiving input
    pub fn cursor(&self) -> &[usize] {
        &self.cursor
    }

    /// Current parser state
    pub fn state(&self) -> &BlockState {
        &self.state
    }

    /// Serialize the tree as indented HTML
    pub fn to_html(&self) -> String {
        serialize(&self.root, &self.options.html)
    }

    /// Feed one source line (without its terminator).
    ///
    /// Only malformed table rows produce an error. The line is then kept as
    /// literal text and the tree stays valid.
    pub fn build(&mut self, line: &str) -> Result<()> {
        if matches!(self.state, BlockState::Fence) {
            if line.trim() == FENCE {
                self.close_fence();
            } else {
                self.cursor_node_mut().add_child(Node::text(line));
            }
            return Ok(());
        }

        let after_text = std::mem::take(&mut self.after_text);
        let trimmed = line.trim();

        if after_text {
            if let Some(level) = setext_level(trimmed) {
                self.setext_heading(level);
                return Ok(());
            }
        }

        let level = count_leading(line, '#', 6);
        if level > 0 {
            self.atx_heading(level, &line[level..]);
            return Ok(());
        }

        if is_thematic_break(trimmed) {
            self.thematic_break();
            return Ok(());
        }

        if let Some(info) = fence_info(trimmed) {
            self.open_fence(info);
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix('>') {
            self.blockquote(rest);
            return Ok(());
        }

        if let Some(marker) = ListMarker::parse(line, self.options.tab_width) {
            self.list_item(&marker);
            return Ok(());
        }

        if matches!(self.state, BlockState::List(_)) {
            if trimmed.is_empty() {
                self.cursor_node_mut().add_child(Node::text(LOOSE_ITEM_MARKER));
                return Ok(());
            }
            if self.continue_list(line) {
                self.append_text(trimmed);
                return Ok(());
            }
        }

        if matches!(self.state, BlockState::Table(_)) {
            match Row::parse(line) {
                Some(row) => return self.table_row(&row, trimmed),
                None => {
                    self.close_table();
                    if trimmed.is_empty() {
                        return Ok(());
                    }
                }
            }
        } else if let Some(row) = Row::parse(line) {
            return self.open_table(&row, trimmed);
        }

        if trimmed.is_empty() {
            self.blank();
        } else {
            self.append_text(trimmed);
        }
        Ok(())
    }

    fn cursor_node(&self) -> &Node {
        self.root.descendant(&self.cursor).unwrap_or(&self.root)
    }

    fn cursor_node_mut(&mut self) -> &mut Node {
        self.root.descendant_mut(&self.cursor)
    }

    fn append_child(&mut self, parent: &[usize], child: Node) -> Path {
        let index = self.root.descendant_mut(parent).add_child(child);
        let mut path = parent.to_vec();
        path.push(index);
        path
    }

    /// Return to the top level, dropping a still-empty paragraph
    fn close_block(&mut self) {
        if self
            .root
            .children
            .last()
            .is_some_and(|last| last.tag == "p" && last.is_blank())
        {
            self.root.children.pop();
        }
        self.cursor.clear();
        self.state = BlockState::Paragraph;
    }

    /// Close the current block and append `node` at the top level
    fn open_block(&mut self, node: Node) -> Path {
        self.close_block();
        trace!(tag = %node.tag, "open block");
        let path = self.append_child(&[], node);
        self.cursor = path.clone();
        path
    }

    fn open_paragraph(&mut self) {
        self.open_block(Node::element("p"));
    }

    fn heading_id(&mut self, text: &str) -> Option<String> {
        if !self.options.heading_ids {
            return None;
        }
        let slug = slugify(text);
        if slug.is_empty() {
            return None;
        }

        let mut id = slug.clone();
        let mut suffix = 0;
        while self.ids.contains(&id) {
            suffix += 1;
            id = format!("{}-{}", slug, suffix);
        }
        self.ids.insert(id.clone());
        Some(id)
    }

    fn setext_heading(&mut self, level: usize) {
        let text = self.cursor_node().text_content();
        let id = self.heading_id(&text);

        let node = self.cursor_node_mut();
        node.tag = format!("h{}", level);
        if let Some(id) = id {
            node.set_attr("id", &id);
        }
        self.open_paragraph();
    }

    fn atx_heading(&mut self, level: usize, rest: &str) {
        let text = strip_closing_hashes(rest.trim());

        let rendered = self.inline.render(text);

        let mut heading = Node::element(&format!("h{}", level));
        if let Some(id) = self.heading_id(&rendered) {
            heading.set_attr("id", &id);
        }
        if !rendered.is_empty() {
            heading.add_child(Node::text(&rendered));
        }

        self.open_block(heading);
        self.open_paragraph();
    }

    fn thematic_break(&mut self) {
        self.open_block(Node::element("hr"));
        self.open_paragraph();
    }

    fn open_fence(&mut self, info: &str) {
        let mut code = Node::element("code");
        if !info.is_empty() {
            code.set_attr("class", &format!("language-{}", info));
        }

        let mut path = self.open_block(Node::element("pre").with_child(code));
        path.push(0);
        self.cursor = path;
        self.state = BlockState::Fence;
    }

    fn close_fence(&mut self) {
        trace!("close fence");
        self.open_paragraph();
    }

    fn blockquote(&mut self, rest: &str) {
        if matches!(self.state, BlockState::Table(_)) {
            self.close_table();
        }
        if !matches!(self.state, BlockState::Blockquote) {
            self.open_block(Node::element("blockquote"));
            self.state = BlockState::Blockquote;
        }
        let fragment = format!("{} ", self.inline.render(rest.trim()));
        self.cursor_node_mut().add_child(Node::text(&fragment));
    }

    fn list_item(&mut self, marker: &ListMarker<'_>) {
        let mut item = Node::element("li");
        let text = self.inline.render(marker.text);
        if !text.is_empty() {
            item.add_child(Node::text(&text));
        }

        let mut levels = match std::mem::take(&mut self.state) {
            BlockState::List(levels) => levels,
            _ => Vec::new(),
        };
        while levels.last().is_some_and(|top| top.indent > marker.indent) {
            levels.pop();
        }

        let placement = match levels.last() {
            Some(top) if top.indent < marker.indent => Placement::Nested(top.path.clone()),
            Some(top) if top.kind == marker.kind => Placement::Sibling(top.path.clone()),
            Some(top) => Placement::Replace(top.path[..top.path.len() - 1].to_vec()),
            None => Placement::TopLevel,
        };

        let list_path = match placement {
            Placement::Sibling(path) => path,
            Placement::Nested(parent) => self.push_level(&mut levels, &parent, marker),
            Placement::Replace(parent) => {
                levels.pop();
                self.push_level(&mut levels, &parent, marker)
            }
            Placement::TopLevel => self.push_level(&mut levels, &[], marker),
        };

        self.cursor = self.append_child(&list_path, item);
        self.state = BlockState::List(levels);
    }

    fn push_level(
        &mut self,
        levels: &mut Vec<ListLevel>,
        parent: &[usize],
        marker: &ListMarker<'_>,
    ) -> Path {
        let list = Node::element(marker.kind.tag());
        let path = if parent.is_empty() {
            self.open_block(list)
        } else {
            self.append_child(parent, list)
        };
        trace!(indent = marker.indent, tag = marker.kind.tag(), "open list level");

        levels.push(ListLevel {
            indent: marker.indent,
            kind: marker.kind,
            path: path.clone(),
        });
        path
    }

    /// Pop list levels the line does not belong to.
    ///
    /// Returns true if the line continues a remaining level; otherwise the
    /// list is closed and a fresh paragraph is open.
    fn continue_list(&mut self, line: &str) -> bool {
        let indent = indent_width(line, self.options.tab_width);
        let BlockState::List(levels) = &mut self.state else {
            return false;
        };

        let mut popped = false;
        while levels.last().is_some_and(|top| top.indent >= indent) {
            levels.pop();
            popped = true;
        }

        match levels.last() {
            Some(top) => {
                if popped {
                    self.cursor = top.path.clone();
                }
                true
            }
            None => {
                trace!("close list");
                self.open_paragraph();
                false
            }
        }
    }

    fn append_text(&mut self, text: &str) {
        let rendered = self.inline.render(text);

        let tag = self.cursor_node().tag.clone();
        match tag.as_str() {
            "blockquote" => self.open_paragraph(),
            "ul" | "ol" => {
                let list = self.cursor.clone();
                self.cursor = self.append_child(&list, Node::element("p"));
            }
            _ => {}
        }
        self.cursor_node_mut().add_child(Node::text(&rendered));

        let node = self.cursor_node();
        let after_text = matches!(self.state, BlockState::Paragraph)
            && self.cursor.len() == 1
            && node.tag == "p"
            && node.children.iter().all(Node::is_text);
        self.after_text = after_text;
    }

    fn blank(&mut self) {
        match self.state {
            BlockState::Paragraph if self.cursor_node().is_blank() => {}
            BlockState::Paragraph | BlockState::Blockquote => self.open_paragraph(),
            _ => {}
        }
    }

    fn open_table(&mut self, row: &Row, line: &str) -> Result<()> {
        if row.is_blank() {
            self.append_text(line);
            return Err(Md2HtmlError::EmptyTableHeader(line.to_string()));
        }

        let mut table = Node::element("table");
        if let Some(style) = &self.options.table_style {
            table.set_attr("style", style);
        }
        let header = row
            .cells
            .iter()
            .map(|cell| table_cell(&self.inline, "th", cell, Alignment::None))
            .fold(Node::element("tr"), Node::with_child);
        table.add_child(header);

        let cursor = self.cursor.clone();
        let path = self.append_child(&cursor, table);
        trace!(columns = row.cells.len(), "open table");

        self.cursor = path.clone();
        self.state = BlockState::Table(TableState::new(path, row.cells.len()));
        Ok(())
    }

    fn table_row(&mut self, row: &Row, line: &str) -> Result<()> {
        let BlockState::Table(table) = &mut self.state else {
            return Ok(());
        };

        if std::mem::take(&mut table.expecting_alignment) {
            if let Some(alignments) = row.alignments() {
                let expected = table.alignments.len();
                if alignments.len() != expected {
                    self.close_table();
                    self.append_text(line);
                    return Err(Md2HtmlError::AlignmentMismatch {
                        expected,
                        found: alignments.len(),
                    });
                }

                let node = self.root.descendant_mut(&table.path);
                if let Some(header) = node.children.first_mut() {
                    for (cell, alignment) in header.children.iter_mut().zip(&alignments) {
                        if let Some(style) = alignment.style() {
                            cell.set_attr("style", style);
                        }
                    }
                }
                table.alignments = alignments;
                return Ok(());
            }
        }

        let tr = row
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| table_cell(&self.inline, "td", cell, table.alignment(i)))
            .fold(Node::element("tr"), Node::with_child);
        self.root.descendant_mut(&table.path).add_child(tr);
        Ok(())
    }

    /// Move the cursor back to the node that holds the table
    fn close_table(&mut self) {
        if let BlockState::Table(table) = &self.state {
            self.cursor = table.path[..table.path.len().saturating_sub(1)].to_vec();
        }
        trace!("close table");

        self.state = if self.cursor_node().tag == "blockquote" {
            BlockState::Blockquote
        } else {
            BlockState::Paragraph
        };
    }
}

impl fmt::Display for HtmlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

fn table_cell(inline: &InlinePipeline, tag: &str, text: &str, alignment: Alignment) -> Node {
    let mut cell = Node::element(tag);
    if let Some(style) = alignment.style() {
        cell.set_attr("style", style);
    }
    let rendered = inline.render(text);
    if !rendered.is_empty() {
        cell.add_child(Node::text(&rendered));
    }
    cell
}

fn setext_level(line: &str) -> Option<usize> {
    if only_runes(line, '=') {
        Some(1)
    } else if only_runes(line, '-') {
        Some(2)
    } else {
        None
    }
}

/// Three or more `-`, `*` or `_`, spaces allowed between them
fn is_thematic_break(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    ['-', '*', '_'].iter().any(|&r| only_runes(&compact, r))
}

/// Info string of an opening fence line (empty if there is none)
fn fence_info(line: &str) -> Option<&str> {
    let info = line.strip_prefix(FENCE)?.trim();
    if info.contains('`') {
        return None;
    }
    Some(info.split_whitespace().next().unwrap_or(""))
}
