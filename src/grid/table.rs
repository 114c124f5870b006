//! Generic table model.
//!
//! Lays out any row type against a list of [`Column`] descriptors: header
//! texts, column widths, and per-cell wrapped text. Collapsed cells are
//! clamped to [`CELL_LINE_CLAMP`] lines; each cell can be expanded on its own.
//! The ratatui widget in `ui::components::data_table` only draws this model.

use std::collections::HashSet;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::constants::{CELL_LINE_CLAMP, DEFAULT_COLUMN_MAX_WIDTH, ELLIPSIS};

/// Narrowest a column is ever squeezed to
const MIN_COLUMN_WIDTH: u16 = 4;
/// Gap between columns, matching the widget's column spacing
pub const COLUMN_SPACING: u16 = 1;

/// A column descriptor bound to a row type.
///
/// The accessor is a plain function over the row, so a column can only read
/// fields the row type actually has.
pub struct Column<T> {
    pub header: &'static str,
    accessor: fn(&T) -> String,
    pub width: Option<u16>,
    pub max_width: Option<u16>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            header: self.header,
            accessor: self.accessor,
            width: self.width,
            max_width: self.max_width,
        }
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("width", &self.width)
            .field("max_width", &self.max_width)
            .finish()
    }
}

impl<T> Column<T> {
    pub fn new(header: &'static str, accessor: fn(&T) -> String) -> Self {
        Self {
            header,
            accessor,
            width: None,
            max_width: None,
        }
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_max_width(mut self, max_width: u16) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn cell_text(&self, row: &T) -> String {
        (self.accessor)(row)
    }

    fn desired_width(&self) -> u16 {
        let max = self.max_width.unwrap_or(DEFAULT_COLUMN_MAX_WIDTH);
        self.width.unwrap_or(max).min(max).max(MIN_COLUMN_WIDTH)
    }
}

/// Position of a cell within the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Which cells are expanded. Keyed by position, so it is only meaningful for
/// the row collection it was built against: [`ExpansionState::sync`] wipes it
/// whenever the collection generation changes.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: HashSet<CellRef>,
    generation: u64,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to a row collection generation; returns true if stale state was dropped.
    pub fn sync(&mut self, generation: u64) -> bool {
        if generation == self.generation {
            return false;
        }
        self.generation = generation;
        let had_state = !self.expanded.is_empty();
        self.expanded.clear();
        had_state
    }

    /// Flip one cell; returns its new state.
    pub fn toggle(&mut self, cell: CellRef) -> bool {
        if self.expanded.remove(&cell) {
            false
        } else {
            self.expanded.insert(cell);
            true
        }
    }

    pub fn is_expanded(&self, cell: CellRef) -> bool {
        self.expanded.contains(&cell)
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Wrapped content of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub lines: Vec<String>,
    pub expanded: bool,
    /// Some content is hidden by the line clamp
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub cells: Vec<CellView>,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// A single "No Data Available" row spanning `colspan` columns
    Empty { colspan: usize },
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<&'static str>,
    pub widths: Vec<u16>,
    pub body: TableBody,
}

impl TableView {
    pub fn row_count(&self) -> usize {
        match &self.body {
            TableBody::Empty { .. } => 0,
            TableBody::Rows(rows) => rows.len(),
        }
    }
}

/// Lay out `rows` against `columns` within `available_width` terminal cells.
///
/// `None` and an empty slice both produce [`TableBody::Empty`].
pub fn layout_table<T>(
    columns: &[Column<T>],
    rows: Option<&[T]>,
    expansion: &ExpansionState,
    available_width: u16,
) -> TableView {
    let widths = column_widths(columns, available_width);
    let headers = columns.iter().map(|column| column.header).collect();

    let body = match rows {
        None => TableBody::Empty { colspan: columns.len() },
        Some(rows) if rows.is_empty() => TableBody::Empty { colspan: columns.len() },
        Some(rows) => TableBody::Rows(
            rows.iter()
                .enumerate()
                .map(|(row_index, row)| {
                    let cells: Vec<CellView> = columns
                        .iter()
                        .zip(&widths)
                        .enumerate()
                        .map(|(col_index, (column, width))| {
                            let expanded = expansion.is_expanded(CellRef::new(row_index, col_index));
                            layout_cell(&column.cell_text(row), *width as usize, expanded)
                        })
                        .collect();
                    let lines = cells.iter().map(|cell| cell.lines.len()).max().unwrap_or(1).max(1);
                    let height = u16::try_from(lines).unwrap_or(u16::MAX);
                    RowView { cells, height }
                })
                .collect(),
        ),
    };

    TableView { headers, widths, body }
}

/// Compute column widths, shrinking proportionally when they do not fit.
pub fn column_widths<T>(columns: &[Column<T>], available_width: u16) -> Vec<u16> {
    let desired: Vec<u16> = columns.iter().map(Column::desired_width).collect();
    let spacing = COLUMN_SPACING.saturating_mul(columns.len().saturating_sub(1) as u16);
    let budget = available_width.saturating_sub(spacing) as u32;
    let total: u32 = desired.iter().map(|w| *w as u32).sum();

    if total <= budget || total == 0 {
        return desired;
    }

    desired
        .iter()
        .map(|w| ((*w as u32 * budget) / total).max(MIN_COLUMN_WIDTH as u32) as u16)
        .collect()
}

/// Wrap and, unless expanded, clamp a cell's text.
pub fn layout_cell(text: &str, width: usize, expanded: bool) -> CellView {
    let mut lines = wrap_text(text, width);
    let mut truncated = false;

    if !expanded && lines.len() > CELL_LINE_CLAMP {
        lines.truncate(CELL_LINE_CLAMP);
        if let Some(last) = lines.last_mut() {
            *last = with_ellipsis(last, width);
        }
        truncated = true;
    }

    CellView {
        lines,
        expanded,
        truncated,
    }
}

/// Greedy word wrap by display width. Words wider than `width` are broken mid-word.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();

            if current_width > 0 && current_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if current_width == 0 && word_width > width {
                let mut pieces = split_by_width(word, width);
                let tail = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                current_width = tail.width();
                current = tail;
                continue;
            }

            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Break a word into pieces no wider than `width`. A lone character wider than `width` gets its own piece.
fn split_by_width(word: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0;

    for ch in word.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if piece_width > 0 && piece_width + ch_width > width {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0;
        }
        piece.push(ch);
        piece_width += ch_width;
    }
    pieces.push(piece);
    pieces
}

fn with_ellipsis(line: &str, width: usize) -> String {
    let budget = width.saturating_sub(ELLIPSIS.width());
    let mut out = String::new();
    let mut used = 0;

    if line.width() + ELLIPSIS.width() > width {
        for ch in line.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if used + ch_width > budget {
                break;
            }
            out.push(ch);
            used += ch_width;
        }
    } else {
        out.push_str(line);
    }
    out.push_str(ELLIPSIS);
    out
}
