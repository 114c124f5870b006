//! Draws a [`TableView`] with ratatui.

use crate::constants::{ERROR_FETCH_FAILED, LOADING_TEXT, NO_DATA_AVAILABLE};
use crate::grid::table::{CellRef, RowView, TableBody, TableView, COLUMN_SPACING};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{block::BorderType, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Screen area of each drawn cell, for mouse hit testing
pub type CellHitMap = Vec<(Rect, CellRef)>;

pub struct DataTableProps<'a> {
    pub title: &'a str,
    pub view: &'a TableView,
    pub cursor: Option<CellRef>,
    pub loading: bool,
    pub error: Option<&'a str>,
}

pub fn render_data_table(f: &mut Frame, rect: Rect, props: DataTableProps) -> CellHitMap {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(props.title.to_string())
        .border_style(Style::default().fg(Color::DarkGray));
    if let Some(error) = props.error {
        block = block.title_bottom(Line::from(Span::styled(
            format!("{} ({})", ERROR_FETCH_FAILED, error),
            Style::default().fg(Color::Red),
        )));
    }
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    if props.loading {
        let loading = Paragraph::new(LOADING_TEXT)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(loading, inner);
        return Vec::new();
    }

    let view = props.view;
    let widths: Vec<Constraint> = view.widths.iter().map(|w| Constraint::Length(*w)).collect();
    let header = Row::new(view.headers.iter().map(|h| Cell::from(*h)))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    match &view.body {
        TableBody::Empty { .. } => {
            let table = Table::new(Vec::<Row>::new(), widths.clone())
                .header(header)
                .column_spacing(COLUMN_SPACING);
            f.render_widget(table, inner);

            if inner.height > 1 {
                let row_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
                let empty = Paragraph::new(NO_DATA_AVAILABLE)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Gray));
                f.render_widget(empty, row_area);
            }
            Vec::new()
        }
        TableBody::Rows(rows) => {
            let available = inner.height.saturating_sub(1);
            let offset = first_visible_row(rows, props.cursor.map(|c| c.row), available);

            let mut hits = Vec::new();
            let mut y = inner.y + 1;
            let bottom = inner.y + inner.height;
            let mut drawn = Vec::new();

            for (row_index, row) in rows.iter().enumerate().skip(offset) {
                if y >= bottom {
                    break;
                }
                let height = row.height.min(bottom - y);
                let mut x = inner.x;
                for (col_index, width) in view.widths.iter().enumerate() {
                    let width = (*width).min((inner.x + inner.width).saturating_sub(x));
                    if width > 0 {
                        hits.push((Rect::new(x, y, width, height), CellRef::new(row_index, col_index)));
                    }
                    x = x.saturating_add(width + COLUMN_SPACING);
                }
                drawn.push(render_row(row_index, row, props.cursor));
                y = y.saturating_add(row.height);
            }

            let table = Table::new(drawn, widths)
                .header(header)
                .column_spacing(COLUMN_SPACING);
            f.render_widget(table, inner);
            hits
        }
    }
}

fn render_row(row_index: usize, row: &RowView, cursor: Option<CellRef>) -> Row<'static> {
    let cells = row.cells.iter().enumerate().map(|(col_index, cell)| {
        let mut style = Style::default().fg(Color::White);
        if cell.expanded {
            style = style.fg(Color::LightCyan);
        }
        if cursor == Some(CellRef::new(row_index, col_index)) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let text = Text::from(cell.lines.iter().map(|line| Line::from(line.clone())).collect::<Vec<_>>());
        Cell::from(text).style(style)
    });
    Row::new(cells).height(row.height)
}

/// First row to draw so the cursor row stays inside `available` lines.
pub fn first_visible_row(rows: &[RowView], cursor_row: Option<usize>, available: u16) -> usize {
    let Some(cursor_row) = cursor_row else {
        return 0;
    };
    let cursor_row = cursor_row.min(rows.len().saturating_sub(1));

    let mut offset = cursor_row;
    let mut used = rows.get(cursor_row).map(|row| row.height).unwrap_or(0);
    while offset > 0 {
        let above = rows[offset - 1].height;
        if used.saturating_add(above) > available {
            break;
        }
        used += above;
        offset -= 1;
    }
    offset
}
