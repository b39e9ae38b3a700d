//! TUI rendering system
//!
//! Draws the search surface: heading, query input with its submit button,
//! the alert or loading line, the results table, the full body of the
//! selected row and, when there is more than one page, the pagination bar.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::display::{
    self, ResultRow, COLUMN_HEADERS, ELLIPSIS, HEADING, LOADING_TEXT, NO_COMMENTS, PLACEHOLDER,
};
use crate::pagination::{PageControl, PageItem, Pagination};
use crate::search_controller::QueryState;

static TABLE_WIDTHS: [Constraint; 4] = [
    Constraint::Length(6),
    Constraint::Percentage(25),
    Constraint::Percentage(25),
    Constraint::Percentage(50),
];

const SUBMIT_WIDTH: u16 = 16;
const SEGMENT_GAP: u16 = 1;

const HELP_TEXT: &str =
    "Enter: Search | ↑↓/C-p/C-n: Select | PgUp/PgDn/←→: Page | Home/End: First/Last | C-u: Clear | Esc: Quit";

/// Presentation state that lives outside the search controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Selected row within the current page window
    pub selected_row: usize,
    /// Where the pagination bar was drawn last frame
    pub pagination_area: Option<Rect>,
}

/// One clickable or decorative piece of the pagination bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarSegment {
    pub label: String,
    pub control: Option<PageControl>,
    pub enabled: bool,
    pub active: bool,
}

impl BarSegment {
    fn width(&self) -> u16 {
        self.label.chars().count() as u16
    }
}

/// Central renderer for the search widget
pub struct TuiRenderer;

impl TuiRenderer {
    /// Render the complete widget
    pub fn render(f: &mut Frame, state: &QueryState, view: &mut ViewState) {
        let pagination = state.pagination();
        let pagination_height = if pagination.is_visible() { 1 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                 // Heading
                Constraint::Length(3),                 // Input and submit
                Constraint::Length(1),                 // Alert / loading
                Constraint::Min(4),                    // Results table
                Constraint::Length(4),                 // Selected body
                Constraint::Length(pagination_height), // Pagination bar
                Constraint::Length(1),                 // Help
            ])
            .split(f.size());

        let heading = Paragraph::new(HEADING)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD));
        f.render_widget(heading, chunks[0]);

        Self::render_input_row(f, chunks[1], state);
        Self::render_message_line(f, chunks[2], state);

        let rows = display::result_rows(&state.page_window());
        view.selected_row = view.selected_row.min(rows.len().saturating_sub(1));
        Self::render_results_table(f, chunks[3], &rows, view.selected_row);
        Self::render_detail(f, chunks[4], rows.get(view.selected_row));

        if pagination.is_visible() {
            Self::render_pagination(f, chunks[5], &pagination);
            view.pagination_area = Some(chunks[5]);
        } else {
            view.pagination_area = None;
        }

        let help = Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::Gray));
        f.render_widget(help, chunks[6]);
    }

    fn render_input_row(f: &mut Frame, area: Rect, state: &QueryState) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(SUBMIT_WIDTH)])
            .split(area);

        let enabled = state.input_enabled();
        let (text, text_style) = if state.raw_query.is_empty() {
            (PLACEHOLDER.to_string(), Style::default().fg(Color::DarkGray))
        } else {
            (state.raw_query.clone(), Style::default().fg(Color::White))
        };
        let border_style = if enabled {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let input = Paragraph::new(text).style(text_style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Query"),
        );
        f.render_widget(input, columns[0]);

        if enabled {
            let cursor_x = columns[0].x + 1 + state.raw_query.chars().count() as u16;
            if cursor_x < columns[0].right().saturating_sub(1) {
                f.set_cursor(cursor_x, columns[0].y + 1);
            }
        }

        let button_style = if enabled {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let button = Paragraph::new(display::submit_label(state.loading))
            .alignment(Alignment::Center)
            .style(button_style)
            .block(Block::default().borders(Borders::ALL).border_style(border_style));
        f.render_widget(button, columns[1]);
    }

    fn render_message_line(f: &mut Frame, area: Rect, state: &QueryState) {
        let line = if let Some(error) = &state.error {
            Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        } else if state.loading {
            Line::from(Span::styled(LOADING_TEXT, Style::default().fg(Color::Yellow)))
        } else {
            Line::default()
        };
        f.render_widget(Paragraph::new(line), area);
    }

    fn render_results_table(f: &mut Frame, area: Rect, rows: &[ResultRow], selected: usize) {
        let header = Row::new(COLUMN_HEADERS.to_vec())
            .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan));

        let body: Vec<Row> = if rows.is_empty() {
            vec![Row::new(vec!["", NO_COMMENTS, "", ""])]
        } else {
            rows.iter().map(|row| Row::new(row.cells().to_vec())).collect()
        };

        let table = Table::new(body)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Comments"))
            .widths(&TABLE_WIDTHS)
            .column_spacing(1)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White));

        let mut table_state = TableState::default();
        if !rows.is_empty() {
            table_state.select(Some(selected));
        }
        f.render_stateful_widget(table, area, &mut table_state);
    }

    fn render_detail(f: &mut Frame, area: Rect, row: Option<&ResultRow>) {
        let text = row.map(|row| row.title.clone()).unwrap_or_default();
        let detail = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Body"));
        f.render_widget(detail, area);
    }

    fn render_pagination(f: &mut Frame, area: Rect, pagination: &Pagination) {
        let mut spans = Vec::new();
        for (index, segment) in Self::pagination_segments(pagination).iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw(" ".repeat(SEGMENT_GAP as usize)));
            }
            let style = if segment.active {
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if !segment.enabled {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(segment.label.clone(), style));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Segments of the pagination bar, left to right
    pub fn pagination_segments(pagination: &Pagination) -> Vec<BarSegment> {
        let mut segments = vec![BarSegment {
            label: "Prev".to_string(),
            control: Some(PageControl::Prev),
            enabled: !pagination.prev_disabled(),
            active: false,
        }];

        segments.extend(pagination.items().into_iter().map(|item| match item {
            PageItem::Page(page) => BarSegment {
                label: page.to_string(),
                control: Some(PageControl::Page(page)),
                enabled: true,
                active: pagination.is_active(page),
            },
            PageItem::Ellipsis => BarSegment {
                label: ELLIPSIS.to_string(),
                control: None,
                enabled: false,
                active: false,
            },
        }));

        segments.push(BarSegment {
            label: "Next".to_string(),
            control: Some(PageControl::Next),
            enabled: !pagination.next_disabled(),
            active: false,
        });
        segments
    }

    /// Control under terminal cell (`column`, `row`) of a bar drawn in `area`
    pub fn pagination_control_at(
        pagination: &Pagination,
        area: Rect,
        column: u16,
        row: u16,
    ) -> Option<PageControl> {
        if row != area.y || column < area.x {
            return None;
        }

        let mut x = area.x;
        for segment in Self::pagination_segments(pagination) {
            let end = x + segment.width();
            if column >= x && column < end {
                return segment.control.filter(|_| segment.enabled);
            }
            x = end + SEGMENT_GAP;
        }
        None
    }
}
