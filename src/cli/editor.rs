//! Interactive cost matrix editor using ratatui
//!
//! The screen shows the editable matrix (with employee and job labels), the
//! selected mode, and, once the solver has replied, the reduced matrix with the
//! assigned cells highlighted, the assignment detail and a bar chart of per-row
//! costs.
//!
//! Solver requests run on a worker thread and report back over a channel, so the
//! matrix stays editable while a request is in flight. Replies are applied through
//! [`Session::apply_response`], which drops any reply older than one already shown.
//!
//! # Keys
//!
//! - Arrows / Tab / Enter: move between cells and labels
//! - Typing: edit the focused cell or label, Backspace deletes, Delete clears
//! - F5: calculate, F6: toggle min/max, F9: reset
//! - Esc: quit (with confirmation)

use std::io::{stdout, Stdout};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table},
    Terminal,
};

use crate::pipeline::{Calculation, GatewayError, Session, SolverGateway, SolverResponse};
use crate::report::{employee_name, format_value, job_name};

const MAX_CELL_LEN: usize = 16;
const MAX_LABEL_LEN: usize = 32;
const COLUMN_WIDTH: u16 = 12;

// ============================================================================
// State
// ============================================================================

/// What the cursor is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Label of job `col`
    ColLabel(usize),
    /// Label of employee `row`
    RowLabel(usize),
    /// Cost cell
    Cell(usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// One-line message shown under the editor
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Stay,
    Calculate,
    Quit,
}

/// Editor state: the session plus cursor and overlay state
pub struct EditorState {
    pub session: Session,
    /// Grid position: row 0 holds the job labels, column 0 the employee labels
    pub cursor: (usize, usize),
    pub show_quit_confirm: bool,
    pub status: Option<StatusMessage>,
    pub solver_url: String,
}

impl EditorState {
    pub fn new(session: Session, solver_url: impl Into<String>) -> Self {
        Self {
            session,
            cursor: (1, 1),
            show_quit_confirm: false,
            status: None,
            solver_url: solver_url.into(),
        }
    }

    pub fn focus(&self) -> Focus {
        match self.cursor {
            (0, col) => Focus::ColLabel(col.saturating_sub(1)),
            (row, 0) => Focus::RowLabel(row - 1),
            (row, col) => Focus::Cell(row - 1, col - 1),
        }
    }

    /// Text under the cursor
    pub fn focused_text(&self) -> String {
        match self.focus() {
            Focus::ColLabel(col) => self.session.col_labels().get(col).cloned().unwrap_or_default(),
            Focus::RowLabel(row) => self.session.row_labels().get(row).cloned().unwrap_or_default(),
            Focus::Cell(row, col) => self.session.cell(row, col).unwrap_or("").to_string(),
        }
    }

    fn set_focused_text(&mut self, text: &str) {
        match self.focus() {
            Focus::ColLabel(col) => self.session.set_col_label(col, text),
            Focus::RowLabel(row) => self.session.set_row_label(row, text),
            Focus::Cell(row, col) => self.session.set_cell(row, col, text),
        };
    }

    fn move_to(&mut self, row: usize, col: usize) {
        let row = row.min(self.session.rows());
        let col = col.min(self.session.cols());
        // The top-left corner has nothing to edit
        if (row, col) != (0, 0) {
            self.cursor = (row, col);
        }
    }

    fn move_next(&mut self) {
        let (row, col) = self.cursor;
        if col < self.session.cols() {
            self.move_to(row, col + 1);
        } else if row < self.session.rows() {
            self.move_to(row + 1, 0);
        }
    }

    fn move_prev(&mut self) {
        let (row, col) = self.cursor;
        if col > 0 {
            self.move_to(row, col - 1);
        } else if row > 0 {
            self.move_to(row - 1, self.session.cols());
        }
    }

    fn type_char(&mut self, c: char) {
        let mut text = self.focused_text();
        let accepted = match self.focus() {
            Focus::Cell(..) => {
                (c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
                    && text.chars().count() < MAX_CELL_LEN
            }
            Focus::RowLabel(_) | Focus::ColLabel(_) => {
                !c.is_control() && text.chars().count() < MAX_LABEL_LEN
            }
        };
        if accepted {
            text.push(c);
            self.set_focused_text(&text);
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return EditorAction::Quit;
        }

        // Quit confirmation overlay takes every key while shown
        if self.show_quit_confirm {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => return EditorAction::Quit,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.show_quit_confirm = false;
                }
                _ => {}
            }
            return EditorAction::Stay;
        }

        let (row, col) = self.cursor;
        match key.code {
            KeyCode::Esc => self.show_quit_confirm = true,
            KeyCode::Up => self.move_to(row.saturating_sub(1), col),
            KeyCode::Down | KeyCode::Enter => self.move_to(row + 1, col),
            KeyCode::Left => self.move_to(row, col.saturating_sub(1)),
            KeyCode::Right => self.move_to(row, col + 1),
            KeyCode::Tab => self.move_next(),
            KeyCode::BackTab => self.move_prev(),
            KeyCode::Backspace => {
                let mut text = self.focused_text();
                text.pop();
                self.set_focused_text(&text);
            }
            KeyCode::Delete => self.set_focused_text(""),
            KeyCode::F(5) => return EditorAction::Calculate,
            KeyCode::F(6) => {
                let mode = self.session.mode().toggled();
                self.session.set_mode(mode);
                self.status = Some(StatusMessage::new(
                    StatusKind::Info,
                    format!("Mode: {}", mode.label()),
                ));
            }
            KeyCode::F(9) => {
                self.session.reset();
                self.cursor = (1, 1);
                self.status = Some(StatusMessage::new(StatusKind::Info, "Matrix cleared"));
            }
            KeyCode::Char(c) => self.type_char(c),
            _ => {}
        }
        EditorAction::Stay
    }

    /// Validate and issue a calculation. Validation failures become the status line.
    pub fn start_calculation(&mut self) -> Option<Calculation> {
        match self.session.begin_calculation() {
            Ok(calculation) => {
                self.status = Some(StatusMessage::new(
                    StatusKind::Info,
                    format!("Calculating ({})...", self.session.mode()),
                ));
                Some(calculation)
            }
            Err(err) => {
                self.status = Some(StatusMessage::new(StatusKind::Error, err.to_string()));
                None
            }
        }
    }

    /// Take in the outcome of a calculation
    pub fn finish_calculation(
        &mut self,
        calculation: Calculation,
        outcome: Result<SolverResponse, GatewayError>,
    ) {
        match outcome {
            Ok(response) => {
                if self.session.apply_response(calculation, response) {
                    let status = if self.session.active_assignment().is_some() {
                        StatusMessage::new(
                            StatusKind::Success,
                            format!(
                                "{} ready. Total: {}",
                                self.session.mode().label(),
                                self.session.report().formatted_total()
                            ),
                        )
                    } else {
                        StatusMessage::new(
                            StatusKind::Error,
                            format!(
                                "The solver returned no {}",
                                self.session.mode().label().to_lowercase()
                            ),
                        )
                    };
                    self.status = Some(status);
                }
            }
            Err(err) => {
                if self.session.fail_calculation(&calculation) {
                    self.status = Some(StatusMessage::new(StatusKind::Error, err.to_string()));
                }
            }
        }
    }
}

// ============================================================================
// Terminal Setup/Teardown
// ============================================================================

/// Setup terminal for TUI rendering with panic-safe cleanup
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    // Install panic hook for clean terminal restoration
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        teardown_terminal();
        original_hook(panic_info);
    }));

    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
}

// ============================================================================
// Entry Point
// ============================================================================

type Outcome = (Calculation, Result<SolverResponse, GatewayError>);

/// Run the editor until the user quits. Returns the final session.
pub fn run_editor(
    session: Session,
    gateway: Arc<dyn SolverGateway + Send + Sync>,
    solver_url: &str,
) -> Result<Session> {
    let mut state = EditorState::new(session, solver_url);

    let mut terminal = setup_terminal()?;
    let result = run_editor_loop(&mut terminal, &mut state, gateway);
    teardown_terminal();

    result.map(|_| state.session)
}

fn run_editor_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut EditorState,
    gateway: Arc<dyn SolverGateway + Send + Sync>,
) -> Result<()> {
    let (tx, rx) = mpsc::channel::<Outcome>();

    loop {
        while let Ok((calculation, outcome)) = rx.try_recv() {
            state.finish_calculation(calculation, outcome);
        }

        terminal.draw(|f| render_editor(f, state))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Only handle key press events, not release
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match state.handle_key(key) {
            EditorAction::Calculate => {
                if let Some(calculation) = state.start_calculation() {
                    let tx = tx.clone();
                    let gateway = Arc::clone(&gateway);
                    std::thread::spawn(move || {
                        let outcome = gateway.solve(&calculation.request);
                        // The editor may have quit already; nothing to report to then
                        let _ = tx.send((calculation, outcome));
                    });
                }
            }
            EditorAction::Quit => return Ok(()),
            EditorAction::Stay => {}
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn centered_fixed_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn render_editor(f: &mut Frame, state: &EditorState) {
    let area = f.area();
    let matrix_height = (state.session.rows() as u16 + 4).min(area.height / 2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(matrix_height),
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_title(f, chunks[0]);
    render_matrix(f, chunks[1], state);
    render_mode(f, chunks[2], state);
    render_results(f, chunks[3], state);
    render_status(f, chunks[4], state);
    render_help_bar(f, chunks[5]);

    if state.show_quit_confirm {
        render_quit_confirm_overlay(f);
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled("∑ ", Style::default().fg(Color::Magenta).bold()),
        Span::styled("Hungaro", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            " · Hungarian assignment editor",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), area);
}

fn render_matrix(f: &mut Frame, area: Rect, state: &EditorState) {
    let session = &state.session;
    let assignment = session.active_assignment();
    let cursor_style = Style::default().fg(Color::Black).bg(Color::Cyan).bold();
    let assigned_style = Style::default().fg(Color::Black).bg(Color::LightGreen);

    let mut header = vec![Cell::from("")];
    header.extend(session.col_labels().iter().enumerate().map(|(j, label)| {
        let cell = label_cell(label, &format!("Col {}", j + 1));
        if state.cursor == (0, j + 1) {
            cell.style(cursor_style)
        } else {
            cell.style(Style::default().bold())
        }
    }));

    let rows: Vec<Row> = (0..session.rows())
        .map(|i| {
            let label = session.row_labels().get(i).map(String::as_str).unwrap_or("");
            let name = label_cell(label, &format!("Row {}", i + 1));
            let mut cells = vec![if state.cursor == (i + 1, 0) {
                name.style(cursor_style)
            } else {
                name.style(Style::default().bold())
            }];

            cells.extend((0..session.cols()).map(|j| {
                let text = session.cell(i, j).unwrap_or("").to_string();
                let cell = Cell::from(text);
                if state.cursor == (i + 1, j + 1) {
                    cell.style(cursor_style)
                } else if assignment.and_then(|a| a.column_for(i)) == Some(j) {
                    cell.style(assigned_style)
                } else {
                    cell
                }
            }));
            Row::new(cells)
        })
        .collect();

    let widths = vec![Constraint::Length(COLUMN_WIDTH); session.cols() + 1];
    let title = format!(
        " Cost matrix · {} employee(s) x {} job(s) ",
        session.rows(),
        session.cols()
    );
    let table = Table::new(rows, widths)
        .header(Row::new(header))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title),
        );
    f.render_widget(table, area);
}

fn label_cell(label: &str, placeholder: &str) -> Cell<'static> {
    if label.is_empty() {
        Cell::from(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Cell::from(label.to_string())
    }
}

fn render_mode(f: &mut Frame, area: Rect, state: &EditorState) {
    let mode = state.session.mode();
    let mut spans = vec![
        Span::styled("  Mode: ", Style::default().fg(Color::DarkGray)),
        Span::styled(mode.label(), Style::default().fg(Color::Yellow).bold()),
    ];
    if state.session.is_pending() {
        spans.push(Span::styled(
            "  · waiting for solver",
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans.push(Span::styled(
        format!("  · {}", state.solver_url),
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_results(f: &mut Frame, area: Rect, state: &EditorState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    render_reduced(f, columns[0], state);
    render_report(f, right[0], state);
    render_chart(f, right[1], state);
}

fn render_reduced(f: &mut Frame, area: Rect, state: &EditorState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Reduced matrix ");

    let reduced = match state.session.displayed_reduced() {
        Some(reduced) if reduced.has_nonzero() => reduced,
        _ => {
            let paragraph = Paragraph::new(Span::styled(
                "Press F5 to calculate",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center)
            .block(block);
            f.render_widget(paragraph, area);
            return;
        }
    };

    let assignment = state.session.active_assignment();
    let row_labels = state.session.row_labels();
    let col_labels = state.session.col_labels();
    let size = reduced.size();

    let mut header = vec![Cell::from("")];
    header.extend((0..size).map(|j| Cell::from(job_name(col_labels, j)).style(Style::default().bold())));

    let rows: Vec<Row> = reduced
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut cells =
                vec![Cell::from(employee_name(row_labels, i)).style(Style::default().bold())];
            cells.extend(row.iter().enumerate().map(|(j, &value)| {
                let cell = Cell::from(format_value(value));
                if assignment.and_then(|a| a.column_for(i)) == Some(j) {
                    cell.style(Style::default().fg(Color::Black).bg(Color::LightGreen))
                } else {
                    cell
                }
            }));
            Row::new(cells)
        })
        .collect();

    let widths = vec![Constraint::Length(COLUMN_WIDTH); size + 1];
    let table = Table::new(rows, widths).header(Row::new(header)).block(block);
    f.render_widget(table, area);
}

fn render_report(f: &mut Frame, area: Rect, state: &EditorState) {
    let mode = state.session.mode();
    let report = state.session.report();
    let title = format!(
        " {} ({}: {}) ",
        mode.label(),
        mode.total_caption(),
        report.formatted_total()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(title);

    if state.session.active_assignment().is_none() {
        let paragraph = Paragraph::new(Span::styled(
            "No assignment yet",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let mut items: Vec<ListItem> = report
        .lines()
        .into_iter()
        .map(|line| ListItem::new(format!("• {}", line)))
        .collect();
    items.push(ListItem::new(Line::from(Span::styled(
        format!("Total: {}", report.formatted_total()),
        Style::default().fg(Color::Green).bold(),
    ))));

    f.render_widget(List::new(items).block(block), area);
}

fn render_chart(f: &mut Frame, area: Rect, state: &EditorState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Assignment costs ");

    let chart = state.session.chart();
    if chart.is_empty() {
        let paragraph = Paragraph::new(Span::styled(
            "No data to chart",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let bars: Vec<Bar> = chart
        .iter()
        .map(|bar| {
            let (r, g, b) = bar.rgb();
            Bar::default()
                .value((bar.value * 100.0).round() as u64)
                .text_value(format_value(bar.value))
                .label(Line::from(bar.label.clone()))
                .style(Style::default().fg(Color::Rgb(r, g, b)))
        })
        .collect();

    let barchart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(COLUMN_WIDTH - 4)
        .bar_gap(2);
    f.render_widget(barchart, area);
}

fn render_status(f: &mut Frame, area: Rect, state: &EditorState) {
    let Some(status) = &state.status else {
        return;
    };
    let color = match status.kind {
        StatusKind::Info => Color::Cyan,
        StatusKind::Success => Color::Green,
        StatusKind::Error => Color::Red,
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("  {}", status.text),
            Style::default().fg(color),
        )),
        area,
    );
}

/// Render help bar with the editor shortcuts
fn render_help_bar(f: &mut Frame, area: Rect) {
    let shortcuts = [
        ("Arrows/Tab", " move  "),
        ("Type", " edit  "),
        ("F5", " calculate  "),
        ("F6", " min/max  "),
        ("F9", " reset  "),
        ("Esc", " quit"),
    ];
    let spans: Vec<Span> = shortcuts
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(*key, Style::default().fg(Color::Cyan)),
                Span::styled(*action, Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Render quit confirmation overlay
fn render_quit_confirm_overlay(f: &mut Frame) {
    let popup = centered_fixed_rect(40, 7, f.area());
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Quit Editor? ")
        .title_alignment(Alignment::Center);

    let text = vec![
        Line::from(""),
        Line::from("Unsaved edits will be lost."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Y", Style::default().fg(Color::Red).bold()),
            Span::raw(" quit   "),
            Span::styled("N", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" keep editing"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(paragraph, popup);
}
