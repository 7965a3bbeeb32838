use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;
use strum::IntoEnumIterator;

use crate::action::Action;
use crate::error::Result;
use crate::models::{remaining_budget, Category};
use crate::route::{Route, Router};
use crate::state::{ActiveField, InputMode, State};
use crate::tui::{self, Tui};

/// Format an amount as currency with thousands grouping
/// (e.g., 1234.5 -> "$1,234.50", -50 -> "-$50.00")
fn format_currency(amount: f64) -> String {
    let is_negative = amount < 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let whole: String = grouped.chars().rev().collect();

    if is_negative {
        format!("-${whole}.{cents}")
    } else {
        format!("${whole}.{cents}")
    }
}

pub fn format_total_expenses(value: f64) -> String {
    format!("Total Expenses: {}", format_currency(value))
}

pub fn format_remaining_budget(value: f64) -> String {
    format!("Remaining Budget: {}", format_currency(value))
}

/// Main application struct
pub struct App {
    router: Router,
    state: State,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            state: State::new(),
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = tui::restore();
            original_hook(panic_info);
        }));

        let mut terminal = tui::init()?;
        let result = self.run_loop(&mut terminal);
        tui::restore()?;
        result
    }

    fn run_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            self.draw(terminal)?;
            if let Some(action) = self.handle_events()? {
                self.update(action)?;
            }
        }
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Tui) -> Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        self.draw_title_bar(frame, layout[0]);
        match self.router.current() {
            Route::Entry => self.draw_entry(frame, layout[1]),
            Route::Summary {
                budget,
                total_expenses,
            } => self.draw_summary(frame, layout[1], budget, total_expenses),
        }
        self.draw_footer(frame, layout[2]);

        if self.state.show_help {
            self.draw_help_overlay(frame, area);
        }
    }

    fn draw_title_bar(&self, frame: &mut Frame, area: Rect) {
        let (title, hint) = match self.router.current() {
            Route::Entry => ("BUDGET TRACKER", ""),
            Route::Summary { .. } => ("SUMMARY", "  (Esc to go back)"),
        };

        let bar = Paragraph::new(Line::from(vec![
            Span::styled(
                title,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(hint, Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

        frame.render_widget(bar, area);
    }

    fn field_style(&self, field: ActiveField) -> Style {
        if self.state.active_field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    }

    fn draw_entry(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Add Expense ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(10),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let budget_input = Paragraph::new(placeholder_or(
            &self.state.form.budget_input,
            "Enter your starting budget",
        ))
        .style(self.field_style(ActiveField::Budget))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Starting Budget "),
        );
        frame.render_widget(budget_input, layout[0]);

        let price_input = Paragraph::new(placeholder_or(
            &self.state.form.price_input,
            "Enter your item's price",
        ))
        .style(self.field_style(ActiveField::Price))
        .block(Block::default().borders(Borders::ALL).title(" Item Price "));
        frame.render_widget(price_input, layout[1]);

        let cat_items: Vec<ListItem> = Category::iter()
            .enumerate()
            .map(|(i, c)| {
                let selected = self.state.form.selected_category == Some(i);
                let style = if selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let prefix = if selected { "> " } else { "  " };
                ListItem::new(format!("{prefix}{c}")).style(style)
            })
            .collect();

        let cat_title = match self.state.form.category() {
            Some(c) => format!(" Category: {c} "),
            None => " Category: Select a category ".to_string(),
        };
        let cat_list = List::new(cat_items)
            .style(self.field_style(ActiveField::Category))
            .block(Block::default().borders(Borders::ALL).title(cat_title));
        frame.render_widget(cat_list, layout[2]);

        let marker = if self.state.form.recurring {
            "[x]"
        } else {
            "[ ]"
        };
        let recurring = Paragraph::new(format!("Recurring expense {marker}"))
            .style(self.field_style(ActiveField::Recurring));
        frame.render_widget(recurring, layout[3]);

        let instructions = Paragraph::new(
            "Tab: next field | i: type | Up/Down: category | Space: toggle | Enter: add expense",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(instructions, layout[4]);
    }

    fn draw_summary(&self, frame: &mut Frame, area: Rect, budget: f64, total_expenses: f64) {
        let remaining = remaining_budget(budget, total_expenses);
        let remaining_color = if remaining < 0.0 {
            Color::Red
        } else {
            Color::Green
        };

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Summary",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format_total_expenses(total_expenses),
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format_remaining_budget(remaining),
                Style::default().fg(remaining_color),
            )),
        ];

        let card = centered_rect(60, 50, area);
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));

        frame.render_widget(Clear, card);
        frame.render_widget(paragraph, card);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let mode_str = match self.state.input_mode {
            InputMode::Normal => "NORMAL",
            InputMode::Insert => "INSERT",
        };

        let status = self.state.status_message.clone().unwrap_or_else(|| {
            match self.router.current() {
                Route::Entry => "Ready",
                Route::Summary { .. } => "Esc to go back",
            }
            .to_string()
        });

        let footer_text = Line::from(vec![
            Span::styled(
                format!(" {} ", mode_str),
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(status, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled("? for Help", Style::default().fg(Color::DarkGray)),
        ]);

        let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
    }

    fn draw_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_text = vec![
            Line::from("Entry screen:"),
            Line::from("  Tab/Shift+Tab  Next/previous field"),
            Line::from("  i              Enter insert mode"),
            Line::from("  Esc            Exit insert mode"),
            Line::from("  Up/Down        Pick a category"),
            Line::from("  Space          Toggle recurring expense"),
            Line::from("  Enter          Add expense"),
            Line::from(""),
            Line::from("Summary screen:"),
            Line::from("  Esc/Backspace  Back to the entry screen"),
            Line::from(""),
            Line::from("General:"),
            Line::from("  ?              Toggle help"),
            Line::from("  q              Quit application"),
        ];

        let help_block = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .style(Style::default().bg(Color::DarkGray)),
            )
            .alignment(Alignment::Left);

        let popup_area = centered_rect(50, 60, area);
        frame.render_widget(Clear, popup_area);
        frame.render_widget(help_block, popup_area);
    }

    fn handle_events(&mut self) -> Result<Option<Action>> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(None);
                }
                return Ok(self.map_key(key));
            }
        }
        Ok(None)
    }

    fn map_key(&self, key: event::KeyEvent) -> Option<Action> {
        if key.code == KeyCode::Char('q') && self.state.input_mode == InputMode::Normal {
            return Some(Action::Quit);
        }
        if key.code == KeyCode::Char('?') && self.state.input_mode == InputMode::Normal {
            return Some(Action::ToggleHelp);
        }

        match self.router.current() {
            Route::Summary { .. } => self.map_summary_key(key),
            Route::Entry => match self.state.input_mode {
                InputMode::Normal => self.map_entry_normal_key(key),
                InputMode::Insert => self.map_entry_insert_key(key),
            },
        }
    }

    fn map_summary_key(&self, key: event::KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Some(Action::Back),
            _ => None,
        }
    }

    fn map_entry_normal_key(&self, key: event::KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    Some(Action::PrevField)
                } else {
                    Some(Action::NextField)
                }
            }
            KeyCode::BackTab => Some(Action::PrevField),
            KeyCode::Char('i') => Some(Action::EnterInsert),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
            KeyCode::Char(' ') => Some(Action::ToggleRecurring),
            KeyCode::Enter => Some(Action::Submit),
            _ => None,
        }
    }

    fn map_entry_insert_key(&self, key: event::KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::EnterNormal),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Tab => Some(Action::NextField),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Up => Some(Action::Up),
            KeyCode::Down => Some(Action::Down),
            KeyCode::Char(c) => Some(Action::InputChar(c)),
            _ => None,
        }
    }

    pub fn update(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::ToggleHelp => {
                self.state.show_help = !self.state.show_help;
            }
            Action::EnterInsert => {
                if self.state.active_field.is_text() {
                    self.state.input_mode = InputMode::Insert;
                }
            }
            Action::EnterNormal => {
                self.state.input_mode = InputMode::Normal;
            }
            Action::NextField => {
                self.state.active_field = self.state.active_field.next();
            }
            Action::PrevField => {
                self.state.active_field = self.state.active_field.prev();
            }
            Action::InputChar(c) => {
                if c.is_ascii_digit() || c == '.' {
                    match self.state.active_field {
                        ActiveField::Budget => self.state.form.budget_input.push(c),
                        ActiveField::Price => self.state.form.price_input.push(c),
                        _ => {}
                    }
                }
            }
            Action::InputBackspace => match self.state.active_field {
                ActiveField::Budget => {
                    self.state.form.budget_input.pop();
                }
                ActiveField::Price => {
                    self.state.form.price_input.pop();
                }
                _ => {}
            },
            Action::Up => {
                if self.state.active_field == ActiveField::Category {
                    self.state.form.select_prev_category();
                }
            }
            Action::Down => {
                if self.state.active_field == ActiveField::Category {
                    self.state.form.select_next_category();
                }
            }
            Action::ToggleRecurring => {
                if self.state.active_field == ActiveField::Recurring {
                    self.state.form.toggle_recurring();
                    self.state.set_status(if self.state.form.recurring {
                        "Recurring expense on"
                    } else {
                        "Recurring expense off"
                    });
                }
            }
            Action::Submit => {
                if self.router.current() == Route::Entry {
                    let payload = self.state.form.payload();
                    self.router.navigate(Route::summary(payload))?;
                    self.state.input_mode = InputMode::Normal;
                    self.state.clear_status();
                }
            }
            Action::Back => {
                if self.router.back() {
                    self.state.form.reset();
                    self.state.active_field = ActiveField::default();
                    self.state.input_mode = InputMode::Normal;
                    self.state.clear_status();
                }
            }
        }
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn placeholder_or<'a>(content: &'a str, placeholder: &'a str) -> Line<'a> {
    if content.is_empty() {
        Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(content)
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    fn type_chars(app: &mut App, text: &str) {
        for c in text.chars() {
            app.update(Action::InputChar(c)).unwrap();
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(450.0), "$450.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-50.0), "-$50.00");
        assert_eq!(format_currency(1000000.0), "$1,000,000.00");
    }

    #[test]
    fn test_format_labels() {
        assert_eq!(format_total_expenses(450.0), "Total Expenses: $450.00");
        assert_eq!(
            format_remaining_budget(-50.0),
            "Remaining Budget: -$50.00"
        );
    }

    #[test]
    fn test_submit_carries_payload_to_summary() {
        let mut app = App::new();
        type_chars(&mut app, "1000");
        app.update(Action::NextField).unwrap();
        type_chars(&mut app, "450");
        app.update(Action::NextField).unwrap();
        app.update(Action::Down).unwrap();
        assert_eq!(app.state.form.category(), Some(Category::Food));

        app.update(Action::Submit).unwrap();
        let Route::Summary {
            budget,
            total_expenses,
        } = app.router.current()
        else {
            panic!("expected the summary route");
        };
        assert_eq!(budget, 1000.0);
        assert_eq!(total_expenses, 450.0);
        assert_eq!(remaining_budget(budget, total_expenses), 550.0);
    }

    #[test]
    fn test_submit_with_empty_budget_defaults_to_zero() {
        let mut app = App::new();
        app.update(Action::NextField).unwrap();
        type_chars(&mut app, "20");
        app.update(Action::Submit).unwrap();

        let Route::Summary {
            budget,
            total_expenses,
        } = app.router.current()
        else {
            panic!("expected the summary route");
        };
        assert_eq!(budget, 0.0);
        assert_eq!(total_expenses, 20.0);
        assert_eq!(remaining_budget(budget, total_expenses), -20.0);
    }

    #[test]
    fn test_input_filter_rejects_non_numeric_chars() {
        let mut app = App::new();
        type_chars(&mut app, "1a2b.5");
        assert_eq!(app.state.form.budget_input, "12.5");

        app.update(Action::InputBackspace).unwrap();
        assert_eq!(app.state.form.budget_input, "12.");
    }

    #[test]
    fn test_submit_on_summary_does_not_stack_routes() {
        let mut app = App::new();
        app.update(Action::Submit).unwrap();
        let on_summary = app.router.current();
        app.update(Action::Submit).unwrap();
        assert_eq!(app.router.current(), on_summary);
        assert!(app.router.back());
        assert!(!app.router.back());
    }

    #[test]
    fn test_back_resets_the_entry_form() {
        let mut app = App::new();
        type_chars(&mut app, "1000");
        app.update(Action::NextField).unwrap();
        type_chars(&mut app, "450");
        app.update(Action::NextField).unwrap();
        app.update(Action::Down).unwrap();
        app.update(Action::NextField).unwrap();
        app.update(Action::ToggleRecurring).unwrap();
        app.update(Action::Submit).unwrap();

        app.update(Action::Back).unwrap();
        assert_eq!(app.router.current(), Route::Entry);
        assert!(app.state.form.budget_input.is_empty());
        assert!(app.state.form.price_input.is_empty());
        assert_eq!(app.state.form.selected_category, None);
        assert!(!app.state.form.recurring);
        assert_eq!(app.state.active_field, ActiveField::Budget);
    }

    #[test]
    fn test_recurring_toggle_requires_focus() {
        let mut app = App::new();
        app.update(Action::ToggleRecurring).unwrap();
        assert!(!app.state.form.recurring);

        app.state.active_field = ActiveField::Recurring;
        app.update(Action::ToggleRecurring).unwrap();
        assert!(app.state.form.recurring);
        app.update(Action::ToggleRecurring).unwrap();
        assert!(!app.state.form.recurring);
    }

    #[test]
    fn test_insert_mode_only_on_text_fields() {
        let mut app = App::new();
        app.state.active_field = ActiveField::Category;
        app.update(Action::EnterInsert).unwrap();
        assert_eq!(app.state.input_mode, InputMode::Normal);

        app.state.active_field = ActiveField::Price;
        app.update(Action::EnterInsert).unwrap();
        assert_eq!(app.state.input_mode, InputMode::Insert);
        app.update(Action::EnterNormal).unwrap();
        assert_eq!(app.state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_quit_action() {
        let mut app = App::new();
        assert!(!app.should_quit);
        app.update(Action::Quit).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_entry_screen() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let app = App::new();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("BUDGET TRACKER"));
        assert!(text.contains("Starting Budget"));
        assert!(text.contains("Item Price"));
        assert!(text.contains("Select a category"));
        assert!(text.contains("Recurring expense [ ]"));
    }

    #[test]
    fn test_render_summary_with_negative_remaining_budget() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut app = App::new();
        type_chars(&mut app, "100");
        app.update(Action::NextField).unwrap();
        type_chars(&mut app, "150");
        app.update(Action::Submit).unwrap();

        terminal.draw(|frame| app.render(frame)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Total Expenses: $150.00"));
        assert!(text.contains("Remaining Budget: -$50.00"));
    }
}
