use strum::IntoEnumIterator;

use crate::models::{parse_amount, total_expenses, Category, NavigationPayload};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Insert,
}

/// Focusable field on the entry screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveField {
    #[default]
    Budget,
    Price,
    Category,
    Recurring,
}

impl ActiveField {
    pub fn next(&self) -> Self {
        match self {
            Self::Budget => Self::Price,
            Self::Price => Self::Category,
            Self::Category => Self::Recurring,
            Self::Recurring => Self::Budget,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Budget => Self::Recurring,
            Self::Price => Self::Budget,
            Self::Category => Self::Price,
            Self::Recurring => Self::Category,
        }
    }

    /// Whether the field accepts typed text.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Budget | Self::Price)
    }
}

/// Form state owned by the entry screen. Nothing here outlives the
/// screen; back navigation resets it wholesale.
#[derive(Debug, Default)]
pub struct EntryForm {
    /// Input buffer for the starting budget
    pub budget_input: String,
    /// Input buffer for the item price
    pub price_input: String,
    /// Index into the category list, none until the user picks one
    pub selected_category: Option<usize>,
    /// Recurring-expense toggle
    pub recurring: bool,
}

impl EntryForm {
    pub fn category(&self) -> Option<Category> {
        self.selected_category.and_then(|i| Category::iter().nth(i))
    }

    /// Move the category selection up. The first pick lands on the
    /// first entry; after that the last selection wins.
    pub fn select_prev_category(&mut self) {
        self.selected_category = Some(match self.selected_category {
            Some(i) => i.saturating_sub(1),
            None => 0,
        });
    }

    /// Move the category selection down.
    pub fn select_next_category(&mut self) {
        let last = Category::iter().count() - 1;
        self.selected_category = Some(match self.selected_category {
            Some(i) => (i + 1).min(last),
            None => 0,
        });
    }

    pub fn toggle_recurring(&mut self) {
        self.recurring = !self.recurring;
    }

    /// The numbers handed to the router on submit. The category and
    /// the recurring flag are captured above but do not feed in.
    pub fn payload(&self) -> NavigationPayload {
        NavigationPayload {
            budget: parse_amount(&self.budget_input),
            total_expenses: total_expenses(parse_amount(&self.price_input)),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Shared application state
#[derive(Debug, Default)]
pub struct State {
    /// Current input mode
    pub input_mode: InputMode,
    /// Which entry-screen field has focus
    pub active_field: ActiveField,
    /// The entry form
    pub form: EntryForm,
    /// Status message to display
    pub status_message: Option<String>,
    /// Whether to show the help overlay
    pub show_help: bool,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
