use strum::{Display, EnumIter, EnumString};

/// The closed set of expense categories offered on the entry screen.
///
/// A selection is captured as form state but does not feed into the
/// computed totals.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
)]
pub enum Category {
    Food,
    Transport,
    Education,
    Entertainment,
    #[strum(serialize = "Self-care")]
    SelfCare,
    Shopping,
    Bills,
    Others,
}

/// The pair handed across the navigation boundary when the entry form
/// is submitted. Moves by value; the summary screen owns its copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationPayload {
    pub budget: f64,
    pub total_expenses: f64,
}

/// Parse an amount field. Empty or malformed text is treated as zero;
/// no error reaches the user.
pub fn parse_amount(text: &str) -> f64 {
    text.trim().parse().unwrap_or(0.0)
}

/// Total expenses for one submission. Currently a single item's price.
pub fn total_expenses(price: f64) -> f64 {
    price
}

/// Remaining budget. Not clamped; overspending yields a negative value.
pub fn remaining_budget(budget: f64, total_expenses: f64) -> f64 {
    budget - total_expenses
}
