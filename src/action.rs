/// Application actions representing all possible state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    // Core events
    Quit,

    // Input modes
    EnterInsert,
    EnterNormal,

    // Field focus
    NextField,
    PrevField,

    // Text input
    InputChar(char),
    InputBackspace,

    // Category picker
    Up,
    Down,

    // Recurring toggle
    ToggleRecurring,

    // Navigation
    Submit,
    Back,

    // UI toggles
    ToggleHelp,
}
