use thiserror::Error;

/// Input that was read fine but is not an acceptable answer. Always recovered by asking again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a whole number")]
    NotAnInteger(String),
    #[error("{0} is not greater than 0")]
    NotPositive(i64),
    #[error("{value} is more than {max}")]
    AboveLimit { value: u64, max: u64 },
    #[error("'{input}' is not one of {allowed}")]
    NotAllowed { input: String, allowed: String },
}

/// A decision the rules do not allow for the hand it was made on. The hand is left untouched and the player decides again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("not enough money to {action}: {available} available, {required} needed")]
    InsufficientFunds {
        action: &'static str,
        available: u64,
        required: u64,
    },
    #[error("can't split {hand}")]
    CannotSplit { hand: String },
    #[error("can't {decision} a hand of {cards} cards")]
    NotOffered { decision: &'static str, cards: usize },
    #[error("there is no hand {idx}")]
    NoSuchHand { idx: usize },
}

/// Errors that end the game. These only come from the console channel failing, never from play itself.
#[derive(Error, Debug)]
pub enum BlackjackGameError {
    #[error("console input closed")]
    InputClosed,
    #[error("console i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to encode round report: {0}")]
    Report(#[from] serde_json::Error),
}
