//! Table-independent building blocks for a console game of blackjack: ranks and their point values,
//! the shoe cards are drawn from, hands and their values, the settlement rules, and the console boundary
//! the game talks to its players through.

pub mod card;
pub mod console;
pub mod error;
pub mod hand;
pub mod settle;
pub mod shoe;

pub mod prelude {
    pub use crate::card::Rank;
    pub use crate::console::{Console, ScriptedConsole, StdConsole};
    pub use crate::error::{BlackjackGameError, InputError, RuleViolation};
    pub use crate::hand::{Hand, Standing};
    pub use crate::settle::{settle, Outcome, Reason, Settlement};
    pub use crate::shoe::{CardSource, Shoe, StackedDeck};
    pub use crate::{BLACKJACK, DEALER_STANDS_ON, NUM_DECKS, STARTING_MONEY};
}

pub use prelude::*;

/// Number of 52 card decks combined into a shoe.
pub const NUM_DECKS: usize = 6;

/// Money every player sits down with.
pub const STARTING_MONEY: u64 = 1000;

/// The dealer draws while their hand is below this value.
pub const DEALER_STANDS_ON: u32 = 17;

/// Target hand value.
pub const BLACKJACK: u32 = 21;
