//! Settlement of a finished player hand against the dealer's final hand.
//!
//! Every win pays even money, a player blackjack included, and a player blackjack only pushes when the dealer
//! also finishes on 21 (by any number of cards). Surrendering forfeits the whole bet.

use crate::hand::Standing;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win,
    Lose,
    Push,
}

/// Why a hand settled the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Reason {
    Surrender,
    Bust,
    Blackjack,
    BlackjackPush,
    DealerBust,
    DealerBlackjack,
    HigherTotal,
    EqualTotal,
    LowerTotal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub outcome: Outcome,
    pub reason: Reason,
}

impl Settlement {
    fn new(outcome: Outcome, reason: Reason) -> Settlement {
        Settlement { outcome, reason }
    }

    /// Returns `money` after paying out or collecting `bet`. A loss never takes money below zero,
    /// a doubled or split stake can exceed what the player holds.
    pub fn apply(&self, money: u64, bet: u64) -> u64 {
        match self.outcome {
            Outcome::Win => money + bet,
            Outcome::Lose => money.saturating_sub(bet),
            Outcome::Push => money,
        }
    }
}

/// Decides a player hand against the dealer's hand. Total over every combination of inputs.
pub fn settle(player: Standing, dealer: Standing) -> Settlement {
    if player.surrendered {
        return Settlement::new(Outcome::Lose, Reason::Surrender);
    }
    // A busted hand loses even when the dealer busts too
    if player.busted {
        return Settlement::new(Outcome::Lose, Reason::Bust);
    }
    if player.blackjack {
        return if dealer.blackjack {
            Settlement::new(Outcome::Push, Reason::BlackjackPush)
        } else {
            Settlement::new(Outcome::Win, Reason::Blackjack)
        };
    }
    if dealer.busted {
        return Settlement::new(Outcome::Win, Reason::DealerBust);
    }
    if dealer.blackjack {
        return Settlement::new(Outcome::Lose, Reason::DealerBlackjack);
    }

    match player.value.cmp(&dealer.value) {
        std::cmp::Ordering::Greater => Settlement::new(Outcome::Win, Reason::HigherTotal),
        std::cmp::Ordering::Equal => Settlement::new(Outcome::Push, Reason::EqualTotal),
        std::cmp::Ordering::Less => Settlement::new(Outcome::Lose, Reason::LowerTotal),
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Reason::Surrender => "surrendered",
            Reason::Bust => "busted",
            Reason::Blackjack => "blackjack",
            Reason::BlackjackPush => "blackjack against dealer 21",
            Reason::DealerBust => "dealer busts",
            Reason::DealerBlackjack => "dealer has 21",
            Reason::HigherTotal => "higher total",
            Reason::EqualTotal => "equal totals",
            Reason::LowerTotal => "dealer wins",
        };
        write!(f, "{}", text)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Lose => write!(f, "lose"),
            Outcome::Push => write!(f, "push"),
        }
    }
}
