use crate::card::Rank;
use crate::BLACKJACK;
use serde::Serialize;
use std::fmt::Display;

/// A snapshot of everything settlement needs to know about a finished hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub value: u32,
    pub blackjack: bool,
    pub busted: bool,
    pub surrendered: bool,
}

/// Struct for a single hand of cards together with the bet riding on it and its status.
/// A hand is active while it is still being played, it goes inactive on a stand, bust, blackjack, double down or surrender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Rank>,
    bet: u64,
    surrendered: bool,
    active: bool,
}

impl Hand {
    /// Associated function to create a new active `Hand` holding `cards` with no bet placed yet.
    pub fn new(cards: Vec<Rank>) -> Hand {
        Hand {
            cards,
            bet: 0,
            surrendered: false,
            active: true,
        }
    }

    /// Computes the value of the hand. Aces start at 11 and are softened to 1, one at a time,
    /// only for as long as the hand would otherwise be over 21.
    pub fn value(&self) -> u32 {
        let mut total: u32 = self.cards.iter().map(|c| c.points()).sum();
        let mut soft_aces = self.cards.iter().filter(|c| c.is_ace()).count();
        while total > BLACKJACK && soft_aces > 0 {
            total -= 10;
            soft_aces -= 1;
        }
        total
    }

    /// Adds `card` to the hand, a hand that busts goes inactive immediately.
    pub fn add(&mut self, card: Rank) {
        self.cards.push(card);
        if self.is_busted() {
            self.active = false;
        }
    }

    pub fn is_blackjack(&self) -> bool {
        self.value() == BLACKJACK
    }

    pub fn is_busted(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// Exactly two cards of equal point value, so a ten and a king may be split.
    pub fn can_split(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].points() == self.cards[1].points()
    }

    /// Splits a pair. The second card moves to a new hand that is completed with `for_new_hand`,
    /// this hand keeps its first card and is completed with `replacement`. The new hand carries the same bet.
    pub fn split(&mut self, for_new_hand: Rank, replacement: Rank) -> Hand {
        debug_assert!(self.can_split());
        let mut new_hand = Hand::new(vec![self.cards[1], for_new_hand]);
        new_hand.bet = self.bet;
        self.cards[1] = replacement;
        new_hand
    }

    /// Marks the hand as finished without touching the cards.
    pub fn stand(&mut self) {
        self.active = false;
    }

    /// Forfeits the hand, it will lose its bet at settlement.
    pub fn surrender(&mut self) {
        self.surrendered = true;
        self.active = false;
    }

    /// Doubles the bet riding on the hand.
    pub fn double_bet(&mut self) {
        self.bet *= 2;
    }

    pub fn set_bet(&mut self, bet: u64) {
        self.bet = bet;
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn cards(&self) -> &[Rank] {
        &self.cards
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_surrendered(&self) -> bool {
        self.surrendered
    }

    pub fn standing(&self) -> Standing {
        Standing {
            value: self.value(),
            blackjack: self.is_blackjack(),
            busted: self.is_busted(),
            surrendered: self.surrendered,
        }
    }

    /// Formats the hand with every card after the first hidden, the way the dealer's hand is shown while players act.
    pub fn hole_card_hidden(&self) -> String {
        match self.cards.first() {
            Some(card) => format!("[{}, ?]", card),
            None => "[]".to_string(),
        }
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards = self
            .cards
            .iter()
            .map(|c| c.label())
            .collect::<Vec<&str>>()
            .join(", ");
        write!(f, "[{}]", cards)
    }
}
