use blackjack_lib::{CardSource, Hand, Rank, DEALER_STANDS_ON};
use log::debug;

/// Struct for the dealer's hand. The dealer never bets, splits, doubles or surrenders,
/// and plays by a fixed rule: draw on 16 or less, stand on 17 or more.
#[derive(Debug, Clone)]
pub struct Dealer {
    hand: Hand,
}

impl Dealer {
    pub fn new() -> Dealer {
        Dealer {
            hand: Hand::new(vec![]),
        }
    }

    /// Starts a new round with `cards`, discarding last round's hand.
    pub fn deal(&mut self, cards: Vec<Rank>) {
        self.hand = Hand::new(cards);
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Draws from `source` until the hand is worth at least 17, busting included. Returns the number of cards drawn.
    pub fn play(&mut self, source: &mut dyn CardSource) -> usize {
        let mut drawn = 0;
        while self.hand.value() < DEALER_STANDS_ON {
            let card = source.draw();
            debug!("dealer draws {card}");
            self.hand.add(card);
            drawn += 1;
        }
        self.hand.stand();
        drawn
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Dealer::new()
    }
}
