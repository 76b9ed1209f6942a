use crate::card::Rank;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Capability handed to anything that needs fresh cards. Drawing never fails, a source is expected to refill itself.
pub trait CardSource {
    fn draw(&mut self) -> Rank;
}

impl<S: CardSource + ?Sized> CardSource for &mut S {
    fn draw(&mut self) -> Rank {
        (**self).draw()
    }
}

/// The permutation applied to a freshly built shoe.
pub type ShuffleFn = Box<dyn FnMut(&mut [Rank])>;

/// Struct for the shoe, `num_decks` decks of four suits worth of every rank.
/// Cards are drawn from the back, once the shoe is empty it is rebuilt from scratch and shuffled again.
pub struct Shoe {
    cards: Vec<Rank>,
    num_decks: usize,
    shuffle: ShuffleFn,
    refills: u32,
}

impl Shoe {
    /// Associated function to create a new `Shoe` shuffled with the thread local random number generator.
    pub fn new(num_decks: usize) -> Shoe {
        Shoe::with_shuffle(num_decks, |cards: &mut [Rank]| {
            cards.shuffle(&mut rand::thread_rng())
        })
    }

    /// Associated function to create a `Shoe` whose every shuffle comes from a ChaCha generator seeded with `seed`,
    /// two shoes built from the same seed deal identical sequences.
    pub fn seeded(num_decks: usize, seed: u64) -> Shoe {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Shoe::with_shuffle(num_decks, move |cards: &mut [Rank]| cards.shuffle(&mut rng))
    }

    /// Associated function to create a `Shoe` with a caller supplied `shuffle`.
    pub fn with_shuffle<F>(num_decks: usize, shuffle: F) -> Shoe
    where
        F: FnMut(&mut [Rank]) + 'static,
    {
        assert!(num_decks > 0, "a shoe needs at least one deck");
        let mut shoe = Shoe {
            cards: Vec::with_capacity(Shoe::composition_size(num_decks)),
            num_decks,
            shuffle: Box::new(shuffle),
            refills: 0,
        };
        shoe.refill();
        shoe
    }

    /// Number of cards in a full shoe of `num_decks` decks.
    pub fn composition_size(num_decks: usize) -> usize {
        4 * Rank::ALL.len() * num_decks
    }

    /// Number of cards left before the next refill.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Number of times the shoe has been rebuilt after running out.
    pub fn refills(&self) -> u32 {
        self.refills
    }

    fn refill(&mut self) {
        self.cards.clear();
        for _ in 0..4 * self.num_decks {
            self.cards.extend_from_slice(&Rank::ALL);
        }
        (self.shuffle)(self.cards.as_mut_slice());
    }
}

impl CardSource for Shoe {
    fn draw(&mut self) -> Rank {
        if self.cards.is_empty() {
            self.refill();
            self.refills += 1;
            debug!(
                "shoe exhausted, reshuffled {} decks (refill #{})",
                self.num_decks, self.refills
            );
        }
        let card = self.cards.pop().expect("a refilled shoe is never empty");
        trace!("drew {card}, {} cards left", self.cards.len());
        card
    }
}

/// A `CardSource` that deals a fixed sequence front to back, starting over when it reaches the end.
/// Used to replay known deals.
#[derive(Debug, Clone)]
pub struct StackedDeck {
    cards: Vec<Rank>,
    next: usize,
}

impl StackedDeck {
    /// Associated function to create a new `StackedDeck`, panics if `cards` is empty.
    pub fn new(cards: Vec<Rank>) -> StackedDeck {
        assert!(!cards.is_empty(), "a stacked deck needs at least one card");
        StackedDeck { cards, next: 0 }
    }

    /// Number of cards dealt so far.
    pub fn dealt(&self) -> usize {
        self.next
    }
}

impl CardSource for StackedDeck {
    fn draw(&mut self) -> Rank {
        let card = self.cards[self.next % self.cards.len()];
        self.next += 1;
        card
    }
}
