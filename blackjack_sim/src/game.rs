//! Module that runs a whole game of blackjack at the console: seats the players, plays rounds until every
//! player has been eliminated, and reports on the game at the end.

pub mod dealer;
pub mod player;
pub mod table;

pub mod prelude {
    pub use super::BlackjackGame;
    pub use crate::game::dealer::Dealer;
    pub use crate::game::player::{Decision, Player};
    pub use crate::game::table::Table;
    pub use blackjack_lib::{BlackjackGameError, CardSource, Console, Shoe};
}

pub use prelude::*;

use crate::report::GameSummary;
use crate::BlackjackGameConfig;
use blackjack_lib::{NUM_DECKS, STARTING_MONEY};
use log::info;

/// Struct for a game of blackjack between the dealer and any number of players sharing one console.
pub struct BlackjackGame<C: Console, S: CardSource = Shoe> {
    table: Table<S>,
    players: Vec<Player>,
    console: C,
    config: BlackjackGameConfig,
    summary: GameSummary,
}

impl<C: Console> BlackjackGame<C, Shoe> {
    /// Associated method for building a new game dealt from a freshly shuffled six deck shoe,
    /// seeded when `config` carries a seed. Asks the console for the number of players unless `config` sets it.
    pub fn new(config: BlackjackGameConfig, console: C) -> Result<Self, BlackjackGameError> {
        let shoe = match config.seed {
            Some(seed) => Shoe::seeded(NUM_DECKS, seed),
            None => Shoe::new(NUM_DECKS),
        };
        BlackjackGame::with_source(config, console, shoe)
    }
}

impl<C: Console, S: CardSource> BlackjackGame<C, S> {
    /// Associated method for building a new game dealt from `source`.
    pub fn with_source(
        config: BlackjackGameConfig,
        mut console: C,
        source: S,
    ) -> Result<Self, BlackjackGameError> {
        let num_players = match config.num_players {
            Some(n) if n > 0 => n,
            _ => Self::request_player_count(&mut console)?,
        };
        info!("seating {} players with {} each", num_players, STARTING_MONEY);
        let players = (1..=num_players)
            .map(|id| Player::new(id, STARTING_MONEY))
            .collect();

        Ok(BlackjackGame {
            table: Table::new(source),
            players,
            console,
            config,
            summary: GameSummary::default(),
        })
    }

    fn request_player_count(console: &mut C) -> Result<u32, BlackjackGameError> {
        let n = console.request_positive_integer(
            "How many players? Please enter an integer greater than 0.",
            Some(u32::MAX as u64),
        )?;
        Ok(n as u32)
    }

    /// Method that plays rounds for as long as at least one player has money left, pausing for the players between rounds.
    /// Returns the accumulated stats of the game.
    pub fn play(&mut self) -> Result<&GameSummary, BlackjackGameError> {
        while !self.players.is_empty() {
            let report = self
                .table
                .play_round(&mut self.players, &mut self.console)?;
            self.summary.record(&report);
            if self.config.json_reports {
                let json = serde_json::to_string(&report)?;
                self.console.display(&json)?;
            }
            self.console.display("")?;
            self.console
                .await_continue("Press ENTER to play the next round.")?;
        }

        info!("game over after {} rounds", self.summary.rounds);
        self.console.display("========== END OF GAME ==========")?;
        self.console.display("\tThanks for playing!")?;
        let stats = self.summary.to_string();
        self.console.display(&stats)?;
        Ok(&self.summary)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn table(&self) -> &Table<S> {
        &self.table
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn summary(&self) -> &GameSummary {
        &self.summary
    }
}
