pub mod game;
pub mod report;

pub use game::prelude::*;
pub use report::{GameSummary, HandReport, RoundReport};

pub mod prelude {
    pub use super::{
        game::prelude::*, BlackjackGameConfig, BlackjackGameConfigBuilder, GameSummary,
        HandReport, RoundReport,
    };
}

/// Struct for configuring a `BlackjackGame`. The rules themselves are fixed, only how the game is run can be chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlackjackGameConfig {
    pub num_players: Option<u32>,
    pub seed: Option<u64>,
    pub json_reports: bool,
}

impl BlackjackGameConfig {
    /// Associated method for returning a new `BlackjackGameConfigBuilder` object.
    pub fn new() -> BlackjackGameConfigBuilder {
        BlackjackGameConfigBuilder {
            num_players: None,
            seed: None,
            json_reports: None,
        }
    }
}

impl Default for BlackjackGameConfig {
    /// Players are asked for at the console, the shoe is shuffled from entropy and no JSON is printed.
    fn default() -> Self {
        BlackjackGameConfig::new().build()
    }
}

/// Struct to implement builder pattern for `BlackjackGameConfig`
#[derive(Debug, Clone, Copy)]
pub struct BlackjackGameConfigBuilder {
    num_players: Option<u32>,
    seed: Option<u64>,
    json_reports: Option<bool>,
}

impl BlackjackGameConfigBuilder {
    /// Method for setting the number of players, when left unset the game asks for it at the console.
    pub fn num_players(&mut self, n: u32) -> &mut Self {
        self.num_players = Some(n);
        self
    }

    /// Method for seeding the shoe's shuffles so a game can be replayed.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    /// Method for setting a flag, if set to true a JSON `RoundReport` is displayed after every round.
    pub fn json_reports(&mut self, json: bool) -> &mut Self {
        self.json_reports = Some(json);
        self
    }

    /// Method for building a `BlackjackGameConfig` object from the given `BlackjackGameConfigBuilder` object.
    pub fn build(&mut self) -> BlackjackGameConfig {
        BlackjackGameConfig {
            num_players: self.num_players.filter(|&n| n > 0),
            seed: self.seed,
            json_reports: self.json_reports.unwrap_or(false),
        }
    }
}
