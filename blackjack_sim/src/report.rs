use blackjack_lib::{Outcome, Rank, Reason};
use serde::Serialize;
use std::fmt::Display;

/// How a single player hand settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandReport {
    pub player: u32,
    pub hand: usize,
    pub cards: Vec<Rank>,
    pub value: u32,
    pub bet: u64,
    pub outcome: Outcome,
    pub reason: Reason,
    pub delta: i64,
    pub money: u64,
}

/// Everything that was decided in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub round: u32,
    pub dealer_cards: Vec<Rank>,
    pub dealer_value: u32,
    pub hands: Vec<HandReport>,
    pub eliminated: Vec<u32>,
}

/// Totals accumulated over a whole game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSummary {
    pub rounds: u32,
    pub hands_won: u32,
    pub hands_pushed: u32,
    pub hands_lost: u32,
    pub player_blackjacks: u32,
    pub surrenders: u32,
    pub eliminated: Vec<u32>,
}

impl GameSummary {
    /// Adds the results of `report` to the running totals.
    pub fn record(&mut self, report: &RoundReport) {
        self.rounds += 1;
        for hand in report.hands.iter() {
            match hand.outcome {
                Outcome::Win => self.hands_won += 1,
                Outcome::Push => self.hands_pushed += 1,
                Outcome::Lose => self.hands_lost += 1,
            }
            match hand.reason {
                Reason::Blackjack | Reason::BlackjackPush => self.player_blackjacks += 1,
                Reason::Surrender => self.surrenders += 1,
                _ => {}
            }
        }
        self.eliminated.extend_from_slice(&report.eliminated);
    }

    pub fn hands_played(&self) -> u32 {
        self.hands_won + self.hands_pushed + self.hands_lost
    }
}

impl Display for GameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const width: usize = 80;
        const text_width: usize = "number of player blackjacks".len() + 20;
        const num_width: usize = width - text_width;
        let elimination_order = self
            .eliminated
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        write!(
            f,
            "{:-^width$}\n\
            {:<text_width$}{:>num_width$}\n\
            {:<text_width$}{:>num_width$}\n\
            {:<text_width$}{:>num_width$}\n\
            {:<text_width$}{:>num_width$}\n\
            {:<text_width$}{:>num_width$}\n\
            {:<text_width$}{:>num_width$}\n\
            {:<text_width$}{:>num_width$}\n\
            {:<text_width$}{:>num_width$}\n\
            {}",
            "stats",
            "rounds played",
            self.rounds,
            "hands played",
            self.hands_played(),
            "hands won",
            self.hands_won,
            "hands pushed",
            self.hands_pushed,
            "hands lost",
            self.hands_lost,
            "number of player blackjacks",
            self.player_blackjacks,
            "hands surrendered",
            self.surrenders,
            "players in elimination order",
            elimination_order,
            "-".repeat(width)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_report(outcome: Outcome, reason: Reason, delta: i64) -> HandReport {
        HandReport {
            player: 1,
            hand: 0,
            cards: vec![Rank::Ace, Rank::King],
            value: 21,
            bet: 10,
            outcome,
            reason,
            delta,
            money: 1000,
        }
    }

    #[test]
    fn summary_counts_outcomes() {
        let report = RoundReport {
            round: 1,
            dealer_cards: vec![Rank::Ten, Rank::Nine],
            dealer_value: 19,
            hands: vec![
                hand_report(Outcome::Win, Reason::Blackjack, 10),
                hand_report(Outcome::Lose, Reason::Surrender, -10),
                hand_report(Outcome::Push, Reason::EqualTotal, 0),
            ],
            eliminated: vec![2],
        };
        let mut summary = GameSummary::default();
        summary.record(&report);
        summary.record(&report);
        assert_eq!(summary.rounds, 2);
        assert_eq!(summary.hands_played(), 6);
        assert_eq!(summary.player_blackjacks, 2);
        assert_eq!(summary.surrenders, 2);
        assert_eq!(summary.eliminated, vec![2, 2]);

        let text = summary.to_string();
        assert!(text.lines().all(|line| line.len() == 80));
    }

    #[test]
    fn report_serializes_ranks_as_labels() {
        let report = RoundReport {
            round: 3,
            dealer_cards: vec![Rank::Queen, Rank::Seven],
            dealer_value: 17,
            hands: vec![hand_report(Outcome::Win, Reason::Blackjack, 10)],
            eliminated: vec![],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""dealer_cards":["Q","7"]"#));
        assert!(json.contains(r#""outcome":"Win""#));
        assert!(json.contains(r#""cards":["A","K"]"#));
    }
}
