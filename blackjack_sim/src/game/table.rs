use crate::game::dealer::Dealer;
use crate::game::player::Player;
use crate::report::{HandReport, RoundReport};
use blackjack_lib::{BlackjackGameError, CardSource, Console, Outcome};
use log::info;

/// Struct for the table, owns the card source and the dealer and runs one round at a time for the players seated at it.
pub struct Table<S: CardSource> {
    source: S,
    dealer: Dealer,
    rounds: u32,
}

impl<S: CardSource> Table<S> {
    /// Associated function to create a new `Table` dealing from `source`.
    pub fn new(source: S) -> Table<S> {
        Table {
            source,
            dealer: Dealer::new(),
            rounds: 0,
        }
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    /// Number of rounds started at this table.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Deals two fresh cards to the dealer, then two to each player. Every player starts the round with exactly one hand.
    pub fn deal(&mut self, players: &mut [Player]) {
        let dealer_cards = vec![self.source.draw(), self.source.draw()];
        self.dealer.deal(dealer_cards);
        for player in players.iter_mut() {
            player.deal(vec![self.source.draw(), self.source.draw()]);
        }
    }

    /// Plays one full round: deal, bets, every player's turn, the dealer's turn, settlement, and finally
    /// removes every player left without money. Returns what happened in a `RoundReport`.
    pub fn play_round<C: Console>(
        &mut self,
        players: &mut Vec<Player>,
        console: &mut C,
    ) -> Result<RoundReport, BlackjackGameError> {
        self.rounds += 1;
        info!("round {} starting with {} players", self.rounds, players.len());
        console.display("===== Start of Round =====")?;
        self.deal(players);

        for player in players.iter_mut() {
            player.request_bet(console)?;
        }

        self.show_table(players, console)?;

        for player in players.iter_mut() {
            player.play_turn(&mut self.source, console)?;
            console.display("-----")?;
        }

        console.display("Dealer plays...")?;
        self.dealer.play(&mut self.source);

        console.display("")?;
        console.display("==== Round Results ====")?;
        let dealer_hand = self.dealer.hand();
        console.display(&format!(
            "Dealer's hand: {} ({})",
            dealer_hand,
            dealer_hand.value()
        ))?;

        let hands = self.settle(players);
        for player in players.iter() {
            console.display(&format!("Player {} outcome:", player.id()))?;
            for report in hands.iter().filter(|r| r.player == player.id()) {
                Self::show_settlement(report, console)?;
            }
        }

        let eliminated = Self::eliminate(players);
        for id in eliminated.iter() {
            console.display(&format!("Player {} eliminated.", id))?;
        }
        console.display("===== End of Round =====")?;
        info!(
            "round {} finished, {} players remain",
            self.rounds,
            players.len()
        );

        Ok(RoundReport {
            round: self.rounds,
            dealer_cards: dealer_hand.cards().to_vec(),
            dealer_value: dealer_hand.value(),
            hands,
            eliminated,
        })
    }

    /// Settles every player's hands against the dealer's current hand, players in seat order and hands in hand order.
    pub fn settle(&self, players: &mut [Player]) -> Vec<HandReport> {
        let dealer = self.dealer.hand().standing();
        players
            .iter_mut()
            .flat_map(|player| player.settle(dealer))
            .collect()
    }

    /// Removes every player with no money left, returning their ids in seat order.
    pub fn eliminate(players: &mut Vec<Player>) -> Vec<u32> {
        let eliminated: Vec<u32> = players
            .iter()
            .filter(|p| p.is_bankrupt())
            .map(|p| p.id())
            .collect();
        players.retain(|p| !p.is_bankrupt());
        for id in eliminated.iter() {
            info!("player {} eliminated", id);
        }
        eliminated
    }

    /// Shows the table before players act, the dealer's second card stays hidden.
    fn show_table<C: Console>(&self, players: &[Player], console: &mut C) -> Result<(), BlackjackGameError> {
        console.display("--------------------------")?;
        console.display(&format!(
            "Dealer's hand: {}",
            self.dealer.hand().hole_card_hidden()
        ))?;
        for player in players.iter() {
            console.display(&player.to_string())?;
        }
        console.display("--------------------------")?;
        Ok(())
    }

    fn show_settlement<C: Console>(report: &HandReport, console: &mut C) -> Result<(), BlackjackGameError> {
        let cards = report
            .cards
            .iter()
            .map(|c| c.label())
            .collect::<Vec<&str>>()
            .join(", ");
        console.display(&format!(
            "Player {} hand {}: [{}] ({})",
            report.player, report.hand, cards, report.value
        ))?;
        let line = match report.outcome {
            Outcome::Win => format!(
                "\t{}, you win {} chips. Current money: {}",
                report.reason, report.bet, report.money
            ),
            Outcome::Lose => format!(
                "\t{}, you lose {} chips. Current money: {}",
                report.reason, report.bet, report.money
            ),
            Outcome::Push => format!("\t{}, tie. Current money: {}", report.reason, report.money),
        };
        console.display(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack_lib::{Rank::*, Reason, ScriptedConsole, StackedDeck};

    fn players(money: &[u64]) -> Vec<Player> {
        money
            .iter()
            .enumerate()
            .map(|(i, &m)| Player::new(i as u32 + 1, m))
            .collect()
    }

    #[test]
    fn deal_order_dealer_first() {
        let mut table = Table::new(StackedDeck::new(vec![
            Ten, Nine, Two, Three, Four, Five,
        ]));
        let mut seated = players(&[100, 100]);
        table.deal(&mut seated);
        assert_eq!(table.dealer().hand().cards(), &[Ten, Nine]);
        assert_eq!(seated[0].hands()[0].cards(), &[Two, Three]);
        assert_eq!(seated[1].hands()[0].cards(), &[Four, Five]);
    }

    #[test]
    fn deal_discards_split_hands() {
        let mut table = Table::new(StackedDeck::new(vec![
            Ten, Nine, Eight, Eight, Three, Two, Ten, Nine, Five, Six,
        ]));
        let mut seated = players(&[500]);
        table.deal(&mut seated);
        seated[0].place_bet(50);
        seated[0]
            .apply(0, crate::game::player::Decision::Split, &mut StackedDeck::new(vec![Three, Two]))
            .unwrap();
        assert_eq!(seated[0].hands().len(), 2);
        table.deal(&mut seated);
        assert_eq!(seated[0].hands().len(), 1);
        assert_eq!(seated[0].hands()[0].bet(), 0);
    }

    #[test]
    fn stand_after_hit_beats_dealer() {
        // dealer [10, 9], player [5, 6] hits a 9 and stands on 20
        let mut table = Table::new(StackedDeck::new(vec![Ten, Nine, Five, Six, Nine]));
        let mut seated = players(&[1000]);
        let mut console = ScriptedConsole::new(["100", "H", "S"]);
        let report = table.play_round(&mut seated, &mut console).unwrap();

        assert_eq!(seated[0].money(), 1100);
        assert_eq!(report.dealer_value, 19);
        assert_eq!(report.hands.len(), 1);
        assert_eq!(report.hands[0].outcome, Outcome::Win);
        assert_eq!(report.hands[0].value, 20);
        assert_eq!(report.hands[0].delta, 100);
        assert!(report.eliminated.is_empty());
        assert!(console.transcript().contains("Dealer's hand: [10, ?]"));
    }

    #[test]
    fn surrender_forfeits_full_bet() {
        // the dealer busts, which would have paid a standing hand
        let mut table = Table::new(StackedDeck::new(vec![Ten, Six, Ten, Seven, King]));
        let mut seated = players(&[1000]);
        let mut console = ScriptedConsole::new(["200", "u"]);
        let report = table.play_round(&mut seated, &mut console).unwrap();

        assert!(table.dealer().hand().is_busted());
        assert_eq!(report.hands[0].reason, Reason::Surrender);
        assert_eq!(seated[0].money(), 800);
    }

    #[test]
    fn busted_player_loses_even_if_dealer_busts() {
        // player [K, Q] hits a 5, dealer [K, 2] draws 3 and a Q
        let mut table = Table::new(StackedDeck::new(vec![
            King, Two, King, Queen, Five, Three, Queen,
        ]));
        let mut seated = players(&[1000]);
        let mut console = ScriptedConsole::new(["100", "H"]);
        let report = table.play_round(&mut seated, &mut console).unwrap();

        assert_eq!(report.dealer_value, 25);
        assert_eq!(report.hands[0].reason, Reason::Bust);
        assert_eq!(seated[0].money(), 900);
    }

    #[test]
    fn blackjack_ties_dealer_twenty_one_of_three_cards() {
        // player [A, K], dealer [7, 7] draws a 7
        let mut table = Table::new(StackedDeck::new(vec![Seven, Seven, Ace, King, Seven]));
        let mut seated = players(&[1000]);
        let mut console = ScriptedConsole::new(["100"]);
        let report = table.play_round(&mut seated, &mut console).unwrap();

        assert_eq!(report.dealer_value, 21);
        assert_eq!(report.hands[0].outcome, Outcome::Push);
        assert_eq!(seated[0].money(), 1000);
    }

    #[test]
    fn bankrupt_players_are_eliminated() {
        // dealer [10, 9]; player 1 [10, 8] stands and loses everything, player 2 [10, K] stands and wins
        let mut table = Table::new(StackedDeck::new(vec![
            Ten, Nine, Ten, Eight, Ten, King,
        ]));
        let mut seated = players(&[300, 300]);
        let mut console = ScriptedConsole::new(["300", "10", "S", "S"]);
        let report = table.play_round(&mut seated, &mut console).unwrap();

        assert_eq!(report.eliminated, vec![1]);
        assert_eq!(seated.len(), 1);
        assert_eq!(seated[0].id(), 2);
        assert_eq!(seated[0].money(), 310);
        assert!(console.transcript().contains("Player 1 eliminated."));
    }

    #[test]
    fn split_hands_settle_independently() {
        // dealer [10, 7]; player [8, 8] splits into [8, 2] and [8, 3], both hit a 10
        let mut table = Table::new(StackedDeck::new(vec![
            Ten, Seven, Eight, Eight, Three, Two, Ten, Ten,
        ]));
        let mut seated = players(&[500]);
        let mut console = ScriptedConsole::new(["50", "P", "H", "S", "H"]);
        let report = table.play_round(&mut seated, &mut console).unwrap();

        // [8, 2, 10] = 20 wins, [8, 3, 10] = 21 wins
        assert_eq!(report.hands.len(), 2);
        assert!(report.hands.iter().all(|h| h.bet == 50 && h.outcome == Outcome::Win));
        assert_eq!(seated[0].money(), 600);
        assert_eq!(console.unread(), 0);
    }
}
