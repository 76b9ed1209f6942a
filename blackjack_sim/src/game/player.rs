use crate::report::HandReport;
use blackjack_lib::settle::settle as settle_hand;
use blackjack_lib::{BlackjackGameError, CardSource, Console, Hand, Rank, RuleViolation, Standing};
use log::{debug, info};
use std::fmt::Display;

/// The ways a player can play a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Hit,
    Stand,
    DoubleDown,
    Split,
    Surrender,
}

impl Decision {
    /// Decisions offered on a hand's first two cards.
    pub const OPENING: [Decision; 5] = [
        Decision::Hit,
        Decision::Stand,
        Decision::DoubleDown,
        Decision::Split,
        Decision::Surrender,
    ];

    /// Decisions offered once a hand holds three or more cards.
    pub const LATER: [Decision; 3] = [Decision::Hit, Decision::Stand, Decision::Surrender];

    /// Returns the decisions offered for `hand`, which depend only on how many cards it holds.
    pub fn offered_for(hand: &Hand) -> &'static [Decision] {
        if hand.cards().len() > 2 {
            &Decision::LATER
        } else {
            &Decision::OPENING
        }
    }

    /// The letter a player types to choose the decision.
    pub fn letter(self) -> char {
        match self {
            Decision::Hit => 'H',
            Decision::Stand => 'S',
            Decision::DoubleDown => 'D',
            Decision::Split => 'P',
            Decision::Surrender => 'U',
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Decision::Hit => "hit",
            Decision::Stand => "stand",
            Decision::DoubleDown => "double down",
            Decision::Split => "split",
            Decision::Surrender => "surrender",
        }
    }

    /// Formats `decisions` as the menu shown to the player, e.g. `(H=Hit, S=Stand, U=Surrender)`.
    pub fn menu(decisions: &[Decision]) -> String {
        let entries = decisions
            .iter()
            .map(|d| format!("{}={}", d.letter(), d))
            .collect::<Vec<String>>()
            .join(", ");
        format!("({})", entries)
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Decision::Hit => "Hit",
            Decision::Stand => "Stand",
            Decision::DoubleDown => "Double Down",
            Decision::Split => "Split",
            Decision::Surrender => "Surrender",
        };
        write!(f, "{}", name)
    }
}

/// Struct for a seated player: an id, their money, and the hands they are playing this round.
/// A player holds a single hand after the deal and gains one more for every split.
#[derive(Debug, Clone)]
pub struct Player {
    id: u32,
    money: u64,
    hands: Vec<Hand>,
}

impl Player {
    /// Associated function to create a new `Player` with no hands dealt.
    pub fn new(id: u32, money: u64) -> Player {
        Player {
            id,
            money,
            hands: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn money(&self) -> u64 {
        self.money
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Replaces whatever the player held last round with a single fresh hand of `cards`.
    pub fn deal(&mut self, cards: Vec<Rank>) {
        self.hands = vec![Hand::new(cards)];
    }

    /// Places `bet` on the starting hand. Assumes the hand has been dealt and the bet is within the player's money.
    pub fn place_bet(&mut self, bet: u64) {
        debug_assert!(bet > 0 && bet <= self.money);
        if let Some(hand) = self.hands.first_mut() {
            hand.set_bet(bet);
        }
    }

    /// Asks the player for a bet between 1 and all of their money and places it.
    pub fn request_bet<C: Console>(&mut self, console: &mut C) -> Result<u64, BlackjackGameError> {
        let prompt = format!(
            "Player {}, what is your bet? (1 to {})",
            self.id, self.money
        );
        let bet = console.request_positive_integer(&prompt, Some(self.money))?;
        self.place_bet(bet);
        info!("player {} bets {}", self.id, bet);
        Ok(bet)
    }

    /// Sum of the bets riding on every hand.
    pub fn committed(&self) -> u64 {
        self.hands.iter().map(Hand::bet).sum()
    }

    /// Money not riding on any hand other than the one at `idx`.
    pub fn available_for(&self, idx: usize) -> u64 {
        let others: u64 = self
            .hands
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != idx)
            .map(|(_, h)| h.bet())
            .sum();
        self.money.saturating_sub(others)
    }

    /// The turn is over once every hand, split hands included, has finished.
    pub fn is_done(&self) -> bool {
        self.hands.iter().all(|h| !h.is_active())
    }

    /// Applies `decision` to the hand at `idx`, drawing from `source` as needed.
    /// A decision the hand does not allow is rejected without changing anything.
    pub fn apply(
        &mut self,
        idx: usize,
        decision: Decision,
        source: &mut dyn CardSource,
    ) -> Result<(), RuleViolation> {
        let available = self.available_for(idx);
        let hand = self
            .hands
            .get_mut(idx)
            .ok_or(RuleViolation::NoSuchHand { idx })?;
        if !Decision::offered_for(hand).contains(&decision) {
            return Err(RuleViolation::NotOffered {
                decision: decision.verb(),
                cards: hand.cards().len(),
            });
        }

        match decision {
            Decision::Hit => hand.add(source.draw()),
            Decision::Stand => hand.stand(),
            Decision::DoubleDown => {
                Player::check_funds(decision, available, hand.bet())?;
                hand.add(source.draw());
                hand.double_bet();
                hand.stand();
            }
            Decision::Split => {
                Player::check_funds(decision, available, hand.bet())?;
                if !hand.can_split() {
                    return Err(RuleViolation::CannotSplit {
                        hand: hand.to_string(),
                    });
                }
                let for_new_hand = source.draw();
                let replacement = source.draw();
                let new_hand = hand.split(for_new_hand, replacement);
                self.hands.push(new_hand);
            }
            Decision::Surrender => hand.surrender(),
        }
        Ok(())
    }

    fn check_funds(decision: Decision, available: u64, required: u64) -> Result<(), RuleViolation> {
        if available < required {
            return Err(RuleViolation::InsufficientFunds {
                action: decision.verb(),
                available,
                required,
            });
        }
        Ok(())
    }

    /// Plays the player's whole turn. Hands are played in order, each until it finishes, and hands created
    /// by a split are played after the ones before them. A hand that reaches 21 stands on its own.
    pub fn play_turn<C: Console>(
        &mut self,
        source: &mut dyn CardSource,
        console: &mut C,
    ) -> Result<(), BlackjackGameError> {
        while let Some(idx) = self.hands.iter().position(Hand::is_active) {
            let hand = &self.hands[idx];
            console.display(&format!(
                "Player {}'s hand {}: {} ({})",
                self.id,
                idx,
                hand,
                hand.value()
            ))?;

            if hand.is_blackjack() {
                console.display("BLACKJACK!")?;
                self.hands[idx].stand();
                continue;
            }

            let decision = self.request_decision(idx, console)?;
            console.display(&decision.to_string())?;

            match self.apply(idx, decision, source) {
                Ok(()) => self.show_result(idx, decision, console)?,
                Err(violation) => {
                    debug!("player {} hand {}: {violation}", self.id, idx);
                    console.display(&format!("Rejected, {violation}."))?;
                }
            }
        }
        Ok(())
    }

    fn request_decision<C: Console>(
        &self,
        idx: usize,
        console: &mut C,
    ) -> Result<Decision, BlackjackGameError> {
        let offered = Decision::offered_for(&self.hands[idx]);
        let letters: Vec<char> = offered.iter().map(|d| d.letter()).collect();
        let prompt = format!("Type an action and press Enter: {}", Decision::menu(offered));
        loop {
            let letter = console.request_choice(&prompt, &letters)?;
            if let Some(decision) = offered.iter().copied().find(|d| d.letter() == letter) {
                return Ok(decision);
            }
        }
    }

    fn show_result<C: Console>(
        &self,
        idx: usize,
        decision: Decision,
        console: &mut C,
    ) -> Result<(), BlackjackGameError> {
        let hand = &self.hands[idx];
        match decision {
            Decision::Hit | Decision::DoubleDown => {
                console.display(&format!("{} ({})", hand, hand.value()))?;
                if hand.is_busted() {
                    console.display("Busted!")?;
                }
            }
            Decision::Split => {
                if let Some(new_hand) = self.hands.last() {
                    console.display(&format!("Split into {} and {}", hand, new_hand))?;
                }
            }
            Decision::Stand | Decision::Surrender => {}
        }
        Ok(())
    }

    /// Settles every hand against the dealer's final hand in hand order, paying out or collecting each bet.
    pub fn settle(&mut self, dealer: Standing) -> Vec<HandReport> {
        let mut reports = Vec::with_capacity(self.hands.len());
        for (idx, hand) in self.hands.iter().enumerate() {
            let settlement = settle_hand(hand.standing(), dealer);
            let before = self.money;
            self.money = settlement.apply(before, hand.bet());
            info!(
                "player {} hand {} {}: {} ({})",
                self.id,
                idx,
                hand,
                settlement.outcome,
                settlement.reason
            );
            reports.push(HandReport {
                player: self.id,
                hand: idx,
                cards: hand.cards().to_vec(),
                value: hand.value(),
                bet: hand.bet(),
                outcome: settlement.outcome,
                reason: settlement.reason,
                delta: self.money as i64 - before as i64,
                money: self.money,
            });
        }
        reports
    }

    /// A player with no money left is out of the game.
    pub fn is_bankrupt(&self) -> bool {
        self.money == 0
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hands = self
            .hands
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        write!(
            f,
            "Player {} hands: {}\tMoney: ${}\tBet: ${}",
            self.id,
            hands,
            self.money,
            self.committed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack_lib::{ScriptedConsole, StackedDeck};
    use Rank::*;

    fn seated(money: u64, cards: Vec<Rank>, bet: u64) -> Player {
        let mut player = Player::new(1, money);
        player.deal(cards);
        player.place_bet(bet);
        player
    }

    #[test]
    fn decisions_depend_on_hand_shape() {
        let two = Hand::new(vec![Five, Six]);
        let three = Hand::new(vec![Five, Six, Two]);
        assert_eq!(Decision::offered_for(&two).len(), 5);
        assert_eq!(Decision::offered_for(&three), &Decision::LATER);
        assert_eq!(
            Decision::menu(&Decision::LATER),
            "(H=Hit, S=Stand, U=Surrender)"
        );
    }

    #[test]
    fn hit_draws_and_busts() {
        let mut player = seated(1000, vec![King, Six], 100);
        let mut deck = StackedDeck::new(vec![Nine]);
        player.apply(0, Decision::Hit, &mut deck).unwrap();
        assert!(player.hands()[0].is_busted());
        assert!(player.is_done());
    }

    #[test]
    fn double_down_doubles_bet_and_finishes() {
        let mut player = seated(1000, vec![Five, Six], 100);
        let mut deck = StackedDeck::new(vec![Two]);
        player.apply(0, Decision::DoubleDown, &mut deck).unwrap();
        let hand = &player.hands()[0];
        assert_eq!(hand.bet(), 200);
        assert_eq!(hand.cards(), &[Five, Six, Two]);
        assert!(!hand.is_active());
    }

    #[test]
    fn double_down_counts_only_the_current_bet() {
        let mut player = seated(1000, vec![Five, Six], 600);
        let mut deck = StackedDeck::new(vec![Two]);
        player.apply(0, Decision::DoubleDown, &mut deck).unwrap();
        assert_eq!(player.hands()[0].bet(), 1200);
        assert!(player.is_done());
    }

    #[test]
    fn double_down_needs_money_beyond_other_hands() {
        // after the split 60 rides on the other hand, leaving 40 for a 60 bet
        let mut player = seated(100, vec![Eight, Eight], 60);
        let mut deck = StackedDeck::new(vec![Three, Two, Nine]);
        player.apply(0, Decision::Split, &mut deck).unwrap();
        assert_eq!(player.available_for(0), 40);
        let err = player
            .apply(0, Decision::DoubleDown, &mut deck)
            .unwrap_err();
        assert_eq!(
            err,
            RuleViolation::InsufficientFunds {
                action: "double down",
                available: 40,
                required: 60
            }
        );
        assert_eq!(deck.dealt(), 2);
        assert!(player.hands()[0].is_active());
        assert_eq!(player.hands()[0].bet(), 60);
    }

    #[test]
    fn unknown_hand_is_rejected() {
        let mut player = seated(100, vec![Five, Six], 10);
        let mut deck = StackedDeck::new(vec![Two]);
        assert_eq!(
            player.apply(3, Decision::Hit, &mut deck),
            Err(RuleViolation::NoSuchHand { idx: 3 })
        );
        assert_eq!(deck.dealt(), 0);
    }

    #[test]
    fn no_double_or_split_after_two_cards() {
        let mut player = seated(1000, vec![Two, Three, Four], 10);
        let mut deck = StackedDeck::new(vec![Two]);
        assert!(matches!(
            player.apply(0, Decision::DoubleDown, &mut deck),
            Err(RuleViolation::NotOffered { cards: 3, .. })
        ));
        assert!(matches!(
            player.apply(0, Decision::Split, &mut deck),
            Err(RuleViolation::NotOffered { .. })
        ));
        assert!(player.apply(0, Decision::Surrender, &mut deck).is_ok());
        assert!(player.hands()[0].is_surrendered());
    }

    #[test]
    fn split_requires_equal_points() {
        let mut player = seated(1000, vec![Ace, Two], 10);
        let mut deck = StackedDeck::new(vec![Two]);
        assert_eq!(
            player.apply(0, Decision::Split, &mut deck),
            Err(RuleViolation::CannotSplit {
                hand: "[A, 2]".to_string()
            })
        );
        assert_eq!(player.hands().len(), 1);
    }

    #[test]
    fn split_pair_of_eights() {
        let mut player = seated(500, vec![Eight, Eight], 50);
        let mut deck = StackedDeck::new(vec![Three, Two]);
        player.apply(0, Decision::Split, &mut deck).unwrap();
        assert_eq!(player.hands().len(), 2);
        assert_eq!(player.hands()[0].cards(), &[Eight, Two]);
        assert_eq!(player.hands()[1].cards(), &[Eight, Three]);
        assert_eq!(player.committed(), 100);
        assert!(!player.is_done());
    }

    #[test]
    fn turn_plays_split_hands_to_completion() {
        let mut player = seated(500, vec![Eight, Eight], 50);
        let mut deck = StackedDeck::new(vec![Three, Two, Ten]);
        // split, stand on [8, 2], hit [8, 3] to 21 which stands on its own
        let mut console = ScriptedConsole::new(["P", "S", "h"]);
        player.play_turn(&mut deck, &mut console).unwrap();

        assert!(player.is_done());
        assert_eq!(player.hands().len(), 2);
        assert_eq!(player.hands()[0].cards(), &[Eight, Two]);
        assert_eq!(player.hands()[1].cards(), &[Eight, Three, Ten]);
        assert!(player.hands().iter().all(|h| h.bet() == 50));
        assert!(console.transcript().contains("Split into [8, 2] and [8, 3]"));
        assert!(console.transcript().contains("BLACKJACK!"));
        assert_eq!(console.unread(), 0);
    }

    #[test]
    fn rejected_action_asks_again() {
        let mut player = seated(100, vec![Eight, Eight], 60);
        let mut deck = StackedDeck::new(vec![Three, Two, Nine]);
        let mut console = ScriptedConsole::new(["P", "D", "H", "S", "S"]);
        player.play_turn(&mut deck, &mut console).unwrap();

        let transcript = console.transcript();
        assert!(transcript.contains("Rejected, not enough money to double down"));
        assert_eq!(player.hands()[0].cards(), &[Eight, Two, Nine]);
        assert_eq!(player.hands()[0].bet(), 60);
        assert_eq!(player.hands()[1].cards(), &[Eight, Three]);
        assert!(player.is_done());
        assert_eq!(console.unread(), 0);
    }

    #[test]
    fn doubled_loss_larger_than_money_bankrupts() {
        let mut player = seated(1000, vec![Five, Six], 600);
        let mut deck = StackedDeck::new(vec![Two]);
        player.apply(0, Decision::DoubleDown, &mut deck).unwrap();

        let dealer = Hand::new(vec![Ten, Nine]).standing();
        let reports = player.settle(dealer);
        assert_eq!(reports[0].bet, 1200);
        assert_eq!(reports[0].delta, -1000);
        assert_eq!(player.money(), 0);
        assert!(player.is_bankrupt());
    }

    #[test]
    fn natural_blackjack_needs_no_decision() {
        let mut player = seated(100, vec![Ace, King], 10);
        let mut deck = StackedDeck::new(vec![Two]);
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        player.play_turn(&mut deck, &mut console).unwrap();
        assert!(player.is_done());
        assert_eq!(deck.dealt(), 0);
    }

    #[test]
    fn settle_updates_money_per_hand() {
        let mut player = seated(500, vec![Eight, Eight], 50);
        let mut deck = StackedDeck::new(vec![Three, Two, Ten]);
        player.apply(0, Decision::Split, &mut deck).unwrap();
        player.apply(0, Decision::Stand, &mut deck).unwrap();
        player.apply(1, Decision::Hit, &mut deck).unwrap();

        // [8, 2] = 10 loses and [8, 3, 10] = 21 wins against 19
        let dealer = Hand::new(vec![Ten, Nine]).standing();
        let reports = player.settle(dealer);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].delta, -50);
        assert_eq!(reports[1].delta, 50);
        assert_eq!(player.money(), 500);
    }
}
