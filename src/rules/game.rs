//! The game: board, two seats, turn order and the turn resolver.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

use super::manual::ManualMove;
use crate::agents::{Decision, DecisionSource};
use crate::board::{Board, STARTING_BANK};
use crate::cards::{CardId, CardRef, Catalog, NobleId};
use crate::codec::table::{GEM_LIMIT, NOBLE_SLOTS};
use crate::codec::{CardSource, LegalMask, Move, ReserveTarget, ACTION_DIM};
use crate::core::{EngineError, GameConfig, GameRng, Gems, PlayerId, GEM_SLOTS, GOLD, SEATS};
use crate::nn::{EncodedState, GemEncoder, StateEncoder};
use crate::player::Player;

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
    /// The active player had no legal move, or a driver's turn cap was hit.
    Draw,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// What one resolved move did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub player: PlayerId,
    /// Codec index of the move.
    pub index: usize,
    pub mv: Move,
    /// Change to the player's held gems; the bank changed by the negation.
    pub gems: Gems,
    pub discarded: Gems,
    /// Card bought or reserved, if any.
    pub card: Option<CardId>,
    pub nobles: SmallVec<[NobleId; NOBLE_SLOTS]>,
    /// Player's score after the move.
    pub points: u8,
    pub won: bool,
}

impl TurnOutcome {
    fn new(player: PlayerId, index: usize, mv: Move) -> Self {
        Self {
            player,
            index,
            mv,
            gems: Gems::ZERO,
            discarded: Gems::ZERO,
            card: None,
            nobles: SmallVec::new(),
            points: 0,
            won: false,
        }
    }
}

/// A two-player game.
///
/// Seats alternate starting from a seat drawn at each reset, so the active
/// player is `(start + half_turns) % 2`. Moves arrive either as codec indices
/// (`apply_index`), resolved with `auto_take`/`auto_spend`, or as
/// fully-specified `ManualMove`s. Both paths are checked against the same
/// legal mask and end with the same invariant check.
#[derive(Clone, Debug)]
pub struct Game {
    catalog: Arc<Catalog>,
    config: GameConfig,
    board: Board,
    players: [Player; SEATS],
    start: PlayerId,
    half_turns: u32,
    victor: Option<PlayerId>,
    last_move: Option<usize>,
    /// Seeds each reset's deal and seat draw.
    seeds: GameRng,
    /// Discard tie-breaks and backup discards.
    rng: GameRng,
}

impl Game {
    /// Deal a new game.
    pub fn new(catalog: Arc<Catalog>, config: GameConfig) -> Self {
        let mut seeds = GameRng::new(config.seed);
        let (board, start, rng) = Self::deal(&catalog, &config, &mut seeds);

        Self {
            catalog,
            config,
            board,
            players: [Player::new(PlayerId::new(0)), Player::new(PlayerId::new(1))],
            start,
            half_turns: 0,
            victor: None,
            last_move: None,
            seeds,
            rng,
        }
    }

    /// Start over with a freshly shuffled board and a new starting seat.
    ///
    /// Successive resets from the same seed produce the same sequence of games.
    pub fn reset(&mut self) {
        let (board, start, rng) = Self::deal(&self.catalog, &self.config, &mut self.seeds);
        self.board = board;
        self.start = start;
        self.rng = rng;
        self.players.iter_mut().for_each(Player::reset);
        self.half_turns = 0;
        self.victor = None;
        self.last_move = None;
    }

    fn deal(catalog: &Catalog, config: &GameConfig, seeds: &mut GameRng) -> (Board, PlayerId, GameRng) {
        let game_rng = seeds.fork();
        let board = Board::new(catalog, &mut game_rng.for_context("deck"));
        let start = config.starting_player.unwrap_or_else(|| {
            let seat = game_rng.for_context("start").gen_range_usize(0..SEATS);
            PlayerId::new(seat as u8)
        });
        (board, start, game_rng.for_context("discard"))
    }

    /// Independent copy for lookahead. The copy's tie-breaks are drawn from a
    /// forked stream, so it does not replay this game's discards.
    pub fn fork(&mut self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            config: self.config.clone(),
            board: self.board.clone(),
            players: [
                self.players[0].lookahead_copy(),
                self.players[1].lookahead_copy(),
            ],
            start: self.start,
            half_turns: self.half_turns,
            victor: self.victor,
            last_move: self.last_move,
            seeds: self.seeds.fork(),
            rng: self.rng.fork(),
        }
    }

    // === Queries ===

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    #[must_use]
    pub fn players(&self) -> &[Player; SEATS] {
        &self.players
    }

    #[must_use]
    pub fn starting_player(&self) -> PlayerId {
        self.start
    }

    #[must_use]
    pub fn active_id(&self) -> PlayerId {
        PlayerId::new(((self.start.index() + self.half_turns as usize) % SEATS) as u8)
    }

    #[must_use]
    pub fn inactive_id(&self) -> PlayerId {
        self.active_id().other()
    }

    #[must_use]
    pub fn active(&self) -> &Player {
        self.player(self.active_id())
    }

    #[must_use]
    pub fn inactive(&self) -> &Player {
        self.player(self.inactive_id())
    }

    /// Moves resolved so far.
    #[must_use]
    pub fn half_turns(&self) -> u32 {
        self.half_turns
    }

    /// Index of the most recent move.
    #[must_use]
    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    #[must_use]
    pub fn victor(&self) -> Option<PlayerId> {
        self.victor
    }

    /// Legal moves of the active player.
    #[must_use]
    pub fn legal_mask(&self) -> LegalMask {
        self.active().legal_mask(&self.board)
    }

    /// Observation from the active player's point of view.
    #[must_use]
    pub fn observation(&self) -> EncodedState {
        GemEncoder.encode(self, self.active_id())
    }

    /// `Some` once the game has a winner or the active player cannot move.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.victor {
            Some(p) => Some(GameResult::Winner(p)),
            None if self.legal_mask().is_empty() => Some(GameResult::Draw),
            None => None,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result().is_some()
    }

    // === Moves ===

    /// Apply a codec index for the active player, resolving discards and
    /// payment automatically.
    pub fn apply_index(&mut self, index: usize) -> Result<TurnOutcome, EngineError> {
        let mv = self.check_index(index)?;
        let seat = self.active_id().index();
        let mut outcome = TurnOutcome::new(self.active_id(), index, mv);

        let player = &mut self.players[seat];
        match mv {
            Move::Take { discards, .. } => {
                let resolution = player.auto_take(mv.requested_gems(), &mut self.rng);
                debug_assert_eq!(resolution.discard_count(), usize::from(discards));
                self.board.take_gems(resolution.net);
                outcome.gems = resolution.net;
                outcome.discarded = resolution.discarded;
            }
            Move::BackupDiscard => {
                let held: SmallVec<[usize; GEM_SLOTS]> =
                    player.gems.present().map(|c| c.index()).collect();
                let &color = self
                    .rng
                    .choose(&held)
                    .ok_or_else(|| breach("backup discard with an empty hand"))?;
                let mut returned = Gems::ZERO;
                returned[color] = 1;
                player.gems -= returned;
                self.board.return_gems(returned);
                outcome.gems = -returned;
                outcome.discarded = returned;
            }
            Move::Buy { source, with_gold } => {
                let card = self.remove_card(seat, source)?;
                let spent = self.players[seat].auto_spend(&card.cost, with_gold);
                self.board.return_gems(spent);
                outcome.gems = -spent;
                self.credit_card(seat, &card, &mut outcome);
            }
            Move::Reserve { tier, target } => {
                let (card, gold) = self.take_reservation(tier, target)?;
                let player = &mut self.players[seat];
                player.reserved.push(card.clone());
                outcome.card = Some(card.id);
                if !gold.is_zero() {
                    let resolution = player.auto_take(gold, &mut self.rng);
                    self.board.take_gems(resolution.net);
                    outcome.gems = resolution.net;
                    outcome.discarded = resolution.discarded;
                }
            }
        }

        Ok(self.finish_turn(outcome))
    }

    /// Apply a fully-specified move for the active player.
    ///
    /// The move must map to a legal index, and its explicit vectors must be
    /// feasible: discards and spends come out of what the player holds, and
    /// a spend pays the discounted cost exactly.
    pub fn apply_manual(&mut self, manual: &ManualMove) -> Result<TurnOutcome, EngineError> {
        let index = manual.index()?;
        let mv = self.check_index(index)?;
        manual.validate(self.active(), &self.board)?;

        let seat = self.active_id().index();
        let mut outcome = TurnOutcome::new(self.active_id(), index, mv);

        match *manual {
            ManualMove::Take { take, discard } => {
                let net = take - discard;
                self.players[seat].gems += net;
                self.board.take_gems(net);
                outcome.gems = net;
                outcome.discarded = discard;
            }
            ManualMove::Buy { source, spend } => {
                let card = self.remove_card(seat, source)?;
                self.players[seat].gems -= spend;
                self.board.return_gems(spend);
                outcome.gems = -spend;
                self.credit_card(seat, &card, &mut outcome);
            }
            ManualMove::Reserve {
                tier,
                target,
                take_gold,
                discard,
            } => {
                let (card, gold) = self.take_reservation(tier, target)?;
                let awarded = if take_gold { gold } else { Gems::ZERO };
                let net = awarded - discard;
                let player = &mut self.players[seat];
                player.reserved.push(card.clone());
                player.gems += net;
                self.board.take_gems(net);
                outcome.card = Some(card.id);
                outcome.gems = net;
                outcome.discarded = discard;
            }
        }

        Ok(self.finish_turn(outcome))
    }

    /// Ask `source` for the active player's move and apply it.
    pub fn turn(&mut self, source: &mut dyn DecisionSource) -> Result<TurnOutcome, EngineError> {
        if self.victor.is_some() {
            return Err(EngineError::GameOver);
        }
        let observation = self.observation();
        let mask = self.legal_mask();

        match source.decide(self, &observation, &mask) {
            Decision::Index(index) => self.apply_index(index),
            Decision::Manual(manual) => self.apply_manual(&manual),
        }
    }

    /// Grant every noble on the board whose requirement `player` now meets.
    ///
    /// Running it again without a new purchase grants nothing.
    pub fn visit_nobles(&mut self, player: PlayerId) -> SmallVec<[NobleId; NOBLE_SLOTS]> {
        let seat = player.index();
        let mut visited = SmallVec::new();

        for slot in 0..NOBLE_SLOTS {
            let qualifies = self.board.nobles()[slot]
                .as_ref()
                .is_some_and(|n| n.is_satisfied_by(&self.players[seat].cards));
            if !qualifies {
                continue;
            }
            if let Some(noble) = self.board.remove_noble(slot) {
                self.players[seat].receive_noble(&noble);
                visited.push(noble.id);
            }
        }

        visited
    }

    // === Resolution helpers ===

    fn check_index(&self, index: usize) -> Result<Move, EngineError> {
        if index >= ACTION_DIM {
            return Err(EngineError::IndexOutOfRange(index));
        }
        if self.victor.is_some() {
            return Err(EngineError::GameOver);
        }
        if !self.legal_mask().is_legal(index) {
            return Err(EngineError::IllegalMove { index });
        }
        Move::decode(index)
    }

    fn remove_card(&mut self, seat: usize, source: CardSource) -> Result<CardRef, EngineError> {
        let card = match source {
            CardSource::Shop { tier, slot } => {
                self.board.take_card(usize::from(tier), usize::from(slot))
            }
            CardSource::Reserved(position) => {
                let reserved = &mut self.players[seat].reserved;
                let position = usize::from(position);
                (position < reserved.len()).then(|| reserved.remove(position))
            }
        };
        card.ok_or_else(|| breach("buy of an empty slot passed the mask"))
    }

    fn take_reservation(&mut self, tier: u8, target: ReserveTarget) -> Result<(CardRef, Gems), EngineError> {
        let tier = usize::from(tier);
        let (card, gold) = match target {
            ReserveTarget::Shop(slot) => self.board.reserve(tier, usize::from(slot)),
            ReserveTarget::Deck => self.board.reserve_from_deck(tier),
        };
        let card = card.ok_or_else(|| breach("reservation of an empty slot passed the mask"))?;
        Ok((card, gold))
    }

    fn credit_card(&mut self, seat: usize, card: &CardRef, outcome: &mut TurnOutcome) {
        self.players[seat].receive_card(card);
        outcome.card = Some(card.id);
        outcome.nobles = self.visit_nobles(self.players[seat].id);

        let player = &mut self.players[seat];
        if player.points >= self.config.points_to_win {
            player.victor = true;
            self.victor = Some(player.id);
        }
    }

    fn finish_turn(&mut self, mut outcome: TurnOutcome) -> TurnOutcome {
        let player = self.player(outcome.player);
        outcome.points = player.points;
        outcome.won = player.victor;

        self.half_turns += 1;
        self.last_move = Some(outcome.index);
        self.assert_invariants();
        outcome
    }

    // === Invariants ===

    /// Verify bank bounds, hand limits and per-color gem conservation.
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        let bank = self.board.gems;
        if !bank.is_non_negative() || !STARTING_BANK.covers(&bank) {
            return Err(breach_owned(format!("bank out of range: {}", bank)));
        }

        let mut total = bank;
        for player in &self.players {
            if !player.gems.is_non_negative() {
                return Err(breach_owned(format!("{} holds {}", player.id, player.gems)));
            }
            if player.gems.total() > GEM_LIMIT {
                return Err(breach_owned(format!(
                    "{} holds {} gems",
                    player.id,
                    player.gems.total()
                )));
            }
            if player.cards[GOLD] != 0 {
                return Err(breach_owned(format!("{} owns gold cards", player.id)));
            }
            total += player.gems;
        }

        if total != STARTING_BANK {
            return Err(breach_owned(format!("gems not conserved: {}", total)));
        }
        Ok(())
    }

    fn assert_invariants(&self) {
        if let Err(e) = self.check_invariants() {
            panic!("{} after half-turn {}", e, self.half_turns);
        }
    }
}

fn breach(what: &str) -> EngineError {
    EngineError::InvariantBreach(what.to_string())
}

fn breach_owned(what: String) -> EngineError {
    EngineError::InvariantBreach(what)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::table::{TakeKind, BACKUP_DISCARD};
    use crate::core::Color;

    fn game(seed: u64) -> Game {
        let config = GameConfig::default()
            .with_seed(seed)
            .with_starting_player(PlayerId::new(0));
        Game::new(Arc::new(Catalog::standard()), config)
    }

    #[test]
    fn test_new_game() {
        let game = game(42);
        assert_eq!(game.active_id(), PlayerId::new(0));
        assert_eq!(game.inactive_id(), PlayerId::new(1));
        assert_eq!(game.half_turns(), 0);
        assert_eq!(game.last_move(), None);
        assert_eq!(game.board().gems, STARTING_BANK);
        assert!(game.result().is_none());
        assert!(game.check_invariants().is_ok());
    }

    #[test]
    fn test_take_three_on_fresh_board() {
        let mut game = game(42);
        let outcome = game.apply_index(0).unwrap();

        assert_eq!(outcome.player, PlayerId::new(0));
        assert_eq!(outcome.gems, Gems::colored([1, 1, 1, 0, 0]));
        assert_eq!(game.player(PlayerId::new(0)).gems, Gems::new([1, 1, 1, 0, 0, 0]));
        assert_eq!(game.board().gems, Gems::new([3, 3, 3, 4, 4, 5]));
        assert_eq!(game.last_move(), Some(0));
        assert_eq!(game.active_id(), PlayerId::new(1));
    }

    #[test]
    fn test_errors_leave_state_untouched() {
        let mut game = game(42);

        assert_eq!(game.apply_index(ACTION_DIM), Err(EngineError::IndexOutOfRange(141)));
        assert_eq!(game.apply_index(1), Err(EngineError::IllegalMove { index: 1 }));
        assert_eq!(
            game.apply_index(BACKUP_DISCARD),
            Err(EngineError::IllegalMove { index: 95 })
        );
        assert_eq!(game.half_turns(), 0);
        assert_eq!(game.board().gems, STARTING_BANK);
    }

    #[test]
    fn test_take_to_exactly_ten_needs_no_discard() {
        let mut game = game(3);
        game.players[0].gems = Gems::new([2, 2, 2, 2, 1, 0]);
        game.board.gems -= Gems::new([2, 2, 2, 2, 1, 0]);

        // Take one red at discard slot 0
        let index = Move::Take {
            kind: TakeKind::One,
            choice: 3,
            discards: 0,
        }
        .encode();
        let outcome = game.apply_index(index).unwrap();

        assert_eq!(outcome.discarded, Gems::ZERO);
        assert_eq!(game.player(PlayerId::new(0)).gems.total(), 10);
    }

    #[test]
    fn test_backup_discard_returns_one_gem() {
        let mut game = game(5);
        let hand = Gems::new([2, 2, 2, 2, 1, 1]);
        game.players[0].gems = hand;
        game.board.gems -= hand;

        let outcome = game.apply_index(BACKUP_DISCARD).unwrap();
        assert_eq!(outcome.discarded.total(), 1);
        assert_eq!(game.player(PlayerId::new(0)).gems.total(), 9);
        assert_eq!(game.board().gems.total(), STARTING_BANK.total() - 9);
    }

    #[test]
    fn test_reserve_awards_gold() {
        let mut game = game(6);
        let target = game.board().card(1, 2).cloned().unwrap();
        let index = Move::Reserve {
            tier: 1,
            target: ReserveTarget::Shop(2),
        }
        .encode();

        let outcome = game.apply_index(index).unwrap();
        let player = game.player(PlayerId::new(0));

        assert_eq!(outcome.card, Some(target.id));
        assert_eq!(player.reserved.len(), 1);
        assert_eq!(player.gems, Gems::gold(1));
        assert_eq!(game.board().gems[GOLD], 4);
        assert!(!game.board().in_shop(&target));
    }

    #[test]
    fn test_reserve_from_deck_without_gold() {
        let mut game = game(6);
        game.board.gems[GOLD] = 0;
        game.players[1].gems = Gems::gold(5);

        let index = Move::Reserve {
            tier: 2,
            target: ReserveTarget::Deck,
        }
        .encode();
        game.apply_index(index).unwrap();

        assert_eq!(game.player(PlayerId::new(0)).gems, Gems::ZERO);
        assert_eq!(game.board().deck_len(2), 15);
    }

    #[test]
    fn test_buy_pays_bank_and_credits_card() {
        let mut game = game(8);
        let card = game.board().card(0, 0).cloned().unwrap();
        game.players[0].gems = card.cost;
        game.board.gems -= card.cost;

        let index = Move::Buy {
            source: CardSource::Shop { tier: 0, slot: 0 },
            with_gold: false,
        }
        .encode();
        let outcome = game.apply_index(index).unwrap();

        let player = game.player(PlayerId::new(0));
        assert_eq!(outcome.card, Some(card.id));
        assert_eq!(player.gems, Gems::ZERO);
        assert_eq!(player.cards[card.color], 1);
        assert_eq!(player.points, card.points);
        assert_eq!(game.board().gems, STARTING_BANK);
    }

    #[test]
    fn test_buy_reserved_card() {
        let mut game = game(9);
        let card = Arc::clone(&game.catalog().tier(0)[0]);
        game.players[0].reserved.push(Arc::clone(&card));
        game.players[0].gems = card.cost;
        game.board.gems -= card.cost;

        let index = Move::Buy {
            source: CardSource::Reserved(0),
            with_gold: false,
        }
        .encode();
        game.apply_index(index).unwrap();

        assert!(game.player(PlayerId::new(0)).reserved.is_empty());
        assert_eq!(game.player(PlayerId::new(0)).cards[card.color], 1);
    }

    #[test]
    fn test_all_qualifying_nobles_granted_once() {
        let mut game = game(10);
        for noble in game.board().nobles().clone().iter().flatten() {
            game.players[0].cards += noble.requirement;
        }

        let visited = game.visit_nobles(PlayerId::new(0));
        assert_eq!(visited.len(), NOBLE_SLOTS);
        assert_eq!(game.player(PlayerId::new(0)).points, 9);
        assert!(game.board().nobles().iter().all(Option::is_none));

        assert!(game.visit_nobles(PlayerId::new(0)).is_empty());
        assert_eq!(game.player(PlayerId::new(0)).points, 9);
    }

    #[test]
    fn test_scoring_past_threshold_wins() {
        let config = GameConfig::default()
            .with_seed(11)
            .with_starting_player(PlayerId::new(0))
            .with_points_to_win(1);
        let mut game = Game::new(Arc::new(Catalog::standard()), config);

        let (tier, slot) = (0..3)
            .flat_map(|t| (0..4).map(move |s| (t, s)))
            .find(|&(t, s)| game.board().card(t, s).is_some_and(|c| c.points > 0))
            .unwrap_or((2, 0));
        let card = game.board().card(tier, slot).cloned().unwrap();
        game.players[0].cards = Gems::colored([7; 5]);

        let index = Move::Buy {
            source: CardSource::Shop {
                tier: tier as u8,
                slot: slot as u8,
            },
            with_gold: false,
        }
        .encode();
        let outcome = game.apply_index(index).unwrap();

        assert!(card.points > 0);
        assert!(outcome.won);
        assert_eq!(game.result(), Some(GameResult::Winner(PlayerId::new(0))));
        assert_eq!(game.apply_index(0), Err(EngineError::GameOver));
    }

    #[test]
    fn test_random_start_is_seeded() {
        let catalog = Arc::new(Catalog::standard());
        let starts: Vec<_> = (0..16)
            .map(|seed| Game::new(Arc::clone(&catalog), GameConfig::default().with_seed(seed)).starting_player())
            .collect();
        let again: Vec<_> = (0..16)
            .map(|seed| Game::new(Arc::clone(&catalog), GameConfig::default().with_seed(seed)).starting_player())
            .collect();

        assert_eq!(starts, again);
        assert!(starts.contains(&PlayerId::new(0)));
        assert!(starts.contains(&PlayerId::new(1)));
    }

    #[test]
    fn test_reset_clears_progress() {
        let mut game = game(12);
        game.apply_index(0).unwrap();
        game.reset();

        assert_eq!(game.half_turns(), 0);
        assert_eq!(game.board().gems, STARTING_BANK);
        assert!(game.players().iter().all(|p| p.gems.is_zero()));
        assert_eq!(game.last_move(), None);
    }

    #[test]
    fn test_fork_is_independent() {
        let mut game = game(13);
        let mut copy = game.fork();

        copy.apply_index(0).unwrap();
        assert_eq!(game.half_turns(), 0);
        assert_eq!(game.board().gems, STARTING_BANK);
        assert_eq!(copy.board().gems, Gems::new([3, 3, 3, 4, 4, 5]));
    }

    #[test]
    fn test_invariant_check_catches_leak() {
        let mut game = game(14);
        game.players[0].gems[Color::Red] = 1;
        assert!(matches!(
            game.check_invariants(),
            Err(EngineError::InvariantBreach(_))
        ));
    }
}
