//! State encoding for network input.
//!
//! `GemEncoder` flattens a game into the fixed 251-wide observation:
//!
//! | block      | width | contents                                             |
//! |------------|-------|------------------------------------------------------|
//! | bank       | 7     | gems/4 (gold/5), total/10                            |
//! | shop       | 132   | 12 card blocks, tier-major                           |
//! | nobles     | 18    | 3 noble blocks                                       |
//! | hero       | 47    | the perspective player                               |
//! | enemy      | 47    | the other player                                     |
//!
//! A card block is `[color one-hot (5), points/15, shortfall/4 (5)]`, where
//! shortfall is what the evaluated player still lacks per color after held
//! gems and owned cards. It is not capped, so a lack of 7 encodes as 1.75.
//! Shop cards are evaluated against the perspective player; reserved cards
//! against their owner. A noble block is `[points, shortfall (5)]/4` against
//! the perspective player's effective gems. Empty slots encode as zeros.

use crate::board::Board;
use crate::cards::{Card, Noble};
use crate::codec::table::{NOBLE_SLOTS, RESERVE_LIMIT, SHOP_SLOTS, TIERS};
use crate::codec::ACTION_DIM;
use crate::core::{Gems, PlayerId, COLORED, GEM_SLOTS, GOLD, SEATS};
use crate::nn::traits::EncodedState;
use crate::player::Player;
use crate::rules::Game;

pub const CARD_WIDTH: usize = COLORED + 1 + COLORED;
pub const NOBLE_WIDTH: usize = 1 + COLORED;
pub const BANK_WIDTH: usize = GEM_SLOTS + 1;
pub const BOARD_WIDTH: usize = BANK_WIDTH + TIERS * SHOP_SLOTS * CARD_WIDTH + NOBLE_SLOTS * NOBLE_WIDTH;
pub const PLAYER_WIDTH: usize = GEM_SLOTS + 1 + COLORED + 1 + RESERVE_LIMIT * CARD_WIDTH + 1;
pub const OBSERVATION_WIDTH: usize = BOARD_WIDTH + SEATS * PLAYER_WIDTH;

const GEM_SCALE: f32 = 4.0;
const GOLD_SCALE: f32 = 5.0;
const TOTAL_SCALE: f32 = 10.0;
const POINT_SCALE: f32 = 15.0;

/// Encodes a game into a tensor from one player's perspective.
pub trait StateEncoder: Send + Sync {
    fn encode(&self, game: &Game, perspective: PlayerId) -> EncodedState;

    fn output_shape(&self) -> Vec<usize>;

    /// Length of the policy vector a network should produce.
    fn action_space_size(&self) -> usize;
}

/// The fixed observation layout described at module level.
#[derive(Clone, Copy, Debug, Default)]
pub struct GemEncoder;

impl StateEncoder for GemEncoder {
    fn encode(&self, game: &Game, perspective: PlayerId) -> EncodedState {
        let hero = game.player(perspective);
        let enemy = game.player(perspective.other());

        let mut out = Vec::with_capacity(OBSERVATION_WIDTH);
        encode_board(game.board(), hero, &mut out);
        encode_player(hero, &mut out);
        encode_player(enemy, &mut out);

        debug_assert_eq!(out.len(), OBSERVATION_WIDTH);
        EncodedState::new(out, vec![OBSERVATION_WIDTH])
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![OBSERVATION_WIDTH]
    }

    fn action_space_size(&self) -> usize {
        ACTION_DIM
    }
}

fn encode_gems(gems: &Gems, out: &mut Vec<f32>) {
    for slot in 0..GEM_SLOTS {
        let scale = if slot == GOLD { GOLD_SCALE } else { GEM_SCALE };
        out.push(f32::from(gems[slot]) / scale);
    }
    out.push(gems.total() as f32 / TOTAL_SCALE);
}

fn encode_board(board: &Board, hero: &Player, out: &mut Vec<f32>) {
    encode_gems(&board.gems, out);

    let effective = hero.effective_gems();
    for card in board.shop_cards() {
        encode_card(card.map(|c| &**c), &effective, out);
    }
    for noble in board.nobles() {
        encode_noble(noble.as_deref(), &effective, out);
    }
}

fn encode_player(player: &Player, out: &mut Vec<f32>) {
    encode_gems(&player.gems, out);

    for color in 0..COLORED {
        out.push(f32::from(player.cards[color]));
    }
    out.push(player.card_count() as f32 / TOTAL_SCALE);

    let effective = player.effective_gems();
    for position in 0..RESERVE_LIMIT {
        let card = player.reserved.get(position).map(|c| &**c);
        encode_card(card, &effective, out);
    }

    out.push(f32::from(player.points) / POINT_SCALE);
}

fn encode_card(card: Option<&Card>, against: &Gems, out: &mut Vec<f32>) {
    let Some(card) = card else {
        out.extend([0.0; CARD_WIDTH]);
        return;
    };

    let mut one_hot = [0.0; COLORED];
    one_hot[card.color.index()] = 1.0;
    out.extend(one_hot);
    out.push(f32::from(card.points) / POINT_SCALE);
    push_shortfall(&card.cost.shortfall(against), out);
}

fn encode_noble(noble: Option<&Noble>, against: &Gems, out: &mut Vec<f32>) {
    let Some(noble) = noble else {
        out.extend([0.0; NOBLE_WIDTH]);
        return;
    };

    out.push(f32::from(noble.points) / GEM_SCALE);
    push_shortfall(&noble.requirement.shortfall(against), out);
}

fn push_shortfall(shortfall: &Gems, out: &mut Vec<f32>) {
    for color in 0..COLORED {
        out.push(f32::from(shortfall[color]) / GEM_SCALE);
    }
}
