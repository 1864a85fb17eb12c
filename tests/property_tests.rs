//! Property-based tests for payment, discards and whole-game invariants.

use std::sync::Arc;

use proptest::prelude::*;

use gem_engine::cards::{Card, CardId, Catalog};
use gem_engine::core::{Color, GameConfig, GameRng, Gems, PlayerId, COLORED, GOLD};
use gem_engine::player::Player;
use gem_engine::rules::Game;

/// Strategy: a hand of at most ten gems, gold included.
fn hand_strategy() -> impl Strategy<Value = Gems> {
    prop::array::uniform5(0..=2i8).prop_flat_map(|colored| {
        let room = 10 - colored.iter().sum::<i8>();
        (0..=room.min(5)).prop_map(move |gold| {
            let mut hand = Gems::colored(colored);
            hand[GOLD] = gold;
            hand
        })
    })
}

/// Strategy: owned-card counts per color.
fn cards_strategy() -> impl Strategy<Value = Gems> {
    prop::array::uniform5(0..=3i8).prop_map(Gems::colored)
}

/// Strategy: a hand, owned cards, and a cost the player can always pay.
///
/// The cost starts from what cards and colored gems cover, minus a random
/// slack per color, then adds at most one unit per held gold.
fn purchase_strategy() -> impl Strategy<Value = (Gems, Gems, Gems)> {
    (hand_strategy(), cards_strategy(), prop::array::uniform5(0..=3i8)).prop_flat_map(
        |(gems, cards, slack)| {
            let gold = gems[GOLD] as usize;
            prop::collection::vec(0..COLORED, 0..=gold).prop_map(move |gold_colors| {
                let mut cost = Gems::ZERO;
                for c in 0..COLORED {
                    cost[c] = (cards[c] + gems[c] - slack[c]).max(0);
                }
                for c in gold_colors {
                    cost[c] += 1;
                }
                (gems, cards, cost)
            })
        },
    )
}

/// Strategy: a take the codec can express, either up to three distinct
/// colors, two of one color, or a single gold award.
fn take_strategy() -> impl Strategy<Value = Gems> {
    prop_oneof![
        prop::sample::subsequence((0..COLORED).collect::<Vec<_>>(), 1..=3).prop_map(|colors| {
            let mut take = Gems::ZERO;
            for c in colors {
                take[c] = 1;
            }
            take
        }),
        (0..COLORED).prop_map(|c| {
            let mut take = Gems::ZERO;
            take[c] = 2;
            take
        }),
        Just(Gems::gold(1)),
    ]
}

fn player_with(gems: Gems, cards: Gems) -> Player {
    let mut player = Player::new(PlayerId::new(0));
    player.gems = gems;
    player.cards = cards;
    player
}

proptest! {
    // 1. An affordable card is paid exactly, in every mode that applies
    #[test]
    fn auto_spend_pays_discounted_cost((gems, cards, cost) in purchase_strategy()) {
        let player = player_with(gems, cards);
        let card = Card::new(CardId::new(0), 0, Color::White, 0, cost);
        let (plain, with_gold) = player.can_afford(&card);
        prop_assert!(with_gold, "constructed cost {cost} unaffordable for {gems} and {cards}");

        let discounted = cost.shortfall(&cards);
        let discount = cost.min(&cards);
        let modes: &[bool] = if plain { &[false, true] } else { &[true] };

        for &gold_permitted in modes {
            let mut payer = player.clone();
            let spent = payer.auto_spend(&cost, gold_permitted);

            prop_assert_eq!(spent.total(), discounted.total());
            prop_assert_eq!(spent.total() + discount.total(), cost.total());
            prop_assert!(spent.is_non_negative());
            prop_assert!(payer.gems.is_non_negative());
            prop_assert_eq!(payer.gems + spent, gems);
            for c in 0..COLORED {
                prop_assert!(spent[c] <= discounted[c], "overpaid color {c}");
            }
            if plain {
                prop_assert_eq!(spent[GOLD], 0);
            }
        }
    }

    // 2. Taking never leaves more than ten gems and the bank pays the net
    #[test]
    fn auto_take_respects_gem_limit(
        gems in hand_strategy(),
        take in take_strategy(),
        seed in any::<u64>(),
    ) {
        let mut player = player_with(gems, Gems::ZERO);
        let mut rng = GameRng::new(seed);
        let resolution = player.auto_take(take, &mut rng);

        prop_assert!(player.gems.total() <= 10);
        prop_assert!(player.gems.is_non_negative());
        prop_assert!(resolution.discarded.is_non_negative());
        prop_assert_eq!(resolution.discarded[GOLD], 0);
        prop_assert_eq!(player.gems, gems + resolution.net);
        if take[GOLD] == 0 {
            prop_assert_eq!(resolution.net + resolution.discarded, take);
        } else {
            prop_assert_eq!(resolution.net[GOLD], 1);
        }
    }

    // 3. The same seed resolves discards the same way
    #[test]
    fn auto_take_is_deterministic(
        gems in hand_strategy(),
        take in take_strategy(),
        seed in any::<u64>(),
    ) {
        let mut a = player_with(gems, Gems::ZERO);
        let mut b = a.clone();
        let first = a.auto_take(take, &mut GameRng::new(seed));
        let second = b.auto_take(take, &mut GameRng::new(seed));
        prop_assert_eq!(first, second);
        prop_assert_eq!(a.gems, b.gems);
    }

    // 4. Any sequence of legal choices keeps the game consistent
    #[test]
    fn legal_play_keeps_invariants(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..120),
    ) {
        let config = GameConfig::default().with_seed(seed);
        let mut game = Game::new(Arc::new(Catalog::standard()), config);

        for pick in picks {
            if game.is_over() {
                break;
            }
            let legal: Vec<usize> = game.legal_mask().indices().collect();
            let index = legal[pick.index(legal.len())];
            let mover = game.active_id();

            let outcome = game.apply_index(index);
            prop_assert!(outcome.is_ok(), "legal index {index} rejected: {outcome:?}");
            prop_assert!(game.check_invariants().is_ok());
            prop_assert!(game.player(mover).gems.total() <= 10);
        }
    }
}
