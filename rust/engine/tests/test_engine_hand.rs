use std::collections::HashSet;

use holdem_engine::cards::Card;
use holdem_engine::engine::Engine;
use holdem_engine::errors::GameError;
use holdem_engine::hand::Category;
use holdem_engine::logger::Street;
use holdem_engine::player::{PlayerStatus, STARTING_STACK};
use holdem_engine::showdown::resolve;

#[test]
fn rejects_bad_seat_counts() {
    assert!(matches!(
        Engine::new(Some(1), 1),
        Err(GameError::InvalidSeatCount(1))
    ));
    assert!(matches!(
        Engine::new(Some(1), 5),
        Err(GameError::InvalidSeatCount(5))
    ));
}

#[test]
fn full_four_seat_hand_deals_thirteen_unique_cards() {
    let mut engine = Engine::new(Some(777), 4).unwrap();
    engine.deal_hand().unwrap();
    let mut seen = HashSet::new();
    for p in engine.players() {
        let hole = p.hole.expect("hole cards dealt");
        for c in hole {
            assert!(seen.insert(c), "duplicate hole card {}", c);
        }
    }
    for &c in engine.board() {
        assert!(seen.insert(c), "duplicate board card {}", c);
    }
    assert_eq!(seen.len(), 13);
    assert_eq!(engine.deck_remaining(), 39);
    assert!(engine.is_hand_complete());
}

#[test]
fn board_grows_three_one_one_and_rescores() {
    let mut engine = Engine::new(Some(5), 3).unwrap();
    engine.start_hand().unwrap();
    assert_eq!(engine.street(), Some(Street::Preflop));
    assert!(engine.board().is_empty());
    for p in engine.players() {
        // hole-only preliminary score: pair or high card
        let s = p.score.as_ref().unwrap();
        assert!(s.category <= Category::OnePair);
    }

    engine.deal_flop().unwrap();
    assert_eq!(engine.board().len(), 3);
    let flop: Vec<Card> = engine.board().to_vec();
    engine.deal_turn().unwrap();
    assert_eq!(engine.board().len(), 4);
    assert_eq!(&engine.board()[..3], flop.as_slice());
    engine.deal_river().unwrap();
    assert_eq!(engine.board().len(), 5);
    assert_eq!(engine.street(), Some(Street::River));
}

#[test]
fn streets_must_come_in_order() {
    let mut engine = Engine::new(Some(5), 2).unwrap();
    assert_eq!(engine.deal_flop(), Err(GameError::NoHandInProgress));
    engine.start_hand().unwrap();
    assert!(matches!(
        engine.deal_turn(),
        Err(GameError::OutOfOrderDeal {
            requested: "turn",
            ..
        })
    ));
    engine.deal_flop().unwrap();
    assert!(engine.deal_flop().is_err());
}

#[test]
fn showdown_waits_for_river_unless_one_player_left() {
    let mut engine = Engine::new(Some(11), 3).unwrap();
    engine.start_hand().unwrap();
    engine.deal_flop().unwrap();
    assert_eq!(
        engine.showdown(),
        Err(GameError::HandNotComplete { active: 3 })
    );

    engine.commit(0, 100).unwrap();
    engine.commit(1, 100).unwrap();
    engine.commit(2, 100).unwrap();
    engine.fold(0).unwrap();
    engine.fold(2).unwrap();
    assert_eq!(engine.fold(2), Err(GameError::PlayerAlreadyFolded(2)));

    let result = engine.showdown().unwrap();
    assert_eq!(result.winners, vec![1]);
    // folded wagers stay in the pot and go to the winner
    assert_eq!(engine.players()[1].stack, STARTING_STACK + 200);
    assert_eq!(engine.players()[0].stack, STARTING_STACK - 100);
    assert_eq!(engine.pot(), 0);
    assert_eq!(engine.street(), None);
}

#[test]
fn river_showdown_credits_every_chip() {
    let mut engine = Engine::with_stack(Some(99), 4, 1_000).unwrap();
    engine.start_hand().unwrap();
    for id in 0..4 {
        engine.commit(id, 25).unwrap();
    }
    engine.deal_flop().unwrap();
    engine.deal_turn().unwrap();
    engine.deal_river().unwrap();
    engine.showdown().unwrap();
    let total: u32 = engine.players().iter().map(|p| p.stack).sum();
    assert_eq!(total, 4_000);
}

#[test]
fn overbetting_is_rejected_and_shove_sets_all_in() {
    let mut engine = Engine::with_stack(Some(3), 2, 500).unwrap();
    engine.start_hand().unwrap();
    assert!(matches!(
        engine.commit(0, 501),
        Err(GameError::InsufficientChips { player: 0, .. })
    ));
    engine.commit(0, 500).unwrap();
    assert_eq!(engine.players()[0].status, PlayerStatus::AllIn);
    assert_eq!(engine.pot(), 500);
}

#[test]
fn same_seed_deals_same_hand() {
    let mut a = Engine::new(Some(2024), 4).unwrap();
    let mut b = Engine::new(Some(2024), 4).unwrap();
    a.deal_hand().unwrap();
    b.deal_hand().unwrap();
    assert_eq!(a.board(), b.board());
    assert_eq!(a.players(), b.players());
}

#[test]
fn last_player_in_the_hand_cannot_fold() {
    let mut engine = Engine::new(Some(8), 2).unwrap();
    engine.start_hand().unwrap();
    engine.commit(0, 100).unwrap();
    engine.commit(1, 100).unwrap();
    engine.fold(0).unwrap();
    assert_eq!(engine.fold(1), Err(GameError::LastActivePlayer(1)));
    assert_eq!(
        engine.set_status(1, PlayerStatus::Folded),
        Err(GameError::LastActivePlayer(1))
    );
    assert_eq!(engine.active_count(), 1);

    let result = engine.showdown().unwrap();
    assert_eq!(result.winners, vec![1]);
    assert_eq!(engine.players()[1].stack, STARTING_STACK + 100);
    assert_eq!(engine.street(), None);
}

#[test]
fn table_whose_chips_overflow_is_refused() {
    assert!(matches!(
        Engine::with_stack(Some(1), 2, u32::MAX),
        Err(GameError::ChipOverflow(_))
    ));
    assert!(matches!(
        Engine::with_stack(Some(1), 4, u32::MAX / 4 + 1),
        Err(GameError::ChipOverflow(_))
    ));

    // the largest legal table can put every chip in the pot
    let stack = u32::MAX / 4;
    let mut engine = Engine::with_stack(Some(1), 4, stack).unwrap();
    engine.start_hand().unwrap();
    for id in 0..4 {
        engine.commit(id, stack).unwrap();
    }
    assert_eq!(engine.pot(), stack * 4);
    engine.deal_flop().unwrap();
    engine.deal_turn().unwrap();
    engine.deal_river().unwrap();
    engine.showdown().unwrap();
    let total: u64 = engine.players().iter().map(|p| u64::from(p.stack)).sum();
    assert_eq!(total, u64::from(stack) * 4);
}

#[test]
fn set_status_tracks_betting_round_but_keeps_seat_contesting() {
    let mut engine = Engine::new(Some(41), 3).unwrap();
    engine.deal_hand().unwrap();
    engine.set_status(0, PlayerStatus::Checking).unwrap();
    engine.set_status(1, PlayerStatus::Betting).unwrap();
    assert_eq!(engine.players()[0].status, PlayerStatus::Checking);
    assert_eq!(engine.players()[1].status, PlayerStatus::Betting);
    assert_eq!(engine.active_count(), 3);

    // both still reach the resolver as contenders
    engine.fold(2).unwrap();
    let expected = resolve(engine.players()).unwrap();
    assert!(expected.winners.iter().all(|w| *w < 2));
    assert!(expected.category.is_some(), "two contenders means a real showdown");

    assert_eq!(
        engine.set_status(2, PlayerStatus::Betting),
        Err(GameError::PlayerAlreadyFolded(2))
    );
    assert_eq!(
        engine.set_status(9, PlayerStatus::Checking),
        Err(GameError::UnknownPlayer(9))
    );
    assert_eq!(engine.showdown().unwrap(), expected);
}
