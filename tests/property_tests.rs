//! Property tests for the round engine.
//!
//! proptest generates random sequences of player operations and checks the
//! engine's invariants after every step.

use proptest::prelude::*;
use rust_connections::core::{EngineConfig, Level, WordId};
use rust_connections::puzzle::{Category, Puzzle};
use rust_connections::round::{GuessResult, RoundEngine, RoundOutcome};

#[derive(Clone, Debug)]
enum Op {
    Toggle(u8),
    Shuffle,
    DeselectAll,
    Submit,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0u8..16).prop_map(Op::Toggle),
        1 => Just(Op::Shuffle),
        1 => Just(Op::DeselectAll),
        3 => Just(Op::Submit),
    ]
}

fn puzzle() -> Puzzle {
    let level = |n| Level::new(n).unwrap();
    Puzzle::new(vec![
        Category::new("A", level(2), ["a1", "a2", "a3", "a4"]),
        Category::new("B", level(4), ["b1", "b2", "b3", "b4"]),
        Category::new("C", level(1), ["c1", "c2", "c3", "c4"]),
        Category::new("D", level(3), ["d1", "d2", "d3", "d4"]),
    ])
    .unwrap()
}

fn check_invariants(engine: &RoundEngine) -> Result<(), TestCaseError> {
    prop_assert!(engine.selection().len() <= 4);
    prop_assert_eq!(engine.board().len() + 4 * engine.cleared().len(), 16);
    prop_assert_eq!(engine.board().is_empty(), engine.outcome() == RoundOutcome::Won);
    prop_assert_eq!(
        engine.mistakes_remaining() == 0,
        engine.outcome() == RoundOutcome::Lost
    );

    let mistakes = engine
        .history()
        .records()
        .iter()
        .filter(|r| r.result.is_mistake())
        .count();
    prop_assert_eq!(mistakes + engine.mistakes_remaining() as usize, 4);

    let correct = engine
        .history()
        .records()
        .iter()
        .filter(|r| matches!(r.result, GuessResult::Correct | GuessResult::Win))
        .count();
    prop_assert_eq!(correct, engine.cleared().len());
    Ok(())
}

proptest! {
    #[test]
    fn prop_invariants_hold(seed in any::<u64>(), ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut engine = RoundEngine::new(EngineConfig::default().with_seed(seed));
        engine.initialize(Some(puzzle()));

        for op in ops {
            let outcome_before = engine.outcome();
            let mistakes_before = engine.mistakes_remaining();
            let cleared_before = engine.cleared().len();
            let history_before = engine.history().len();

            match op {
                Op::Toggle(id) => {
                    engine.toggle_select(WordId(id));
                }
                Op::Shuffle => engine.shuffle(),
                Op::DeselectAll => engine.deselect_all(),
                Op::Submit => {
                    let selected = engine.selection().len();
                    match engine.submit_guess() {
                        None => {
                            prop_assert!(selected != 4 || outcome_before != RoundOutcome::InProgress);
                            prop_assert_eq!(engine.history().len(), history_before);
                        }
                        Some(GuessResult::Same) => {
                            prop_assert_eq!(engine.history().len(), history_before);
                            prop_assert_eq!(engine.mistakes_remaining(), mistakes_before);
                        }
                        Some(GuessResult::Correct) | Some(GuessResult::Win) => {
                            prop_assert_eq!(engine.cleared().len(), cleared_before + 1);
                            prop_assert_eq!(engine.mistakes_remaining(), mistakes_before);
                        }
                        Some(_) => {
                            prop_assert_eq!(engine.mistakes_remaining(), mistakes_before - 1);
                            prop_assert_eq!(engine.cleared().len(), cleared_before);
                        }
                    }
                }
            }

            if outcome_before.is_over() {
                prop_assert_eq!(engine.outcome(), outcome_before);
            }
            check_invariants(&engine)?;
        }
    }

    #[test]
    fn prop_loss_reveal_empties_board(seed in any::<u64>(), skip in 0usize..3) {
        let mut engine = RoundEngine::new(EngineConfig::default().with_seed(seed));
        engine.initialize(Some(puzzle()));

        // Clear `skip` categories, then burn every mistake.
        for category in 0..skip as u8 {
            engine.deselect_all();
            for item in 0..4 {
                engine.toggle_select(WordId(category * 4 + item));
            }
            prop_assert_eq!(engine.submit_guess(), Some(GuessResult::Correct));
        }
        let scattered = [[8, 9, 12, 13], [8, 10, 12, 13], [8, 11, 12, 13], [9, 10, 12, 13]];
        let mut last = None;
        for ids in scattered {
            engine.deselect_all();
            for id in ids {
                engine.toggle_select(WordId(id));
            }
            last = engine.submit_guess();
        }
        prop_assert_eq!(last, Some(GuessResult::Loss));

        prop_assert!(engine.reveal_remaining_on_loss());
        engine.finish_sequence();

        prop_assert!(engine.board().is_empty());
        prop_assert!(engine.is_resolved());
        let revealed: Vec<_> = engine.cleared().iter().skip(skip).map(|c| c.level).collect();
        let mut sorted = revealed.clone();
        sorted.sort();
        prop_assert_eq!(revealed, sorted);
    }
}
