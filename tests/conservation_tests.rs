//! Property tests over random legal play.
//!
//! Random seeds, table sizes and move choices drive whole matches; after
//! every accepted move the dealt cards must all still be accounted for.

mod common;

use common::{player_ids, playing, seeded_rules};
use proptest::prelude::*;
use scout_engine::core::{Match, Move, Phase, PlayerId, ScoutAndShow, Seat};
use scout_engine::rules::{cards_conserved, RulesEngine, ScoutRules};

/// Every move the turn holder might try, legal or not.
fn candidates(m: &Match, seat: Seat) -> Vec<Move> {
    let hand = m.players[seat].hand.len();
    let mut moves = Vec::new();

    for start in 0..hand {
        for end in (start + 1)..=hand {
            let indices: Vec<usize> = (start..end).collect();
            moves.push(Move::show(&indices));
        }
    }
    if let Some(set) = &m.active_set {
        let ends = if set.len() > 1 { vec![0, set.len() - 1] } else { vec![0] };
        for card in ends {
            for insert in 0..=hand {
                moves.push(Move::scout(card, insert, false));
                moves.push(Move::scout(card, insert, true));
            }
        }
    }
    moves.push(Move::ScoutAndShow);
    moves.push(Move::EndTurn);
    moves
}

/// Accepted outcomes of every candidate move.
fn legal_outcomes(rules: &ScoutRules, m: &Match, id: &PlayerId, seat: Seat) -> Vec<Match> {
    candidates(m, seat)
        .iter()
        .filter_map(|mv| rules.apply_move(m, id, mv).ok())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_random_play_conserves_cards(
        seed in any::<u64>(),
        count in 2usize..=5,
        choices in prop::collection::vec(any::<u16>(), 1..120),
    ) {
        let rules = seeded_rules(seed);
        let ids = player_ids(count);
        let mut m = playing(&rules, count);

        for choice in choices {
            match m.phase {
                Phase::Playing { turn, pending } => {
                    let id = m.players[turn].id.clone();
                    let options = legal_outcomes(&rules, &m, &id, turn);
                    prop_assert!(!options.is_empty(), "{turn} has no legal move ({pending:?})");
                    m = options[usize::from(choice) % options.len()].clone();
                }
                Phase::Scoring => {
                    if m.is_over() {
                        break;
                    }
                    m = rules.apply_move(&m, &ids[0], &Move::NextRound).unwrap();
                }
                Phase::ReadyCheck => {
                    for (i, id) in ids.iter().enumerate() {
                        if (usize::from(choice) >> i) & 1 == 1 {
                            m = rules.apply_move(&m, id, &Move::FlipHand).unwrap();
                        }
                        m = rules.apply_move(&m, id, &Move::SetReady).unwrap();
                    }
                }
                Phase::Waiting => prop_assert!(false, "match fell back to waiting"),
            }

            prop_assert!(cards_conserved(&m));
            if count > 2 && m.active_set.is_some() {
                prop_assert!(usize::from(m.consecutive_scouts) < count);
            }
            if let Phase::Playing { turn, pending } = m.phase {
                if pending != ScoutAndShow::NotStarted {
                    prop_assert!(!m.players[turn].used_scout_and_show);
                }
            }
        }
    }

    #[test]
    fn prop_rejections_leave_state_untouched(
        seed in any::<u64>(),
        count in 2usize..=5,
        mover in 0usize..5,
        pick in any::<u16>(),
    ) {
        let rules = seeded_rules(seed);
        let mut m = playing(&rules, count);
        // Open the table so every move kind has something to act on.
        let holder = m.turn().unwrap();
        let id = m.players[holder].id.clone();
        m = rules.apply_move(&m, &id, &Move::show(&[0])).unwrap();

        let seat = Seat::new((mover % count) as u8);
        let id = m.players[seat].id.clone();
        let before = m.clone();
        let moves = candidates(&m, seat);
        let mv = &moves[usize::from(pick) % moves.len()];
        if rules.apply_move(&m, &id, mv).is_err() {
            prop_assert_eq!(&m, &before);
        }
    }
}
