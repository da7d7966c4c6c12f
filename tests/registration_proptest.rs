// tests/registration_proptest.rs
//
// Свойства регистрации на случайных последовательностях операций.

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use padelsync::domain::{PairSlot, Timestamp, Tournament, TournamentConfig};
use padelsync::tournament::registration::{
    register_doubles, register_single, remove_pair, remove_player_from_pair,
    remove_registered_player, remove_waiting_player,
};
use padelsync::tournament::Placement;

#[derive(Clone, Debug)]
enum Op {
    Single(u8),
    Doubles(u8, u8),
    RemoveRegistered(u8),
    RemoveWaiting(u8),
    RemoveFromPair(usize, bool),
    RemovePair(usize),
}

fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap()
}

fn empty_tournament(max_players: u32) -> Tournament {
    let cfg = TournamentConfig {
        name: "Prop".into(),
        description: None,
        tournament_date: "2026-06-10".into(),
        max_players: 2,
        club_name: "Club".into(),
        address: "Somewhere".into(),
        phone: None,
        contact_person: None,
    };
    let mut t = Tournament::new("prop".into(), cfg, now()).unwrap();
    if let Some(settings) = t.settings.as_mut() {
        settings.max_players = Some(max_players);
    }
    t
}

fn pid(n: u8) -> String {
    format!("p{n}")
}

// Небольшой пул игроков, чтобы чаще ловить дубликаты.
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..12).prop_map(Op::Single),
        3 => (0u8..12, 0u8..12).prop_map(|(a, b)| Op::Doubles(a, b)),
        1 => (0u8..12).prop_map(Op::RemoveRegistered),
        1 => (0u8..12).prop_map(Op::RemoveWaiting),
        1 => (0usize..4, any::<bool>()).prop_map(|(i, first)| Op::RemoveFromPair(i, first)),
        1 => (0usize..4).prop_map(Op::RemovePair),
    ]
}

fn apply(t: &Tournament, op: &Op, pair_seq: &mut u32) -> Tournament {
    let current = Some(t);
    let next = match op {
        Op::Single(p) => register_single(current, &pid(*p), now())
            .ok()
            .map(|a| a.tournament),
        Op::Doubles(a, b) => {
            *pair_seq += 1;
            register_doubles(current, &pid(*a), &pid(*b), format!("pair-{pair_seq}"), now())
                .ok()
                .map(|a| a.tournament)
        }
        Op::RemoveRegistered(p) => remove_registered_player(current, &pid(*p), now()),
        Op::RemoveWaiting(p) => remove_waiting_player(current, &pid(*p), now()),
        Op::RemoveFromPair(i, first) => {
            let slot = if *first { PairSlot::Player1 } else { PairSlot::Player2 };
            t.pairs
                .get(*i)
                .and_then(|pair| remove_player_from_pair(current, &pair.id, slot, now()))
        }
        Op::RemovePair(i) => t
            .pairs
            .get(*i)
            .and_then(|pair| remove_pair(current, &pair.id, now())),
    };
    next.unwrap_or_else(|| t.clone())
}

fn check_invariants(t: &Tournament) -> Result<(), TestCaseError> {
    let registered: HashSet<_> = t.player_ids.iter().collect();
    let waiting: HashSet<_> = t.waiting_list_ids.iter().collect();

    prop_assert_eq!(registered.len(), t.player_ids.len(), "duplicate in player_ids");
    prop_assert_eq!(waiting.len(), t.waiting_list_ids.len(), "duplicate in waiting list");
    prop_assert!(registered.is_disjoint(&waiting), "player in both lists");

    if t.max_players() > 0 {
        prop_assert!(t.player_ids.len() <= t.max_players() as usize);
    }

    let mut paired = HashSet::new();
    for pair in &t.pairs {
        prop_assert!(pair.player1_id != pair.player2_id);
        prop_assert!(t.is_registered(&pair.player1_id));
        prop_assert!(t.is_registered(&pair.player2_id));
        prop_assert!(paired.insert(&pair.player1_id), "player in two pairs");
        prop_assert!(paired.insert(&pair.player2_id), "player in two pairs");
    }
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_for_any_sequence(
        max in 0u32..8,
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let mut t = empty_tournament(max);
        let mut pair_seq = 0;

        for op in &ops {
            t = apply(&t, op, &mut pair_seq);
            check_invariants(&t)?;
        }
    }

    #[test]
    fn doubles_move_together(
        max in 1u32..8,
        singles in prop::collection::vec(0u8..6, 0..8),
        a in 6u8..9,
        b in 9u8..12,
    ) {
        let mut t = empty_tournament(max);
        for p in singles {
            t = apply(&t, &Op::Single(p), &mut 0);
        }
        let before = t.clone();

        let admission =
            register_doubles(Some(&t), &pid(a), &pid(b), "pair-x".into(), now()).unwrap();
        let next = admission.tournament;

        match admission.placement {
            Placement::Registered => {
                prop_assert!(before.has_room_for(2));
                prop_assert!(next.is_registered(&pid(a)) && next.is_registered(&pid(b)));
                prop_assert_eq!(next.pairs.len(), before.pairs.len() + 1);
            }
            Placement::WaitingList => {
                prop_assert!(!before.has_room_for(2));
                prop_assert!(next.is_waiting(&pid(a)) && next.is_waiting(&pid(b)));
                prop_assert_eq!(next.player_ids, before.player_ids);
                prop_assert_eq!(next.pairs.len(), before.pairs.len());
            }
        }
    }

    #[test]
    fn rejected_registration_leaves_input_untouched(
        max in 0u32..5,
        singles in prop::collection::vec(0u8..6, 1..10),
        again in 0usize..10,
    ) {
        let mut t = empty_tournament(max);
        for p in &singles {
            t = apply(&t, &Op::Single(*p), &mut 0);
        }
        let target = pid(singles[again % singles.len()]);
        let before = t.clone();

        prop_assert!(register_single(Some(&t), &target, now()).is_err());
        prop_assert_eq!(t, before);
    }
}
