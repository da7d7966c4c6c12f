// tests/domain_tests.rs

use chrono::{TimeZone, Utc};

use padelsync::domain::{
    sort_by_date, Gender, Location, NewPlayer, Timestamp, Tournament, TournamentConfig,
    TournamentError, TournamentPatch, TournamentSettings, TournamentStatus, TournamentSummary,
};
use padelsync::infra::{DeterministicRng, IdGenerator};

fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

fn valid_config() -> TournamentConfig {
    TournamentConfig {
        name: "Open".into(),
        description: None,
        tournament_date: "2026-02-01".into(),
        max_players: 16,
        club_name: "Club".into(),
        address: "Street 1".into(),
        phone: None,
        contact_person: None,
    }
}

fn summary(id: &str, date: &str) -> TournamentSummary {
    TournamentSummary {
        id: id.into(),
        name: id.into(),
        status: TournamentStatus::Draft,
        tournament_date: date.into(),
        club_name: String::new(),
        player_count: 0,
        match_count: 0,
        created_at: now(),
    }
}

//
// форма турнира
//

#[test]
fn config_errors_follow_form_order() {
    let mut cfg = valid_config();
    cfg.name = " ".into();
    cfg.tournament_date = String::new();
    cfg.max_players = 0;
    assert_eq!(cfg.validate_full(), Err(TournamentError::MissingName));

    cfg.name = "Open".into();
    assert_eq!(cfg.validate_full(), Err(TournamentError::MissingDate));

    cfg.tournament_date = "2026-02-01".into();
    assert_eq!(cfg.validate_full(), Err(TournamentError::InvalidMaxPlayers));

    cfg.max_players = 2;
    cfg.address = "  ".into();
    let err = cfg.validate_full().unwrap_err();
    assert_eq!(err.to_string(), "Club name and address are required.");
}

#[test]
fn new_tournament_trims_and_defaults() {
    let mut cfg = valid_config();
    cfg.name = "  Open  ".into();
    cfg.contact_person = Some(" Luis ".into());
    cfg.phone = Some("   ".into());

    let t = Tournament::new("t1".into(), cfg, now()).unwrap();

    assert_eq!(t.name, "Open");
    assert_eq!(t.status, TournamentStatus::Draft);
    assert!(!t.players_locked);
    assert_eq!(t.location.contact_person.as_deref(), Some("Luis"));
    assert_eq!(t.location.phone, None);
    assert_eq!(t.max_players(), 16);
    assert_eq!(t.created_at, t.updated_at);
}

#[test]
fn patch_keeps_roster_and_stamps_time() {
    let mut t = Tournament::new("t1".into(), valid_config(), now()).unwrap();
    t.player_ids.push("p1".into());
    let later = now() + chrono::Duration::minutes(3);

    let next = t.patched(
        TournamentPatch {
            tournament_date: Some("2026-02-08".into()),
            ..TournamentPatch::default()
        },
        later,
    )
    .unwrap();

    assert_eq!(next.tournament_date, "2026-02-08");
    assert_eq!(next.player_ids, t.player_ids);
    assert_eq!(next.name, "Open");
    assert_eq!(next.updated_at, later);
}

#[test]
fn patch_is_validated_like_the_form() {
    let t = Tournament::new("t1".into(), valid_config(), now()).unwrap();

    let blank_name = TournamentPatch {
        name: Some("   ".into()),
        ..TournamentPatch::default()
    };
    assert_eq!(t.patched(blank_name, now()), Err(TournamentError::MissingName));

    let tiny_cap = TournamentPatch {
        settings: Some(TournamentSettings {
            allow_auto_pairing: None,
            max_players: Some(1),
        }),
        ..TournamentPatch::default()
    };
    assert_eq!(t.patched(tiny_cap, now()), Err(TournamentError::InvalidMaxPlayers));

    let no_address = TournamentPatch {
        location: Some(Location {
            club_name: "Club".into(),
            address: " ".into(),
            ..Location::default()
        }),
        ..TournamentPatch::default()
    };
    assert_eq!(t.patched(no_address, now()), Err(TournamentError::MissingLocation));
}

#[test]
fn patch_cannot_drop_cap_below_registered_count() {
    let mut t = Tournament::new("t1".into(), valid_config(), now()).unwrap();
    t.player_ids = vec!["p1".into(), "p2".into(), "p3".into()];

    let cap = |max: u32| TournamentPatch {
        settings: Some(TournamentSettings {
            allow_auto_pairing: None,
            max_players: Some(max),
        }),
        ..TournamentPatch::default()
    };

    let err = t.patched(cap(2), now()).unwrap_err();
    assert_eq!(err, TournamentError::MaxBelowRegistered);
    assert_eq!(
        err.to_string(),
        "Max players cannot be lower than the number of registered players."
    );

    let next = t.patched(cap(3), now()).unwrap();
    assert_eq!(next.max_players(), 3);
}

#[test]
fn tournament_json_uses_camel_case() {
    let t = Tournament::new("t1".into(), valid_config(), now()).unwrap();
    let json = serde_json::to_value(&t).unwrap();

    assert_eq!(json["playersLocked"], false);
    assert_eq!(json["waitingListIds"], serde_json::json!([]));
    assert_eq!(json["location"]["clubName"], "Club");
    assert_eq!(json["settings"]["maxPlayers"], 16);
    assert_eq!(json["status"], "draft");
}

//
// анкета игрока
//

#[test]
fn new_player_requires_name_and_phone() {
    let err = NewPlayer {
        name: "".into(),
        phone: "600".into(),
        ..NewPlayer::default()
    }
    .into_player("p1".into(), now())
    .unwrap_err();
    assert_eq!(err.to_string(), "Name and phone are required.");
}

#[test]
fn new_player_keeps_optional_fields() {
    let p = NewPlayer {
        name: "Ana".into(),
        phone: " 600 ".into(),
        email: Some(" ana@example.com ".into()),
        gender: Some(Gender::Female),
        court_position: None,
    }
    .into_player("p1".into(), now())
    .unwrap();

    assert_eq!(p.phone, "600");
    assert_eq!(p.email.as_deref(), Some("ana@example.com"));
    assert_eq!(p.gender, Some(Gender::Female));

    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json["courtPosition"], "indifferent");
}

//
// сводки
//

#[test]
fn summary_mirrors_tournament() {
    let mut t = Tournament::new("t1".into(), valid_config(), now()).unwrap();
    t.player_ids = vec!["a".into(), "b".into()];
    t.waiting_list_ids = vec!["c".into()];

    let s = TournamentSummary::from(&t);
    assert_eq!(s.player_count, 2);
    assert_eq!(s.club_name, "Club");
    assert_eq!(s.tournament_date, "2026-02-01");
}

#[test]
fn sort_by_date_accepts_both_formats() {
    let mut list = vec![
        summary("none", ""),
        summary("garbage", "soon"),
        summary("late", "2026-05-01T10:00:00Z"),
        summary("early", "2026-03-01"),
    ];

    sort_by_date(&mut list);

    let ids: Vec<_> = list.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["early", "late", "none", "garbage"]);
}

//
// id
//

#[test]
fn ids_are_reproducible_with_seed() {
    let mut a = IdGenerator::with_rng(DeterministicRng::from_seed(42));
    let mut b = IdGenerator::with_rng(DeterministicRng::from_seed(42));

    let first = a.next_id(now());
    assert_eq!(first, b.next_id(now()));
    assert_ne!(first, a.next_id(now()));
    assert!(first.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}
