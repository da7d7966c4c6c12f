// tests/session_tests.rs

use chrono::{TimeZone, Utc};

use padelsync::domain::{Timestamp, Tournament, TournamentConfig, TournamentPatch};
use padelsync::infra::{InMemoryStore, TournamentRepository, STORAGE_VERSION};
use padelsync::tournament::{Capability, Placement, RegistrationError, TournamentSession};

fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 4, 4, 16, 0, 0).unwrap()
}

fn seeded_repo(max_players: u32) -> TournamentRepository<InMemoryStore> {
    let cfg = TournamentConfig {
        name: "Session Cup".into(),
        description: None,
        tournament_date: "2026-04-20".into(),
        max_players,
        club_name: "Club".into(),
        address: "Road 5".into(),
        phone: None,
        contact_person: None,
    };
    let t = Tournament::new("s1".into(), cfg, now()).unwrap();

    let mut repo = TournamentRepository::new(InMemoryStore::new());
    repo.save_tournament(&t).unwrap();
    repo
}

#[test]
fn open_initializes_storage_and_loads_tournament() {
    let mut repo = seeded_repo(4);
    {
        let session = TournamentSession::open(&mut repo, Some("s1"));
        assert_eq!(session.tournament().map(|t| t.name.as_str()), Some("Session Cup"));
    }
    assert_eq!(repo.storage_version().as_deref(), Some(STORAGE_VERSION));

    let empty = TournamentSession::open(&mut repo, None);
    assert!(empty.tournament().is_none());
}

#[test]
fn accepted_operations_are_persisted() {
    let mut repo = seeded_repo(2);
    {
        let mut session = TournamentSession::open(&mut repo, Some("s1"));
        assert_eq!(session.register_single("p1", now()), Ok(Placement::Registered));
        assert_eq!(
            session.register_doubles("p2", "p3", "pair-1".into(), now()),
            Ok(Placement::WaitingList)
        );
        assert!(session.take_sync_error().is_none());
    }

    let stored = repo.load_tournament("s1").unwrap();
    assert_eq!(stored.player_ids, vec!["p1".to_string()]);
    assert_eq!(stored.waiting_list_ids, vec!["p2".to_string(), "p3".to_string()]);
    assert_eq!(repo.load_summaries()[0].player_count, 1);
}

#[test]
fn rejected_and_noop_operations_do_not_write() {
    let mut repo = seeded_repo(4);
    let before = repo.load_tournament("s1").unwrap();

    {
        let mut session = TournamentSession::open(&mut repo, Some("s1"));
        assert_eq!(
            session.register_doubles("p1", "p1", "x".into(), now()),
            Err(RegistrationError::PlayersMustDiffer)
        );
        assert!(!session.remove_registered_player("ghost", now()));
        assert!(!session.remove_waiting_player("ghost", now()));
        assert!(!session.remove_pair("nope", now()));
    }

    assert_eq!(repo.load_tournament("s1"), Some(before));
}

#[test]
fn failed_save_keeps_snapshot_and_reports_error() {
    let loaded = seeded_repo(4).load_tournament("s1");

    let mut broken = TournamentRepository::new(InMemoryStore::unavailable());
    let mut session = TournamentSession::open(&mut broken, None);
    session.replace(loaded);
    assert!(session.take_sync_error().is_some());

    assert_eq!(session.register_single("p1", now()), Ok(Placement::Registered));
    let err = session.take_sync_error().unwrap();
    assert!(err.contains("unavailable"));
    assert!(session.tournament().unwrap().is_registered("p1"));
}

#[test]
fn update_patches_loaded_tournament_only() {
    let mut repo = seeded_repo(4);
    {
        let mut session = TournamentSession::open(&mut repo, Some("s1"));
        let patch = TournamentPatch {
            description: Some("Bring water".into()),
            ..TournamentPatch::default()
        };
        assert_eq!(session.update(patch, now()), Ok(true));
    }
    assert_eq!(
        repo.load_tournament("s1").unwrap().description.as_deref(),
        Some("Bring water")
    );

    let mut missing = TournamentSession::open(&mut repo, Some("nope"));
    assert_eq!(missing.update(TournamentPatch::default(), now()), Ok(false));
}

#[test]
fn unsupported_capabilities_leave_state_alone() {
    let mut repo = seeded_repo(4);
    let mut session = TournamentSession::open(&mut repo, Some("s1"));
    let before = session.tournament().cloned();

    let results = [
        (session.generate_matches(), Capability::GenerateMatches),
        (session.update_match_result(), Capability::UpdateMatchResult),
        (session.start_tournament(), Capability::StartTournament),
        (session.update_status(), Capability::UpdateStatus),
        (session.replace_player(), Capability::ReplacePlayer),
        (session.update_pair(), Capability::UpdatePair),
    ];
    for (result, capability) in results {
        assert_eq!(result, Err(RegistrationError::Unsupported(capability)));
    }

    assert_eq!(session.tournament().cloned(), before);
    assert_eq!(
        session.start_tournament().unwrap_err().to_string(),
        "Not implemented yet: start tournament."
    );
}
