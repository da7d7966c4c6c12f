// src/tournament/registration.rs
//! Переходы состояния регистрации.
//!
//! Каждая операция получает снэпшот турнира (или `None`, если турнир
//! не загружен) и возвращает НОВЫЙ снэпшот; входной не меняется.
//! К хранилищу этот модуль не обращается – сохранение делает вызывающий код.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Pair, PairId, PairSlot, PlayerId, Timestamp, Tournament};

/// Возможности, которые пока не реализованы.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Capability {
    GenerateMatches,
    UpdateMatchResult,
    StartTournament,
    UpdateStatus,
    ReplacePlayer,
    UpdatePair,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Capability::GenerateMatches => "generate matches",
            Capability::UpdateMatchResult => "update match result",
            Capability::StartTournament => "start tournament",
            Capability::UpdateStatus => "update status",
            Capability::ReplacePlayer => "replace player",
            Capability::UpdatePair => "update pair",
        };
        f.write_str(name)
    }
}

/// Причины отказа. `Display` – ровно тот текст, который показывает UI.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Player is required.")]
    PlayerRequired,

    #[error("Both players are required.")]
    BothPlayersRequired,

    #[error("Players must be different.")]
    PlayersMustDiffer,

    #[error("Tournament not found.")]
    TournamentNotFound,

    #[error("Players are locked.")]
    PlayersLocked,

    #[error("Player is already registered.")]
    AlreadyRegistered,

    #[error("Not implemented yet: {0}.")]
    Unsupported(Capability),
}

/// Куда попал игрок (или пара) после регистрации.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Placement {
    Registered,
    WaitingList,
}

/// Успешная регистрация: новый снэпшот + куда попали.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Admission {
    pub tournament: Tournament,
    pub placement: Placement,
}

/// Общие проверки для обеих регистраций: турнир есть, состав не заблокирован.
fn open_tournament(current: Option<&Tournament>) -> Result<&Tournament, RegistrationError> {
    let tournament = current.ok_or(RegistrationError::TournamentNotFound)?;
    if tournament.players_locked {
        return Err(RegistrationError::PlayersLocked);
    }
    Ok(tournament)
}

/// Убрать id из обоих списков.
fn drop_from_lists(t: &mut Tournament, player_id: &str) {
    t.player_ids.retain(|id| id != player_id);
    t.waiting_list_ids.retain(|id| id != player_id);
}

/// Регистрация одиночки.
///
/// Пока основной список не заполнен (или лимита нет) – туда,
/// иначе – в конец листа ожидания. Id хранится без пробелов по краям.
pub fn register_single(
    current: Option<&Tournament>,
    player_id: &str,
    now: Timestamp,
) -> Result<Admission, RegistrationError> {
    let player_id = player_id.trim();
    if player_id.is_empty() {
        return Err(RegistrationError::PlayerRequired);
    }

    let tournament = open_tournament(current)?;

    if tournament.is_entered(player_id) {
        return Err(RegistrationError::AlreadyRegistered);
    }

    let mut next = tournament.clone();
    let placement = if next.has_room_for(1) {
        next.player_ids.push(player_id.to_string());
        Placement::Registered
    } else {
        next.waiting_list_ids.push(player_id.to_string());
        Placement::WaitingList
    };
    next.updated_at = now;

    Ok(Admission {
        tournament: next,
        placement,
    })
}

/// Регистрация пары: оба игрока двигаются вместе.
///
/// Если в основном списке есть хотя бы два места – оба туда и создаётся пара;
/// иначе оба уходят в лист ожидания и пара НЕ создаётся.
pub fn register_doubles(
    current: Option<&Tournament>,
    player1_id: &str,
    player2_id: &str,
    pair_id: PairId,
    now: Timestamp,
) -> Result<Admission, RegistrationError> {
    let (player1_id, player2_id) = (player1_id.trim(), player2_id.trim());
    if player1_id.is_empty() || player2_id.is_empty() {
        return Err(RegistrationError::BothPlayersRequired);
    }
    if player1_id == player2_id {
        return Err(RegistrationError::PlayersMustDiffer);
    }

    let tournament = open_tournament(current)?;

    if tournament.is_entered(player1_id) || tournament.is_entered(player2_id) {
        return Err(RegistrationError::AlreadyRegistered);
    }

    let mut next = tournament.clone();
    let placement = if next.has_room_for(2) {
        next.player_ids.push(player1_id.to_string());
        next.player_ids.push(player2_id.to_string());
        next.pairs.push(Pair::new(
            pair_id,
            player1_id.to_string(),
            player2_id.to_string(),
            now,
        ));
        Placement::Registered
    } else {
        next.waiting_list_ids.push(player1_id.to_string());
        next.waiting_list_ids.push(player2_id.to_string());
        Placement::WaitingList
    };
    next.updated_at = now;

    Ok(Admission {
        tournament: next,
        placement,
    })
}

/// Убрать игрока: из всех списков, его пара (если была) распускается.
/// Партнёр остаётся в своём списке как одиночка.
fn remove_player(t: &Tournament, player_id: &str, now: Timestamp) -> Tournament {
    let mut next = t.clone();
    drop_from_lists(&mut next, player_id);
    next.pairs.retain(|p| !p.contains(player_id));
    next.updated_at = now;
    next
}

/// Снять игрока из основного списка.
///
/// `None` – ничего не изменилось (нет турнира, состав заблокирован,
/// игрока нет в основном списке).
pub fn remove_registered_player(
    current: Option<&Tournament>,
    player_id: &str,
    now: Timestamp,
) -> Option<Tournament> {
    let t = current.filter(|t| !t.players_locked)?;
    let player_id = player_id.trim();
    if !t.is_registered(player_id) {
        return None;
    }
    Some(remove_player(t, player_id, now))
}

/// Снять игрока из листа ожидания. Те же правила, что и для основного списка.
pub fn remove_waiting_player(
    current: Option<&Tournament>,
    player_id: &str,
    now: Timestamp,
) -> Option<Tournament> {
    let t = current.filter(|t| !t.players_locked)?;
    let player_id = player_id.trim();
    if !t.is_waiting(player_id) {
        return None;
    }
    Some(remove_player(t, player_id, now))
}

/// Убрать одного участника пары.
///
/// Пара удаляется целиком (не "ужимается" до одного игрока), выбранный
/// участник уходит из обоих списков, партнёр остаётся одиночкой.
pub fn remove_player_from_pair(
    current: Option<&Tournament>,
    pair_id: &str,
    slot: PairSlot,
    now: Timestamp,
) -> Option<Tournament> {
    let t = current.filter(|t| !t.players_locked)?;
    let target: PlayerId = t.find_pair(pair_id)?.member(slot).clone();

    let mut next = t.clone();
    next.pairs.retain(|p| p.id != pair_id);
    drop_from_lists(&mut next, &target);
    next.updated_at = now;
    Some(next)
}

/// Удалить пару вместе с обоими игроками.
pub fn remove_pair(
    current: Option<&Tournament>,
    pair_id: &str,
    now: Timestamp,
) -> Option<Tournament> {
    let t = current.filter(|t| !t.players_locked)?;
    let pair = t.find_pair(pair_id)?.clone();

    let mut next = t.clone();
    next.pairs.retain(|p| p.id != pair_id);
    for member in pair.members() {
        drop_from_lists(&mut next, member);
    }
    next.updated_at = now;
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, TournamentSettings, TournamentStatus};
    use chrono::{TimeZone, Utc};

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap()
    }

    fn tournament(max: u32) -> Tournament {
        Tournament {
            id: "t1".into(),
            name: "Test".into(),
            description: None,
            status: TournamentStatus::Draft,
            players_locked: false,
            tournament_date: "2026-02-01".into(),
            location: Location::default(),
            created_at: t0(),
            updated_at: t0(),
            player_ids: vec![],
            waiting_list_ids: vec![],
            pairs: vec![],
            matches: vec![],
            settings: Some(TournamentSettings {
                allow_auto_pairing: None,
                max_players: Some(max),
            }),
        }
    }

    #[test]
    fn blank_player_is_rejected_before_lookup() {
        let err = register_single(None, "  ", t0()).unwrap_err();
        assert_eq!(err, RegistrationError::PlayerRequired);
    }

    #[test]
    fn unbounded_when_max_is_zero() {
        let mut t = tournament(0);
        for i in 0..50 {
            t = register_single(Some(&t), &format!("p{i}"), t0()).unwrap().tournament;
        }
        assert_eq!(t.player_ids.len(), 50);
        assert!(t.waiting_list_ids.is_empty());
    }

    #[test]
    fn doubles_reject_when_one_player_waiting() {
        let mut t = tournament(2);
        t.waiting_list_ids.push("p2".into());
        let err = register_doubles(Some(&t), "p1", "p2", "x".into(), t0()).unwrap_err();
        assert_eq!(err, RegistrationError::AlreadyRegistered);
    }

    #[test]
    fn unsupported_message_names_capability() {
        let err = RegistrationError::Unsupported(Capability::GenerateMatches);
        assert_eq!(err.to_string(), "Not implemented yet: generate matches.");
    }
}
