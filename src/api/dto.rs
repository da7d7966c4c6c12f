use serde::{Deserialize, Serialize};

use crate::domain::{PairId, Player, PlayerId, TournamentId, TournamentStatus, TournamentSummary};
use crate::tournament::Placement;

/// Игрок со смапленным именем.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerRefDto {
    pub player_id: PlayerId,
    pub name: String,
}

/// Пара для отображения в списке зарегистрированных.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PairViewDto {
    pub pair_id: PairId,
    pub player1: PlayerRefDto,
    pub player2: PlayerRefDto,
}

/// DTO страницы турнира.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentDetailDto {
    pub tournament_id: TournamentId,
    pub name: String,
    pub description: Option<String>,
    pub status: TournamentStatus,
    pub tournament_date: String,
    /// "Клуб • адрес".
    pub location_summary: String,
    pub players_locked: bool,
    /// 0 – без лимита.
    pub max_players: u32,
    pub registered_count: usize,
    /// Зарегистрированные одиночки (не входящие в пары).
    pub singles: Vec<PlayerRefDto>,
    pub pairs: Vec<PairViewDto>,
    pub waiting_list: Vec<PlayerRefDto>,
    pub match_count: usize,
}

/// Результат регистрации в том виде, в каком его ждёт форма:
/// `ok` + текст ошибки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationResultDto {
    pub ok: bool,
    pub error: Option<String>,
    pub placement: Option<Placement>,
}

impl RegistrationResultDto {
    pub fn accepted(placement: Placement) -> Self {
        Self {
            ok: true,
            error: None,
            placement: Some(placement),
        }
    }

    pub fn rejected(reason: impl ToString) -> Self {
        Self {
            ok: false,
            error: Some(reason.to_string()),
            placement: None,
        }
    }
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CommandResponse {
    /// Успешный результат без доп.данных.
    Ok,

    /// Команда ничего не изменила (no-op).
    Unchanged,

    TournamentCreated(TournamentDetailDto),

    /// Состояние турнира после команды.
    TournamentState(TournamentDetailDto),

    /// Итог регистрации + актуальное состояние турнира (если он есть).
    Registration {
        result: RegistrationResultDto,
        tournament: Option<TournamentDetailDto>,
    },

    PlayerCreated(Player),
}

/// Карточка турнира в списке.
pub type TournamentCardDto = TournamentSummary;
