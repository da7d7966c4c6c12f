use serde::{Deserialize, Serialize};

use crate::domain::{MatchId, PairId, Timestamp, TournamentId};

/// Статус матча.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// Победитель матча.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Pair1,
    Pair2,
}

/// Матч: две пары, четыре игрока.
///
/// Пока только модель данных – генерация матчей и запись результатов
/// не реализованы (см. `tournament::session`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub pair1_id: PairId,
    pub pair2_id: PairId,
    pub status: MatchStatus,
    /// ISO-дата.
    pub scheduled_date: String,
    /// Формат HH:mm.
    pub scheduled_time: String,
    #[serde(default)]
    pub result: Option<MatchResult>,
    /// Свободный текст, например "6-4, 6-2".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}
