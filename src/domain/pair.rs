use serde::{Deserialize, Serialize};

use crate::domain::{PairId, PlayerId, Timestamp};

/// Пара для игры в паре (doubles).
///
/// Создаётся только через регистрацию пары и всегда ссылается
/// на двух разных игроков.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    pub id: PairId,
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub player1_id: PlayerId,
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub player2_id: PlayerId,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
    /// Денормализованные имена – только для отображения.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player1_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player2_name: Option<String>,
}

/// Какое место в паре.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PairSlot {
    Player1,
    Player2,
}

impl Pair {
    pub fn new(id: PairId, player1_id: PlayerId, player2_id: PlayerId, now: Timestamp) -> Self {
        Self {
            id,
            player1_id,
            player2_id,
            created_at: now,
            updated_at: now,
            player1_name: None,
            player2_name: None,
        }
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.player1_id == player_id || self.player2_id == player_id
    }

    pub fn member(&self, slot: PairSlot) -> &PlayerId {
        match slot {
            PairSlot::Player1 => &self.player1_id,
            PairSlot::Player2 => &self.player2_id,
        }
    }

    pub fn members(&self) -> [&PlayerId; 2] {
        [&self.player1_id, &self.player2_id]
    }

    /// Обе ссылки на месте и различаются.
    ///
    /// Записи старых версий могли содержать "полупары" – их отбрасываем при чтении.
    pub fn is_complete(&self) -> bool {
        !self.player1_id.is_empty()
            && !self.player2_id.is_empty()
            && self.player1_id != self.player2_id
    }
}
