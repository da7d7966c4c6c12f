use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{PlayerId, Timestamp};

/// Пол игрока (необязательное поле анкеты).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

/// Предпочитаемая сторона корта.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CourtPosition {
    Drive,
    Backhand,
    #[default]
    Indifferent,
}

/// Глобальный профиль игрока – не зависит от конкретного турнира.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// До версии 1.1 телефон был необязательным.
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court_position: Option<CourtPosition>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

/// Ошибки анкеты нового игрока.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("Name and phone are required.")]
    MissingNameOrPhone,
}

/// Данные формы "новый игрок" – то, что приходит с фронта как есть.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub court_position: Option<CourtPosition>,
}

impl NewPlayer {
    /// Валидирует форму и собирает `Player`.
    ///
    /// Строки обрезаются, пустой email превращается в `None`,
    /// сторона корта по умолчанию – `Indifferent`.
    pub fn into_player(self, id: PlayerId, now: Timestamp) -> Result<Player, PlayerError> {
        let name = self.name.trim().to_string();
        let phone = self.phone.trim().to_string();

        if name.is_empty() || phone.is_empty() {
            return Err(PlayerError::MissingNameOrPhone);
        }

        let email = self
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        Ok(Player {
            id,
            name,
            phone,
            email,
            gender: self.gender,
            court_position: Some(self.court_position.unwrap_or_default()),
            created_at: now,
            updated_at: now,
        })
    }
}

impl Player {
    /// Переименование игрока; остальные поля не трогаем.
    pub fn renamed(&self, name: &str, now: Timestamp) -> Self {
        Self {
            name: name.trim().to_string(),
            updated_at: now,
            ..self.clone()
        }
    }
}
