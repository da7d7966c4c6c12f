// src/domain/tournament.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::matches::Match;
use crate::domain::pair::Pair;
use crate::domain::{PlayerId, Timestamp, TournamentId};

/// Минимально допустимый лимит игроков при создании турнира.
pub const MIN_MAX_PLAYERS: u32 = 2;

/// Статус турнира. Используется для UI и жизненного цикла,
/// блокировку состава не заменяет (за неё отвечает `players_locked`).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Draft,
    InProgress,
    Completed,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Draft => "draft",
            TournamentStatus::InProgress => "in_progress",
            TournamentStatus::Completed => "completed",
        }
    }
}

/// Место проведения. Клуб и адрес обязательны, остальное – по желанию.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub club_name: String,
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
}

/// Настройки турнира.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSettings {
    /// Может ли приложение само собирать пары.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_auto_pairing: Option<bool>,
    /// Лимит зарегистрированных игроков. `None` или 0 – без лимита,
    /// сверх лимита включается лист ожидания.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_players: Option<u32>,
}

/// Ошибки создания турнира (форма создания).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TournamentError {
    #[error("Name is required.")]
    MissingName,

    #[error("Tournament date is required.")]
    MissingDate,

    #[error("Max players must be an integer of at least 2.")]
    InvalidMaxPlayers,

    #[error("Club name and address are required.")]
    MissingLocation,

    #[error("Max players cannot be lower than the number of registered players.")]
    MaxBelowRegistered,
}

/// Конфигурация турнира.
/// Всё, что приходит при создании турнира через фронт.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub name: String,
    pub description: Option<String>,
    /// ISO-дата (YYYY-MM-DD).
    pub tournament_date: String,
    pub max_players: u32,
    pub club_name: String,
    pub address: String,
    pub phone: Option<String>,
    pub contact_person: Option<String>,
}

fn trimmed_opt(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl TournamentConfig {
    /// Проверки в том же порядке, в каком их показывает форма.
    pub fn validate_full(&self) -> Result<(), TournamentError> {
        if self.name.trim().is_empty() {
            return Err(TournamentError::MissingName);
        }

        if self.tournament_date.trim().is_empty() {
            return Err(TournamentError::MissingDate);
        }

        if self.max_players < MIN_MAX_PLAYERS {
            return Err(TournamentError::InvalidMaxPlayers);
        }

        if self.club_name.trim().is_empty() || self.address.trim().is_empty() {
            return Err(TournamentError::MissingLocation);
        }

        Ok(())
    }
}

/// Частичное обновление несущественных для состава полей.
///
/// Структурные поля (списки игроков, пары, блокировка, статус)
/// сюда намеренно не входят.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TournamentPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tournament_date: Option<String>,
    pub location: Option<Location>,
    pub settings: Option<TournamentSettings>,
}

/// Основной объект турнира – корневой агрегат.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub status: TournamentStatus,
    /// Односторонний флаг: false → true при старте, обратно не сбрасывается.
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub players_locked: bool,
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub tournament_date: String,
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub location: Location,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,

    /// Зарегистрированные игроки (глобальные id).
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub player_ids: Vec<PlayerId>,
    /// Лист ожидания, в порядке поступления.
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub waiting_list_ids: Vec<PlayerId>,
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub pairs: Vec<Pair>,
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub matches: Vec<Match>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<TournamentSettings>,
}

impl Tournament {
    pub fn new(
        id: TournamentId,
        config: TournamentConfig,
        now: Timestamp,
    ) -> Result<Self, TournamentError> {
        config.validate_full()?;

        Ok(Self {
            id,
            name: config.name.trim().to_string(),
            description: trimmed_opt(&config.description),
            status: TournamentStatus::Draft,
            players_locked: false,
            tournament_date: config.tournament_date.trim().to_string(),
            location: Location {
                club_name: config.club_name.trim().to_string(),
                address: config.address.trim().to_string(),
                phone: trimmed_opt(&config.phone),
                contact_person: trimmed_opt(&config.contact_person),
            },
            created_at: now,
            updated_at: now,
            player_ids: Vec::new(),
            waiting_list_ids: Vec::new(),
            pairs: Vec::new(),
            matches: Vec::new(),
            settings: Some(TournamentSettings {
                allow_auto_pairing: None,
                max_players: Some(config.max_players),
            }),
        })
    }

    /// Лимит игроков; 0 – без ограничения.
    pub fn max_players(&self) -> u32 {
        self.settings
            .as_ref()
            .and_then(|s| s.max_players)
            .unwrap_or(0)
    }

    /// Сколько мест ещё свободно в основном списке.
    ///
    /// `None` – лимита нет.
    pub fn remaining_capacity(&self) -> Option<usize> {
        match self.max_players() {
            0 => None,
            max => Some((max as usize).saturating_sub(self.player_ids.len())),
        }
    }

    /// Есть ли место хотя бы для `seats` игроков.
    pub fn has_room_for(&self, seats: usize) -> bool {
        self.remaining_capacity().map_or(true, |left| left >= seats)
    }

    pub fn is_registered(&self, player_id: &str) -> bool {
        self.player_ids.iter().any(|id| id == player_id)
    }

    pub fn is_waiting(&self, player_id: &str) -> bool {
        self.waiting_list_ids.iter().any(|id| id == player_id)
    }

    /// Игрок уже есть в одном из списков.
    pub fn is_entered(&self, player_id: &str) -> bool {
        self.is_registered(player_id) || self.is_waiting(player_id)
    }

    pub fn find_pair(&self, pair_id: &str) -> Option<&Pair> {
        self.pairs.iter().find(|p| p.id == pair_id)
    }

    pub fn pair_of(&self, player_id: &str) -> Option<&Pair> {
        self.pairs.iter().find(|p| p.contains(player_id))
    }

    /// Зарегистрированные игроки, не входящие ни в одну пару.
    pub fn registered_singles(&self) -> impl Iterator<Item = &PlayerId> {
        self.player_ids
            .iter()
            .filter(move |id| self.pair_of(id).is_none())
    }

    /// Применить частичное обновление и проставить `updated_at`.
    ///
    /// Результат проверяется теми же правилами, что и форма создания;
    /// лимит нельзя опустить ниже числа уже зарегистрированных.
    pub fn patched(&self, patch: TournamentPatch, now: Timestamp) -> Result<Self, TournamentError> {
        let mut next = self.clone();

        if let Some(name) = patch.name {
            next.name = name.trim().to_string();
        }
        if patch.description.is_some() {
            next.description = trimmed_opt(&patch.description);
        }
        if let Some(date) = patch.tournament_date {
            next.tournament_date = date.trim().to_string();
        }
        if let Some(location) = patch.location {
            next.location = Location {
                club_name: location.club_name.trim().to_string(),
                address: location.address.trim().to_string(),
                phone: trimmed_opt(&location.phone),
                contact_person: trimmed_opt(&location.contact_person),
            };
        }
        if let Some(settings) = patch.settings {
            next.settings = Some(settings);
        }

        next.validate_details()?;
        next.updated_at = now;
        Ok(next)
    }

    fn validate_details(&self) -> Result<(), TournamentError> {
        if self.name.trim().is_empty() {
            return Err(TournamentError::MissingName);
        }
        if self.tournament_date.trim().is_empty() {
            return Err(TournamentError::MissingDate);
        }

        // Отсутствующий лимит у старых записей – "без ограничения".
        let max = self.settings.as_ref().and_then(|s| s.max_players);
        if let Some(max) = max {
            if max < MIN_MAX_PLAYERS {
                return Err(TournamentError::InvalidMaxPlayers);
            }
            if (max as usize) < self.player_ids.len() {
                return Err(TournamentError::MaxBelowRegistered);
            }
        }

        if self.location.club_name.trim().is_empty() || self.location.address.trim().is_empty() {
            return Err(TournamentError::MissingLocation);
        }
        Ok(())
    }

    /// Нормализация записи, прочитанной из хранилища.
    ///
    /// Отсутствующие поля уже заполнены serde-дефолтами;
    /// здесь выкидываем неполные пары из старых версий схемы.
    pub fn normalized(mut self) -> Self {
        self.pairs.retain(Pair::is_complete);
        self
    }
}
