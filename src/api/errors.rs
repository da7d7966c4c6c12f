use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{PlayerError, PlayerId, TournamentError, TournamentId};
use crate::infra::repository::PersistenceError;

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (невалидная форма и т.п.).
    #[error("{0}")]
    BadRequest(String),

    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// Запись в хранилище не удалась.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<TournamentError> for ApiError {
    fn from(err: TournamentError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<PlayerError> for ApiError {
    fn from(err: PlayerError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        ApiError::Storage(err.to_string())
    }
}
