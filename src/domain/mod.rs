//! Доменная модель регистрации: игроки, пары, матчи, турниры и их сводки.

pub mod matches;
pub mod pair;
pub mod player;
pub mod summary;
pub mod tournament;

// Базовые идентификаторы. Строки, потому что записи из локального
// хранилища фронта уже используют строковые id.
pub type PlayerId = String;
pub type PairId = String;
pub type MatchId = String;
pub type TournamentId = String;

/// Все временные метки – UTC, в JSON пишутся как RFC 3339.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// `null` в старых записях читается так же, как отсутствующее поле.
///
/// Используется вместе с `#[serde(default)]`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;

    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Pair и т.п.
pub use matches::*;
pub use pair::*;
pub use player::*;
pub use summary::*;
pub use tournament::*;
