// src/infra/repository.rs
//! Синхронизация с хранилищем: полная запись турнира + сводка в списке,
//! глобальный справочник игроков и маркер версии схемы.
//!
//! Правила отказов:
//! - недоступное хранилище → чтения возвращают пустой результат;
//! - "best-effort" записи (версия, удаление) → no-op с логом;
//! - сохранение полных записей (турнир, список сводок, игроки) → ошибка наружу.
//!
//! Коллекции (сводки, игроки) читаются поэлементно: нечитаемая запись
//! пропускается при чтении, но сохраняется как есть при перезаписи списка.
//! Если сам список прочитать не удалось, он не перезаписывается.
//!
//! Две записи в `save_tournament` не атомарны: если процесс упадёт между ними,
//! сводка останется старой до следующего сохранения.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::domain::{Player, Tournament, TournamentSummary};
use crate::infra::persistence::{KeyValueStore, StoreError};

pub const STORAGE_VERSION: &str = "1.1";
pub const TOURNAMENTS_KEY: &str = "padelsync_tournaments";
pub const PLAYERS_KEY: &str = "padelsync_players";
pub const VERSION_KEY: &str = "padelsync_version";
pub const TOURNAMENT_PREFIX: &str = "padelsync_tournament_";

/// Ключ полной записи турнира.
pub fn tournament_key(id: &str) -> String {
    format!("{TOURNAMENT_PREFIX}{id}")
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Коллекция в хранилище не является JSON-массивом.
    #[error("stored collection {key} is unreadable, refusing to overwrite it")]
    UnreadableCollection { key: String },
}

/// Репозиторий поверх произвольного `KeyValueStore`.
#[derive(Debug)]
pub struct TournamentRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> TournamentRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // ---------------------------------------------------------------
    // низкоуровневые помощники
    // ---------------------------------------------------------------

    /// Прочитать и разобрать JSON. Любая проблема → `None` (с логом).
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.store.is_available() {
            return None;
        }

        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key, %err, "failed to read from storage");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, %err, "malformed record in storage, treating as absent");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), PersistenceError> {
        if !self.store.is_available() {
            return Err(StoreError::Unavailable.into());
        }

        let data = serde_json::to_string(value)?;
        self.store.set(key, &data)?;
        Ok(())
    }

    /// Сырые элементы коллекции. Отсутствующий ключ – пустой список.
    fn read_entries(&self, key: &str) -> Result<Vec<Value>, PersistenceError> {
        if !self.store.is_available() {
            return Err(StoreError::Unavailable.into());
        }

        let Some(raw) = self.store.get(key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(key, %err, "stored collection is not a JSON array");
                Err(PersistenceError::UnreadableCollection {
                    key: key.to_string(),
                })
            }
        }
    }

    /// Разобрать коллекцию поэлементно, пропуская нечитаемые записи.
    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let entries = match self.read_entries(key) {
            Ok(entries) => entries,
            Err(PersistenceError::Store(StoreError::Unavailable)) => return Vec::new(),
            Err(err) => {
                warn!(key, %err, "failed to read collection");
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(item) => Some(item),
                Err(err) => {
                    warn!(key, index, %err, "skipping malformed entry");
                    None
                }
            })
            .collect()
    }

    /// Прочитать сырые элементы, поменять их и записать обратно.
    ///
    /// Ошибка чтения (кроме отсутствия ключа) прерывает операцию до записи.
    fn modify_collection<F>(&mut self, key: &str, change: F) -> Result<(), PersistenceError>
    where
        F: FnOnce(&mut Vec<Value>),
    {
        let mut entries = self.read_entries(key)?;
        change(&mut entries);
        self.write_json(key, &entries)
    }

    // ---------------------------------------------------------------
    // версия схемы
    // ---------------------------------------------------------------

    pub fn storage_version(&self) -> Option<String> {
        if !self.store.is_available() {
            return None;
        }
        self.store.get(VERSION_KEY).ok().flatten()
    }

    pub fn set_storage_version(&mut self, version: &str) {
        if !self.store.is_available() {
            return;
        }
        if let Err(err) = self.store.set(VERSION_KEY, version) {
            error!(%err, "failed to set storage version");
        }
    }

    /// Записать маркер версии, если его ещё нет.
    ///
    /// Миграций пока нет: старые записи просто терпимо читаются.
    pub fn initialize(&mut self) {
        if self.storage_version().is_none() {
            self.set_storage_version(STORAGE_VERSION);
        }
    }

    // ---------------------------------------------------------------
    // турниры
    // ---------------------------------------------------------------

    /// Загрузить турнир с нормализацией полей старых версий.
    pub fn load_tournament(&self, id: &str) -> Option<Tournament> {
        self.read_json::<Tournament>(&tournament_key(id))
            .map(Tournament::normalized)
    }

    /// Сохранить полную запись и обновить сводку в списке.
    pub fn save_tournament(&mut self, tournament: &Tournament) -> Result<(), PersistenceError> {
        let key = tournament_key(&tournament.id);

        if let Err(err) = self.write_json(&key, tournament) {
            error!(tournament_id = %tournament.id, %err, "failed to save tournament");
            return Err(err);
        }

        if let Err(err) = self.upsert_summary(tournament) {
            error!(tournament_id = %tournament.id, %err, "failed to update tournament summary");
            return Err(err);
        }

        debug!(
            tournament_id = %tournament.id,
            players = tournament.player_ids.len(),
            waiting = tournament.waiting_list_ids.len(),
            "tournament saved"
        );
        Ok(())
    }

    /// Удалить полную запись и сводку. Ошибки только логируются.
    pub fn delete_tournament(&mut self, id: &str) {
        if !self.store.is_available() {
            return;
        }

        if let Err(err) = self.store.remove(&tournament_key(id)) {
            error!(tournament_id = id, %err, "failed to delete tournament");
            return;
        }

        if let Err(err) = self.remove_summary(id) {
            error!(tournament_id = id, %err, "failed to remove tournament summary");
        }
    }

    // ---------------------------------------------------------------
    // сводки
    // ---------------------------------------------------------------

    /// Список сводок в порядке вставки.
    pub fn load_summaries(&self) -> Vec<TournamentSummary> {
        self.read_collection(TOURNAMENTS_KEY)
    }

    pub fn save_summaries(
        &mut self,
        summaries: &[TournamentSummary],
    ) -> Result<(), PersistenceError> {
        self.write_json(TOURNAMENTS_KEY, summaries)
    }

    /// Заменить сводку турнира на месте или дописать в конец.
    pub fn upsert_summary(&mut self, tournament: &Tournament) -> Result<(), PersistenceError> {
        let summary = serde_json::to_value(TournamentSummary::from(tournament))?;
        self.modify_collection(TOURNAMENTS_KEY, |entries| {
            upsert_entry(entries, &tournament.id, summary)
        })
    }

    pub fn remove_summary(&mut self, id: &str) -> Result<(), PersistenceError> {
        self.modify_collection(TOURNAMENTS_KEY, |entries| {
            entries.retain(|entry| !has_id(entry, id))
        })
    }

    // ---------------------------------------------------------------
    // глобальные игроки
    // ---------------------------------------------------------------

    pub fn load_players(&self) -> Vec<Player> {
        self.read_collection(PLAYERS_KEY)
    }

    pub fn save_players(&mut self, players: &[Player]) -> Result<(), PersistenceError> {
        self.write_json(PLAYERS_KEY, players).inspect_err(|err| {
            error!(%err, "failed to save players");
        })
    }

    pub fn find_player(&self, id: &str) -> Option<Player> {
        self.load_players().into_iter().find(|p| p.id == id)
    }

    /// Добавить игрока. Идемпотентно по id: повторное добавление ничего не меняет.
    pub fn add_player(&mut self, player: Player) -> Result<(), PersistenceError> {
        let value = serde_json::to_value(&player)?;
        self.modify_players(|entries| {
            if !entries.iter().any(|entry| has_id(entry, &player.id)) {
                entries.push(value);
            }
        })
    }

    /// Заменить игрока с тем же id (если такого нет – список не меняется).
    pub fn update_player(&mut self, player: Player) -> Result<(), PersistenceError> {
        let value = serde_json::to_value(&player)?;
        self.modify_players(|entries| {
            if let Some(entry) = entries.iter_mut().find(|entry| has_id(entry, &player.id)) {
                *entry = value;
            }
        })
    }

    pub fn delete_player(&mut self, id: &str) -> Result<(), PersistenceError> {
        self.modify_players(|entries| entries.retain(|entry| !has_id(entry, id)))
    }

    fn modify_players<F>(&mut self, change: F) -> Result<(), PersistenceError>
    where
        F: FnOnce(&mut Vec<Value>),
    {
        self.modify_collection(PLAYERS_KEY, change)
            .inspect_err(|err| error!(%err, "failed to save players"))
    }
}

fn has_id(entry: &Value, id: &str) -> bool {
    entry.get("id").and_then(Value::as_str) == Some(id)
}

fn upsert_entry(entries: &mut Vec<Value>, id: &str, value: Value) {
    match entries.iter_mut().find(|entry| has_id(entry, id)) {
        Some(existing) => *existing = value,
        None => entries.push(value),
    }
}
