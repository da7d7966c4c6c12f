use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Ошибки самого key-value хранилища.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Хранилище выключено / недоступно (sandbox, нет прав и т.п.).
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("storage I/O error: {0}")]
    Io(String),
}

/// Абстракция key-value хранилища (аналог localStorage).
///
/// Репозиторий пишется только против этого trait:
/// - в тестах используется `InMemoryStore`;
/// - в CLI – `DirStore`, где каждый ключ лежит отдельным файлом.
pub trait KeyValueStore {
    /// Можно ли сейчас читать/писать.
    fn is_available(&self) -> bool;

    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Все ключи, в лексикографическом порядке.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// Простая in-memory реализация для тестов и локального запуска.
///
/// Умеет изображать недоступное хранилище и переполнение квоты.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    entries: BTreeMap<String, String>,
    available: bool,
    quota_bytes: Option<usize>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            available: true,
            quota_bytes: None,
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Хранилище, которое отказывает на любую операцию.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::default()
        }
    }

    /// Ограничение суммарного размера ключей и значений в байтах.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Сырое значение, в обход проверок (для тестов).
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::Unavailable)
        }
    }
}

impl KeyValueStore for InMemoryStore {
    fn is_available(&self) -> bool {
        self.available
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;

        if let Some(quota) = self.quota_bytes {
            if self.used_bytes_without(key) + key.len() + value.len() > quota {
                return Err(StoreError::QuotaExceeded);
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.check()?;
        Ok(self.entries.keys().cloned().collect())
    }
}

/// Хранилище на диске: каталог, один файл на ключ.
///
/// Имена файлов – ключ, где всё кроме `[A-Za-z0-9_-]` экранировано
/// как `%XX`, плюс расширение `.json`.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

const FILE_EXT: &str = ".json";

fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

fn decode_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = name.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).ok()
}

fn map_io(err: std::io::Error) -> StoreError {
    match err.kind() {
        ErrorKind::PermissionDenied => StoreError::Unavailable,
        _ => StoreError::Io(err.to_string()),
    }
}

impl DirStore {
    /// Открыть (и при необходимости создать) каталог хранилища.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(map_io)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}{}", encode_key(key), FILE_EXT))
    }
}

impl KeyValueStore for DirStore {
    fn is_available(&self) -> bool {
        fs::metadata(&self.root)
            .map(|m| m.is_dir() && !m.permissions().readonly())
            .unwrap_or(false)
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(map_io(err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // Пишем во временный файл и переименовываем, чтобы не оставить
        // наполовину записанный JSON.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(map_io)?;
        fs::rename(&tmp, &path).map_err(map_io)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(map_io(err)),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();

        for entry in fs::read_dir(&self.root).map_err(map_io)? {
            let entry = entry.map_err(map_io)?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(stem) = name.strip_suffix(FILE_EXT) {
                if let Some(key) = decode_key(stem) {
                    keys.push(key);
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_encoding_is_reversible() {
        for key in ["padelsync_tournament_abc", "weird key/with:chars", "ünï"] {
            assert_eq!(decode_key(&encode_key(key)).as_deref(), Some(key));
        }
    }

    #[test]
    fn quota_counts_replaced_value_once() {
        let mut store = InMemoryStore::with_quota(10);
        store.set("k", "12345").unwrap();
        store.set("k", "123456789").unwrap();
        assert_eq!(store.set("k2", "x"), Err(StoreError::QuotaExceeded));
    }
}
