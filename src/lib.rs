//! Ядро регистрации на падел-турниры.
//!
//! - `domain`: игроки, пары, матчи, турниры, сводки;
//! - `tournament`: переходы регистрации и сессия турнира;
//! - `infra`: хранилище, репозиторий, id, время, маппинги;
//! - `api`: команды, запросы, DTO;
//! - `state`: исполнение команд/запросов.

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod state;
pub mod tournament;

pub use state::AppState;
