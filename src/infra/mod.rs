//! Инфраструктурный слой вокруг доменной логики:
//! - генерация ID и источник случайности;
//! - источник времени;
//! - абстракция key-value хранилища (тесты / диск);
//! - репозиторий, держащий полные записи и сводки в согласии;
//! - маппинги между domain и API.

pub mod clock;
pub mod ids;
pub mod mapping;
pub mod persistence;
pub mod repository;
pub mod rng;

pub use clock::*;
pub use ids::*;
pub use mapping::*;
pub use persistence::*;
pub use repository::*;
pub use rng::*;
