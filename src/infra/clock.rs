// src/infra/clock.rs
//! Источник текущего времени. Все операции получают `now` снаружи,
//! а откуда его взять – решает вызывающий код.

use std::cell::Cell;

use chrono::{Duration, Utc};

use crate::domain::Timestamp;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Реальное системное время (UTC).
#[derive(Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Ручные часы для тестов: стоят на месте, пока их не сдвинут.
#[derive(Clone, Debug)]
pub struct ManualClock {
    current: Cell<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Cell::new(start),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        self.current.set(self.current.get() + Duration::seconds(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.current.get()
    }
}
