use crate::domain::Timestamp;
use crate::infra::rng::{RandomSource, SystemRng};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Сколько случайных base36-символов добавляем к метке времени.
const RANDOM_SUFFIX_LEN: usize = 9;

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();

    String::from_utf8(digits).unwrap_or_default()
}

/// Генератор строковых id: base36(миллисекунды) + случайный хвост.
///
/// Формат совместим с id, которые уже лежат в хранилище фронта,
/// поэтому id всех сущностей (турниры, игроки, пары) – одного вида.
#[derive(Debug)]
pub struct IdGenerator<R: RandomSource = SystemRng> {
    rng: R,
}

impl IdGenerator<SystemRng> {
    pub fn new() -> Self {
        Self { rng: SystemRng }
    }
}

impl Default for IdGenerator<SystemRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> IdGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn next_id(&mut self, now: Timestamp) -> String {
        let millis = now.timestamp_millis().max(0) as u64;

        let mut suffix = to_base36(self.rng.next_u64());
        suffix.truncate(RANDOM_SUFFIX_LEN);

        format!("{}{}", to_base36(millis), suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base36_encodes_small_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
