use rand::{Rng, RngCore, SeedableRng};

/// Источник случайности для генерации id.
///
/// Отдельный trait, чтобы в тестах подставлять детерминированный RNG.
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;
}

/// Системный RNG (thread_rng).
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn next_u64(&mut self) -> u64 {
        rand::thread_rng().gen()
    }
}

/// Детерминированный RNG для тестов и реплея.
/// При одинаковом seed выдаёт одинаковые id.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }
}
