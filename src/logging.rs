//! Инициализация логирования (tracing).
//!
//! Библиотека только пишет события; подписчика ставит бинарник.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Поставить глобальный подписчик.
///
/// `RUST_LOG` имеет приоритет над `fallback_filter`. Логи идут в stderr,
/// чтобы не смешиваться с выводом CLI.
pub fn init(fallback_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_filter));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    // Повторная инициализация (например, в тестах) – не ошибка.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
