// src/rng.rs
//! Сидирование генератора случайных чисел
//!
//! Строковый сид из настроек превращается в `u64`:
//! - каноническая десятичная строка (`"42"`, но не `"042"`, `"+42"` или `" 42"`) используется как число;
//! - любая другая строка хэшируется FNV-1a (стабильно между платформами и версиями).
//!
//! Без сида берётся текущее время в наносекундах.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Переводит строковый сид в числовой.
///
/// # Примеры
/// ```
/// use dungeon_mapgen::rng::seed_from_str;
/// assert_eq!(seed_from_str("42"), 42);
/// assert_eq!(seed_from_str("crypt"), seed_from_str("crypt"));
/// ```
#[must_use]
pub fn seed_from_str(seed: &str) -> u64 {
    // Только каноническая запись: иначе "042" и "42" дали бы одну карту
    if let Ok(value) = seed.parse::<u64>() {
        if value.to_string() == seed {
            return value;
        }
    }
    seed.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Сид от текущего времени
#[must_use]
pub fn time_seed() -> u64 {
    let now = chrono::Utc::now();
    // timestamp_nanos_opt переполняется только после 2262 года
    now.timestamp_nanos_opt()
        .map_or_else(|| now.timestamp() as u64, |nanos| nanos as u64)
}

/// Итоговый числовой сид для настроек
#[must_use]
pub fn resolve_seed(seed: Option<&str>) -> u64 {
    seed.map_or_else(time_seed, seed_from_str)
}

#[must_use]
pub fn rng_from_seed(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
