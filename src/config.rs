// src/config.rs
//! Конфигурация генерации подземелья
//!
//! Этот модуль определяет все параметры, управляющие процедурной генерацией карты:
//! - Темы оформления (классическое подземелье, пещеры, замок и т.д.)
//! - Уровни сложности и их множители времени игры
//! - Плотности комнат, сокровищ и ловушек
//!
//! Все структуры поддерживают сериализацию в TOML/JSON для удобной настройки через конфигурационные файлы.

use crate::error::{ConfigError, GenerationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Тема оформления подземелья
///
/// На сам алгоритм не влияет: попадает в имя, описание и теги карты.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MapTheme {
    #[default]
    ClassicDungeon,
    CaveSystem,
    Castle,
    Forest,
    DesertRuins,
    IceCavern,
    Volcano,
    Underwater,
    SpaceStation,
    Cyberpunk,
}

impl MapTheme {
    pub const ALL: [MapTheme; 10] = [
        MapTheme::ClassicDungeon,
        MapTheme::CaveSystem,
        MapTheme::Castle,
        MapTheme::Forest,
        MapTheme::DesertRuins,
        MapTheme::IceCavern,
        MapTheme::Volcano,
        MapTheme::Underwater,
        MapTheme::SpaceStation,
        MapTheme::Cyberpunk,
    ];

    /// Строковое имя темы в том виде, в каком оно хранится в конфигурации.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MapTheme::ClassicDungeon => "classic_dungeon",
            MapTheme::CaveSystem => "cave_system",
            MapTheme::Castle => "castle",
            MapTheme::Forest => "forest",
            MapTheme::DesertRuins => "desert_ruins",
            MapTheme::IceCavern => "ice_cavern",
            MapTheme::Volcano => "volcano",
            MapTheme::Underwater => "underwater",
            MapTheme::SpaceStation => "space_station",
            MapTheme::Cyberpunk => "cyberpunk",
        }
    }
}

impl fmt::Display for MapTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Уровень сложности подземелья
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
    Nightmare,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 5] = [
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
        DifficultyLevel::Expert,
        DifficultyLevel::Nightmare,
    ];

    /// Возвращает множитель ожидаемого времени игры.
    ///
    /// # Примеры
    /// ```
    /// use dungeon_mapgen::config::DifficultyLevel;
    /// assert_eq!(DifficultyLevel::Medium.play_time_multiplier(), 1.0);
    /// assert_eq!(DifficultyLevel::Nightmare.play_time_multiplier(), 2.0);
    /// ```
    #[must_use]
    pub fn play_time_multiplier(self) -> f64 {
        match self {
            DifficultyLevel::Easy => 0.8,
            DifficultyLevel::Medium => 1.0,
            DifficultyLevel::Hard => 1.3,
            DifficultyLevel::Expert => 1.6,
            DifficultyLevel::Nightmare => 2.0,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
            DifficultyLevel::Expert => "expert",
            DifficultyLevel::Nightmare => "nightmare",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Основные параметры генерации подземелья
///
/// Полная конфигурация для генерации одной карты. Поддерживает загрузку из TOML-файлов.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapGenerationSettings {
    /// Ширина карты в тайлах (по умолчанию 40)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Высота карты в тайлах (по умолчанию 30)
    #[serde(default = "default_height")]
    pub height: u32,

    /// Тема оформления (по умолчанию `classic_dungeon`)
    #[serde(default)]
    pub theme: MapTheme,

    /// Сложность (по умолчанию `medium`)
    #[serde(default)]
    pub difficulty: DifficultyLevel,

    /// Плотность комнат: `floor(room_density * 10) + 3` комнат
    #[serde(default = "default_room_density")]
    pub room_density: f64,

    /// Сложность коридоров. Пока не используется алгоритмом, хранится для совместимости.
    #[serde(default = "default_corridor_complexity")]
    pub corridor_complexity: f64,

    /// Плотность сокровищ (доля от 10% клеток пола)
    #[serde(default = "default_treasure_density")]
    pub treasure_density: f64,

    /// Плотность ловушек (доля от 5% клеток пола)
    #[serde(default = "default_trap_density")]
    pub trap_density: f64,

    /// Зарезервировано
    #[serde(default = "default_secret_area_chance")]
    pub secret_area_chance: f64,

    /// Зарезервировано
    #[serde(default)]
    pub multi_level_probability: f64,

    /// Сид генератора случайных чисел. Без него карта сидируется от текущего времени.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

impl MapGenerationSettings {
    /// Загружает параметры из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// # dungeon.toml
    /// width = 32
    /// height = 24
    /// theme = "ice_cavern"
    /// difficulty = "hard"
    /// seed = "frost-42"
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Разбирает параметры из строки TOML и сразу проверяет их.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Проверяет размеры и плотности до начала генерации.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.width == 0 || self.height == 0 {
            return Err(GenerationError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }

        let ratios = [
            ("room_density", self.room_density),
            ("corridor_complexity", self.corridor_complexity),
            ("treasure_density", self.treasure_density),
            ("trap_density", self.trap_density),
            ("secret_area_chance", self.secret_area_chance),
            ("multi_level_probability", self.multi_level_probability),
        ];
        for (field, value) in ratios {
            // NaN не проходит contains, отдельная проверка не нужна
            if !(0.0..=1.0).contains(&value) {
                return Err(GenerationError::InvalidSettings {
                    field,
                    reason: format!("{value} is outside [0, 1]"),
                });
            }
        }
        Ok(())
    }
}

fn default_width() -> u32 {
    40
}
fn default_height() -> u32 {
    30
}
fn default_room_density() -> f64 {
    0.5
}
fn default_corridor_complexity() -> f64 {
    0.5
}
fn default_treasure_density() -> f64 {
    0.3
}
fn default_trap_density() -> f64 {
    0.2
}
fn default_secret_area_chance() -> f64 {
    0.1
}

impl Default for MapGenerationSettings {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            theme: MapTheme::ClassicDungeon,
            difficulty: DifficultyLevel::Medium,
            room_density: 0.5,
            corridor_complexity: 0.5,
            treasure_density: 0.3,
            trap_density: 0.2,
            secret_area_chance: 0.1,
            multi_level_probability: 0.0,
            seed: None,
        }
    }
}
