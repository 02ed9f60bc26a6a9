// src/dungeon.rs
//! Сборка готовой карты подземелья
//!
//! Порядок генерации:
//! 1. Сетка из одних стен
//! 2. Комнаты (`rooms`)
//! 3. Коридоры между соседними клетками пола (`corridors`)
//! 4. Вход, выход, сокровища и ловушки (`special`)
//! 5. Метаданные и идентификатор
//!
//! Сетка и метаданные полностью определяются настройками и сидом.
//! Идентификатор и отметки времени новые при каждом вызове.

use crate::config::{DifficultyLevel, MapGenerationSettings, MapTheme};
use crate::connectivity::{self, ConnectivityReport};
use crate::corridors::connect_floor_tiles;
use crate::error::GenerationError;
use crate::rng::{resolve_seed, rng_from_seed};
use crate::rooms::place_rooms;
use crate::special::annotate_special_tiles;
use crate::tile::{Tile, TileGrid};
use chrono::{DateTime, Utc};
use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Базовое время партии на карте 20×20, минут
pub const BASE_PLAY_TIME_MINUTES: f64 = 30.0;
/// Площадь карты, для которой множитель размера равен 1
pub const BASELINE_AREA: f64 = 400.0;
pub const MAX_PLAYERS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMetadata {
    pub theme: MapTheme,
    pub difficulty: DifficultyLevel,
    /// Минуты
    pub estimated_play_time: u32,
    pub max_players: u32,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub dungeon_master_notes: String,
}

/// Готовая карта. Ключи JSON в camelCase, как у записей редактора и хранилища карт.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DungeonMap {
    pub id: Uuid,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub tiles: TileGrid,
    pub metadata: MapMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DungeonMap {
    #[must_use]
    pub fn tile_at(&self, x: u32, y: u32) -> Option<&Tile> {
        self.tiles.get(x, y)
    }

    /// Обновляет `updated_at` перед повторным сохранением
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn save_as_json(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

/// Некритичные проблемы раскладки: карта всё равно возвращается
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LayoutWarning {
    /// Часть комнат не поместилась в карту
    RoomsDidNotFit { skipped: usize, requested: usize },
    /// На карте нет ни одной клетки пола, особых клеток тоже нет
    NoFloorTiles,
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutWarning::RoomsDidNotFit { skipped, requested } => {
                write!(f, "{skipped} of {requested} rooms did not fit the map")
            }
            LayoutWarning::NoFloorTiles => f.write_str("map has no floor tiles"),
        }
    }
}

/// Сводка по одному прогону генератора
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    /// Числовой сид; `None`, если генератор передан снаружи
    pub seed: Option<u64>,
    pub rooms_placed: usize,
    pub corridor_tiles: usize,
    pub floor_tiles: usize,
    pub treasures: usize,
    pub traps: usize,
    pub connectivity: ConnectivityReport,
    pub warnings: Vec<LayoutWarning>,
}

impl GenerationReport {
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedMap {
    pub map: DungeonMap,
    pub report: GenerationReport,
}

/// `round(30 * (width * height / 400) * difficulty_multiplier)`
///
/// # Примеры
/// ```
/// use dungeon_mapgen::config::DifficultyLevel;
/// use dungeon_mapgen::dungeon::estimated_play_time;
/// assert_eq!(estimated_play_time(10, 10, DifficultyLevel::Medium), 8);
/// assert_eq!(estimated_play_time(20, 20, DifficultyLevel::Hard), 39);
/// ```
#[must_use]
pub fn estimated_play_time(width: u32, height: u32, difficulty: DifficultyLevel) -> u32 {
    let size_multiplier = f64::from(width) * f64::from(height) / BASELINE_AREA;
    (BASE_PLAY_TIME_MINUTES * size_multiplier * difficulty.play_time_multiplier()).round() as u32
}

#[must_use]
pub fn build_metadata(settings: &MapGenerationSettings) -> MapMetadata {
    MapMetadata {
        theme: settings.theme,
        difficulty: settings.difficulty,
        estimated_play_time: estimated_play_time(
            settings.width,
            settings.height,
            settings.difficulty,
        ),
        max_players: MAX_PLAYERS,
        description: format!("A {} {} dungeon", settings.difficulty, settings.theme),
        tags: vec![
            settings.theme.as_str().to_owned(),
            settings.difficulty.as_str().to_owned(),
        ],
        dungeon_master_notes: String::new(),
    }
}

/// Упаковывает готовую сетку в карту с новым идентификатором
#[must_use]
pub fn assemble_map(settings: &MapGenerationSettings, tiles: TileGrid) -> DungeonMap {
    let now = Utc::now();
    DungeonMap {
        id: Uuid::new_v4(),
        name: format!("{} Dungeon", settings.theme),
        width: settings.width,
        height: settings.height,
        tiles,
        metadata: build_metadata(settings),
        created_at: now,
        updated_at: now,
    }
}

/// Генерирует карту по настройкам. Предупреждения раскладки только логируются.
pub fn generate(settings: &MapGenerationSettings) -> Result<DungeonMap, GenerationError> {
    generate_with_report(settings).map(|generated| generated.map)
}

/// Генерирует карту, сидируя `ChaCha8Rng` из `settings.seed` (или от времени).
pub fn generate_with_report(
    settings: &MapGenerationSettings,
) -> Result<GeneratedMap, GenerationError> {
    let seed = resolve_seed(settings.seed.as_deref());
    let mut rng = rng_from_seed(seed);
    let mut generated = generate_with_rng(settings, &mut rng)?;
    generated.report.seed = Some(seed);
    Ok(generated)
}

/// Генерирует карту с внешним генератором случайных чисел.
/// `settings.seed` при этом не используется.
pub fn generate_with_rng<R: Rng + ?Sized>(
    settings: &MapGenerationSettings,
    rng: &mut R,
) -> Result<GeneratedMap, GenerationError> {
    settings.validate()?;

    let mut grid = TileGrid::new(settings.width, settings.height);
    let placement = place_rooms(&mut grid, settings.room_density, rng);
    let corridor_tiles = connect_floor_tiles(&mut grid);
    let special = annotate_special_tiles(
        &mut grid,
        settings.treasure_density,
        settings.trap_density,
    );

    let mut warnings = Vec::new();
    if placement.skipped() > 0 {
        warnings.push(LayoutWarning::RoomsDidNotFit {
            skipped: placement.skipped(),
            requested: placement.requested,
        });
    }
    if special.floor_tiles == 0 {
        warnings.push(LayoutWarning::NoFloorTiles);
    }
    for warning in &warnings {
        warn!(
            "degenerate layout for {}x{} map: {warning}",
            settings.width, settings.height
        );
    }

    let report = GenerationReport {
        seed: None,
        rooms_placed: placement.rooms.len(),
        corridor_tiles,
        floor_tiles: special.floor_tiles,
        treasures: special.treasures,
        traps: special.traps,
        connectivity: connectivity::analyze(&grid),
        warnings,
    };

    let map = assemble_map(settings, grid);
    info!(
        "generated '{}' {}x{}: {} rooms, {} floor tiles, {} walkable regions",
        map.name,
        map.width,
        map.height,
        report.rooms_placed,
        report.floor_tiles,
        report.connectivity.regions
    );
    Ok(GeneratedMap { map, report })
}

/// Генерирует несколько независимых карт; с feature `parallel` в несколько потоков.
#[must_use]
pub fn generate_batch(
    settings: &[MapGenerationSettings],
) -> Vec<Result<GeneratedMap, GenerationError>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        settings.par_iter().map(generate_with_report).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        settings.iter().map(generate_with_report).collect()
    }
}
