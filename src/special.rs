// src/special.rs
use crate::corridors::floor_tiles;
use crate::tile::{InteractionType, TileGrid, TileType};
use log::debug;

/// Сколько особых клеток получилось
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialTiles {
    pub floor_tiles: usize,
    pub start: Option<(u32, u32)>,
    pub exit: Option<(u32, u32)>,
    pub treasures: usize,
    pub traps: usize,
}

/// `floor(treasure_density * floor_tiles * 0.1)`
#[must_use]
pub fn treasure_count(treasure_density: f64, floor_tiles: usize) -> usize {
    (treasure_density * floor_tiles as f64 * 0.1).floor() as usize
}

/// `floor(trap_density * floor_tiles * 0.05)`
#[must_use]
pub fn trap_count(trap_density: f64, floor_tiles: usize) -> usize {
    (trap_density * floor_tiles as f64 * 0.05).floor() as usize
}

/// Назначает вход, выход, сокровища и ловушки среди клеток пола.
///
/// Первая клетка пола в построчном порядке становится входом, последняя выходом
/// (при единственной клетке выход перезаписывает вход). Сокровища занимают индексы
/// начиная с 2, ловушки идут сразу за сокровищами.
pub fn annotate_special_tiles(
    grid: &mut TileGrid,
    treasure_density: f64,
    trap_density: f64,
) -> SpecialTiles {
    let floors = floor_tiles(grid);
    let total = floors.len();
    let (Some(&first), Some(&last)) = (floors.first(), floors.last()) else {
        return SpecialTiles::default();
    };

    grid.set(first.0, first.1, TileType::Start);
    grid.set(last.0, last.1, TileType::Exit);

    let treasures = treasure_count(treasure_density, total).min(total.saturating_sub(2));
    for &(x, y) in floors.iter().skip(2).take(treasures) {
        if let Some(tile) = grid.get_mut(x, y) {
            tile.mark_interactive(TileType::Treasure, InteractionType::PickupTreasure);
        }
    }

    let traps = trap_count(trap_density, total).min(total.saturating_sub(treasures + 2));
    for &(x, y) in floors.iter().skip(treasures + 2).take(traps) {
        if let Some(tile) = grid.get_mut(x, y) {
            tile.mark_interactive(TileType::Trap, InteractionType::TriggerTrap);
        }
    }

    debug!("special tiles: {total} floor, {treasures} treasure, {traps} traps");

    SpecialTiles {
        floor_tiles: total,
        start: (total > 1).then_some(first),
        exit: Some(last),
        treasures,
        traps,
    }
}
