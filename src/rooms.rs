// src/rooms.rs
use crate::tile::{TileGrid, TileType};
use log::debug;
use rand::Rng;

/// Минимальная сторона комнаты
pub const MIN_ROOM_SIZE: u32 = 3;
/// Максимальная сторона комнаты (до ограничения размером карты)
pub const MAX_ROOM_SIZE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Итог расстановки комнат
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomPlacement {
    pub requested: usize,
    pub rooms: Vec<Room>,
}

impl RoomPlacement {
    /// Комнаты, которые не поместились в карту с отступом в одну клетку
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.requested - self.rooms.len()
    }
}

/// `floor(room_density * 10) + 3`
#[must_use]
pub fn room_count(room_density: f64) -> usize {
    (room_density * 10.0).floor() as usize + 3
}

/// Верхняя граница стороны комнаты: `min(8, min(width, height) / 4)`,
/// но не меньше минимальной стороны.
#[must_use]
pub fn max_room_size(width: u32, height: u32) -> u32 {
    MAX_ROOM_SIZE.min(width.min(height) / 4).max(MIN_ROOM_SIZE)
}

/// Штампует прямоугольные комнаты из пола на сетку.
///
/// Комнаты могут перекрываться: поздние просто перезаписывают ранние клетки.
/// Если комната с отступом не влезает в карту, она пропускается.
pub fn place_rooms<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    room_density: f64,
    rng: &mut R,
) -> RoomPlacement {
    let width = grid.width();
    let height = grid.height();
    let requested = room_count(room_density);
    let max_size = max_room_size(width, height);
    let mut rooms = Vec::with_capacity(requested);

    for _ in 0..requested {
        let room_width = rng.gen_range(MIN_ROOM_SIZE..=max_size);
        let room_height = rng.gen_range(MIN_ROOM_SIZE..=max_size);

        // Отступ в одну клетку с каждой стороны: x ∈ [1, width - room_width - 1]
        let (Some(max_x), Some(max_y)) = (
            width.checked_sub(room_width + 1),
            height.checked_sub(room_height + 1),
        ) else {
            continue;
        };
        if max_x < 1 || max_y < 1 {
            continue;
        }

        let x = rng.gen_range(1..=max_x);
        let y = rng.gen_range(1..=max_y);
        let room = Room {
            x,
            y,
            width: room_width,
            height: room_height,
        };
        stamp_room(grid, room);
        rooms.push(room);
    }

    debug!(
        "rooms: placed {} of {} (max side {})",
        rooms.len(),
        requested,
        max_size
    );
    RoomPlacement { requested, rooms }
}

fn stamp_room(grid: &mut TileGrid, room: Room) {
    for ry in room.y..room.y + room.height {
        for rx in room.x..room.x + room.width {
            grid.set(rx, ry, TileType::Floor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::rng_from_seed;

    #[test]
    fn room_count_has_minimum_of_three() {
        assert_eq!(room_count(0.0), 3);
        assert_eq!(room_count(0.5), 8);
        assert_eq!(room_count(0.99), 12);
        assert_eq!(room_count(1.0), 13);
    }

    #[test]
    fn max_room_size_is_clamped() {
        assert_eq!(max_room_size(100, 100), 8);
        assert_eq!(max_room_size(40, 20), 5);
        assert_eq!(max_room_size(10, 10), MIN_ROOM_SIZE);
    }

    #[test]
    fn rooms_respect_border_margin() {
        let mut grid = TileGrid::new(30, 20);
        let mut rng = rng_from_seed(7);
        let placement = place_rooms(&mut grid, 1.0, &mut rng);
        assert_eq!(placement.requested, 13);
        assert_eq!(placement.skipped(), 0);

        for room in &placement.rooms {
            assert!(room.x >= 1 && room.y >= 1);
            assert!(room.x + room.width < 30);
            assert!(room.y + room.height < 20);
            assert!((MIN_ROOM_SIZE..=5).contains(&room.width));
        }
        for x in 0..30 {
            assert_eq!(grid.get(x, 0).unwrap().kind, TileType::Wall);
            assert_eq!(grid.get(x, 19).unwrap().kind, TileType::Wall);
        }
    }

    #[test]
    fn room_tiles_are_plain_floor() {
        let mut grid = TileGrid::new(24, 24);
        let mut rng = rng_from_seed(11);
        let placement = place_rooms(&mut grid, 0.0, &mut rng);
        let room = placement.rooms[0];
        let tile = grid.get(room.x, room.y).unwrap();
        assert_eq!(tile.kind, TileType::Floor);
        assert!(tile.is_walkable);
        assert!(!tile.has_interaction);
    }

    #[test]
    fn tiny_grid_fits_no_rooms() {
        let mut grid = TileGrid::new(1, 1);
        let mut rng = rng_from_seed(3);
        let placement = place_rooms(&mut grid, 0.5, &mut rng);
        assert!(placement.rooms.is_empty());
        assert_eq!(placement.skipped(), 8);
        assert_eq!(grid.count(TileType::Wall), 1);
    }

    #[test]
    fn smallest_fitting_grid_is_five_by_five() {
        let mut grid = TileGrid::new(5, 5);
        let mut rng = rng_from_seed(1);
        let placement = place_rooms(&mut grid, 0.0, &mut rng);
        assert_eq!(placement.rooms.len(), 3);
        assert_eq!(grid.count(TileType::Floor), 9);
    }
}
