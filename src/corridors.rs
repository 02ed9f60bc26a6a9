// src/corridors.rs
use crate::tile::{TileGrid, TileType};
use log::debug;

/// Координаты всех клеток пола в построчном порядке
#[must_use]
pub fn floor_tiles(grid: &TileGrid) -> Vec<(u32, u32)> {
    grid.tiles()
        .iter()
        .filter(|t| t.kind == TileType::Floor)
        .map(|t| (t.x, t.y))
        .collect()
}

/// Соединяет каждую пару соседних (в порядке обхода) клеток пола Г-образным коридором.
///
/// Связность всей карты не гарантируется: соединяются только пары,
/// соседние в построчном порядке. Возвращает число прорубленных клеток.
pub fn connect_floor_tiles(grid: &mut TileGrid) -> usize {
    let floors = floor_tiles(grid);
    let carved: usize = floors
        .windows(2)
        .map(|pair| carve_corridor(grid, pair[0], pair[1]))
        .sum();

    debug!(
        "corridors: {} floor tiles, {} walls carved",
        floors.len(),
        carved
    );
    carved
}

/// Сначала идём по горизонтали на строке `start.y`, затем по вертикали на достигнутом `x`.
/// Стены становятся полом, остальные клетки не трогаем. Конечная клетка не обрабатывается.
pub fn carve_corridor(grid: &mut TileGrid, start: (u32, u32), end: (u32, u32)) -> usize {
    let (mut x, mut y) = start;
    let mut carved = 0;

    while x != end.0 {
        carved += usize::from(carve(grid, x, y));
        x = if x < end.0 { x + 1 } else { x - 1 };
    }

    while y != end.1 {
        carved += usize::from(carve(grid, x, y));
        y = if y < end.1 { y + 1 } else { y - 1 };
    }

    carved
}

fn carve(grid: &mut TileGrid, x: u32, y: u32) -> bool {
    let is_wall = grid.get(x, y).is_some_and(|t| t.kind == TileType::Wall);
    is_wall && grid.set(x, y, TileType::Floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_tiles_are_in_scan_order() {
        let mut grid = TileGrid::new(4, 3);
        grid.set(3, 0, TileType::Floor);
        grid.set(0, 2, TileType::Floor);
        grid.set(1, 0, TileType::Floor);
        grid.set(2, 1, TileType::Treasure);
        assert_eq!(floor_tiles(&grid), vec![(1, 0), (3, 0), (0, 2)]);
    }

    #[test]
    fn corridor_goes_horizontal_then_vertical() {
        let mut grid = TileGrid::new(6, 6);
        grid.set(1, 1, TileType::Floor);
        grid.set(4, 4, TileType::Floor);

        let carved = carve_corridor(&mut grid, (1, 1), (4, 4));
        // (2,1) (3,1) (4,1) (4,2) (4,3); стартовая клетка уже пол
        assert_eq!(carved, 5);
        for (x, y) in [(2, 1), (3, 1), (4, 1), (4, 2), (4, 3)] {
            let tile = grid.get(x, y).unwrap();
            assert_eq!(tile.kind, TileType::Floor, "({x}, {y})");
            assert!(tile.is_walkable);
        }
        // Другой угол Г не прорублен
        assert_eq!(grid.get(1, 4).unwrap().kind, TileType::Wall);
    }

    #[test]
    fn corridor_walks_backwards_and_upwards() {
        let mut grid = TileGrid::new(5, 5);
        grid.set(3, 3, TileType::Floor);
        grid.set(0, 0, TileType::Floor);

        carve_corridor(&mut grid, (3, 3), (0, 0));
        for (x, y) in [(2, 3), (1, 3), (0, 3), (0, 2), (0, 1)] {
            assert_eq!(grid.get(x, y).unwrap().kind, TileType::Floor, "({x}, {y})");
        }
    }

    #[test]
    fn non_wall_tiles_are_left_untouched() {
        let mut grid = TileGrid::new(5, 1);
        grid.set(0, 0, TileType::Floor);
        grid.set(2, 0, TileType::Water);
        grid.set(4, 0, TileType::Floor);

        let carved = carve_corridor(&mut grid, (0, 0), (4, 0));
        assert_eq!(carved, 2);
        assert_eq!(grid.get(2, 0).unwrap().kind, TileType::Water);
    }

    #[test]
    fn connects_two_rooms_in_scan_order() {
        let mut grid = TileGrid::new(10, 5);
        grid.set(1, 1, TileType::Floor);
        grid.set(8, 3, TileType::Floor);

        let carved = connect_floor_tiles(&mut grid);
        assert_eq!(carved, 8);
        assert_eq!(grid.get(8, 1).unwrap().kind, TileType::Floor);
        assert_eq!(grid.get(8, 2).unwrap().kind, TileType::Floor);
    }

    #[test]
    fn single_floor_tile_carves_nothing() {
        let mut grid = TileGrid::new(3, 3);
        grid.set(1, 1, TileType::Floor);
        assert_eq!(connect_floor_tiles(&mut grid), 0);
    }
}
