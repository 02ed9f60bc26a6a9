// src/png.rs
//! Экспорт сетки в PNG для отладки
//!
//! Каждая клетка рисуется квадратом `cell_size × cell_size` цвета `TileType::to_rgb`.

use crate::tile::TileGrid;
use image::{ImageBuffer, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use std::path::Path;

/// Рисует сетку в изображение
#[must_use]
pub fn render_preview(grid: &TileGrid, cell_size: u32) -> RgbImage {
    let cell_size = cell_size.max(1);
    let mut img: RgbImage = ImageBuffer::new(grid.width() * cell_size, grid.height() * cell_size);

    for tile in grid.tiles() {
        let rect = Rect::at((tile.x * cell_size) as i32, (tile.y * cell_size) as i32)
            .of_size(cell_size, cell_size);
        draw_filled_rect_mut(&mut img, rect, Rgb(tile.kind.to_rgb()));
    }
    img
}

pub fn save_preview(
    grid: &TileGrid,
    cell_size: u32,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if grid.tiles().is_empty() {
        return Err("Cannot save preview of an empty grid".into());
    }
    render_preview(grid, cell_size).save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileType;

    #[test]
    fn each_tile_becomes_a_square() {
        let mut grid = TileGrid::new(3, 2);
        grid.set(2, 1, TileType::Exit);
        let img = render_preview(&grid, 4);
        assert_eq!(img.dimensions(), (12, 8));
        assert_eq!(img.get_pixel(0, 0).0, TileType::Wall.to_rgb());
        assert_eq!(img.get_pixel(8, 4).0, TileType::Exit.to_rgb());
        assert_eq!(img.get_pixel(11, 7).0, TileType::Exit.to_rgb());
        assert_eq!(img.get_pixel(7, 7).0, TileType::Wall.to_rgb());
    }

    #[test]
    fn preview_is_written_to_path() {
        let mut grid = TileGrid::new(4, 3);
        grid.set(1, 1, TileType::Start);
        let path =
            std::env::temp_dir().join(format!("dungeon-preview-{}.png", std::process::id()));
        save_preview(&grid, 2, &path).unwrap();
        let img = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(img.dimensions(), (8, 6));
        assert_eq!(img.get_pixel(2, 2).0, TileType::Start.to_rgb());
    }

    #[test]
    fn zero_cell_size_is_treated_as_one() {
        let img = render_preview(&TileGrid::new(5, 4), 0);
        assert_eq!(img.dimensions(), (5, 4));
    }
}
