// src/tile.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    Floor,
    Wall,
    Door,
    Trap,
    Treasure,
    Start,
    Exit,
    Water,
    Lava,
    StairsUp,
    StairsDown,
}

impl TileType {
    /// Проходима любая клетка, кроме стены
    #[must_use]
    pub fn is_walkable(self) -> bool {
        !matches!(self, TileType::Wall)
    }

    /// Цвет клетки для PNG-превью
    #[must_use]
    pub fn to_rgb(self) -> [u8; 3] {
        match self {
            TileType::Floor => [200, 190, 170],
            TileType::Wall => [40, 40, 48],
            TileType::Door => [140, 90, 40],
            TileType::Trap => [200, 40, 40],
            TileType::Treasure => [240, 200, 40],
            TileType::Start => [60, 200, 80],
            TileType::Exit => [60, 120, 230],
            TileType::Water => [40, 90, 200],
            TileType::Lava => [230, 100, 20],
            TileType::StairsUp => [170, 170, 230],
            TileType::StairsDown => [110, 110, 170],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    OpenDoor,
    PickupTreasure,
    TriggerTrap,
    UseStairs,
    EnterPortal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualEffectType {
    Glow,
    Sparkle,
    Flame,
    Smoke,
    Lightning,
    Ripple,
}

/// Визуальный эффект клетки. Генератор их не создаёт, только переносит.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualEffect {
    #[serde(rename = "type")]
    pub effect_type: VisualEffectType,
    pub duration: f32,
    pub intensity: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>, // "#rrggbb"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEffectType {
    Ambient,
    Footstep,
    Door,
    Treasure,
    Trap,
    Magic,
    Combat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundEffect {
    pub src: String,
    pub volume: f32,
    #[serde(rename = "loop")]
    pub looped: bool,
    #[serde(rename = "type")]
    pub effect_type: SoundEffectType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    /// "x-y"
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TileType,
    pub x: u32,
    pub y: u32,
    pub is_walkable: bool,
    pub has_interaction: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_type: Option<InteractionType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visual_effects: Vec<VisualEffect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_effect: Option<SoundEffect>,
}

impl Tile {
    /// Клетка без взаимодействия; проходимость выводится из типа.
    #[must_use]
    pub fn new(x: u32, y: u32, kind: TileType) -> Self {
        Self {
            id: format!("{x}-{y}"),
            kind,
            x,
            y,
            is_walkable: kind.is_walkable(),
            has_interaction: false,
            interaction_type: None,
            visual_effects: Vec::new(),
            sound_effect: None,
        }
    }

    #[must_use]
    pub fn wall(x: u32, y: u32) -> Self {
        Self::new(x, y, TileType::Wall)
    }

    /// Делает клетку интерактивной (сокровище, ловушка).
    pub fn mark_interactive(&mut self, kind: TileType, interaction: InteractionType) {
        self.kind = kind;
        self.is_walkable = kind.is_walkable();
        self.has_interaction = true;
        self.interaction_type = Some(interaction);
    }
}

/// Прямоугольная сетка клеток, хранится построчно: индекс `y * width + x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTileGrid")]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

#[derive(Deserialize)]
struct RawTileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TryFrom<RawTileGrid> for TileGrid {
    type Error = String;

    fn try_from(raw: RawTileGrid) -> Result<Self, Self::Error> {
        let expected = raw.width as usize * raw.height as usize;
        if raw.tiles.len() != expected {
            return Err(format!(
                "grid {}x{} needs {expected} tiles, got {}",
                raw.width,
                raw.height,
                raw.tiles.len()
            ));
        }
        let misplaced = raw.tiles.iter().enumerate().find(|(i, t)| {
            t.x as usize != i % raw.width as usize || t.y as usize != i / raw.width as usize
        });
        if let Some((i, t)) = misplaced {
            return Err(format!("tile #{i} has coordinates ({}, {})", t.x, t.y));
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            tiles: raw.tiles,
        })
    }
}

impl TileGrid {
    /// Сетка из одних стен
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile::wall(x, y));
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<&Tile> {
        self.index(x, y).map(|idx| &self.tiles[idx])
    }

    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut Tile> {
        self.index(x, y).map(|idx| &mut self.tiles[idx])
    }

    /// Заменяет клетку новой клеткой заданного типа.
    /// Возвращает `false`, если координаты вне сетки.
    pub fn set(&mut self, x: u32, y: u32, kind: TileType) -> bool {
        match self.get_mut(x, y) {
            Some(tile) => {
                *tile = Tile::new(x, y, kind);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Строки сетки сверху вниз
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        // chunks(0) паникует, у пустой сетки строк нет
        self.tiles.chunks(self.width.max(1) as usize)
    }

    #[must_use]
    pub fn count(&self, kind: TileType) -> usize {
        self.tiles.iter().filter(|t| t.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_wall() {
        let grid = TileGrid::new(5, 3);
        assert_eq!(grid.tiles().len(), 15);
        assert!(grid.tiles().iter().all(|t| t.kind == TileType::Wall
            && !t.is_walkable
            && !t.has_interaction));
        assert_eq!(grid.get(4, 2).map(|t| t.id.as_str()), Some("4-2"));
    }

    #[test]
    fn out_of_bounds_access_is_rejected() {
        let mut grid = TileGrid::new(4, 4);
        assert!(grid.get(4, 0).is_none());
        assert!(grid.get(0, 4).is_none());
        assert!(!grid.set(10, 1, TileType::Floor));
        // Ничего не «завернулось» на соседнюю строку
        assert_eq!(grid.count(TileType::Floor), 0);
    }

    #[test]
    fn set_derives_walkability() {
        let mut grid = TileGrid::new(3, 3);
        assert!(grid.set(1, 2, TileType::Lava));
        let tile = grid.get(1, 2).unwrap();
        assert!(tile.is_walkable);
        assert_eq!((tile.x, tile.y), (1, 2));
    }

    #[test]
    fn rows_are_row_major() {
        let grid = TileGrid::new(3, 2);
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][2].id, "2-1");
    }

    #[test]
    fn deserialization_rejects_wrong_tile_count() {
        let json = r#"{"width":2,"height":2,"tiles":[]}"#;
        assert!(serde_json::from_str::<TileGrid>(json).is_err());
    }

    #[test]
    fn json_round_trip_keeps_grid() {
        let mut grid = TileGrid::new(2, 2);
        grid.get_mut(1, 1)
            .unwrap()
            .mark_interactive(TileType::Treasure, InteractionType::PickupTreasure);
        let json = serde_json::to_string(&grid).unwrap();
        assert!(json.contains(r#""type":"treasure""#));
        let back: TileGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
