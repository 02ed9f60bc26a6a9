pub mod config;
pub mod connectivity;
pub mod corridors;
pub mod dungeon;
pub mod error;
pub mod png;
pub mod rng;
pub mod rooms;
pub mod special;
pub mod tile;

pub use config::{DifficultyLevel, MapGenerationSettings, MapTheme};
pub use dungeon::{
    DungeonMap, GeneratedMap, GenerationReport, LayoutWarning, MapMetadata, generate,
    generate_batch, generate_with_report, generate_with_rng,
};
pub use error::{ConfigError, GenerationError};
pub use tile::{InteractionType, Tile, TileGrid, TileType};
