use clap::Parser;
use dungeon_mapgen::{GeneratedMap, MapGenerationSettings, generate_batch, png, rng};
use log::{info, warn};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Генератор карт подземелий
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML (без него используются значения по умолчанию)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Сид, перекрывающий сид из конфигурации
    #[arg(short, long)]
    seed: Option<String>,

    /// Путь для сохранения карты в JSON (по умолчанию: ./dungeon.json)
    #[arg(short, long, default_value = "dungeon.json")]
    output: PathBuf,

    /// Путь для PNG-превью карты
    #[arg(short, long)]
    preview: Option<PathBuf>,

    /// Размер клетки превью в пикселях
    #[arg(long, default_value_t = 8)]
    cell_size: u32,

    /// Количество карт
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,
}

/// `dungeon.json` → `dungeon_3.json` для пакетной генерации
fn numbered(path: &Path, index: usize, count: usize) -> PathBuf {
    if count <= 1 {
        return path.to_path_buf();
    }
    // Работаем с OsString: имя файла не обязано быть UTF-8
    let mut name = path
        .file_stem()
        .map_or_else(|| OsString::from("dungeon"), OsStr::to_os_string);
    name.push(format!("_{index}"));
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}

fn save(
    generated: &GeneratedMap,
    cli: &Cli,
    index: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = numbered(&cli.output, index, cli.count);
    info!("Сохранение карты в {}", output.display());
    generated.map.save_as_json(&output)?;

    if let Some(preview) = &cli.preview {
        let preview = numbered(preview, index, cli.count);
        info!("Сохранение превью в {}", preview.display());
        png::save_preview(&generated.map.tiles, cli.cell_size, &preview)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => {
            info!("Загрузка конфигурации из {}", path.display());
            MapGenerationSettings::from_toml_file(path)?
        }
        None => MapGenerationSettings::default(),
    };
    if cli.seed.is_some() {
        settings.seed.clone_from(&cli.seed);
    }

    info!(
        "Генерация {} карт(ы) (размер: {}×{}, тема: {}, сложность: {})",
        cli.count, settings.width, settings.height, settings.theme, settings.difficulty
    );
    // Общий базовый сид, чтобы параллельные карты не получили одинаковое время
    let base_seed = settings
        .seed
        .clone()
        .unwrap_or_else(|| rng::time_seed().to_string());
    let batch: Vec<MapGenerationSettings> = (0..cli.count)
        .map(|i| {
            let mut item = settings.clone();
            if cli.count > 1 {
                item.seed = Some(format!("{base_seed}-{i}"));
            }
            item
        })
        .collect();

    for (index, result) in generate_batch(&batch).into_iter().enumerate() {
        let generated = result?;
        if let Some(seed) = generated.report.seed {
            info!("Карта {index}: сид {seed}");
        }
        if !generated.report.connectivity.is_fully_connected() {
            warn!(
                "Карта {index}: {} несвязных областей, {} клеток недостижимы от входа",
                generated.report.connectivity.regions,
                generated.report.connectivity.unreachable_from_start
            );
        }
        save(&generated, &cli, index)?;
    }

    info!("Готово!");
    Ok(())
}
