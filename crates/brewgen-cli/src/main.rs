mod logging;
mod settings;

use std::path::{Path, PathBuf};
use std::time::Instant;

use brewgen_core::{Error as CoreError, MenuCategory, MenuPriceIndex, load_menu_csv};
use brewgen_generate::assets::{AssetsLoader, MENU_ASSET, default_assets_dir};
use brewgen_generate::{GenerateOptions, GenerationEngine, GenerationError, NamePools, read_report};
use clap::{Args, Parser, Subcommand};
use settings::{DEFAULT_SETTINGS_FILE, Settings, SettingsError, load_settings, save_settings};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("menu error: {0}")]
    Core(#[from] CoreError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "brewgen", version, about = "Synthetic beverage shop dataset generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate orders, drinks, and customers CSV datasets.
    Generate(GenerateArgs),
    /// Check that a menu prices every item id the generator uses.
    CheckMenu(CheckMenuArgs),
    /// Print the report of a committed run directory.
    Inspect(InspectArgs),
    /// Write a default settings file.
    Init(InitArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Settings file (defaults to ./brewgen.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Menu CSV with menuID,itemName,itemPrice,category columns.
    #[arg(long)]
    menu: Option<PathBuf>,
    /// Directory with first_names.txt and last_names.txt.
    #[arg(long)]
    assets_dir: Option<PathBuf>,
    /// Directory where run directories are committed.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Seed for every random draw.
    #[arg(long)]
    seed: Option<u64>,
    /// Emit logs as JSON lines.
    #[arg(long, default_value_t = false)]
    log_json: bool,
    /// Also append JSON logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CheckMenuArgs {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    menu: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Committed run directory.
    run_dir: PathBuf,
}

#[derive(Args, Debug)]
struct InitArgs {
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    /// Replace an existing settings file.
    #[arg(long, default_value_t = false)]
    force: bool,
}

/// Inputs for a run after merging flags over the settings file.
#[derive(Debug, Clone)]
struct ResolvedRun {
    menu: PathBuf,
    assets_dir: PathBuf,
    options: GenerateOptions,
    log_json: bool,
}

fn resolve_run(args: &GenerateArgs, settings: &Settings) -> ResolvedRun {
    let assets_dir = args
        .assets_dir
        .clone()
        .or_else(|| settings.assets_dir.clone())
        .unwrap_or_else(default_assets_dir);
    let menu = args
        .menu
        .clone()
        .or_else(|| settings.menu.clone())
        .unwrap_or_else(|| assets_dir.join(MENU_ASSET));

    ResolvedRun {
        menu,
        assets_dir,
        options: GenerateOptions {
            out_dir: args.out.clone().unwrap_or_else(|| settings.out_dir.clone()),
            seed: args.seed.unwrap_or(settings.seed),
        },
        log_json: args.log_json || settings.log_json,
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::CheckMenu(args) => run_check_menu(args),
        Command::Inspect(args) => run_inspect(&args.run_dir),
        Command::Init(args) => run_init(&args.config, args.force),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let settings = load_settings(args.config.as_deref())?;
    let resolved = resolve_run(&args, &settings);
    logging::init_logging(resolved.log_json, args.log_file.as_deref())
        .map_err(CliError::Logging)?;

    let timer = Instant::now();
    tracing::info!(
        event = "run_started",
        menu = %resolved.menu.display(),
        assets_dir = %resolved.assets_dir.display(),
        out_dir = %resolved.options.out_dir.display(),
        seed = resolved.options.seed
    );

    let menu = MenuPriceIndex::load(&resolved.menu)?;
    let names = NamePools::load(&AssetsLoader::new(resolved.assets_dir.clone()))?;
    tracing::info!(
        event = "inputs_loaded",
        menu_items = menu.len(),
        first_names = names.first_names().len(),
        last_names = names.last_names().len()
    );

    let result = GenerationEngine::new(resolved.options).run(&menu, &names)?;

    tracing::info!(
        event = "run_finished",
        status = "success",
        duration_ms = timer.elapsed().as_millis() as u64
    );
    println!("run_dir={}", result.run_dir.display());
    Ok(())
}

fn run_check_menu(args: CheckMenuArgs) -> Result<(), CliError> {
    let settings = load_settings(args.config.as_deref())?;
    let path = args
        .menu
        .or(settings.menu)
        .unwrap_or_else(|| {
            settings
                .assets_dir
                .unwrap_or_else(default_assets_dir)
                .join(MENU_ASSET)
        });

    let items = load_menu_csv(&path)?;
    let index = MenuPriceIndex::from_items(&items)?;

    let mut counts = [0_usize; 5];
    let mut outside = 0_usize;
    for item in &items {
        match MenuCategory::for_id(item.id) {
            Some(category) => counts[category_slot(category)] += 1,
            None => outside += 1,
        }
    }

    println!("menu={}", path.display());
    for category in [
        MenuCategory::Drink,
        MenuCategory::CupSize,
        MenuCategory::Topping,
        MenuCategory::SugarLevel,
        MenuCategory::IceAmount,
    ] {
        println!("{}={}", category.as_str(), counts[category_slot(category)]);
    }
    println!("outside_partition={outside}");

    index.validate_partition()?;
    println!("status=ok");
    Ok(())
}

fn category_slot(category: MenuCategory) -> usize {
    match category {
        MenuCategory::Drink => 0,
        MenuCategory::CupSize => 1,
        MenuCategory::Topping => 2,
        MenuCategory::SugarLevel => 3,
        MenuCategory::IceAmount => 4,
    }
}

fn run_inspect(run_dir: &Path) -> Result<(), CliError> {
    let report = read_report(run_dir)?;
    println!("run_id={}", report.run_id);
    println!("seed={}", report.seed);
    println!("started_at={}", report.started_at);
    for dataset in &report.datasets {
        println!(
            "{}: rows={} bytes={} file={}",
            dataset.name, dataset.rows, dataset.bytes, dataset.file
        );
    }
    println!(
        "revenue={:.2} threshold={:.2}",
        report.revenue, report.revenue_threshold
    );
    println!("peak_orders={}", report.peak_orders);
    println!("duration_ms={}", report.duration_ms);
    Ok(())
}

fn run_init(path: &Path, force: bool) -> Result<(), CliError> {
    save_settings(path, &Settings::default(), force)?;
    println!("settings={}", path.display());
    Ok(())
}
