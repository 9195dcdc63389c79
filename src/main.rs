use anyhow::Result;
use clap::{Parser, Subcommand};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
mod config;
mod error;
mod model;
mod services;
mod utils;

use config::Config;
use error::LauncherError;
use model::ProfileStore;
use services::{
    create_window_manager,
    CaptureExecutor,
    CaptureTarget,
    LaunchExecutor,
    LauncherContext,
    StoreWatcher,
    SystemProcessTable,
};

#[derive(Parser, Debug)]
#[command(name = "i3-launcher", version)]
#[command(about = "Сохранение и восстановление рабочих пространств i3/sway")]
struct Args {
    /// Путь к файлу настроек
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Путь к файлу профилей (вместо store.path из настроек)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Режим сухого запуска (команды оконному менеджеру только логируются)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию из настроек)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Запустить все сохранённые профили
    LaunchAll,

    /// Запустить один профиль
    #[command(alias = "load")]
    Launch {
        /// Имя профиля (префикс номера вроде "3:" допускается)
        name: String,
    },

    /// Сохранить команды окон в профили
    Save {
        #[arg(long, value_enum, default_value = "all")]
        target: CaptureTarget,
    },

    /// Показать сохранённые профили
    List,

    /// Следить за файлом профилей: перечитывать его при изменении и сообщать,
    /// какие профили добавлены или удалены (до Ctrl+C)
    Watch,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("i3-launcher: {:#}", e);
            let code = e
                .downcast_ref::<LauncherError>()
                .map(LauncherError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)?;

    // Инициализация системы логирования
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format)?;

    info!("Запуск i3-launcher v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {:?}", config_path);

    if args.dry_run {
        warn!("Режим сухого запуска - команды оконному менеджеру отключены");
    }

    let config = Arc::new(config);
    let wm = create_window_manager(&config, args.dry_run);
    let mut ctx = LauncherContext::new(config.clone(), wm, Arc::new(SystemProcessTable::new()));
    if let Some(store) = args.store {
        ctx = ctx.with_store_path(store);
    }

    match args.command {
        Commands::LaunchAll => {
            let store = ctx.load_store()?;
            let failures = LaunchExecutor::new(ctx).launch_all(&store).await;
            if !failures.is_empty() {
                warn!("Не запущено профилей: {} из {}", failures.len(), store.profiles.len());
                for failure in &failures {
                    eprintln!("{}: {}", failure.profile, failure.error);
                }
            }
        }
        Commands::Launch { name } => {
            let store = ctx.load_store()?;
            LaunchExecutor::new(ctx).launch(&store, &name).await?;
        }
        Commands::Save { target } => {
            let executor = CaptureExecutor::new(ctx);
            let targets = executor.targets(target).await?;
            for captured in executor.capture(&targets).await? {
                if captured.unresolved > 0 {
                    println!(
                        "{}: {} команд ({} не определено)",
                        captured.name, captured.commands, captured.unresolved
                    );
                } else {
                    println!("{}: {} команд", captured.name, captured.commands);
                }
            }
        }
        Commands::List => {
            let store = ctx.load_store()?;
            if store.is_empty() {
                println!("Нет сохранённых профилей");
            }
            for name in store.names() {
                println!("{}", name);
            }
        }
        Commands::Watch => watch(ctx).await?,
    }

    Ok(())
}

/// Держит профили в памяти, перечитывает их при изменении файла и
/// сообщает о разнице с предыдущей версией до Ctrl+C
async fn watch(ctx: LauncherContext) -> Result<()> {
    let store = Arc::new(RwLock::new(ctx.load_store()?));
    info!("Загружено профилей: {}", store.read().profiles.len());

    let path = ctx.store_path.clone();
    let shared = store.clone();
    let handle = StoreWatcher::new(&ctx.store_path, ctx.config.polling_interval()).spawn(Box::new(
        move || -> Result<()> {
            let fresh = ProfileStore::load(&path)?;
            let mut current = shared.write();
            for line in profile_changes(&current, &fresh) {
                println!("{}", line);
            }
            info!("Профили перечитаны: {}", fresh.profiles.len());
            *current = fresh;
            Ok(())
        },
    ));

    match signal::ctrl_c().await {
        Ok(()) => info!("Получен сигнал завершения (Ctrl+C)"),
        Err(err) => error!("Ошибка при ожидании сигнала завершения: {}", err),
    }

    handle.stop().await;
    info!("Профилей в памяти при выходе: {}", store.read().profiles.len());
    Ok(())
}

/// Строки о добавленных (+), удалённых (-) и изменённых (~) профилях
fn profile_changes(old: &ProfileStore, fresh: &ProfileStore) -> Vec<String> {
    let added = fresh
        .names()
        .filter(|name| old.get(name).is_none())
        .map(|name| format!("+ {}", name));
    let removed = old
        .names()
        .filter(|name| fresh.get(name).is_none())
        .map(|name| format!("- {}", name));
    let changed = fresh
        .profiles
        .iter()
        .filter(|p| old.get(&p.name).is_some_and(|o| o != *p))
        .map(|p| format!("~ {}", p));

    added.chain(removed).chain(changed).collect()
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    let registry = tracing_subscriber::registry().with(filter);
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    match format {
        "full" => registry.with(layer).init(),
        _ => registry.with(layer.compact()).init(),
    }

    Ok(())
}
