use anyhow::Context;
use dioxus::LaunchBuilder;
use dioxus_desktop::{Config, LogicalSize, WindowBuilder};
use mining_card::backend::utils::config::{AppConfig, ConfigManager};
use mining_card::frontend::App;
use mining_card::utils::logging;
use std::sync::OnceLock;
use tokio::runtime::Runtime;

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let headless = args.iter().any(|arg| arg == "--headless");

    if args.iter().any(|arg| arg == "--verbose") {
        logging::init_with_filter("info");
    } else {
        logging::init_from_env();
    }
    let config = ConfigManager::from_env().context("Failed to load configuration")?;

    if headless {
        return run_headless(&config);
    }

    // Animation timers run on this runtime, handed to components by context.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("Failed to create runtime")?;
    let handle = RUNTIME.get_or_init(|| runtime).handle().clone();

    let size = LogicalSize::new(f64::from(config.window.width), f64::from(config.window.height));
    let desktop = Config::default()
        .with_window(
            WindowBuilder::new()
                .with_title(config.window.title.clone())
                .with_inner_size(size)
                .with_resizable(false),
        )
        .with_menu(None);

    LaunchBuilder::new()
        .with_cfg(desktop)
        .with_context(config)
        .with_context(handle)
        .launch(App);
    Ok(())
}

fn run_headless(config: &AppConfig) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create runtime")?;

    let mut stdout = std::io::stdout().lock();
    let finished = runtime.block_on(mining_card::headless::run(config, &mut stdout))?;
    log::info!("Finished at {:.2}%", finished.percentage);
    Ok(())
}
