mod app_state;
mod cli;

use std::path::Path;

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use atrium_config::AtriumConfig;
use atrium_session::ProfileManager;

const DEFAULT_LOG_DIRECTIVE: &str = "atrium=info";

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let path = atrium_platform::crash_report::write_crash_report(info);

        eprintln!("\n--- Atrium crashed ---");
        if let Some(p) = &path {
            eprintln!("Crash report written to: {}", p.display());
        }
        eprintln!("----------------------\n");

        default_hook(info);
    }));
}

fn init_logging(cli_level: Option<&str>, config_level: &str) {
    let directive = cli_level
        .map(str::to_string)
        .unwrap_or_else(|| format!("atrium={config_level}"));
    if cli_level.is_none() && std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
        return;
    }
    let filter = match directive.parse() {
        Ok(d) => EnvFilter::from_default_env().add_directive(d),
        Err(_) => EnvFilter::new(DEFAULT_LOG_DIRECTIVE),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: Option<&str>) -> (AtriumConfig, Option<String>) {
    let result = match path {
        Some(p) => atrium_config::load_config_from(Path::new(p)),
        None => atrium_config::load_config(),
    };
    match result {
        Ok(config) => (config, None),
        Err(e) => (AtriumConfig::default(), Some(e.to_string())),
    }
}

fn open_profiles() -> ProfileManager {
    let opened = atrium_platform::profiles_file()
        .map_err(|e| e.to_string())
        .and_then(|path| ProfileManager::open(path).map_err(|e| e.to_string()));
    match opened {
        Ok(manager) => manager,
        Err(e) => {
            tracing::warn!("Profile store unavailable, profiles will not persist: {e}");
            ProfileManager::in_memory()
        }
    }
}

fn main() {
    install_panic_hook();

    let args = cli::parse();

    // Logging needs the config's level, so config errors are reported after init
    let (config, config_error) = load_config(args.config.as_deref());
    init_logging(args.log_level.as_deref(), &config.logging.level);

    tracing::info!("Atrium v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }
    tracing::info!("Config loaded ({} apps)", config.enabled_apps().count());

    if let Err(e) = atrium_platform::ensure_dirs() {
        tracing::warn!("Failed to create directories: {e}");
    }

    let mut profiles = open_profiles();
    if let Some(ref id) = args.profile {
        if let Err(e) = profiles.set_active(id) {
            tracing::warn!("Cannot activate profile {id}: {e}");
        }
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = app_state::AtriumApp::new(config, profiles, args.surface);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
