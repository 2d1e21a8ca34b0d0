#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    // Set up logging for development
    env_logger::init();

    // Optional config file as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Ignoring config {path}: {err}");
                portfolio_fx::FxConfig::default()
            }
        },
        None => portfolio_fx::FxConfig::default(),
    };

    portfolio_fx::run_app(config)
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: &str) -> portfolio_fx::Result<portfolio_fx::FxConfig> {
    let json = std::fs::read_to_string(path)?;
    portfolio_fx::FxConfig::from_json(&json)
}

// The page entry point lives in the library's `web` module.
#[cfg(target_arch = "wasm32")]
fn main() {}
