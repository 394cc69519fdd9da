mod app;
mod auth;
mod components;
mod config;
mod hooks;
mod services;
mod storage;
mod theme;
mod views;

use app::App;

#[cfg(test)]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match config::load() {
        Ok(config) => (config, None),
        Err(err) => (fastadmin_core::AppConfig::default(), Some(err)),
    };

    if let Err(err) = fastadmin_core::logging::init_tracing(&config.log_level) {
        // Without a subscriber, tracing events fall through to `log`.
        wasm_logger::init(wasm_logger::Config::default());
        tracing::warn!(error = %err, "Tracing subscriber unavailable, using wasm_logger");
    }
    if let Some(err) = config_error {
        tracing::error!(error = %err, "Falling back to default configuration");
    }
    tracing::info!(api_url = %config.api_url, "Starting admin console");

    yew::Renderer::<App>::with_props(app::AppProps { config }).render();
}
