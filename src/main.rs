mod config;
mod hooks;
mod models;
mod services;
mod utils;
mod viewmodels;
mod views;

use views::App;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("🚀 FasterPost Courier starting...");

    yew::Renderer::<App>::new().render();
}
