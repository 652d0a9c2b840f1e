//! PC Tracker Frontend Entry Point

mod models;
mod config;
mod error;
mod browser;
mod commands;
mod filters;
mod store;
mod board;
mod context;
mod components;
mod app;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = rolling_logger::init(LevelFilter::Info, rolling_logger::DEFAULT_CAPACITY) {
        web_sys::console::warn_1(&format!("Logger already installed: {}", e).into());
    }
    mount_to_body(App);
}
