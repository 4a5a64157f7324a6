extern crate chrono;
extern crate config;
extern crate fern;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;
extern crate reqwest;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate serde_json;
extern crate time;

#[macro_use]
pub mod error;
#[macro_use]
pub mod util;
pub mod models;
pub mod api;
pub mod feedback;
pub mod store;
pub mod remote;
pub mod repository;
pub mod render;
pub mod pages;
pub mod app;
pub mod dispatch;

use serde_json::Value;

use crate::error::NResult;

/// Init any state/logging/etc the app needs.
///
/// `runtime_config` is a JSON object merged over the values loaded from
/// config.yaml, so a UI can set platform-specific things (an api endpoint, a
/// log level) before anything runs.
pub fn init(runtime_config: &str) -> NResult<()> {
    let runtime: Value = match serde_json::from_str(runtime_config) {
        Ok(x) => x,
        Err(e) => {
            println!("Problem parsing runtime config: {}", e);
            json!({})
        }
    };
    config::merge(&runtime);
    util::logger::setup_logger();
    Ok(())
}
