use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

#[macro_use]
mod browser;
pub mod config;
pub mod engine;
pub mod game;
pub mod sprite;

use config::GameConfig;
use engine::GameLoop;
use game::SideScroller;

/// Main entry for the WebAssembly module, using the built in config
/// - sizes the world from the canvas
/// - loads every image, then starts the loop
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    start(GameConfig::default())
}

/// Same as `main_js`, with tunables supplied by the page. Fields left out of
/// `config` keep their defaults.
#[wasm_bindgen]
pub fn start_with_config(config: JsValue) -> Result<(), JsValue> {
    let config: GameConfig = serde_wasm_bindgen::from_value(config).map_err(|err| {
        error!("Invalid game config : {}", err);
        JsValue::from(err)
    })?;
    start(config)
}

fn start(config: GameConfig) -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();

    let config = match browser::canvas_size() {
        Ok((width, height)) => config.with_surface_size(width, height),
        Err(err) => {
            error!("{:#}", err);
            return Err(JsValue::from_str(&err.to_string()));
        }
    };
    if let Err(err) = config.validate() {
        error!("Invalid game config : {:#}", err);
        return Err(JsValue::from_str(&err.to_string()));
    }
    log!(
        "Starting {}x{} world, floor at {}",
        config.world_width,
        config.world_height,
        config.floor_y()
    );

    // the loop only ever starts from inside this task, after every asset
    // has loaded
    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(SideScroller::new(config)).await {
            error!("Game not started : {:#}", err);
        }
    });

    Ok(())
}
