//! Browser tests, run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::channel::oneshot;
use parallax_knight::engine::assets::{load_assets, Locator};
use parallax_knight::engine::input::{InputCode, KeyState};
use parallax_knight::engine::{load_image, Game, GameLoop, Renderer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_test::*;
use web_sys::{KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn undecodable_image_rejects_the_whole_store() {
    let locators = vec![
        // a 1x1 transparent gif, decodes without a network round trip
        Locator::new(
            "pixel",
            "data:image/gif;base64,R0lGODlhAQABAAAAACH5BAEKAAEALAAAAAABAAEAAAICTAEAOw==",
        ),
        Locator::new("missing", "data:image/png;base64,not-an-image"),
    ];

    let result = load_assets(locators, |source: String| async move {
        load_image(&source).await
    })
    .await;

    let err = result.err().expect("an undecodable image must fail the load");
    assert!(format!("{:#}", err).contains("Failed to load asset 'missing'"));
}

#[wasm_bindgen_test]
async fn decodable_images_are_stored_by_key() {
    let locators = vec![Locator::new(
        "pixel",
        "data:image/gif;base64,R0lGODlhAQABAAAAACH5BAEKAAEALAAAAAABAAEAAAICTAEAOw==",
    )];

    let store = load_assets(locators, |source: String| async move {
        load_image(&source).await
    })
    .await
    .expect("a valid data url should decode");

    assert_eq!(store.get("pixel").map(|image| image.width()), Some(1));
}

/// Presses Space while its assets are "loading", then hands over to a game
/// that reports whether the first tick sees Jump held.
struct PressJumpWhileLoading {
    first_tick: Rc<RefCell<Option<oneshot::Sender<bool>>>>,
}

struct ReportJumpOnFirstTick {
    first_tick: Rc<RefCell<Option<oneshot::Sender<bool>>>>,
}

#[async_trait(?Send)]
impl Game for PressJumpWhileLoading {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        let init = KeyboardEventInit::new();
        init.set_code("Space");
        let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
            .map_err(|err| anyhow!("Could not create key event : {:#?}", err))?;
        web_sys::window()
            .ok_or_else(|| anyhow!("Window not found"))?
            .dispatch_event(&event)
            .map_err(|err| anyhow!("Could not dispatch key event : {:#?}", err))?;

        Ok(Box::new(ReportJumpOnFirstTick {
            first_tick: self.first_tick.clone(),
        }))
    }

    fn update(&mut self, _keystate: &KeyState) {}

    fn draw(&mut self, _renderer: &Renderer) {}
}

#[async_trait(?Send)]
impl Game for ReportJumpOnFirstTick {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        Err(anyhow!("Game is already initialized"))
    }

    fn update(&mut self, keystate: &KeyState) {
        if let Some(tx) = self.first_tick.borrow_mut().take() {
            let _ = tx.send(keystate.is_pressed(InputCode::Jump));
        }
    }

    fn draw(&mut self, _renderer: &Renderer) {}
}

fn add_game_canvas() {
    let document = web_sys::window().unwrap().document().unwrap();
    if document.get_element_by_id("gameCanvas").is_some() {
        return;
    }
    let canvas = document.create_element("canvas").unwrap();
    canvas.set_id("gameCanvas");
    document.body().unwrap().append_child(&canvas).unwrap();
}

#[wasm_bindgen_test]
async fn keys_pressed_during_loading_reach_the_first_tick() {
    add_game_canvas();
    let (tx, rx) = oneshot::channel();

    GameLoop::start(PressJumpWhileLoading {
        first_tick: Rc::new(RefCell::new(Some(tx))),
    })
    .await
    .expect("loop should start");

    assert!(rx.await.expect("first tick should run"));
}
