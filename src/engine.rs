pub mod assets;
pub mod input;

use crate::browser;
use anyhow::{anyhow, Error, Result};
// web assembly is single threaded, so Rc RefCell over Mutex
use async_trait::async_trait;
use futures::channel::oneshot::channel;
use self::input::KeyState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    fn update(&mut self, keystate: &KeyState);
    fn draw(&mut self, renderer: &Renderer);
}

pub struct GameLoop;

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    /// Initializes `game` and, only if that succeeds, schedules one update
    /// and one draw per display refresh until the page goes away.
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        // listening starts before loading so keys held down meanwhile count
        let keys = Rc::new(RefCell::new(KeyState::new()));
        browser::listen_for_keys(keys.clone())?;
        let mut game = game.initialize().await?;
        let renderer = Renderer::new(browser::context()?);

        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |_perf: f64| {
            // copy out so a key event can't observe a half finished tick
            let keystate = *keys.borrow();
            game.update(&keystate);
            game.draw(&renderer);
            if let Some(callback) = f.borrow().as_ref() {
                if let Err(err) = browser::request_animation_frame(callback) {
                    error!("GameLoop: could not schedule next frame : {:#}", err);
                }
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width * 0.5
    }
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Renderer { context }
    }

    pub fn clear(&self, rect: &Rect) {
        self.context
            .clear_rect(rect.x, rect.y, rect.width, rect.height);
    }

    /// Stretches the whole image over `destination`.
    pub fn draw_image(&self, image: &HtmlImageElement, destination: &Rect) {
        self.context
            .draw_image_with_html_image_element_and_dw_and_dh(
                image,
                destination.x,
                destination.y,
                destination.width,
                destination.height,
            )
            .expect("Drawing is throwing exceptions! Unrecoverable error");
    }

    /// Copies `frame` out of a sheet into `destination`, mirrored around the
    /// destination's vertical center line when `flipped`.
    pub fn draw_sprite(
        &self,
        image: &HtmlImageElement,
        frame: &Rect,
        destination: &Rect,
        flipped: bool,
    ) {
        self.context.save();
        if flipped {
            let pivot = destination.center_x();
            self.context
                .translate(pivot, 0.0)
                .and_then(|_| self.context.scale(-1.0, 1.0))
                .and_then(|_| self.context.translate(-pivot, 0.0))
                .expect("Transform is throwing exceptions! Unrecoverable error");
        }
        self.context
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                frame.x,
                frame.y,
                frame.width,
                frame.height,
                destination.x,
                destination.y,
                destination.width,
                destination.height,
            )
            .expect("Drawing is throwing exceptions! Unrecoverable error");
        self.context.restore();
    }
}

/// Asynchronously load an image from a given source path
/// # Arguments
/// * `source` - string slice to path/url
/// # Returns
/// * `Ok(HtmlImageElement)` - on load success
/// * `Err` - on fetch or decode failure
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::new_image()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let failed_source = source.to_string();
    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!(
                "Error loading image '{}' : {:#?}",
                failed_source,
                err
            )));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callbacks alive until the image loads or errors
    success_callback.forget();
    error_callback.forget();

    // outer ? : channel dropped, inner ? : the load itself failed
    rx.await??;

    Ok(image)
}
