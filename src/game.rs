use crate::config::GameConfig;
use crate::engine::assets::{self, AssetStore, Locator};
use crate::engine::input::KeyState;
use crate::engine::{self, Game, Rect, Renderer};
use crate::sprite::state::CharacterState;
use crate::sprite::{AnimationClock, SpriteTable};
use anyhow::{anyhow, Result};
use async_trait::async_trait;

/// ┌──────────────────────── Tick ─────────────────────────────┐
/// │  KeyState ──► CharacterState::update   (physics, action)  │
/// │           ──► ParallaxLayer::scroll    (uses new vx)      │
/// │           ──► AnimationClock::advance  (current action)   │
/// │  draw     ──► layers x2, then the character frame         │
/// └───────────────────────────────────────────────────────────┘
pub enum SideScroller {
    /// Assets are being fetched; holds the config to build the world from
    Loading(GameConfig),

    /// Every asset decoded, the world is running
    Loaded(World),
}

impl SideScroller {
    pub fn new(config: GameConfig) -> Self {
        SideScroller::Loading(config)
    }
}

#[async_trait(?Send)]
impl Game for SideScroller {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            SideScroller::Loading(config) => {
                let locators = asset_locators(config);
                log!("Loading {} images", locators.len());
                let assets = assets::load_assets(locators, |source: String| async move {
                    engine::load_image(&source).await
                })
                .await?;
                log!("Loaded {} images", assets.len());
                Ok(Box::new(SideScroller::Loaded(World::new(
                    config.clone(),
                    assets,
                ))))
            }
            SideScroller::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn update(&mut self, keystate: &KeyState) {
        if let SideScroller::Loaded(world) = self {
            world.state.tick(keystate, &world.config);
        }
    }

    fn draw(&mut self, renderer: &Renderer) {
        if let SideScroller::Loaded(world) = self {
            world.draw(renderer);
        }
    }
}

/// Backgrounds keyed `background/<n>` (1 based, back to front), then each
/// distinct character sheet keyed by its locator.
pub fn asset_locators(config: &GameConfig) -> Vec<Locator> {
    let mut locators: Vec<Locator> = config
        .backgrounds
        .iter()
        .enumerate()
        .map(|(i, source)| Locator::new(background_key(i), source.as_str()))
        .collect();

    for (_, sprite) in config.sprites.iter() {
        if !locators.iter().any(|locator| locator.key == sprite.image_key()) {
            locators.push(Locator::new(sprite.image_key(), sprite.source.as_str()));
        }
    }
    locators
}

fn background_key(index: usize) -> String {
    format!("background/{}", index + 1)
}

pub struct World {
    config: GameConfig,
    state: GameState,
    assets: AssetStore,
}

impl World {
    fn new(config: GameConfig, assets: AssetStore) -> Self {
        World {
            state: GameState::new(&config),
            config,
            assets,
        }
    }

    fn draw(&self, renderer: &Renderer) {
        let (width, height) = (self.config.world_width, self.config.world_height);
        renderer.clear(&Rect::new(0.0, 0.0, width, height));

        // back to front
        for layer in &self.state.parallax {
            if let Some(image) = self.assets.get(&layer.image_key) {
                for destination in layer.draw_rects(width, height) {
                    renderer.draw_image(image, &destination);
                }
            }
        }

        let sprite = sprite_draw(
            &self.state.character,
            &self.state.clock,
            &self.config.sprites,
            self.config.scale,
        );
        if let Some(image) = self.assets.get(&sprite.image_key) {
            renderer.draw_sprite(image, &sprite.frame, &sprite.destination, sprite.flipped);
        }
    }
}

/// Everything that changes tick to tick.
#[derive(Debug, Clone)]
pub struct GameState {
    pub character: CharacterState,
    pub clock: AnimationClock,
    pub parallax: Vec<ParallaxLayer>,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        GameState {
            character: CharacterState::new(config),
            clock: AnimationClock::new(config.tick_counter),
            parallax: (0..config.backgrounds.len())
                .map(|i| ParallaxLayer::new(background_key(i), config.parallax_step * (i + 1) as f64))
                .collect(),
        }
    }

    pub fn tick(&mut self, keys: &KeyState, config: &GameConfig) {
        self.character = self.character.update(keys, config);
        for layer in &mut self.parallax {
            layer.scroll(self.character.velocity.x, config.world_width);
        }
        let action = self.character.action;
        self.clock.advance(action, config.sprites.get(action));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxLayer {
    pub image_key: String,
    pub offset_x: f64,
    pub scroll_factor: f64,
}

impl ParallaxLayer {
    pub fn new(image_key: String, scroll_factor: f64) -> Self {
        ParallaxLayer {
            image_key,
            offset_x: 0.0,
            scroll_factor,
        }
    }

    /// Moves against the character's velocity; snaps back to 0 once a full
    /// world width has scrolled by in either direction.
    pub fn scroll(&mut self, vx: f64, world_width: f64) {
        self.offset_x -= vx * self.scroll_factor;
        if self.offset_x <= -world_width || self.offset_x >= world_width {
            self.offset_x = 0.0;
        }
    }

    /// Two copies side by side so the seam is never visible.
    pub fn draw_rects(&self, width: f64, height: f64) -> [Rect; 2] {
        [
            Rect::new(self.offset_x, 0.0, width, height),
            Rect::new(self.offset_x + width, 0.0, width, height),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    pub image_key: String,
    /// slice of the sheet
    pub frame: Rect,
    /// scaled, with the bottom edge on the character's y
    pub destination: Rect,
    pub flipped: bool,
}

pub fn sprite_draw(
    character: &CharacterState,
    clock: &AnimationClock,
    sprites: &SpriteTable,
    scale: f64,
) -> SpriteDraw {
    let definition = sprites.get(character.action);
    let cursor = clock.cursor(character.action);
    let width = definition.scaled_width(scale);
    let height = definition.scaled_height(scale);

    SpriteDraw {
        image_key: definition.image_key().to_string(),
        frame: Rect::new(
            f64::from(cursor.frame) * definition.frame_width,
            0.0,
            definition.frame_width,
            definition.frame_height,
        ),
        destination: Rect::new(
            character.position.x,
            character.position.y - height,
            width,
            height,
        ),
        // recomputed every frame; standing still always faces right
        flipped: character.velocity.x < 0.0,
    }
}
