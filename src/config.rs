use crate::sprite::{Action, SpriteTable, TickCounter};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Every tunable of the demo. Any field left out when the host passes a
/// config object falls back to the value below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world_width: f64,
    pub world_height: f64,
    /// y of the sprite's bottom edge when standing; None means world_height
    pub floor_y: Option<f64>,
    pub scale: f64,
    /// added to vy every tick
    pub gravity: f64,
    pub walk_speed: f64,
    pub run_speed: f64,
    /// jumping sets vy to -jump_impulse (y grows downward)
    pub jump_impulse: f64,
    pub start_x: f64,
    /// layer i scrolls at parallax_step * (i + 1) of the character's speed
    pub parallax_step: f64,
    /// back to front
    pub backgrounds: Vec<String>,
    pub sprites: SpriteTable,
    pub tick_counter: TickCounter,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            world_width: 2048.0,
            world_height: 1152.0,
            floor_y: None,
            scale: 2.0,
            gravity: 0.5,
            walk_speed: 3.0,
            run_speed: 6.0,
            jump_impulse: 10.0,
            start_x: 100.0,
            parallax_step: 0.2,
            backgrounds: (1..=4)
                .map(|n| format!("assets/background/{}.png", n))
                .collect(),
            sprites: SpriteTable::default(),
            tick_counter: TickCounter::Shared,
        }
    }
}

impl GameConfig {
    pub fn floor_y(&self) -> f64 {
        self.floor_y.unwrap_or(self.world_height)
    }

    /// Adopts the drawable area's size; a zero sized canvas keeps the defaults.
    pub fn with_surface_size(mut self, width: u32, height: u32) -> Self {
        if width > 0 && height > 0 {
            self.world_width = width.into();
            self.world_height = height.into();
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("start_x", self.start_x),
            ("floor_y", self.floor_y()),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(anyhow!("{} must be a finite number, got {}", name, value));
            }
        }

        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("scale", self.scale),
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("parallax_step", self.parallax_step),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(anyhow!("{} must be positive, got {}", name, value));
            }
        }

        let floor_y = self.floor_y();
        if !(floor_y > 0.0 && floor_y <= self.world_height) {
            return Err(anyhow!(
                "floor_y must be in (0, {}], got {}",
                self.world_height,
                floor_y
            ));
        }

        for action in Action::ALL {
            let sprite = self.sprites.get(action);
            if sprite.frame_count == 0 || sprite.frame_interval_ticks == 0 {
                return Err(anyhow!(
                    "sprite '{}' needs at least one frame and a non-zero interval",
                    action.name()
                ));
            }
            let frame_sizes = [sprite.frame_width, sprite.frame_height];
            if !frame_sizes.iter().all(|size| *size > 0.0 && size.is_finite()) {
                return Err(anyhow!("sprite '{}' has an empty frame", action.name()));
            }
            if sprite.scaled_width(self.scale) > self.world_width {
                return Err(anyhow!(
                    "sprite '{}' is wider than the world once scaled",
                    action.name()
                ));
            }
        }
        Ok(())
    }
}
