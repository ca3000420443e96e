//! Character physics and the per tick action resolver.
//!
//! Each tick runs, in this order:
//! 1. steer  : input -> horizontal velocity, jump impulse and action
//! 2. gravity: constant pull, applied even while standing
//! 3. integrate velocity into position
//! 4. land   : floor collision
//! 5. clamp  : keep the scaled sprite inside the world horizontally

use crate::config::GameConfig;
use crate::engine::input::{InputCode, KeyState};
use crate::engine::Point;
use crate::sprite::Action;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CharacterState {
    /// x is the left edge, y the bottom edge of the sprite
    pub position: Point,
    pub velocity: Point,
    pub airborne: bool,
    pub action: Action,
}

impl CharacterState {
    pub fn new(config: &GameConfig) -> Self {
        CharacterState {
            position: Point {
                x: config.start_x,
                y: config.floor_y(),
            },
            velocity: Point { x: 0.0, y: 0.0 },
            airborne: false,
            action: Action::Idle,
        }
    }

    /// Runs one full physics tick.
    pub fn update(self, keys: &KeyState, config: &GameConfig) -> Self {
        let scaled_width = |action: Action| config.sprites.get(action).scaled_width(config.scale);
        self.steer(keys, config)
            .apply_gravity(config.gravity)
            .integrate()
            .land(config.floor_y())
            .clamp_horizontal(config.world_width, scaled_width)
    }

    /// Input resolution. Left and right both write velocity and action, so
    /// right wins when both are held. Jump beats attack, and both are only
    /// available on the ground. When no rule fires (airborne with no
    /// movement keys) the previous action is kept.
    fn steer(mut self, keys: &KeyState, config: &GameConfig) -> Self {
        self.velocity.x = 0.0;

        let running = keys.is_pressed(InputCode::Run);
        let (speed, moving_action) = if running {
            (config.run_speed, Action::Run)
        } else {
            (config.walk_speed, Action::Walk)
        };

        if keys.is_pressed(InputCode::MoveLeft) {
            self.velocity.x = -speed;
            self.action = moving_action;
        }
        if keys.is_pressed(InputCode::MoveRight) {
            self.velocity.x = speed;
            self.action = moving_action;
        }

        let attacking = keys.is_pressed(InputCode::Attack);
        if keys.is_pressed(InputCode::Jump) && !self.airborne {
            self.velocity.y = -config.jump_impulse;
            self.airborne = true;
            self.action = Action::Jump;
        } else if attacking && !self.airborne {
            self.action = Action::Attack;
        } else if !keys.any_movement() && !self.airborne && !attacking {
            self.action = Action::Idle;
        }
        self
    }

    fn apply_gravity(mut self, gravity: f64) -> Self {
        self.velocity.y += gravity;
        self
    }

    fn integrate(mut self) -> Self {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
        self
    }

    fn land(mut self, floor_y: f64) -> Self {
        if self.position.y > floor_y {
            self.position.y = floor_y;
            self.velocity.y = 0.0;
            self.airborne = false;
        }
        self
    }

    /// The right bound depends on the current action's frame width, so it
    /// can jump when the action changes.
    fn clamp_horizontal(mut self, world_width: f64, scaled_width: impl Fn(Action) -> f64) -> Self {
        let max_x = world_width - scaled_width(self.action);
        if self.position.x < 0.0 {
            self.position.x = 0.0;
        }
        if self.position.x > max_x {
            self.position.x = max_x;
        }
        self
    }
}
