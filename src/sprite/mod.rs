// ┌──────────────────────────────────────────────────────────────────────────┐
// │                      Directory Structure                                 │
// ├───────────────────┬──────────────────────────────────────────────────────┤
// │ Code Directory    │          Role                                        │
// ├───────────────────┼──────────────────────────────────────────────────────┤
// │ src/              │ Project Root                                         │
// │ ├── lib.rs        │ wasm entry points                                    │
// │ ├── config.rs     │ tunables + asset locators                            │
// │ ├── game.rs       │ world composition, parallax, draw                    │
// │ └── sprite/       │ Character asset library                              │
// │     ├── mod.rs    │ Actions, sheet table, animation clock                │
// │     └── state.rs  │ Character physics + action resolver                  │
// └───────────────────┴──────────────────────────────────────────────────────┘
pub mod state;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Idle,
    Walk,
    Run,
    Jump,
    Attack,
    Hurt,
    Dead,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Idle,
        Action::Walk,
        Action::Run,
        Action::Jump,
        Action::Attack,
        Action::Hurt,
        Action::Dead,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::Idle => "idle",
            Action::Walk => "walk",
            Action::Run => "run",
            Action::Jump => "jump",
            Action::Attack => "attack",
            Action::Hurt => "hurt",
            Action::Dead => "dead",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One horizontal strip of frames on a single sprite sheet image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteDefinition {
    /// locator of the sheet, e.g. "assets/character/Idle.png"
    pub source: String,
    pub frame_count: u32,
    pub frame_width: f64,
    pub frame_height: f64,
    /// ticks a frame stays on screen before advancing
    pub frame_interval_ticks: u32,
}

impl SpriteDefinition {
    pub fn new(source: &str, frame_count: u32, frame_interval_ticks: u32) -> Self {
        SpriteDefinition {
            source: source.to_string(),
            frame_count,
            frame_width: 128.0,
            frame_height: 128.0,
            frame_interval_ticks,
        }
    }

    /// Sheets are keyed by their full locator: two actions pointing at the
    /// same file share one loaded image, two different files never do.
    pub fn image_key(&self) -> &str {
        &self.source
    }

    pub fn scaled_width(&self, scale: f64) -> f64 {
        self.frame_width * scale
    }

    pub fn scaled_height(&self, scale: f64) -> f64 {
        self.frame_height * scale
    }
}

/// One definition per action. A struct rather than a map so a missing
/// action is unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteTable {
    pub idle: SpriteDefinition,
    pub walk: SpriteDefinition,
    pub run: SpriteDefinition,
    pub jump: SpriteDefinition,
    pub attack: SpriteDefinition,
    pub hurt: SpriteDefinition,
    pub dead: SpriteDefinition,
}

impl SpriteTable {
    pub fn get(&self, action: Action) -> &SpriteDefinition {
        match action {
            Action::Idle => &self.idle,
            Action::Walk => &self.walk,
            Action::Run => &self.run,
            Action::Jump => &self.jump,
            Action::Attack => &self.attack,
            Action::Hurt => &self.hurt,
            Action::Dead => &self.dead,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, &SpriteDefinition)> + '_ {
        Action::ALL.iter().map(move |&action| (action, self.get(action)))
    }
}

impl Default for SpriteTable {
    fn default() -> Self {
        // jump has no sheet of its own and borrows the hurt strip
        SpriteTable {
            idle: SpriteDefinition::new("assets/character/Idle.png", 6, 8),
            walk: SpriteDefinition::new("assets/character/Walk.png", 10, 8),
            run: SpriteDefinition::new("assets/character/Run.png", 10, 5),
            jump: SpriteDefinition::new("assets/character/Hurt.png", 3, 5),
            attack: SpriteDefinition::new("assets/character/Attack.png", 4, 5),
            hurt: SpriteDefinition::new("assets/character/Hurt.png", 3, 5),
            dead: SpriteDefinition::new("assets/character/Dead.png", 5, 5),
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AnimationCursor {
    pub frame: u32,
    pub ticks_since_advance: u32,
}

/// Where the "ticks until next frame" count lives.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickCounter {
    /// one counter for the whole character, reset on every advance no matter
    /// which action is showing
    #[default]
    Shared,
    /// each action's cursor keeps its own count
    PerAction,
}

/// Frame cursors for every action. Cursors are kept when the character
/// switches away from an action, so re-entering it resumes mid-strip.
#[derive(Debug, Clone, Default)]
pub struct AnimationClock {
    cursors: [AnimationCursor; 7],
    shared_ticks: u32,
    mode: TickCounter,
}

impl AnimationClock {
    pub fn new(mode: TickCounter) -> Self {
        AnimationClock {
            mode,
            ..Default::default()
        }
    }

    pub fn cursor(&self, action: Action) -> AnimationCursor {
        self.cursors[action.index()]
    }

    pub fn shared_ticks(&self) -> u32 {
        self.shared_ticks
    }

    /// Counts one tick toward `action`'s next frame and advances the cursor
    /// once the count reaches the definition's interval.
    pub fn advance(&mut self, action: Action, definition: &SpriteDefinition) {
        let frame_count = definition.frame_count.max(1);
        let cursor = &mut self.cursors[action.index()];
        let ticks = match self.mode {
            TickCounter::Shared => &mut self.shared_ticks,
            TickCounter::PerAction => &mut cursor.ticks_since_advance,
        };
        *ticks += 1;
        if *ticks >= definition.frame_interval_ticks {
            *ticks = 0;
            cursor.frame = (cursor.frame + 1) % frame_count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_key_is_the_full_locator() {
        let table = SpriteTable::default();
        assert_eq!(table.idle.image_key(), "assets/character/Idle.png");
        assert_eq!(table.jump.image_key(), table.hurt.image_key());
    }

    #[test]
    fn sheets_with_the_same_file_name_get_different_keys() {
        let knight = SpriteDefinition::new("assets/knight/Idle.png", 6, 8);
        let character = SpriteDefinition::new("assets/character/Idle.png", 6, 8);
        let versioned = SpriteDefinition::new("assets/character/Idle.v2.png", 6, 8);
        assert_ne!(knight.image_key(), character.image_key());
        assert_ne!(versioned.image_key(), character.image_key());
    }

    #[test]
    fn cursor_advances_after_interval_and_wraps() {
        let table = SpriteTable::default();
        let mut clock = AnimationClock::new(TickCounter::Shared);

        for _ in 0..7 {
            clock.advance(Action::Idle, &table.idle);
        }
        assert_eq!(clock.cursor(Action::Idle).frame, 0);
        clock.advance(Action::Idle, &table.idle);
        assert_eq!(clock.cursor(Action::Idle).frame, 1);
        assert_eq!(clock.shared_ticks(), 0);

        // 6 frames at 8 ticks each brings the strip back to the start
        for _ in 0..(8 * 5) {
            clock.advance(Action::Idle, &table.idle);
        }
        assert_eq!(clock.cursor(Action::Idle).frame, 0);
    }

    #[test]
    fn shared_counter_carries_progress_across_actions() {
        let table = SpriteTable::default();
        let mut clock = AnimationClock::new(TickCounter::Shared);

        for _ in 0..4 {
            clock.advance(Action::Idle, &table.idle);
        }
        // run advances every 5 ticks; 4 are already banked from idle
        clock.advance(Action::Run, &table.run);
        assert_eq!(clock.cursor(Action::Run).frame, 1);
        assert_eq!(clock.cursor(Action::Idle).frame, 0);
    }

    #[test]
    fn per_action_counter_starts_fresh_for_each_action() {
        let table = SpriteTable::default();
        let mut clock = AnimationClock::new(TickCounter::PerAction);

        for _ in 0..4 {
            clock.advance(Action::Idle, &table.idle);
        }
        clock.advance(Action::Run, &table.run);
        assert_eq!(clock.cursor(Action::Run).frame, 0);
        assert_eq!(clock.cursor(Action::Run).ticks_since_advance, 1);
        assert_eq!(clock.cursor(Action::Idle).ticks_since_advance, 4);
    }

    #[test]
    fn cursor_is_retained_when_action_is_left() {
        let table = SpriteTable::default();
        let mut clock = AnimationClock::new(TickCounter::Shared);

        for _ in 0..10 {
            clock.advance(Action::Walk, &table.walk);
        }
        assert_eq!(clock.cursor(Action::Walk).frame, 1);
        for _ in 0..5 {
            clock.advance(Action::Attack, &table.attack);
        }
        assert_eq!(clock.cursor(Action::Walk).frame, 1);
        assert_eq!(clock.cursor(Action::Attack).frame, 1);
    }
}
