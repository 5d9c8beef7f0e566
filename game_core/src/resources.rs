use crate::{Params, Side, SpawnOrder};
use glam::IVec2;

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub top: u16,    // Paddle 1 player
    pub bottom: u16, // Paddle 2 player
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side) -> u16 {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Top => self.top = self.top.saturating_add(1),
            Side::Bottom => self.bottom = self.bottom.saturating_add(1),
        }
    }
}

/// Something the renderer or the main loop may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball left the board; erase it where it was last drawn
    BallRemoved {
        last_drawn: Option<IVec2>,
        radius: i32,
    },
    BallSpawned,
    Scored(Side),
}

/// Events accumulated since the last drain
#[derive(Debug, Clone, Default)]
pub struct Events {
    queue: Vec<GameEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.queue)
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn scored(&self, side: Side) -> bool {
        self.queue.contains(&GameEvent::Scored(side))
    }
}

/// Per-paddle computer control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiControl {
    pub enabled: [bool; 2],
    pub difficulty: [u8; 2], // 0 = never moves, 10 = moves on ~10 of 11 ticks
}

impl AiControl {
    pub fn new(difficulty: u8) -> Self {
        let difficulty = difficulty.min(Params::AI_DIFFICULTY_MAX);
        Self {
            enabled: [false; 2],
            difficulty: [difficulty; 2],
        }
    }

    pub fn is_enabled(&self, side: Side) -> bool {
        self.enabled[side.index()]
    }

    pub fn difficulty(&self, side: Side) -> u8 {
        self.difficulty[side.index()]
    }

    pub fn set_enabled(&mut self, side: Side, enabled: bool) {
        self.enabled[side.index()] = enabled;
    }

    pub fn toggle(&mut self, side: Side) -> bool {
        let slot = &mut self.enabled[side.index()];
        *slot = !*slot;
        *slot
    }

    pub fn set_difficulty(&mut self, side: Side, difficulty: u8) {
        self.difficulty[side.index()] = difficulty.min(Params::AI_DIFFICULTY_MAX);
    }

    /// Raise both difficulties by one, wrapping back to 0 after the maximum
    pub fn cycle_difficulty(&mut self) {
        for level in &mut self.difficulty {
            *level = if *level >= Params::AI_DIFFICULTY_MAX {
                0
            } else {
                *level + 1
            };
        }
    }
}

impl Default for AiControl {
    fn default() -> Self {
        Self::new(Params::AI_DIFFICULTY_DEFAULT)
    }
}

/// Hands out increasing spawn numbers
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnCounter(u32);

impl SpawnCounter {
    pub fn next(&mut self) -> SpawnOrder {
        let order = SpawnOrder(self.0);
        self.0 = self.0.wrapping_add(1);
        order
    }
}
