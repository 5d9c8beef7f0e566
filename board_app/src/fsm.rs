//! Screen State Machine
//!
//! Menu, Game and Pause screens of one board. The slave also follows the
//! screen carried in the master's frames.

use proto::ScreenCode;

/// Screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Game,
    Pause,
}

impl Screen {
    pub fn code(self) -> ScreenCode {
        match self {
            Screen::Menu => ScreenCode::Menu,
            Screen::Game => ScreenCode::Game,
            Screen::Pause => ScreenCode::Pause,
        }
    }

    pub fn from_code(code: ScreenCode) -> Self {
        match code {
            ScreenCode::Menu => Screen::Menu,
            ScreenCode::Game => Screen::Game,
            ScreenCode::Pause => Screen::Pause,
        }
    }
}

/// Actions that trigger screen transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Pause,
    Resume,
    Quit,
}

/// Result of a screen transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from: Screen,
    pub to: Screen,
    pub action: Action,
}

#[derive(Debug)]
pub struct ScreenFsm {
    screen: Screen,
}

impl ScreenFsm {
    pub fn new() -> Self {
        Self {
            screen: Screen::Menu,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: Action) -> bool {
        self.next_screen(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: Action) -> TransitionResult {
        let from = self.screen;
        match self.next_screen(action) {
            Some(to) => {
                self.screen = to;
                TransitionResult {
                    success: true,
                    from,
                    to,
                    action,
                }
            }
            None => TransitionResult {
                success: false,
                from,
                to: from,
                action,
            },
        }
    }

    /// Adopt the screen the master is showing. Returns true on a change.
    pub fn sync_to(&mut self, screen: Screen) -> bool {
        let changed = self.screen != screen;
        self.screen = screen;
        changed
    }

    fn next_screen(&self, action: Action) -> Option<Screen> {
        match (self.screen, action) {
            (Screen::Menu, Action::Start) => Some(Screen::Game),
            (Screen::Game, Action::Pause) => Some(Screen::Pause),
            (Screen::Pause, Action::Resume) => Some(Screen::Game),
            (Screen::Pause, Action::Quit) => Some(Screen::Menu),

            // Invalid transition
            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.screen == Screen::Game
    }
}

impl Default for ScreenFsm {
    fn default() -> Self {
        Self::new()
    }
}
