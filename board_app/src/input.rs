//! Button input
//!
//! Button edges arrive from interrupt context and are queued; the main loop
//! drains them and maps each press to a [`Command`] for the current screen.

use crate::fsm::Screen;
use core::cell::RefCell;
use critical_section::Mutex;
use game_core::Side;
use heapless::Deque;

pub const QUEUE_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Onboard,
    B1,
    B2,
    B3,
    B4,
    B5,
    B6,
}

/// Bounded press queue shared between interrupt handlers and the main loop
pub struct ButtonQueue {
    inner: Mutex<RefCell<Deque<Button, QUEUE_DEPTH>>>,
}

impl ButtonQueue {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Called from interrupt context. A full queue drops the press.
    pub fn push(&self, button: Button) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).push_back(button).is_ok())
    }

    pub fn pop(&self) -> Option<Button> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ButtonQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// What a button press does on a given screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    ToggleAi(Side),
    ToggleWireless,
    CycleDifficulty,
    PaddleLeft(Side),
    PaddleRight(Side),
    SpawnBall,
    Reset,
    Quit,
}

pub fn command_for(button: Button, screen: Screen) -> Option<Command> {
    use Button::*;
    match (screen, button) {
        (Screen::Menu, Onboard) => Some(Command::Start),
        (Screen::Menu, B1) => Some(Command::ToggleAi(Side::Top)),
        (Screen::Menu, B2) => Some(Command::ToggleAi(Side::Bottom)),
        (Screen::Menu, B3) => Some(Command::ToggleWireless),
        (Screen::Menu, B4) => Some(Command::CycleDifficulty),

        (Screen::Game, Onboard) => Some(Command::Pause),
        (Screen::Game, B1) => Some(Command::PaddleLeft(Side::Top)),
        (Screen::Game, B2) => Some(Command::PaddleRight(Side::Top)),
        (Screen::Game, B3) => Some(Command::PaddleLeft(Side::Bottom)),
        (Screen::Game, B4) => Some(Command::PaddleRight(Side::Bottom)),
        (Screen::Game, B5) => Some(Command::SpawnBall),

        (Screen::Pause, Onboard) => Some(Command::Resume),
        (Screen::Pause, B5) => Some(Command::Reset),
        (Screen::Pause, B6) => Some(Command::Quit),

        _ => None,
    }
}

/// Keyboard layout of the simulated master board
pub fn master_key(key: &str) -> Option<Button> {
    match key {
        " " => Some(Button::Onboard),
        "1" => Some(Button::B1),
        "2" => Some(Button::B2),
        "3" => Some(Button::B3),
        "4" => Some(Button::B4),
        "5" => Some(Button::B5),
        "6" => Some(Button::B6),
        _ => None,
    }
}

/// Keyboard layout of the simulated slave board
pub fn slave_key(key: &str) -> Option<Button> {
    match key {
        "Enter" => Some(Button::Onboard),
        "q" | "Q" => Some(Button::B1),
        "w" | "W" => Some(Button::B2),
        "e" | "E" | "ArrowLeft" => Some(Button::B3),
        "r" | "R" | "ArrowRight" => Some(Button::B4),
        "t" | "T" => Some(Button::B5),
        "y" | "Y" => Some(Button::B6),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let queue = ButtonQueue::new();
        queue.push(Button::B1);
        queue.push(Button::Onboard);
        assert_eq!(queue.pop(), Some(Button::B1));
        assert_eq!(queue.pop(), Some(Button::Onboard));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_full_queue_drops_press() {
        let queue = ButtonQueue::new();
        for _ in 0..QUEUE_DEPTH {
            assert!(queue.push(Button::B5));
        }
        assert!(!queue.push(Button::B6));
        assert_eq!(queue.len(), QUEUE_DEPTH);
    }

    #[test]
    fn test_static_queue() {
        static QUEUE: ButtonQueue = ButtonQueue::new();
        QUEUE.push(Button::B2);
        assert_eq!(QUEUE.pop(), Some(Button::B2));
        assert!(QUEUE.is_empty());
    }

    #[test]
    fn test_menu_commands() {
        assert_eq!(command_for(Button::Onboard, Screen::Menu), Some(Command::Start));
        assert_eq!(command_for(Button::B3, Screen::Menu), Some(Command::ToggleWireless));
        assert_eq!(command_for(Button::B4, Screen::Menu), Some(Command::CycleDifficulty));
        assert_eq!(command_for(Button::B5, Screen::Menu), None);
        assert_eq!(command_for(Button::B6, Screen::Menu), None);
    }

    #[test]
    fn test_game_commands() {
        assert_eq!(
            command_for(Button::B1, Screen::Game),
            Some(Command::PaddleLeft(Side::Top))
        );
        assert_eq!(
            command_for(Button::B4, Screen::Game),
            Some(Command::PaddleRight(Side::Bottom))
        );
        assert_eq!(command_for(Button::B5, Screen::Game), Some(Command::SpawnBall));
        assert_eq!(command_for(Button::B6, Screen::Game), None);
    }

    #[test]
    fn test_pause_commands() {
        assert_eq!(command_for(Button::Onboard, Screen::Pause), Some(Command::Resume));
        assert_eq!(command_for(Button::B5, Screen::Pause), Some(Command::Reset));
        assert_eq!(command_for(Button::B6, Screen::Pause), Some(Command::Quit));
        assert_eq!(command_for(Button::B1, Screen::Pause), None);
    }

    #[test]
    fn test_key_maps() {
        assert_eq!(master_key(" "), Some(Button::Onboard));
        assert_eq!(master_key("6"), Some(Button::B6));
        assert_eq!(slave_key("ArrowLeft"), Some(Button::B3));
        assert_eq!(slave_key("Enter"), Some(Button::Onboard));
        assert_eq!(master_key("x"), None);
    }
}
