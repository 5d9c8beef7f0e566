//! Board application for two-board Pong
//!
//! Screens, buttons, ticker, radio link and LCD drawing around a
//! `game_core::Board`. On wasm32 a browser simulator runs a master and a
//! slave board on two canvases.

pub mod console;
pub mod env;
pub mod fsm;
pub mod input;
pub mod link;
pub mod radio;
pub mod renderer;
pub mod ticker;

#[cfg(target_arch = "wasm32")]
pub mod sim;


pub use console::{Console, ConsoleConfig};
pub use env::Environment;
pub use fsm::{Action, Screen, ScreenFsm, TransitionResult};
pub use input::{Button, ButtonQueue, Command};
pub use link::{Link, Role};
pub use radio::{LoopbackRadio, Radio, RadioError, RadioInfo};
pub use renderer::{BoardRenderer, Color, Display};
pub use ticker::Ticker;
