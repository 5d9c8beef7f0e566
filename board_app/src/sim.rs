//! Browser simulator: two consoles side by side, linked by an in-memory
//! radio pair. JavaScript drives `frame` from requestAnimationFrame and
//! forwards key presses.

use crate::console::{Console, ConsoleConfig};
use crate::env::WasmEnv;
use crate::input::{master_key, slave_key, Button, ButtonQueue};
use crate::radio::LoopbackRadio;
use crate::renderer::canvas::CanvasDisplay;
use game_core::{Arena, Board, Config, GameRng};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

// Stand-ins for the two boards' button interrupt queues
static MASTER_BUTTONS: ButtonQueue = ButtonQueue::new();
static SLAVE_BUTTONS: ButtonQueue = ButtonQueue::new();

struct Sim {
    master: Console,
    slave: Console,
}

thread_local! {
    static SIM: RefCell<Option<Sim>> = const { RefCell::new(None) };
}

fn canvas_by_id(id: &str) -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document"))?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("No element #{id}")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not a canvas")))
}

fn board_for(canvas: &HtmlCanvasElement) -> Board {
    let arena = Arena::new(
        0,
        Arena::default().min_y,
        canvas.width() as i32,
        canvas.height() as i32,
    );
    Board::new(arena, Config::new(), GameRng::from_entropy())
}

#[wasm_bindgen]
pub fn init_sim(master_canvas: &str, slave_canvas: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let master_el = canvas_by_id(master_canvas)?;
    let slave_el = canvas_by_id(slave_canvas)?;
    let (master_radio, slave_radio) = LoopbackRadio::pair();

    let master = Console::new(
        ConsoleConfig::default(),
        Box::new(WasmEnv { tag: "master" }),
        board_for(&master_el),
        Box::new(master_radio),
        &MASTER_BUTTONS,
        Box::new(CanvasDisplay::new(&master_el)?),
    );
    let slave = Console::new(
        ConsoleConfig::slave(),
        Box::new(WasmEnv { tag: "slave" }),
        board_for(&slave_el),
        Box::new(slave_radio),
        &SLAVE_BUTTONS,
        Box::new(CanvasDisplay::new(&slave_el)?),
    );

    SIM.with(|sim| *sim.borrow_mut() = Some(Sim { master, slave }));
    Ok(())
}

/// Keyboard press; both boards' layouts share the keyboard
#[wasm_bindgen]
pub fn key_down(key: &str) {
    if let Some(button) = master_key(key) {
        MASTER_BUTTONS.push(button);
    } else if let Some(button) = slave_key(key) {
        SLAVE_BUTTONS.push(button);
    }
}

/// On-screen button: `board` 0 = master, 1 = slave; `button` 0 = onboard,
/// 1..=6 = B1..B6
#[wasm_bindgen]
pub fn press_button(board: u8, button: u8) -> bool {
    let button = match button {
        0 => Button::Onboard,
        1 => Button::B1,
        2 => Button::B2,
        3 => Button::B3,
        4 => Button::B4,
        5 => Button::B5,
        6 => Button::B6,
        _ => return false,
    };
    match board {
        0 => MASTER_BUTTONS.push(button),
        1 => SLAVE_BUTTONS.push(button),
        _ => false,
    }
}

#[wasm_bindgen]
pub fn frame(now_ms: f64) -> Result<(), JsValue> {
    let now = now_ms.max(0.0) as u64;
    SIM.with(|sim| {
        let mut sim = sim.borrow_mut();
        let sim = sim
            .as_mut()
            .ok_or_else(|| JsValue::from_str("init_sim has not run"))?;
        sim.master.poll(now);
        sim.slave.poll(now);
        Ok(())
    })
}

/// Current screens as "master/slave", for the page's status line
#[wasm_bindgen]
pub fn screens() -> String {
    SIM.with(|sim| match sim.borrow().as_ref() {
        Some(sim) => format!("{:?}/{:?}", sim.master.screen(), sim.slave.screen()),
        None => String::new(),
    })
}
