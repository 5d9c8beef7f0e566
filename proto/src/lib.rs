//! Radio link frames for two-board Pong
//!
//! Uses postcard for the fixed-size binary layout. Every field is a `u8` or
//! a byte array, which postcard writes verbatim, so the serde struct below
//! is the wire layout byte for byte.

use postcard::{from_bytes, to_slice};
use serde::{Deserialize, Serialize};

pub const SLAVE_FRAME_LEN: usize = 1;
pub const MAX_BALLS: usize = 8;

// ============================================================================
// Layout description
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    /// Single byte
    None,
    /// Repeated record with its own layout
    Mixed,
}

/// One named field of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
    pub endian: Endian,
}

/// One ball slot. x has no high byte on the wire.
pub const BALL_SLOT_LAYOUT: [FieldSpec; 2] = [
    FieldSpec {
        name: "x_lo",
        offset: 0,
        width: 1,
        endian: Endian::None,
    },
    FieldSpec {
        name: "y",
        offset: 1,
        width: 2,
        endian: Endian::Little,
    },
];

pub const BALL_SLOT_LEN: usize = layout_len(&BALL_SLOT_LAYOUT);

/// Master to slave frame, field by field
pub const MASTER_LAYOUT: [FieldSpec; 7] = [
    FieldSpec {
        name: "ball_count",
        offset: 0,
        width: 1,
        endian: Endian::None,
    },
    FieldSpec {
        name: "balls",
        offset: 1,
        width: BALL_SLOT_LEN * MAX_BALLS,
        endian: Endian::Mixed,
    },
    FieldSpec {
        name: "paddle_top_x",
        offset: 25,
        width: 1,
        endian: Endian::None,
    },
    FieldSpec {
        name: "paddle_bottom_x",
        offset: 26,
        width: 1,
        endian: Endian::None,
    },
    FieldSpec {
        name: "score_top",
        offset: 27,
        width: 2,
        endian: Endian::Little,
    },
    FieldSpec {
        name: "score_bottom",
        offset: 29,
        width: 2,
        endian: Endian::Little,
    },
    FieldSpec {
        name: "state",
        offset: 31,
        width: 1,
        endian: Endian::None,
    },
];

pub const MASTER_FRAME_LEN: usize = layout_len(&MASTER_LAYOUT);

/// Total width of a layout
pub const fn layout_len(layout: &[FieldSpec]) -> usize {
    let mut len = 0;
    let mut i = 0;
    while i < layout.len() {
        len += layout[i].width;
        i += 1;
    }
    len
}

// ============================================================================
// Screen code
// ============================================================================

/// Screen the master is showing, as carried in the last frame byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCode {
    Menu = 0,
    Pause = 1,
    Game = 2,
}

impl ScreenCode {
    /// Unknown values fall back to Menu
    pub fn from_byte(b: u8) -> Self {
        match b {
            2 => ScreenCode::Game,
            1 => ScreenCode::Pause,
            _ => ScreenCode::Menu,
        }
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

// ============================================================================
// Frames
// ============================================================================

/// A ball position on the wire. Only the low byte of x is carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallSlot {
    pub x_lo: u8,
    pub y_lo: u8,
    pub y_hi: u8,
}

impl BallSlot {
    pub fn new(x: u16, y: u16) -> Self {
        let [y_lo, y_hi] = y.to_le_bytes();
        Self {
            x_lo: x as u8,
            y_lo,
            y_hi,
        }
    }

    pub fn x(&self) -> u16 {
        self.x_lo as u16
    }

    pub fn y(&self) -> u16 {
        u16::from_le_bytes([self.y_lo, self.y_hi])
    }
}

/// Master to slave frame (32 bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterFrame {
    pub ball_count: u8,
    pub balls: [BallSlot; MAX_BALLS],
    pub paddle_top_x: u8,
    pub paddle_bottom_x: u8,
    pub score_top: [u8; 2],
    pub score_bottom: [u8; 2],
    pub state: u8,
}

impl MasterFrame {
    /// Build a frame; balls beyond the eighth are dropped
    pub fn new(
        balls: &[(u16, u16)],
        paddle_top_x: u8,
        paddle_bottom_x: u8,
        score_top: u16,
        score_bottom: u16,
        screen: ScreenCode,
    ) -> Self {
        let mut slots = [BallSlot::default(); MAX_BALLS];
        for (slot, &(x, y)) in slots.iter_mut().zip(balls) {
            *slot = BallSlot::new(x, y);
        }
        Self {
            ball_count: balls.len().min(MAX_BALLS) as u8,
            balls: slots,
            paddle_top_x,
            paddle_bottom_x,
            score_top: score_top.to_le_bytes(),
            score_bottom: score_bottom.to_le_bytes(),
            state: screen.to_byte(),
        }
    }

    /// Ball slots in use (a count above 8 is clamped)
    pub fn balls(&self) -> &[BallSlot] {
        let n = (self.ball_count as usize).min(MAX_BALLS);
        &self.balls[..n]
    }

    pub fn score_top(&self) -> u16 {
        u16::from_le_bytes(self.score_top)
    }

    pub fn score_bottom(&self) -> u16 {
        u16::from_le_bytes(self.score_bottom)
    }

    pub fn screen(&self) -> ScreenCode {
        ScreenCode::from_byte(self.state)
    }

    /// Serialize to the fixed 32-byte frame sized by `MASTER_LAYOUT`
    pub fn to_bytes(&self) -> Result<[u8; MASTER_FRAME_LEN], postcard::Error> {
        let mut buf = [0u8; MASTER_FRAME_LEN];
        let used = to_slice(self, &mut buf)?.len();
        debug_assert_eq!(used, MASTER_FRAME_LEN);
        Ok(buf)
    }

    /// Deserialize from a received frame; extra bytes are ignored
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

/// Slave to master frame: the bottom paddle's x
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaveFrame {
    pub paddle_x: u8,
}

impl SlaveFrame {
    pub fn new(paddle_x: u8) -> Self {
        Self { paddle_x }
    }

    pub fn to_bytes(&self) -> Result<[u8; SLAVE_FRAME_LEN], postcard::Error> {
        let mut buf = [0u8; SLAVE_FRAME_LEN];
        to_slice(self, &mut buf)?;
        Ok(buf)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

/// Space-separated uppercase hex, for link diagnostics
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
