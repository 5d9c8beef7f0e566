//! Packet radio abstraction
//!
//! Mirrors the small API of a 2.4 GHz transceiver: fixed transfer size,
//! non-blocking readable check, fire-and-forget writes.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Frames waiting on the far end before the oldest is dropped
const LOOPBACK_DEPTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioError {
    Disabled,
    Empty,
    PayloadTooLarge { len: usize, max: usize },
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadioError::Disabled => write!(f, "radio is not enabled"),
            RadioError::Empty => write!(f, "no frame available"),
            RadioError::PayloadTooLarge { len, max } => {
                write!(f, "payload of {len} bytes exceeds transfer size {max}")
            }
        }
    }
}

impl std::error::Error for RadioError {}

/// Link settings reported after bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioInfo {
    pub frequency_mhz: u16,
    pub power_dbm: i8,
    pub data_rate_kbps: u16,
    pub tx_address: u64,
    pub rx_address: u64,
}

impl Default for RadioInfo {
    fn default() -> Self {
        Self {
            frequency_mhz: 2402,
            power_dbm: 0,
            data_rate_kbps: 1000,
            tx_address: 0xE7E7_E7E7_E7,
            rx_address: 0xE7E7_E7E7_E7,
        }
    }
}

pub trait Radio {
    fn power_up(&mut self);
    fn set_transfer_size(&mut self, size: usize);
    fn enable(&mut self);
    fn info(&self) -> RadioInfo;
    fn readable(&self) -> bool;
    /// Read one frame into `buf`; returns the byte count
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, RadioError>;
    /// Send one frame, padded to the transfer size; returns the byte count
    fn write(&mut self, payload: &[u8]) -> Result<usize, RadioError>;
}

type Channel = Rc<RefCell<VecDeque<Vec<u8>>>>;

/// In-memory radio. Two endpoints from [`LoopbackRadio::pair`] deliver to
/// each other.
pub struct LoopbackRadio {
    info: RadioInfo,
    powered: bool,
    enabled: bool,
    transfer_size: usize,
    inbox: Channel,
    outbox: Channel,
}

impl LoopbackRadio {
    pub fn pair() -> (LoopbackRadio, LoopbackRadio) {
        let a_to_b: Channel = Rc::default();
        let b_to_a: Channel = Rc::default();
        (
            Self::endpoint(b_to_a.clone(), a_to_b.clone()),
            Self::endpoint(a_to_b, b_to_a),
        )
    }

    fn endpoint(inbox: Channel, outbox: Channel) -> Self {
        Self {
            info: RadioInfo::default(),
            powered: false,
            enabled: false,
            transfer_size: proto::MASTER_FRAME_LEN,
            inbox,
            outbox,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pending(&self) -> usize {
        self.inbox.borrow().len()
    }
}

impl Radio for LoopbackRadio {
    fn power_up(&mut self) {
        self.powered = true;
    }

    fn set_transfer_size(&mut self, size: usize) {
        self.transfer_size = size;
    }

    fn enable(&mut self) {
        self.enabled = self.powered;
    }

    fn info(&self) -> RadioInfo {
        self.info
    }

    fn readable(&self) -> bool {
        self.enabled && !self.inbox.borrow().is_empty()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, RadioError> {
        if !self.enabled {
            return Err(RadioError::Disabled);
        }
        let frame = self
            .inbox
            .borrow_mut()
            .pop_front()
            .ok_or(RadioError::Empty)?;
        let n = frame.len().min(buf.len());
        buf[..n].copy_from_slice(&frame[..n]);
        Ok(n)
    }

    fn write(&mut self, payload: &[u8]) -> Result<usize, RadioError> {
        if !self.enabled {
            return Err(RadioError::Disabled);
        }
        if payload.len() > self.transfer_size {
            return Err(RadioError::PayloadTooLarge {
                len: payload.len(),
                max: self.transfer_size,
            });
        }

        let mut frame = payload.to_vec();
        frame.resize(self.transfer_size, 0);

        let mut outbox = self.outbox.borrow_mut();
        if outbox.len() >= LOOPBACK_DEPTH {
            outbox.pop_front();
        }
        outbox.push_back(frame);
        Ok(self.transfer_size)
    }
}
