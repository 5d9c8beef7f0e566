//! Random number sources
//!
//! The game only needs uniform floats in a range. On the board they come from
//! the MCU's RNG peripheral; everywhere else (tests, the simulator) a seeded
//! `StdRng` stands in.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fmt;

/// Granularity of [`GameRng::uniform`]
const RESOLUTION: u32 = 1_000_000;

/// Anything that can produce uniformly distributed 32-bit words
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;
}

impl RandomSource for StdRng {
    fn next_u32(&mut self) -> u32 {
        RngCore::next_u32(self)
    }
}

/// Register-level view of a true RNG peripheral
pub trait RngPeripheral {
    /// Turn on the clock and the generator
    fn enable(&mut self);
    fn data_ready(&self) -> bool;
    fn seed_error(&self) -> bool;
    fn clock_error(&self) -> bool;
    fn read_data(&mut self) -> u32;
    /// Disable and re-enable the generator to clear an error condition
    fn power_cycle(&mut self);
}

/// Blocking random source backed by an RNG peripheral.
///
/// A seed or clock error power-cycles the peripheral and yields 0 for that
/// call; the error is not reported further.
pub struct HardwareRng<P> {
    periph: P,
}

impl<P: RngPeripheral> HardwareRng<P> {
    pub fn new(mut periph: P) -> Self {
        periph.enable();
        Self { periph }
    }

    pub fn release(self) -> P {
        self.periph
    }
}

impl<P: RngPeripheral> RandomSource for HardwareRng<P> {
    fn next_u32(&mut self) -> u32 {
        loop {
            if self.periph.seed_error() || self.periph.clock_error() {
                self.periph.power_cycle();
                return 0;
            }
            if self.periph.data_ready() {
                return self.periph.read_data();
            }
            std::hint::spin_loop();
        }
    }
}

/// Random number generator used by the simulation
pub struct GameRng(Box<dyn RandomSource>);

impl GameRng {
    /// Deterministic software generator
    pub fn new(seed: u64) -> Self {
        Self(Box::new(StdRng::seed_from_u64(seed)))
    }

    /// Software generator seeded from the platform entropy source
    pub fn from_entropy() -> Self {
        Self(Box::new(StdRng::from_entropy()))
    }

    pub fn from_source(source: impl RandomSource + 'static) -> Self {
        Self(Box::new(source))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    /// Uniform float in `[min, max)`
    pub fn uniform(&mut self, min: f32, max: f32) -> f32 {
        let unit = (self.0.next_u32() % RESOLUTION) as f32 / RESOLUTION as f32;
        min + unit * (max - min)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl fmt::Debug for GameRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GameRng(..)")
    }
}

/// Replays a fixed list of words, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    words: Vec<u32>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(words: Vec<u32>) -> Self {
        Self { words, next: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn next_u32(&mut self) -> u32 {
        if self.words.is_empty() {
            return 0;
        }
        let word = self.words[self.next % self.words.len()];
        self.next = self.next.wrapping_add(1);
        word
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct MockPeripheral {
        ready_after: Cell<u32>,
        seed_error: bool,
        value: u32,
        power_cycles: Rc<Cell<u32>>,
        enabled: bool,
    }

    impl MockPeripheral {
        fn new(ready_after: u32, value: u32) -> Self {
            Self {
                ready_after: Cell::new(ready_after),
                seed_error: false,
                value,
                power_cycles: Rc::new(Cell::new(0)),
                enabled: false,
            }
        }
    }

    impl RngPeripheral for MockPeripheral {
        fn enable(&mut self) {
            self.enabled = true;
        }

        fn data_ready(&self) -> bool {
            let left = self.ready_after.get();
            if left == 0 {
                true
            } else {
                self.ready_after.set(left - 1);
                false
            }
        }

        fn seed_error(&self) -> bool {
            self.seed_error
        }

        fn clock_error(&self) -> bool {
            false
        }

        fn read_data(&mut self) -> u32 {
            self.value
        }

        fn power_cycle(&mut self) {
            self.power_cycles.set(self.power_cycles.get() + 1);
            self.seed_error = false;
        }
    }

    #[test]
    fn test_uniform_stays_in_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let v = rng.uniform(0.0, 11.0);
            assert!((0.0..11.0).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn test_uniform_scaling() {
        let mut rng = GameRng::from_source(ScriptedSource::new(vec![0, 500_000, 1_999_999]));
        assert_eq!(rng.uniform(2.0, 4.0), 2.0);
        assert!((rng.uniform(2.0, 4.0) - 3.0).abs() < 1e-6);
        // 1_999_999 % 1_000_000 = 999_999
        let top = rng.uniform(0.0, 1.0);
        assert!(top < 1.0 && top > 0.999);
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut a = GameRng::new(99);
        let mut b = GameRng::new(99);
        for _ in 0..10 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_hardware_rng_waits_for_data() {
        let periph = MockPeripheral::new(3, 0xDEAD_BEEF);
        let mut rng = HardwareRng::new(periph);
        assert_eq!(rng.next_u32(), 0xDEAD_BEEF);
        assert!(rng.release().enabled, "Peripheral enabled on construction");
    }

    #[test]
    fn test_hardware_rng_seed_error_power_cycles_and_returns_zero() {
        let mut periph = MockPeripheral::new(0, 42);
        periph.seed_error = true;
        let cycles = periph.power_cycles.clone();
        let mut rng = HardwareRng::new(periph);

        assert_eq!(rng.next_u32(), 0, "Error yields zero");
        assert_eq!(cycles.get(), 1);
        assert_eq!(rng.next_u32(), 42, "Recovered after power cycle");
    }

    #[test]
    fn test_scripted_source_cycles() {
        let mut src = ScriptedSource::new(vec![1, 2]);
        assert_eq!(
            [src.next_u32(), src.next_u32(), src.next_u32()],
            [1, 2, 1]
        );
    }
}
