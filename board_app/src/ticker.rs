/// Periodic game tick. While attached, reports how many periods have
/// elapsed since the last call to [`Ticker::due`].
#[derive(Debug, Clone)]
pub struct Ticker {
    period_ms: u64,
    next_ms: Option<u64>,
}

impl Ticker {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            next_ms: None,
        }
    }

    /// First tick fires one period after `now_ms`. No-op when attached.
    pub fn attach(&mut self, now_ms: u64) {
        if self.next_ms.is_none() {
            self.next_ms = Some(now_ms + self.period_ms);
        }
    }

    pub fn detach(&mut self) {
        self.next_ms = None;
    }

    pub fn is_attached(&self) -> bool {
        self.next_ms.is_some()
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Number of ticks due at `now_ms`, at most `max`. Ticks beyond `max`
    /// are skipped, not queued.
    pub fn due(&mut self, now_ms: u64, max: u32) -> u32 {
        let Some(next) = self.next_ms else {
            return 0;
        };
        if now_ms < next {
            return 0;
        }

        let elapsed = (now_ms - next) / self.period_ms + 1;
        let fired = elapsed.min(max as u64) as u32;
        self.next_ms = Some(next + elapsed * self.period_ms);
        fired
    }
}
