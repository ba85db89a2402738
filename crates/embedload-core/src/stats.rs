/// Request counters for one run. `successful` never exceeds `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    total: u64,
    successful: u64,
}

impl RunStats {
    pub fn new() -> Self { Self::default() }

    /// Counts a request as issued and returns its 1-based number.
    pub fn begin_request(&mut self) -> u64 {
        self.total += 1;
        self.total
    }

    pub fn record_success(&mut self) {
        if self.successful < self.total {
            self.successful += 1;
        }
    }

    pub fn total(&self) -> u64 { self.total }

    pub fn successful(&self) -> u64 { self.successful }

    /// Percentage in `[0, 100]`; 0 before the first request.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.successful as f64 / self.total as f64 * 100.0
    }
}
