use super::MONITOR_RATIO;


/// Compression ratio bookkeeping for the monitored codebook.
///
/// Measurement starts once the codebook is full. The first sample after a reset
/// becomes the reference ratio and later samples are compared against it.
#[derive(Debug, Clone, Default)]
pub struct RatioMonitor {
    uncompressed: u64,
    compressed: u64,
    initial: Option<f64>,
}

impl RatioMonitor {
    pub fn new() -> RatioMonitor {
        RatioMonitor::default()
    }

    /// Accounts one codeword of `width` bits standing for `symbol_len` bytes.
    /// Returns the degradation `initial / current` when it exceeds
    /// `MONITOR_RATIO`.
    pub fn record(&mut self, symbol_len: usize, width: u32) -> Option<f64> {
        self.uncompressed += symbol_len as u64 * 8;
        self.compressed += width as u64;

        let current = self.uncompressed as f64 / self.compressed as f64;
        let initial = *self.initial.get_or_insert(current);

        let degradation = initial / current;
        (degradation > MONITOR_RATIO).then_some(degradation)
    }

    pub fn reset(&mut self) {
        *self = RatioMonitor::default();
    }
}
