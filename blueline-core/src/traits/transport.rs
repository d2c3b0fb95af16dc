//! Outbound transport trait

/// Trait for the outbound half of the serial bridge.
///
/// Implementations push raw bytes toward the app; framing and checksums
/// are already applied by the caller. The bridge offers no acknowledgement,
/// so delivery is best effort and there is nothing useful to return.
pub trait Transport {
    /// Send raw bytes outward.
    fn send(&mut self, bytes: &[u8]);
}
