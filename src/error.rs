//! The one typed error in this crate: everything reachable from the 8080's
//! port surface is infallible by construction (§7), so `thiserror` only
//! shows up at the host-facing `load()` seam.

/// Failure attaching an image to a drive.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// `drive` wasn't one of the four physical drive slots.
    ///
    /// Unlike `OUT 0x08` (which silently clamps an out-of-range *select* to
    /// drive 0, since the CPU has no error channel), `load()` is a host-side
    /// setup call — a caller wiring up the wrong drive index deserves a
    /// `Result`, not a silent clamp or a panic.
    #[error("drive index {0} is out of range (expected 0..4)")]
    DriveOutOfRange(u8),
}
