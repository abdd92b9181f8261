//! Read-only disk image backings for the MITS 88-DCDD controller.
//!
//! An [`ImageSource`] is the only way the controller ever touches a base disk
//! image: it can report a size and fill a sector-sized buffer, nothing else.
//! All writes the CPU issues land in the patch pool owned by
//! `altair8800-dcdd`, never here — this crate doesn't know patches exist.

mod file;
mod mem;
mod zero;

pub use file::FileImage;
pub use mem::MemImage;
pub use zero::ZeroImage;

/// Bytes per 88-DCDD sector.
pub const SECTOR_SIZE: usize = 137;

/// Sectors per track.
pub const SECTORS_PER_TRACK: u32 = 32;

/// Tracks per disk.
pub const MAX_TRACKS: u32 = 77;

/// Bytes per track (`SECTORS_PER_TRACK * SECTOR_SIZE`).
pub const TRACK_SIZE: u32 = SECTORS_PER_TRACK * SECTOR_SIZE as u32;

/// Full disk image size in bytes (`MAX_TRACKS * TRACK_SIZE`).
pub const DISK_SIZE: u32 = MAX_TRACKS * TRACK_SIZE;

/// Failure reading an underlying host-side image.
///
/// Short reads (offset past the image's logical end) are *not* an error —
/// they're documented, zero-filled behavior handled inline by each
/// [`ImageSource`] implementation. This type is reserved for the host medium
/// actually failing underneath us (file removed, I/O error).
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("disk image I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A read-only, byte-addressable disk image.
///
/// Implementations never need to know about tracks or sectors as concepts;
/// the controller always asks for a byte offset and a destination buffer
/// sized to one sector.
pub trait ImageSource {
    /// Size of the image in bytes, as reported by the host medium.
    fn size(&self) -> u32;

    /// Fill `buf` with `SECTOR_SIZE` bytes starting at `byte_offset`.
    ///
    /// If `byte_offset + buf.len()` exceeds [`ImageSource::size`], the
    /// out-of-range tail of `buf` is zero-filled rather than returning an
    /// error — this mirrors the original firmware's behavior for disks
    /// shorter than a full 77-track image.
    fn read_sector(&mut self, byte_offset: u32, buf: &mut [u8; SECTOR_SIZE]) -> Result<(), ImageError>;
}
