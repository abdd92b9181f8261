use crate::{ImageError, ImageSource, SECTOR_SIZE};

/// An effectively infinite, all-zero image.
///
/// Useful for booting from a blank formatted disk, and in tests that only
/// care about the patch/COW behavior and don't want to construct a real
/// base image.
pub struct ZeroImage {
    size: u32,
}

impl ZeroImage {
    pub fn new(size: u32) -> Self {
        Self { size }
    }
}

impl ImageSource for ZeroImage {
    fn size(&self) -> u32 {
        self.size
    }

    fn read_sector(&mut self, _byte_offset: u32, buf: &mut [u8; SECTOR_SIZE]) -> Result<(), ImageError> {
        buf.fill(0);
        Ok(())
    }
}
