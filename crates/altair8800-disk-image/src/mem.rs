use crate::{ImageError, ImageSource, SECTOR_SIZE};

/// An image held entirely resident in memory.
///
/// Models a flash-XIP backing (the image is a slice mapped directly into
/// address space) as well as any host that prefers to read a disk file
/// once up front rather than keep a file descriptor open.
pub struct MemImage {
    bytes: Vec<u8>,
}

impl MemImage {
    /// Wrap an in-memory byte buffer as a disk image. Shorter-than-full-disk
    /// buffers are accepted; reads past the end zero-fill per [`ImageSource`].
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// A disk image of `size` bytes, entirely zero.
    pub fn blank(size: u32) -> Self {
        Self {
            bytes: vec![0u8; size as usize],
        }
    }
}

impl ImageSource for MemImage {
    fn size(&self) -> u32 {
        self.bytes.len() as u32
    }

    fn read_sector(&mut self, byte_offset: u32, buf: &mut [u8; SECTOR_SIZE]) -> Result<(), ImageError> {
        buf.fill(0);
        let offset = byte_offset as usize;
        if offset >= self.bytes.len() {
            return Ok(());
        }
        let end = (offset + SECTOR_SIZE).min(self.bytes.len());
        let n = end - offset;
        buf[..n].copy_from_slice(&self.bytes[offset..end]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_in_range_bytes() {
        let mut img = MemImage::new((0u16..137).map(|b| b as u8).collect());
        let mut buf = [0u8; SECTOR_SIZE];
        img.read_sector(0, &mut buf).unwrap();
        assert_eq!(buf[0], 0);
        assert_eq!(buf[136], 136);
    }

    #[test]
    fn short_image_zero_fills_tail() {
        let mut img = MemImage::new(vec![0xAAu8; 10]);
        let mut buf = [0u8; SECTOR_SIZE];
        img.read_sector(0, &mut buf).unwrap();
        assert_eq!(&buf[..10], &[0xAAu8; 10]);
        assert_eq!(&buf[10..], &[0u8; SECTOR_SIZE - 10]);
    }

    #[test]
    fn read_entirely_past_end_is_all_zero() {
        let mut img = MemImage::blank(137);
        let mut buf = [0xFFu8; SECTOR_SIZE];
        img.read_sector(1000, &mut buf).unwrap();
        assert_eq!(buf, [0u8; SECTOR_SIZE]);
    }
}
