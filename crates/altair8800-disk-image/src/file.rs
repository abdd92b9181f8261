use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::{ImageError, ImageSource, SECTOR_SIZE};

/// A disk image backed by an open file descriptor, read on demand.
///
/// Unlike [`crate::MemImage`], the image need not be resident: each
/// `read_sector` seeks and reads directly from the file. This is the
/// shape a filesystem-backed host (SD card, regular filesystem) wants.
pub struct FileImage {
    file: File,
    size: u32,
}

impl FileImage {
    /// Open `path` read-only as a disk image.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let file = File::open(path)?;
        let size = file.metadata()?.len().min(u32::MAX as u64) as u32;
        Ok(Self { file, size })
    }
}

impl ImageSource for FileImage {
    fn size(&self) -> u32 {
        self.size
    }

    fn read_sector(&mut self, byte_offset: u32, buf: &mut [u8; SECTOR_SIZE]) -> Result<(), ImageError> {
        buf.fill(0);
        if byte_offset >= self.size {
            return Ok(());
        }
        self.file.seek(SeekFrom::Start(byte_offset as u64))?;
        let available = (self.size - byte_offset) as usize;
        let n = available.min(SECTOR_SIZE);
        self.file.read_exact(&mut buf[..n])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_bytes_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disk.img");
        let mut f = File::create(&path).unwrap();
        let data: Vec<u8> = (0u16..137).map(|b| b as u8).collect();
        f.write_all(&data).unwrap();
        drop(f);

        let mut img = FileImage::open(&path).unwrap();
        assert_eq!(img.size(), 137);

        let mut buf = [0u8; SECTOR_SIZE];
        img.read_sector(0, &mut buf).unwrap();
        assert_eq!(buf[0], 0);
        assert_eq!(buf[136], 136);
    }

    #[test]
    fn short_file_zero_fills_tail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disk.img");
        std::fs::write(&path, [0xAAu8; 10]).unwrap();

        let mut img = FileImage::open(&path).unwrap();
        let mut buf = [0u8; SECTOR_SIZE];
        img.read_sector(0, &mut buf).unwrap();
        assert_eq!(&buf[..10], &[0xAAu8; 10]);
        assert_eq!(&buf[10..], &[0u8; SECTOR_SIZE - 10]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.img");
        assert!(FileImage::open(&path).is_err());
    }
}
