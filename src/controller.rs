//! The disk controller (§4.4): four drives, a current-selection register,
//! and the six port operations the 8080 actually calls.

use altair8800_disk_image::ImageSource;

use crate::drive::DiskDrive;
use crate::error::LoadError;
use crate::patch_pool::{PatchPool, DEFAULT_POOL_CAPACITY};

/// Physical drive count on a MITS 88-DCDD controller.
pub const NUM_DRIVES: usize = 4;

/// Mask applied to the byte written on `OUT 0x08` before range-checking it.
const DRIVE_SELECT_MASK: u8 = 0x0F;

/// Holds four drives and the patch pool they share; routes the six port
/// operations the CPU-facing [`crate::PortBus`] dispatches to.
pub struct DiskController {
    drives: [DiskDrive; NUM_DRIVES],
    pool: PatchPool,
    current: u8,
}

impl DiskController {
    /// A controller with the canonical 256-slot patch pool.
    pub fn new() -> Self {
        Self::with_pool_capacity(DEFAULT_POOL_CAPACITY)
    }

    /// A controller whose patch pool holds `capacity` patches instead of
    /// the canonical 256 — tests want a small pool to make exhaustion cheap
    /// to reach; production wants the real thing.
    pub fn with_pool_capacity(capacity: usize) -> Self {
        Self {
            drives: std::array::from_fn(|_| DiskDrive::new()),
            pool: PatchPool::new(capacity),
            current: 0,
        }
    }

    /// Attach `image` to `drive`, discarding that drive's prior patches.
    /// Returns an error if `drive` isn't 0..4 rather than clamping, since
    /// this is a host setup call, not a CPU port write (§7).
    pub fn load(&mut self, drive: u8, image: Box<dyn ImageSource>) -> Result<(), LoadError> {
        let idx = usize::from(drive);
        if idx >= NUM_DRIVES {
            return Err(LoadError::DriveOutOfRange(drive));
        }
        self.drives[idx].load(&mut self.pool, image);
        Ok(())
    }

    /// `OUT 0x08, d` — select a drive. Out-of-range selections clamp to 0
    /// (the CPU has no error channel; §7).
    pub fn select(&mut self, drive: u8) {
        let selected = drive & DRIVE_SELECT_MASK;
        self.current = if usize::from(selected) < NUM_DRIVES { selected } else { 0 };
    }

    /// `IN 0x08` — the current drive's status register.
    pub fn status(&self) -> u8 {
        self.current_drive().status()
    }

    /// `OUT 0x09, ctl` — dispatch control bits to the current drive.
    pub fn function(&mut self, ctl: u8) {
        let idx = usize::from(self.current);
        self.drives[idx].control_function(&mut self.pool, ctl);
    }

    /// `IN 0x09` — the current drive's packed sector byte.
    pub fn sector(&mut self) -> u8 {
        let idx = usize::from(self.current);
        self.drives[idx].sector_read_port(&mut self.pool)
    }

    /// `OUT 0x0A, b` — write a byte into the current drive's sector buffer.
    pub fn write(&mut self, byte: u8) {
        let idx = usize::from(self.current);
        self.drives[idx].write_byte(&mut self.pool, byte);
    }

    /// `IN 0x0A` — read a byte from the current drive's sector buffer.
    pub fn read(&mut self) -> u8 {
        let idx = usize::from(self.current);
        self.drives[idx].read_byte(&self.pool)
    }

    /// The currently selected drive index (always `< NUM_DRIVES`).
    pub fn current_drive_index(&self) -> u8 {
        self.current
    }

    fn current_drive(&self) -> &DiskDrive {
        &self.drives[usize::from(self.current)]
    }

    /// Direct access to a drive, for tests and diagnostics.
    pub fn drive(&self, index: u8) -> Option<&DiskDrive> {
        self.drives.get(usize::from(index))
    }

    /// Patches currently held across all drives.
    pub fn patches_in_use(&self) -> usize {
        self.pool.used()
    }

    /// Total patch-pool capacity.
    pub fn patch_pool_capacity(&self) -> usize {
        self.pool.capacity()
    }
}

impl Default for DiskController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use altair8800_disk_image::{MemImage, DISK_SIZE};
    use crate::status;

    fn blank_image() -> Box<dyn ImageSource> {
        Box::new(MemImage::blank(DISK_SIZE))
    }

    #[test]
    fn select_clamps_out_of_range_drives_to_zero() {
        let mut ctl = DiskController::new();
        ctl.select(9);
        assert_eq!(ctl.current_drive_index(), 0);
    }

    #[test]
    fn select_masks_to_low_nibble() {
        let mut ctl = DiskController::new();
        ctl.select(0x11); // low nibble 1, a valid drive
        assert_eq!(ctl.current_drive_index(), 1);
    }

    #[test]
    fn load_rejects_out_of_range_drive_index() {
        let mut ctl = DiskController::new();
        let err = ctl.load(4, blank_image()).unwrap_err();
        assert!(matches!(err, LoadError::DriveOutOfRange(4)));
    }

    #[test]
    fn unloaded_drive_end_to_end_scenario() {
        let mut ctl = DiskController::new();
        ctl.select(3);
        assert_eq!(ctl.sector(), 0xC0);
        assert_eq!(ctl.read(), 0x00);
        ctl.write(0xFF);
        assert_eq!(ctl.status(), status::STATUS_DEFAULT);
    }

    #[test]
    fn patch_pool_is_shared_and_exhaustion_is_observable() {
        let mut ctl = DiskController::with_pool_capacity(4);
        ctl.load(0, blank_image()).unwrap();
        ctl.load(1, blank_image()).unwrap();

        // Write one full sector per drive per track step; each occupies a
        // distinct sector_index (track*32+sector), so each flush claims a
        // fresh patch slot.
        for drive in [0u8, 1] {
            ctl.select(drive);
            for _ in 0..2 {
                ctl.function(status::control::WRITE_ENABLE);
                for b in 0..137u16 {
                    ctl.write(b as u8);
                }
                ctl.function(status::control::STEP_IN);
            }
        }
        assert_eq!(ctl.patches_in_use(), 4);

        ctl.select(0);
        ctl.function(status::control::WRITE_ENABLE);
        for b in 0..137u16 {
            ctl.write(b as u8); // sector_index differs again (track moved); pool is full
        }
        assert_eq!(ctl.patches_in_use(), 4, "exhausted pool must not grow");
    }
}
