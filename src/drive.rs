//! Per-drive state machine (§4.3): track/sector/head position, the
//! active-low status register, and the sector buffer the CPU streams bytes
//! through on ports 0x09/0x0A.

use altair8800_disk_image::{ImageSource, DISK_SIZE, MAX_TRACKS, SECTOR_SIZE, TRACK_SIZE};
use tracing::info;

use crate::patch_pool::{new_hash_table, HashTable, PatchPool};
use crate::status::{self, control, STATUS_DEFAULT};

/// Transient end-of-track sector value (see §3): the CPU observes this for
/// one `sector()` read, and it's wrapped back to 0 on the next.
const END_OF_TRACK_SECTOR: u8 = 32;

/// Two-byte write-overrun tolerance the original firmware's buffer carried;
/// both reads and writes clamp their index here rather than panicking.
const SECTOR_BUFFER_LEN: usize = SECTOR_SIZE + 2;
const MAX_BUFFER_INDEX: usize = SECTOR_SIZE + 1;

pub struct DiskDrive {
    track: u8,
    sector: u8,
    status: u8,
    image_position: u32,
    sector_buffer: [u8; SECTOR_BUFFER_LEN],
    sector_pointer: u8,
    write_counter: u8,
    have_sector_data: bool,
    sector_dirty: bool,
    patch_hash: HashTable,
    loaded: bool,
    image: Option<Box<dyn ImageSource>>,
}

impl DiskDrive {
    pub fn new() -> Self {
        Self {
            track: 0,
            sector: 0,
            status: STATUS_DEFAULT,
            image_position: 0,
            sector_buffer: [0u8; SECTOR_BUFFER_LEN],
            sector_pointer: 0,
            write_counter: 0,
            have_sector_data: false,
            sector_dirty: false,
            patch_hash: new_hash_table(),
            loaded: false,
            image: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn track(&self) -> u8 {
        self.track
    }

    pub fn sector(&self) -> u8 {
        self.sector
    }

    pub fn image_position(&self) -> u32 {
        self.image_position
    }

    pub fn sector_pointer(&self) -> u8 {
        self.sector_pointer
    }

    pub fn write_counter(&self) -> u8 {
        self.write_counter
    }

    /// Attach an image, discarding any patches this drive held for its
    /// previous one. See §3 lifecycle.
    pub fn load(&mut self, pool: &mut PatchPool, image: Box<dyn ImageSource>) {
        pool.clear(&mut self.patch_hash);

        let size = image.size();
        self.image = Some(image);
        self.loaded = true;
        self.track = 0;
        self.sector = 0;
        self.image_position = 0;
        self.sector_pointer = 0;
        self.write_counter = 0;
        self.sector_dirty = false;
        self.have_sector_data = false;

        // At track 0, not moving, sector true (§6.2) — reproduces the
        // original firmware's load-time status derivation exactly,
        // including its debatable MOVE_HEAD clear (see SPEC_FULL.md §9).
        self.status = STATUS_DEFAULT;
        status::assert_flag(&mut self.status, status::MOVE_HEAD);
        status::assert_flag(&mut self.status, status::TRACK_0);
        status::assert_flag(&mut self.status, status::SECTOR);

        info!(size, full_disk = size == DISK_SIZE, "disk image loaded");
    }

    pub fn status(&self) -> u8 {
        self.status
    }

    /// `OUT 0x09` — interprets the control byte per §4.3. Order of checks is
    /// fixed (STEP_IN, STEP_OUT, HEAD_LOAD, HEAD_UNLOAD, WRITE_ENABLE) so
    /// behavior is deterministic when multiple bits are set at once (§5).
    pub fn control_function(&mut self, pool: &mut PatchPool, ctl: u8) {
        if !self.loaded {
            return;
        }

        if ctl & control::STEP_IN != 0 {
            if self.track < (MAX_TRACKS - 1) as u8 {
                self.track += 1;
            }
            if self.track != 0 {
                status::deassert_flag(&mut self.status, status::TRACK_0);
            }
            self.seek_to_track(pool);
        }

        if ctl & control::STEP_OUT != 0 {
            if self.track > 0 {
                self.track -= 1;
            }
            if self.track == 0 {
                status::assert_flag(&mut self.status, status::TRACK_0);
            }
            self.seek_to_track(pool);
        }

        if ctl & control::HEAD_LOAD != 0 {
            status::assert_flag(&mut self.status, status::HEAD);
            status::assert_flag(&mut self.status, status::NRDA);
        }

        if ctl & control::HEAD_UNLOAD != 0 {
            status::deassert_flag(&mut self.status, status::HEAD);
        }

        if ctl & control::WRITE_ENABLE != 0 {
            status::assert_flag(&mut self.status, status::ENWD);
            self.write_counter = 0;
        }
    }

    /// `IN 0x09` — advances to the current sector and returns the packed
    /// sector byte per §6.3.
    pub fn sector_read_port(&mut self, pool: &mut PatchPool) -> u8 {
        if !self.loaded {
            return 0xC0;
        }

        if self.sector == END_OF_TRACK_SECTOR {
            self.sector = 0;
        }

        self.flush_sector(pool);

        self.image_position = self.track as u32 * TRACK_SIZE + self.sector as u32 * SECTOR_SIZE as u32;
        self.sector_pointer = 0;
        self.have_sector_data = false;

        let mut ret = 0xC0u8;
        ret |= self.sector << 1;
        ret |= if self.sector_pointer == 0 { 0 } else { 1 };

        self.sector += 1;
        ret
    }

    /// `IN 0x0A` — streams a byte out of the sector buffer, filling it from
    /// the image (overlaid by any patch) on first access.
    pub fn read_byte(&mut self, pool: &PatchPool) -> u8 {
        if !self.loaded {
            return 0x00;
        }

        if !self.have_sector_data {
            let mut buf = [0u8; SECTOR_SIZE];
            if let Some(image) = self.image.as_mut() {
                // A genuine I/O failure here (not a short read, which the
                // `ImageSource` contract already zero-fills) has no channel
                // back to the CPU; fall back to the zeroed buffer.
                let _ = image.read_sector(self.image_position, &mut buf);
            }
            self.sector_buffer[..SECTOR_SIZE].copy_from_slice(&buf);

            let sector_index = (self.image_position / SECTOR_SIZE as u32) as u16;
            if let Some(idx) = pool.find(&self.patch_hash, sector_index) {
                self.sector_buffer[..SECTOR_SIZE].copy_from_slice(pool.bytes(idx));
            }
            self.have_sector_data = true;
        }

        let idx = (self.sector_pointer as usize).min(MAX_BUFFER_INDEX);
        let byte = self.sector_buffer[idx];
        self.sector_pointer = self.sector_pointer.saturating_add(1);
        byte
    }

    /// `OUT 0x0A` — appends a byte to the sector buffer; flushes and
    /// self-disarms ENWD after a full 137-byte sector (§9 open question).
    pub fn write_byte(&mut self, pool: &mut PatchPool, data: u8) {
        if !self.loaded {
            return;
        }

        let idx = (self.sector_pointer as usize).min(MAX_BUFFER_INDEX);
        self.sector_buffer[idx] = data;
        self.sector_pointer = self.sector_pointer.saturating_add(1);
        self.sector_dirty = true;
        self.have_sector_data = true;

        self.write_counter = self.write_counter.saturating_add(1);
        if self.write_counter as usize == SECTOR_SIZE {
            self.flush_sector(pool);
            self.write_counter = 0;
            status::deassert_flag(&mut self.status, status::ENWD);
        }
    }

    fn seek_to_track(&mut self, pool: &mut PatchPool) {
        self.flush_sector(pool);
        self.image_position = self.track as u32 * TRACK_SIZE;
        self.have_sector_data = false;
        self.sector_pointer = 0;
        self.sector = 0;
    }

    fn flush_sector(&mut self, pool: &mut PatchPool) {
        if !self.sector_dirty {
            return;
        }

        let sector_index = (self.image_position / SECTOR_SIZE as u32) as u16;
        if let Some(patch_idx) = pool.get_or_create(&mut self.patch_hash, sector_index) {
            let mut bytes = [0u8; SECTOR_SIZE];
            bytes.copy_from_slice(&self.sector_buffer[..SECTOR_SIZE]);
            pool.set_bytes(patch_idx, &bytes);
        }
        // If allocation failed, the write is lost — the pool already logged
        // the exhaustion event once (§4.1).

        self.sector_dirty = false;
        self.have_sector_data = false;
        self.sector_pointer = 0;
    }
}

impl Default for DiskDrive {
    fn default() -> Self {
        Self::new()
    }
}
