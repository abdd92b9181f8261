//! MITS 88-DCDD floppy disk controller core for an Altair 8800 emulator.
//!
//! [`DiskController`] is the entry point: four drives sharing one
//! [`patch_pool::PatchPool`], reachable from a real 8080 core through
//! [`PortBus`]. [`boot_rom`] supplies the fixed boot program the canonical
//! boot protocol expects to find in RAM.

mod boot_rom;
mod controller;
mod drive;
mod error;
mod patch_pool;
mod port_bus;
mod status;

pub use altair8800_disk_image::{ImageError, ImageSource};

pub use boot_rom::{bytes as boot_rom_bytes, place as place_boot_rom, BOOT_ROM_LEN, CANONICAL_LOAD_ADDRESS};
pub use controller::{DiskController, NUM_DRIVES};
pub use drive::DiskDrive;
pub use error::LoadError;
pub use patch_pool::{PatchPool, DEFAULT_POOL_CAPACITY};
pub use port_bus::{ControllerPortBus, OpenBusFallback, PortBus, PortFallback};
pub use status::{control as control_bits, STATUS_DEFAULT};
