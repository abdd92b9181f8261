//! The port bus adapter (§4.6): the seam the 8080 core actually calls
//! through. Dispatches 0x08/0x09/0x0A to the [`DiskController`]; every other
//! port is delegated to a fallback, so this adapter is testable in
//! isolation from a real CPU core and the rest of the machine's peripherals.

use crate::controller::DiskController;

/// Disk-controller port addresses on the Altair 8800 bus.
const PORT_STATUS: u8 = 0x08;
const PORT_FUNCTION: u8 = 0x09;
const PORT_DATA: u8 = 0x0A;

/// What a real 8080 core expects from anything wired onto its I/O bus.
pub trait PortBus {
    /// `IN port` — read a byte off the bus.
    fn port_in(&mut self, port: u8) -> u8;
    /// `OUT port, data` — write a byte onto the bus.
    fn port_out(&mut self, port: u8, data: u8);
}

/// Everything the disk controller doesn't own. The surrounding emulator
/// supplies a real implementation (front panel switches, serial console,
/// …); tests can use [`OpenBusFallback`].
pub trait PortFallback {
    fn port_in(&mut self, port: u8) -> u8;
    fn port_out(&mut self, port: u8, data: u8);
}

/// A fallback that behaves like an unpopulated bus: reads return 0xFF
/// (the conventional "open bus" value), writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenBusFallback;

impl PortFallback for OpenBusFallback {
    fn port_in(&mut self, _port: u8) -> u8 {
        0xFF
    }

    fn port_out(&mut self, _port: u8, _data: u8) {}
}

/// Wires a [`DiskController`] onto the CPU's port bus, delegating every
/// port outside 0x08..=0x0A to a fallback.
pub struct ControllerPortBus<F: PortFallback> {
    controller: DiskController,
    fallback: F,
}

impl<F: PortFallback> ControllerPortBus<F> {
    pub fn new(controller: DiskController, fallback: F) -> Self {
        Self { controller, fallback }
    }

    pub fn controller(&self) -> &DiskController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut DiskController {
        &mut self.controller
    }

    pub fn into_controller(self) -> DiskController {
        self.controller
    }
}

impl<F: PortFallback> PortBus for ControllerPortBus<F> {
    fn port_in(&mut self, port: u8) -> u8 {
        match port {
            PORT_STATUS => self.controller.status(),
            PORT_FUNCTION => self.controller.sector(),
            PORT_DATA => self.controller.read(),
            other => self.fallback.port_in(other),
        }
    }

    fn port_out(&mut self, port: u8, data: u8) {
        match port {
            PORT_STATUS => self.controller.select(data),
            PORT_FUNCTION => self.controller.function(data),
            PORT_DATA => self.controller.write(data),
            other => self.fallback.port_out(other, data),
        }
    }
}
