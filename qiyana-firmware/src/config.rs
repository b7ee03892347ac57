use crate::link::LinkState;

/// Minimum time between two primary report sends.
pub const REPORT_PERIOD_MS: u64 = 10;

pub const BLINK_NOT_MOUNTED_MS: u32 = 250;
pub const BLINK_MOUNTED_MS: u32 = 1000;
pub const BLINK_SUSPENDED_MS: u32 = 2500;

/// Key queue capacity used by the firmware tasks.
pub const QUEUE_MAX: usize = 16;

pub const CONTROL_LOOP_PERIOD_MS: u64 = 1;

/// Report descriptor interrupt IN poll interval.
pub const USB_POLL_MS: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    pub report_period_ms: u64,
    pub blink_not_mounted_ms: u32,
    pub blink_mounted_ms: u32,
    pub blink_suspended_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self::new()
    }
}

impl Timing {
    pub const fn new() -> Self {
        Self {
            report_period_ms: REPORT_PERIOD_MS,
            blink_not_mounted_ms: BLINK_NOT_MOUNTED_MS,
            blink_mounted_ms: BLINK_MOUNTED_MS,
            blink_suspended_ms: BLINK_SUSPENDED_MS,
        }
    }

    pub const fn blink_interval(&self, state: LinkState) -> u32 {
        match state {
            LinkState::NotMounted => self.blink_not_mounted_ms,
            LinkState::Mounted => self.blink_mounted_ms,
            LinkState::Suspended => self.blink_suspended_ms,
        }
    }
}

/// How the device presents itself to the host.
#[derive(Debug, Clone, Copy)]
pub struct UsbIdentity {
    pub vendor_id: u16,
    pub product_id: u16,
    pub manufacturer: &'static str,
    pub product: &'static str,
    pub serial_number: &'static str,
    pub max_power: u16,
    pub supports_remote_wakeup: bool,
}

impl UsbIdentity {
    pub const fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
            manufacturer: "Qiyana",
            product: "Qiyana keyboard",
            serial_number: "qiyana:0001",
            max_power: 100,
            supports_remote_wakeup: true,
        }
    }

    pub fn usb_config(&self) -> embassy_usb::Config<'static> {
        let mut config = embassy_usb::Config::new(self.vendor_id, self.product_id);
        config.manufacturer = Some(self.manufacturer);
        config.product = Some(self.product);
        config.serial_number = Some(self.serial_number);
        config.max_power = self.max_power;
        config.supports_remote_wakeup = self.supports_remote_wakeup;
        config.max_packet_size_0 = 64;
        config
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod test;
