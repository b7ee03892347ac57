use embassy_usb::{class::hid::RequestHandler, driver::Driver, Builder, Handler};
pub use qiyana_firmware::usb::{
    Configurator, KeyboardHidReader, KeyboardHidWriter, State, UsbBuffers, KEYBOARD_REPORT_DESC,
};
use qiyana_firmware::config::UsbIdentity;

pub struct ConfigBuilder {
    pub identity: UsbIdentity,
}

impl ConfigBuilder {
    pub const fn new(identity: UsbIdentity) -> Self {
        Self { identity }
    }

    pub fn usb_configurator<'d>(&self) -> Configurator<'d> {
        Configurator::new(self.identity.usb_config())
    }

    /// Add the keyboard interface and register `device_handler` for bus level callbacks.
    pub fn keyboard_iface<'d, D: Driver<'d>>(
        &self,
        usb_config: &Configurator<'d>,
        keyboard_state: &'d mut State<'d>,
        request_handler: &'d mut dyn RequestHandler,
        device_handler: &'d mut dyn Handler,
        mut usb_builder: Builder<'d, D>,
    ) -> (
        KeyboardHidWriter<'d, D>,
        KeyboardHidReader<'d, D>,
        Builder<'d, D>,
    ) {
        let (writer, reader) =
            usb_config.keyboard_iface(&mut usb_builder, keyboard_state, request_handler);
        usb_builder.handler(device_handler);
        (writer, reader, usb_builder)
    }
}

#[cfg(test)]
#[path = "usb_test.rs"]
mod test;
