extern crate std;

use embassy_futures::block_on;
use qiyana_firmware::{
    config::UsbIdentity,
    report::ReportType,
    usb_link::UsbLink,
    usb_test_stub::MyDriver,
};
use super::*;
use crate::NoopRawMutex;

const IDENTITY: UsbIdentity = UsbIdentity {
    manufacturer: "Qiyana",
    product: "Qiyana 6x17",
    serial_number: "qiyana:0042",
    max_power: 150,
    ..UsbIdentity::new(0x6e0f, 0x0003)
};

#[test]
fn configurator_carries_identity() {
    let builder = ConfigBuilder::new(IDENTITY);
    let mut usb_config = builder.usb_configurator();

    let mut buffers = UsbBuffers::default();
    assert!(usb_config.usb_builder(MyDriver, &mut buffers).is_some());
    let mut buffers = UsbBuffers::default();
    assert!(usb_config.usb_builder(MyDriver, &mut buffers).is_none());
}

#[test]
fn keyboard_iface_writes_reports() {
    let link = UsbLink::<NoopRawMutex>::new();
    let mut request_handler = link.output_handler();
    let mut device_handler = link.device_handler();
    let mut state = State::new();
    let mut buffers = UsbBuffers::default();

    let builder = ConfigBuilder::new(IDENTITY);
    let mut usb_config = builder.usb_configurator();
    let usb_builder = usb_config.usb_builder(MyDriver, &mut buffers).unwrap();
    let (mut writer, _reader, usb_builder) = builder.keyboard_iface(
        &usb_config,
        &mut state,
        &mut request_handler,
        &mut device_handler,
        usb_builder,
    );
    let _usb = usb_builder.build();

    block_on(async {
        writer
            .write_report(ReportType::Keyboard.report_id(), &[0, 0, 4, 0, 0, 0, 0, 0])
            .await
            .unwrap();
    });
}
