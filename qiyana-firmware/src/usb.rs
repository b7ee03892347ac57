use core::mem::MaybeUninit;
use embassy_usb::{
    class::hid::{ReportId, RequestHandler},
    control::{InResponse, OutResponse, Recipient, Request, RequestType},
    driver::Driver,
    types::InterfaceNumber,
    Builder, Config, Handler,
};

use crate::{
    config::USB_POLL_MS,
    hid::{HidReader, HidWriter},
    report::MAX_PAYLOAD_LEN,
};

// HID
const HID_DESC_DESCTYPE_HID: u8 = 0x21;
const HID_DESC_DESCTYPE_HID_REPORT: u8 = 0x22;
const HID_DESC_SPEC_1_11: [u8; 2] = [0x11, 0x01];
const HID_DESC_COUNTRY_UNSPEC: u8 = 0x00;

const HID_REQ_SET_IDLE: u8 = 0x0a;
const HID_REQ_SET_REPORT: u8 = 0x09;
const HID_REQ_GET_PROTOCOL: u8 = 0x03;
const HID_REQ_SET_PROTOCOL: u8 = 0x0b;

/// Largest input report: id byte plus the keyboard payload.
pub const KEYBOARD_WRITE_N: usize = 1 + MAX_PAYLOAD_LEN;
/// Largest output report: id byte plus the LED byte.
pub const KEYBOARD_READ_N: usize = 2;

pub type KeyboardHidWriter<'d, D> = HidWriter<'d, D, KEYBOARD_WRITE_N>;
pub type KeyboardHidReader<'d, D> = HidReader<'d, D, KEYBOARD_READ_N>;

#[rustfmt::skip]
pub const KEYBOARD_REPORT_DESC: [u8; 67 + 25] = [
    // KEYBOARD_DESC [u8; 67]
    0x05, 0x01, // (GLOBAL) USAGE_PAGE         0x0001 Generic Desktop Page
    0x09, 0x06, // (LOCAL)  USAGE              0x00010006 Keyboard (Application Collection)
    0xA1, 0x01, // (MAIN)   COLLECTION         0x01 Application
    0x85, 0x01, //   (GLOBAL) REPORT_ID          0x01 (1)
    0x05, 0x07, //   (GLOBAL) USAGE_PAGE         0x0007 Keyboard/Keypad Page
    0x19, 0xE0, //   (LOCAL)  USAGE_MINIMUM      0x000700E0 Keyboard LeftControl
    0x29, 0xE7, //   (LOCAL)  USAGE_MAXIMUM      0x000700E7 Keyboard Right GUI
    0x15, 0x00, //   (GLOBAL) LOGICAL_MINIMUM    0x00 (0)
    0x25, 0x01, //   (GLOBAL) LOGICAL_MAXIMUM    0x01 (1)
    0x95, 0x08, //   (GLOBAL) REPORT_COUNT       0x08 (8) Number of fields
    0x75, 0x01, //   (GLOBAL) REPORT_SIZE        0x01 (1) Number of bits per field
    0x81, 0x02, //   (MAIN)   INPUT              0x00000002 (8 fields x 1 bit) Data Variable
    0x95, 0x01, //   (GLOBAL) REPORT_COUNT       0x01 (1) Number of fields
    0x75, 0x08, //   (GLOBAL) REPORT_SIZE        0x08 (8) Number of bits per field
    0x81, 0x01, //   (MAIN)   INPUT              0x00000001 (1 field x 8 bits) Constant
    0x05, 0x08, //   (GLOBAL) USAGE_PAGE         0x0008 LED Page
    0x19, 0x01, //   (LOCAL)  USAGE_MINIMUM      0x00080001 Num Lock
    0x29, 0x05, //   (LOCAL)  USAGE_MAXIMUM      0x00080005 Kana
    0x95, 0x05, //   (GLOBAL) REPORT_COUNT       0x05 (5) Number of fields
    0x75, 0x01, //   (GLOBAL) REPORT_SIZE        0x01 (1) Number of bits per field
    0x91, 0x02, //   (MAIN)   OUTPUT             0x00000002 (5 fields x 1 bit) Data Variable
    0x95, 0x01, //   (GLOBAL) REPORT_COUNT       0x01 (1) Number of fields
    0x75, 0x03, //   (GLOBAL) REPORT_SIZE        0x03 (3) Number of bits per field
    0x91, 0x01, //   (MAIN)   OUTPUT             0x00000001 (1 field x 3 bits) Constant
    0x05, 0x07, //   (GLOBAL) USAGE_PAGE         0x0007 Keyboard/Keypad Page
    0x19, 0x00, //   (LOCAL)  USAGE_MINIMUM      0x00070000 Keyboard No event indicated
    0x2A, 0xFF,0,//  (LOCAL)  USAGE_MAXIMUM      0x000700FF
    0x15, 0x00, //   (GLOBAL) LOGICAL_MINIMUM    0x00 (0)
    0x26, 0xFF,0,//  (GLOBAL) LOGICAL_MAXIMUM    0x00FF (255)
    0x95, 0x06, //   (GLOBAL) REPORT_COUNT       0x06 (6) Number of fields
    0x75, 0x08, //   (GLOBAL) REPORT_SIZE        0x08 (8) Number of bits per field
    0x81, 0x00, //   (MAIN)   INPUT              0x00000000 (6 fields x 8 bits) Data Array
    0xC0,       // (MAIN)   END_COLLECTION     Application

    // CONSUMER_CTL_DESC: [u8; 25]
    0x05, 0x0C, // (GLOBAL) USAGE_PAGE         0x000C Consumer Page
    0x09, 0x01, // (LOCAL)  USAGE              0x000C0001 Consumer Control (Application Collection)
    0xA1, 0x01, // (MAIN)   COLLECTION         0x01 Application
    0x85, 0x03, //   (GLOBAL) REPORT_ID          0x03 (3)
    0x19, 0x01, //   (LOCAL)  USAGE_MINIMUM      0x000C0001 Consumer Control
    0x2A, 0xA0,2,//  (LOCAL)  USAGE_MAXIMUM      0x000C02A0 AC Soft Key Left
    0x15, 0x01, //   (GLOBAL) LOGICAL_MINIMUM    0x01 (1)
    0x26, 0xA0,2,//  (GLOBAL) LOGICAL_MAXIMUM    0x02A0 (672)
    0x95, 0x01, //   (GLOBAL) REPORT_COUNT       0x01 (1) Number of fields
    0x75, 0x10, //   (GLOBAL) REPORT_SIZE        0x10 (16) Number of bits per field
    0x81, 0x00, //   (MAIN)   INPUT              0x00000000 (1 field x 16 bits) Data Array
    0xC0,       // (MAIN)   END_COLLECTION     Application
];

/// Internal state for USB HID.
pub struct State<'d> {
    control: MaybeUninit<Control<'d>>,
}
impl Default for State<'_> {
    fn default() -> Self {
        Self::new()
    }
}
impl State<'_> {
    pub const fn new() -> Self {
        State {
            control: MaybeUninit::uninit(),
        }
    }
}

const CONFIG_SIZE: usize = 128;
const BOS_SIZE: usize = 32;
const MSOS_SIZE: usize = 0;
const CONTROL_SIZE: usize = 64;

pub struct UsbBuffers {
    config_descriptor_buf: [u8; CONFIG_SIZE],
    bos_descriptor_buf: [u8; BOS_SIZE],
    msos_descriptor_buf: [u8; MSOS_SIZE],
    control_buf: [u8; CONTROL_SIZE],
}

impl Default for UsbBuffers {
    fn default() -> Self {
        Self {
            config_descriptor_buf: [0; CONFIG_SIZE],
            bos_descriptor_buf: [0; BOS_SIZE],
            msos_descriptor_buf: [0; MSOS_SIZE],
            control_buf: [0; CONTROL_SIZE],
        }
    }
}

pub struct Configurator<'d> {
    device_config: Option<Config<'d>>,
    max_packet_size: u16,
    poll_ms: u8,
}

impl<'d> Configurator<'d> {
    pub fn new(device_config: Config<'d>) -> Self {
        Self {
            max_packet_size: device_config.max_packet_size_0 as u16,
            device_config: Some(device_config),
            poll_ms: USB_POLL_MS,
        }
    }

    /// Returns `None` once the builder has been taken.
    pub fn usb_builder<D: Driver<'d>>(
        &mut self,
        driver: D,
        buffers: &'d mut UsbBuffers,
    ) -> Option<Builder<'d, D>> {
        self.device_config.take().map(|device_config| {
            Builder::new(
                driver,
                device_config,
                &mut buffers.config_descriptor_buf,
                &mut buffers.bos_descriptor_buf,
                &mut buffers.msos_descriptor_buf,
                &mut buffers.control_buf,
            )
        })
    }

    /// Add the keyboard + consumer control HID interface. Output reports arriving over the control
    /// pipe go to `request_handler`; the returned reader delivers the interrupt OUT ones.
    pub fn keyboard_iface<D: Driver<'d>>(
        &self,
        builder: &mut Builder<'d, D>,
        state: &'d mut State<'d>,
        request_handler: &'d mut dyn RequestHandler,
    ) -> (KeyboardHidWriter<'d, D>, KeyboardHidReader<'d, D>) {
        let mut func = builder.function(3, 0, 0);
        let mut iface = func.interface();
        let if_num = iface.interface_number();
        let mut alt = iface.alt_setting(3, 0, 0, None);

        let descriptor = &KEYBOARD_REPORT_DESC;
        let len = descriptor.len();
        alt.descriptor(
            HID_DESC_DESCTYPE_HID,
            &[
                HID_DESC_SPEC_1_11[0],
                HID_DESC_SPEC_1_11[1],
                HID_DESC_COUNTRY_UNSPEC,
                1,                            // Number of following descriptors
                HID_DESC_DESCTYPE_HID_REPORT, // We have a HID report descriptor the host should read
                (len & 0xFF) as u8,           // HID report descriptor size,
                ((len >> 8) & 0xFF) as u8,
            ],
        );

        let ep_in = alt.endpoint_interrupt_in(self.max_packet_size, self.poll_ms);
        let ep_out = alt.endpoint_interrupt_out(self.max_packet_size, self.poll_ms);

        drop(func);

        let control = state
            .control
            .write(Control::new(if_num, descriptor, request_handler));
        builder.handler(control);
        (HidWriter::new(ep_in), HidReader::new(ep_out))
    }
}

struct Control<'d> {
    if_num: InterfaceNumber,
    report_descriptor: &'d [u8],
    request_handler: &'d mut dyn RequestHandler,
    hid_descriptor: [u8; 9],
}
impl<'d> Control<'d> {
    fn new(
        if_num: InterfaceNumber,
        report_descriptor: &'d [u8],
        request_handler: &'d mut dyn RequestHandler,
    ) -> Self {
        Control {
            if_num,
            report_descriptor,
            request_handler,
            hid_descriptor: [
                9,                                           // Length of buf inclusive of size prefix
                HID_DESC_DESCTYPE_HID,                       // Descriptor type
                HID_DESC_SPEC_1_11[0],                       // HID Class spec version
                HID_DESC_SPEC_1_11[1],                       //
                HID_DESC_COUNTRY_UNSPEC,                     // Country code not supported
                1,                                           // Number of following descriptors
                HID_DESC_DESCTYPE_HID_REPORT, // We have a HID report descriptor the host should read
                (report_descriptor.len() & 0xFF) as u8, // HID report descriptor size,
                ((report_descriptor.len() >> 8) & 0xFF) as u8, //
            ],
        }
    }
}
impl Handler for Control<'_> {
    fn control_out(&mut self, req: Request, data: &[u8]) -> Option<OutResponse> {
        if (req.request_type, req.recipient, req.index)
            != (
                RequestType::Class,
                Recipient::Interface,
                self.if_num.0 as u16,
            )
        {
            return None;
        }

        match req.request {
            HID_REQ_SET_IDLE => {
                let id = req.value as u8;
                let id = (id != 0).then_some(ReportId::In(id));
                let dur = u32::from(req.value >> 8);
                let dur = if dur == 0 { u32::MAX } else { 4 * dur };
                self.request_handler.set_idle_ms(id, dur);
                Some(OutResponse::Accepted)
            }
            HID_REQ_SET_REPORT => match report_id_try_from(req.value) {
                Ok(id) => Some(self.request_handler.set_report(id, strip_report_id(id, data))),
                Err(()) => Some(OutResponse::Rejected),
            },
            HID_REQ_SET_PROTOCOL if req.value == 1 => Some(OutResponse::Accepted),
            HID_REQ_SET_PROTOCOL => {
                crate::warn!("boot protocol requested; only report protocol is served");
                Some(OutResponse::Rejected)
            }
            _ => Some(OutResponse::Rejected),
        }
    }

    fn control_in<'a>(&'a mut self, req: Request, buf: &'a mut [u8]) -> Option<InResponse<'a>> {
        if req.index != self.if_num.0 as u16 {
            return None;
        }

        match (req.request_type, req.recipient) {
            (RequestType::Standard, Recipient::Interface) => match req.request {
                Request::GET_DESCRIPTOR => match (req.value >> 8) as u8 {
                    HID_DESC_DESCTYPE_HID_REPORT => {
                        Some(InResponse::Accepted(self.report_descriptor))
                    }
                    HID_DESC_DESCTYPE_HID => Some(InResponse::Accepted(&self.hid_descriptor)),
                    _ => Some(InResponse::Rejected),
                },

                _ => Some(InResponse::Rejected),
            },
            // input reports only travel over the interrupt endpoint
            (RequestType::Class, Recipient::Interface) => match req.request {
                HID_REQ_GET_PROTOCOL => {
                    buf[0] = 1;
                    Some(InResponse::Accepted(&buf[0..1]))
                }
                _ => Some(InResponse::Rejected),
            },
            _ => None,
        }
    }
}

/// With report ids in use the host repeats the id as the first data byte.
fn strip_report_id(id: ReportId, data: &[u8]) -> &[u8] {
    let id = match id {
        ReportId::In(id) | ReportId::Out(id) | ReportId::Feature(id) => id,
    };
    match data.split_first() {
        Some((&first, rest)) if id != 0 && first == id => rest,
        _ => data,
    }
}

const fn report_id_try_from(value: u16) -> Result<ReportId, ()> {
    match value >> 8 {
        1 => Ok(ReportId::In(value as u8)),
        2 => Ok(ReportId::Out(value as u8)),
        3 => Ok(ReportId::Feature(value as u8)),
        _ => Err(()),
    }
}

#[cfg(test)]
#[path = "usb_test.rs"]
mod test;
