pub use embassy_rp::{bind_interrupts, block, gpio, init, pac, peripherals, usb};

use embassy_rp::gpio::{AnyPin, Flex, Level, Pin};
use qiyana_firmware::{
    matrix::MatrixTopology,
    pins::{Direction, Pull, RawPins},
    warn,
};

/// Busy wait after driving a column, about 2µs at 150MHz.
const SETTLE_CYCLES: u32 = 300;

/// Matrix GPIOs of an RP235x, each kept as a [`Flex`] so it can be reconfigured at init.
pub struct RpMatrixPins<const R: usize, const C: usize> {
    rows: [(u8, Flex<'static>); R],
    columns: [(u8, Flex<'static>); C],
}

impl<const R: usize, const C: usize> RpMatrixPins<R, C> {
    pub fn new(rows: [AnyPin; R], columns: [AnyPin; C]) -> Self {
        Self {
            rows: rows.map(|pin| (pin.pin(), Flex::new(pin))),
            columns: columns.map(|pin| (pin.pin(), Flex::new(pin))),
        }
    }

    /// The GPIO numbers in the order the pins were given.
    pub fn topology(&self) -> MatrixTopology<R, C> {
        MatrixTopology::new(
            self.rows.each_ref().map(|(gpio, _)| *gpio),
            self.columns.each_ref().map(|(gpio, _)| *gpio),
        )
    }

    fn flex(&mut self, pin: u8) -> Option<&mut Flex<'static>> {
        self.rows
            .iter_mut()
            .chain(self.columns.iter_mut())
            .find(|(gpio, _)| *gpio == pin)
            .map(|(_, flex)| flex)
    }
}

impl<const R: usize, const C: usize> RawPins for RpMatrixPins<R, C> {
    fn configure(&mut self, pin: u8, direction: Direction, pull: Pull) {
        let Some(flex) = self.flex(pin) else {
            warn!("GPIO {} is not a matrix pin", pin);
            return;
        };
        flex.set_pull(match pull {
            Pull::None => gpio::Pull::None,
            Pull::Up => gpio::Pull::Up,
            Pull::Down => gpio::Pull::Down,
        });
        match direction {
            Direction::Input => flex.set_as_input(),
            Direction::Output => {
                flex.set_low();
                flex.set_as_output();
            }
        }
    }

    fn write(&mut self, pin: u8, high: bool) {
        if let Some(flex) = self.flex(pin) {
            flex.set_level(Level::from(high));
        }
    }

    fn read(&mut self, pin: u8) -> bool {
        self.flex(pin).is_some_and(|flex| flex.is_high())
    }

    fn set_input_enabled(&mut self, pin: u8, enabled: bool) {
        pac::PADS_BANK0
            .gpio(usize::from(pin))
            .modify(|w| w.set_ie(enabled));
    }

    fn settle(&mut self) {
        cortex_m::asm::delay(SETTLE_CYCLES);
    }
}

/// Build the keyboard's tasks and run them.
///
/// The matrix pins are read with [`ReArmedRead`](qiyana_firmware::pins::ReArmedRead) so the
/// RP2350 pull-down latch never shows up as a held key.
///
/// # Example `main.rs`
///
/// ```rust
/// #![no_std]
/// #![no_main]
///
/// use qiyana_builder::{config::UsbIdentity, matrix::KeyMap, KeyCode};
///
/// const KEY_MAP: KeyMap<1, 2> = KeyMap::from_rows([[KeyCode::A, KeyCode::B]]);
///
/// qiyana_builder::rp_run_keyboard! {
///     identity: UsbIdentity::new(0x6e0f, 0x0003),
///     rows: [PIN_17],
///     columns: [PIN_0, PIN_1],
///     led: PIN_25,
///     key_map: KEY_MAP,
/// }
/// ```
#[macro_export]
macro_rules! rp_run_keyboard {
    (
        identity: $identity:expr,
        rows: [$($row:ident),+ $(,)?],
        columns: [$($col:ident),+ $(,)?],
        led: $led:ident,
        key_map: $key_map:expr $(,)?
    ) => {
        use $crate::rp::gpio::{AnyPin, Level, Output};
        use $crate::rp::peripherals::USB;
        use $crate::rp::usb::{Driver, InterruptHandler};
        use $crate::rp::{bind_interrupts, RpMatrixPins};
        use $crate::usb::{ConfigBuilder, Configurator, KeyboardHidReader, KeyboardHidWriter,
            State as UsbState, UsbBuffers};
        use $crate::usb_link::{OutputReportHandler, UsbLink, UsbLinkHandler};
        use $crate::{clock::EmbassyClock, config::{Timing, QUEUE_MAX}, control::ControlLoop,
            exec, pins::{GuardedPins, ReArmedRead}};
        use $crate::{NoopRawMutex, StaticCell};

        #[link_section = ".start_block"]
        #[used]
        pub static IMAGE_DEF: $crate::rp::block::ImageDef = $crate::rp::block::ImageDef::secure_exe();

        const ROW_COUNT: usize = [$(stringify!($row)),+].len();
        const COL_COUNT: usize = [$(stringify!($col)),+].len();

        type UsbDriver = Driver<'static, USB>;
        type Link = UsbLink<NoopRawMutex>;
        type Pins = GuardedPins<RpMatrixPins<ROW_COUNT, COL_COUNT>, ReArmedRead>;

        static LINK: StaticCell<Link> = StaticCell::new();
        static USB_BUFFERS: StaticCell<UsbBuffers> = StaticCell::new();
        static USB_CONFIG: StaticCell<Configurator> = StaticCell::new();
        static HID_STATE: StaticCell<UsbState> = StaticCell::new();
        static REQUEST_HANDLER: StaticCell<OutputReportHandler<'static, NoopRawMutex>> = StaticCell::new();
        static DEVICE_HANDLER: StaticCell<UsbLinkHandler<'static, NoopRawMutex>> = StaticCell::new();

        bind_interrupts!(struct Irqs {
            USBCTRL_IRQ => InterruptHandler<USB>;
        });

        #[embassy_executor::task]
        async fn control_loop(mut pins: Pins, mut led: Output<'static>, link: &'static Link) {
            let mut control = ControlLoop::<ROW_COUNT, COL_COUNT, QUEUE_MAX>::new(
                pins.inner().topology(),
                $key_map,
                Timing::default(),
            );
            exec::control_loop_run(&mut control, &mut pins, &mut led, &EmbassyClock, link).await
        }

        #[embassy_executor::task]
        async fn report_writer(mut writer: KeyboardHidWriter<'static, UsbDriver>, link: &'static Link) {
            exec::report_writer_run(&mut writer, link).await
        }

        #[embassy_executor::task]
        async fn output_reports(reader: KeyboardHidReader<'static, UsbDriver>, link: &'static Link) {
            exec::output_report_run(reader, &mut link.output_handler()).await
        }

        #[embassy_executor::main]
        async fn main(spawner: embassy_executor::Spawner) -> ! {
            let p = $crate::rp::init(Default::default());

            let pins = GuardedPins::new(
                RpMatrixPins::new([$(AnyPin::from(p.$row)),+], [$(AnyPin::from(p.$col)),+]),
                ReArmedRead,
            );
            let led = Output::new(AnyPin::from(p.$led), Level::Low);

            let link: &'static Link = LINK.init(Link::new());
            let config_builder = ConfigBuilder::new($identity);

            let driver = Driver::new(p.USB, Irqs);
            let usb_buffers: &'static mut UsbBuffers = USB_BUFFERS.init(UsbBuffers::default());
            let usb_config: &'static mut Configurator = USB_CONFIG.init(config_builder.usb_configurator());
            let usb_builder = usb_config.usb_builder(driver, usb_buffers).unwrap();

            let (writer, reader, usb_builder) = config_builder.keyboard_iface(
                usb_config,
                HID_STATE.init(UsbState::new()),
                REQUEST_HANDLER.init(link.output_handler()),
                DEVICE_HANDLER.init(link.device_handler()),
                usb_builder,
            );

            let mut usb = usb_builder.build();

            spawner.spawn(control_loop(pins, led, link)).unwrap();
            spawner.spawn(report_writer(writer, link)).unwrap();
            spawner.spawn(output_reports(reader, link)).unwrap();

            exec::usb_run(&mut usb, link).await
        }
    };
}
