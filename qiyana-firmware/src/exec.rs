//! Task bodies. A board crate spawns each of these as an embassy task.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Ticker};
use embassy_usb::{class::hid::RequestHandler, driver::Driver, UsbDevice};
use embedded_hal::digital::OutputPin;

use crate::{
    clock::Clock,
    config::CONTROL_LOOP_PERIOD_MS,
    control::ControlLoop,
    info,
    pins::MatrixPins,
    usb::{KeyboardHidReader, KeyboardHidWriter},
    usb_link::UsbLink,
    warn,
};

/// Run the USB device. While the bus is suspended a wakeup request from the scheduler is turned
/// into a remote wakeup signal.
pub async fn usb_run<'d, D: Driver<'d>, M: RawMutex>(
    usb: &mut UsbDevice<'d, D>,
    link: &UsbLink<M>,
) -> ! {
    loop {
        usb.run_until_suspend().await;
        link.reset_wakeup();
        if let Either::Second(()) = select(usb.wait_resume(), link.wait_wakeup()).await {
            info!("remote wakeup");
            if let Err(err) = usb.remote_wakeup().await {
                warn!("remote wakeup failed: {:?}", err);
            }
        }
    }
}

/// Write each queued report to the interrupt IN endpoint and post its completion.
pub async fn report_writer_run<'d, D: Driver<'d>, M: RawMutex>(
    writer: &mut KeyboardHidWriter<'d, D>,
    link: &UsbLink<M>,
) -> ! {
    loop {
        let report = link.next_report().await;
        match writer
            .write_report(report.report_type.report_id(), report.payload.as_slice())
            .await
        {
            Ok(()) => link.complete(report.report_type),
            Err(err) => warn!("Failed to send report: {:?}", err),
        }
    }
}

pub async fn output_report_run<'d, D: Driver<'d>, H: RequestHandler>(
    reader: KeyboardHidReader<'d, D>,
    handler: &mut H,
) -> ! {
    reader.run(handler).await
}

/// The control loop. Link events and completions are applied before each scan so a tick always
/// sees the latest link state.
pub async fn control_loop_run<
    const R: usize,
    const C: usize,
    const Q: usize,
    P: MatrixPins,
    L: OutputPin,
    K: Clock,
    M: RawMutex,
>(
    control: &mut ControlLoop<R, C, Q>,
    pins: &mut P,
    led: &mut L,
    clock: &K,
    link: &UsbLink<M>,
) -> ! {
    control.init(pins, led);
    let mut ticker = Ticker::every(Duration::from_millis(CONTROL_LOOP_PERIOD_MS));
    let mut transport = link.transport();
    loop {
        while let Some(event) = link.try_event() {
            control.on_link_event(&event, &transport, led);
        }
        while let Some(report_type) = link.try_completion() {
            control.on_send_complete(report_type, &mut transport);
        }
        control.tick(clock.now_ms(), pins, &mut transport, led);
        ticker.next().await;
    }
}

#[cfg(test)]
#[path = "exec_test.rs"]
mod test;
