extern crate std;

use core::{cell::Cell, task::Waker};
use embassy_time_driver::Driver;
use std::time::SystemTime;

/// Time driver for host tests. Each test thread has its own clock, which follows the system
/// clock until [`set_time`] pins it and then only moves when a timer is awaited.
struct TestTimeDriver;

impl Driver for TestTimeDriver {
    fn now(&self) -> u64 {
        NOW.with(|now| match now.get() {
            0 => SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_micros() as u64)
                .unwrap_or(1),
            t => t,
        })
    }

    fn schedule_wake(&self, at: u64, waker: &Waker) {
        NOW.with(|now| {
            if now.get() != 0 && at > now.get() {
                now.set(at);
            }
        });
        waker.wake_by_ref();
    }
}

std::thread_local! {
    static NOW: Cell<u64> = const { Cell::new(0) };
}

embassy_time_driver::time_driver_impl!(static TIME_DRIVER: TestTimeDriver = TestTimeDriver);

/// Pin the current thread's clock to `t` microseconds.
pub fn set_time(t: u64) {
    NOW.with(|now| now.set(t));
}

pub fn advance_ms(ms: u64) {
    NOW.with(|now| now.set(now.get() + ms * 1000));
}
