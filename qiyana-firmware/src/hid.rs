use embassy_usb::{
    class::hid::{ReportId, RequestHandler},
    driver::{Driver, Endpoint, EndpointError, EndpointIn, EndpointOut},
};

use crate::warn;

pub struct HidWriter<'d, D: Driver<'d>, const N: usize> {
    ep_in: D::EndpointIn,
}

impl<'d, D: Driver<'d>, const N: usize> HidWriter<'d, D, N> {
    pub fn new(ep_in: <D>::EndpointIn) -> Self {
        Self { ep_in }
    }

    /// Writes `report_id` followed by `payload` to the interrupt endpoint.
    pub async fn write_report(
        &mut self,
        report_id: u8,
        payload: &[u8],
    ) -> Result<(), EndpointError> {
        let len = payload.len() + 1;
        if len > N {
            return Err(EndpointError::BufferOverflow);
        }
        let mut report = [0; N];
        report[0] = report_id;
        report[1..len].copy_from_slice(payload);

        let max_packet_size = usize::from(self.ep_in.info().max_packet_size);
        for chunk in report[..len].chunks(max_packet_size) {
            self.ep_in.write(chunk).await?;
        }
        Ok(())
    }
}

pub struct HidReader<'d, D: Driver<'d>, const N: usize> {
    ep_out: D::EndpointOut,
}

impl<'d, D: Driver<'d>, const N: usize> HidReader<'d, D, N> {
    pub fn new(ep_out: <D>::EndpointOut) -> Self {
        Self { ep_out }
    }

    /// Delivers output reports from the interrupt OUT pipe to `handler`. The first byte of each
    /// report is its id and is stripped from the data handed on.
    pub async fn run<T: RequestHandler>(mut self, handler: &mut T) -> ! {
        let mut buf = [0; N];
        loop {
            match self.read(&mut buf).await {
                // zero length packet
                Ok(0) => {}
                Ok(len) => {
                    handler.set_report(ReportId::Out(buf[0]), &buf[1..len]);
                }
                Err(EndpointError::BufferOverflow) => {
                    warn!("output report longer than {} bytes; dropped", N);
                }
                Err(EndpointError::Disabled) => self.ep_out.wait_enabled().await,
            }
        }
    }

    /// Reads one output report, packet by packet, until a short packet or `N` bytes.
    async fn read(&mut self, buf: &mut [u8; N]) -> Result<usize, EndpointError> {
        let max_packet_size = usize::from(self.ep_out.info().max_packet_size);
        let mut total = 0;
        for chunk in buf.chunks_mut(max_packet_size) {
            let size = self.ep_out.read(chunk).await?;
            total += size;
            if size < max_packet_size {
                break;
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
#[path = "hid_test.rs"]
mod test;
