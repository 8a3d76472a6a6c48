//! Blocking delays.
//!
//! The HD44780 has no handshake in write-only wiring, so every instruction is followed by a wait
//! long enough for the controller to finish it. These waits must be real elapsed time.
use std::fmt::Debug;
use std::thread::sleep;
use std::time::Duration;

pub trait Delay: Debug {
    /// Blocks the calling thread for at least `us` microseconds.
    fn delay_us(&mut self, us: u32);

    /// Blocks the calling thread for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }
}

/// [Delay] backed by [std::thread::sleep].
///
/// The OS may oversleep, never undersleep, which is all the controller needs.
#[derive(Debug, Default, Copy, Clone)]
pub struct StdDelay;

impl Delay for StdDelay {
    fn delay_us(&mut self, us: u32) {
        sleep(Duration::from_micros(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        sleep(Duration::from_millis(ms as u64));
    }
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn std_delay_never_undersleeps() {
        let mut delay = StdDelay;
        let start = Instant::now();
        delay.delay_us(1500);
        delay.delay_ms(2);
        assert!(start.elapsed() >= Duration::from_micros(3500));
    }

    #[test]
    fn delay_ms_defaults_to_microseconds() {
        #[derive(Debug, Default)]
        struct Total(u64);
        impl Delay for Total {
            fn delay_us(&mut self, us: u32) {
                self.0 += us as u64;
            }
        }

        let mut total = Total::default();
        total.delay_ms(1000);
        assert_eq!(total.0, 1_000_000);
    }
}
