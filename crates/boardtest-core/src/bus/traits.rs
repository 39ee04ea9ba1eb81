//! Expander bus trait definitions

use crate::error::Result;

/// A PCF8574-style port expander reachable over some bus
///
/// The expander has eight quasi-bidirectional output lines. Every call to
/// [`write_byte`](ExpanderBus::write_byte) latches a new value onto all
/// eight lines at once; there is no read-back in this usage.
///
/// ## Example: a backend that only counts writes
///
/// ```ignore
/// struct Counter(usize);
///
/// impl ExpanderBus for Counter {
///     fn write_byte(&mut self, _data: u8) -> Result<()> {
///         self.0 += 1;
///         Ok(())
///     }
///
///     fn delay_us(&mut self, _us: u32) {}
/// }
/// ```
pub trait ExpanderBus {
    /// Latch one raw byte onto the expander's output lines
    fn write_byte(&mut self, data: u8) -> Result<()>;

    /// Delay for at least the specified number of microseconds
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds
    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }
}

impl<B: ExpanderBus + ?Sized> ExpanderBus for &mut B {
    fn write_byte(&mut self, data: u8) -> Result<()> {
        (**self).write_byte(data)
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
