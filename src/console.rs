//! UART console
//!
//! [`SerialConsole`] turns any byte-at-a-time serial transmitter into an [`embedded_io::Write`],
//! so [`printf`](crate::printf::printf) output can go to a UART instead of the debugger.

use core::fmt::Debug;
use embedded_hal_nb::serial;
use embedded_io::{ErrorKind, ErrorType, Write};
use nb::block;

/// Error from the underlying transmitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialError<E>(pub E);

impl<E: Debug> embedded_io::Error for SerialError<E> {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Blocking [`embedded_io::Write`] adapter over a serial transmitter
pub struct SerialConsole<U> {
    tx: U,
}

impl<U: serial::Write<u8>> SerialConsole<U> {
    /// Wrap a transmitter
    pub fn new(tx: U) -> Self {
        SerialConsole { tx }
    }

    /// Give the transmitter back
    pub fn free(self) -> U {
        self.tx
    }
}

impl<U: serial::ErrorType> ErrorType for SerialConsole<U> {
    type Error = SerialError<U::Error>;
}

impl<U: serial::Write<u8>> Write for SerialConsole<U> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for &b in buf {
            block!(self.tx.write(b)).map_err(SerialError)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        block!(self.tx.flush()).map_err(SerialError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Overrun;

    impl serial::Error for Overrun {
        fn kind(&self) -> serial::ErrorKind {
            serial::ErrorKind::Overrun
        }
    }

    // Reports WouldBlock on every other byte, like a transmit buffer that drains slowly.
    // Fails once `fail_after` bytes have been sent.
    struct SlowTx {
        sent: Vec<u8>,
        busy: bool,
        fail_after: usize,
        flushed: bool,
    }

    impl serial::ErrorType for SlowTx {
        type Error = Overrun;
    }

    impl serial::Write<u8> for SlowTx {
        fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
            if self.sent.len() >= self.fail_after {
                return Err(nb::Error::Other(Overrun));
            }
            if self.busy {
                self.busy = false;
                return Err(nb::Error::WouldBlock);
            }
            self.busy = true;
            self.sent.push(word);
            Ok(())
        }

        fn flush(&mut self) -> nb::Result<(), Self::Error> {
            self.flushed = true;
            Ok(())
        }
    }

    fn tx(fail_after: usize) -> SlowTx {
        SlowTx {
            sent: Vec::new(),
            busy: false,
            fail_after,
            flushed: false,
        }
    }

    #[test]
    fn writes_every_byte() {
        let mut console = SerialConsole::new(tx(usize::MAX));
        crate::printf!(&mut console, "mic %u\r\n", 300u16).unwrap();
        console.flush().unwrap();
        let tx = console.free();
        assert_eq!(tx.sent, b"mic 300\r\n");
        assert!(tx.flushed);
    }

    #[test]
    fn transmitter_errors_propagate() {
        let mut console = SerialConsole::new(tx(2));
        assert_eq!(console.write(b"abc"), Err(SerialError(Overrun)));
        assert_eq!(console.free().sent, b"ab");
    }
}
