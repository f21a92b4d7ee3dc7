//! Debugger console over CIO
//!
//! Code Composer Studio services C I/O requests from the target through a shared buffer and a
//! breakpoint: the target fills in a request, then executes the instruction at the `C$$IO$$`
//! label, on which the debugger has set a breakpoint. The debugger performs the request and
//! resumes the target. Only writes to standard out are supported here.
//!
//! Characters are collected directly in the request's data field. A request is sent when the
//! field is full or a newline is written, so output appears line by line.

use core::convert::Infallible;
use embedded_io::{ErrorType, Write};

/// Bytes buffered per request. Odd, so that the whole request is a whole number of 16-bit words.
pub const MAX_BYTES_PER_WRITE: usize = 33;
/// File descriptor of standard out on the host
pub const STDOUT_FILENO: u16 = 1;
/// CIO command code for a write
pub const DTWRITE: u8 = 0xF3;

/// Layout of the shared CIO request buffer
#[repr(C, packed)]
#[derive(Clone, Copy)]
pub struct CioRequest {
    length: u16,
    command: u8,
    parmbuf: [u8; 8],
    data: [u8; MAX_BYTES_PER_WRITE],
}

impl CioRequest {
    /// Zeroed request
    pub const EMPTY: CioRequest = CioRequest {
        length: 0,
        command: 0,
        parmbuf: [0; 8],
        data: [0; MAX_BYTES_PER_WRITE],
    };

    /// Number of data bytes in the request
    pub fn length(&self) -> u16 {
        self.length
    }

    /// Command code
    pub fn command(&self) -> u8 {
        self.command
    }

    /// Command parameters. For a write these are the file descriptor and the length, each as a
    /// little-endian 16-bit value.
    pub fn parmbuf(&self) -> &[u8; 8] {
        &self.parmbuf
    }

    /// The bytes being written
    pub fn data(&self) -> &[u8] {
        &self.data[..(self.length as usize).min(MAX_BYTES_PER_WRITE)]
    }

    fn load_write(&mut self, len: usize) {
        let len = len as u16;
        self.command = DTWRITE;
        self.length = len;
        self.parmbuf[0..2].copy_from_slice(&STDOUT_FILENO.to_le_bytes());
        self.parmbuf[2..4].copy_from_slice(&len.to_le_bytes());
    }
}

/// Something that can hand a filled request to the debugger
pub trait CioHost {
    /// Perform the request. Returns once the host has consumed it.
    fn transfer(&mut self, request: &CioRequest);
}

/// Line-buffered console writing to the debugger's standard out
pub struct CioConsole<H> {
    request: CioRequest,
    len: usize,
    host: H,
}

impl<H: CioHost> CioConsole<H> {
    /// Create a console on top of a host
    pub fn new(host: H) -> Self {
        CioConsole {
            request: CioRequest::EMPTY,
            len: 0,
            host,
        }
    }

    /// Buffer one byte, sending the request if the buffer fills or the byte is a newline
    pub fn putc(&mut self, byte: u8) {
        self.request.data[self.len] = byte;
        self.len += 1;

        if self.len == MAX_BYTES_PER_WRITE || byte == b'\n' {
            self.send();
        }
    }

    /// Write every byte of a string
    pub fn puts(&mut self, text: &str) {
        text.bytes().for_each(|b| self.putc(b));
    }

    /// Bytes waiting to be sent
    pub fn pending(&self) -> usize {
        self.len
    }

    /// Give the host back
    pub fn free(self) -> H {
        self.host
    }

    fn send(&mut self) {
        self.request.load_write(self.len);
        self.host.transfer(&self.request);
        self.len = 0;
    }
}

impl<H> ErrorType for CioConsole<H> {
    type Error = Infallible;
}

impl<H: CioHost> Write for CioConsole<H> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        buf.iter().for_each(|&b| self.putc(b));
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.len > 0 {
            self.send();
        }
        Ok(())
    }
}

#[cfg(all(target_arch = "msp430", feature = "msp430fr2355"))]
pub use self::debugger::DebuggerHost;

#[cfg(all(target_arch = "msp430", feature = "msp430fr2355"))]
mod debugger {
    use super::{CioHost, CioRequest};
    use core::cell::UnsafeCell;

    struct CioBuf(UnsafeCell<CioRequest>);

    // Only touched inside a critical section
    unsafe impl Sync for CioBuf {}

    // The debugger finds the buffer by this symbol name
    #[export_name = "_CIOBUF_"]
    #[link_section = ".cio"]
    #[used]
    static CIOBUF: CioBuf = CioBuf(UnsafeCell::new(CioRequest::EMPTY));

    /// Hands requests to Code Composer Studio through the `_CIOBUF_` symbol and the `C$$IO$$`
    /// breakpoint. Without a debugger attached the breakpoint is a plain `nop` and output is
    /// dropped.
    pub struct DebuggerHost {
        _private: (),
    }

    impl DebuggerHost {
        /// Create the host
        pub fn new() -> Self {
            DebuggerHost { _private: () }
        }
    }

    impl Default for DebuggerHost {
        fn default() -> Self {
            DebuggerHost::new()
        }
    }

    impl CioHost for DebuggerHost {
        fn transfer(&mut self, request: &CioRequest) {
            critical_section::with(|_| {
                unsafe { core::ptr::write_volatile(CIOBUF.0.get(), *request) };
                breakpoint();
            });
        }
    }

    // Must stay out of line: the label may only be defined once.
    #[inline(never)]
    fn breakpoint() {
        unsafe { core::arch::asm!(".global C$$IO$$", "C$$IO$$: nop") };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        requests: Vec<(u16, u8, [u8; 8], Vec<u8>)>,
    }

    impl CioHost for Recorder {
        fn transfer(&mut self, request: &CioRequest) {
            self.requests.push((
                request.length(),
                request.command(),
                *request.parmbuf(),
                request.data().to_vec(),
            ));
        }
    }

    #[test]
    fn newline_sends_the_line() {
        let mut console = CioConsole::new(Recorder::default());
        console.puts("lit\r");
        assert_eq!(console.pending(), 4);
        console.putc(b'\n');
        assert_eq!(console.pending(), 0);

        let host = console.free();
        assert_eq!(host.requests.len(), 1);
        let (length, command, parmbuf, data) = &host.requests[0];
        assert_eq!(*length, 5);
        assert_eq!(*command, DTWRITE);
        assert_eq!(parmbuf[..4], [1, 0, 5, 0]);
        assert_eq!(data, b"lit\r\n");
    }

    #[test]
    fn full_buffer_sends_without_newline() {
        let mut console = CioConsole::new(Recorder::default());
        let text = [b'a'; MAX_BYTES_PER_WRITE + 3];
        console.write_all(&text).unwrap();
        assert_eq!(console.pending(), 3);

        let host = console.free();
        assert_eq!(host.requests.len(), 1);
        assert_eq!(host.requests[0].0 as usize, MAX_BYTES_PER_WRITE);
        assert_eq!(host.requests[0].2[2..4], [33, 0]);
        assert_eq!(host.requests[0].3.len(), MAX_BYTES_PER_WRITE);
    }

    #[test]
    fn flush_sends_partial_line() {
        let mut console = CioConsole::new(Recorder::default());
        console.flush().unwrap();
        console.puts("12");
        console.flush().unwrap();
        let host = console.free();
        assert_eq!(host.requests.len(), 1);
        assert_eq!(host.requests[0].3, b"12");
    }

    #[test]
    fn request_is_whole_words() {
        assert_eq!(core::mem::size_of::<CioRequest>(), 44);
    }

    #[test]
    fn printf_through_console() {
        let mut console = CioConsole::new(Recorder::default());
        crate::printf!(&mut console, "%u\r\n", 1023u16).unwrap();
        let host = console.free();
        assert_eq!(host.requests[0].3, b"1023\r\n");
    }
}
