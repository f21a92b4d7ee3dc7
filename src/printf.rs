//! Minimal `printf`
//!
//! Formats into any [`embedded_io::Write`] without `core::fmt`, which is far too large for a
//! 32 kB part. Supported conversions:
//!
//! | Conv | Argument                         |
//! |------|----------------------------------|
//! | `%s` | string                           |
//! | `%c` | single byte                      |
//! | `%i` | signed 16-bit integer            |
//! | `%u` | unsigned 16-bit integer          |
//! | `%l` | signed 32-bit integer            |
//! | `%n` | unsigned 32-bit integer          |
//! | `%x` | 16-bit integer as 4 hex digits   |
//!
//! A `%` followed by anything else prints that character, so `%%` prints `%`. A trailing `%`
//! ends the output. Integer conversions take any integer argument and truncate or reinterpret
//! it to their own width.
//!
//! ```
//! use msp430_candle::printf;
//!
//! let mut buf = [0u8; 16];
//! let mut out = &mut buf[..];
//! printf!(&mut out, "%i mV\r\n", -42i16).ok();
//! assert_eq!(&buf[..8], b"-42 mV\r\n");
//! ```

use embedded_io::Write;

// Powers of ten used by the decimal conversion. 16-bit values start at 10000.
const DV: [u32; 10] = [
    1_000_000_000,
    100_000_000,
    10_000_000,
    1_000_000,
    100_000,
    10_000,
    1_000,
    100,
    10,
    1,
];
const DV_16: usize = 5;

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// One `printf` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    /// String, for `%s`
    Str(&'a str),
    /// Byte, for `%c`
    Char(u8),
    /// Signed 16-bit value
    I16(i16),
    /// Unsigned 16-bit value
    U16(u16),
    /// Signed 32-bit value
    I32(i32),
    /// Unsigned 32-bit value
    U32(u32),
}

impl<'a> Arg<'a> {
    fn word(&self) -> Option<u16> {
        match *self {
            Arg::Str(_) => None,
            Arg::Char(c) => Some(c as u16),
            Arg::I16(v) => Some(v as u16),
            Arg::U16(v) => Some(v),
            Arg::I32(v) => Some(v as u16),
            Arg::U32(v) => Some(v as u16),
        }
    }

    fn long(&self) -> Option<u32> {
        match *self {
            Arg::Str(_) => None,
            Arg::Char(c) => Some(c as u32),
            Arg::I16(v) => Some(v as i32 as u32),
            Arg::U16(v) => Some(v as u32),
            Arg::I32(v) => Some(v as u32),
            Arg::U32(v) => Some(v),
        }
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(s)
    }
}

impl From<u8> for Arg<'_> {
    fn from(c: u8) -> Self {
        Arg::Char(c)
    }
}

impl From<char> for Arg<'_> {
    /// Non-ASCII characters become `?`
    fn from(c: char) -> Self {
        Arg::Char(if c.is_ascii() { c as u8 } else { b'?' })
    }
}

impl From<i16> for Arg<'_> {
    fn from(v: i16) -> Self {
        Arg::I16(v)
    }
}

impl From<u16> for Arg<'_> {
    fn from(v: u16) -> Self {
        Arg::U16(v)
    }
}

impl From<i32> for Arg<'_> {
    fn from(v: i32) -> Self {
        Arg::I32(v)
    }
}

impl From<u32> for Arg<'_> {
    fn from(v: u32) -> Self {
        Arg::U32(v)
    }
}

/// Errors from [`printf`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintfError<E> {
    /// The output failed
    Write(E),
    /// The format needs more arguments than were given
    MissingArgument,
    /// An argument cannot be used with its conversion, e.g. a string for `%i`
    ArgumentMismatch,
}

/// Format `args` into `out` according to `format`
pub fn printf<W: Write + ?Sized>(
    out: &mut W,
    format: &str,
    args: &[Arg],
) -> Result<(), PrintfError<W::Error>> {
    let mut args = args.iter();
    let mut next_arg = || args.next().ok_or(PrintfError::<W::Error>::MissingArgument);
    let mut bytes = format.bytes();

    while let Some(c) = bytes.next() {
        if c != b'%' {
            putc(out, c)?;
            continue;
        }

        let Some(conv) = bytes.next() else {
            return Ok(());
        };
        match conv {
            b's' => match next_arg()? {
                Arg::Str(s) => out.write_all(s.as_bytes()).map_err(PrintfError::Write)?,
                _ => return Err(PrintfError::ArgumentMismatch),
            },
            b'c' => {
                let c = next_arg()?.word().ok_or(PrintfError::ArgumentMismatch)?;
                putc(out, c as u8)?;
            }
            b'i' | b'u' => {
                let mut n = next_arg()?.word().ok_or(PrintfError::ArgumentMismatch)?;
                if conv == b'i' && (n as i16) < 0 {
                    n = (n as i16).unsigned_abs();
                    putc(out, b'-')?;
                }
                xtoa(out, n as u32, &DV[DV_16..])?;
            }
            b'l' | b'n' => {
                let mut n = next_arg()?.long().ok_or(PrintfError::ArgumentMismatch)?;
                if conv == b'l' && (n as i32) < 0 {
                    n = (n as i32).unsigned_abs();
                    putc(out, b'-')?;
                }
                xtoa(out, n, &DV)?;
            }
            b'x' => {
                let n = next_arg()?.word().ok_or(PrintfError::ArgumentMismatch)?;
                for shift in [12, 8, 4, 0] {
                    putc(out, HEX[((n >> shift) & 0xF) as usize])?;
                }
            }
            other => putc(out, other)?,
        }
    }
    Ok(())
}

fn putc<W: Write + ?Sized>(out: &mut W, c: u8) -> Result<(), PrintfError<W::Error>> {
    out.write_all(&[c]).map_err(PrintfError::Write)
}

// Decimal by repeated subtraction: the MSP430 has no divide instruction.
fn xtoa<W: Write + ?Sized>(
    out: &mut W,
    mut x: u32,
    dv: &[u32],
) -> Result<(), PrintfError<W::Error>> {
    if x == 0 {
        return putc(out, b'0');
    }
    let lead = dv.iter().position(|&d| x >= d).unwrap_or(dv.len());
    for &d in &dv[lead..] {
        let mut c = b'0';
        while x >= d {
            c += 1;
            x -= d;
        }
        putc(out, c)?;
    }
    Ok(())
}

/// Format into an [`embedded_io::Write`] with C `printf` syntax.
///
/// `printf!(out, "%u of %u\r\n", done, total)` converts each argument into an [`Arg`] and calls
/// [`printf()`].
#[macro_export]
macro_rules! printf {
    ($out:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::printf::printf($out, $fmt, &[$($crate::printf::Arg::from($arg)),*])
    };
}
