//! Standard format specs for primitive values.
//!
//! Integers understand `D[n]` (zero-padded decimal), `X[n]`/`x[n]` (two's complement
//! hexadecimal), `N[n]` (grouped, `n` decimals, default 2), `F[n]` (fixed, `n` decimals, default
//! 2) and `G` or an empty spec (plain decimal). Floats understand `F[n]`, `N[n]`, `E[n]`/`e[n]`
//! (exponential, default 6 decimals) and `G` or an empty spec (shortest round-trip form).
//! Anything else is rendered as if no spec had been given.

use std::fmt::{self, Display, LowerExp, Write};
use std::str::from_utf8;

use crate::formatting::Utf16SliceWriter;
use crate::{Argument, FormatProvider, Formattable, NumberFormat, SpanFormattable};

const DEFAULT_DECIMALS: usize = 2;
const DEFAULT_EXPONENT_DECIMALS: usize = 6;
const MAX_PRECISION: usize = 99;

/// A parsed standard format spec: a single letter optionally followed by a precision.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Spec {
    kind: Option<char>,
    precision: Option<usize>,
}

impl Spec {
    const GENERAL: Self = Self {
        kind: None,
        precision: None,
    };

    fn parse(spec: &str) -> Self {
        let mut chars = spec.chars();

        let Some(kind) = chars.next() else {
            return Self::GENERAL;
        };

        if !kind.is_ascii_alphabetic() {
            return Self::GENERAL;
        }

        let digits = chars.as_str();

        if digits.is_empty() {
            return Self {
                kind: Some(kind),
                precision: None,
            };
        }

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Self::GENERAL;
        }

        let precision = digits
            .parse::<usize>()
            .map_or(MAX_PRECISION, |precision| precision.min(MAX_PRECISION));

        Self {
            kind: Some(kind),
            precision: Some(precision),
        }
    }
}

/// Renders a value into any `fmt::Write` sink, so the same logic serves both the allocating and
/// the direct-write paths.
trait WriteText {
    fn write_text<W: Write>(&self, out: &mut W, spec: &str, numbers: NumberFormat) -> fmt::Result;
}

/// Maps `.` to a culture-specific decimal separator on the way through.
struct DecimalSeparatorWriter<'w, W> {
    inner: &'w mut W,
    separator: char,
}

impl<W: Write> Write for DecimalSeparatorWriter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            self.inner
                .write_char(if c == '.' { self.separator } else { c })?;
        }

        Ok(())
    }
}

fn write_sign<W: Write>(out: &mut W, negative: bool, numbers: NumberFormat) -> fmt::Result {
    if negative {
        out.write_char(numbers.negative_sign())?;
    }

    Ok(())
}

fn write_zero_decimals<W: Write>(out: &mut W, count: usize, numbers: NumberFormat) -> fmt::Result {
    if count == 0 {
        return Ok(());
    }

    out.write_char(numbers.decimal_separator())?;

    for _ in 0..count {
        out.write_char('0')?;
    }

    Ok(())
}

fn write_grouped<W: Write>(out: &mut W, digits: &str, separator: char) -> fmt::Result {
    let mut remaining = digits.len();

    for digit in digits.chars() {
        out.write_char(digit)?;

        remaining = remaining.saturating_sub(1);
        if remaining > 0 && remaining % 3 == 0 {
            out.write_char(separator)?;
        }
    }

    Ok(())
}

/// Enough room for the decimal digits of `u128::MAX`.
const MAX_DECIMAL_DIGITS: usize = 39;

#[expect(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "start stays within the buffer, which fits every u128; remainders are below 10"
)]
fn write_grouped_integer<W: Write>(out: &mut W, magnitude: u128, separator: char) -> fmt::Result {
    let mut buffer = [0_u8; MAX_DECIMAL_DIGITS];
    let mut start = buffer.len();
    let mut rest = magnitude;

    loop {
        start -= 1;
        buffer[start] = b'0' + (rest % 10) as u8;
        rest /= 10;

        if rest == 0 {
            break;
        }
    }

    let digits = from_utf8(&buffer[start..]).ok().ok_or(fmt::Error)?;
    write_grouped(out, digits, separator)
}

fn write_integer<W: Write>(
    out: &mut W,
    negative: bool,
    magnitude: u128,
    bits: u128,
    spec: &str,
    numbers: NumberFormat,
) -> fmt::Result {
    let spec = Spec::parse(spec);
    let width = spec.precision.unwrap_or(0);

    match spec.kind {
        Some('X') => write!(out, "{bits:0width$X}"),
        Some('x') => write!(out, "{bits:0width$x}"),
        Some('D' | 'd') => {
            write_sign(out, negative, numbers)?;
            write!(out, "{magnitude:0width$}")
        }
        Some('N' | 'n') => {
            write_sign(out, negative, numbers)?;
            write_grouped_integer(out, magnitude, numbers.group_separator())?;
            write_zero_decimals(out, spec.precision.unwrap_or(DEFAULT_DECIMALS), numbers)
        }
        Some('F' | 'f') => {
            write_sign(out, negative, numbers)?;
            write!(out, "{magnitude}")?;
            write_zero_decimals(out, spec.precision.unwrap_or(DEFAULT_DECIMALS), numbers)
        }
        _ => {
            write_sign(out, negative, numbers)?;
            write!(out, "{magnitude}")
        }
    }
}

macro_rules! signed_write_text {
    ($($signed:ty => $unsigned:ty),* $(,)?) => {
        $(
            impl WriteText for $signed {
                fn write_text<W: Write>(
                    &self,
                    out: &mut W,
                    spec: &str,
                    numbers: NumberFormat,
                ) -> fmt::Result {
                    let magnitude = u128::try_from(self.unsigned_abs())
                        .expect("every primitive integer magnitude fits in u128");
                    let bits = u128::try_from(<$unsigned>::from_ne_bytes(self.to_ne_bytes()))
                        .expect("every primitive integer bit pattern fits in u128");

                    write_integer(out, *self < 0, magnitude, bits, spec, numbers)
                }
            }
        )*
    };
}

macro_rules! unsigned_write_text {
    ($($unsigned:ty),* $(,)?) => {
        $(
            impl WriteText for $unsigned {
                fn write_text<W: Write>(
                    &self,
                    out: &mut W,
                    spec: &str,
                    numbers: NumberFormat,
                ) -> fmt::Result {
                    let magnitude = u128::try_from(*self)
                        .expect("every primitive integer magnitude fits in u128");

                    write_integer(out, false, magnitude, magnitude, spec, numbers)
                }
            }
        )*
    };
}

signed_write_text!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize);
unsigned_write_text!(u8, u16, u32, u64, u128, usize);

trait Float: Copy + Display + LowerExp {
    fn is_nan(self) -> bool;
    fn is_infinite(self) -> bool;
    fn is_sign_negative(self) -> bool;
    fn abs(self) -> Self;
}

macro_rules! float {
    ($($ty:ty),*) => {
        $(
            impl Float for $ty {
                fn is_nan(self) -> bool {
                    <$ty>::is_nan(self)
                }

                fn is_infinite(self) -> bool {
                    <$ty>::is_infinite(self)
                }

                fn is_sign_negative(self) -> bool {
                    <$ty>::is_sign_negative(self)
                }

                fn abs(self) -> Self {
                    <$ty>::abs(self)
                }
            }

            impl WriteText for $ty {
                fn write_text<W: Write>(
                    &self,
                    out: &mut W,
                    spec: &str,
                    numbers: NumberFormat,
                ) -> fmt::Result {
                    write_float(out, *self, spec, numbers)
                }
            }
        )*
    };
}

float!(f32, f64);

fn write_float<W: Write, F: Float>(
    out: &mut W,
    value: F,
    spec: &str,
    numbers: NumberFormat,
) -> fmt::Result {
    if value.is_nan() {
        return out.write_str("NaN");
    }

    write_sign(out, value.is_sign_negative(), numbers)?;
    let magnitude = value.abs();

    if magnitude.is_infinite() {
        return out.write_str("Infinity");
    }

    let spec = Spec::parse(spec);
    let mut decimal = DecimalSeparatorWriter {
        inner: out,
        separator: numbers.decimal_separator(),
    };

    match spec.kind {
        Some('F' | 'f') => {
            let precision = spec.precision.unwrap_or(DEFAULT_DECIMALS);
            write!(decimal, "{magnitude:.precision$}")
        }
        Some('N' | 'n') => {
            let precision = spec.precision.unwrap_or(DEFAULT_DECIMALS);
            let fixed = format!("{magnitude:.precision$}");
            let (integral, fractional) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

            write_grouped(decimal.inner, integral, numbers.group_separator())?;

            if !fractional.is_empty() {
                decimal.inner.write_char(numbers.decimal_separator())?;
                decimal.inner.write_str(fractional)?;
            }

            Ok(())
        }
        Some(kind @ ('E' | 'e')) => {
            let precision = spec.precision.unwrap_or(DEFAULT_EXPONENT_DECIMALS);
            let scientific = format!("{magnitude:.precision$e}");
            let (mantissa, exponent) = scientific.split_once('e').ok_or(fmt::Error)?;
            let exponent = exponent.parse::<i32>().ok().ok_or(fmt::Error)?;

            decimal.write_str(mantissa)?;
            decimal.inner.write_char(kind)?;
            decimal
                .inner
                .write_char(if exponent < 0 { '-' } else { '+' })?;
            write!(decimal.inner, "{:03}", exponent.unsigned_abs())
        }
        _ => write!(decimal, "{magnitude}"),
    }
}

impl WriteText for bool {
    fn write_text<W: Write>(&self, out: &mut W, _spec: &str, _numbers: NumberFormat) -> fmt::Result {
        write!(out, "{self}")
    }
}

impl WriteText for char {
    fn write_text<W: Write>(&self, out: &mut W, _spec: &str, _numbers: NumberFormat) -> fmt::Result {
        out.write_char(*self)
    }
}

impl WriteText for str {
    fn write_text<W: Write>(&self, out: &mut W, _spec: &str, _numbers: NumberFormat) -> fmt::Result {
        out.write_str(self)
    }
}

macro_rules! formattable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Formattable for $ty {
                fn format(&self, spec: &str, provider: Option<&dyn FormatProvider>) -> String {
                    let mut text = String::new();
                    // Writing into a String never fails.
                    _ = self.write_text(&mut text, spec, NumberFormat::of(provider));
                    text
                }
            }

            impl SpanFormattable for $ty {
                fn try_format(
                    &self,
                    destination: &mut [u16],
                    spec: &str,
                    provider: Option<&dyn FormatProvider>,
                ) -> Option<usize> {
                    let mut writer = Utf16SliceWriter::new(destination);
                    self.write_text(&mut writer, spec, NumberFormat::of(provider))
                        .ok()?;
                    Some(writer.written())
                }
            }
        )*
    };
}

macro_rules! argument_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for Argument<'a> {
                fn from(value: &'a $ty) -> Self {
                    Self::SpanFormattable(value)
                }
            }
        )*
    };
}

formattable!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, str,
);

argument_from!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);
