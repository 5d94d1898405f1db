use std::fmt::{self, Display};

/// A value that can render itself as text, optionally guided by a format spec and a provider.
///
/// The format spec is the text after the `:` in a composite format hole such as `{0:X4}`, or an
/// empty string if there was none. Implementations should treat unrecognized specs as if no spec
/// had been given.
pub trait Formattable {
    /// Renders the value into a new string.
    fn format(&self, spec: &str, provider: Option<&dyn FormatProvider>) -> String;
}

/// A [`Formattable`] value that can also write its text form straight into a caller-provided
/// buffer of UTF-16 code units, without any intermediate allocation.
pub trait SpanFormattable: Formattable {
    /// Writes the text form of the value to the start of `destination`.
    ///
    /// Returns the number of code units written, or `None` if `destination` is too short.
    /// When `None` is returned, the contents of `destination` are unspecified.
    fn try_format(
        &self,
        destination: &mut [u16],
        spec: &str,
        provider: Option<&dyn FormatProvider>,
    ) -> Option<usize>;
}

/// Supplies culture-specific formatting information and, optionally, a custom formatter that
/// overrides how every argument of a composite format call is rendered.
pub trait FormatProvider {
    /// The custom formatter to use for every argument, if any.
    fn custom_formatter(&self) -> Option<&dyn CustomFormatter> {
        None
    }

    /// Symbols used when rendering numbers.
    fn number_format(&self) -> NumberFormat {
        NumberFormat::INVARIANT
    }
}

/// Renders composite format arguments in place of their own formatting logic.
pub trait CustomFormatter {
    /// Renders `argument`. The returned text is used as-is, subject only to width padding.
    fn format(
        &self,
        spec: Option<&str>,
        argument: &Argument<'_>,
        provider: &dyn FormatProvider,
    ) -> String;
}

/// The symbols used when rendering numbers for a particular culture.
///
/// `NumberFormat` is itself a [`FormatProvider`], so it can be passed directly wherever a
/// provider is expected.
///
/// # Example
///
/// ```rust
/// use pooled_text::{Formattable, NumberFormat};
///
/// let german = NumberFormat::new(',', '.', '-');
///
/// assert_eq!(1234.5_f64.format("N2", Some(&german)), "1.234,50");
/// assert_eq!(1234.5_f64.format("N2", None), "1,234.50");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NumberFormat {
    decimal_separator: char,
    group_separator: char,
    negative_sign: char,
}

impl NumberFormat {
    /// Culture-independent symbols: `.` for decimals, `,` for groups and `-` for negatives.
    pub const INVARIANT: Self = Self::new('.', ',', '-');

    /// Creates a number format from its symbols.
    #[must_use]
    pub const fn new(decimal_separator: char, group_separator: char, negative_sign: char) -> Self {
        Self {
            decimal_separator,
            group_separator,
            negative_sign,
        }
    }

    /// Separates the integral part of a number from its fractional part.
    #[must_use]
    #[inline]
    pub const fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// Separates groups of three integral digits when group separators are requested.
    #[must_use]
    #[inline]
    pub const fn group_separator(&self) -> char {
        self.group_separator
    }

    /// Prefixes negative numbers.
    #[must_use]
    #[inline]
    pub const fn negative_sign(&self) -> char {
        self.negative_sign
    }

    pub(crate) fn of(provider: Option<&dyn FormatProvider>) -> Self {
        provider.map_or(Self::INVARIANT, FormatProvider::number_format)
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::INVARIANT
    }
}

impl FormatProvider for NumberFormat {
    fn number_format(&self) -> NumberFormat {
        *self
    }
}

/// One positional argument of a composite format call, tagged with the richest formatting
/// capability it offers.
///
/// Primitive numbers, `bool`, `char` and strings convert into an `Argument` via [`From`]. Other
/// types pick their capability explicitly through the variant constructors.
///
/// # Example
///
/// ```rust
/// use pooled_text::{Argument, TextBuilder};
///
/// let name = "world";
/// let count = 3_u32;
///
/// let mut builder = TextBuilder::with_capacity(32);
/// builder
///     .format_into(None, "hello {0}, {1} times", &[name.into(), (&count).into()])
///     .unwrap();
///
/// assert_eq!(builder.into_string(), "hello world, 3 times");
/// ```
#[derive(Clone, Copy)]
#[non_exhaustive]
pub enum Argument<'a> {
    /// Can write itself directly into the builder's unused capacity.
    SpanFormattable(&'a dyn SpanFormattable),

    /// Renders itself into a new string, honoring format specs and providers.
    Formattable(&'a dyn Formattable),

    /// Plain text, copied as-is; format specs are ignored.
    Str(&'a str),

    /// Rendered with its [`Display`] implementation; format specs are ignored.
    Display(&'a dyn Display),

    /// Renders as empty text.
    Null,
}

impl Argument<'_> {
    /// Writes the argument directly into `destination` if it has that capability.
    ///
    /// Returns `None` if the argument cannot write directly or if `destination` is too short.
    pub(crate) fn try_format(
        &self,
        destination: &mut [u16],
        spec: &str,
        provider: Option<&dyn FormatProvider>,
    ) -> Option<usize> {
        match self {
            Self::SpanFormattable(value) => value.try_format(destination, spec, provider),
            Self::Str(value) => value.try_format(destination, spec, provider),
            Self::Formattable(_) | Self::Display(_) | Self::Null => None,
        }
    }

    /// Renders the argument into a new string, falling back from the richest capability to the
    /// plainest.
    pub(crate) fn to_text(self, spec: &str, provider: Option<&dyn FormatProvider>) -> String {
        match self {
            Self::SpanFormattable(value) => value.format(spec, provider),
            Self::Formattable(value) => value.format(spec, provider),
            Self::Str(value) => value.to_owned(),
            Self::Display(value) => value.to_string(),
            Self::Null => String::new(),
        }
    }
}

impl fmt::Debug for Argument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::SpanFormattable(_) => "SpanFormattable",
            Self::Formattable(_) => "Formattable",
            Self::Str(_) => "Str",
            Self::Display(_) => "Display",
            Self::Null => "Null",
        };

        f.debug_tuple("Argument").field(&kind).finish()
    }
}

impl<'a> From<&'a str> for Argument<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a String> for Argument<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(value.as_str())
    }
}

impl<T> From<Option<T>> for Argument<'_>
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Adapts a UTF-16 slice as a [`fmt::Write`] sink that fails instead of overflowing.
pub(crate) struct Utf16SliceWriter<'d> {
    destination: &'d mut [u16],
    written: usize,
}

impl<'d> Utf16SliceWriter<'d> {
    pub(crate) fn new(destination: &'d mut [u16]) -> Self {
        Self {
            destination,
            written: 0,
        }
    }

    pub(crate) fn written(&self) -> usize {
        self.written
    }
}

impl fmt::Write for Utf16SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for unit in s.encode_utf16() {
            let slot = self.destination.get_mut(self.written).ok_or(fmt::Error)?;
            *slot = unit;
            self.written = self.written.checked_add(1).ok_or(fmt::Error)?;
        }

        Ok(())
    }
}
