use std::fmt;

use crate::error::non_negative;
use crate::{Error, FormatProvider, Result, SpanFormattable, TextBuilder};

const SURROGATE_OFFSET: u32 = 0x1_0000;
const HIGH_SURROGATE_START: u32 = 0xD800;
const LOW_SURROGATE_START: u32 = 0xDC00;

impl TextBuilder<'_> {
    /// Appends a single UTF-16 code unit.
    #[inline]
    pub fn append_char(&mut self, unit: u16) {
        if self.remaining() == 0 {
            self.grow(1);
        }

        if let Some(slot) = self.unused_mut().first_mut() {
            *slot = unit;
        }

        self.advance(1);
    }

    /// Appends `count` copies of a UTF-16 code unit.
    pub fn append_repeated(&mut self, unit: u16, count: usize) {
        self.reserve_exact(count);

        if let Some(target) = self.unused_mut().get_mut(..count) {
            target.fill(unit);
        }

        self.advance(count);
    }

    /// Appends text, encoding it as UTF-16.
    #[cfg_attr(test, mutants::skip)] // The single-unit fast path is indistinguishable from the general path.
    pub fn append_str(&mut self, text: &str) {
        // Single ASCII characters (separators, signs) are common enough for their own path.
        if let [byte] = text.as_bytes() {
            if let Some(slot) = self.unused_mut().first_mut() {
                *slot = u16::from(*byte);
                self.advance(1);
                return;
            }
        }

        let count = text.encode_utf16().count();
        self.reserve_exact(count);

        for (slot, unit) in self.unused_mut().iter_mut().zip(text.encode_utf16()) {
            *slot = unit;
        }

        self.advance(count);
    }

    /// Appends UTF-16 code units verbatim.
    pub fn append_utf16(&mut self, units: &[u16]) {
        self.reserve_exact(units.len());

        if let Some(target) = self.unused_mut().get_mut(..units.len()) {
            target.copy_from_slice(units);
        }

        self.advance(units.len());
    }

    /// Appends a Unicode scalar value, as a surrogate pair if it lies outside the Basic
    /// Multilingual Plane.
    ///
    /// Both halves of a surrogate pair are always written together; the builder grows before
    /// writing either if there is room for only one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pooled_text::TextBuilder;
    ///
    /// let mut builder = TextBuilder::with_capacity(4);
    /// builder.append_scalar('é');
    /// builder.append_scalar('𝄞');
    ///
    /// assert_eq!(builder.as_view(), &[0x00E9, 0xD834, 0xDD1E]);
    /// ```
    pub fn append_scalar(&mut self, scalar: char) {
        let value = u32::from(scalar);

        if let Ok(unit) = u16::try_from(value) {
            self.append_char(unit);
            return;
        }

        let [high, low] = surrogate_pair(value);

        self.reserve_exact(2);

        if let [high_slot, low_slot, ..] = self.unused_mut() {
            *high_slot = high;
            *low_slot = low;
        }

        self.advance(2);
    }

    /// Appends `value` formatted according to `spec`, writing directly into the unused capacity
    /// when it fits and falling back to an intermediate string when it does not.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pooled_text::TextBuilder;
    ///
    /// let mut builder = TextBuilder::with_capacity(16);
    /// builder.append_formatted(&255_u8, "X4", None);
    ///
    /// assert_eq!(builder.into_string(), "00FF");
    /// ```
    pub fn append_formatted<T>(
        &mut self,
        value: &T,
        spec: &str,
        provider: Option<&dyn FormatProvider>,
    ) where
        T: SpanFormattable + ?Sized,
    {
        if let Some(written) = value.try_format(self.unused_mut(), spec, provider) {
            self.advance(written);
        } else {
            self.append_str(&value.format(spec, provider));
        }
    }

    /// Reserves `length` code units at the end of the text and returns them for the caller to
    /// fill in.
    ///
    /// The length of the builder grows by `length` immediately. The returned slots contain
    /// unspecified data until written.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pooled_text::TextBuilder;
    ///
    /// let mut builder = TextBuilder::with_capacity(4);
    /// builder.reserve_direct(2).copy_from_slice(&[u16::from(b'o'), u16::from(b'k')]);
    ///
    /// assert_eq!(builder.into_string(), "ok");
    /// ```
    #[expect(
        clippy::indexing_slicing,
        reason = "start and end lie within the store after reserving"
    )]
    pub fn reserve_direct(&mut self, length: usize) -> &mut [u16] {
        self.reserve_exact(length);

        let start = self.len();
        self.advance(length);
        let end = self.len();

        &mut self.raw_chars()[start..end]
    }

    /// Inserts `count` copies of a code unit at `index`, shifting the text after it to the right.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] naming `"index"` unless `0 <= index <= len()`.
    pub fn insert_char(&mut self, index: isize, unit: u16, count: usize) -> Result<()> {
        let index = self.validate_insert_index(index)?;

        self.open_gap(index, count).fill(unit);
        Ok(())
    }

    /// Inserts text at `index`, shifting the text after it to the right.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] naming `"index"` unless `0 <= index <= len()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pooled_text::TextBuilder;
    ///
    /// let mut builder = TextBuilder::with_capacity(8);
    /// builder.append_str("held");
    /// builder.insert_str(2, "llo wor").unwrap();
    ///
    /// assert_eq!(builder.into_string(), "hello world");
    /// ```
    pub fn insert_str(&mut self, index: isize, text: &str) -> Result<()> {
        let index = self.validate_insert_index(index)?;
        let count = text.encode_utf16().count();

        for (slot, unit) in self.open_gap(index, count).iter_mut().zip(text.encode_utf16()) {
            *slot = unit;
        }

        Ok(())
    }

    /// Removes `length` code units starting at `start`, shifting the text after them to the left.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] naming `"length"` if `length` is negative or reaches past
    /// the end of the text, or naming `"start"` if `start` is negative or past the end of the
    /// text. Nothing is removed in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pooled_text::TextBuilder;
    ///
    /// let mut builder = TextBuilder::with_capacity(8);
    /// builder.append_str("abc");
    /// builder.remove(1, 2).unwrap();
    ///
    /// assert_eq!(builder.into_string(), "a");
    /// ```
    pub fn remove(&mut self, start: isize, length: isize) -> Result<()> {
        let count = non_negative("length", length)?;
        let from = non_negative("start", start)?;

        let current = self.len();

        let available = current
            .checked_sub(from)
            .ok_or_else(|| Error::out_of_range("start", start, "must not exceed the length"))?;

        if count > available {
            return Err(Error::out_of_range(
                "length",
                length,
                "range must lie within the text",
            ));
        }

        if count == 0 {
            return Ok(());
        }

        let end = from
            .checked_add(count)
            .expect("end of the removed range lies within the text");

        if end != current {
            self.raw_chars().copy_within(end..current, from);
        }

        self.truncate(
            current
                .checked_sub(count)
                .expect("removed range lies within the text"),
        );

        Ok(())
    }

    fn validate_insert_index(&self, index: isize) -> Result<usize> {
        usize::try_from(index)
            .ok()
            .filter(|index| *index <= self.len())
            .ok_or_else(|| {
                Error::out_of_range("index", index, "must be within the text or at its end")
            })
    }

    /// Shifts `[index, len)` right by `count`, extends the length and returns the gap.
    #[expect(
        clippy::indexing_slicing,
        reason = "the store holds len + count units after reserving"
    )]
    fn open_gap(&mut self, index: usize, count: usize) -> &mut [u16] {
        self.reserve_exact(count);

        let current = self.len();
        let gap_end = index
            .checked_add(count)
            .expect("gap lies within the reserved capacity");

        // copy_within is a memmove, so the overlapping ranges are handled.
        self.raw_chars().copy_within(index..current, gap_end);
        self.advance(count);

        &mut self.raw_chars()[index..gap_end]
    }
}

/// Splits a supplementary-plane scalar value into its high and low surrogates.
fn surrogate_pair(value: u32) -> [u16; 2] {
    debug_assert!(value >= SURROGATE_OFFSET);

    let offset = value
        .checked_sub(SURROGATE_OFFSET)
        .expect("only supplementary-plane values need surrogate pairs");

    let high = HIGH_SURROGATE_START | (offset >> 10);
    let low = LOW_SURROGATE_START | (offset & 0x3FF);

    [
        u16::try_from(high).expect("high surrogate fits in 16 bits"),
        u16::try_from(low).expect("low surrogate fits in 16 bits"),
    ]
}

impl fmt::Write for TextBuilder<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_str(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.append_scalar(c);
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Write;
    use std::num::NonZero;

    use super::*;
    use crate::CharPool;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn builder_with(text: &str) -> TextBuilder<'static> {
        let mut builder = TextBuilder::with_capacity(text.len());
        builder.append_str(text);
        builder
    }

    #[test]
    fn append_char_grows_when_full() {
        let mut stack = [0_u16; 2];
        let mut builder = TextBuilder::new_fixed(&mut stack);

        builder.append_char(u16::from(b'a'));
        builder.append_char(u16::from(b'b'));
        builder.append_char(u16::from(b'c'));

        assert_eq!(builder.len(), 3);
        assert!(builder.capacity() > 2);
        assert_eq!(builder.into_string(), "abc");
    }

    #[test]
    fn append_char_pooled_grows_when_full() {
        let pool = CharPool::builder()
            .max_array_length(NonZero::new(16).unwrap())
            .build();
        let mut builder = TextBuilder::with_capacity_in(2, &pool);

        for unit in utf16("0123456789abcdefg") {
            builder.append_char(unit);
        }

        assert_eq!(builder.len(), 17);
        assert!(builder.capacity() >= 17);
        assert_eq!(builder.into_string(), "0123456789abcdefg");
    }

    #[test]
    fn append_repeated_fills() {
        let mut builder = builder_with("x");

        builder.append_repeated(u16::from(b'-'), 3);
        builder.append_repeated(u16::from(b'+'), 0);

        assert_eq!(builder.into_string(), "x---");
    }

    #[test]
    fn append_str_round_trips_before_and_after_growth() {
        let mut stack = [0_u16; 8];
        let mut builder = TextBuilder::new_fixed(&mut stack);

        builder.append_str("short");
        assert_eq!(builder.as_view(), utf16("short").as_slice());

        builder.append_str(" and now considerably longer ✓");
        assert_eq!(
            builder.into_string(),
            "short and now considerably longer ✓"
        );
    }

    #[test]
    fn append_str_single_char_fast_path_and_fallback() {
        let mut stack = [0_u16; 1];
        let mut builder = TextBuilder::new_fixed(&mut stack);

        builder.append_str("a");
        assert_eq!(builder.capacity(), 1);

        builder.append_str("b");
        assert_eq!(builder.into_string(), "ab");
    }

    #[test]
    fn append_str_empty_is_noop() {
        let mut builder = TextBuilder::default();

        builder.append_str("");

        assert!(builder.is_empty());
        assert_eq!(builder.capacity(), 0);
    }

    #[test]
    fn append_utf16_copies_units() {
        let mut builder = builder_with("ab");

        builder.append_utf16(&[0xD83D, 0xDE00]);

        assert_eq!(builder.into_string(), "ab\u{1F600}");
    }

    #[test]
    fn append_scalar_bmp_is_single_unit() {
        let mut builder = TextBuilder::default();

        builder.append_scalar('Ω');

        assert_eq!(builder.as_view(), &[0x03A9]);
    }

    #[test]
    fn append_scalar_supplementary_is_valid_pair() {
        for scalar in ['\u{10000}', '\u{1F600}', '\u{10FFFF}'] {
            let mut builder = TextBuilder::default();
            builder.append_scalar(scalar);

            let view = builder.as_view();
            assert_eq!(view.len(), 2);
            assert!((0xD800..0xDC00).contains(&view[0]));
            assert!((0xDC00..0xE000).contains(&view[1]));

            let decoded = char::decode_utf16(view.iter().copied())
                .map(|unit| unit.unwrap())
                .collect::<Vec<_>>();
            assert_eq!(decoded, vec![scalar]);
        }
    }

    #[test]
    fn append_scalar_grows_before_writing_half_a_pair() {
        let mut stack = [0_u16; 2];
        let mut builder = TextBuilder::new_fixed(&mut stack);
        builder.append_char(u16::from(b'a'));

        builder.append_scalar('\u{1F600}');

        assert_eq!(builder.len(), 3);
        assert_eq!(builder.as_view(), &[u16::from(b'a'), 0xD83D, 0xDE00]);
    }

    #[test]
    fn surrogate_pair_matches_reference_formula() {
        for value in [0x1_0000_u32, 0x1_F600, 0x10_FFFF, 0x2_3456] {
            let [high, low] = surrogate_pair(value);

            let expected_high = (value + 0xD800 * 0x400 - 0x40 * 0x400) >> 10;
            let expected_low = (value & 0x3FF) + 0xDC00;

            assert_eq!(u32::from(high), expected_high);
            assert_eq!(u32::from(low), expected_low);
        }
    }

    #[test]
    fn append_formatted_direct_when_room() {
        let mut builder = TextBuilder::with_capacity(16);
        let capacity = builder.capacity();

        builder.append_formatted(&-1234_i32, "N0", None);

        assert_eq!(builder.capacity(), capacity);
        assert_eq!(builder.into_string(), "-1,234");
    }

    #[test]
    fn append_formatted_falls_back_when_no_room() {
        let mut stack = [0_u16; 3];
        let mut builder = TextBuilder::new_fixed(&mut stack);

        builder.append_formatted(&1_234_567_u32, "", None);

        assert_eq!(builder.into_string(), "1234567");
    }

    #[test]
    fn append_formatted_unsized_str() {
        let mut builder = TextBuilder::default();

        builder.append_formatted("slice", "", None);

        assert_eq!(builder.into_string(), "slice");
    }

    #[test]
    fn reserve_direct_extends_length() {
        let mut stack = [0_u16; 1];
        let mut builder = TextBuilder::new_fixed(&mut stack);

        let slots = builder.reserve_direct(3);
        assert_eq!(slots.len(), 3);
        slots.copy_from_slice(&utf16("xyz"));

        assert_eq!(builder.len(), 3);
        assert_eq!(builder.into_string(), "xyz");
    }

    #[test]
    fn insert_char_shifts_tail() {
        let mut builder = builder_with("ad");

        builder.insert_char(1, u16::from(b'-'), 2).unwrap();

        assert_eq!(builder.into_string(), "a--d");
    }

    #[test]
    fn insert_str_at_start_end_and_with_growth() {
        let mut stack = [0_u16; 4];
        let mut builder = TextBuilder::new_fixed(&mut stack);
        builder.append_str("mid");

        builder.insert_str(0, "[").unwrap();
        builder.insert_str(4, "]").unwrap();
        builder.insert_str(1, "<<overlapping shift>>").unwrap();

        assert_eq!(builder.into_string(), "[<<overlapping shift>>mid]");
    }

    #[test]
    fn insert_out_of_range_is_error() {
        let mut builder = builder_with("ab");

        for index in [-1, 3] {
            assert!(matches!(
                builder.insert_str(index, "x"),
                Err(Error::OutOfRange {
                    parameter: "index",
                    ..
                })
            ));
        }

        assert_eq!(builder.into_string(), "ab");
    }

    #[test]
    fn insert_then_remove_restores_content() {
        let original = "hello world";
        let inserted = "BIG ";

        for index in 0..=original.len() {
            let mut builder = builder_with(original);
            let index = isize::try_from(index).unwrap();

            builder.insert_str(index, inserted).unwrap();
            builder
                .remove(index, isize::try_from(inserted.len()).unwrap())
                .unwrap();

            assert_eq!(builder.len(), original.len());
            assert_eq!(builder.into_string(), original);
        }
    }

    #[test]
    fn remove_middle() {
        let mut builder = builder_with("abcdef");

        builder.remove(1, 2).unwrap();

        assert_eq!(builder.into_string(), "adef");
    }

    #[test]
    fn remove_suffix() {
        let mut builder = builder_with("abc");

        builder.remove(1, 2).unwrap();

        assert_eq!(builder.len(), 1);
        assert_eq!(builder.into_string(), "a");
    }

    #[test]
    fn remove_everything_and_nothing() {
        let mut builder = builder_with("abc");

        builder.remove(3, 0).unwrap();
        assert_eq!(builder.len(), 3);

        builder.remove(0, 3).unwrap();
        assert!(builder.is_empty());
    }

    #[test]
    fn remove_validates_arguments() {
        let mut builder = builder_with("abc");

        let cases = [
            (0, -1, "length"),
            (-1, 1, "start"),
            (4, 0, "start"),
            (1, 3, "length"),
        ];

        for (start, length, parameter_name) in cases {
            let error = builder.remove(start, length).unwrap_err();
            assert!(
                matches!(error, Error::OutOfRange { parameter, .. } if parameter == parameter_name),
                "remove({start}, {length}) returned {error:?}"
            );
        }

        assert_eq!(builder.into_string(), "abc");
    }

    #[test]
    fn fmt_write_appends() {
        let mut builder = TextBuilder::default();

        write!(builder, "{}-{:>3}", 7, 'x').unwrap();
        builder.write_char('\u{1F600}').unwrap();

        assert_eq!(builder.into_string(), "7-  x\u{1F600}");
    }
}
