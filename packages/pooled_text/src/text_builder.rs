use std::fmt;
use std::mem;

use tracing::trace;

use crate::error::non_negative;
use crate::{CharPool, Error, PooledChars, Result};

/// The largest capacity a [`TextBuilder`] will ever grow to, in UTF-16 code units.
pub const MAX_CAPACITY: usize = 0x7FFF_FFC7;

/// Where the builder's characters live.
enum Store<'a> {
    /// Caller-owned memory. Never returned anywhere; simply forgotten on growth.
    Fixed(&'a mut [u16]),

    /// Rented from a pool, returned when dropped.
    Pooled(PooledChars<'a>),
}

impl Store<'_> {
    fn chars(&self) -> &[u16] {
        match self {
            Self::Fixed(chars) => chars,
            Self::Pooled(chars) => chars,
        }
    }

    fn chars_mut(&mut self) -> &mut [u16] {
        match self {
            Self::Fixed(chars) => chars,
            Self::Pooled(chars) => chars,
        }
    }
}

/// A growable buffer for assembling UTF-16 text with minimal allocation.
///
/// A builder starts out either on caller-provided memory ([`new_fixed()`][Self::new_fixed]),
/// which involves no allocation at all, or on an array rented from a [`CharPool`]
/// ([`with_capacity()`][Self::with_capacity]). When the current store runs out of room, the
/// builder rents a larger array (at least double the size), moves the content over and returns
/// the previous array to the pool if it was rented.
///
/// Text is appended via the `append_*` methods, via [`format_into()`][Self::format_into] for
/// composite format strings such as `"{0,-10}|{1:X4}"`, or via [`std::fmt::Write`].
///
/// A builder is finished by one of the consuming methods [`into_string()`][Self::into_string],
/// [`into_utf16()`][Self::into_utf16] or [`try_copy_into()`][Self::try_copy_into]. Dropping the
/// builder without finishing it also returns any rented array to the pool.
///
/// # Examples
///
/// ```rust
/// use pooled_text::TextBuilder;
///
/// let mut builder = TextBuilder::with_capacity(16);
/// builder.append_str("Hello");
/// builder.append_char(u16::from(b','));
/// builder.append_str(" world");
///
/// assert_eq!(builder.len(), 12);
/// assert_eq!(builder.into_string(), "Hello, world");
/// ```
///
/// Starting on stack memory and spilling over into the pool once it is full:
///
/// ```rust
/// use pooled_text::TextBuilder;
///
/// let mut stack = [0_u16; 4];
/// let mut builder = TextBuilder::new_fixed(&mut stack);
///
/// builder.append_str("tiny");
/// assert_eq!(builder.capacity(), 4);
///
/// builder.append_str(" no more");
/// assert!(builder.capacity() >= 12);
///
/// assert_eq!(builder.into_string(), "tiny no more");
/// ```
///
/// # Thread safety
///
/// A builder is a move-only value: it can be sent to another thread but never shared, and it
/// cannot be cloned. Two builders can therefore never refer to the same rented array.
pub struct TextBuilder<'a> {
    pool: &'a CharPool,

    store: Store<'a>,

    /// Number of code units written. Always `<= store.chars().len()`.
    position: usize,
}

impl<'a> TextBuilder<'a> {
    /// Creates a builder that writes into `initial` until it runs out of room, then continues in
    /// arrays rented from the shared pool.
    ///
    /// No allocation takes place until the view is exhausted.
    #[must_use]
    pub fn new_fixed(initial: &'a mut [u16]) -> Self {
        Self::new_fixed_in(initial, CharPool::shared())
    }

    /// Creates a builder that writes into `initial` until it runs out of room, then continues in
    /// arrays rented from `pool`.
    #[must_use]
    pub fn new_fixed_in(initial: &'a mut [u16], pool: &'a CharPool) -> Self {
        Self {
            pool,
            store: Store::Fixed(initial),
            position: 0,
        }
    }

    /// Creates a builder in `pool` with room for at least `capacity` code units.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_CAPACITY`].
    #[must_use]
    pub fn with_capacity_in(capacity: usize, pool: &'a CharPool) -> Self {
        assert!(
            capacity <= MAX_CAPACITY,
            "text builder capacity cannot exceed {MAX_CAPACITY} code units; \
             {capacity} were requested"
        );

        Self {
            pool,
            store: Store::Pooled(pool.rent(capacity)),
            position: 0,
        }
    }

    /// The number of UTF-16 code units in the builder.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.position
    }

    /// Whether the builder contains no text.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.position == 0
    }

    /// Moves the end of the text to `length`.
    ///
    /// Shrinking truncates the text. Growing (up to the capacity) exposes whatever the store
    /// contains beyond the current end, which may be stale data from a previous renter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] naming `"length"` if `length` is negative or greater than
    /// the capacity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pooled_text::TextBuilder;
    ///
    /// let mut builder = TextBuilder::with_capacity(8);
    /// builder.append_str("abcdef");
    ///
    /// builder.set_len(3).unwrap();
    /// assert_eq!(builder.into_string(), "abc");
    /// ```
    pub fn set_len(&mut self, length: isize) -> Result<()> {
        let new_position = non_negative("length", length)?;

        if new_position > self.capacity() {
            return Err(Error::out_of_range(
                "length",
                length,
                "must not exceed the capacity",
            ));
        }

        self.position = new_position;
        Ok(())
    }

    /// The number of code units the builder can hold without growing.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.chars().len()
    }

    /// The pool this builder rents from when it needs to grow.
    #[must_use]
    #[inline]
    pub fn pool(&self) -> &'a CharPool {
        self.pool
    }

    /// Whether the builder currently holds an array rented from its pool, as opposed to
    /// caller-provided memory.
    #[must_use]
    #[inline]
    pub fn is_pooled(&self) -> bool {
        matches!(self.store, Store::Pooled(_))
    }

    /// Returns a mutable reference to the code unit at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] naming `"index"` unless `0 <= index < len()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pooled_text::TextBuilder;
    ///
    /// let mut builder = TextBuilder::with_capacity(4);
    /// builder.append_str("cat");
    ///
    /// *builder.get_mut(0).unwrap() = u16::from(b'b');
    /// assert_eq!(builder.into_string(), "bat");
    /// ```
    pub fn get_mut(&mut self, index: isize) -> Result<&mut u16> {
        let position = self.position;

        usize::try_from(index)
            .ok()
            .filter(|index| *index < position)
            .and_then(|index| self.store.chars_mut().get_mut(index))
            .ok_or_else(|| Error::out_of_range("index", index, "must be within the text"))
    }

    /// The entire backing store, including the unused capacity beyond [`len()`][Self::len].
    #[must_use]
    #[inline]
    pub fn raw_chars(&mut self) -> &mut [u16] {
        self.store.chars_mut()
    }

    /// The text written so far.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "position never exceeds the store length"
    )]
    pub fn as_view(&self) -> &[u16] {
        &self.store.chars()[..self.position]
    }

    /// The text written so far, starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] naming `"start"` if `start` is negative or greater than
    /// [`len()`][Self::len].
    pub fn as_view_from(&self, start: isize) -> Result<&[u16]> {
        let offset = non_negative("start", start)?;

        self.as_view()
            .get(offset..)
            .ok_or_else(|| Error::out_of_range("start", start, "must not exceed the length"))
    }

    /// `length` code units of the text written so far, starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] naming `"start"` or `"length"` if either is negative or the
    /// range does not lie within the text.
    pub fn as_view_range(&self, start: isize, length: isize) -> Result<&[u16]> {
        let count = non_negative("length", length)?;
        let view = self.as_view_from(start)?;

        view.get(..count)
            .ok_or_else(|| Error::out_of_range("length", length, "range must lie within the text"))
    }

    /// The text written so far, optionally guaranteeing that a NUL code unit follows it in the
    /// store (for handing the text to APIs that expect NUL termination).
    ///
    /// The terminator is not part of the text and does not change [`len()`][Self::len]. The
    /// builder grows if there is no room for it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pooled_text::TextBuilder;
    ///
    /// let mut stack = [u16::MAX; 2];
    /// let mut builder = TextBuilder::new_fixed(&mut stack);
    /// builder.append_str("ab");
    ///
    /// let view = builder.as_view_terminated(true);
    /// assert_eq!(view.len(), 2);
    /// assert_eq!(builder.raw_chars()[2], 0);
    /// ```
    pub fn as_view_terminated(&mut self, terminate: bool) -> &[u16] {
        if terminate {
            let end = self.position;
            self.reserve_exact(1);

            if let Some(slot) = self.store.chars_mut().get_mut(end) {
                *slot = 0;
            }
        }

        self.as_view()
    }

    /// Ensures the builder can hold at least `capacity` code units without growing.
    ///
    /// Does nothing if the capacity is already sufficient.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] naming `"capacity"` if `capacity` is negative.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_CAPACITY`].
    pub fn ensure_capacity(&mut self, capacity: isize) -> Result<()> {
        let capacity = non_negative("capacity", capacity)?;

        if capacity > self.capacity() {
            // capacity > self.capacity() >= position, so this cannot underflow.
            let additional = capacity
                .checked_sub(self.position)
                .expect("position never exceeds the capacity");
            self.grow(additional);
        }

        Ok(())
    }

    /// Grows the store if it cannot take `additional` more code units after the current
    /// position.
    pub(crate) fn reserve_exact(&mut self, additional: usize) {
        if additional > self.remaining() {
            self.grow(additional);
        }
    }

    /// Number of unused code units after the current position.
    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.capacity()
            .checked_sub(self.position)
            .expect("position never exceeds the capacity")
    }

    /// Unused capacity after the current position.
    #[expect(
        clippy::indexing_slicing,
        reason = "position never exceeds the store length"
    )]
    pub(crate) fn unused_mut(&mut self) -> &mut [u16] {
        let position = self.position;
        &mut self.store.chars_mut()[position..]
    }

    /// Advances the position over `count` code units that the caller has already written into
    /// [`unused_mut()`][Self::unused_mut].
    pub(crate) fn advance(&mut self, count: usize) {
        debug_assert!(count <= self.remaining());

        self.position = self
            .position
            .checked_add(count)
            .expect("advanced position stays within the capacity");
    }

    /// Moves the end of the text back to `length`, which must not exceed the current length.
    pub(crate) fn truncate(&mut self, length: usize) {
        debug_assert!(length <= self.position);

        self.position = length;
    }

    /// Moves the content into a larger rented array.
    ///
    /// Must only be called when `position + additional > capacity`.
    ///
    /// # Panics
    ///
    /// Panics if the required capacity exceeds [`MAX_CAPACITY`].
    #[cold]
    #[expect(
        clippy::indexing_slicing,
        reason = "position never exceeds either store and the new store is at least as large"
    )]
    pub(crate) fn grow(&mut self, additional: usize) {
        let required = self
            .position
            .checked_add(additional)
            .filter(|required| *required <= MAX_CAPACITY)
            .unwrap_or_else(|| {
                panic!(
                    "text builder capacity cannot exceed {MAX_CAPACITY} code units; \
                     {} are in use and {additional} more were requested",
                    self.position
                )
            });

        debug_assert!(
            required > self.capacity(),
            "grow called but the existing capacity is sufficient"
        );

        let doubled = self.capacity().saturating_mul(2).min(MAX_CAPACITY);
        let new_capacity = required.max(doubled);

        trace!(
            old_capacity = self.capacity(),
            new_capacity,
            length = self.position,
            "growing text builder"
        );

        let mut chars = self.pool.rent(new_capacity);
        chars[..self.position].copy_from_slice(&self.store.chars()[..self.position]);

        // The new rental is adopted before the old one goes back to the pool.
        let previous = mem::replace(&mut self.store, Store::Pooled(chars));
        drop(previous);
    }

    /// Finishes the builder, returning its text as a `String`.
    ///
    /// Unpaired surrogates are replaced with U+FFFD. Any rented array is returned to the pool.
    #[must_use]
    pub fn into_string(self) -> String {
        String::from_utf16_lossy(self.as_view())
    }

    /// Finishes the builder, returning its text as UTF-16 code units.
    ///
    /// Any rented array is returned to the pool.
    #[must_use]
    pub fn into_utf16(self) -> Vec<u16> {
        self.as_view().to_vec()
    }

    /// Finishes the builder by copying its text into `destination`, if it fits.
    ///
    /// Returns whether the text was copied and how many code units were written (zero if it did
    /// not fit). Any rented array is returned to the pool either way.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pooled_text::TextBuilder;
    ///
    /// let mut builder = TextBuilder::with_capacity(8);
    /// builder.append_str("abc");
    ///
    /// let mut destination = [0_u16; 5];
    /// assert_eq!(builder.try_copy_into(&mut destination), (true, 3));
    /// ```
    pub fn try_copy_into(self, destination: &mut [u16]) -> (bool, usize) {
        let text = self.as_view();

        destination
            .get_mut(..text.len())
            .map_or((false, 0), |target| {
                target.copy_from_slice(text);
                (true, text.len())
            })
    }
}

impl TextBuilder<'static> {
    /// Creates a builder in the shared pool with room for at least `capacity` code units.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_CAPACITY`].
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, CharPool::shared())
    }
}

impl Default for TextBuilder<'_> {
    /// An empty builder with no store; the first append rents from the shared pool.
    fn default() -> Self {
        Self {
            pool: CharPool::shared(),
            store: Store::Fixed(&mut []),
            position: 0,
        }
    }
}

impl fmt::Debug for TextBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuilder")
            .field("len", &self.position)
            .field("capacity", &self.capacity())
            .field("pooled", &self.is_pooled())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for TextBuilder<'_> {
    /// Writes the text, replacing unpaired surrogates with U+FFFD.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        char::decode_utf16(self.as_view().iter().copied())
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .try_for_each(|c| fmt::Write::write_char(f, c))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::num::NonZero;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    assert_impl_all!(TextBuilder<'static>: Send, Sync, fmt::Debug, fmt::Display, Default);
    assert_not_impl_any!(TextBuilder<'static>: Clone, Copy);

    fn private_pool() -> CharPool {
        CharPool::builder()
            .arrays_per_tier(NonZero::new(4).unwrap())
            .build()
    }

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn new_fixed_uses_view_capacity() {
        let mut stack = [0_u16; 2];
        let builder = TextBuilder::new_fixed(&mut stack);

        assert_eq!(builder.capacity(), 2);
        assert!(builder.is_empty());
        assert!(!builder.is_pooled());
    }

    #[test]
    fn with_capacity_rents_at_least_requested() {
        let builder = TextBuilder::with_capacity(2);

        assert!(builder.capacity() >= 2);
        assert!(builder.is_pooled());
    }

    #[test]
    fn default_has_no_store() {
        let builder = TextBuilder::default();

        assert_eq!(builder.capacity(), 0);
        assert_eq!(builder.len(), 0);
        assert_eq!(builder.into_string(), "");
    }

    #[test]
    fn set_len_within_capacity() {
        let mut stack = [0_u16; 2];
        let mut builder = TextBuilder::new_fixed(&mut stack);

        builder.set_len(1).unwrap();

        assert_eq!(builder.len(), 1);
        assert_eq!(builder.capacity(), 2);
    }

    #[test]
    fn set_len_out_of_range_is_error() {
        let mut builder = TextBuilder::default();

        for length in [-1, 1] {
            let error = builder.set_len(length).unwrap_err();
            assert!(matches!(
                error,
                Error::OutOfRange {
                    parameter: "length",
                    value,
                    ..
                } if value == length
            ));
        }
    }

    #[test]
    fn get_mut_reads_and_writes() {
        let mut builder = TextBuilder::with_capacity(3);
        builder.append_str("abc");

        assert_eq!(*builder.get_mut(1).unwrap(), u16::from(b'b'));

        *builder.get_mut(2).unwrap() = u16::from(b'x');
        assert_eq!(builder.into_string(), "abx");
    }

    #[test]
    fn get_mut_rejects_index_at_or_past_length() {
        let mut builder = TextBuilder::with_capacity(16);
        builder.append_str("ab");

        for index in [-1, 2, 3] {
            assert!(matches!(
                builder.get_mut(index),
                Err(Error::OutOfRange {
                    parameter: "index",
                    ..
                })
            ));
        }
    }

    #[test]
    fn ensure_capacity_grows_only_when_needed() {
        let mut builder = TextBuilder::with_capacity(2);
        let before = builder.capacity();

        builder.ensure_capacity(2).unwrap();
        assert_eq!(builder.capacity(), before);

        builder.ensure_capacity(200).unwrap();
        assert!(builder.capacity() >= 200);
    }

    #[test]
    fn ensure_capacity_negative_is_error() {
        let mut builder = TextBuilder::default();

        let error = builder.ensure_capacity(-1).unwrap_err();

        assert_eq!(
            error,
            Error::OutOfRange {
                parameter: "capacity",
                value: -1,
                problem: "must be non-negative",
            }
        );
    }

    #[test]
    fn growth_preserves_content_and_returns_previous_rental() {
        let pool = private_pool();
        let mut builder = TextBuilder::with_capacity_in(16, &pool);

        builder.append_str("0123456789abcdef");
        assert_eq!(builder.capacity(), 16);
        assert_eq!(pool.idle_arrays(), 0);

        builder.append_char(u16::from(b'!'));

        assert_eq!(builder.capacity(), 32);
        assert_eq!(pool.idle_arrays(), 1);
        assert_eq!(builder.as_view(), utf16("0123456789abcdef!").as_slice());

        drop(builder);
        assert_eq!(pool.idle_arrays(), 2);
    }

    #[test]
    fn growth_from_fixed_view_does_not_touch_pool_on_release() {
        let pool = private_pool();
        let mut stack = [0_u16; 3];
        let mut builder = TextBuilder::new_fixed_in(&mut stack, &pool);

        builder.append_str("abcd");

        assert!(builder.is_pooled());
        assert_eq!(pool.idle_arrays(), 0);
        assert_eq!(builder.into_string(), "abcd");
        assert_eq!(pool.idle_arrays(), 1);
    }

    #[test]
    fn growth_at_least_doubles() {
        let mut stack = [0_u16; 20];
        let mut builder = TextBuilder::new_fixed(&mut stack);

        builder.append_repeated(u16::from(b'a'), 20);
        builder.append_char(u16::from(b'b'));

        assert!(builder.capacity() >= 40);
    }

    #[test]
    #[should_panic(expected = "capacity cannot exceed")]
    fn growth_beyond_max_capacity_panics() {
        let mut builder = TextBuilder::default();
        builder.grow(MAX_CAPACITY + 1);
    }

    #[test]
    fn as_view_variants() {
        let mut builder = TextBuilder::with_capacity(8);
        builder.append_str("hello");

        assert_eq!(builder.as_view(), utf16("hello").as_slice());
        assert_eq!(builder.as_view_from(3).unwrap(), utf16("lo").as_slice());
        assert_eq!(builder.as_view_from(5).unwrap(), &[] as &[u16]);
        assert_eq!(builder.as_view_range(1, 3).unwrap(), utf16("ell").as_slice());

        assert!(matches!(
            builder.as_view_from(6),
            Err(Error::OutOfRange {
                parameter: "start",
                ..
            })
        ));
        assert!(matches!(
            builder.as_view_range(2, 4),
            Err(Error::OutOfRange {
                parameter: "length",
                ..
            })
        ));
    }

    #[test]
    fn as_view_rejects_negative_inputs() {
        let mut builder = TextBuilder::with_capacity(8);
        builder.append_str("hello");

        assert_eq!(
            builder.as_view_from(-1),
            Err(Error::OutOfRange {
                parameter: "start",
                value: -1,
                problem: "must be non-negative",
            })
        );
        assert_eq!(
            builder.as_view_range(-2, 1),
            Err(Error::OutOfRange {
                parameter: "start",
                value: -2,
                problem: "must be non-negative",
            })
        );
        assert_eq!(
            builder.as_view_range(1, -3),
            Err(Error::OutOfRange {
                parameter: "length",
                value: -3,
                problem: "must be non-negative",
            })
        );
        assert_eq!(
            builder.as_view_range(-1, -1),
            Err(Error::OutOfRange {
                parameter: "length",
                value: -1,
                problem: "must be non-negative",
            })
        );

        assert_eq!(builder.into_string(), "hello");
    }

    #[test]
    #[should_panic(expected = "capacity cannot exceed")]
    fn with_capacity_beyond_max_capacity_panics() {
        let pool = CharPool::builder().build();
        drop(TextBuilder::with_capacity_in(MAX_CAPACITY + 1, &pool));
    }

    #[test]
    #[should_panic(expected = "capacity cannot exceed")]
    fn shared_with_capacity_beyond_max_capacity_panics() {
        drop(TextBuilder::with_capacity(usize::MAX));
    }

    #[test]
    fn as_view_terminated_grows_for_terminator() {
        let mut stack = [7_u16; 2];
        let mut builder = TextBuilder::new_fixed(&mut stack);
        builder.append_str("ab");

        let view = builder.as_view_terminated(true).to_vec();

        assert_eq!(view, utf16("ab"));
        assert_eq!(builder.len(), 2);
        assert!(builder.capacity() >= 3);
        assert_eq!(builder.raw_chars()[2], 0);
    }

    #[test]
    fn as_view_terminated_false_leaves_store_alone() {
        let mut stack = [7_u16; 3];
        let mut builder = TextBuilder::new_fixed(&mut stack);
        builder.append_str("ab");

        let view = builder.as_view_terminated(false).to_vec();

        assert_eq!(view, utf16("ab"));
        assert_eq!(builder.raw_chars()[2], 7);
    }

    #[test]
    fn into_utf16_returns_code_units() {
        let mut builder = TextBuilder::with_capacity(4);
        builder.append_scalar('\u{1F600}');

        assert_eq!(builder.into_utf16(), vec![0xD83D, 0xDE00]);
    }

    #[test]
    fn into_string_replaces_unpaired_surrogates() {
        let mut builder = TextBuilder::with_capacity(4);
        builder.append_char(0xD800);
        builder.append_char(u16::from(b'a'));

        assert_eq!(builder.into_string(), "\u{FFFD}a");
    }

    #[test]
    fn try_copy_into_copies_when_it_fits() {
        let pool = private_pool();
        let mut builder = TextBuilder::with_capacity_in(4, &pool);
        builder.append_str("abc");

        let mut destination = [0_u16; 3];
        assert_eq!(builder.try_copy_into(&mut destination), (true, 3));
        assert_eq!(destination.as_slice(), utf16("abc").as_slice());
        assert_eq!(pool.idle_arrays(), 1);
    }

    #[test]
    fn try_copy_into_releases_even_when_too_small() {
        let pool = private_pool();
        let mut builder = TextBuilder::with_capacity_in(4, &pool);
        builder.append_str("abc");

        let mut destination = [0_u16; 2];
        assert_eq!(builder.try_copy_into(&mut destination), (false, 0));
        assert_eq!(destination, [0, 0]);
        assert_eq!(pool.idle_arrays(), 1);
    }

    #[test]
    fn display_and_debug() {
        let mut builder = TextBuilder::with_capacity(4);
        builder.append_str("hey");

        assert_eq!(builder.to_string(), "hey");

        let debug = format!("{builder:?}");
        assert!(debug.contains("len: 3"));
        assert!(debug.contains("pooled: true"));
    }
}
