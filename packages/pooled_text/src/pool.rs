use std::iter;
use std::num::NonZero;
use std::sync::LazyLock;

use crossbeam_queue::ArrayQueue;
use tracing::{debug, trace};

use crate::{CharPoolBuilder, PooledChars};

/// Length of the arrays in the smallest size tier. Every tier doubles the length of the previous.
pub(crate) const MIN_TIER_LENGTH: usize = 16;

// Created on first use and never torn down.
static SHARED: LazyLock<CharPool> = LazyLock::new(|| CharPool::builder().build());

/// A thread-safe cache of reusable UTF-16 character arrays, organized in size tiers.
///
/// Arrays are rented with [`rent()`][Self::rent] and are returned to the pool automatically
/// when the [`PooledChars`] handle is dropped. Renting rounds the requested length up to the
/// next power of two (minimum 16), so a rented array is often longer than requested.
///
/// Each tier caches a bounded number of idle arrays in a lock-free queue. Arrays that do not fit
/// into the cache (because the tier is full or because they are longer than the largest tier)
/// are simply released to the allocator.
///
/// Most users do not need their own pool: [`CharPool::shared()`] returns a process-wide instance
/// used by default by [`TextBuilder`][crate::TextBuilder].
///
/// # Example
///
/// ```rust
/// use std::num::NonZero;
///
/// use pooled_text::CharPool;
///
/// let pool = CharPool::builder()
///     .arrays_per_tier(NonZero::new(4).unwrap())
///     .build();
///
/// let chars = pool.rent(100);
/// assert_eq!(chars.len(), 128);
///
/// drop(chars);
/// assert_eq!(pool.idle_arrays(), 1);
/// ```
///
/// # Thread safety
///
/// The pool is [`Send`] + [`Sync`]. Any number of threads may rent from and return to the same
/// pool concurrently.
#[derive(Debug)]
pub struct CharPool {
    /// Index `i` holds idle arrays of length `MIN_TIER_LENGTH << i`.
    tiers: Box<[ArrayQueue<Box<[u16]>>]>,

    /// Length of the arrays in the largest tier. Requests above this are not pooled.
    max_array_length: usize,

    arrays_per_tier: NonZero<usize>,
}

impl CharPool {
    /// Creates a builder for configuring and constructing a [`CharPool`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::num::NonZero;
    ///
    /// use pooled_text::CharPool;
    ///
    /// let pool = CharPool::builder()
    ///     .max_array_length(NonZero::new(1000).unwrap())
    ///     .build();
    ///
    /// // Rounded up to the size tier that can hold 1000 units.
    /// assert_eq!(pool.max_array_length(), 1024);
    /// ```
    #[inline]
    pub fn builder() -> CharPoolBuilder {
        CharPoolBuilder::new()
    }

    /// The process-wide pool shared by all builders that were not given a pool explicitly.
    #[must_use]
    #[inline]
    pub fn shared() -> &'static Self {
        &SHARED
    }

    #[must_use]
    pub(crate) fn new_inner(arrays_per_tier: NonZero<usize>, max_array_length: usize) -> Self {
        let max_array_length = tier_length(tier_index(max_array_length));

        let tier_count = tier_index(max_array_length)
            .checked_add(1)
            .expect("tier count cannot overflow - there are at most usize::BITS tiers");

        let tiers = iter::repeat_with(|| ArrayQueue::new(arrays_per_tier.get()))
            .take(tier_count)
            .collect();

        Self {
            tiers,
            max_array_length,
            arrays_per_tier,
        }
    }

    /// Rents an array of at least `min_length` UTF-16 code units.
    ///
    /// The contents of the array are unspecified; they may contain data written by a previous
    /// renter. The array is returned to the pool when the handle is dropped.
    ///
    /// A request for zero units returns an empty array that does not involve the pool.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pooled_text::CharPool;
    ///
    /// let chars = CharPool::shared().rent(20);
    /// assert!(chars.len() >= 20);
    /// ```
    #[must_use]
    pub fn rent(&self, min_length: usize) -> PooledChars<'_> {
        if min_length == 0 {
            return PooledChars::new(self, Box::default());
        }

        if min_length > self.max_array_length {
            debug!(
                min_length,
                max_array_length = self.max_array_length,
                "renting array above largest pool tier; it will not be cached on return"
            );

            return PooledChars::new(self, allocate(min_length));
        }

        let index = tier_index(min_length);

        let cached = self.tiers.get(index).and_then(ArrayQueue::pop);

        let chars = cached.unwrap_or_else(|| {
            let length = tier_length(index);
            trace!(length, "pool tier empty, allocating new array");
            allocate(length)
        });

        PooledChars::new(self, chars)
    }

    /// Takes back an array previously handed out by [`rent()`][Self::rent].
    pub(crate) fn give_back(&self, chars: Box<[u16]>) {
        let length = chars.len();

        if length == 0 || length > self.max_array_length {
            return;
        }

        let index = tier_index(length);

        if tier_length(index) != length {
            trace!(length, "discarding array that does not match any pool tier");
            return;
        }

        let Some(tier) = self.tiers.get(index) else {
            return;
        };

        if tier.push(chars).is_err() {
            trace!(length, "pool tier is full, discarding returned array");
        }
    }

    /// The number of arrays currently cached in the pool, waiting to be rented.
    ///
    /// Under concurrent use this is a snapshot that may be stale by the time it is read.
    #[must_use]
    pub fn idle_arrays(&self) -> usize {
        self.tiers.iter().map(ArrayQueue::len).sum()
    }

    /// The maximum number of idle arrays cached per size tier.
    #[must_use]
    #[inline]
    pub fn arrays_per_tier(&self) -> NonZero<usize> {
        self.arrays_per_tier
    }

    /// The length of the arrays in the largest size tier.
    ///
    /// Longer arrays can still be rented but are never cached.
    #[must_use]
    #[inline]
    pub fn max_array_length(&self) -> usize {
        self.max_array_length
    }
}

/// Index of the smallest tier whose arrays can hold `length` units.
fn tier_index(length: usize) -> usize {
    let rounded = length
        .max(MIN_TIER_LENGTH)
        .checked_next_power_of_two()
        .expect("array length cannot exceed half of the address space");

    let shift = rounded
        .trailing_zeros()
        .checked_sub(MIN_TIER_LENGTH.trailing_zeros())
        .expect("rounded length is at least MIN_TIER_LENGTH");

    usize::try_from(shift).expect("bit shift always fits in usize")
}

fn tier_length(index: usize) -> usize {
    let shift = u32::try_from(index).expect("tier index is always below usize::BITS");

    MIN_TIER_LENGTH
        .checked_shl(shift)
        .expect("tier length cannot exceed the address space")
}

fn allocate(length: usize) -> Box<[u16]> {
    vec![0; length].into_boxed_slice()
}
