use std::num::NonZero;

use crate::CharPool;

const DEFAULT_ARRAYS_PER_TIER: usize = 32;
const DEFAULT_MAX_ARRAY_LENGTH: usize = 1 << 20;

/// Builder for creating an instance of [`CharPool`].
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
///
/// use pooled_text::CharPool;
///
/// let pool = CharPool::builder()
///     .arrays_per_tier(NonZero::new(8).unwrap())
///     .max_array_length(NonZero::new(4096).unwrap())
///     .build();
///
/// assert_eq!(pool.arrays_per_tier().get(), 8);
/// assert_eq!(pool.max_array_length(), 4096);
/// ```
#[derive(Debug)]
#[must_use]
pub struct CharPoolBuilder {
    arrays_per_tier: NonZero<usize>,
    max_array_length: NonZero<usize>,
}

impl CharPoolBuilder {
    pub(crate) fn new() -> Self {
        Self {
            arrays_per_tier: NonZero::new(DEFAULT_ARRAYS_PER_TIER)
                .expect("default is a non-zero constant"),
            max_array_length: NonZero::new(DEFAULT_MAX_ARRAY_LENGTH)
                .expect("default is a non-zero constant"),
        }
    }

    /// Sets how many idle arrays each size tier may cache.
    ///
    /// Returned arrays beyond this limit are released to the allocator. Defaults to 32.
    pub fn arrays_per_tier(mut self, count: NonZero<usize>) -> Self {
        self.arrays_per_tier = count;
        self
    }

    /// Sets the length of the largest array the pool will cache.
    ///
    /// The value is rounded up to the next size tier (a power of two, at least 16). Longer
    /// arrays can still be rented but are allocated and released without caching.
    /// Defaults to 1 048 576 UTF-16 code units.
    pub fn max_array_length(mut self, length: NonZero<usize>) -> Self {
        self.max_array_length = length;
        self
    }

    /// Builds the [`CharPool`] with the configured settings.
    ///
    /// The new pool starts out empty; arrays are allocated on demand.
    #[must_use]
    pub fn build(self) -> CharPool {
        CharPool::new_inner(self.arrays_per_tier, self.max_array_length.get())
    }
}
