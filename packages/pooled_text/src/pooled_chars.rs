use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};

use crate::CharPool;

/// Exclusive handle to an array of UTF-16 code units rented from a [`CharPool`].
///
/// The handle cannot be copied or cloned, so every rented array has exactly one owner. Dropping
/// the handle returns the array to the pool it was rented from; this is the only place where
/// a rental is released, which makes double-return impossible.
///
/// The handle dereferences to `[u16]` for direct access to the array.
///
/// # Example
///
/// ```rust
/// use pooled_text::CharPool;
///
/// let mut chars = CharPool::shared().rent(4);
/// chars[0] = u16::from(b'h');
/// chars[1] = u16::from(b'i');
///
/// assert_eq!(&chars[..2], &[u16::from(b'h'), u16::from(b'i')]);
/// // Returned to the shared pool here.
/// ```
pub struct PooledChars<'p> {
    pool: &'p CharPool,

    chars: Box<[u16]>,
}

impl<'p> PooledChars<'p> {
    #[must_use]
    pub(crate) fn new(pool: &'p CharPool, chars: Box<[u16]>) -> Self {
        Self { pool, chars }
    }

    /// The pool this array will be returned to.
    #[must_use]
    #[inline]
    pub fn pool(&self) -> &'p CharPool {
        self.pool
    }
}

impl Deref for PooledChars<'_> {
    type Target = [u16];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.chars
    }
}

impl DerefMut for PooledChars<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.chars
    }
}

impl Drop for PooledChars<'_> {
    fn drop(&mut self) {
        self.pool.give_back(mem::take(&mut self.chars));
    }
}

impl fmt::Debug for PooledChars<'_> {
    #[cfg_attr(test, mutants::skip)] // Debug output is not part of the contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledChars")
            .field("len", &self.chars.len())
            .finish_non_exhaustive()
    }
}
