#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A growable UTF-16 text builder that assembles text in pooled character arrays.
//!
//! This crate provides [`TextBuilder`], a buffer of UTF-16 code units that starts out either on
//! caller-provided memory or on an array rented from a [`CharPool`], and grows into larger rented
//! arrays as needed. Once the text is assembled, the builder is finished into a `String`, a
//! `Vec<u16>` or a caller-provided slice, and its array goes back to the pool for the next
//! builder to reuse.
//!
//! # Key Features
//!
//! - **Zero-allocation start**: Begin on a stack array and only touch the pool once it is full
//! - **Amortized growth**: Capacity at least doubles on each growth step
//! - **Array reuse**: Rented arrays are cached in size tiers of a lock-free, thread-safe pool
//! - **Move-only handles**: A rented array has exactly one owner and is returned exactly once
//! - **Editing**: Insert and remove text anywhere, not only at the end
//! - **Surrogate pairs**: Scalar values outside the Basic Multilingual Plane are encoded for you
//! - **Composite formatting**: Expand templates like `"{0,-10}|{1,8:N2}"` directly into the
//!   builder, with arguments writing themselves into the unused capacity where possible
//! - **Culture hooks**: Number symbols and custom formatters come from a [`FormatProvider`]
//!
//! # Examples
//!
//! ## Appending and editing
//!
//! ```rust
//! use pooled_text::TextBuilder;
//!
//! let mut builder = TextBuilder::with_capacity(32);
//! builder.append_str("Hello world");
//! builder.insert_str(5, ",").unwrap();
//! builder.append_scalar('🌍');
//!
//! assert_eq!(builder.into_string(), "Hello, world🌍");
//! ```
//!
//! ## Composite formatting
//!
//! ```rust
//! use pooled_text::{NumberFormat, TextBuilder};
//!
//! let mut stack = [0_u16; 64];
//! let mut builder = TextBuilder::new_fixed(&mut stack);
//!
//! let german = NumberFormat::new(',', '.', '-');
//! let total = 1234.5_f64;
//!
//! builder
//!     .format_into(Some(&german), "{0,-6}{1,10:N2}", &["Total".into(), (&total).into()])
//!     .unwrap();
//!
//! assert_eq!(builder.into_string(), "Total   1.234,50");
//! ```
//!
//! ## A private pool
//!
//! ```rust
//! use std::num::NonZero;
//!
//! use pooled_text::{CharPool, TextBuilder};
//!
//! let pool = CharPool::builder()
//!     .arrays_per_tier(NonZero::new(8).unwrap())
//!     .build();
//!
//! let mut builder = TextBuilder::with_capacity_in(100, &pool);
//! builder.append_str("rented");
//! let text = builder.into_string();
//!
//! assert_eq!(text, "rented");
//! assert_eq!(pool.idle_arrays(), 1);
//! ```

mod append;
mod error;
mod format;
mod formatting;
mod pool;
mod pool_builder;
mod pooled_chars;
mod primitives;
mod text_builder;

pub use error::*;
pub use formatting::{
    Argument, CustomFormatter, FormatProvider, Formattable, NumberFormat, SpanFormattable,
};
pub use pool::CharPool;
pub use pool_builder::CharPoolBuilder;
pub use pooled_chars::PooledChars;
pub use text_builder::{MAX_CAPACITY, TextBuilder};
