//! Ordered key-value map backed by a left-leaning red-black tree.
//!
//! All nodes of an [`Llrb`] instance live in a pool owned by that
//! instance. Deleted entries give their slot back to the pool and the
//! next insert reuses it, so workloads that churn keys settle into a
//! fixed memory footprint.
//!
//! ```
//! use llrb_map::Llrb;
//!
//! let mut index: Llrb<u64, &str> = Llrb::new("example");
//! index.set(20, "twenty");
//! index.set(10, "ten");
//! assert_eq!(index.floor(&15), Ok(&"ten"));
//! assert_eq!(index.ceil(&15), Ok(&"twenty"));
//! assert_eq!(index.delete(&10), Some("ten"));
//! assert!(index.validate().is_ok());
//! ```

mod depth;
mod error;
mod llrb;
mod pool;
mod render;

pub use crate::depth::Depth;
pub use crate::error::Error;
pub use crate::llrb::{Llrb, Stats};

#[cfg(test)]
mod depth_test;
#[cfg(test)]
mod pool_test;
