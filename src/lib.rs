//! Presence – an optional container that remembers whether it was set.
//!
//! An [`Optional<T>`] pairs a value with a presence flag, so a value that was
//! explicitly set to `0`, `""` or `false` stays distinguishable from one
//! that was never set. Around it sits the machinery for moving such values
//! across untyped boundaries:
//! * scanning a wire [`Value`] (bool, f64, i64, text, bytes, timestamp or
//!   null) into a destination whose type is only known at run time,
//! * encoding a container back into a [`Value`] for a driver,
//! * serde hooks and rusqlite `FromSql`/`ToSql` implementations.
//!
//! ## Modules
//! * [`optional`] – The container, its constructors and transformations.
//! * [`destination`] – Resolves a scan target into a [`Slot`] of a known kind.
//! * [`assign`] – Scan entry points: null handling and the fast path.
//! * `coerce` – The typed rules, one set per source wire type.
//! * [`compare`] – Total ordering and sort helpers over containers.
//! * [`encode`] – The outbound [`Encode`] contract.
//! * [`value`] – The neutral wire [`Value`].
//! * `persist` – rusqlite glue.
//!
//! ## Coercion
//! A scan first checks for a null source, which empties the container. It
//! then tries the fast path, where source and destination share a
//! representation and the value is copied as is. Failing that, the rules for
//! the source's wire type decide whether the destination kind is legal and
//! how to convert; numeric destinations are range checked, textual sources
//! are parsed, and nothing is ever silently defaulted.
//!
//! ## Quick Start
//! ```
//! use presence::{Optional, ScanError};
//!
//! let mut small = Optional::<i8>::empty();
//! small.scan(123i64).unwrap();
//! assert_eq!(small.get(), (&123, true));
//!
//! let err = small.scan(i64::MAX).unwrap_err();
//! assert!(matches!(err, ScanError::Range { .. }));
//! // a failed scan leaves the container as it was
//! assert_eq!(small.require(), &123);
//!
//! small.scan(None::<i64>).unwrap();
//! assert!(small.is_empty());
//! ```

pub mod assign;
mod coerce;
pub mod compare;
pub mod destination;
pub mod encode;
pub mod error;
pub mod optional;
mod persist;
pub mod value;

pub use assign::{assign, assign_any, assign_direct};
pub use compare::{compare, Ordered};
pub use destination::{Destination, Indirect, Scanner, Slot};
pub use encode::Encode;
pub use error::{Result, ScanError};
pub use optional::{Nillable, Optional, EMPTY_TEXT};
pub use value::Value;
