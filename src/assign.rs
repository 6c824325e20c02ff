//! The scan entry points: null handling, the fast path, and hand-off to
//! the typed coercion rules.

use std::any::Any;

use tracing::trace;

use crate::coerce::coerce;
use crate::destination::{resolve_any, Destination, Slot};
use crate::error::Result;
use crate::value::Value;

/// Assigns `src` into `dst`.
///
/// Returns `Ok(true)` when a value was stored and `Ok(false)` for a null
/// source, which leaves the destination untouched.
pub fn assign<D: Destination + ?Sized>(src: &Value, dst: &mut D) -> Result<bool> {
    assign_slot(src, dst.slot())
}

/// Assigns `src` into a type-erased destination.
pub fn assign_any(src: &Value, dst: &mut dyn Any) -> Result<bool> {
    let slot = resolve_any(dst)?;
    assign_slot(src, slot)
}

/// Attempts only the zero-conversion assignment. Returns whether it applied;
/// when it did not, `dst` is untouched. A null source never applies, as
/// with [`assign`].
pub fn assign_direct<D: Destination + ?Sized>(src: &Value, dst: &mut D) -> bool {
    !src.is_null() && direct(src, dst.slot()).is_ok()
}

pub(crate) fn assign_slot(src: &Value, slot: Slot<'_>) -> Result<bool> {
    if src.is_null() {
        trace!(destination = slot.kind(), "null source, nothing assigned");
        return Ok(false);
    }
    let slot = match direct(src, slot) {
        Ok(()) => return Ok(true),
        Err(slot) => slot,
    };
    match slot {
        Slot::Indirect(pointer) => {
            trace!(wire = src.type_name(), destination = pointer.kind(), "assigning through pointer");
            pointer.assign_through(src)
        }
        Slot::Custom(scanner) => {
            trace!(wire = src.type_name(), "delegating to scanner");
            scanner.scan_from(src)?;
            Ok(true)
        }
        slot => {
            trace!(wire = src.type_name(), destination = slot.kind(), "coercing");
            coerce(src, slot)?;
            Ok(true)
        }
    }
}

// Hands the slot back when source and destination do not share a representation.
fn direct<'a>(src: &Value, slot: Slot<'a>) -> std::result::Result<(), Slot<'a>> {
    match (src, slot) {
        (Value::Bool(b), Slot::Bool(d)) => *d = *b,
        (Value::Int(i), Slot::I64(d)) => *d = *i,
        (Value::Float(x), Slot::F64(d)) => *d = *x,
        (Value::Text(s), Slot::Text(d)) => d.clone_from(s),
        // never let the destination alias the caller's buffer
        (Value::Bytes(b), Slot::Bytes(d)) => d.clone_from(b),
        (Value::Timestamp(t), Slot::Timestamp(d)) => *d = *t,
        (value, Slot::Any(d)) => d.clone_from(value),
        (_, slot) => return Err(slot),
    }
    trace!(wire = src.type_name(), "fast path");
    Ok(())
}
