//! Destination resolution.
//!
//! A scan target is anything implementing [`Destination`]. Resolving it
//! yields a [`Slot`], a closed set of destination kinds each carrying a
//! mutable reference to the storage that will receive the value. The
//! coercion rules only ever look at the slot, never at the concrete type.

use std::any::Any;

use chrono::{DateTime, Utc};

use crate::error::{Result, ScanError};
use crate::value::Value;

/// The resolved kind of a scan target together with its storage.
pub enum Slot<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Text(&'a mut String),
    Bytes(&'a mut Vec<u8>),
    Timestamp(&'a mut DateTime<Utc>),
    /// Untyped escape hatch, receives the source verbatim.
    Any(&'a mut Value),
    /// A pointer-like destination whose pointee is allocated on demand.
    Indirect(&'a mut dyn Indirect),
    /// A destination that scans itself.
    Custom(&'a mut dyn Scanner),
    /// A type that can be named as a destination but has no rules.
    Unsupported(&'static str),
}

impl Slot<'_> {
    /// Name of the destination kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Slot::Bool(_) => "bool",
            Slot::I8(_) => "i8",
            Slot::I16(_) => "i16",
            Slot::I32(_) => "i32",
            Slot::I64(_) => "i64",
            Slot::Isize(_) => "isize",
            Slot::U8(_) => "u8",
            Slot::U16(_) => "u16",
            Slot::U32(_) => "u32",
            Slot::U64(_) => "u64",
            Slot::Usize(_) => "usize",
            Slot::F32(_) => "f32",
            Slot::F64(_) => "f64",
            Slot::Text(_) => "String",
            Slot::Bytes(_) => "Vec<u8>",
            Slot::Timestamp(_) => "DateTime<Utc>",
            Slot::Any(_) => "Value",
            Slot::Indirect(pointer) => pointer.kind(),
            Slot::Custom(_) => "Scanner",
            Slot::Unsupported(kind) => *kind,
        }
    }
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Slot::I8(_)
                | Slot::I16(_)
                | Slot::I32(_)
                | Slot::I64(_)
                | Slot::Isize(_)
                | Slot::U8(_)
                | Slot::U16(_)
                | Slot::U32(_)
                | Slot::U64(_)
                | Slot::Usize(_)
        )
    }
    pub fn is_float(&self) -> bool {
        matches!(self, Slot::F32(_) | Slot::F64(_))
    }
}

/// Anything a value can be scanned into.
///
/// Newtypes over a supported primitive can opt in with
/// [`newtype_value!`](crate::newtype_value), which delegates to the
/// wrapped field's slot.
pub trait Destination {
    fn slot(&mut self) -> Slot<'_>;
}

/// Destinations that hold their target behind one level of indirection.
///
/// The pointee is built from its default, the source is assigned into it,
/// and only on success is it stored back. A failed assignment leaves the
/// destination as it was.
pub trait Indirect {
    fn assign_through(&mut self, src: &Value) -> Result<bool>;
    fn kind(&self) -> &'static str;
}

/// Destinations that take over scanning themselves. Whatever they report
/// is trusted by the engine.
pub trait Scanner {
    fn scan_from(&mut self, src: &Value) -> Result<()>;
}

macro_rules! primitive_destination {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl Destination for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::$variant(self)
                }
            }
        )+
    };
}

primitive_destination!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => Text,
    Vec<u8> => Bytes,
    DateTime<Utc> => Timestamp,
    Value => Any,
);

impl Destination for char {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("char")
    }
}
impl Destination for i128 {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("i128")
    }
}
impl Destination for u128 {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("u128")
    }
}

impl<T: Destination + Default> Destination for Option<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Indirect(self)
    }
}
impl<T: Destination + Default> Indirect for Option<T> {
    fn assign_through(&mut self, src: &Value) -> Result<bool> {
        let mut pointee = T::default();
        let assigned = crate::assign::assign(src, &mut pointee)?;
        if assigned {
            *self = Some(pointee);
        }
        Ok(assigned)
    }
    fn kind(&self) -> &'static str {
        "Option"
    }
}

impl<T: Destination + Default> Destination for Box<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Indirect(self)
    }
}
impl<T: Destination + Default> Indirect for Box<T> {
    fn assign_through(&mut self, src: &Value) -> Result<bool> {
        let mut pointee = Box::new(T::default());
        let assigned = crate::assign::assign(src, pointee.as_mut())?;
        if assigned {
            *self = pointee;
        }
        Ok(assigned)
    }
    fn kind(&self) -> &'static str {
        "Box"
    }
}

/// Resolves a type-erased destination.
///
/// Only the built-in destination types (and `Option`s of them) can be
/// recognised behind `dyn Any`; anything else is not a usable destination.
pub fn resolve_any(dst: &mut dyn Any) -> Result<Slot<'_>> {
    macro_rules! try_resolve {
        ($($ty:ty),+ $(,)?) => {
            $(
                if dst.is::<$ty>() {
                    return match dst.downcast_mut::<$ty>() {
                        Some(target) => Ok(target.slot()),
                        None => Err(ScanError::InvalidDestination(stringify!($ty).to_string())),
                    };
                }
                if dst.is::<Option<$ty>>() {
                    return match dst.downcast_mut::<Option<$ty>>() {
                        Some(target) => Ok(target.slot()),
                        None => Err(ScanError::InvalidDestination(stringify!($ty).to_string())),
                    };
                }
            )+
        };
    }
    try_resolve!(
        bool,
        i8,
        i16,
        i32,
        i64,
        isize,
        u8,
        u16,
        u32,
        u64,
        usize,
        f32,
        f64,
        String,
        Vec<u8>,
        DateTime<Utc>,
        Value,
    );
    Err(ScanError::InvalidDestination(
        "not a reference to a supported destination type".to_string(),
    ))
}

/// Implements [`Destination`] and [`Encode`](crate::Encode) for
/// single-field tuple structs by delegating to the wrapped field.
///
/// ```
/// #[derive(Default, Debug, PartialEq)]
/// struct Age(u8);
/// presence::newtype_value!(Age);
///
/// let mut age = presence::Optional::<Age>::empty();
/// age.scan(42i64).unwrap();
/// assert_eq!(age.require(), &Age(42));
/// ```
#[macro_export]
macro_rules! newtype_value {
    ($($newtype:ty),+ $(,)?) => {
        $(
            impl $crate::Destination for $newtype {
                fn slot(&mut self) -> $crate::Slot<'_> {
                    $crate::Destination::slot(&mut self.0)
                }
            }
            impl $crate::Encode for $newtype {
                fn encode(&self) -> $crate::Result<$crate::Value> {
                    $crate::Encode::encode(&self.0)
                }
            }
        )+
    };
}
