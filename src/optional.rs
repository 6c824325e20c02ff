// used to print out readable forms of a container
use std::fmt;

// used for the serialization hooks
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use tracing::trace;

use chrono::{DateTime, Utc};

use crate::assign::assign;
use crate::destination::{Destination, Scanner, Slot};
use crate::encode::Encode;
use crate::error::{Result, ScanError};
use crate::value::Value;

/// Text rendered for an absent container.
pub const EMPTY_TEXT: &str = "<empty>";

// ------------- Optional -------------
/// A value that remembers whether it was ever set.
///
/// Unlike `Option`, an `Optional` always holds a `T`: when absent that
/// value is `T::default()`, so zero values that were explicitly set can be
/// told apart from values that were never set. Transformations hand back new
/// containers; the only thing that changes a container in place is
/// [`Optional::scan`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Optional<T> {
    present: bool,
    value: T,
}

impl<T> Optional<T> {
    /// A present container holding `value`, whatever it is.
    pub fn of(value: T) -> Self {
        Self { present: true, value }
    }
    pub fn get(&self) -> (&T, bool) {
        (&self.value, self.present)
    }
    pub fn into_parts(self) -> (T, bool) {
        (self.value, self.present)
    }
    pub fn is_present(&self) -> bool {
        self.present
    }
    pub fn is_empty(&self) -> bool {
        !self.present
    }
    pub fn as_option(&self) -> Option<&T> {
        self.present.then_some(&self.value)
    }
    pub fn into_option(self) -> Option<T> {
        self.present.then_some(self.value)
    }
    pub fn try_require(&self) -> Result<&T> {
        self.as_option().ok_or(ScanError::NotPresent)
    }
    /// The value of a present container.
    ///
    /// # Panics
    /// When the container is empty. Only call this where absence is a bug.
    #[track_caller]
    pub fn require(&self) -> &T {
        match self.try_require() {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
    pub fn or_else(self, fallback: T) -> T {
        if self.present { self.value } else { fallback }
    }
    pub fn or_else_get(self, fallback: impl FnOnce() -> T) -> T {
        if self.present { self.value } else { fallback() }
    }
    /// Like [`or_else_get`](Self::or_else_get), handing back the fallback's
    /// error as is.
    pub fn or_else_try_get<E>(self, fallback: impl FnOnce() -> std::result::Result<T, E>) -> std::result::Result<T, E> {
        if self.present { Ok(self.value) } else { fallback() }
    }
    pub fn map<U: Default>(self, f: impl FnOnce(T) -> U) -> Optional<U> {
        if self.present { Optional::of(f(self.value)) } else { Optional::empty() }
    }
    pub fn try_map<U: Default, E>(self, f: impl FnOnce(T) -> std::result::Result<U, E>) -> std::result::Result<Optional<U>, E> {
        if self.present { f(self.value).map(Optional::of) } else { Ok(Optional::empty()) }
    }
    pub fn flat_map<U: Default>(self, f: impl FnOnce(T) -> Optional<U>) -> Optional<U> {
        if self.present { f(self.value) } else { Optional::empty() }
    }
    pub fn try_flat_map<U: Default, E>(self, f: impl FnOnce(T) -> std::result::Result<Optional<U>, E>) -> std::result::Result<Optional<U>, E> {
        if self.present { f(self.value) } else { Ok(Optional::empty()) }
    }
    /// Absent containers encode to [`Value::Null`].
    pub fn encode(&self) -> Result<Value>
    where
        T: Encode,
    {
        if self.present { self.value.encode() } else { Ok(Value::Null) }
    }
}

impl<T: Default> Optional<T> {
    pub fn empty() -> Self {
        Self { present: false, value: T::default() }
    }
    /// Empty when `value` is nil, present otherwise.
    pub fn of_nillable(value: T) -> Self
    where
        T: Nillable,
    {
        if value.is_nil() { Self::empty() } else { Self::of(value) }
    }
    /// Empty when `value` equals `T::default()`, present otherwise.
    pub fn of_zeroable(value: T) -> Self
    where
        T: PartialEq,
    {
        if value == T::default() { Self::empty() } else { Self::of(value) }
    }
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        if self.present && predicate(&self.value) { self } else { Self::empty() }
    }
    /// The first present container, or an empty one.
    pub fn find(containers: impl IntoIterator<Item = Self>) -> Self {
        containers
            .into_iter()
            .find(Optional::is_present)
            .unwrap_or_default()
    }
    /// # Panics
    /// When none of the containers is present.
    #[track_caller]
    pub fn must_find(containers: impl IntoIterator<Item = Self>) -> Self {
        let found = Self::find(containers);
        if found.is_empty() {
            panic!("{}", ScanError::NotPresent);
        }
        found
    }
    /// Values of all present containers, in order.
    pub fn get_any(containers: impl IntoIterator<Item = Self>) -> Vec<T> {
        containers
            .into_iter()
            .filter_map(Optional::into_option)
            .collect()
    }
    /// # Panics
    /// When none of the containers is present.
    #[track_caller]
    pub fn require_any(containers: impl IntoIterator<Item = Self>) -> Vec<T> {
        let values = Self::get_any(containers);
        if values.is_empty() {
            panic!("{}", ScanError::NotPresent);
        }
        values
    }
    /// Scans a wire value into the container.
    ///
    /// A null source empties the container. Any other source is coerced
    /// into a fresh `T`; on success the container becomes present with it,
    /// on failure the container is left as it was.
    pub fn scan(&mut self, src: impl Into<Value>) -> Result<()>
    where
        T: Destination,
    {
        let src = src.into();
        if src.is_null() {
            trace!("null source, container emptied");
            *self = Self::empty();
            return Ok(());
        }
        let mut value = T::default();
        assign(&src, &mut value)?;
        *self = Self::of(value);
        Ok(())
    }
}

// a container nested inside another scans itself
impl<T: Destination + Default> Scanner for Optional<T> {
    fn scan_from(&mut self, src: &Value) -> Result<()> {
        self.scan(src.clone())
    }
}
impl<T: Destination + Default> Destination for Optional<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Custom(self)
    }
}

impl<T: Encode> Encode for Optional<T> {
    fn encode(&self) -> Result<Value> {
        Optional::encode(self)
    }
}

impl<T> From<Option<T>> for Optional<T>
where
    T: Default,
{
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Self::of(value),
            None => Self::empty(),
        }
    }
}
impl<T> From<Optional<T>> for Option<T> {
    fn from(optional: Optional<T>) -> Self {
        optional.into_option()
    }
}

impl<T: fmt::Display> fmt::Display for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.present {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{}", EMPTY_TEXT)
        }
    }
}
impl<T: fmt::Debug> fmt::Debug for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.present {
            f.debug_tuple("Optional").field(&self.value).finish()
        } else {
            write!(f, "Optional.empty")
        }
    }
}

// ------------- Serialization -------------
// Absent containers serialize as none; pair with
// `#[serde(skip_serializing_if = "Optional::is_empty")]` to omit them.
impl<T: Serialize> Serialize for Optional<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.present {
            serializer.serialize_some(&self.value)
        } else {
            serializer.serialize_none()
        }
    }
}
// Only an explicit null stays absent; anything else decoded is present,
// zero values included. Missing fields are left to `#[serde(default)]`.
// Decoding in place skips a null and keeps whatever the container held.
impl<'de, T: Deserialize<'de> + Default> Deserialize<'de> for Optional<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Optional::from)
    }

    fn deserialize_in_place<D: Deserializer<'de>>(
        deserializer: D,
        place: &mut Self,
    ) -> std::result::Result<(), D::Error> {
        if let Some(value) = Option::<T>::deserialize(deserializer)? {
            *place = Optional::of(value);
        }
        Ok(())
    }
}

// ------------- Nillable -------------
/// Types that have a nil state of their own.
pub trait Nillable {
    fn is_nil(&self) -> bool;
}
impl<T> Nillable for Option<T> {
    fn is_nil(&self) -> bool {
        self.is_none()
    }
}
impl Nillable for Value {
    fn is_nil(&self) -> bool {
        self.is_null()
    }
}
impl<T> Nillable for Optional<T> {
    fn is_nil(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! never_nil {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Nillable for $ty {
                fn is_nil(&self) -> bool {
                    false
                }
            }
        )+
    };
}
never_nil!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, DateTime<Utc>,
);
impl<T> Nillable for Vec<T> {
    fn is_nil(&self) -> bool {
        false
    }
}
impl<T> Nillable for Box<T> {
    fn is_nil(&self) -> bool {
        false
    }
}
