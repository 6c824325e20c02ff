// used for timestamps on the wire
use chrono::{DateTime, Utc};

use crate::error::{Result, ScanError};
use crate::value::Value;

/// Turns a value into the neutral [`Value`] shape for outbound transmission.
///
/// Primitives get the default conversion below; other types implement it
/// themselves (or through [`newtype_value!`](crate::newtype_value)).
pub trait Encode {
    fn encode(&self) -> Result<Value>;
}

macro_rules! encode_as_int {
    ($($ty:ty),+) => {
        $(
            impl Encode for $ty {
                fn encode(&self) -> Result<Value> {
                    Ok(Value::Int(i64::from(*self)))
                }
            }
        )+
    };
}
encode_as_int!(i8, i16, i32, i64, u8, u16, u32);

// the driver only knows signed 64-bit integers, so the high bit cannot be carried
macro_rules! encode_checked_int {
    ($($ty:ty),+) => {
        $(
            impl Encode for $ty {
                fn encode(&self) -> Result<Value> {
                    i64::try_from(*self)
                        .map(Value::Int)
                        .map_err(|_| ScanError::range(self, "i64"))
                }
            }
        )+
    };
}
encode_checked_int!(isize, u64, usize);

impl Encode for bool {
    fn encode(&self) -> Result<Value> {
        Ok(Value::Bool(*self))
    }
}
impl Encode for f32 {
    fn encode(&self) -> Result<Value> {
        Ok(Value::Float(f64::from(*self)))
    }
}
impl Encode for f64 {
    fn encode(&self) -> Result<Value> {
        Ok(Value::Float(*self))
    }
}
impl Encode for String {
    fn encode(&self) -> Result<Value> {
        Ok(Value::Text(self.clone()))
    }
}
impl Encode for str {
    fn encode(&self) -> Result<Value> {
        Ok(Value::Text(self.to_owned()))
    }
}
impl Encode for Vec<u8> {
    fn encode(&self) -> Result<Value> {
        Ok(Value::Bytes(self.clone()))
    }
}
impl Encode for [u8] {
    fn encode(&self) -> Result<Value> {
        Ok(Value::Bytes(self.to_vec()))
    }
}
impl Encode for DateTime<Utc> {
    fn encode(&self) -> Result<Value> {
        Ok(Value::Timestamp(*self))
    }
}
impl Encode for Value {
    fn encode(&self) -> Result<Value> {
        Ok(self.clone())
    }
}
impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self) -> Result<Value> {
        (**self).encode()
    }
}
impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self) -> Result<Value> {
        (**self).encode()
    }
}
impl<T: Encode> Encode for Option<T> {
    fn encode(&self) -> Result<Value> {
        match self {
            Some(value) => value.encode(),
            None => Ok(Value::Null),
        }
    }
}
