//! Decomposition of arbitrary values into log attributes
//!
//! Every `serde::Serialize` type is [`Loggable`] through a serializer that
//! only inspects the top-level shape of the value:
//!
//! - struct: one attribute per serialized field, named after the field.
//!   Fields marked `#[serde(skip)]` are never seen and so never logged.
//! - map: one attribute per entry whose key serializes as a string; other
//!   entries are dropped.
//! - anything else: nothing.
//!
//! Field values are encoded whole, so a nested struct becomes one JSON
//! object rather than being flattened further. Newtype structs and `Some`
//! are looked through.
//!
//! Types that cannot implement `Serialize` describe themselves with
//! [`Fields`] and are passed wrapped in [`Described`].

use super::attributes::AttributeList;
use serde::ser::{self, Impossible, Serialize, SerializeMap, SerializeStruct, Serializer};
use serde_json::Value;
use std::fmt::Display;

/// A value that can be attached to a logger as structured fields
pub trait Loggable {
    /// Declared type name, used as the key by `with_all`
    fn type_name(&self) -> &str;

    /// Append the value's top-level fields, skipping what cannot be named
    fn flatten(&self, out: &mut AttributeList);

    /// The whole value, unflattened
    fn to_value(&self) -> Value;
}

impl<T: Serialize + ?Sized> Loggable for T {
    fn type_name(&self) -> &str {
        short_type_name(std::any::type_name::<T>())
    }

    fn flatten(&self, out: &mut AttributeList) {
        // Unsupported shapes end in `Unflattenable`; whatever was pushed stays.
        let _ = self.serialize(Flattener { out });
    }

    fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Hand-written field description for types without a `Serialize` impl
///
/// # Example
///
/// ```
/// use klog_compat::{AttributeList, Described, Fields, Loggable};
///
/// struct Connection {
///     peer: String,
///     retries: u32,
/// }
///
/// impl Fields for Connection {
///     fn fields(&self, out: &mut AttributeList) {
///         out.push("peer", self.peer.clone());
///         out.push("retries", self.retries);
///     }
/// }
///
/// let conn = Described(Connection { peer: "10.0.0.1".into(), retries: 2 });
/// let mut attrs = AttributeList::new();
/// conn.flatten(&mut attrs);
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(conn.type_name(), "Connection");
/// ```
pub trait Fields {
    fn fields(&self, out: &mut AttributeList);

    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Adapter making a [`Fields`] implementor [`Loggable`]
#[derive(Debug, Clone, Copy)]
pub struct Described<T>(pub T);

impl<T: Fields> Loggable for Described<T> {
    fn type_name(&self) -> &str {
        self.0.name()
    }

    fn flatten(&self, out: &mut AttributeList) {
        self.0.fields(out);
    }

    fn to_value(&self) -> Value {
        let mut attributes = AttributeList::new();
        self.0.fields(&mut attributes);
        attributes.to_object()
    }
}

/// Strip module paths, generic arguments and references from a type name
///
/// Tuples, arrays and slices have no declared name and yield `""`.
pub fn short_type_name(full: &str) -> &str {
    let mut name = full;
    loop {
        if let Some(rest) = name.strip_prefix('&') {
            name = rest.trim_start_matches("mut ");
        } else if let Some(rest) = name.strip_prefix("dyn ") {
            name = rest;
        } else {
            break;
        }
    }

    if name.starts_with('(') || name.starts_with('[') {
        return "";
    }

    let base = match name.find('<') {
        Some(idx) => &name[..idx],
        None => name,
    };
    match base.rfind("::") {
        Some(idx) => &base[idx + 2..],
        None => base,
    }
}

#[derive(Debug, thiserror::Error)]
#[error("value has no named top-level fields")]
struct Unflattenable;

impl ser::Error for Unflattenable {
    fn custom<M: Display>(_msg: M) -> Self {
        Unflattenable
    }
}

macro_rules! reject_scalars {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method(self, _v: $ty) -> Result<Self::Ok, Self::Error> {
                Err(Unflattenable)
            }
        )*
    };
}

macro_rules! reject_compounds {
    () => {
        fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
            Err(Unflattenable)
        }

        fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
            Err(Unflattenable)
        }

        fn serialize_tuple_struct(
            self,
            _name: &'static str,
            _len: usize,
        ) -> Result<Self::SerializeTupleStruct, Self::Error> {
            Err(Unflattenable)
        }

        fn serialize_tuple_variant(
            self,
            _name: &'static str,
            _variant_index: u32,
            _variant: &'static str,
            _len: usize,
        ) -> Result<Self::SerializeTupleVariant, Self::Error> {
            Err(Unflattenable)
        }

        fn serialize_struct_variant(
            self,
            _name: &'static str,
            _variant_index: u32,
            _variant: &'static str,
            _len: usize,
        ) -> Result<Self::SerializeStructVariant, Self::Error> {
            Err(Unflattenable)
        }

        fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
            Err(Unflattenable)
        }

        fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
            Err(Unflattenable)
        }

        fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
            Err(Unflattenable)
        }

        fn serialize_unit_variant(
            self,
            _name: &'static str,
            _variant_index: u32,
            _variant: &'static str,
        ) -> Result<Self::Ok, Self::Error> {
            Err(Unflattenable)
        }

        fn serialize_newtype_variant<T>(
            self,
            _name: &'static str,
            _variant_index: u32,
            _variant: &'static str,
            _value: &T,
        ) -> Result<Self::Ok, Self::Error>
        where
            T: ?Sized + Serialize,
        {
            Err(Unflattenable)
        }
    };
}

/// Top-level shape inspector behind [`Loggable::flatten`]
struct Flattener<'a> {
    out: &'a mut AttributeList,
}

impl<'a> Serializer for Flattener<'a> {
    type Ok = ();
    type Error = Unflattenable;
    type SerializeSeq = Impossible<(), Unflattenable>;
    type SerializeTuple = Impossible<(), Unflattenable>;
    type SerializeTupleStruct = Impossible<(), Unflattenable>;
    type SerializeTupleVariant = Impossible<(), Unflattenable>;
    type SerializeMap = MapEntries<'a>;
    type SerializeStruct = StructFields<'a>;
    type SerializeStructVariant = Impossible<(), Unflattenable>;

    reject_scalars! {
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_f32(f32),
        serialize_f64(f64),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8]),
    }

    reject_compounds!();

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(MapEntries {
            out: self.out,
            pending_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Ok(StructFields { out: self.out })
    }
}

struct StructFields<'a> {
    out: &'a mut AttributeList,
}

impl SerializeStruct for StructFields<'_> {
    type Ok = ();
    type Error = Unflattenable;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        if let Ok(value) = serde_json::to_value(value) {
            self.out.push(key, value);
        }
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }
}

struct MapEntries<'a> {
    out: &'a mut AttributeList,
    /// `None` after a key that is not a string; its value is discarded
    pending_key: Option<String>,
}

impl SerializeMap for MapEntries<'_> {
    type Ok = ();
    type Error = Unflattenable;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        self.pending_key = key.serialize(StringKey).ok();
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        if let Some(key) = self.pending_key.take() {
            if let Ok(value) = serde_json::to_value(value) {
                self.out.push(key, value);
            }
        }
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }
}

/// Accepts only string-shaped map keys
struct StringKey;

impl Serializer for StringKey {
    type Ok = String;
    type Error = Unflattenable;
    type SerializeSeq = Impossible<String, Unflattenable>;
    type SerializeTuple = Impossible<String, Unflattenable>;
    type SerializeTupleStruct = Impossible<String, Unflattenable>;
    type SerializeTupleVariant = Impossible<String, Unflattenable>;
    type SerializeMap = Impossible<String, Unflattenable>;
    type SerializeStruct = Impossible<String, Unflattenable>;
    type SerializeStructVariant = Impossible<String, Unflattenable>;

    reject_scalars! {
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_f32(f32),
        serialize_f64(f64),
        serialize_char(char),
        serialize_bytes(&[u8]),
    }

    reject_compounds!();

    fn serialize_str(self, v: &str) -> Result<Self::Ok, Self::Error> {
        Ok(v.to_owned())
    }

    fn serialize_some<T>(self, _value: &T) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        Err(Unflattenable)
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Err(Unflattenable)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Err(Unflattenable)
    }
}
