//! `Decode` implementations for standard library types

use std::any::type_name;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::{mpsc, Arc};

use crate::error::DecodeError;
use crate::shape::{
    Decode, FillElement, FillSlot, Float, Int, LeafTarget, MappingTarget, PointerTarget,
    SequenceTarget, Shape, Target, Uint,
};

impl Decode for bool {
    fn shape() -> Shape {
        Shape::Bool
    }

    fn placeholder() -> Self {
        false
    }

    fn target(&mut self) -> Target<'_> {
        Target::Bool(self)
    }
}

impl Decode for String {
    fn shape() -> Shape {
        Shape::String
    }

    fn placeholder() -> Self {
        String::new()
    }

    fn target(&mut self) -> Target<'_> {
        Target::String(self)
    }
}

macro_rules! decode_numeric {
    ($($ty:ty => $kind:ident :: $variant:ident),* $(,)?) => {
        $(impl Decode for $ty {
            fn shape() -> Shape {
                Shape::$kind {
                    bits: <$ty>::BITS,
                }
            }

            fn placeholder() -> Self {
                0
            }

            fn target(&mut self) -> Target<'_> {
                Target::$kind($kind::$variant(self))
            }
        })*
    };
}

decode_numeric!(
    i8 => Int::I8,
    i16 => Int::I16,
    i32 => Int::I32,
    i64 => Int::I64,
    i128 => Int::I128,
    isize => Int::Isize,
    u8 => Uint::U8,
    u16 => Uint::U16,
    u32 => Uint::U32,
    u64 => Uint::U64,
    u128 => Uint::U128,
    usize => Uint::Usize,
);

impl Decode for f32 {
    fn shape() -> Shape {
        Shape::Float { bits: 32 }
    }

    fn placeholder() -> Self {
        0.0
    }

    fn target(&mut self) -> Target<'_> {
        Target::Float(Float::F32(self))
    }
}

impl Decode for f64 {
    fn shape() -> Shape {
        Shape::Float { bits: 64 }
    }

    fn placeholder() -> Self {
        0.0
    }

    fn target(&mut self) -> Target<'_> {
        Target::Float(Float::F64(self))
    }
}

/// Leaf slot parsed with the value's `FromStr` implementation
pub struct Parsed<'a, T>(pub &'a mut T);

impl<T> LeafTarget for Parsed<'_, T>
where
    T: FromStr,
    T::Err: Display,
{
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn parse(&mut self, raw: &str) -> Result<(), String> {
        *self.0 = raw.parse::<T>().map_err(|e| e.to_string())?;
        Ok(())
    }
}

/// Leaf slot parsed with a custom function, such as `serde_json::from_str`
pub struct With<'a, T, F> {
    slot: &'a mut T,
    parse: F,
}

impl<'a, T, F> With<'a, T, F> {
    /// Decode `slot` from raw text with `parse`
    pub fn new<E>(slot: &'a mut T, parse: F) -> Self
    where
        F: FnMut(&str) -> Result<T, E>,
    {
        With { slot, parse }
    }
}

impl<T, F, E> LeafTarget for With<'_, T, F>
where
    F: FnMut(&str) -> Result<T, E>,
    E: Display,
{
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn parse(&mut self, raw: &str) -> Result<(), String> {
        *self.slot = (self.parse)(raw).map_err(|e| e.to_string())?;
        Ok(())
    }
}

macro_rules! decode_from_str {
    ($($ty:ty => $placeholder:expr),* $(,)?) => {
        $(impl Decode for $ty {
            fn shape() -> Shape {
                Shape::Leaf {
                    type_name: type_name::<$ty>(),
                }
            }

            fn placeholder() -> Self {
                $placeholder
            }

            fn target(&mut self) -> Target<'_> {
                Target::Leaf(Box::new(Parsed(self)))
            }
        })*
    };
}

decode_from_str!(
    char => '\0',
    PathBuf => PathBuf::new(),
    IpAddr => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
    Ipv4Addr => Ipv4Addr::UNSPECIFIED,
    Ipv6Addr => Ipv6Addr::UNSPECIFIED,
    SocketAddr => SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0)),
    SocketAddrV4 => SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0),
    SocketAddrV6 => SocketAddrV6::new(Ipv6Addr::UNSPECIFIED, 0, 0, 0),
);

impl<T: Decode> Decode for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn placeholder() -> Self {
        Box::new(T::placeholder())
    }

    fn target(&mut self) -> Target<'_> {
        (**self).target()
    }
}

impl<T: Decode> Decode for Option<T> {
    fn shape() -> Shape {
        Shape::Pointer(Box::new(T::shape()))
    }

    fn placeholder() -> Self {
        None
    }

    fn target(&mut self) -> Target<'_> {
        Target::Pointer(self)
    }
}

impl<T: Decode> PointerTarget for Option<T> {
    fn pointee_shape(&self) -> Shape {
        T::shape()
    }

    fn referent(&mut self) -> Option<&mut dyn Decode> {
        Some(self.get_or_insert_with(T::placeholder))
    }
}

macro_rules! decode_shared {
    ($($ptr:ident),*) => {
        $(
            impl<T: Decode> Decode for $ptr<T> {
                fn shape() -> Shape {
                    Shape::Pointer(Box::new(T::shape()))
                }

                fn placeholder() -> Self {
                    $ptr::new(T::placeholder())
                }

                fn target(&mut self) -> Target<'_> {
                    Target::Pointer(self)
                }
            }

            // only a uniquely owned referent can be written
            impl<T: Decode> PointerTarget for $ptr<T> {
                fn pointee_shape(&self) -> Shape {
                    T::shape()
                }

                fn referent(&mut self) -> Option<&mut dyn Decode> {
                    $ptr::get_mut(self).map(|value| value as &mut dyn Decode)
                }
            }
        )*
    };
}

decode_shared!(Rc, Arc);

impl<T: Decode> Decode for Vec<T> {
    fn shape() -> Shape {
        Shape::Sequence(Box::new(T::shape()))
    }

    fn placeholder() -> Self {
        Vec::new()
    }

    fn target(&mut self) -> Target<'_> {
        Target::Sequence(self)
    }
}

impl<T: Decode> SequenceTarget for Vec<T> {
    fn element_shape(&self) -> Shape {
        T::shape()
    }

    fn fill(&mut self, len: usize, fill: &mut FillElement<'_>) -> Result<(), DecodeError> {
        self.reserve(len);
        for index in 0..len {
            let mut element = T::placeholder();
            fill(index, &mut element)?;
            self.push(element);
        }
        Ok(())
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn shape() -> Shape {
        Shape::Sequence(Box::new(T::shape()))
    }

    fn placeholder() -> Self {
        std::array::from_fn(|_| T::placeholder())
    }

    fn target(&mut self) -> Target<'_> {
        Target::Sequence(self)
    }
}

impl<T: Decode, const N: usize> SequenceTarget for [T; N] {
    fn element_shape(&self) -> Shape {
        T::shape()
    }

    fn capacity(&self) -> Option<usize> {
        Some(N)
    }

    fn fill(&mut self, len: usize, fill: &mut FillElement<'_>) -> Result<(), DecodeError> {
        for (index, element) in self.iter_mut().take(len).enumerate() {
            fill(index, element)?;
        }
        Ok(())
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    fn shape() -> Shape {
        Shape::Mapping(Box::new(K::shape()), Box::new(V::shape()))
    }

    fn placeholder() -> Self {
        HashMap::default()
    }

    fn target(&mut self) -> Target<'_> {
        Target::Mapping(self)
    }
}

impl<K, V, S> MappingTarget for HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    fn key_shape(&self) -> Shape {
        K::shape()
    }

    fn value_shape(&self) -> Shape {
        V::shape()
    }

    fn insert_with(&mut self, key: &mut FillSlot<'_>, value: &mut FillSlot<'_>) -> Result<(), DecodeError> {
        let mut k = K::placeholder();
        key(&mut k)?;
        let mut v = V::placeholder();
        value(&mut v)?;
        self.insert(k, v);
        Ok(())
    }
}

impl<K, V> Decode for BTreeMap<K, V>
where
    K: Decode + Ord,
    V: Decode,
{
    fn shape() -> Shape {
        Shape::Mapping(Box::new(K::shape()), Box::new(V::shape()))
    }

    fn placeholder() -> Self {
        BTreeMap::new()
    }

    fn target(&mut self) -> Target<'_> {
        Target::Mapping(self)
    }
}

impl<K, V> MappingTarget for BTreeMap<K, V>
where
    K: Decode + Ord,
    V: Decode,
{
    fn key_shape(&self) -> Shape {
        K::shape()
    }

    fn value_shape(&self) -> Shape {
        V::shape()
    }

    fn insert_with(&mut self, key: &mut FillSlot<'_>, value: &mut FillSlot<'_>) -> Result<(), DecodeError> {
        let mut k = K::placeholder();
        key(&mut k)?;
        let mut v = V::placeholder();
        value(&mut v)?;
        self.insert(k, v);
        Ok(())
    }
}

impl Decode for () {
    fn shape() -> Shape {
        Shape::Unsupported("unit")
    }

    fn placeholder() -> Self {}

    fn target(&mut self) -> Target<'_> {
        Target::Unsupported("unit")
    }
}

impl<T> Decode for mpsc::Sender<T> {
    fn shape() -> Shape {
        Shape::Unsupported("channel")
    }

    // sender of a channel whose receiver is already gone
    fn placeholder() -> Self {
        mpsc::channel().0
    }

    fn target(&mut self) -> Target<'_> {
        Target::Unsupported("channel")
    }
}

impl<T> Decode for mpsc::Receiver<T> {
    fn shape() -> Shape {
        Shape::Unsupported("channel")
    }

    fn placeholder() -> Self {
        mpsc::channel().1
    }

    fn target(&mut self) -> Target<'_> {
        Target::Unsupported("channel")
    }
}
