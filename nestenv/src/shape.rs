//! Structural shapes and writable decode targets

use std::fmt;
use std::mem;

use crate::error::DecodeError;

/// Structural classification of a decode target.
///
/// The set is closed: the dispatcher handles every variant exhaustively.
/// Container variants describe their contents one level deep; records are
/// described by name only, so self-referential types have finite shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// `bool`
    Bool,
    /// Signed integer of the given width
    Int {
        /// Width in bits
        bits: u32,
    },
    /// Unsigned integer of the given width
    Uint {
        /// Width in bits
        bits: u32,
    },
    /// Floating point number of the given precision
    Float {
        /// Width in bits
        bits: u32,
    },
    /// `String`, subject to environment variable expansion
    String,
    /// A value parsed from text by its own parser (`FromStr` or a custom function)
    Leaf {
        /// Type name of the parsed value
        type_name: &'static str,
    },
    /// Optional or shared reference to a value of the inner shape
    Pointer(Box<Shape>),
    /// Array or growable sequence of the inner shape
    Sequence(Box<Shape>),
    /// Associative mapping from the key shape to the value shape
    Mapping(Box<Shape>, Box<Shape>),
    /// Struct with named fields
    Record {
        /// Type name of the record
        name: &'static str,
    },
    /// Shape without a decode strategy
    Unsupported(&'static str),
}

impl Shape {
    /// Whether values of this shape are read from a single entry.
    ///
    /// Pointers take the classification of what they point to.
    pub fn is_scalar(&self) -> bool {
        match self {
            Shape::Bool
            | Shape::Int { .. }
            | Shape::Uint { .. }
            | Shape::Float { .. }
            | Shape::String
            | Shape::Leaf { .. } => true,
            Shape::Pointer(inner) => inner.is_scalar(),
            Shape::Sequence(_) | Shape::Mapping(..) | Shape::Record { .. } | Shape::Unsupported(_) => {
                false
            }
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Bool => f.write_str("bool"),
            Shape::Int { bits } => write!(f, "i{bits}"),
            Shape::Uint { bits } => write!(f, "u{bits}"),
            Shape::Float { bits } => write!(f, "f{bits}"),
            Shape::String => f.write_str("string"),
            Shape::Leaf { type_name } => f.write_str(type_name),
            Shape::Pointer(inner) => write!(f, "pointer to {inner}"),
            Shape::Sequence(inner) => write!(f, "sequence of {inner}"),
            Shape::Mapping(key, value) => write!(f, "mapping from {key} to {value}"),
            Shape::Record { name } => write!(f, "record {name}"),
            Shape::Unsupported(what) => f.write_str(what),
        }
    }
}

/// A value that can be decoded from a namespace.
///
/// Implemented for the scalar types of the standard library, common `FromStr`
/// types, `Option`, `Box`, `Rc`, `Arc`, `Vec`, arrays, `HashMap` and `BTreeMap`.
/// Structs implement it through `#[derive(Decode)]`.
pub trait Decode {
    /// Shape of every value of this type
    fn shape() -> Shape
    where
        Self: Sized;

    /// Value a freshly allocated destination starts from.
    ///
    /// Sequence elements, map entries and vivified pointers are created from
    /// it and then decoded in place, so the value never needs to be meaningful.
    /// Types without a `Default` (such as `IpAddr`) pick any valid value.
    fn placeholder() -> Self
    where
        Self: Sized;

    /// Exclusive, writable handle to this value
    fn target(&mut self) -> Target<'_>;
}

/// Exclusive handle to a decode destination, tagged with its shape.
pub enum Target<'a> {
    /// `bool` slot
    Bool(&'a mut bool),
    /// Signed integer slot
    Int(Int<'a>),
    /// Unsigned integer slot
    Uint(Uint<'a>),
    /// Floating point slot
    Float(Float<'a>),
    /// `String` slot
    String(&'a mut String),
    /// Slot parsed by the value's own parser
    Leaf(Box<dyn LeafTarget + 'a>),
    /// Optional or shared reference
    Pointer(&'a mut dyn PointerTarget),
    /// Array or growable sequence
    Sequence(&'a mut dyn SequenceTarget),
    /// Associative mapping
    Mapping(&'a mut dyn MappingTarget),
    /// Struct with named fields
    Record(&'a mut dyn RecordTarget),
    /// Value without a decode strategy, with a description of its shape
    Unsupported(&'static str),
}

impl Target<'_> {
    /// Shape of the destination behind this handle
    pub fn shape(&self) -> Shape {
        match self {
            Target::Bool(_) => Shape::Bool,
            Target::Int(slot) => Shape::Int { bits: slot.bits() },
            Target::Uint(slot) => Shape::Uint { bits: slot.bits() },
            Target::Float(slot) => Shape::Float { bits: slot.bits() },
            Target::String(_) => Shape::String,
            Target::Leaf(leaf) => Shape::Leaf {
                type_name: leaf.type_name(),
            },
            Target::Pointer(pointer) => Shape::Pointer(Box::new(pointer.pointee_shape())),
            Target::Sequence(sequence) => Shape::Sequence(Box::new(sequence.element_shape())),
            Target::Mapping(mapping) => {
                Shape::Mapping(Box::new(mapping.key_shape()), Box::new(mapping.value_shape()))
            }
            Target::Record(record) => Shape::Record {
                name: record.type_name(),
            },
            Target::Unsupported(what) => Shape::Unsupported(*what),
        }
    }
}

impl fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Target").field(&self.shape()).finish()
    }
}

macro_rules! numeric_target {
    ($(#[$meta:meta])* $name:ident { $($variant:ident($ty:ty)),* $(,)? }) => {
        $(#[$meta])*
        pub enum $name<'a> {
            $(
                #[doc = concat!("`", stringify!($ty), "` slot")]
                $variant(&'a mut $ty),
            )*
        }

        impl $name<'_> {
            /// Declared width in bits
            pub fn bits(&self) -> u32 {
                match self {
                    $($name::$variant(_) => (mem::size_of::<$ty>() * 8) as u32,)*
                }
            }

            /// Parse base-10 `raw` at the declared width and store it
            pub fn parse(&mut self, raw: &str) -> Result<(), String> {
                match self {
                    $($name::$variant(slot) => **slot = parse_number::<$ty>(raw)?,)*
                }
                Ok(())
            }
        }
    };
}

numeric_target!(
    /// Signed integer slot of a declared width
    Int {
        I8(i8),
        I16(i16),
        I32(i32),
        I64(i64),
        I128(i128),
        Isize(isize),
    }
);

numeric_target!(
    /// Unsigned integer slot of a declared width
    Uint {
        U8(u8),
        U16(u16),
        U32(u32),
        U64(u64),
        U128(u128),
        Usize(usize),
    }
);

numeric_target!(
    /// Floating point slot of a declared precision
    Float {
        F32(f32),
        F64(f64),
    }
);

trait Number: std::str::FromStr {
    /// Whether a leading sign is part of the grammar
    const SIGNED: bool = true;

    fn overflowed(&self, raw: &str) -> bool;
}

macro_rules! exact_number {
    ($signed:literal: $($ty:ty),*) => {
        $(impl Number for $ty {
            const SIGNED: bool = $signed;

            fn overflowed(&self, _raw: &str) -> bool {
                false
            }
        })*
    };
}

exact_number!(true: i8, i16, i32, i64, i128, isize);
exact_number!(false: u8, u16, u32, u64, u128, usize);

macro_rules! float_number {
    ($($ty:ty),*) => {
        $(impl Number for $ty {
            // finite text that rounds to infinity does not fit the precision
            fn overflowed(&self, raw: &str) -> bool {
                let digits = raw.trim_start_matches(['+', '-']);
                self.is_infinite() && !digits.to_ascii_lowercase().starts_with("inf")
            }
        })*
    };
}

float_number!(f32, f64);

fn parse_number<T>(raw: &str) -> Result<T, String>
where
    T: Number,
    T::Err: fmt::Display,
{
    if !T::SIGNED && raw.starts_with(['+', '-']) {
        return Err("unsigned value must not carry a sign".to_string());
    }
    let value = raw.parse::<T>().map_err(|e| e.to_string())?;
    if value.overflowed(raw) {
        return Err("value out of range".to_string());
    }
    Ok(value)
}

/// Destination parsed from raw text by the value's own parser.
pub trait LeafTarget {
    /// Type name used in error messages
    fn type_name(&self) -> &'static str;

    /// Parse `raw` and store the result
    fn parse(&mut self, raw: &str) -> Result<(), String>;
}

/// Optional or shared reference whose referent is decoded in place.
pub trait PointerTarget {
    /// Shape of the referenced value
    fn pointee_shape(&self) -> Shape;

    /// Borrow the referent, allocating a default one first when it is absent.
    ///
    /// Returns `None` when the referent exists but cannot be written.
    fn referent(&mut self) -> Option<&mut dyn Decode>;
}

/// Callback filling one sequence element, given its index
pub type FillElement<'f> = dyn FnMut(usize, &mut dyn Decode) -> Result<(), DecodeError> + 'f;

/// Callback filling a freshly allocated mapping key or value
pub type FillSlot<'f> = dyn FnMut(&mut dyn Decode) -> Result<(), DecodeError> + 'f;

/// Array or growable sequence.
pub trait SequenceTarget {
    /// Shape of the elements
    fn element_shape(&self) -> Shape;

    /// Fixed number of elements, `None` for growable sequences
    fn capacity(&self) -> Option<usize> {
        None
    }

    /// Produce elements `0..len` in order, each filled by `fill`.
    ///
    /// Growable sequences append fresh default elements; arrays fill their
    /// existing slots. `len` never exceeds [`SequenceTarget::capacity`].
    fn fill(&mut self, len: usize, fill: &mut FillElement<'_>) -> Result<(), DecodeError>;
}

/// Associative mapping.
pub trait MappingTarget {
    /// Shape of the keys
    fn key_shape(&self) -> Shape;

    /// Shape of the values
    fn value_shape(&self) -> Shape;

    /// Insert one entry whose fresh default key and value are filled by the
    /// callbacks, replacing any previous entry with an equal key.
    fn insert_with(&mut self, key: &mut FillSlot<'_>, value: &mut FillSlot<'_>) -> Result<(), DecodeError>;
}

/// Struct with named fields.
pub trait RecordTarget {
    /// Type name of the record
    fn type_name(&self) -> &'static str;

    /// Field names in declaration order
    fn fields(&self) -> &'static [&'static str];

    /// Writable handle to the field at `index`, `None` if it cannot be written
    fn field(&mut self, index: usize) -> Option<Target<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_width_and_overflow() {
        let mut small = 0i8;
        let mut slot = Int::I8(&mut small);
        assert_eq!(slot.bits(), 8);
        assert!(slot.parse("128").is_err());
        slot.parse("-128").unwrap();
        assert_eq!(small, -128);
    }

    #[test]
    fn test_uint_rejects_sign() {
        let mut value = 0u32;
        let mut slot = Uint::U32(&mut value);
        assert!(slot.parse("-1").is_err());
        assert!(slot.parse("+42").is_err());
        slot.parse("42").unwrap();
        assert_eq!(value, 42);

        let mut signed = 0i32;
        Int::I32(&mut signed).parse("+42").unwrap();
        assert_eq!(signed, 42);
    }

    #[test]
    fn test_float_precision_overflow() {
        let mut value = 0f32;
        let mut slot = Float::F32(&mut value);
        assert_eq!(slot.bits(), 32);
        assert!(slot.parse("1e40").is_err());
        slot.parse("-inf").unwrap();
        assert!(value.is_infinite());

        let mut wide = 0f64;
        Float::F64(&mut wide).parse("1e40").unwrap();
        assert_eq!(wide, 1e40);
    }

    #[test]
    fn test_is_scalar() {
        assert!(Shape::Bool.is_scalar());
        assert!(Shape::Pointer(Box::new(Shape::String)).is_scalar());
        assert!(!Shape::Pointer(Box::new(Shape::Record { name: "Inner" })).is_scalar());
        assert!(!Shape::Sequence(Box::new(Shape::Bool)).is_scalar());
        assert!(!Shape::Unsupported("unit").is_scalar());
    }

    #[test]
    fn test_shape_display() {
        let shape = Shape::Mapping(
            Box::new(Shape::String),
            Box::new(Shape::Sequence(Box::new(Shape::Uint { bits: 64 }))),
        );
        assert_eq!(shape.to_string(), "mapping from string to sequence of u64");
    }
}
