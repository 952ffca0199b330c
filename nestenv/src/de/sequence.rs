//! Decoder for arrays and growable sequences

use std::collections::BTreeMap;

use super::Engine;
use crate::error::DecodeError;
use crate::name::Context;
use crate::namespace::Namespace;
use crate::shape::SequenceTarget;

/// Expectation reported for bad index segments
const DENSE_INDEX: &str = "sequence index";

impl Engine {
    /// Rebuild a sequence from the entries below `name + separator`.
    ///
    /// The leading segment of every sub-key is an element index. Scalar
    /// elements are read from the entry named by the index; container elements
    /// are decoded from the view below `index + separator`. The indices must
    /// form the run `0..count`.
    pub(super) fn decode_sequence(
        &self,
        ctx: &Context,
        sequence: &mut dyn SequenceTarget,
        ns: &Namespace,
        depth: usize,
    ) -> Result<(), DecodeError> {
        let name = ctx.resolve(&self.separator);
        let view = self.scope(&name, ns);
        if view.is_empty() {
            return Err(DecodeError::missing(ns.qualify(&name)));
        }

        // one segment per distinct index, ordered by index
        let mut segments: BTreeMap<usize, &str> = BTreeMap::new();
        for key in view.keys() {
            let segment = self.leading_segment(key);
            let index = segment.parse::<usize>().map_err(|e| DecodeError::MalformedValue {
                name: view.qualify(segment),
                expected: DENSE_INDEX.to_string(),
                message: e.to_string(),
            })?;
            if let Some(seen) = segments.insert(index, segment) {
                if seen != segment {
                    return Err(DecodeError::MalformedValue {
                        name: view.qualify(segment),
                        expected: DENSE_INDEX.to_string(),
                        message: format!("index {index} is also spelled {seen:?}"),
                    });
                }
            }
        }

        if let Some(gap) = segments.keys().enumerate().find(|(position, index)| position != *index) {
            return Err(DecodeError::MalformedValue {
                name: ns.qualify(&name),
                expected: DENSE_INDEX.to_string(),
                message: format!("element {} is missing, found index {} instead", gap.0, gap.1),
            });
        }
        if let Some(capacity) = sequence.capacity() {
            if segments.len() > capacity {
                return Err(DecodeError::MalformedValue {
                    name: ns.qualify(&name),
                    expected: DENSE_INDEX.to_string(),
                    message: format!("{} elements do not fit an array of length {capacity}", segments.len()),
                });
            }
        }

        let scalar = sequence.element_shape().is_scalar();
        let segments: Vec<&str> = segments.into_values().collect();
        sequence.fill(segments.len(), &mut |index, element| {
            let segment = segments[index];
            if scalar {
                self.decode(&Context::verbatim(segment), element.target(), &view, depth + 1)
            } else {
                let inner = self.scope(segment, &view);
                self.decode(&ctx.rerooted(), element.target(), &inner, depth + 1)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::Case;
    use crate::shape::{RecordTarget, Shape, Target};
    use crate::Decode;

    fn decode<T: Decode>(ns: &Namespace, name: &str, value: &mut T) -> Result<(), DecodeError> {
        Engine::new("_".to_string(), 16).decode(&Context::root(name, Case::None), value.target(), ns, 0)
    }

    #[test]
    fn test_order_comes_from_indices() {
        let ns = Namespace::from_iter([
            ("MyFoo_Values_3", "0"),
            ("MyFoo_Values_1", "2"),
            ("MyFoo_Values_0", "3"),
            ("MyFoo_Values_2", "1"),
        ]);
        let mut values: Vec<u64> = Vec::new();
        decode(&ns, "MyFoo_Values", &mut values).unwrap();
        assert_eq!(values, [3, 2, 1, 0]);
    }

    #[test]
    fn test_indices_beyond_nine_sort_numerically() {
        let ns: Namespace = (0..12).map(|i| (format!("L_{i}"), i.to_string())).collect();
        let mut values: Vec<i32> = Vec::new();
        decode(&ns, "L", &mut values).unwrap();
        assert_eq!(values, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_appends_to_existing_elements() {
        let ns = Namespace::from_iter([("S_0", "a"), ("S_1", "b")]);
        let mut values = vec!["existing".to_string()];
        decode(&ns, "S", &mut values).unwrap();
        assert_eq!(values, ["existing", "a", "b"]);
    }

    #[test]
    fn test_missing_sequence() {
        let ns = Namespace::from_iter([("OTHER_0", "1")]);
        let mut values: Vec<i32> = Vec::new();
        let err = decode(&ns, "SLICE", &mut values).unwrap_err();
        assert!(matches!(err, DecodeError::MissingKey { name } if name == "SLICE"));
    }

    #[test]
    fn test_non_numeric_index() {
        let ns = Namespace::from_iter([("SLICE_0", "1"), ("SLICE_x", "2")]);
        let mut values: Vec<i32> = Vec::new();
        let err = decode(&ns, "SLICE", &mut values).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedValue { name, .. } if name == "SLICE_x"));
    }

    #[test]
    fn test_gap_in_indices() {
        let ns = Namespace::from_iter([("SLICE_0", "1"), ("SLICE_2", "2"), ("SLICE_5", "3")]);
        let mut values: Vec<i32> = Vec::new();
        match decode(&ns, "SLICE", &mut values).unwrap_err() {
            DecodeError::MalformedValue { name, message, .. } => {
                assert_eq!(name, "SLICE");
                assert!(message.contains("element 1"));
            }
            other => panic!("Expected MalformedValue, got {other:?}"),
        }
        assert!(values.is_empty());
    }

    #[test]
    fn test_index_spelled_twice() {
        let ns = Namespace::from_iter([("L_0", "z"), ("L_01", "a"), ("L_1", "b")]);
        let mut values: Vec<String> = Vec::new();
        match decode(&ns, "L", &mut values).unwrap_err() {
            DecodeError::MalformedValue { name, message, .. } => {
                assert_eq!(name, "L_1");
                assert!(message.contains("\"01\""));
            }
            other => panic!("Expected MalformedValue, got {other:?}"),
        }
        assert!(values.is_empty());
    }

    #[test]
    fn test_fixed_array() {
        let ns = Namespace::from_iter([("A_0", "7"), ("A_1", "8")]);
        let mut values = [0u8; 3];
        decode(&ns, "A", &mut values).unwrap();
        assert_eq!(values, [7, 8, 0]);

        let mut small = [0u8; 1];
        assert!(matches!(
            decode(&ns, "A", &mut small),
            Err(DecodeError::MalformedValue { .. })
        ));
    }

    #[test]
    fn test_nested_sequences() {
        let ns = Namespace::from_iter([("M_0_0", "1"), ("M_0_1", "2"), ("M_1_0", "3")]);
        let mut matrix: Vec<Vec<i32>> = Vec::new();
        decode(&ns, "M", &mut matrix).unwrap();
        assert_eq!(matrix, [vec![1, 2], vec![3]]);
    }

    #[test]
    fn test_optional_scalar_elements() {
        let ns = Namespace::from_iter([("O_0", "true"), ("O_1", "f")]);
        let mut flags: Vec<Option<bool>> = Vec::new();
        decode(&ns, "O", &mut flags).unwrap();
        assert_eq!(flags, [Some(true), Some(false)]);
    }

    #[derive(Debug, Default, PartialEq)]
    struct Foo {
        foo: String,
        bar: f64,
    }

    impl Decode for Foo {
        fn shape() -> Shape {
            Shape::Record { name: "Foo" }
        }

        fn placeholder() -> Self {
            Self::default()
        }

        fn target(&mut self) -> Target<'_> {
            Target::Record(self)
        }
    }

    impl RecordTarget for Foo {
        fn type_name(&self) -> &'static str {
            "Foo"
        }

        fn fields(&self) -> &'static [&'static str] {
            &["Foo", "Bar"]
        }

        fn field(&mut self, index: usize) -> Option<Target<'_>> {
            match index {
                0 => Some(self.foo.target()),
                1 => Some(self.bar.target()),
                _ => None,
            }
        }
    }

    #[test]
    fn test_record_elements() {
        let ns = Namespace::from_iter([
            ("ACME_SLICE_0_Foo", "foo 0"),
            ("ACME_SLICE_0_Bar", "0"),
            ("ACME_SLICE_1_Foo", "foo 1"),
            ("ACME_SLICE_1_Bar", "1.1"),
            ("ACME_SLICE_2_Foo", "foo 2"),
            ("ACME_SLICE_2_Bar", "2.2"),
        ])
        .narrow("ACME_");
        let mut values: Vec<Foo> = Vec::new();
        decode(&ns, "SLICE", &mut values).unwrap();

        let expected: Vec<Foo> = [("foo 0", 0.0), ("foo 1", 1.1), ("foo 2", 2.2)]
            .into_iter()
            .map(|(foo, bar)| Foo {
                foo: foo.to_string(),
                bar,
            })
            .collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_record_element_missing_field_is_fully_named() {
        let ns = Namespace::from_iter([("ACME_SLICE_0_Foo", "foo 0")]).narrow("ACME_");
        let mut values: Vec<Foo> = Vec::new();
        let err = decode(&ns, "SLICE", &mut values).unwrap_err();
        assert!(matches!(err, DecodeError::MissingKey { name } if name == "ACME_SLICE_0_Bar"));
    }
}
