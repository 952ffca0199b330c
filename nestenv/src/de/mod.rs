//! Recursive, shape-directed decode engine
//!
//! [`Engine::decode`] is the single entry point of the recursion. It matches on
//! the target's shape and hands over to one of the shape decoders in the
//! submodules, which narrow the namespace and re-enter `decode` for nested
//! values.

mod expand;
mod mapping;
mod pointer;
mod record;
mod scalar;
mod sequence;

use log::trace;

use crate::error::DecodeError;
use crate::name::Context;
use crate::namespace::Namespace;
use crate::shape::Target;

pub use crate::impls::{Parsed, With};

/// Settings shared by every frame of one decode.
#[derive(Debug, Clone)]
pub(crate) struct Engine {
    /// Separator with the case policy already applied
    separator: String,
    max_depth: usize,
}

impl Engine {
    pub(crate) fn new(separator: String, max_depth: usize) -> Self {
        Engine {
            separator,
            max_depth,
        }
    }

    pub(crate) fn decode(
        &self,
        ctx: &Context,
        target: Target<'_>,
        ns: &Namespace,
        depth: usize,
    ) -> Result<(), DecodeError> {
        if depth > self.max_depth {
            return Err(DecodeError::DepthExceeded {
                name: ns.qualify(&ctx.resolve(&self.separator)),
                limit: self.max_depth,
            });
        }

        trace!(
            "Decoding {:?} as {} (depth {depth})",
            ns.qualify(&ctx.resolve(&self.separator)),
            target.shape()
        );

        match target {
            Target::Bool(slot) => self.decode_bool(ctx, slot, ns),
            Target::Int(slot) => self.decode_int(ctx, slot, ns),
            Target::Uint(slot) => self.decode_uint(ctx, slot, ns),
            Target::Float(slot) => self.decode_float(ctx, slot, ns),
            Target::String(slot) => self.decode_string(ctx, slot, ns),
            Target::Leaf(leaf) => self.decode_leaf(ctx, leaf, ns),
            Target::Pointer(pointer) => self.decode_pointer(ctx, pointer, ns, depth),
            Target::Sequence(sequence) => self.decode_sequence(ctx, sequence, ns, depth),
            Target::Mapping(mapping) => self.decode_mapping(ctx, mapping, ns, depth),
            Target::Record(record) => self.decode_record(ctx, record, ns, depth),
            Target::Unsupported(what) => Err(DecodeError::unsupported(
                ns.qualify(&ctx.resolve(&self.separator)),
                what,
            )),
        }
    }

    /// View holding the children of the node called `name`.
    ///
    /// An empty name means the node already is the root of `ns`.
    fn scope(&self, name: &str, ns: &Namespace) -> Namespace {
        if name.is_empty() {
            ns.clone()
        } else {
            ns.narrow(&format!("{name}{}", self.separator))
        }
    }

    /// Key segment up to the first separator
    fn leading_segment<'k>(&self, key: &'k str) -> &'k str {
        key.split_once(self.separator.as_str())
            .map_or(key, |(head, _)| head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::Case;
    use crate::shape::{RecordTarget, Shape};
    use crate::Decode;

    fn engine() -> Engine {
        Engine::new("_".to_string(), 8)
    }

    #[test]
    fn test_scope_and_segments() {
        let ns = Namespace::from_iter([("LIST_0_A", "x"), ("LIST_1", "y")]);
        let engine = engine();

        let scoped = engine.scope("LIST", &ns);
        assert_eq!(scoped.origin(), "LIST_");
        assert_eq!(engine.scope("", &scoped), scoped);

        assert_eq!(engine.leading_segment("0_A"), "0");
        assert_eq!(engine.leading_segment("1"), "1");
    }

    #[test]
    fn test_unsupported_shape_reports_name() {
        let mut unit = ();
        let err = engine()
            .decode(&Context::root("NOTHING", Case::None), unit.target(), &Namespace::new(), 0)
            .unwrap_err();
        match err {
            DecodeError::UnsupportedShape { name, shape } => {
                assert_eq!(name, "NOTHING");
                assert_eq!(shape, "unit");
            }
            other => panic!("Expected UnsupportedShape, got {other:?}"),
        }
    }

    #[derive(Default)]
    struct Chain {
        next: Option<Box<Chain>>,
    }

    impl Decode for Chain {
        fn shape() -> Shape {
            Shape::Record { name: "Chain" }
        }

        fn placeholder() -> Self {
            Self::default()
        }

        fn target(&mut self) -> Target<'_> {
            Target::Record(self)
        }
    }

    impl RecordTarget for Chain {
        fn type_name(&self) -> &'static str {
            "Chain"
        }

        fn fields(&self) -> &'static [&'static str] {
            &["next"]
        }

        fn field(&mut self, index: usize) -> Option<Target<'_>> {
            match index {
                0 => Some(self.next.target()),
                _ => None,
            }
        }
    }

    #[test]
    fn test_self_referential_shape_hits_depth_limit() {
        let mut chain = Chain::default();
        let err = engine()
            .decode(&Context::root("", Case::None), chain.target(), &Namespace::new(), 0)
            .unwrap_err();
        assert!(matches!(err, DecodeError::DepthExceeded { limit: 8, .. }));
        assert!(chain.next.is_some());
    }
}
