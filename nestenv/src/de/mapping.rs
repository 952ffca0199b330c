//! Decoder for associative mappings

use std::collections::BTreeSet;

use super::scalar::assign;
use super::Engine;
use crate::error::DecodeError;
use crate::name::Context;
use crate::namespace::Namespace;
use crate::shape::MappingTarget;

impl Engine {
    /// Rebuild a mapping from the entries below `name + separator`.
    ///
    /// With scalar values each sub-key is a map key. With container values the
    /// map key is the sub-key's leading segment and the value is decoded from
    /// the view below `key + separator`. Keys are parsed as scalars of the
    /// declared key shape.
    pub(super) fn decode_mapping(
        &self,
        ctx: &Context,
        mapping: &mut dyn MappingTarget,
        ns: &Namespace,
        depth: usize,
    ) -> Result<(), DecodeError> {
        let name = ctx.resolve(&self.separator);
        let view = self.scope(&name, ns);
        if view.is_empty() {
            return Err(DecodeError::missing(ns.qualify(&name)));
        }

        let key_shape = mapping.key_shape();
        if !key_shape.is_scalar() {
            return Err(DecodeError::unsupported(ns.qualify(&name), format!("map key {key_shape}")));
        }

        let scalar = mapping.value_shape().is_scalar();
        let keys: BTreeSet<&str> = view
            .keys()
            .map(|key| if scalar { key } else { self.leading_segment(key) })
            .collect();

        for key in keys {
            let qualified = view.qualify(key);
            mapping.insert_with(
                &mut |slot| assign(slot.target(), key, &qualified),
                &mut |slot| {
                    if scalar {
                        self.decode(&Context::verbatim(key), slot.target(), &view, depth + 1)
                    } else {
                        let inner = self.scope(key, &view);
                        self.decode(&ctx.rerooted(), slot.target(), &inner, depth + 1)
                    }
                },
            )?;
        }
        Ok(())
    }
}
