//! Decoder for optional and shared references

use super::Engine;
use crate::error::DecodeError;
use crate::name::Context;
use crate::namespace::Namespace;
use crate::shape::PointerTarget;

impl Engine {
    /// Auto-vivify the referent and decode into it.
    ///
    /// A container referent is decoded from the view below `name + separator`
    /// with a fresh, empty naming context. A scalar referent has no children and
    /// is read at the pointer's own name.
    pub(super) fn decode_pointer(
        &self,
        ctx: &Context,
        pointer: &mut dyn PointerTarget,
        ns: &Namespace,
        depth: usize,
    ) -> Result<(), DecodeError> {
        let scalar = pointer.pointee_shape().is_scalar();
        let name = ctx.resolve(&self.separator);
        let Some(referent) = pointer.referent() else {
            return Err(DecodeError::not_addressable(ns.qualify(&name)));
        };

        if scalar {
            return self.decode(ctx, referent.target(), ns, depth + 1);
        }

        let view = self.scope(&name, ns);
        self.decode(&ctx.rerooted(), referent.target(), &view, depth + 1)
    }
}
