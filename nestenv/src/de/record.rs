//! Decoder for structs with named fields

use super::Engine;
use crate::error::DecodeError;
use crate::name::Context;
use crate::namespace::Namespace;
use crate::shape::{RecordTarget, Target};

impl Engine {
    /// Decode every field in declaration order against the same namespace.
    ///
    /// Fields are addressed by their full key path, so the namespace is not
    /// narrowed here. Record-shaped fields become an ancestor of their own
    /// fields. The first failing field aborts the record; fields decoded before
    /// it keep their values.
    pub(super) fn decode_record(
        &self,
        ctx: &Context,
        record: &mut dyn RecordTarget,
        ns: &Namespace,
        depth: usize,
    ) -> Result<(), DecodeError> {
        for (index, &field) in record.fields().iter().enumerate() {
            let Some(target) = record.field(index) else {
                let name = ctx.field(field, false).resolve(&self.separator);
                return Err(DecodeError::not_addressable(ns.qualify(&name)));
            };

            let nests = matches!(target, Target::Record(_));
            self.decode(&ctx.field(field, nests), target, ns, depth + 1)?;
        }
        Ok(())
    }
}
