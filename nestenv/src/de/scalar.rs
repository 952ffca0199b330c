//! Decoders for values read from a single entry

use super::expand::expand;
use super::Engine;
use crate::error::DecodeError;
use crate::name::Context;
use crate::namespace::Namespace;
use crate::shape::{Float, Int, LeafTarget, Shape, Target, Uint};

impl Engine {
    /// Resolve the node's name and fetch its raw value
    fn lookup<'n>(&self, ctx: &Context, ns: &'n Namespace) -> Result<(String, &'n str), DecodeError> {
        let name = ctx.resolve(&self.separator);
        match ns.get(&name) {
            Some(raw) => Ok((ns.qualify(&name), raw)),
            None => Err(DecodeError::missing(ns.qualify(&name))),
        }
    }

    pub(super) fn decode_bool(&self, ctx: &Context, slot: &mut bool, ns: &Namespace) -> Result<(), DecodeError> {
        let (name, raw) = self.lookup(ctx, ns)?;
        *slot = parse_bool(raw)
            .ok_or_else(|| DecodeError::malformed(name, &Shape::Bool, format!("invalid syntax {raw:?}")))?;
        Ok(())
    }

    pub(super) fn decode_int(&self, ctx: &Context, mut slot: Int<'_>, ns: &Namespace) -> Result<(), DecodeError> {
        let (name, raw) = self.lookup(ctx, ns)?;
        slot.parse(raw).map_err(|e| {
            DecodeError::malformed(name, &Shape::Int { bits: slot.bits() }, e)
        })
    }

    pub(super) fn decode_uint(&self, ctx: &Context, mut slot: Uint<'_>, ns: &Namespace) -> Result<(), DecodeError> {
        let (name, raw) = self.lookup(ctx, ns)?;
        slot.parse(raw).map_err(|e| {
            DecodeError::malformed(name, &Shape::Uint { bits: slot.bits() }, e)
        })
    }

    pub(super) fn decode_float(&self, ctx: &Context, mut slot: Float<'_>, ns: &Namespace) -> Result<(), DecodeError> {
        let (name, raw) = self.lookup(ctx, ns)?;
        slot.parse(raw).map_err(|e| {
            DecodeError::malformed(name, &Shape::Float { bits: slot.bits() }, e)
        })
    }

    /// Strings are expanded against the live process environment.
    pub(super) fn decode_string(&self, ctx: &Context, slot: &mut String, ns: &Namespace) -> Result<(), DecodeError> {
        let (_, raw) = self.lookup(ctx, ns)?;
        *slot = expand(raw);
        Ok(())
    }

    pub(super) fn decode_leaf(
        &self,
        ctx: &Context,
        mut leaf: Box<dyn LeafTarget + '_>,
        ns: &Namespace,
    ) -> Result<(), DecodeError> {
        let (name, raw) = self.lookup(ctx, ns)?;
        leaf.parse(raw).map_err(|e| {
            DecodeError::malformed(name, &Shape::Leaf { type_name: leaf.type_name() }, e)
        })
    }
}

/// Store raw key text into a scalar target, without expansion.
///
/// Used for mapping keys, which come from the namespace's key side.
pub(super) fn assign(target: Target<'_>, raw: &str, name: &str) -> Result<(), DecodeError> {
    let shape = target.shape();
    match target {
        Target::Bool(slot) => {
            *slot = parse_bool(raw)
                .ok_or_else(|| DecodeError::malformed(name, &shape, format!("invalid syntax {raw:?}")))?;
            Ok(())
        }
        Target::Int(mut slot) => slot.parse(raw).map_err(|e| DecodeError::malformed(name, &shape, e)),
        Target::Uint(mut slot) => slot.parse(raw).map_err(|e| DecodeError::malformed(name, &shape, e)),
        Target::Float(mut slot) => slot.parse(raw).map_err(|e| DecodeError::malformed(name, &shape, e)),
        Target::String(slot) => {
            raw.clone_into(slot);
            Ok(())
        }
        Target::Leaf(mut leaf) => leaf.parse(raw).map_err(|e| DecodeError::malformed(name, &shape, e)),
        Target::Pointer(pointer) => match pointer.referent() {
            Some(referent) => assign(referent.target(), raw, name),
            None => Err(DecodeError::not_addressable(name)),
        },
        Target::Sequence(_) | Target::Mapping(_) | Target::Record(_) | Target::Unsupported(_) => {
            Err(DecodeError::unsupported(name, shape))
        }
    }
}

/// Accepts the same spellings as Go's `strconv.ParseBool`
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
