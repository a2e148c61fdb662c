//! Codec synthesis.
//!
//! Builds one [`CodecUnit`] per discovered record type, in discovery order.
//! Bodies are immutable statement values; rendering to any concrete output
//! is a downstream concern.
//!
//! Encode is a short-circuiting conjunction of write steps in member order:
//! a failed write stops evaluation so no later member touches the stream.
//! Decode reads into default-initialized temporaries with the same
//! short-circuit discipline and assigns the target's members only after
//! every read succeeded - a failed decode produces no value, never a
//! partially populated record.

use wiregen_diagnostic::SchemaError;
use wiregen_ir::{
    CodecUnit, DecodeBody, EncodeBody, LocalShape, ReadStep, SchemaArena, StoreStep, TempLocal,
    TypeId, WriteStep,
};

use crate::classify::{classify, MemberShape};
use crate::discover::DiscoveredTypes;

/// Synthesize codec units for every discovered type, in discovery order.
///
/// # Errors
/// Propagates the first classification failure. Callers that obtained
/// `discovered` from [`discover`](crate::discover) have already validated
/// the graph, so this is reachable only when synthesizing ad hoc.
pub fn synthesize(
    arena: &SchemaArena,
    discovered: &DiscoveredTypes,
) -> Result<Vec<CodecUnit>, SchemaError> {
    let mut units = Vec::with_capacity(discovered.len());
    for ty in discovered.iter() {
        units.push(synthesize_unit(arena, ty)?);
    }
    Ok(units)
}

/// Synthesize the encode/decode pair for one record type.
///
/// # Errors
/// [`SchemaError::UnsupportedMemberType`] if any member fails
/// classification; no partial unit is produced.
pub fn synthesize_unit(arena: &SchemaArena, ty: TypeId) -> Result<CodecUnit, SchemaError> {
    let members = classify(arena, ty)?;

    let mut encode = EncodeBody::default();
    let mut decode = DecodeBody::default();

    for (index, member) in members.iter().enumerate() {
        match member.shape {
            MemberShape::Wire { codec, cast } => {
                encode.steps.push(WriteStep::Wire {
                    member: member.name,
                    field: index,
                    codec,
                    cast,
                });
                decode.locals.push(TempLocal {
                    member: member.name,
                    shape: LocalShape::Wire(codec),
                });
                decode.reads.push(ReadStep::Wire { slot: index, codec });
                decode.stores.push(StoreStep {
                    member: member.name,
                    field: index,
                    slot: index,
                    cast,
                });
            }
            MemberShape::Record(nested) => {
                encode.steps.push(WriteStep::Nested {
                    member: member.name,
                    field: index,
                    nested,
                });
                decode.locals.push(TempLocal {
                    member: member.name,
                    shape: LocalShape::Record(nested),
                });
                decode.reads.push(ReadStep::Nested {
                    slot: index,
                    nested,
                });
                decode.stores.push(StoreStep {
                    member: member.name,
                    field: index,
                    slot: index,
                    cast: None,
                });
            }
        }
    }

    Ok(CodecUnit { ty, encode, decode })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "test code uses unwrap for concise assertions")]

    use super::*;
    use crate::discover::discover;
    use pretty_assertions::assert_eq;
    use wiregen_ir::{EnumCast, Primitive, SchemaBuilder, WireCodec};

    #[test]
    fn vector2_bodies() {
        let mut schema = SchemaBuilder::new();
        let float = schema.primitive("float", Primitive::F32);
        let vec2 = schema.record("Vector2", |t| {
            t.field("x", float);
            t.field("y", float);
        });
        let arena = schema.finish();

        let unit = synthesize_unit(&arena, vec2).unwrap();
        let x = arena.intern("x");
        let y = arena.intern("y");

        assert_eq!(
            unit.encode.steps,
            vec![
                WriteStep::Wire { member: x, field: 0, codec: WireCodec::Float, cast: None },
                WriteStep::Wire { member: y, field: 1, codec: WireCodec::Float, cast: None },
            ]
        );
        assert_eq!(
            unit.decode.reads,
            vec![
                ReadStep::Wire { slot: 0, codec: WireCodec::Float },
                ReadStep::Wire { slot: 1, codec: WireCodec::Float },
            ]
        );
        assert_eq!(unit.decode.locals.len(), 2);
        assert_eq!(
            unit.decode.stores,
            vec![
                StoreStep { member: x, field: 0, slot: 0, cast: None },
                StoreStep { member: y, field: 1, slot: 1, cast: None },
            ]
        );
    }

    #[test]
    fn empty_record_is_trivial() {
        let mut schema = SchemaBuilder::new();
        let ping = schema.record("Ping", |_| {});
        let arena = schema.finish();

        let unit = synthesize_unit(&arena, ping).unwrap();
        assert!(unit.is_trivial());
        assert!(unit.decode.locals.is_empty());
        assert!(unit.decode.stores.is_empty());
    }

    #[test]
    fn enum_member_casts_on_both_sides() {
        let mut schema = SchemaBuilder::new();
        let state = schema.enum_type("State", Primitive::U8);
        let msg = schema.record("Status", |t| t.field("state", state));
        let arena = schema.finish();

        let unit = synthesize_unit(&arena, msg).unwrap();
        let expected_cast = Some(EnumCast {
            enum_ty: state,
            underlying: Primitive::U8,
        });

        match unit.encode.steps[0] {
            WriteStep::Wire { codec, cast, .. } => {
                assert_eq!(codec, WireCodec::Byte);
                assert_eq!(cast, expected_cast);
            }
            other => panic!("expected wire write, got {other:?}"),
        }
        assert_eq!(unit.decode.stores[0].cast, expected_cast);
    }

    #[test]
    fn nested_members_call_the_nested_codec() {
        let mut schema = SchemaBuilder::new();
        let float = schema.primitive("float", Primitive::F32);
        let vec2 = schema.record("Vector2", |t| {
            t.field("x", float);
            t.field("y", float);
        });
        let seg = schema.record("Segment", |t| {
            t.field("from", vec2);
            t.field("to", vec2);
        });
        let arena = schema.finish();

        let unit = synthesize_unit(&arena, seg).unwrap();
        let from = arena.intern("from");
        let to = arena.intern("to");

        assert_eq!(
            unit.encode.steps,
            vec![
                WriteStep::Nested { member: from, field: 0, nested: vec2 },
                WriteStep::Nested { member: to, field: 1, nested: vec2 },
            ]
        );
        assert_eq!(
            unit.decode.reads,
            vec![
                ReadStep::Nested { slot: 0, nested: vec2 },
                ReadStep::Nested { slot: 1, nested: vec2 },
            ]
        );
    }

    #[test]
    fn units_follow_discovery_order() {
        let mut schema = SchemaBuilder::new();
        let float = schema.primitive("float", Primitive::F32);
        let vec2 = schema.record("Vector2", |t| {
            t.field("x", float);
            t.field("y", float);
        });
        let seg = schema.record("Segment", |t| {
            t.field("from", vec2);
            t.field("to", vec2);
        });
        let arena = schema.finish();

        let discovered = discover(&arena, seg).unwrap();
        let units = synthesize(&arena, &discovered).unwrap();
        let order: Vec<_> = units.iter().map(|u| u.ty).collect();
        assert_eq!(order, vec![seg, vec2]);
    }

    #[test]
    fn mutually_recursive_units_reference_each_other_once() {
        let mut schema = SchemaBuilder::new();
        let a = schema.declare_record("A");
        let b = schema.declare_record("B");
        schema.define_record(a, |t| t.field("b", b));
        schema.define_record(b, |t| t.field("a", a));
        let arena = schema.finish();

        let discovered = discover(&arena, a).unwrap();
        let units = synthesize(&arena, &discovered).unwrap();
        assert_eq!(units.len(), 2);

        let nested_of = |unit: &CodecUnit| match unit.encode.steps[..] {
            [WriteStep::Nested { nested, .. }] => nested,
            ref other => panic!("expected single nested write, got {other:?}"),
        };
        assert_eq!(nested_of(&units[0]), b);
        assert_eq!(nested_of(&units[1]), a);
    }

    #[test]
    fn synthesis_is_deterministic() {
        let mut schema = SchemaBuilder::new();
        let float = schema.primitive("float", Primitive::F32);
        let state = schema.enum_type("State", Primitive::U16);
        let msg = schema.record("Update", |t| {
            t.field("position", float);
            t.field("state", state);
            t.property("version", float);
        });
        let arena = schema.finish();

        let first = synthesize_unit(&arena, msg).unwrap();
        let second = synthesize_unit(&arena, msg).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unsupported_member_produces_no_unit() {
        let mut schema = SchemaBuilder::new();
        let handle = schema.reference("AssetHandle");
        let bad = schema.record("Bad", |t| t.field("handle", handle));
        let arena = schema.finish();

        let err = synthesize_unit(&arena, bad).unwrap_err();
        assert_eq!(err.ty(), bad);
    }
}
