//! Codec unit interpretation.
//!
//! [`CodecEngine`] executes encode/decode bodies with exactly the semantics
//! the synthesized statements describe:
//!
//! - encode is a left-to-right conjunction; the first refused write stops
//!   evaluation and the procedure reports `false`
//! - decode reads into temporaries with the same short-circuit discipline
//!   and assembles the result only after every read succeeded; a short read
//!   yields `None`, never a partial record
//!
//! [`EvalError`] is the interpreter's own taxonomy for host mistakes (a
//! value that does not conform to the schema, a missing unit). It is
//! deliberately separate from schema errors: a generated codec cannot fail
//! these ways, only a caller driving the engine by hand can.

use rustc_hash::FxHashMap;
use thiserror::Error;
use wiregen_ir::{
    CodecUnit, EnumCast, LocalShape, Primitive, ReadStep, SchemaArena, TypeId, WriteStep,
};

use crate::value::Value;
use crate::wire::{WireReader, WireWriter};

/// Interpreter-level error: the caller handed the engine something that
/// does not conform to the schema.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum EvalError {
    /// No codec unit was registered for a type the body references.
    #[error("no codec unit registered for type `{type_name}`")]
    MissingUnit { type_name: String },

    /// A value does not have the shape the schema declares.
    #[error("value does not conform to `{type_name}`: {detail}")]
    ValueShape { type_name: String, detail: String },

    /// An enum cast was applied to a value that is not that enum.
    #[error("cannot cast value through enum `{type_name}`")]
    InvalidCast { type_name: String },
}

/// Executes codec units against values and a wire capability.
pub struct CodecEngine<'a> {
    arena: &'a SchemaArena,
    units: FxHashMap<TypeId, CodecUnit>,
}

impl<'a> CodecEngine<'a> {
    /// Build an engine over the units of one compilation run.
    pub fn new(arena: &'a SchemaArena, units: &[CodecUnit]) -> Self {
        CodecEngine {
            arena,
            units: units.iter().map(|u| (u.ty, u.clone())).collect(),
        }
    }

    /// The registered unit for a type, if any.
    pub fn unit(&self, ty: TypeId) -> Option<&CodecUnit> {
        self.units.get(&ty)
    }

    fn require_unit(&self, ty: TypeId) -> Result<&CodecUnit, EvalError> {
        self.units.get(&ty).ok_or_else(|| EvalError::MissingUnit {
            type_name: self.arena.type_name(ty).to_owned(),
        })
    }

    fn shape_error(&self, ty: TypeId, detail: impl Into<String>) -> EvalError {
        EvalError::ValueShape {
            type_name: self.arena.type_name(ty).to_owned(),
            detail: detail.into(),
        }
    }

    /// Run the encode procedure for `ty` against `value`.
    ///
    /// `Ok(false)` means a write was refused and evaluation stopped there,
    /// leaving the stream position at the last accepted write - the
    /// generated-code contract, not an error.
    pub fn encode(
        &self,
        ty: TypeId,
        value: &Value,
        writer: &mut dyn WireWriter,
    ) -> Result<bool, EvalError> {
        let unit = self.require_unit(ty)?;
        let Value::Record(value_ty, fields) = value else {
            return Err(self.shape_error(ty, "expected a record value"));
        };
        if *value_ty != ty {
            return Err(self.shape_error(ty, "record value has a different type identity"));
        }

        for step in &unit.encode.steps {
            match *step {
                WriteStep::Wire {
                    field, codec, cast, ..
                } => {
                    let Some(field_value) = fields.get(field) else {
                        return Err(self.shape_error(ty, "record value is missing fields"));
                    };
                    let wire_value = match cast {
                        Some(cast) => self.enum_to_wire(cast, field_value)?,
                        None => field_value.clone(),
                    };
                    if !wire_value.matches_codec(codec) {
                        return Err(self.shape_error(ty, "field value does not match its codec"));
                    }
                    if !writer.write(codec, &wire_value) {
                        return Ok(false);
                    }
                }
                WriteStep::Nested { field, nested, .. } => {
                    let Some(field_value) = fields.get(field) else {
                        return Err(self.shape_error(ty, "record value is missing fields"));
                    };
                    if !self.encode(nested, field_value, writer)? {
                        return Ok(false);
                    }
                }
            }
        }
        Ok(true)
    }

    /// Run the decode procedure for `ty`.
    ///
    /// `Ok(None)` means a read failed partway; no value is produced.
    pub fn decode(
        &self,
        ty: TypeId,
        reader: &mut dyn WireReader,
    ) -> Result<Option<Value>, EvalError> {
        let unit = self.require_unit(ty)?;

        // Temporaries only; the result is untouched until every read lands.
        let mut locals: Vec<Value> = unit
            .decode
            .locals
            .iter()
            .map(|local| match local.shape {
                LocalShape::Wire(codec) => Value::zero_wire(codec),
                LocalShape::Record(nested) => Value::Record(nested, Vec::new()),
            })
            .collect();

        for read in &unit.decode.reads {
            match *read {
                ReadStep::Wire { slot, codec } => match reader.read(codec) {
                    Some(value) => locals[slot] = value,
                    None => return Ok(None),
                },
                ReadStep::Nested { slot, nested } => match self.decode(nested, reader)? {
                    Some(value) => locals[slot] = value,
                    None => return Ok(None),
                },
            }
        }

        let mut fields = Vec::with_capacity(unit.decode.stores.len());
        for store in &unit.decode.stores {
            let value = locals[store.slot].clone();
            let value = match store.cast {
                Some(cast) => self.wire_to_enum(cast, &value)?,
                None => value,
            };
            fields.push(value);
        }
        Ok(Some(Value::Record(ty, fields)))
    }

    /// Narrow an enum value to its underlying wire form.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn enum_to_wire(&self, cast: EnumCast, value: &Value) -> Result<Value, EvalError> {
        let invalid = || EvalError::InvalidCast {
            type_name: self.arena.type_name(cast.enum_ty).to_owned(),
        };
        let Value::Enum(value_ty, raw) = value else {
            return Err(invalid());
        };
        if *value_ty != cast.enum_ty {
            return Err(invalid());
        }
        let raw = *raw;
        match cast.underlying {
            Primitive::U8 => Ok(Value::U8(raw as u8)),
            Primitive::I16 => Ok(Value::I16(raw as i16)),
            Primitive::U16 => Ok(Value::U16(raw as u16)),
            Primitive::I32 => Ok(Value::I32(raw as i32)),
            Primitive::U32 => Ok(Value::U32(raw as u32)),
            Primitive::I64 => Ok(Value::I64(raw)),
            Primitive::U64 => Ok(Value::U64(raw as u64)),
            _ => Err(invalid()),
        }
    }

    /// Widen a read wire value back into the enum type.
    #[allow(clippy::cast_possible_wrap)]
    fn wire_to_enum(&self, cast: EnumCast, value: &Value) -> Result<Value, EvalError> {
        let raw = match *value {
            Value::U8(v) => i64::from(v),
            Value::I16(v) => i64::from(v),
            Value::U16(v) => i64::from(v),
            Value::I32(v) => i64::from(v),
            Value::U32(v) => i64::from(v),
            Value::I64(v) => v,
            Value::U64(v) => v as i64,
            _ => {
                return Err(EvalError::InvalidCast {
                    type_name: self.arena.type_name(cast.enum_ty).to_owned(),
                })
            }
        };
        Ok(Value::Enum(cast.enum_ty, raw))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "test code uses unwrap for concise assertions")]

    use super::*;
    use pretty_assertions::assert_eq;
    use wiregen_codegen::{discover, synthesize};
    use wiregen_ir::{ContainerBase, Primitive, SchemaArena, SchemaBuilder};

    use crate::wire::{FlakyWriter, MemoryWire};

    fn compile(arena: &SchemaArena, root: TypeId) -> Vec<CodecUnit> {
        let discovered = discover(arena, root).unwrap();
        synthesize(arena, &discovered).unwrap()
    }

    fn vector2_schema() -> (SchemaArena, TypeId) {
        let mut schema = SchemaBuilder::new();
        let float = schema.primitive("float", Primitive::F32);
        let vec2 = schema.record("Vector2", |t| {
            t.field("x", float);
            t.field("y", float);
        });
        (schema.finish(), vec2)
    }

    #[test]
    fn flat_record_round_trips() {
        let (arena, vec2) = vector2_schema();
        let units = compile(&arena, vec2);
        let engine = CodecEngine::new(&arena, &units);

        let value = Value::Record(vec2, vec![Value::F32(1.5), Value::F32(-2.0)]);
        let mut wire = MemoryWire::new();
        assert_eq!(engine.encode(vec2, &value, &mut wire), Ok(true));
        assert_eq!(wire.len(), 2);

        let decoded = engine.decode(vec2, &mut wire).unwrap();
        assert_eq!(decoded, Some(value));
    }

    #[test]
    fn nested_record_round_trips() {
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
        let units = compile(&arena, seg);
        let engine = CodecEngine::new(&arena, &units);

        let value = Value::Record(
            seg,
            vec![
                Value::Record(vec2, vec![Value::F32(0.0), Value::F32(1.0)]),
                Value::Record(vec2, vec![Value::F32(2.0), Value::F32(3.0)]),
            ],
        );
        let mut wire = MemoryWire::new();
        assert_eq!(engine.encode(seg, &value, &mut wire), Ok(true));
        // Nested encodes flatten to four float writes.
        assert_eq!(wire.len(), 4);

        let decoded = engine.decode(seg, &mut wire).unwrap();
        assert_eq!(decoded, Some(value));
    }

    #[test]
    fn enum_and_container_round_trip() {
        let mut schema = SchemaBuilder::new();
        let state = schema.enum_type("State", Primitive::U8);
        let short = schema.primitive("short", Primitive::I16);
        let samples = schema.container("FixedList32<short>", ContainerBase::FixedList32, short);
        let name = schema.primitive("FixedString32", Primitive::FixedString32);
        let msg = schema.record("Telemetry", |t| {
            t.field("state", state);
            t.field("samples", samples);
            t.field("tag", name);
        });
        let arena = schema.finish();
        let units = compile(&arena, msg);
        let engine = CodecEngine::new(&arena, &units);

        let value = Value::Record(
            msg,
            vec![
                Value::Enum(state, 3),
                Value::List(vec![Value::I16(-5), Value::I16(9)]),
                Value::Str("probe".to_owned()),
            ],
        );
        let mut wire = MemoryWire::new();
        assert_eq!(engine.encode(msg, &value, &mut wire), Ok(true));

        let decoded = engine.decode(msg, &mut wire).unwrap();
        assert_eq!(decoded, Some(value));
    }

    #[test]
    fn empty_record_encodes_and_decodes_unconditionally() {
        let mut schema = SchemaBuilder::new();
        let ping = schema.record("Ping", |_| {});
        let arena = schema.finish();
        let units = compile(&arena, ping);
        let engine = CodecEngine::new(&arena, &units);

        let mut wire = MemoryWire::new();
        let value = Value::Record(ping, vec![]);
        assert_eq!(engine.encode(ping, &value, &mut wire), Ok(true));
        assert!(wire.is_empty());

        let decoded = engine.decode(ping, &mut wire).unwrap();
        assert_eq!(decoded, Some(Value::Record(ping, vec![])));
    }

    #[test]
    fn refused_write_stops_the_conjunction() {
        let mut schema = SchemaBuilder::new();
        let int = schema.primitive("int", Primitive::I32);
        let msg = schema.record("Triple", |t| {
            t.field("a", int);
            t.field("b", int);
            t.field("c", int);
        });
        let arena = schema.finish();
        let units = compile(&arena, msg);
        let engine = CodecEngine::new(&arena, &units);

        let value = Value::Record(
            msg,
            vec![Value::I32(1), Value::I32(2), Value::I32(3)],
        );
        // Budget for exactly one write: member `b` is refused, `c` is
        // never attempted, and the position stays where `a` left it.
        let mut writer = FlakyWriter::new(MemoryWire::new(), 1);
        assert_eq!(engine.encode(msg, &value, &mut writer), Ok(false));
        assert_eq!(writer.position(), Some(1));
        assert_eq!(writer.inner().len(), 1);
    }

    #[test]
    fn refused_nested_write_stops_the_outer_conjunction() {
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
        let units = compile(&arena, seg);
        let engine = CodecEngine::new(&arena, &units);

        let value = Value::Record(
            seg,
            vec![
                Value::Record(vec2, vec![Value::F32(0.0), Value::F32(1.0)]),
                Value::Record(vec2, vec![Value::F32(2.0), Value::F32(3.0)]),
            ],
        );
        // Three of four leaf writes succeed; the failure inside `to`
        // propagates out as encode failure.
        let mut writer = FlakyWriter::new(MemoryWire::new(), 3);
        assert_eq!(engine.encode(seg, &value, &mut writer), Ok(false));
        assert_eq!(writer.position(), Some(3));
    }

    #[test]
    fn truncated_stream_decodes_to_no_value() {
        let (arena, vec2) = vector2_schema();
        let units = compile(&arena, vec2);
        let engine = CodecEngine::new(&arena, &units);

        let value = Value::Record(vec2, vec![Value::F32(1.0), Value::F32(2.0)]);
        let mut wire = MemoryWire::new();
        assert_eq!(engine.encode(vec2, &value, &mut wire), Ok(true));

        // Drop the second float: the first read succeeds into a temporary,
        // the second fails, and no partial record escapes.
        wire.truncate(1);
        assert_eq!(engine.decode(vec2, &mut wire), Ok(None));
    }

    #[test]
    fn missing_unit_is_reported() {
        let (arena, vec2) = vector2_schema();
        let engine = CodecEngine::new(&arena, &[]);

        let mut wire = MemoryWire::new();
        let err = engine.decode(vec2, &mut wire).unwrap_err();
        assert_eq!(
            err,
            EvalError::MissingUnit {
                type_name: "Vector2".to_owned()
            }
        );
    }

    #[test]
    fn non_conforming_value_is_reported() {
        let (arena, vec2) = vector2_schema();
        let units = compile(&arena, vec2);
        let engine = CodecEngine::new(&arena, &units);

        let mut wire = MemoryWire::new();
        let err = engine
            .encode(vec2, &Value::F32(1.0), &mut wire)
            .unwrap_err();
        assert!(matches!(err, EvalError::ValueShape { .. }));

        let short = Value::Record(vec2, vec![Value::F32(1.0)]);
        let err = engine.encode(vec2, &short, &mut wire).unwrap_err();
        assert!(matches!(err, EvalError::ValueShape { .. }));
    }

    #[test]
    fn enum_casts_survive_the_round_trip() {
        let mut schema = SchemaBuilder::new();
        let state = schema.enum_type("State", Primitive::I64);
        let msg = schema.record("Status", |t| t.field("state", state));
        let arena = schema.finish();
        let units = compile(&arena, msg);
        let engine = CodecEngine::new(&arena, &units);

        let value = Value::Record(msg, vec![Value::Enum(state, -42)]);
        let mut wire = MemoryWire::new();
        assert_eq!(engine.encode(msg, &value, &mut wire), Ok(true));
        assert_eq!(engine.decode(msg, &mut wire).unwrap(), Some(value));
    }
}
