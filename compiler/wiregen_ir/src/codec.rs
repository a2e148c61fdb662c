//! Synthesized codec model.
//!
//! A [`CodecUnit`] is the immutable result of codec synthesis for one record
//! type: a paired encode body and decode body expressed as structured
//! statement values. Downstream layers either render a unit to text or
//! interpret it directly; nothing downstream re-derives semantics, and tests
//! assert on the structure, not on strings.

use crate::interner::Name;
use crate::schema::Primitive;
use crate::TypeId;

/// Primitive-level read/write operation identifier.
///
/// These are the names of the wire capability's per-type operations; the
/// actual bit layout behind each one is owned by the host's writer/reader
/// implementation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum WireCodec {
    Bool,
    Byte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    Int2,
    Int3,
    Float2,
    Float3,
    Float4,
    Double2,
    Double3,
    Quaternion,
    FixedString32,
    FixedString64,
    FixedString128,
    FixedList32,
    FixedList64,
}

impl WireCodec {
    /// Operation suffix as it appears in rendered writer/reader calls,
    /// e.g. `Float` becomes `write_float` / `read_float`.
    pub fn op_name(self) -> &'static str {
        match self {
            WireCodec::Bool => "bool",
            WireCodec::Byte => "byte",
            WireCodec::Short => "short",
            WireCodec::UShort => "ushort",
            WireCodec::Int => "int",
            WireCodec::UInt => "uint",
            WireCodec::Long => "long",
            WireCodec::ULong => "ulong",
            WireCodec::Float => "float",
            WireCodec::Double => "double",
            WireCodec::Int2 => "int2",
            WireCodec::Int3 => "int3",
            WireCodec::Float2 => "float2",
            WireCodec::Float3 => "float3",
            WireCodec::Float4 => "float4",
            WireCodec::Double2 => "double2",
            WireCodec::Double3 => "double3",
            WireCodec::Quaternion => "quaternion",
            WireCodec::FixedString32 => "fixed_string32",
            WireCodec::FixedString64 => "fixed_string64",
            WireCodec::FixedString128 => "fixed_string128",
            WireCodec::FixedList32 => "fixed_list32",
            WireCodec::FixedList64 => "fixed_list64",
        }
    }
}

/// Representational conversion between an enum member and its wire form.
///
/// Encode narrows the enum value to `underlying` before the write; the
/// matching store step widens the read value back into the enum type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct EnumCast {
    pub enum_ty: TypeId,
    pub underlying: Primitive,
}

/// One operand of an encode body's short-circuiting conjunction.
///
/// `field` is the member's index in the record's classified member list;
/// `member` is its declared name (used by renderers).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum WriteStep {
    /// Write one wire-mappable member.
    Wire {
        member: Name,
        field: usize,
        codec: WireCodec,
        cast: Option<EnumCast>,
    },
    /// Invoke the nested record type's own encode procedure.
    Nested {
        member: Name,
        field: usize,
        nested: TypeId,
    },
}

/// Encode procedure body: a short-circuiting conjunction of write steps
/// evaluated strictly left to right.
///
/// An empty step list means the procedure unconditionally succeeds.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct EncodeBody {
    pub steps: Vec<WriteStep>,
}

/// Default-initialization basis for one decode temporary.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LocalShape {
    /// Zero value of a wire codec's type.
    Wire(WireCodec),
    /// Zero value of a nested record type.
    Record(TypeId),
}

/// One default-initialized temporary local, owned by a decode body.
///
/// Reads populate temporaries only; the target value is untouched until the
/// whole read conjunction has succeeded.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TempLocal {
    pub member: Name,
    pub shape: LocalShape,
}

/// One operand of a decode body's read conjunction.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ReadStep {
    /// Read one wire value into the temporary at `slot`.
    Wire { slot: usize, codec: WireCodec },
    /// Invoke the nested record type's decode procedure into `slot`.
    Nested { slot: usize, nested: TypeId },
}

/// One member assignment performed after every read succeeded.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct StoreStep {
    pub member: Name,
    pub field: usize,
    pub slot: usize,
    pub cast: Option<EnumCast>,
}

/// Decode procedure body.
///
/// Semantics: declare `locals` default-initialized, evaluate `reads` as a
/// left-to-right short-circuiting conjunction, and only if every read
/// succeeded perform `stores` into the result value. A failure at any read
/// produces "no value", never a partially populated record.
///
/// An empty body (no locals, reads, or stores) unconditionally succeeds and
/// produces the zero value of the type.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct DecodeBody {
    pub locals: Vec<TempLocal>,
    pub reads: Vec<ReadStep>,
    pub stores: Vec<StoreStep>,
}

/// Synthesized encode/decode pair for one discovered record type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CodecUnit {
    pub ty: TypeId,
    pub encode: EncodeBody,
    pub decode: DecodeBody,
}

impl CodecUnit {
    /// Whether both procedures are the trivial always-succeed form.
    pub fn is_trivial(&self) -> bool {
        self.encode.steps.is_empty() && self.decode.reads.is_empty()
    }
}
