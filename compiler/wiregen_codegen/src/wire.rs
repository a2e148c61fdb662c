//! Primitive type map: declared types to wire operation identifiers.
//!
//! The map is a total function over the primitive vocabulary - every
//! [`Primitive`] has exactly one [`WireCodec`], with no fallback arm. Two
//! declared shapes normalize before lookup:
//!
//! - an enum is looked up through its underlying integral type
//! - a container instantiation is looked up through its unparameterized
//!   base, provided its element is itself wire-mappable (the batched codec
//!   owns the element-by-element transfer)
//!
//! Records and reference types never map; the classifier decides what to do
//! with them.

use wiregen_ir::{ContainerBase, Primitive, SchemaArena, TypeId, TypeKind, WireCodec};

/// Wire operation for a primitive. Total - every primitive maps.
pub fn primitive_codec(primitive: Primitive) -> WireCodec {
    match primitive {
        Primitive::Bool => WireCodec::Bool,
        Primitive::U8 => WireCodec::Byte,
        Primitive::I16 => WireCodec::Short,
        Primitive::U16 => WireCodec::UShort,
        Primitive::I32 => WireCodec::Int,
        Primitive::U32 => WireCodec::UInt,
        Primitive::I64 => WireCodec::Long,
        Primitive::U64 => WireCodec::ULong,
        Primitive::F32 => WireCodec::Float,
        Primitive::F64 => WireCodec::Double,
        Primitive::Int2 => WireCodec::Int2,
        Primitive::Int3 => WireCodec::Int3,
        Primitive::Float2 => WireCodec::Float2,
        Primitive::Float3 => WireCodec::Float3,
        Primitive::Float4 => WireCodec::Float4,
        Primitive::Double2 => WireCodec::Double2,
        Primitive::Double3 => WireCodec::Double3,
        Primitive::Quat => WireCodec::Quaternion,
        Primitive::FixedString32 => WireCodec::FixedString32,
        Primitive::FixedString64 => WireCodec::FixedString64,
        Primitive::FixedString128 => WireCodec::FixedString128,
    }
}

fn container_codec(base: ContainerBase) -> WireCodec {
    match base {
        ContainerBase::FixedList32 => WireCodec::FixedList32,
        ContainerBase::FixedList64 => WireCodec::FixedList64,
    }
}

/// Wire operation for a declared type, or `None` if the type is not
/// wire-mappable. Pure; no side effects.
pub fn wire_codec(arena: &SchemaArena, ty: TypeId) -> Option<WireCodec> {
    match &arena.get(ty).kind {
        TypeKind::Primitive(primitive) => Some(primitive_codec(*primitive)),
        TypeKind::Enum { underlying } => Some(primitive_codec(*underlying)),
        TypeKind::Container { base, elem } => {
            element_codec(arena, *elem).map(|_| container_codec(*base))
        }
        TypeKind::Record { .. } | TypeKind::Reference => None,
    }
}

/// Wire operation for a container element. Containers batch scalar-shaped
/// elements only: primitives and enums qualify, nested containers and
/// records do not.
fn element_codec(arena: &SchemaArena, elem: TypeId) -> Option<WireCodec> {
    match &arena.get(elem).kind {
        TypeKind::Primitive(primitive) => Some(primitive_codec(*primitive)),
        TypeKind::Enum { underlying } => Some(primitive_codec(*underlying)),
        _ => None,
    }
}
