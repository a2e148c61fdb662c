//! Member classification.
//!
//! Selects the serializable members of a record in the fixed total order
//! that determines wire compatibility: field-origin members in declaration
//! order, then property-origin members in declaration order. Private
//! members are skipped; every selected member must either map to a wire
//! codec or be another record, and a member failing both checks aborts
//! classification for the whole record - a partial codec is worse than no
//! codec.

use smallvec::SmallVec;
use wiregen_diagnostic::SchemaError;
use wiregen_ir::{EnumCast, Member, MemberOrigin, Name, SchemaArena, TypeId, TypeKind, Visibility, WireCodec};

use crate::wire::wire_codec;

/// How a classified member is carried on the wire.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MemberShape {
    /// Wire-mappable: written/read with `codec`, converting through `cast`
    /// when the declared type is an enum.
    Wire {
        codec: WireCodec,
        cast: Option<EnumCast>,
    },
    /// Another record; serialized by its own codec unit.
    Record(TypeId),
}

/// A member selected for serialization.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ClassifiedMember {
    pub name: Name,
    pub ty: TypeId,
    pub origin: MemberOrigin,
    pub shape: MemberShape,
}

/// Classified member list; most records have only a handful of members.
pub type MemberList = SmallVec<[ClassifiedMember; 8]>;

/// Classify the serializable members of `ty`, in wire order.
///
/// Non-record types have no members and classify to the empty list.
///
/// # Errors
/// [`SchemaError::UnsupportedMemberType`] for the first member whose
/// declared type is neither wire-mappable nor a record.
pub fn classify(arena: &SchemaArena, ty: TypeId) -> Result<MemberList, SchemaError> {
    let members = arena.get(ty).members();

    let mut classified = MemberList::new();
    for origin in [MemberOrigin::Field, MemberOrigin::Property] {
        for member in members {
            if member.origin != origin || member.visibility == Visibility::Private {
                continue;
            }
            classified.push(classify_member(arena, ty, member)?);
        }
    }
    Ok(classified)
}

fn classify_member(
    arena: &SchemaArena,
    ty: TypeId,
    member: &Member,
) -> Result<ClassifiedMember, SchemaError> {
    let shape = if let Some(codec) = wire_codec(arena, member.ty) {
        let cast = match &arena.get(member.ty).kind {
            TypeKind::Enum { underlying } => Some(EnumCast {
                enum_ty: member.ty,
                underlying: *underlying,
            }),
            _ => None,
        };
        MemberShape::Wire { codec, cast }
    } else if arena.get(member.ty).is_record() {
        MemberShape::Record(member.ty)
    } else {
        return Err(SchemaError::unsupported_member(arena, ty, member.name));
    };

    Ok(ClassifiedMember {
        name: member.name,
        ty: member.ty,
        origin: member.origin,
        shape,
    })
}
