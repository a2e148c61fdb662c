//! Wiregen IR - Schema Model and Codec IR
//!
//! This crate contains the core data structures for the wiregen codec
//! compiler:
//! - Names for interned identifiers
//! - The schema arena (`TypeDescriptor`s indexed by `TypeId`)
//! - Type declarations, members, and the primitive vocabulary
//! - The synthesized codec model (`CodecUnit` and its statement values)
//!
//! # Design Philosophy
//!
//! - **Intern everything**: identifiers become `Name(u32)`, type identity
//!   becomes `TypeId(u32)`; equality is an integer compare.
//! - **Flatten everything**: type declarations live in one contiguous arena;
//!   cross-references are `TypeId` indices, never pointers.
//! - **Immutable values**: the schema is a read-only snapshot for the whole
//!   compilation run, and a `CodecUnit` is built once and never mutated.

mod arena;
mod builder;
mod codec;
mod interner;
mod schema;

pub use arena::{SchemaArena, TypeId};
pub use builder::{RecordBuilder, SchemaBuilder};
pub use codec::{
    CodecUnit, DecodeBody, EncodeBody, EnumCast, LocalShape, ReadStep, StoreStep, TempLocal,
    WireCodec, WriteStep,
};
pub use interner::{Name, NameInterner};
pub use schema::{ContainerBase, Member, MemberOrigin, Primitive, TypeDecl, TypeKind, Visibility};
