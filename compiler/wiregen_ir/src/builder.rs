//! Fluent construction of schema snapshots.
//!
//! Hosts (and tests) declare types through [`SchemaBuilder`] and then call
//! [`finish`](SchemaBuilder::finish) to obtain the read-only [`SchemaArena`]
//! the compiler consumes. Mutually recursive records are closed through
//! [`declare_record`](SchemaBuilder::declare_record) /
//! [`define_record`](SchemaBuilder::define_record).

use crate::arena::{SchemaArena, TypeId};
use crate::schema::{
    ContainerBase, Member, MemberOrigin, Primitive, TypeDecl, TypeKind, Visibility,
};

/// Builder for a schema snapshot.
pub struct SchemaBuilder {
    arena: SchemaArena,
}

impl SchemaBuilder {
    /// Start an empty schema.
    pub fn new() -> Self {
        SchemaBuilder {
            arena: SchemaArena::new(),
        }
    }

    /// Declare a wire-mappable primitive type.
    pub fn primitive(&mut self, name: &str, primitive: Primitive) -> TypeId {
        let name = self.arena.intern(name);
        self.arena.alloc_type(TypeDecl {
            name,
            kind: TypeKind::Primitive(primitive),
        })
    }

    /// Declare an enumeration over an integral underlying type.
    ///
    /// # Panics
    /// Panics if `underlying` is not an integral scalar.
    #[track_caller]
    pub fn enum_type(&mut self, name: &str, underlying: Primitive) -> TypeId {
        assert!(
            underlying.is_integral(),
            "enum `{name}` must have an integral underlying type, got {underlying:?}"
        );
        let name = self.arena.intern(name);
        self.arena.alloc_type(TypeDecl {
            name,
            kind: TypeKind::Enum { underlying },
        })
    }

    /// Declare a bounded fixed-capacity container instantiation.
    pub fn container(&mut self, name: &str, base: ContainerBase, elem: TypeId) -> TypeId {
        let name = self.arena.intern(name);
        self.arena.alloc_type(TypeDecl {
            name,
            kind: TypeKind::Container { base, elem },
        })
    }

    /// Declare an opaque reference type (never serializable).
    pub fn reference(&mut self, name: &str) -> TypeId {
        let name = self.arena.intern(name);
        self.arena.alloc_type(TypeDecl {
            name,
            kind: TypeKind::Reference,
        })
    }

    /// Declare a record with no members yet, for forward references.
    pub fn declare_record(&mut self, name: &str) -> TypeId {
        let name = self.arena.intern(name);
        self.arena.alloc_type(TypeDecl {
            name,
            kind: TypeKind::Record { members: vec![] },
        })
    }

    /// Fill in the members of a previously declared record.
    ///
    /// # Panics
    /// Panics if `id` was not declared as a record.
    #[track_caller]
    pub fn define_record(&mut self, id: TypeId, build: impl FnOnce(&mut RecordBuilder<'_>)) {
        let decl = self.arena.get(id);
        assert!(
            decl.is_record(),
            "`{}` is not a record declaration",
            self.arena.type_name(id)
        );
        let name = decl.name;

        let mut rb = RecordBuilder {
            arena: &self.arena,
            members: Vec::new(),
        };
        build(&mut rb);
        let members = rb.members;

        self.arena.replace(id, TypeDecl {
            name,
            kind: TypeKind::Record { members },
        });
    }

    /// Declare and define a record in one step.
    pub fn record(&mut self, name: &str, build: impl FnOnce(&mut RecordBuilder<'_>)) -> TypeId {
        let id = self.declare_record(name);
        self.define_record(id, build);
        id
    }

    /// Register a record as a network-message root.
    pub fn mark_root(&mut self, id: TypeId) {
        self.arena.mark_message_root(id);
    }

    /// Freeze the schema into its read-only snapshot.
    pub fn finish(self) -> SchemaArena {
        self.arena
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects the members of one record, in declaration order.
pub struct RecordBuilder<'a> {
    arena: &'a SchemaArena,
    members: Vec<Member>,
}

impl RecordBuilder<'_> {
    /// Add a member with explicit origin and visibility.
    pub fn member(
        &mut self,
        name: &str,
        ty: TypeId,
        origin: MemberOrigin,
        visibility: Visibility,
    ) {
        self.members.push(Member {
            name: self.arena.intern(name),
            ty,
            origin,
            visibility,
        });
    }

    /// Add a public field.
    pub fn field(&mut self, name: &str, ty: TypeId) {
        self.member(name, ty, MemberOrigin::Field, Visibility::Public);
    }

    /// Add a public property accessor.
    pub fn property(&mut self, name: &str, ty: TypeId) {
        self.member(name, ty, MemberOrigin::Property, Visibility::Public);
    }

    /// Add a private field (excluded from serialization).
    pub fn private_field(&mut self, name: &str, ty: TypeId) {
        self.member(name, ty, MemberOrigin::Field, Visibility::Private);
    }
}
