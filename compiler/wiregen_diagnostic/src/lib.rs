//! Diagnostic system for schema compilation errors.
//!
//! Design:
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Context notes (which type, which member)
//!
//! A schema snapshot has no source text, so diagnostics carry resolved type
//! and member names instead of spans. Nothing is logged-and-swallowed: every
//! failure travels to the caller as a typed error value.

use std::fmt;
use thiserror::Error;
use wiregen_ir::{Name, SchemaArena, TypeId};

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: schema/classification errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Member type is neither wire-mappable nor a record
    E0001,
}

impl ErrorCode {
    /// Get the code as a string (e.g., "E0001").
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic ready for presentation to the schema author.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Severity level.
    pub severity: Severity,
    /// Main error message.
    pub message: String,
    /// Additional notes providing context.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: String::new(),
            notes: Vec::new(),
        }
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Check if this is an error (vs warning/note).
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        Ok(())
    }
}

/// Schema-level compilation error.
///
/// Raised eagerly during member classification; aborts codec generation for
/// the enclosing root type only. Retrying cannot help (the schema is static
/// input and the failure is deterministic), so the remedial action is fixing
/// the schema, and the error carries the offending type and member for a
/// precise report.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Error)]
pub enum SchemaError {
    /// A member's declared type is neither wire-mappable nor a record
    /// eligible for recursive discovery.
    #[error("member `{member_name}` of `{type_name}` cannot be serialized: \
             its type is neither wire-mappable nor a record")]
    UnsupportedMemberType {
        /// Record that declares the offending member.
        ty: TypeId,
        /// The offending member.
        member: Name,
        /// Resolved name of `ty`.
        type_name: String,
        /// Resolved name of `member`.
        member_name: String,
    },
}

impl SchemaError {
    /// Build an [`UnsupportedMemberType`](SchemaError::UnsupportedMemberType)
    /// with names resolved against the schema.
    pub fn unsupported_member(arena: &SchemaArena, ty: TypeId, member: Name) -> Self {
        SchemaError::UnsupportedMemberType {
            ty,
            member,
            type_name: arena.type_name(ty).to_owned(),
            member_name: arena.name(member).to_owned(),
        }
    }

    /// Record that declares the offending member.
    pub fn ty(&self) -> TypeId {
        match self {
            SchemaError::UnsupportedMemberType { ty, .. } => *ty,
        }
    }

    /// The offending member.
    pub fn member(&self) -> Name {
        match self {
            SchemaError::UnsupportedMemberType { member, .. } => *member,
        }
    }

    /// Render this error as a presentation diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            SchemaError::UnsupportedMemberType {
                type_name,
                member_name,
                ..
            } => Diagnostic::error(ErrorCode::E0001)
                .with_message(format!(
                    "member `{member_name}` of `{type_name}` cannot be serialized"
                ))
                .with_note(
                    "a serializable member must be a wire-mappable primitive, an enum over an \
                     integral type, a bounded container of primitives, or another record",
                )
                .with_note(format!(
                    "codec generation for the root containing `{type_name}` was aborted; \
                     no partial codec was produced"
                )),
        }
    }
}
