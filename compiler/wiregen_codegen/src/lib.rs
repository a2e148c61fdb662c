//! Wiregen Codegen - codec synthesis core.
//!
//! The four stages of codec compilation for one root type:
//!
//! 1. [`wire_codec`] - the primitive type map: declared type to wire
//!    operation identifier, normalizing enums and container instantiations.
//! 2. [`classify`] - the member classifier: serializable members of a record
//!    in their fixed total order, validated eagerly.
//! 3. [`discover`] - the reachability walker: every record type reachable
//!    from a root, in discovery order, deduplicated by identity.
//! 4. [`synthesize`] - the codec synthesizer: one immutable [`CodecUnit`]
//!    per discovered type.
//!
//! All stages are pure functions over the read-only schema snapshot; a run
//! owns every structure it allocates.
//!
//! [`CodecUnit`]: wiregen_ir::CodecUnit

mod classify;
mod discover;
mod synth;
mod wire;

pub use classify::{classify, ClassifiedMember, MemberList, MemberShape};
pub use discover::{discover, DiscoveredTypes};
pub use synth::{synthesize, synthesize_unit};
pub use wire::{primitive_codec, wire_codec};
