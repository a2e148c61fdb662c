//! Wiregen Eval - interpreter for synthesized codec units.
//!
//! A [`CodecUnit`](wiregen_ir::CodecUnit) is a structured procedure, and
//! this crate is its "compiled function table" rendering: the
//! [`CodecEngine`] walks encode/decode bodies directly against a [`Value`]
//! model and a wire capability. That makes the codec compiler's behavioral
//! obligations - round-trip, short-circuit, atomic decode - executable
//! without ever emitting source text.
//!
//! The wire is a typed cell stream ([`MemoryWire`]), not bytes: bit layout
//! belongs to the host's writer/reader implementation, never to this crate.

mod exec;
mod value;
mod wire;

pub use exec::{CodecEngine, EvalError};
pub use value::Value;
pub use wire::{FlakyWriter, MemoryWire, WireReader, WireWriter};
