//! Result types for the compiler driver.
//!
//! These are the public interface between the driver and its consumers
//! (emission sinks, test harnesses). They carry everything needed to
//! present a per-root result without re-running any stage.

use wiregen_diagnostic::{Diagnostic, SchemaError};
use wiregen_ir::{CodecUnit, TypeId};

/// Result of compiling one root type.
#[derive(Clone, Debug)]
pub struct RootOutput {
    /// The root this output belongs to.
    pub root: TypeId,
    /// Whether compilation completed without errors.
    pub success: bool,
    /// Synthesized units in discovery order (empty on failure - a failed
    /// root produces no partial output).
    pub units: Vec<CodecUnit>,
    /// Rendered diagnostics for presentation.
    pub diagnostics: Vec<Diagnostic>,
    /// The underlying error, for callers that want to match on it.
    pub error: Option<SchemaError>,
}
