//! Core compilation pipeline: discover -> synthesize.
//!
//! Pure per root: the only shared state is the read-only schema snapshot,
//! which is what makes the per-root fan-out in [`compile_roots`] safe
//! without any synchronization.

use rayon::prelude::*;
use tracing::{debug, trace};
use wiregen_codegen::{discover, synthesize};
use wiregen_diagnostic::SchemaError;
use wiregen_ir::{CodecUnit, SchemaArena, TypeId};

use crate::output::RootOutput;

/// Compile one root type to its codec units, in discovery order.
///
/// # Errors
/// Propagates the first [`SchemaError`] raised during classification; the
/// root produces no units in that case.
pub fn compile(arena: &SchemaArena, root: TypeId) -> Result<Vec<CodecUnit>, SchemaError> {
    let discovered = discover(arena, root)?;
    debug!(
        root = arena.type_name(root),
        discovered = discovered.len(),
        "discovered reachable record types"
    );

    let units = synthesize(arena, &discovered)?;
    trace!(
        root = arena.type_name(root),
        units = units.len(),
        "synthesized codec units"
    );
    Ok(units)
}

/// Compile one root type into a consumer-facing [`RootOutput`].
pub fn compile_root(arena: &SchemaArena, root: TypeId) -> RootOutput {
    match compile(arena, root) {
        Ok(units) => RootOutput {
            root,
            success: true,
            units,
            diagnostics: Vec::new(),
            error: None,
        },
        Err(err) => {
            debug!(
                root = arena.type_name(root),
                error = %err,
                "codec compilation failed"
            );
            RootOutput {
                root,
                success: false,
                units: Vec::new(),
                diagnostics: vec![err.to_diagnostic()],
                error: Some(err),
            }
        }
    }
}

/// Compile independent roots in parallel.
///
/// Output order matches `roots`; a failing root yields its diagnostic
/// without affecting any other root.
pub fn compile_roots(arena: &SchemaArena, roots: &[TypeId]) -> Vec<RootOutput> {
    roots
        .par_iter()
        .map(|&root| compile_root(arena, root))
        .collect()
}

/// Compile every registered message root, in registration order.
pub fn compile_all(arena: &SchemaArena) -> Vec<RootOutput> {
    compile_roots(arena, arena.message_roots())
}
