//! Portable wiregen compiler driver.
//!
//! Orchestrates discovery and synthesis per root type and packages the
//! results for consumers. IO-free: schemas come in as a [`SchemaArena`]
//! reference, results come out as [`RootOutput`] values; whatever emission
//! sink the host defines takes it from there.
//!
//! # Architecture
//!
//! ```text
//! wiregen_ir, wiregen_diagnostic, wiregen_codegen
//!                      |
//!               wiregen_compiler  <- this crate
//!                /            \
//!          host emission    test harnesses
//! ```
//!
//! Each root compiles independently: one root's schema error never aborts
//! another root's compilation, and independent roots share nothing but the
//! read-only schema, so [`compile_roots`] fans out across worker threads.
//!
//! [`SchemaArena`]: wiregen_ir::SchemaArena

mod output;
mod pipeline;
mod render;

pub use output::RootOutput;
pub use pipeline::{compile, compile_all, compile_root, compile_roots};
pub use render::{render_unit, render_units};
