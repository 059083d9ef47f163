/*! Turn graphs and solved reports back into readable text.
 *
 * A graph that round-trips through the `.vfg` format can be diffed,
 * version-controlled, and fed to other tools; a rendered report is how a
 * human reviews what the engine resolved. Both emitters write plain text,
 * with optional color for terminals.
 */

pub mod emitter;
pub mod graph_emitter;
pub mod report_emitter;

pub use emitter::{EmitContext, EmitResult, Emittable};
pub use graph_emitter::GraphEmitter;
pub use report_emitter::ReportEmitter;
