/*! Demand-driven analyses over a finished value-flow graph.
 *
 * The graph is produced elsewhere; everything here only queries it. The
 * reachability engine answers the one question that matters for call-site
 * correlation: which caller-supplied inputs can flow into the value a call
 * leaves behind.
 */

pub mod reachability;

pub use reachability::{EngineStatistics, ReachabilityEngine};
