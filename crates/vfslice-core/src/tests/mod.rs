/*! Test coverage for the graph model and the reachability engine.
 *
 * Graphs are assembled through the builder the same way an embedder would
 * hand them over, then queried through the public engine surface. The
 * interesting cases are the boundary ones: call-site matching, nested
 * call composition, and malformed producer graphs.
 */

mod graph_shape_tests;
