/**
 * namespaces module
 *
 * - table: ordered prefix/namespace bindings, seeded from the bundled resource
 * - prompt: operator input for namespaces the table cannot resolve
 */

pub mod prompt;
pub mod table;

pub use prompt::{InteractivePrefixResolver, PrefixResolver};
pub use table::{canonical_prefix, NamespaceMatch, NamespaceTable};
