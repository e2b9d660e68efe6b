/// Engine-specific SQL for everything that is not plain ANSI.
///
/// Engines differ in how they model an isolated namespace (database, schema
/// or attachment), how they spell booleans, and which optional features
/// they can express. Every implementation spells out each capability, even
/// when the engine needs nothing for it.
pub trait DatabaseEngine {
    /// Engine name as accepted on the command line.
    fn name(&self) -> &'static str;

    /// Statements issued once at the top of every generated script.
    fn initialize(&self) -> Vec<String>;

    /// Remove a namespace, if the engine needs it before re-creation.
    fn drop_database(&self, name: &str) -> Option<String>;

    /// Create a fresh namespace.
    fn create_database(&self, name: &str) -> String;

    /// Remove a view left over from an earlier test case.
    fn drop_view(&self, name: &str) -> String;

    /// Prologue of a view definition; the query follows on the next lines.
    fn create_view(&self, name: &str) -> String;

    /// Make a namespace the default for unqualified table names.
    fn use_database(&self, name: &str) -> Option<String>;

    /// SQL literal for a boolean value.
    fn boolean_literal(&self, value: bool) -> &'static str;

    /// Definition of an auto-incrementing integer column, if supported.
    fn auto_increment_column(&self, name: &str) -> Option<String>;
}
