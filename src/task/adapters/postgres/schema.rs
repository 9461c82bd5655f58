//! Diesel schema for task document persistence.

diesel::table! {
    /// Task documents keyed by their store-assigned identifier.
    tasks (id) {
        /// Raw 12-byte task identifier.
        id -> Bytea,
        /// Task fields as a schemaless document.
        document -> Jsonb,
    }
}
