//! Diesel table definitions.
//!
//! Must agree with `CREATE_USUARIOS_TABLE` in `bootstrap.rs`; the service
//! creates the table itself at startup rather than running migrations.

diesel::table! {
    /// Registered users. Rows created before `idade` and `email` became
    /// mandatory on the API may still hold NULL in those columns.
    usuarios (id) {
        /// Serial primary key assigned by PostgreSQL.
        id -> Int4,
        nome -> Text,
        idade -> Nullable<Int4>,
        email -> Nullable<Text>,
    }
}
