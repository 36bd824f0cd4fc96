//! Diesel table definitions
//!
//! Must match the DDL in `database::USERS_TABLE_DDL`.

diesel::table! {
    /// Users table; `email` carries a unique constraint.
    users (id) {
        id -> Int8,
        email -> Text,
        name -> Varchar,
        age -> Nullable<Int4>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
