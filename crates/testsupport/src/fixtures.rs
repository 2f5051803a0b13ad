//! Common schema text used across integration tests.

/// A single `users` table: `id INTEGER`, `username VARCHAR(32)`, `email VARCHAR(255)`.
pub const USERS_SCHEMA: &str = "1\nusers;3;id:4:int,username:32:varchar,email:255:varchar\n";

/// Two independent tables, to exercise cross-table isolation.
pub const USERS_AND_PRODUCTS_SCHEMA: &str =
    "2\nusers;2;id:4:int,username:32:varchar\nproducts;2;id:4:int,price:8:real\n";
