//! Database schema definitions
//!
//! Column names, types and order match existing `clinic_inventory.db` files.

/// SQL to create the medicines table
pub const CREATE_MEDICINES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS medicines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    packs INTEGER NOT NULL,
    items_per_pack INTEGER NOT NULL,
    total_qty INTEGER NOT NULL,
    expiry TEXT NOT NULL
)
"#;

/// SQL to create the equipment table
pub const CREATE_EQUIPMENT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS equipment (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    description TEXT
)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_MEDICINES_TABLE, CREATE_EQUIPMENT_TABLE]
}
