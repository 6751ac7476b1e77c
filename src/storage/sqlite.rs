//! SQLite storage implementation
//!
//! Every operation opens its own connection, runs a single statement in
//! autocommit mode and drops the connection before returning. Nothing is
//! cached between calls.

use std::path::{Path, PathBuf};
use rusqlite::{Connection, params};
use crate::Result;
use crate::equipment::{Equipment, EquipmentDraft};
use crate::medicine::{Medicine, MedicineDraft};
use crate::search;
use super::schema;

/// SQLite-backed storage for medicines and equipment
#[derive(Debug, Clone)]
pub struct InventoryStore {
    path: PathBuf,
}

impl InventoryStore {
    /// Point at a database file. The file is created on first use.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Create both tables if they are missing. Safe to call repeatedly.
    pub fn init_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        tracing::debug!("Schema ready at {}", self.path.display());
        Ok(())
    }

    // ========== Medicine Operations ==========

    /// All medicines ordered by name
    pub fn list_medicines(&self) -> Result<Vec<Medicine>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, packs, items_per_pack, total_qty, expiry FROM medicines ORDER BY name, id"
        )?;

        let medicines = stmt
            .query_map([], row_to_medicine)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!("Loaded {} medicines", medicines.len());
        Ok(medicines)
    }

    /// Insert a medicine and return its new id
    pub fn insert_medicine(&self, draft: &MedicineDraft) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            r#"
            INSERT INTO medicines (name, packs, items_per_pack, total_qty, expiry)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                draft.name,
                integer_to_sql(draft.packs)?,
                integer_to_sql(draft.items_per_pack)?,
                integer_to_sql(draft.total_qty())?,
                draft.expiry,
            ],
        )?;
        let id = conn.last_insert_rowid();
        tracing::info!("Inserted medicine {} ({})", id, draft.name);
        Ok(id)
    }

    /// Replace every field of a medicine. Returns false if no row has this id.
    pub fn update_medicine(&self, id: i64, draft: &MedicineDraft) -> Result<bool> {
        let conn = self.connect()?;
        let changed = conn.execute(
            r#"
            UPDATE medicines SET name = ?1, packs = ?2, items_per_pack = ?3, total_qty = ?4, expiry = ?5
            WHERE id = ?6
            "#,
            params![
                draft.name,
                integer_to_sql(draft.packs)?,
                integer_to_sql(draft.items_per_pack)?,
                integer_to_sql(draft.total_qty())?,
                draft.expiry,
                id,
            ],
        )?;
        log_write("Updated", "medicine", id, changed);
        Ok(changed > 0)
    }

    /// Delete a medicine. Returns false if no row has this id.
    pub fn delete_medicine(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let changed = conn.execute("DELETE FROM medicines WHERE id = ?1", [id])?;
        log_write("Deleted", "medicine", id, changed);
        Ok(changed > 0)
    }

    /// Medicines whose name contains `query`, ignoring case
    pub fn search_medicines(&self, query: &str) -> Result<Vec<Medicine>> {
        let query = crate::validation::parse_query(query)?;
        Ok(search::filter_medicines(self.list_medicines()?, &query))
    }

    // ========== Equipment Operations ==========

    /// All equipment ordered by name
    pub fn list_equipment(&self) -> Result<Vec<Equipment>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, quantity, description FROM equipment ORDER BY name, id"
        )?;

        let equipment = stmt
            .query_map([], row_to_equipment)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!("Loaded {} equipment rows", equipment.len());
        Ok(equipment)
    }

    /// Insert equipment and return its new id
    pub fn insert_equipment(&self, draft: &EquipmentDraft) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO equipment (name, quantity, description) VALUES (?1, ?2, ?3)",
            params![draft.name, integer_to_sql(draft.quantity)?, draft.description],
        )?;
        let id = conn.last_insert_rowid();
        tracing::info!("Inserted equipment {} ({})", id, draft.name);
        Ok(id)
    }

    /// Replace every field of an equipment row. Returns false if no row has this id.
    pub fn update_equipment(&self, id: i64, draft: &EquipmentDraft) -> Result<bool> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE equipment SET name = ?1, quantity = ?2, description = ?3 WHERE id = ?4",
            params![draft.name, integer_to_sql(draft.quantity)?, draft.description, id],
        )?;
        log_write("Updated", "equipment", id, changed);
        Ok(changed > 0)
    }

    /// Delete an equipment row. Returns false if no row has this id.
    pub fn delete_equipment(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let changed = conn.execute("DELETE FROM equipment WHERE id = ?1", [id])?;
        log_write("Deleted", "equipment", id, changed);
        Ok(changed > 0)
    }

    /// Equipment whose name or description contains `query`, ignoring case
    pub fn search_equipment(&self, query: &str) -> Result<Vec<Equipment>> {
        let query = crate::validation::parse_query(query)?;
        Ok(search::filter_equipment(self.list_equipment()?, &query))
    }

    // ========== Summary ==========

    /// Row counts and how many rows are currently low-stock
    pub fn stats(&self) -> Result<InventoryStats> {
        let medicines = self.list_medicines()?;
        let equipment = self.list_equipment()?;
        Ok(InventoryStats {
            medicines: medicines.len(),
            low_stock_medicines: medicines.iter().filter(|m| m.is_low_stock()).count(),
            equipment: equipment.len(),
            low_stock_equipment: equipment.iter().filter(|e| e.is_low_stock()).count(),
        })
    }
}

fn log_write(action: &str, entity: &str, id: i64, changed: usize) {
    if changed == 0 {
        tracing::warn!("{} no {}: id {} does not exist", action, entity, id);
    } else {
        tracing::info!("{} {} {}", action, entity, id);
    }
}

fn integer_to_sql(value: u64) -> rusqlite::Result<i64> {
    i64::try_from(value).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Read a count column: any non-negative SQLite INTEGER
fn count_from_row(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<u64> {
    let value: i64 = row.get(idx)?;
    u64::try_from(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Integer, Box::new(e))
    })
}

/// Helper to convert a row to a Medicine
fn row_to_medicine(row: &rusqlite::Row) -> rusqlite::Result<Medicine> {
    Ok(Medicine {
        id: row.get(0)?,
        name: row.get(1)?,
        packs: count_from_row(row, 2)?,
        items_per_pack: count_from_row(row, 3)?,
        total_qty: count_from_row(row, 4)?,
        expiry: row.get(5)?,
    })
}

/// Helper to convert a row to an Equipment
fn row_to_equipment(row: &rusqlite::Row) -> rusqlite::Result<Equipment> {
    Ok(Equipment {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: count_from_row(row, 2)?,
        description: row.get(3)?,
    })
}

/// Inventory summary
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct InventoryStats {
    pub medicines: usize,
    pub low_stock_medicines: usize,
    pub equipment: usize,
    pub low_stock_equipment: usize,
}

impl std::fmt::Display for InventoryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Inventory Statistics:")?;
        writeln!(f, "  Medicines: {} ({} low stock)", self.medicines, self.low_stock_medicines)?;
        write!(f, "  Equipment: {} ({} low stock)", self.equipment, self.low_stock_equipment)
    }
}
