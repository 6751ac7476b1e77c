//! Medicine records
//!
//! A medicine is counted in packs; the total number of items is derived
//! as `packs * items_per_pack` and stored alongside the inputs.

use serde::{Deserialize, Serialize};

/// Packs at or below this count mark a medicine as low-stock.
pub const LOW_STOCK_PACKS: u64 = 2;

/// Total items at or below this count mark a medicine as low-stock.
pub const LOW_STOCK_TOTAL: u64 = 5;

/// Total item count for a number of packs. Saturates at `u64::MAX`.
pub fn total_quantity(packs: u64, items_per_pack: u64) -> u64 {
    packs.saturating_mul(items_per_pack)
}

/// A persisted medicine row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    /// Row id assigned by storage
    pub id: i64,
    pub name: String,
    pub packs: u64,
    pub items_per_pack: u64,
    /// Always `packs * items_per_pack`
    pub total_qty: u64,
    /// Expiry date as entered, `YYYY-MM-DD`
    pub expiry: String,
}

impl Medicine {
    pub fn is_low_stock(&self) -> bool {
        self.packs <= LOW_STOCK_PACKS || self.total_qty <= LOW_STOCK_TOTAL
    }

    /// Form values for this row, as a front end would prefill them on selection
    pub fn to_draft(&self) -> MedicineDraft {
        MedicineDraft {
            name: self.name.clone(),
            packs: self.packs,
            items_per_pack: self.items_per_pack,
            expiry: self.expiry.clone(),
        }
    }
}

/// Validated medicine fields, ready to be written.
///
/// Built by [`crate::validation::MedicineForm::parse`]; storage trusts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineDraft {
    pub name: String,
    pub packs: u64,
    pub items_per_pack: u64,
    pub expiry: String,
}

impl MedicineDraft {
    pub fn total_qty(&self) -> u64 {
        total_quantity(self.packs, self.items_per_pack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medicine(packs: u64, items_per_pack: u64) -> Medicine {
        Medicine {
            id: 1,
            name: "Ibuprofen".to_string(),
            packs,
            items_per_pack,
            total_qty: total_quantity(packs, items_per_pack),
            expiry: "2026-03-01".to_string(),
        }
    }

    #[test]
    fn test_total_quantity() {
        assert_eq!(total_quantity(5, 10), 50);
        assert_eq!(total_quantity(0, 10), 0);
        assert_eq!(total_quantity(5_000_000_000, 3), 15_000_000_000);
        assert_eq!(total_quantity(u64::MAX, 2), u64::MAX);
    }

    #[test]
    fn test_low_stock_by_packs() {
        // 20 items but only two packs
        assert!(medicine(2, 10).is_low_stock());
    }

    #[test]
    fn test_low_stock_by_total() {
        assert!(medicine(5, 1).is_low_stock());
    }

    #[test]
    fn test_not_low_stock() {
        assert!(!medicine(3, 3).is_low_stock());
        assert!(!medicine(3, 2).is_low_stock());
    }

    #[test]
    fn test_to_draft_keeps_fields() {
        let med = medicine(4, 12);
        let draft = med.to_draft();
        assert_eq!(draft.name, "Ibuprofen");
        assert_eq!(draft.total_qty(), med.total_qty);
        assert_eq!(draft.expiry, "2026-03-01");
    }
}
