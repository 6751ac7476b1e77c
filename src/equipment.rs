//! Equipment records

use serde::{Deserialize, Serialize};

/// Quantity at or below this count marks equipment as low-stock.
pub const LOW_STOCK_QUANTITY: u64 = 2;

/// A persisted equipment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    pub quantity: u64,
    /// Location or notes
    pub description: Option<String>,
}

impl Equipment {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= LOW_STOCK_QUANTITY
    }

    pub fn to_draft(&self) -> EquipmentDraft {
        EquipmentDraft {
            name: self.name.clone(),
            quantity: self.quantity,
            description: self.description.clone(),
        }
    }
}

/// Validated equipment fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentDraft {
    pub name: String,
    pub quantity: u64,
    pub description: Option<String>,
}
