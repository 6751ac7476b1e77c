//! Form validation
//!
//! Raw text from a form is parsed into a typed draft or rejected with
//! [`Error::Validation`]. Nothing here touches storage, so a rejected form
//! can never produce a partial write.

use crate::equipment::EquipmentDraft;
use crate::medicine::{total_quantity, MedicineDraft};
use crate::{Error, Result};
use chrono::NaiveDate;

/// Date layout accepted for expiry dates.
pub const EXPIRY_FORMAT: &str = "%Y-%m-%d";

pub const MSG_MEDICINE_REQUIRED: &str = "Please fill all medicine fields.";
pub const MSG_MEDICINE_INTEGERS: &str = "Packs and Items/Pack must be integers.";
pub const MSG_EXPIRY_FORMAT: &str = "Expiry date must be in YYYY-MM-DD format.";
pub const MSG_TOTAL_TOO_LARGE: &str = "Total quantity is too large to store.";
pub const MSG_EQUIPMENT_REQUIRED: &str = "Please fill name and quantity for equipment.";
pub const MSG_EQUIPMENT_INTEGER: &str = "Quantity must be an integer.";
pub const MSG_EMPTY_QUERY: &str = "Enter search keywords.";

/// Raw medicine form fields, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct MedicineForm {
    pub name: String,
    pub packs: String,
    pub items_per_pack: String,
    pub expiry: String,
}

impl MedicineForm {
    pub fn new(
        name: impl Into<String>,
        packs: impl Into<String>,
        items_per_pack: impl Into<String>,
        expiry: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            packs: packs.into(),
            items_per_pack: items_per_pack.into(),
            expiry: expiry.into(),
        }
    }

    /// Validate every field and build a draft.
    ///
    /// Rules are checked in order: required fields, integer counts, expiry
    /// date, then whether the total fits a SQLite INTEGER.
    pub fn parse(&self) -> Result<MedicineDraft> {
        let name = self.name.trim();
        let packs = self.packs.trim();
        let items_per_pack = self.items_per_pack.trim();
        let expiry = self.expiry.trim();

        if name.is_empty() || packs.is_empty() || items_per_pack.is_empty() || expiry.is_empty() {
            return Err(Error::validation(MSG_MEDICINE_REQUIRED));
        }

        let (Some(packs), Some(items_per_pack)) = (parse_count(packs), parse_count(items_per_pack)) else {
            return Err(Error::validation(MSG_MEDICINE_INTEGERS));
        };

        if !is_valid_expiry(expiry) {
            return Err(Error::validation(MSG_EXPIRY_FORMAT));
        }

        if i64::try_from(total_quantity(packs, items_per_pack)).is_err() {
            return Err(Error::validation(MSG_TOTAL_TOO_LARGE));
        }

        Ok(MedicineDraft {
            name: name.to_string(),
            packs,
            items_per_pack,
            expiry: expiry.to_string(),
        })
    }
}

/// Raw equipment form fields, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct EquipmentForm {
    pub name: String,
    pub quantity: String,
    pub description: String,
}

impl EquipmentForm {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            description: description.into(),
        }
    }

    /// Validate every field and build a draft. A blank description is stored as absent.
    pub fn parse(&self) -> Result<EquipmentDraft> {
        let name = self.name.trim();
        let quantity = self.quantity.trim();
        let description = self.description.trim();

        if name.is_empty() || quantity.is_empty() {
            return Err(Error::validation(MSG_EQUIPMENT_REQUIRED));
        }

        let quantity = parse_count(quantity).ok_or_else(|| Error::validation(MSG_EQUIPMENT_INTEGER))?;

        Ok(EquipmentDraft {
            name: name.to_string(),
            quantity,
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}

/// Parse a non-negative count written with ASCII digits only.
///
/// Signs, spaces and separators are rejected, so `"+5"` and `"-1"` fail.
/// The value must fit a SQLite INTEGER.
pub fn parse_count(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: i64 = text.parse().ok()?;
    u64::try_from(value).ok()
}

/// Whether `text` is a real calendar date written as `YYYY-MM-DD`.
pub fn is_valid_expiry(text: &str) -> bool {
    match NaiveDate::parse_from_str(text, EXPIRY_FORMAT) {
        // chrono accepts unpadded fields; require the canonical spelling
        Ok(date) => date.format(EXPIRY_FORMAT).to_string() == text,
        Err(_) => false,
    }
}

/// Normalise a search query, rejecting one that is blank.
pub fn parse_query(raw: &str) -> Result<String> {
    let query = raw.trim();
    if query.is_empty() {
        return Err(Error::validation(MSG_EMPTY_QUERY));
    }
    Ok(query.to_string())
}

/// Live total for the medicine form.
///
/// Blank or unparsable fields count as zero, so a half-typed form still shows a number.
pub fn preview_total(packs: &str, items_per_pack: &str) -> u64 {
    let packs = parse_count(packs.trim()).unwrap_or(0);
    let items_per_pack = parse_count(items_per_pack.trim()).unwrap_or(0);
    total_quantity(packs, items_per_pack)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: Error) -> String {
        match err {
            Error::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_medicine_form_parses() {
        let draft = MedicineForm::new("  Paracetamol ", "5", "10", "2025-01-01").parse().unwrap();
        assert_eq!(draft.name, "Paracetamol");
        assert_eq!(draft.packs, 5);
        assert_eq!(draft.items_per_pack, 10);
        assert_eq!(draft.total_qty(), 50);
        assert_eq!(draft.expiry, "2025-01-01");
    }

    #[test]
    fn test_medicine_form_requires_all_fields() {
        let err = MedicineForm::new("Aspirin", "", "10", "2025-01-01").parse().unwrap_err();
        assert_eq!(message(err), MSG_MEDICINE_REQUIRED);

        let err = MedicineForm::new("   ", "1", "10", "2025-01-01").parse().unwrap_err();
        assert_eq!(message(err), MSG_MEDICINE_REQUIRED);
    }

    #[test]
    fn test_medicine_form_rejects_non_integers() {
        for packs in ["abc", "-1", "+5", "1.5", "1 0"] {
            let err = MedicineForm::new("Aspirin", packs, "10", "2025-01-01").parse().unwrap_err();
            assert_eq!(message(err), MSG_MEDICINE_INTEGERS, "packs = {packs:?}");
        }
    }

    #[test]
    fn test_medicine_form_rejects_bad_expiry() {
        for expiry in ["2025/01/01", "01-01-2025", "2025-1-1", "2025-02-30", "soon"] {
            let err = MedicineForm::new("Aspirin", "1", "10", expiry).parse().unwrap_err();
            assert_eq!(message(err), MSG_EXPIRY_FORMAT, "expiry = {expiry:?}");
        }
    }

    #[test]
    fn test_expiry_has_no_range_check() {
        assert!(is_valid_expiry("1999-12-31"));
        assert!(is_valid_expiry("2024-02-29"));
    }

    #[test]
    fn test_medicine_form_rejects_overflowing_total() {
        let big = u32::MAX.to_string();
        let err = MedicineForm::new("Aspirin", big.as_str(), big.as_str(), "2025-01-01").parse().unwrap_err();
        assert_eq!(message(err), MSG_TOTAL_TOO_LARGE);
    }

    #[test]
    fn test_counts_above_u32_are_accepted() {
        let draft = MedicineForm::new("Saline", "5000000000", "1", "2025-01-01").parse().unwrap();
        assert_eq!(draft.packs, 5_000_000_000);
        assert_eq!(draft.total_qty(), 5_000_000_000);

        let max = i64::MAX.to_string();
        assert_eq!(parse_count(&max), Some(i64::MAX as u64));
        // one past the largest SQLite INTEGER
        assert_eq!(parse_count("9223372036854775808"), None);

        let err = EquipmentForm::new("Gloves", "99999999999999999999", "").parse().unwrap_err();
        assert_eq!(message(err), MSG_EQUIPMENT_INTEGER);
    }

    #[test]
    fn test_equipment_form() {
        let draft = EquipmentForm::new("Thermometer", "3", "  ").parse().unwrap();
        assert_eq!(draft.quantity, 3);
        assert_eq!(draft.description, None);

        let draft = EquipmentForm::new("Thermometer", "3", " First-aid cabinet ").parse().unwrap();
        assert_eq!(draft.description.as_deref(), Some("First-aid cabinet"));

        let err = EquipmentForm::new("", "3", "").parse().unwrap_err();
        assert_eq!(message(err), MSG_EQUIPMENT_REQUIRED);

        let err = EquipmentForm::new("Thermometer", "three", "").parse().unwrap_err();
        assert_eq!(message(err), MSG_EQUIPMENT_INTEGER);
    }

    #[test]
    fn test_parse_query() {
        assert_eq!(parse_query("  para ").unwrap(), "para");
        assert!(parse_query("   ").is_err());
    }

    #[test]
    fn test_preview_total() {
        assert_eq!(preview_total("5", "10"), 50);
        assert_eq!(preview_total("", "10"), 0);
        assert_eq!(preview_total("abc", "10"), 0);
        assert_eq!(preview_total(" 3 ", "4"), 12);
    }
}
