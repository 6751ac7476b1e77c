use crate::equipment::Equipment;
use crate::medicine::Medicine;
use crate::ui::{theme, Theme};
use owo_colors::{OwoColorize, Style};
use tabled::{settings::Style as TableStyle, Table, Tabled};

const LOW_MARKER: &str = "LOW";

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(TableStyle::rounded()).to_string()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

#[derive(Tabled)]
struct MedicineRow {
    #[tabled(rename = "Id")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Packs")]
    packs: u64,
    #[tabled(rename = "Items/Pack")]
    items_per_pack: u64,
    #[tabled(rename = "Total Qty")]
    total_qty: u64,
    #[tabled(rename = "Expiry")]
    expiry: String,
    #[tabled(rename = "Stock")]
    stock: String,
}

#[derive(Tabled)]
struct EquipmentRow {
    #[tabled(rename = "Id")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Quantity")]
    quantity: u64,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Stock")]
    stock: String,
}

fn stock_marker(low: bool, style: &Style) -> String {
    if low {
        LOW_MARKER.style(style.clone()).to_string()
    } else {
        String::new()
    }
}

/// Render medicines, flagging low-stock rows. The selected row is marked with `>`.
pub fn medicine_table(medicines: &[Medicine], selected: Option<i64>) -> String {
    medicine_table_with(theme(), medicines, selected)
}

/// [`medicine_table`] with an explicit theme.
///
/// Cell widths ignore ANSI escapes, so colored and plain tables line up the same.
pub fn medicine_table_with(theme: &Theme, medicines: &[Medicine], selected: Option<i64>) -> String {
    let rows: Vec<MedicineRow> = medicines
        .iter()
        .map(|m| MedicineRow {
            id: m.id,
            name: m.name.clone(),
            packs: m.packs,
            items_per_pack: m.items_per_pack,
            total_qty: m.total_qty,
            expiry: m.expiry.clone(),
            stock: stock_marker(m.is_low_stock(), &theme.low_medicine),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    mark_selected(table.to_string(), medicines.iter().map(|m| m.id), selected)
}

/// Render equipment, flagging low-stock rows. The selected row is marked with `>`.
pub fn equipment_table(equipment: &[Equipment], selected: Option<i64>) -> String {
    equipment_table_with(theme(), equipment, selected)
}

pub fn equipment_table_with(theme: &Theme, equipment: &[Equipment], selected: Option<i64>) -> String {
    let rows: Vec<EquipmentRow> = equipment
        .iter()
        .map(|e| EquipmentRow {
            id: e.id,
            name: e.name.clone(),
            quantity: e.quantity,
            description: e.description.clone().unwrap_or_default(),
            stock: stock_marker(e.is_low_stock(), &theme.low_equipment),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    mark_selected(table.to_string(), equipment.iter().map(|e| e.id), selected)
}

/// Prefix the selected row's line with a marker outside the table border.
fn mark_selected(rendered: String, ids: impl Iterator<Item = i64>, selected: Option<i64>) -> String {
    let Some(selected) = selected else {
        return rendered;
    };
    // Rounded style: top border, header, separator, then one line per row
    let Some(row_index) = ids.into_iter().position(|id| id == selected) else {
        return rendered;
    };
    let target = row_index + 3;

    rendered
        .lines()
        .enumerate()
        .map(|(i, line)| if i == target { format!("> {line}") } else { format!("  {line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(id: i64, name: &str, packs: u64, items_per_pack: u64) -> Medicine {
        Medicine {
            id,
            name: name.to_string(),
            packs,
            items_per_pack,
            total_qty: packs * items_per_pack,
            expiry: "2026-09-30".to_string(),
        }
    }

    #[test]
    fn test_medicine_table_lists_rows() {
        let rendered = medicine_table(&[med(1, "Aspirin", 2, 10), med(2, "Zinc", 4, 10)], None);
        assert!(rendered.contains("Aspirin"));
        assert!(rendered.contains("Total Qty"));
        assert_eq!(rendered.matches(LOW_MARKER).count(), 1);
    }

    #[test]
    fn test_selected_row_is_marked() {
        let rendered = medicine_table(&[med(1, "Aspirin", 5, 10), med(2, "Zinc", 4, 10)], Some(2));
        let marked: Vec<&str> = rendered.lines().filter(|l| l.starts_with('>')).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("Zinc"));
    }

    #[test]
    fn test_equipment_table_blank_description() {
        let rows = vec![Equipment { id: 3, name: "Scale".to_string(), quantity: 9, description: None }];
        let rendered = equipment_table(&rows, None);
        assert!(rendered.contains("Scale"));
        assert!(!rendered.contains(LOW_MARKER));
    }

    fn line_widths(rendered: &str) -> Vec<usize> {
        rendered.lines().map(console::measure_text_width).collect()
    }

    #[test]
    fn test_colored_low_stock_rows_stay_aligned() {
        let colored = Theme::colored();
        let medicines = [med(1, "Aspirin", 1, 2), med(2, "Ibuprofen", 8, 20), med(3, "Zinc", 2, 30)];

        let rendered = medicine_table_with(&colored, &medicines, Some(2));
        assert!(rendered.contains('\x1b'));
        let widths = line_widths(&rendered);
        assert!(widths.iter().all(|w| *w == widths[0]), "{widths:?}");

        let plain = medicine_table_with(&Theme::plain(), &medicines, Some(2));
        assert_eq!(widths, line_widths(&plain));

        let equipment = [
            Equipment { id: 1, name: "Scale".to_string(), quantity: 1, description: None },
            Equipment { id: 2, name: "Otoscope".to_string(), quantity: 6, description: Some("Room 4".to_string()) },
        ];
        let widths = line_widths(&equipment_table_with(&colored, &equipment, None));
        assert!(widths.iter().all(|w| *w == widths[0]), "{widths:?}");
    }

    #[test]
    fn test_stats_table() {
        assert!(stats_table(&[]).is_empty());
        assert!(stats_table(&[("Medicines", "3")]).contains("Medicines"));
    }
}
