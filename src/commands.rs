use crate::{emit_success, EquipmentAction, MedicineAction, OutputMode};
use clinic_inventory::config::{self, InventoryConfig};
use clinic_inventory::ui::{self, Icons};
use clinic_inventory::validation::{self, EquipmentForm, MedicineForm};
use clinic_inventory::{Equipment, InventoryStore, Medicine, Session};
use serde::Serialize;
use std::path::Path;

/// A record with its low-stock flag, for JSON output
#[derive(Serialize)]
struct Flagged<'a, T> {
    #[serde(flatten)]
    record: &'a T,
    low_stock: bool,
}

fn flag_medicines(medicines: &[Medicine]) -> Vec<Flagged<'_, Medicine>> {
    medicines.iter().map(|m| Flagged { record: m, low_stock: m.is_low_stock() }).collect()
}

fn flag_equipment(equipment: &[Equipment]) -> Vec<Flagged<'_, Equipment>> {
    equipment.iter().map(|e| Flagged { record: e, low_stock: e.is_low_stock() }).collect()
}

pub fn run_init(
    store: &InventoryStore,
    output_mode: OutputMode,
    config_path: Option<&Path>,
    force: bool,
) -> anyhow::Result<()> {
    if let Some(path) = config_path {
        let config = InventoryConfig {
            database: Some(store.path().display().to_string()),
        };
        config::write_config(path, &config, force)?;
    }

    if output_mode.is_human() {
        ui::success(&format!("Database ready at {}", store.path().display()));
        if let Some(path) = config_path {
            ui::info("Config", &path.display().to_string());
        }
    } else {
        let data = serde_json::json!({
            "database": store.path().display().to_string(),
            "config": config_path.map(|p| p.display().to_string()),
        });
        emit_success(output_mode, "init", data)?;
    }
    Ok(())
}

pub fn run_medicine(store: &InventoryStore, output_mode: OutputMode, action: MedicineAction) -> anyhow::Result<()> {
    match action {
        MedicineAction::List => {
            let medicines = store.list_medicines()?;
            show_medicines(output_mode, "medicine.list", &medicines, None)
        }

        MedicineAction::Search { query } => {
            let medicines = store.search_medicines(&query)?;
            show_medicines(output_mode, "medicine.search", &medicines, Some(&query))
        }

        MedicineAction::Add { name, packs, items, expiry } => {
            let draft = MedicineForm::new(name, packs, items, expiry).parse()?;
            let id = store.insert_medicine(&draft)?;
            if output_mode.is_human() {
                ui::success(&format!(
                    "Added medicine '{}' (id {}, total {})",
                    draft.name,
                    id,
                    draft.total_qty()
                ));
            } else {
                emit_success(output_mode, "medicine.add", serde_json::json!({
                    "id": id,
                    "total_qty": draft.total_qty(),
                }))?;
            }
            Ok(())
        }

        MedicineAction::Update { id, name, packs, items, expiry } => {
            let mut session = Session::new();
            session.show_all(store.list_medicines()?);
            session.select(id)?;
            let id = session.require_selection("update")?;

            let draft = MedicineForm::new(name, packs, items, expiry).parse()?;
            let changed = store.update_medicine(id, &draft)?;
            report_write(output_mode, "medicine.update", "Updated medicine", id, changed)
        }

        MedicineAction::Delete { id, yes } => {
            let mut session: Session<Medicine> = Session::new();
            session.show_all(store.list_medicines()?);
            let name = session.select(id)?.name.clone();
            let id = session.require_selection("delete")?;

            if !yes && !confirm(output_mode, &format!("Delete medicine '{}'?", name))? {
                ui::warn("Delete cancelled.");
                return Ok(());
            }
            let changed = store.delete_medicine(id)?;
            report_write(output_mode, "medicine.delete", "Deleted medicine", id, changed)
        }
    }
}

pub fn run_equipment(store: &InventoryStore, output_mode: OutputMode, action: EquipmentAction) -> anyhow::Result<()> {
    match action {
        EquipmentAction::List => {
            let equipment = store.list_equipment()?;
            show_equipment(output_mode, "equipment.list", &equipment, None)
        }

        EquipmentAction::Search { query } => {
            let equipment = store.search_equipment(&query)?;
            show_equipment(output_mode, "equipment.search", &equipment, Some(&query))
        }

        EquipmentAction::Add { name, quantity, description } => {
            let draft = EquipmentForm::new(name, quantity, description).parse()?;
            let id = store.insert_equipment(&draft)?;
            if output_mode.is_human() {
                ui::success(&format!("Added equipment '{}' (id {})", draft.name, id));
            } else {
                emit_success(output_mode, "equipment.add", serde_json::json!({ "id": id }))?;
            }
            Ok(())
        }

        EquipmentAction::Update { id, name, quantity, description } => {
            let mut session = Session::new();
            session.show_all(store.list_equipment()?);
            session.select(id)?;
            let id = session.require_selection("update")?;

            let draft = EquipmentForm::new(name, quantity, description).parse()?;
            let changed = store.update_equipment(id, &draft)?;
            report_write(output_mode, "equipment.update", "Updated equipment", id, changed)
        }

        EquipmentAction::Delete { id, yes } => {
            let mut session: Session<Equipment> = Session::new();
            session.show_all(store.list_equipment()?);
            let name = session.select(id)?.name.clone();
            let id = session.require_selection("delete")?;

            if !yes && !confirm(output_mode, &format!("Delete equipment '{}'?", name))? {
                ui::warn("Delete cancelled.");
                return Ok(());
            }
            let changed = store.delete_equipment(id)?;
            report_write(output_mode, "equipment.delete", "Deleted equipment", id, changed)
        }
    }
}

pub fn run_total(output_mode: OutputMode, packs: &str, items: &str) -> anyhow::Result<()> {
    let total = validation::preview_total(packs, items);
    if output_mode.is_human() {
        ui::summary_row("Total Quantity", &total.to_string());
    } else {
        emit_success(output_mode, "total", serde_json::json!({ "total_qty": total }))?;
    }
    Ok(())
}

pub fn run_stats(store: &InventoryStore, output_mode: OutputMode) -> anyhow::Result<()> {
    let stats = store.stats()?;

    if output_mode.is_human() {
        ui::header(Icons::STATS, &format!("Inventory Statistics ({})", store.path().display()));
        let medicines = stats.medicines.to_string();
        let low_medicines = stats.low_stock_medicines.to_string();
        let equipment = stats.equipment.to_string();
        let low_equipment = stats.low_stock_equipment.to_string();
        println!(
            "{}",
            ui::stats_table(&[
                ("Medicines", medicines.as_str()),
                ("Low-stock medicines", low_medicines.as_str()),
                ("Equipment", equipment.as_str()),
                ("Low-stock equipment", low_equipment.as_str()),
            ])
        );
    } else {
        emit_success(output_mode, "stats", serde_json::to_value(&stats)?)?;
    }
    Ok(())
}

fn show_medicines(
    output_mode: OutputMode,
    command: &str,
    medicines: &[Medicine],
    query: Option<&str>,
) -> anyhow::Result<()> {
    if !output_mode.is_human() {
        return emit_success(output_mode, command, serde_json::json!({
            "query": query,
            "medicines": flag_medicines(medicines),
        }));
    }

    match query {
        Some(q) => ui::header(Icons::SEARCH, &format!("Medicines matching '{}'", q)),
        None => ui::header(Icons::PILL, "Medicines"),
    }
    if medicines.is_empty() {
        println!("{}", ui::muted("No medicines found."));
        return Ok(());
    }
    println!("{}", ui::medicine_table(medicines, None));
    report_low_stock(medicines.iter().filter(|m| m.is_low_stock()).count(), medicines.len());
    Ok(())
}

fn show_equipment(
    output_mode: OutputMode,
    command: &str,
    equipment: &[Equipment],
    query: Option<&str>,
) -> anyhow::Result<()> {
    if !output_mode.is_human() {
        return emit_success(output_mode, command, serde_json::json!({
            "query": query,
            "equipment": flag_equipment(equipment),
        }));
    }

    match query {
        Some(q) => ui::header(Icons::SEARCH, &format!("Equipment matching '{}'", q)),
        None => ui::header(Icons::TOOLS, "Equipment"),
    }
    if equipment.is_empty() {
        println!("{}", ui::muted("No equipment found."));
        return Ok(());
    }
    println!("{}", ui::equipment_table(equipment, None));
    report_low_stock(equipment.iter().filter(|e| e.is_low_stock()).count(), equipment.len());
    Ok(())
}

pub(crate) fn report_low_stock(low: usize, total: usize) {
    if low > 0 {
        ui::warn(&format!("{} of {} rows are low on stock", low, total));
    }
}

fn report_write(output_mode: OutputMode, command: &str, verb: &str, id: i64, changed: bool) -> anyhow::Result<()> {
    if output_mode.is_human() {
        if changed {
            ui::success(&format!("{} {}", verb, id));
        } else {
            ui::warn(&format!("No row with id {} was changed; the list may be stale.", id));
        }
    } else {
        emit_success(output_mode, command, serde_json::json!({ "id": id, "changed": changed }))?;
    }
    Ok(())
}

/// Ask a yes/no question on the terminal. Without a terminal, `--yes` is required.
fn confirm(output_mode: OutputMode, prompt: &str) -> anyhow::Result<bool> {
    let term = console::Term::stderr();
    if !output_mode.is_human() || !term.is_term() {
        anyhow::bail!("Refusing to delete without confirmation; pass --yes.");
    }

    term.write_str(&format!("{} {} [y/N] ", Icons::DEL, prompt))?;
    let answer = term.read_line()?;
    Ok(is_yes(&answer))
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
