//! Interactive shell
//!
//! Keeps one [`Session`] per record type, so rows can be selected and then
//! updated or deleted, the way a form-and-table window works. Errors are
//! reported and the loop carries on with the previous state.

use crate::commands::{is_yes, report_low_stock};
use clinic_inventory::ui::{self, Icons};
use clinic_inventory::validation::{self, EquipmentForm, MedicineForm};
use clinic_inventory::{Equipment, Error, InventoryStore, Medicine, Result, Session};
use std::io::{BufRead, Write};

const HELP: &str = r#"Commands:
  medicines | equipment   switch table
  list | reset            reload the full table
  select <id>             select a row
  add                     fill in a new row
  update                  edit the selected row
  delete                  delete the selected row
  search <text>           filter the table
  stats                   inventory counts
  help                    show this text
  quit                    leave the shell

In forms, Enter keeps the shown value and - clears it."#;

/// Form answer that empties a prefilled field
const CLEAR_FIELD: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Medicines,
    Equipment,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Shell<'a, R> {
    store: &'a InventoryStore,
    input: R,
    tab: Tab,
    medicines: Session<Medicine>,
    equipment: Session<Equipment>,
}

impl<'a, R: BufRead> Shell<'a, R> {
    pub fn new(store: &'a InventoryStore, input: R) -> Self {
        Self {
            store,
            input,
            tab: Tab::Medicines,
            medicines: Session::new(),
            equipment: Session::new(),
        }
    }

    pub fn run(mut self) -> anyhow::Result<()> {
        ui::header(Icons::CLINIC, "Clinic Inventory");
        println!("{}", ui::dim("Type 'help' for commands."));

        self.medicines.show_all(self.store.list_medicines()?);
        self.equipment.show_all(self.store.list_equipment()?);
        self.render();

        loop {
            let Some(line) = self.prompt(&format!("{}> ", self.tab_name()))? else {
                break;
            };
            match self.execute(&line) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err) => {
                    if !err.is_user_error() {
                        tracing::error!("{}", err);
                    }
                    ui::error(&err.to_string());
                }
            }
        }
        Ok(())
    }

    fn tab_name(&self) -> &'static str {
        match self.tab {
            Tab::Medicines => "medicines",
            Tab::Equipment => "equipment",
        }
    }

    fn execute(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match command {
            "" => {}
            "help" | "?" => println!("{HELP}"),
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            "medicines" | "medicine" | "med" | "m" => {
                self.tab = Tab::Medicines;
                self.render();
            }
            "equipment" | "eq" | "e" => {
                self.tab = Tab::Equipment;
                self.render();
            }
            "list" | "reset" => {
                self.reload()?;
                self.render();
            }
            "select" => self.select(rest)?,
            "add" => self.add()?,
            "update" => self.update()?,
            "delete" => self.delete()?,
            "search" => self.search(rest)?,
            "stats" => println!("{}", self.store.stats()?),
            other => ui::warn(&format!("Unknown command '{}'. Type 'help'.", other)),
        }
        Ok(Flow::Continue)
    }

    fn reload(&mut self) -> Result<()> {
        match self.tab {
            Tab::Medicines => self.medicines.show_all(self.store.list_medicines()?),
            Tab::Equipment => self.equipment.show_all(self.store.list_equipment()?),
        }
        Ok(())
    }

    fn render(&self) {
        match self.tab {
            Tab::Medicines => {
                let rows = self.medicines.rows();
                if rows.is_empty() {
                    println!("{}", ui::muted("No medicines to show."));
                } else {
                    println!("{}", ui::medicine_table(rows, self.medicines.selected_id()));
                    report_low_stock(rows.iter().filter(|m| m.is_low_stock()).count(), rows.len());
                }
            }
            Tab::Equipment => {
                let rows = self.equipment.rows();
                if rows.is_empty() {
                    println!("{}", ui::muted("No equipment to show."));
                } else {
                    println!("{}", ui::equipment_table(rows, self.equipment.selected_id()));
                    report_low_stock(rows.iter().filter(|e| e.is_low_stock()).count(), rows.len());
                }
            }
        }
    }

    fn select(&mut self, arg: &str) -> Result<()> {
        let id: i64 = arg
            .trim()
            .parse()
            .map_err(|_| Error::validation("Usage: select <id>"))?;
        let name = match self.tab {
            Tab::Medicines => self.medicines.select(id)?.name.clone(),
            Tab::Equipment => self.equipment.select(id)?.name.clone(),
        };
        ui::info("Selected", &format!("{} (id {})", name, id));
        Ok(())
    }

    fn search(&mut self, arg: &str) -> Result<()> {
        let query = validation::parse_query(arg)?;
        match self.tab {
            Tab::Medicines => {
                let rows = self.store.search_medicines(&query)?;
                self.medicines.show_search(query, rows);
            }
            Tab::Equipment => {
                let rows = self.store.search_equipment(&query)?;
                self.equipment.show_search(query, rows);
            }
        }
        self.render();
        Ok(())
    }

    fn add(&mut self) -> Result<()> {
        match self.tab {
            Tab::Medicines => {
                let form = self.medicine_form(None)?;
                let draft = form.parse()?;
                let id = self.store.insert_medicine(&draft)?;
                ui::success(&format!("Added medicine '{}' (id {})", draft.name, id));
                self.medicines.clear_selection();
            }
            Tab::Equipment => {
                let form = self.equipment_form(None)?;
                let draft = form.parse()?;
                let id = self.store.insert_equipment(&draft)?;
                ui::success(&format!("Added equipment '{}' (id {})", draft.name, id));
                self.equipment.clear_selection();
            }
        }
        self.reload()?;
        self.render();
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        let changed = match self.tab {
            Tab::Medicines => {
                let id = self.medicines.require_selection("update")?;
                let current = self.medicines.selected().map(Medicine::to_draft);
                let form = self.medicine_form(current.map(|d| {
                    MedicineForm::new(d.name, d.packs.to_string(), d.items_per_pack.to_string(), d.expiry)
                }))?;
                let draft = form.parse()?;
                let changed = self.store.update_medicine(id, &draft)?;
                self.medicines.clear_selection();
                changed
            }
            Tab::Equipment => {
                let id = self.equipment.require_selection("update")?;
                let current = self.equipment.selected().map(Equipment::to_draft);
                let form = self.equipment_form(current.map(|d| {
                    EquipmentForm::new(d.name, d.quantity.to_string(), d.description.unwrap_or_default())
                }))?;
                let draft = form.parse()?;
                let changed = self.store.update_equipment(id, &draft)?;
                self.equipment.clear_selection();
                changed
            }
        };
        report_changed(changed, "Updated");
        self.reload()?;
        self.render();
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let (id, label) = match self.tab {
            Tab::Medicines => {
                let id = self.medicines.require_selection("delete")?;
                let name = self.medicines.selected().map(|m| m.name.clone()).unwrap_or_default();
                (id, format!("medicine '{}'", name))
            }
            Tab::Equipment => {
                let id = self.equipment.require_selection("delete")?;
                let name = self.equipment.selected().map(|e| e.name.clone()).unwrap_or_default();
                (id, format!("equipment '{}'", name))
            }
        };

        let answer = self.prompt(&format!("{} Delete {}? [y/N] ", Icons::DEL, label))?.unwrap_or_default();
        if !is_yes(&answer) {
            ui::warn("Delete cancelled.");
            return Ok(());
        }

        let changed = match self.tab {
            Tab::Medicines => {
                let changed = self.store.delete_medicine(id)?;
                self.medicines.clear_selection();
                changed
            }
            Tab::Equipment => {
                let changed = self.store.delete_equipment(id)?;
                self.equipment.clear_selection();
                changed
            }
        };
        report_changed(changed, "Deleted");
        self.reload()?;
        self.render();
        Ok(())
    }

    /// Prompt for each medicine field, showing the live total once both counts are in
    fn medicine_form(&mut self, current: Option<MedicineForm>) -> Result<MedicineForm> {
        let current = current.unwrap_or_default();
        let name = self.field("Name", &current.name)?;
        let packs = self.field("Packs", &current.packs)?;
        let items_per_pack = self.field("Items / Pack", &current.items_per_pack)?;
        ui::summary_row("Total Quantity", &validation::preview_total(&packs, &items_per_pack).to_string());
        let expiry = self.field("Expiry (YYYY-MM-DD)", &current.expiry)?;
        Ok(MedicineForm::new(name, packs, items_per_pack, expiry))
    }

    fn equipment_form(&mut self, current: Option<EquipmentForm>) -> Result<EquipmentForm> {
        let current = current.unwrap_or_default();
        let name = self.field("Name", &current.name)?;
        let quantity = self.field("Quantity", &current.quantity)?;
        let description = self.field("Description / Location (optional)", &current.description)?;
        Ok(EquipmentForm::new(name, quantity, description))
    }

    /// Read one form field. An empty answer keeps `current`; [`CLEAR_FIELD`] empties it.
    fn field(&mut self, label: &str, current: &str) -> Result<String> {
        let prompt = if current.is_empty() {
            format!("  {}: ", label)
        } else {
            format!("  {} [{}, {} to clear]: ", label, current, CLEAR_FIELD)
        };
        let answer = self
            .prompt(&prompt)?
            .ok_or_else(|| Error::validation("Input ended before the form was complete."))?;
        Ok(match answer.trim() {
            "" => current.to_string(),
            CLEAR_FIELD => String::new(),
            answer => answer.to_string(),
        })
    }

    /// Print a prompt and read one line. `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn report_changed(changed: bool, verb: &str) {
    if changed {
        ui::success(verb);
    } else {
        ui::warn("No row was changed; the list may be stale.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, InventoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = InventoryStore::open(dir.path().join("clinic_inventory.db"));
        store.init_schema().unwrap();
        (dir, store)
    }

    fn run_script(store: &InventoryStore, script: &str) {
        Shell::new(store, Cursor::new(script.to_string())).run().unwrap();
    }

    #[test]
    fn test_add_medicine_through_form() {
        let (_dir, store) = temp_store();
        run_script(&store, "add\nParacetamol\n5\n10\n2025-01-01\nquit\n");

        let medicines = store.list_medicines().unwrap();
        assert_eq!(medicines.len(), 1);
        assert_eq!(medicines[0].total_qty, 50);
        assert_eq!(medicines[0].expiry, "2025-01-01");
    }

    #[test]
    fn test_invalid_form_writes_nothing_and_shell_continues() {
        let (_dir, store) = temp_store();
        run_script(&store, "add\nParacetamol\nabc\n10\n2025-01-01\nadd\nAspirin\n3\n10\n2025/01/01\nadd\nZinc\n3\n3\n2026-01-01\n");

        let names: Vec<String> = store.list_medicines().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Zinc"]);
    }

    #[test]
    fn test_update_requires_selection() {
        let (_dir, store) = temp_store();
        let mut shell = Shell::new(&store, Cursor::new(String::new()));

        assert!(matches!(shell.execute("update"), Err(Error::Selection(_))));
        assert!(matches!(shell.execute("delete"), Err(Error::Selection(_))));
        shell.execute("equipment").unwrap();
        assert!(matches!(shell.execute("update"), Err(Error::Selection(_))));
    }

    #[test]
    fn test_select_update_keeps_blank_fields() {
        let (_dir, store) = temp_store();
        let draft = MedicineForm::new("Aspirin", "3", "20", "2027-01-01").parse().unwrap();
        let id = store.insert_medicine(&draft).unwrap();

        // Keep the name, change packs, keep items and expiry
        run_script(&store, &format!("list\nselect {id}\nupdate\n\n8\n\n\nquit\n"));

        let medicines = store.list_medicines().unwrap();
        assert_eq!(medicines[0].name, "Aspirin");
        assert_eq!(medicines[0].packs, 8);
        assert_eq!(medicines[0].total_qty, 160);
        assert_eq!(medicines[0].expiry, "2027-01-01");
    }

    #[test]
    fn test_update_can_clear_description() {
        let (_dir, store) = temp_store();
        let draft = EquipmentForm::new("Otoscope", "4", "Exam room").parse().unwrap();
        let id = store.insert_equipment(&draft).unwrap();

        // Keep name and quantity, clear the description
        run_script(&store, &format!("equipment\nselect {id}\nupdate\n\n\n-\nquit\n"));

        let equipment = store.list_equipment().unwrap();
        assert_eq!(equipment[0].name, "Otoscope");
        assert_eq!(equipment[0].quantity, 4);
        assert_eq!(equipment[0].description, None);
    }

    #[test]
    fn test_clearing_required_field_is_rejected() {
        let (_dir, store) = temp_store();
        let draft = EquipmentForm::new("Otoscope", "4", "Exam room").parse().unwrap();
        let id = store.insert_equipment(&draft).unwrap();

        run_script(&store, &format!("equipment\nselect {id}\nupdate\n-\n\n\nquit\n"));

        assert_eq!(store.list_equipment().unwrap()[0].name, "Otoscope");
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let (_dir, store) = temp_store();
        let draft = EquipmentForm::new("Otoscope", "1", "Exam room").parse().unwrap();
        let id = store.insert_equipment(&draft).unwrap();

        run_script(&store, &format!("equipment\nselect {id}\ndelete\nn\nquit\n"));
        assert_eq!(store.list_equipment().unwrap().len(), 1);

        run_script(&store, &format!("equipment\nselect {id}\ndelete\ny\nquit\n"));
        assert!(store.list_equipment().unwrap().is_empty());
    }

    #[test]
    fn test_search_and_reset() {
        let (_dir, store) = temp_store();
        for name in ["Paracetamol", "Ibuprofen"] {
            let draft = MedicineForm::new(name, "4", "10", "2026-01-01").parse().unwrap();
            store.insert_medicine(&draft).unwrap();
        }
        let mut shell = Shell::new(&store, Cursor::new(String::new()));
        shell.reload().unwrap();

        shell.execute("search PARA").unwrap();
        assert_eq!(shell.medicines.rows().len(), 1);
        assert_eq!(shell.medicines.query(), Some("PARA"));

        assert!(matches!(shell.execute("search   "), Err(Error::Validation(_))));
        assert_eq!(shell.medicines.rows().len(), 1);

        shell.execute("reset").unwrap();
        assert_eq!(shell.medicines.rows().len(), 2);
    }

    #[test]
    fn test_select_unknown_row() {
        let (_dir, store) = temp_store();
        let mut shell = Shell::new(&store, Cursor::new(String::new()));
        assert!(matches!(shell.execute("select 42"), Err(Error::Selection(_))));
        assert!(matches!(shell.execute("select abc"), Err(Error::Validation(_))));
    }
}
