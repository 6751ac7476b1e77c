//! Per-entity presentation state
//!
//! A front end keeps one [`Session`] per record type: the rows currently on
//! screen and at most one selected id. Update and delete take the id from
//! here explicitly, so a missing selection is caught before storage is touched.

use crate::equipment::Equipment;
use crate::medicine::Medicine;
use crate::{Error, Result};

/// A stored record with an id the user can select.
pub trait Record {
    /// Noun used in selection prompts, e.g. "Select a medicine to update."
    const LABEL: &'static str;

    fn id(&self) -> i64;
}

impl Record for Medicine {
    const LABEL: &'static str = "a medicine";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Equipment {
    const LABEL: &'static str = "equipment";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct Session<T> {
    rows: Vec<T>,
    selected: Option<i64>,
    query: Option<String>,
}

impl<T> Default for Session<T> {
    fn default() -> Self {
        Self { rows: Vec::new(), selected: None, query: None }
    }
}

impl<T: Record> Session<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Active search query, if the rows are a filtered view
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Show a full listing. A selection survives only if its row is still shown.
    pub fn show_all(&mut self, rows: Vec<T>) {
        self.query = None;
        self.replace_rows(rows);
    }

    /// Show a search result for `query`.
    pub fn show_search(&mut self, query: impl Into<String>, rows: Vec<T>) {
        self.query = Some(query.into());
        self.replace_rows(rows);
    }

    fn replace_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        if let Some(id) = self.selected {
            if !self.rows.iter().any(|r| r.id() == id) {
                self.selected = None;
            }
        }
    }

    /// Select a displayed row by id
    pub fn select(&mut self, id: i64) -> Result<&T> {
        let row = self
            .rows
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| Error::Selection(format!("No {} with id {} is displayed.", strip_article(T::LABEL), id)))?;
        self.selected = Some(id);
        Ok(row)
    }

    pub fn selected(&self) -> Option<&T> {
        let id = self.selected?;
        self.rows.iter().find(|r| r.id() == id)
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
    }

    /// The selected id, or a selection error naming the attempted action.
    pub fn require_selection(&self, action: &str) -> Result<i64> {
        self.selected
            .ok_or_else(|| Error::Selection(format!("Select {} to {}.", T::LABEL, action)))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

fn strip_article(label: &str) -> &str {
    label.strip_prefix("a ").unwrap_or(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(id: i64, name: &str) -> Medicine {
        Medicine {
            id,
            name: name.to_string(),
            packs: 3,
            items_per_pack: 10,
            total_qty: 30,
            expiry: "2026-05-01".to_string(),
        }
    }

    #[test]
    fn test_require_selection_without_selection() {
        let session: Session<Medicine> = Session::new();
        match session.require_selection("update") {
            Err(Error::Selection(msg)) => assert_eq!(msg, "Select a medicine to update."),
            other => panic!("unexpected {other:?}"),
        }

        let session: Session<Equipment> = Session::new();
        match session.require_selection("delete") {
            Err(Error::Selection(msg)) => assert_eq!(msg, "Select equipment to delete."),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_select_displayed_row() {
        let mut session = Session::new();
        session.show_all(vec![med(1, "Aspirin"), med(2, "Zinc")]);

        assert_eq!(session.select(2).unwrap().name, "Zinc");
        assert_eq!(session.require_selection("update").unwrap(), 2);
        assert_eq!(session.selected().map(|m| m.id), Some(2));

        assert!(matches!(session.select(5), Err(Error::Selection(_))));
        // A failed select leaves the previous one in place
        assert_eq!(session.selected_id(), Some(2));
    }

    #[test]
    fn test_selection_dropped_when_row_leaves_view() {
        let mut session = Session::new();
        session.show_all(vec![med(1, "Aspirin"), med(2, "Zinc")]);
        session.select(1).unwrap();

        session.show_search("zinc", vec![med(2, "Zinc")]);
        assert_eq!(session.selected_id(), None);
        assert_eq!(session.query(), Some("zinc"));

        session.select(2).unwrap();
        session.show_all(vec![med(1, "Aspirin"), med(2, "Zinc")]);
        assert_eq!(session.selected_id(), Some(2));
        assert_eq!(session.query(), None);
    }

    #[test]
    fn test_clear_selection() {
        let mut session = Session::new();
        session.show_all(vec![med(1, "Aspirin")]);
        session.select(1).unwrap();
        session.clear_selection();
        assert!(session.require_selection("delete").is_err());
    }
}
