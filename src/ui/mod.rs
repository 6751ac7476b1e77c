pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, error, header, info, muted, success, summary_row, warn};
pub use table::{equipment_table, equipment_table_with, medicine_table, medicine_table_with, stats_table, TableBuilder};
pub use theme::{theme, Theme};
