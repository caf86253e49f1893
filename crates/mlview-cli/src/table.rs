//! Terminal rendering of the dashboard tables.

use comfy_table::{presets::UTF8_FULL, Table};
use mlview_core::views::NAME_COLUMN;
use mlview_core::TableRow;

/// One row per entry, with the name and the dashboard path it links to.
pub fn rows_table(rows: &[TableRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header([NAME_COLUMN, "Link"]);
    for row in rows {
        table.add_row([row.label.as_str(), row.href.as_str()]);
    }
    table
}
