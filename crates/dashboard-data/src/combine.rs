//! Union of the per-platform marketing tables.

use dashboard_core::models::MarketingTable;

/// Union zero or more normalized marketing tables into one.
///
/// Rows are concatenated in input order (all of table 1, then table 2, and
/// so on; the append order is significant for display). The column set is
/// the union of the inputs' column sets; a column absent from one input is
/// simply null on that input's rows. Zero inputs produce the empty table.
///
/// The business table is never combined: there is exactly one.
pub fn combine_marketing(tables: &[MarketingTable]) -> MarketingTable {
    let mut combined = MarketingTable::default();
    for table in tables {
        combined.columns = combined.columns.union(table.columns);
        combined.rows.extend(table.rows.iter().cloned());
    }
    combined
}

// ── Tests ─────────────────────────────────────────────────────────────────────
