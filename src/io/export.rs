use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::domain::{Category, Ledger, format_cents};
use crate::storage::LedgerRecordView;

/// Ledger snapshot for JSON export. Carries the persisted record fields so it
/// can be trimmed back into a `data.json` by hand.
#[derive(Debug, Serialize)]
pub struct LedgerSnapshot<'a> {
    pub version: &'static str,
    pub exported_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: LedgerRecordView<'a>,
}

/// Exporter for converting ledger data to CSV or JSON
pub struct Exporter<'a> {
    ledger: &'a Ledger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Export expenses to CSV, optionally restricted to one category.
    /// Rows follow category order, then insertion order.
    pub fn export_expenses_csv<W: Write>(
        &self,
        writer: W,
        category: Option<Category>,
    ) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["category", "name", "amount"])?;

        let mut count = 0;
        for (cat, entries) in self.ledger.iter() {
            if category.is_some_and(|wanted| wanted != cat) {
                continue;
            }
            for entry in entries {
                csv_writer.write_record([
                    cat.as_str(),
                    entry.name(),
                    format_cents(entry.amount_cents()).as_str(),
                ])?;
                count += 1;
            }
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the whole ledger as a pretty-printed JSON snapshot.
    pub fn export_full_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION"),
            exported_at: Utc::now(),
            record: LedgerRecordView::from(self.ledger),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(self.ledger.iter().map(|(_, entries)| entries.len()).sum())
    }
}
