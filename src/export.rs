//! CSV export of simulated ledgers

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::Result;
use crate::month::Month;
use crate::runner::ScenarioProjection;
use crate::simulation::MonthlyBalance;

/// Write one CSV row per ledger month, with a header
pub fn write_ledger_csv<W: Write>(writer: W, rows: &[MonthlyBalance]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write balances of several projections side by side.
///
/// Months run over the union of all axes; a scenario without a row for a
/// month leaves its cell blank.
pub fn write_comparison_csv<W: Write>(writer: W, projections: &[ScenarioProjection]) -> Result<()> {
    let mut table: BTreeMap<Month, Vec<Option<f64>>> = BTreeMap::new();
    for (column, projection) in projections.iter().enumerate() {
        for row in &projection.rows {
            table.entry(row.month).or_insert_with(|| vec![None; projections.len()])[column] = Some(row.balance);
        }
    }

    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["month".to_string()];
    header.extend(projections.iter().map(|p| p.name.clone()));
    csv_writer.write_record(&header)?;

    for (month, balances) in &table {
        let mut record = vec![month.to_string()];
        record.extend(
            balances
                .iter()
                .map(|b| b.map(|v| format!("{v:.2}")).unwrap_or_default()),
        );
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}
