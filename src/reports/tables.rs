use super::{FrequencyTable, CHART_THRESHOLD};
use crate::optimizer::AnnealingOutcome;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Frequency table restricted to the rows the chart shows.
pub fn build_frequency_table(table: &FrequencyTable) -> Table {
    let mut out = Table::new();
    out.load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Allele").add_attribute(Attribute::Bold)];
    header.extend(
        table
            .columns()
            .iter()
            .map(|c| Cell::new(&c.label).add_attribute(Attribute::Bold)),
    );
    out.set_header(header);

    for (allele, values) in table.chart_rows(CHART_THRESHOLD) {
        let mut cells = vec![Cell::new(allele)];
        cells.extend(
            values
                .iter()
                .map(|v| Cell::new(format!("{:.4}", v)).set_alignment(CellAlignment::Right)),
        );
        out.add_row(cells);
    }
    out
}

pub fn print_frequency_table(table: &FrequencyTable) {
    println!("\n{}", build_frequency_table(table));
}

pub fn build_run_summary(outcome: &AnnealingOutcome) -> Table {
    let initial = outcome.history.first().copied().unwrap_or(outcome.score);
    let iterations = outcome.history.len().saturating_sub(1);
    let rate = if iterations > 0 {
        outcome.accepted as f64 / iterations as f64 * 100.0
    } else {
        0.0
    };

    let mut out = Table::new();
    out.load_preset(ASCII_FULL);
    out.add_row(vec![Cell::new("Initial score"), Cell::new(format!("{:.6}", initial))]);
    out.add_row(vec![
        Cell::new("Final score").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.6}", outcome.score)).fg(Color::Cyan),
    ]);
    out.add_row(vec![
        Cell::new("Best score held"),
        Cell::new(format!("{:.6}", outcome.best_score)).fg(Color::Green),
    ]);
    out.add_row(vec![Cell::new("Iterations"), Cell::new(iterations)]);
    out.add_row(vec![
        Cell::new("Accepted moves"),
        Cell::new(format!("{} ({:.1}%)", outcome.accepted, rate)),
    ]);
    if let Some(col) = out.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    out
}

pub fn print_run_summary(outcome: &AnnealingOutcome) {
    println!("\n{}", build_run_summary(outcome));
}
