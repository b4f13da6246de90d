use super::ui;
use crate::core::series::{SeriesError, SeriesReport};
use comfy_table::Cell;

fn result_cell(result: &Result<u64, SeriesError>) -> Cell {
    match result {
        Ok(sum) => ui::number_cell(sum.to_string()),
        Err(e) => ui::error_cell(&e.to_string()),
    }
}

pub fn render_report(report: &SeriesReport) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Method"), ui::header_cell("Sum")]);
    table.add_row(vec![Cell::new("Loop"), result_cell(&report.looped)]);
    table.add_row(vec![Cell::new("Formula"), result_cell(&report.formula)]);
    table.add_row(vec![Cell::new("Recursion"), result_cell(&report.recursive)]);

    format!(
        "Input n: {}\n\n{}",
        ui::style_text(&report.n.to_string(), ui::StyleType::Title),
        table
    )
}

pub fn run(n: u64) {
    println!("{}", render_report(&SeriesReport::compute(n)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_report() {
        let output = console::strip_ansi_codes(&render_report(&SeriesReport::compute(100))).to_string();
        assert!(output.starts_with("Input n: 100"));
        assert_eq!(output.matches("5050").count(), 3);
    }

    #[test]
    fn test_render_report_with_errors() {
        let output =
            console::strip_ansi_codes(&render_report(&SeriesReport::compute(1_000_000))).to_string();
        assert!(output.contains("500000500000"));
        assert!(output.contains("recursion limit"));
    }
}
