use super::ui;
use crate::core::PriceCatalog;
use comfy_table::Cell;

/// Renders the catalog as a table sorted by token id.
pub fn render_catalog(catalog: &PriceCatalog) -> String {
    if catalog.is_empty() {
        return ui::style_text("No tokens available.", ui::StyleType::Error);
    }

    let mut tokens: Vec<_> = catalog.tokens().collect();
    tokens.sort_by(|a, b| a.id.cmp(&b.id));

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Token"),
        ui::header_cell("Price"),
        ui::header_cell("Icon"),
    ]);
    for token in tokens {
        table.add_row(vec![
            Cell::new(&token.id),
            ui::number_cell(format!("{}", token.price)),
            Cell::new(ui::style_text(&token.icon_url, ui::StyleType::Subtle)),
        ]);
    }

    let mut output = table.to_string();
    output.push_str(&format!(
        "\n\n{} {}",
        ui::style_text("Tokens:", ui::StyleType::TotalLabel),
        ui::style_text(&catalog.len().to_string(), ui::StyleType::TotalValue)
    ));
    if let Some(fetched_at) = catalog.fetched_at() {
        output.push_str(&ui::style_text(
            &format!(" (fetched {})", fetched_at.format("%Y-%m-%d %H:%M:%S UTC")),
            ui::StyleType::Subtle,
        ));
    }
    output
}

pub fn run(catalog: &PriceCatalog) {
    println!("{}", render_catalog(catalog));
}
