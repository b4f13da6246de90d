use super::ui;
use crate::core::engine::Delay;
use crate::core::{Conversion, ConversionEngine, ConversionState, PriceCatalog};
use anyhow::{Result, anyhow};

/// The line shown for a successful swap, e.g. `Result: 1.0000 ETH`.
pub fn format_conversion(conversion: &Conversion) -> String {
    format!(
        "{} {} {}",
        ui::style_text("Result:", ui::StyleType::TotalLabel),
        ui::style_text(&conversion.output.to_string(), ui::StyleType::TotalValue),
        conversion.request.destination
    )
}

/// Runs a single swap quote, keeping a spinner up while the request is pending.
pub async fn run<D: Delay>(
    engine: &ConversionEngine<D>,
    catalog: &PriceCatalog,
    from: &str,
    to: &str,
    amount: &str,
) -> Result<Conversion> {
    let mut rx = engine.subscribe();
    let pb = ui::new_spinner("Validating...");

    let watcher = async {
        while rx.changed().await.is_ok() {
            match &*rx.borrow_and_update() {
                ConversionState::Resolving => pb.set_message("Swapping..."),
                ConversionState::Validating | ConversionState::Idle => {}
                ConversionState::Failed(_) | ConversionState::Succeeded(_) => break,
            }
        }
    };

    let (result, _) = tokio::join!(engine.submit(catalog, from, to, amount), watcher);
    pb.finish_and_clear();

    match result {
        Ok(conversion) => {
            println!("{}", format_conversion(&conversion));
            Ok(conversion)
        }
        Err(e) => {
            eprintln!("{}", ui::style_text(&e.user_message(), ui::StyleType::Error));
            Err(anyhow!(e))
        }
    }
}
