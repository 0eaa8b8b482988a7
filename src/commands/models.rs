use crate::advisor::offline_recommendation;
use crate::catalog;
use anyhow::Result;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Table};

/// Print the pricing-model catalog and the item-strategy guide.
pub fn list_models() -> Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Id", "Name", "Fixed", "Contingent", "Risk", "Description"]);
    for model in catalog::all() {
        table.add_row(vec![
            model.id.clone(),
            model.name.clone(),
            format!("{:.0}%", model.fixed_fee_ratio * 100.0),
            format!("{:.0}%", model.contingent_fee_ratio * 100.0),
            format!("{:?}", model.risk),
            model.description.clone(),
        ]);
    }
    println!("{table}");

    println!("\n{}", "Item-strategy guide".bold());
    for strategy in catalog::item_strategies() {
        println!(
            "\n{}\n  {}",
            strategy.label.blue().bold(),
            offline_recommendation(strategy, catalog::all())
        );
    }
    Ok(())
}
