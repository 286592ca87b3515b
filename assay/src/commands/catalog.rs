// assay/src/commands/catalog.rs
//
// USE CASE: print the built-in catalogs, the reference a steward needs
// when naming signals or fields in settings and plans.

use comfy_table::{Table, presets::UTF8_FULL};

use assay_core::domain::catalog::fields::FIELD_CATALOG;
use assay_core::domain::catalog::signals::CanonicalSignal;
use assay_core::domain::patterns::templates::TEMPLATE_CATALOG;

pub fn execute(section: &str) -> anyhow::Result<()> {
    match section {
        "signals" => print_signals(),
        "fields" => print_fields(),
        "patterns" => print_patterns(),
        other => anyhow::bail!(
            "Unknown catalog section '{}'. Expected 'signals', 'fields' or 'patterns'.",
            other
        ),
    }
    Ok(())
}

fn print_signals() {
    println!("📖 Signal catalog");
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Signal", "Severity", "Description"]);
    for signal in CanonicalSignal::ALL {
        let def = signal.definition();
        table.add_row(vec![
            signal.as_str().to_string(),
            format!("{:?}", def.severity),
            def.description.to_string(),
        ]);
    }
    println!("{table}");
}

fn print_fields() {
    println!("📖 Field catalog");
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Field", "Category", "Columns", "Signals"]);
    for field in FIELD_CATALOG {
        let signals: Vec<&str> = field
            .contributions
            .iter()
            .map(|c| c.signal.as_str())
            .collect();
        table.add_row(vec![
            field.id.to_string(),
            field.category.to_string(),
            field.source_columns.join(", "),
            signals.join(", "),
        ]);
    }
    println!("{table}");
}

fn print_patterns() {
    println!("📖 Pattern templates");
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Id", "Name", "Required", "Recommended"]);
    for template in TEMPLATE_CATALOG {
        table.add_row(vec![
            template.id.to_string(),
            template.name.to_string(),
            template.required_fields.join(", "),
            template.recommended_fields.join(", "),
        ]);
    }
    println!("{table}");
}
