//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.  Decrypted values are only
//! ever printed when the user explicitly asks for them.

use std::collections::BTreeMap;

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::SecretRecord;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of all secrets (Name, Namespace, Fields, Updated).
pub fn print_records_table(records: &[SecretRecord]) {
    if records.is_empty() {
        info("No secrets in this vault yet.");
        tip("Run `rune add -f <fields>` to add your first secret.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Namespace", "Fields", "Updated"]);

    for r in records {
        table.add_row(vec![
            r.name.clone(),
            r.namespace.clone(),
            r.fields.keys().cloned().collect::<Vec<_>>().join(", "),
            r.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print the fields of a single secret, masking values unless `show`.
pub fn print_fields_table(full_name: &str, fields: &BTreeMap<String, String>, show: bool) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Field", "Value"]);

    for (i, (name, value)) in fields.iter().enumerate() {
        let display = if show {
            value.clone()
        } else {
            "\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}".to_string()
        };
        table.add_row(vec![(i + 1).to_string(), name.clone(), display]);
    }

    info(&format!("Secret '{full_name}'"));
    println!("{table}");
}
