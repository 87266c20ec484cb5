use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use caper_core::{Audit, SceneStore};
use caper_engine::{ContentProvider, DirProvider};

pub fn run(root: &Path, scenes: &str, start: &str) -> Result<(), String> {
    let document = DirProvider::new(root)
        .fetch(scenes)
        .map_err(|e| e.to_string())?;

    for (id, reason) in document.rejected() {
        eprintln!("  {} scene '{id}' ignored: {reason}", "warning:".yellow());
    }

    let store = SceneStore::from_document(document);
    let audit = Audit::run(&store, start);

    if audit.start_missing {
        eprintln!("  {} start scene '{start}' is missing", "error:".red());
    }

    if !audit.dangling.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Scene", "Choice", "Missing target"]);
        for d in &audit.dangling {
            table.add_row(vec![d.scene.clone(), d.position.to_string(), d.target.clone()]);
        }
        println!("{table}");
    }

    for id in &audit.unreachable {
        eprintln!("  {} scene '{id}' is unreachable from '{start}'", "warning:".yellow());
    }

    if !audit.pending_loads.is_empty() {
        println!("  Loads on demand: {}", audit.pending_loads.join(", "));
    }

    if !audit.is_clean() {
        return Err(format!(
            "{} broken link{}{}",
            audit.dangling.len(),
            if audit.dangling.len() == 1 { "" } else { "s" },
            if audit.start_missing { ", start scene missing" } else { "" },
        ));
    }

    println!("  All checks passed for '{scenes}'.");
    println!("  {} scenes", store.len());
    Ok(())
}
