use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use caper_engine::{
    DirProvider, EngineConfig, FileSlot, Outcome, Reconciled, SceneView, Session, Startup,
};

const HELP: &str = "\
  <number>   take the choice with that key
  inventory  list what you carry (also: inv, i)
  save       save the game
  load       load the saved game
  restart    start the heist over
  help       show this help
  quit       leave (progress is autosaved)";

pub fn run(root: &Path, config: EngineConfig, save_dir: &Path, new: bool) -> Result<(), String> {
    let mut session = Session::new(config, DirProvider::new(root), FileSlot::new(save_dir));

    let startup = if new {
        session.restart().map_err(|e| e.to_string())?
    } else {
        session.start()
    };
    report_startup(&startup);

    println!("  {} Type 'help' for commands, 'quit' to exit.\n", "Caper".bold());
    print!("{}", render_view(&session.render()));

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim().to_lowercase();
        match input.as_str() {
            "" => continue,
            "quit" | "q" => break,
            "help" | "?" => println!("{HELP}\n"),
            "inventory" | "inv" | "i" => {
                println!("{}\n", inventory_line(&session.player().inventory))
            }
            "save" => match session.save() {
                Ok(()) => println!("  Game saved.\n"),
                Err(e) => println!("{}\n", format!("  Failed to save: {e}").yellow()),
            },
            "load" => match session.restore() {
                Ok(Some(reconciled)) => {
                    report_reconciled(&reconciled);
                    println!("  Loaded saved game.\n");
                    print!("{}", render_view(&session.render()));
                }
                Ok(None) => println!("  No saved game.\n"),
                Err(e) => println!("{}\n", format!("  Failed to load: {e}").yellow()),
            },
            "restart" => {
                print!("  Restart the heist? [y/N] ");
                io::stdout().flush().map_err(|e| e.to_string())?;
                line.clear();
                if reader.read_line(&mut line).map_err(|e| e.to_string())? == 0 {
                    break;
                }
                if !line.trim().eq_ignore_ascii_case("y") {
                    println!();
                    continue;
                }
                match session.restart() {
                    Ok(startup) => {
                        report_startup(&startup);
                        print!("{}", render_view(&session.render()));
                    }
                    Err(e) => println!("{}\n", e.to_string().yellow()),
                }
            }
            other => match other.parse::<usize>() {
                Ok(key) => match session.select(key) {
                    Ok(outcome) => {
                        report_outcome(&outcome);
                        print!("{}", render_view(&session.render()));
                    }
                    Err(e) => println!("{}\n", e.to_string().yellow()),
                },
                Err(_) => println!("{}\n", format!("unknown command: {other}").yellow()),
            },
        }
    }

    Ok(())
}

fn report_startup(startup: &Startup) {
    if let Some(e) = &startup.document_error {
        println!("{}", format!("  Could not load scenes: {e}").yellow());
    }
    if let Some(e) = &startup.save_error {
        println!("{}", format!("  Could not read saved game: {e}").yellow());
    }
    if let Some(reconciled) = &startup.restored {
        report_reconciled(reconciled);
        println!("  Resumed saved game.");
    }
}

fn report_reconciled(reconciled: &Reconciled) {
    match reconciled {
        Reconciled::Exact => {}
        Reconciled::Alias { from, to } => {
            println!("  (Scene '{from}' is now '{to}'.)");
        }
        Reconciled::Reset { from } => {
            println!(
                "{}",
                format!("  Saved scene '{from}' no longer exists; back to the start.").yellow()
            );
        }
    }
}

fn report_outcome(outcome: &Outcome) {
    for item in &outcome.applied.added {
        println!("  {} {item}", "+".green());
    }
    for item in &outcome.applied.removed {
        println!("  {} {item}", "-".red());
    }
    for change in &outcome.applied.stats {
        println!(
            "  {} {:+} ({})",
            capitalize(&change.stat),
            change.delta,
            change.value
        );
    }
    if let Some(e) = &outcome.load_error {
        println!("{}", format!("  {e}").yellow());
    }
    if let Some(e) = &outcome.save_error {
        println!("{}", format!("  Autosave failed: {e}").yellow());
    }
    println!();
}

/// Format a scene view for the terminal.
fn render_view(view: &SceneView) -> String {
    let mut out = format!("  {}\n\n", view.title.bold());
    for line in view.text.lines() {
        out.push_str(&format!("  {line}\n"));
    }
    out.push('\n');

    for choice in &view.choices {
        out.push_str(&format!("  [{}] {}\n", choice.shortcut.to_string().cyan(), choice.text));
    }
    if !view.choices.is_empty() {
        out.push('\n');
    }

    out.push_str(&format!("{}\n", inventory_line(&view.inventory)));
    let stats: Vec<String> = view
        .stats
        .iter()
        .map(|(name, value)| format!("{}: {value}", capitalize(name)))
        .collect();
    out.push_str(&format!("  {}\n\n", stats.join(" | ").dimmed()));
    out
}

fn inventory_line(items: &[String]) -> String {
    if items.is_empty() {
        "  Inventory: (empty)".to_string()
    } else {
        format!("  Inventory: {}", items.join(", "))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
