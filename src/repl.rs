//! REPL mode for building queries interactively.

use colored::*;

use crate::config::Config;
use crate::session::Session;

/// Run the interactive REPL mode.
pub fn run_repl(config: &Config) {
    use rustyline::DefaultEditor;
    use rustyline::error::ReadlineError;

    println!("{}", "aggq REPL — Interactive Mode".cyan().bold());
    println!("{}", "Type builder commands one per line. Commands:".dimmed());
    println!("  {}  - Exit the REPL", ".exit".yellow());
    println!("  {}  - Show command reference", ".help".yellow());
    println!("  {} - Clear screen", ".clear".yellow());
    println!();

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("{} {}", "Failed to initialize REPL:".red(), e);
            return;
        }
    };

    let history_path = config.history_path();
    if let Some(path) = &history_path {
        let _ = rl.load_history(path);
    }

    let mut session = Session::new();

    loop {
        let prompt = config.repl.prompt.cyan().bold().to_string();
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match line {
                    ".exit" | ".quit" | "exit" | "quit" => {
                        println!("{}", "Goodbye!".green());
                        break;
                    }
                    ".help" | "help" => {
                        show_repl_help();
                        continue;
                    }
                    ".clear" | "clear" => {
                        print!("\x1B[2J\x1B[1;1H");
                        continue;
                    }
                    _ => {}
                }

                match session.execute_line(line) {
                    Ok(Some(output)) => {
                        println!("{} {}", "→".green(), output.white().bold());
                        println!();
                    }
                    Ok(None) => {}
                    Err(e) => {
                        eprintln!("{} {}", "✗".red(), e.to_string().red());
                        if session.builder().is_none() {
                            eprintln!("{}", "Builder discarded. Type 'new' to start over.".dimmed());
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".green());
                break;
            }
            Err(err) => {
                eprintln!("{} {:?}", "Error:".red(), err);
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        let _ = rl.save_history(path);
    }
}

/// Show REPL help information.
pub fn show_repl_help() {
    println!("{}", "aggq REPL Commands:".cyan().bold());
    println!("  {}     - Exit the REPL", ".exit".yellow());
    println!("  {}     - Show this help", ".help".yellow());
    println!("  {}    - Clear screen", ".clear".yellow());
    println!();
    println!("{}", "Builder Commands:".cyan().bold());
    println!("  new                     start a fresh builder");
    println!("  reset                   clear the current builder");
    println!("  select                  add the SELECT clause");
    println!("  fields a, t.b as c      append plain fields");
    println!("  sum|avg|count|min|max x append aggregates (GROUP BY follows fields)");
    println!("  from table              set the table");
    println!("  cast field type         render a CAST expression");
    println!("  build                   print the SQL");
    println!("  show                    print the builder state as JSON");
    println!();
}
