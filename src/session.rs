//! Interactive session
//!
//! The numbered menu loop: print the catalog menu, read a choice, prompt for
//! the chosen report's parameters, run it, print the result. Report failures
//! are printed and the loop continues; only Ctrl-D at the menu (or the exit
//! entry) leaves the session.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use crate::catalog;
use crate::error::{CliError, Result};
use crate::reports;
use crate::store::{ParamValue, Store};

/// Menu entries in display order: label plus the catalog report it runs.
static MENU: &[(&str, &str)] = &[
    ("Show test data overview", "overview"),
    ("Films by year", "films-by-year"),
    ("Director statistics", "director-statistics"),
    ("Actors by film", "actors-by-film"),
    ("Top grossing films", "top-grossing-films"),
    ("Films by genre", "films-by-genre"),
    ("Average film ratings", "average-film-ratings"),
    ("Add new film", "add-film"),
    ("Add new actor", "add-actor"),
    ("Update film box office", "update-film-box-office"),
    ("Demonstrate all SQL queries", "demonstrate-all"),
    ("Film duration statistics", "duration-statistics"),
];

pub struct Session {
    editor: Editor<(), DefaultHistory>,
    store: Box<dyn Store>,
}

impl Session {
    pub fn new(store: Box<dyn Store>) -> Result<Self> {
        let editor = Editor::new()?;
        Ok(Self { editor, store })
    }

    /// Run the menu loop until the user exits.
    pub fn run(&mut self) -> Result<()> {
        println!("{}", "Cinema Database CLI".cyan().bold());
        println!("Connected. Pick a report by number.");

        loop {
            self.print_menu();
            let line = match self.editor.readline("Enter choice: ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };
            let choice = line.trim();
            if choice.is_empty() {
                continue;
            }
            let _ = self.editor.add_history_entry(choice);

            match choice.parse::<usize>() {
                Ok(n) if n == MENU.len() + 1 => break,
                Ok(n) if (1..=MENU.len()).contains(&n) => self.dispatch(MENU[n - 1].1),
                _ => eprintln!(
                    "{}",
                    format!("Invalid choice. Enter a number from 1 to {}.", MENU.len() + 1).red()
                ),
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_menu(&self) {
        println!();
        println!("{}", "=== Cinema Database Menu ===".cyan());
        for (i, (label, _)) in MENU.iter().enumerate() {
            println!("{:>2}. {}", i + 1, label);
        }
        println!("{:>2}. Exit", MENU.len() + 1);
    }

    /// Run one report, containing its failure at this boundary.
    fn dispatch(&mut self, name: &str) {
        match self.run_one(name) {
            Ok(output) => println!("\n{}", output),
            Err(CliError::Cancelled) => println!("{}", "Cancelled.".yellow()),
            Err(e) => {
                tracing::error!(report = name, error = %e, "report failed");
                eprintln!("{}", format!("Error: {}", e).red());
            }
        }
    }

    fn run_one(&mut self, name: &str) -> Result<String> {
        let spec = catalog::find(name).ok_or_else(|| CliError::UnknownReport(name.to_string()))?;

        let mut params: Vec<ParamValue> = Vec::with_capacity(spec.params.len());
        for param in spec.params {
            loop {
                let raw = self.prompt(&format!("{}: ", param.prompt))?;
                match param.kind.parse(&raw) {
                    Ok(value) => {
                        params.push(value);
                        break;
                    }
                    Err(e) => eprintln!("{}", e.to_string().red()),
                }
            }
        }

        reports::run_report(self.store.as_mut(), name, &params)
    }

    /// Read one prompt line. Ctrl-C or Ctrl-D cancels the current report and
    /// returns to the menu.
    fn prompt(&mut self, label: &str) -> Result<String> {
        match self.editor.readline(label) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Err(CliError::Cancelled),
            Err(e) => Err(e.into()),
        }
    }
}
