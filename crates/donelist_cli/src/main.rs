//! Command-line front end for the donelist core.
//!
//! # Responsibility
//! - Map subcommands onto `TodoStore` operations.
//! - Render the active/completed projections as plain text.

use clap::{Parser, Subcommand};
use donelist_core::db::open_db;
use donelist_core::{
    init_logging, AddTodoError, AppConfig, KvStorage, PersistenceAdapter, SqliteKvStorage, TodoId,
    TodoStore, TodoViews, ACTIVE_EMPTY_HINT, COMPLETED_EMPTY_HINT,
};
use log::error;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "donelist", version, about = "A small persistent todo list")]
struct Cli {
    /// SQLite file holding the list (overrides DONELIST_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Storage key of the list (overrides DONELIST_STORAGE_KEY).
    #[arg(long, global = true)]
    key: Option<String>,
    /// trace|debug|info|warn|error (overrides DONELIST_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files (overrides DONELIST_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a todo; words are joined with single spaces.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Toggle the finished flag of a todo.
    Finish {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Delete a todo.
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Show active and recently completed todos.
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("donelist: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;

    if let Some(log_dir) = cli.log_dir.as_ref().or(config.log_dir.as_ref()) {
        let level = cli.log_level.as_deref().unwrap_or(config.log_level);
        init_logging(level, log_dir)?;
    }

    let db_path = cli.db.unwrap_or(config.db_path);
    let key = cli.key.unwrap_or(config.storage_key);
    let conn = open_db(&db_path)?;
    let mut store = TodoStore::open(PersistenceAdapter::with_key(
        SqliteKvStorage::new(&conn),
        key,
    ));

    let stdout = io::stdout();
    execute(&mut store, cli.command, &mut stdout.lock())?;
    Ok(())
}

fn execute<S: KvStorage>(
    store: &mut TodoStore<S>,
    command: Command,
    out: &mut impl Write,
) -> io::Result<()> {
    match command {
        Command::Add { text } => match store.add(&text.join(" ")) {
            Ok(todo) => writeln!(out, "added {}: {}", todo.id(), todo.content()),
            Err(AddTodoError::EmptyContent) => writeln!(out, "please enter a todo first"),
            Err(err) => writeln!(out, "not added: {err}"),
        },
        Command::Finish { id } => {
            if store.toggle_finish(TodoId::new(id)) {
                writeln!(out, "toggled {id}")
            } else {
                writeln!(out, "no todo with id {id}")
            }
        }
        Command::Delete { id } => {
            if store.delete(TodoId::new(id)) {
                writeln!(out, "deleted {id}")
            } else {
                writeln!(out, "no todo with id {id}")
            }
        }
        Command::List => render(&store.views(), out),
    }
}

fn render(views: &TodoViews<'_>, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Todo App : {}", views.total_count)?;

    if views.active_is_empty() {
        writeln!(out, "  {ACTIVE_EMPTY_HINT}")?;
    } else {
        for (position, todo) in views.active.iter().enumerate() {
            writeln!(out, "  {}. [{}] {}", position + 1, todo.id(), todo.content())?;
        }
    }

    writeln!(out, "Completed:")?;
    if views.completed_is_empty() {
        writeln!(out, "  {COMPLETED_EMPTY_HINT}")?;
    } else {
        for todo in &views.completed {
            writeln!(out, "  x [{}] {}", todo.id(), todo.content())?;
        }
    }

    writeln!(out, "{} active", views.active_count)
}

#[cfg(test)]
mod tests {
    use super::{execute, Cli, Command};
    use clap::Parser;
    use donelist_core::{IdGenerator, MemoryKvStorage, PersistenceAdapter, TodoStore};

    fn run_commands(storage: &MemoryKvStorage, commands: Vec<Command>) -> String {
        let mut store = TodoStore::open_with_ids(
            PersistenceAdapter::new(storage),
            IdGenerator::with_clock(|| 100),
        );
        let mut out = Vec::new();
        for command in commands {
            execute(&mut store, command, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn list_of_empty_store_shows_both_hints() {
        let storage = MemoryKvStorage::new();
        let output = run_commands(&storage, vec![Command::List]);
        assert_eq!(
            output,
            "Todo App : 0\n  Nothing to do. Add a todo below.\nCompleted:\n  Completed todos will show here.\n0 active\n"
        );
    }

    #[test]
    fn add_finish_and_list() {
        let storage = MemoryKvStorage::new();
        let output = run_commands(
            &storage,
            vec![
                Command::Add {
                    text: vec!["buy".to_string(), "milk".to_string()],
                },
                Command::Add {
                    text: vec!["walk".to_string()],
                },
                Command::Finish { id: 100 },
                Command::List,
            ],
        );
        assert_eq!(
            output,
            "added 100: buy milk\nadded 101: walk\ntoggled 100\nTodo App : 2\n  1. [101] walk\nCompleted:\n  x [100] buy milk\n1 active\n"
        );
    }

    #[test]
    fn blank_add_and_unknown_ids_are_reported() {
        let storage = MemoryKvStorage::new();
        let output = run_commands(
            &storage,
            vec![
                Command::Add {
                    text: vec!["  ".to_string()],
                },
                Command::Delete { id: 7 },
                Command::Finish { id: 7 },
            ],
        );
        assert_eq!(
            output,
            "please enter a todo first\nno todo with id 7\nno todo with id 7\n"
        );
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["donelist", "finish", "42", "--key", "work"]).unwrap();
        assert_eq!(cli.key.as_deref(), Some("work"));
        assert!(matches!(cli.command, Command::Finish { id: 42 }));
    }

    #[test]
    fn negative_ids_parse_as_values() {
        let finish = Cli::try_parse_from(["donelist", "finish", "-5"]).unwrap();
        assert!(matches!(finish.command, Command::Finish { id: -5 }));

        let delete = Cli::try_parse_from(["donelist", "delete", "-12", "--key", "work"]).unwrap();
        assert!(matches!(delete.command, Command::Delete { id: -12 }));
        assert_eq!(delete.key.as_deref(), Some("work"));
    }

    #[test]
    fn add_requires_text() {
        assert!(Cli::try_parse_from(["donelist", "add"]).is_err());
    }
}
