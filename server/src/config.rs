//! Command-line and environment configuration for the server binary.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::store::{SqliteStore, StoreResult};

/// Database path that selects an in-memory store.
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", version, about = "REST backend for the to-do list")]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "TODO_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// SQLite database file, or `:memory:`.
    #[arg(long, env = "TODO_DATABASE", default_value = "todos.db")]
    pub database: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn open_store(&self) -> StoreResult<SqliteStore> {
        if self.database.as_os_str() == IN_MEMORY {
            SqliteStore::open_in_memory()
        } else {
            SqliteStore::open(&self.database)
        }
    }
}
