use clap::{Parser, Subcommand};

/// Record backend for the job matching system
#[derive(Debug, Parser)]
#[command(name = "job-matcher", version, about)]
pub struct Cli {
    /// Keep records in process memory instead of PostgreSQL
    #[arg(long, global = true)]
    pub in_memory: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }

    /// Reject flag combinations that would silently do nothing
    pub fn check(&self) -> Result<(), String> {
        if self.in_memory && self.command() == Command::Migrate {
            return Err("migrate needs PostgreSQL; the in-memory store has no schema to migrate".to_string());
        }
        Ok(())
    }
}
