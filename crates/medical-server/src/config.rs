//! Server configuration from command-line flags and environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use medical_core::db::{Database, DbResult};

#[derive(Debug, Clone, Parser)]
#[command(name = "medical-server", version, about = "REST API for medical-practice records")]
pub struct Config {
    /// SQLite database file, created if missing
    #[arg(long, env = "MEDICAL_DATABASE", default_value = "medical.db")]
    pub database: PathBuf,

    /// Address to listen on
    #[arg(long, env = "MEDICAL_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Keep all data in memory; nothing survives a restart
    #[arg(long, env = "MEDICAL_IN_MEMORY")]
    pub in_memory: bool,
}

impl Config {
    pub fn open_database(&self) -> DbResult<Database> {
        if self.in_memory {
            Database::open_in_memory()
        } else {
            Database::open(&self.database)
        }
    }
}
