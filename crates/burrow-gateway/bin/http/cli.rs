use burrow_storage::settings::DEFAULT_QUEUE_CAPACITY;
use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "BURROW_LISTEN_ADDR";
pub const STORE_ENV: &str = "BURROW_STORE";
pub const QUEUE_CAPACITY_ENV: &str = "BURROW_QUEUE_CAPACITY";
pub const SYNC_ENV: &str = "BURROW_SYNC";
pub const GENERATOR_ENV: &str = "BURROW_GENERATOR";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_STORE: &str = "store.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeneratorArg {
    #[value(name = "base62")]
    Base62,
    #[value(name = "base58")]
    Base58,
}

impl Display for GeneratorArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorArg::Base62 => write!(f, "base62"),
            GeneratorArg::Base58 => write!(f, "base58"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "burrow", about = "Maps short keys to long URLs")]
pub struct CLI {
    /// HTTP listen address
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Data store file name
    #[arg(long, env = STORE_ENV, default_value = DEFAULT_STORE)]
    pub store: PathBuf,

    /// Records that may wait for the log writer before requests block
    #[arg(long, env = QUEUE_CAPACITY_ENV, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,

    /// fsync the log after every record
    #[arg(long, env = SYNC_ENV)]
    pub sync: bool,

    #[arg(
        long,
        env = GENERATOR_ENV,
        value_enum,
        default_value_t = GeneratorArg::Base62
    )]
    pub generator: GeneratorArg,
}
