//! ipcarrier: CLI tool for looking up IPv4 carriers in a range database.

use clap::{Parser, Subcommand};
use ipcarrier::{resolve_ipv4, CarrierDatabase, DatabaseConfig, LoadMode, Lookup};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ipcarrier")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Look up the network carrier of IPv4 addresses", long_about = None)]
struct Cli {
    /// Database file (defaults to $IPCARRIER_DB or ./zzipsdb.dat)
    #[arg(short, long, global = true)]
    db: Option<PathBuf>,

    /// Read the database into memory instead of memory-mapping it
    #[arg(long, global = true)]
    no_mmap: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up hostnames or IPv4 addresses
    Lookup {
        /// Hostnames or dotted-quad addresses
        #[arg(required = true)]
        hosts: Vec<String>,

        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Show database version and index statistics
    Info,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = DatabaseConfig::default();
    if let Some(db) = cli.db {
        config = config.with_path(db);
    }
    if cli.no_mmap {
        config = config.with_load_mode(LoadMode::Memory);
    }

    let result = match cli.command {
        Commands::Lookup { hosts, json } => lookup_hosts(&config, &hosts, json),
        Commands::Info => show_info(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn lookup_hosts(
    config: &DatabaseConfig,
    hosts: &[String],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = CarrierDatabase::open_with_config(config)?;
    let mut failed = false;

    for host in hosts {
        let outcome = resolve_ipv4(host).and_then(|addr| Ok((addr, db.lookup_addr(addr)?)));

        match outcome {
            Ok((addr, result)) => {
                if json {
                    println!("{}", json_line(host, &addr.to_string(), &result));
                } else {
                    println!("{}\t{}\t{}", host, addr, display_label(&result));
                }
            }
            Err(e) => {
                failed = true;
                if json {
                    let line = serde_json::json!({ "host": host, "error": e.to_string() });
                    println!("{}", line);
                } else {
                    eprintln!("{}\terror: {}", host, e);
                }
            }
        }
    }

    db.close();

    if failed {
        return Err("one or more lookups failed".into());
    }
    Ok(())
}

fn display_label(result: &Lookup) -> String {
    match result {
        Lookup::Unmapped(code) => format!("unmapped carrier code {}", code),
        other => other.label().unwrap_or_default().to_string(),
    }
}

fn json_line(host: &str, addr: &str, result: &Lookup) -> serde_json::Value {
    let code = match result {
        Lookup::Carrier(carrier) => Some(carrier.code()),
        Lookup::Unmapped(code) => Some(*code),
        Lookup::Unknown => None,
    };

    serde_json::json!({
        "host": host,
        "ip": addr,
        "carrier": result.carrier(),
        "label": result.label(),
        "code": code,
    })
}

fn show_info(config: &DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = CarrierDatabase::open_with_config(config)?;
    let buckets = db.populated_buckets()?;

    println!("Database:   {:?}", config.path);
    println!("Version:    {:?}", db.version_string());
    println!("Size:       {} bytes", db.size());
    println!("Mapped:     {}", db.is_mapped());
    println!("Records:    {}", db.record_count()?);
    println!("Buckets:    {} of 256 first octets populated", buckets.len());
    Ok(())
}
