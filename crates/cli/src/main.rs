//! CLI for the biblio circulation system.
//!
//! State lives in a single JSON snapshot file: loaded before the
//! operation, saved back only when it succeeds.

use biblio_core::{Client, ClientCategory, ClientId, Material, MaterialId, SanctionId};
use biblio_engine::{catalog, circulation, reservation, sanction};
use biblio_store::{snapshot, EntityStore, MemoryStore};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "biblio", version, about = "Library circulation manager")]
struct Cli {
    /// Snapshot file holding the library state.
    #[arg(long, global = true, env = "BIBLIO_STATE", default_value = "biblio.json")]
    state: PathBuf,

    /// Output machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage clients.
    Client {
        #[command(subcommand)]
        command: ClientCommands,
    },
    /// Manage the material catalog.
    Material {
        #[command(subcommand)]
        command: MaterialCommands,
    },
    /// Create, renew, return, and list loans.
    Loan {
        #[command(subcommand)]
        command: LoanCommands,
    },
    /// Create, cancel, and list reservations.
    Reservation {
        #[command(subcommand)]
        command: ReservationCommands,
    },
    /// Issue, lift, and list sanctions.
    Sanction {
        #[command(subcommand)]
        command: SanctionCommands,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CategoryArg {
    Student,
    Professor,
    Staff,
}

impl From<CategoryArg> for ClientCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Student => ClientCategory::Student,
            CategoryArg::Professor => ClientCategory::Professor,
            CategoryArg::Staff => ClientCategory::Staff,
        }
    }
}

#[derive(Subcommand, Debug)]
enum ClientCommands {
    /// Register a client.
    Add {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        name: String,
        #[arg(long, value_enum)]
        category: CategoryArg,
        /// Faculty, degree, or work area.
        #[arg(long)]
        detail: Option<String>,
    },
    /// Remove a client with no active loans or reservations.
    Rm {
        #[arg(long)]
        id: u64,
    },
    /// List clients.
    List {
        /// Only clients currently vetoed.
        #[arg(long)]
        vetoed: bool,
    },
}

#[derive(Subcommand, Debug)]
enum MaterialCommands {
    /// Register a material; it enters the catalog as available.
    Add {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        category: String,
    },
    /// Remove a material that is neither loaned nor reserved.
    Rm {
        #[arg(long)]
        id: u64,
    },
    /// List materials.
    List,
}

#[derive(Subcommand, Debug)]
enum LoanCommands {
    /// Loan a material to a client.
    Create {
        #[arg(long)]
        client: u64,
        #[arg(long)]
        material: u64,
        /// Operation date, YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Extend a loan by one period from its current due date.
    Renew {
        #[arg(long)]
        client: u64,
        #[arg(long)]
        material: u64,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Return a material; overdue returns sanction and veto the client.
    Return {
        #[arg(long)]
        client: u64,
        #[arg(long)]
        material: u64,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List active loans.
    List,
}

#[derive(Subcommand, Debug)]
enum ReservationCommands {
    /// Reserve an available material.
    Create {
        #[arg(long)]
        client: u64,
        #[arg(long)]
        material: u64,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Cancel the client's own reservation.
    Cancel {
        #[arg(long)]
        client: u64,
        #[arg(long)]
        material: u64,
    },
    /// List active reservations.
    List,
}

#[derive(Subcommand, Debug)]
enum SanctionCommands {
    /// Issue a manual sanction; the client is vetoed.
    Issue {
        #[arg(long)]
        client: u64,
        #[arg(long)]
        reason: String,
        #[arg(long)]
        amount: i64,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Lift a sanction; the veto clears when it was the last one.
    Lift {
        #[arg(long)]
        id: u64,
    },
    /// List sanctions, optionally for one client.
    List {
        #[arg(long)]
        client: Option<u64>,
    },
}

/// Envelope for `--json` output.
#[derive(Serialize)]
struct JsonOut<'a, T: Serialize> {
    ok: bool,
    data: &'a T,
}

fn emit<T: Serialize>(json: bool, data: &T, plain: String) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{plain}");
    }
    Ok(())
}

fn or_today(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

/// Rendering of a failed operation under `--json`; the counterpart of
/// the `ok: true` envelope [`emit`] writes.
fn failure_envelope(err: &dyn std::error::Error) -> String {
    serde_json::json!({ "ok": false, "error": err.to_string() }).to_string()
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    match run(cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            if json {
                println!("{}", failure_envelope(err.as_ref()));
            } else {
                eprintln!("error: {err}");
            }
            std::process::ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = snapshot::load(&cli.state)?;
    let json = cli.json;
    tracing::debug!(state = %cli.state.display(), "state loaded");

    // Listings read without writing back; everything else saves the
    // snapshot only after the operation succeeded.
    let mutated = match cli.command {
        Commands::Client { command } => run_client(command, &mut store, json)?,
        Commands::Material { command } => run_material(command, &mut store, json)?,
        Commands::Loan { command } => run_loan(command, &mut store, json)?,
        Commands::Reservation { command } => run_reservation(command, &mut store, json)?,
        Commands::Sanction { command } => run_sanction(command, &mut store, json)?,
    };

    if mutated {
        snapshot::save(&store, &cli.state)?;
    }
    Ok(())
}

fn run_client(
    command: ClientCommands,
    store: &mut MemoryStore,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        ClientCommands::Add {
            id,
            name,
            category,
            detail,
        } => {
            let mut client = Client::new(ClientId(id), name, category.into());
            if let Some(detail) = detail {
                client = client.with_detail(detail);
            }
            catalog::register_client(store, client.clone())?;
            emit(json, &client, format!("client {} registered", client.id))?;
            Ok(true)
        }
        ClientCommands::Rm { id } => {
            catalog::remove_client(store, ClientId(id))?;
            emit(json, &ClientId(id), format!("client {id} removed"))?;
            Ok(true)
        }
        ClientCommands::List { vetoed } => {
            let clients = if vetoed {
                catalog::vetoed_clients(store)
            } else {
                store.clients()
            };
            let plain = clients
                .iter()
                .map(|c| {
                    format!(
                        "{}  {}  {}{}",
                        c.id,
                        c.name,
                        c.category,
                        if c.vetoed { "  [vetoed]" } else { "" }
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            emit(json, &clients, plain)?;
            Ok(false)
        }
    }
}

fn run_material(
    command: MaterialCommands,
    store: &mut MemoryStore,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        MaterialCommands::Add {
            id,
            title,
            author,
            category,
        } => {
            let material = Material::new(MaterialId(id), title, author, category);
            catalog::register_material(store, material.clone())?;
            emit(
                json,
                &material,
                format!("material {} registered", material.id),
            )?;
            Ok(true)
        }
        MaterialCommands::Rm { id } => {
            catalog::remove_material(store, MaterialId(id))?;
            emit(json, &MaterialId(id), format!("material {id} removed"))?;
            Ok(true)
        }
        MaterialCommands::List => {
            let materials = store.materials();
            let plain = materials
                .iter()
                .map(|m| format!("{}  {} ({})  [{}]", m.id, m.title, m.author, m.state))
                .collect::<Vec<_>>()
                .join("\n");
            emit(json, &materials, plain)?;
            Ok(false)
        }
    }
}

fn run_loan(
    command: LoanCommands,
    store: &mut MemoryStore,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        LoanCommands::Create {
            client,
            material,
            date,
        } => {
            let loan = circulation::create_loan(
                store,
                ClientId(client),
                MaterialId(material),
                or_today(date),
            )?;
            emit(
                json,
                &loan,
                format!("loan {} created, due {}", loan.id, loan.due_date),
            )?;
            Ok(true)
        }
        LoanCommands::Renew {
            client,
            material,
            date,
        } => {
            let loan = circulation::renew_loan(
                store,
                ClientId(client),
                MaterialId(material),
                or_today(date),
            )?;
            emit(
                json,
                &loan,
                format!("loan {} renewed, now due {}", loan.id, loan.due_date),
            )?;
            Ok(true)
        }
        LoanCommands::Return {
            client,
            material,
            date,
        } => {
            let outcome = circulation::return_material(
                store,
                ClientId(client),
                MaterialId(material),
                or_today(date),
            )?;
            let plain = match &outcome.sanction {
                Some(s) => format!(
                    "returned {} day(s) late; sanction {} of {} issued, client vetoed",
                    outcome.days_late, s.id, s.amount
                ),
                None => "returned on time".to_string(),
            };
            emit(json, &outcome, plain)?;
            Ok(true)
        }
        LoanCommands::List => {
            let loans = store.loans();
            let plain = loans
                .iter()
                .map(|l| {
                    format!(
                        "{}  client {}  material {}  due {}",
                        l.id, l.client, l.material, l.due_date
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            emit(json, &loans, plain)?;
            Ok(false)
        }
    }
}

fn run_reservation(
    command: ReservationCommands,
    store: &mut MemoryStore,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        ReservationCommands::Create {
            client,
            material,
            date,
        } => {
            let r = reservation::create_reservation(
                store,
                ClientId(client),
                MaterialId(material),
                or_today(date),
            )?;
            emit(json, &r, format!("reservation {} created", r.id))?;
            Ok(true)
        }
        ReservationCommands::Cancel { client, material } => {
            reservation::cancel_reservation(store, ClientId(client), MaterialId(material))?;
            emit(
                json,
                &MaterialId(material),
                format!("reservation on material {material} cancelled"),
            )?;
            Ok(true)
        }
        ReservationCommands::List => {
            let reservations = store.reservations();
            let plain = reservations
                .iter()
                .map(|r| {
                    format!(
                        "{}  client {}  material {}  since {}",
                        r.id, r.client, r.material, r.reserved_on
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            emit(json, &reservations, plain)?;
            Ok(false)
        }
    }
}

fn run_sanction(
    command: SanctionCommands,
    store: &mut MemoryStore,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        SanctionCommands::Issue {
            client,
            reason,
            amount,
            date,
        } => {
            let s = sanction::issue_sanction(
                store,
                ClientId(client),
                &reason,
                or_today(date),
                amount,
            )?;
            emit(
                json,
                &s,
                format!("sanction {} issued, client {} vetoed", s.id, s.client),
            )?;
            Ok(true)
        }
        SanctionCommands::Lift { id } => {
            sanction::lift_sanction(store, SanctionId(id))?;
            emit(json, &SanctionId(id), format!("sanction {id} lifted"))?;
            Ok(true)
        }
        SanctionCommands::List { client } => {
            let sanctions = match client {
                Some(id) => store.sanctions_for(ClientId(id)),
                None => store.sanctions(),
            };
            let plain = sanctions
                .iter()
                .map(|s| {
                    format!(
                        "{}  client {}  {}  {}  {}",
                        s.id, s.client, s.issued_on, s.amount, s.reason
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            emit(json, &sanctions, plain)?;
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biblio_core::BiblioError;

    #[test]
    fn failure_envelope_carries_ok_false_and_message() {
        let err = BiblioError::ClientVetoed(ClientId(7));
        let rendered = failure_envelope(&err);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["ok"], serde_json::json!(false));
        assert_eq!(value["error"], serde_json::json!("client 7 is vetoed"));
    }
}
