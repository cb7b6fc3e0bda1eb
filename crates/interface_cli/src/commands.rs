//! Command-line arguments and command execution

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use core_kernel::{BillId, ParticipantId, MAX_DISPLAY_DECIMALS};
use domain_ledger::bill::equal_split;
use domain_ledger::{BillEntries, BillEntry, Ledger};
use domain_settlement::{BalanceCalculator, SettlementPlanner};
use infra_store::{read_book, LedgerStore};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::render;

/// Record shared bills and plan who pays whom
#[derive(Debug, Parser)]
#[command(name = "settle", version)]
#[command(about = "Record shared bills and plan who pays whom", long_about = None)]
pub struct Cli {
    /// Ledger document (JSON) to work on
    #[arg(long, global = true, value_name = "JSON", conflicts_with = "book")]
    pub state: Option<PathBuf>,

    /// Bill book (CSV, `|` quoted) to read
    #[arg(long, global = true, value_name = "CSV")]
    pub book: Option<PathBuf>,

    /// Directory relative paths and workspaces resolve against
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Decimal places shown for amounts
    #[arg(long, global = true)]
    pub precision: Option<u32>,

    /// Balance magnitude below which a participant counts as settled
    #[arg(long, global = true)]
    pub tolerance: Option<f64>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the transfers that settle every balance
    Flow,

    /// Print what each participant is owed (positive) or owes (negative)
    Balance,

    /// Print the payment table of all bills
    Bills,

    /// Create an empty ledger and save it
    New {
        /// Project name, also the file name of the document
        #[arg(long)]
        name: String,
        /// Directory the document is saved in
        #[arg(long, default_value = ".")]
        workspace: String,
        /// Participant, repeat for each one
        #[arg(long = "user", value_name = "NAME", required = true)]
        users: Vec<ParticipantId>,
    },

    /// Append a bill to the ledger and save it
    ///
    /// Shares are split equally unless percentages are given.
    AddBill {
        /// Bill id
        #[arg(long)]
        id: BillId,
        /// Amount a participant paid, repeat for each payer
        #[arg(long = "payment", value_name = "NAME=AMOUNT")]
        payments: Vec<Assignment>,
        /// Share of a participant in percent, repeat for each participant
        #[arg(long = "percent", value_name = "NAME=PERCENT")]
        percents: Vec<Assignment>,
    },

    /// Convert the bill book given with --book into a ledger document
    Import,
}

/// A `NAME=NUMBER` pair given on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub participant: ParticipantId,
    pub value: f64,
}

impl FromStr for Assignment {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CliError::InvalidAssignment(s.to_string());
        let (name, value) = s.split_once('=').ok_or_else(invalid)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid());
        }
        let value = value.trim().parse::<f64>().map_err(|_| invalid())?;

        Ok(Self {
            participant: ParticipantId::new(name),
            value,
        })
    }
}

/// Effective settings after applying command-line overrides to the config
#[derive(Debug, Clone)]
struct Settings {
    precision: u32,
    tolerance: f64,
    store: LedgerStore,
}

impl Settings {
    fn new(cli: &Cli, config: &CliConfig) -> Self {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.workspace));
        Self {
            precision: cli
                .precision
                .unwrap_or(config.display_precision)
                .min(MAX_DISPLAY_DECIMALS),
            tolerance: cli.tolerance.unwrap_or(config.tolerance),
            store: LedgerStore::new(root),
        }
    }
}

/// Runs the parsed command, writing its output to `out`
pub fn run(cli: Cli, config: &CliConfig, out: &mut impl Write) -> Result<(), CliError> {
    let settings = Settings::new(&cli, config);
    debug!(command = ?cli.command, precision = settings.precision, "Running command");

    match &cli.command {
        Command::Flow => {
            let ledger = load_ledger(&cli, &settings)?;
            let balances = BalanceCalculator.calculate_balance(&ledger);
            let flow = SettlementPlanner::new()
                .with_tolerance(settings.tolerance)
                .calculate_flow(&balances)?;

            if cli.json {
                writeln!(out, "{}", render::flow_json(&flow)?)?;
            } else {
                write!(out, "{}", render::render_flow(&flow, settings.precision))?;
            }
        }
        Command::Balance => {
            let ledger = load_ledger(&cli, &settings)?;
            let balances = BalanceCalculator.calculate_balance(&ledger);

            if cli.json {
                writeln!(out, "{}", render::balances_json(&balances)?)?;
            } else {
                write!(out, "{}", render::render_balances(&balances, settings.precision))?;
            }
        }
        Command::Bills => {
            let ledger = load_ledger(&cli, &settings)?;
            write!(out, "{}", render::render_bills(&ledger))?;
        }
        Command::New { name, workspace, users } => {
            let ledger = Ledger::empty(name.clone(), workspace.clone(), users.clone())?;
            save(&settings, &ledger, out)?;
        }
        Command::AddBill { id, payments, percents } => {
            let ledger = load_ledger(&cli, &settings)?;
            let entries = bill_entries(ledger.participants(), payments, percents)?;
            let ledger = ledger.add_bill(id.clone(), entries)?;
            save(&settings, &ledger, out)?;
        }
        Command::Import => {
            let book = cli.book.as_ref().ok_or(CliError::BookRequired)?;
            let ledger = read_book(book)?;
            save(&settings, &ledger, out)?;
        }
    }

    Ok(())
}

/// Builds the entries of a new bill from command-line assignments
///
/// Participants without a payment paid nothing. Without percentages every
/// participant gets an equal share; with percentages, unlisted participants
/// get a share of zero.
pub fn bill_entries(
    participants: &[ParticipantId],
    payments: &[Assignment],
    percents: &[Assignment],
) -> Result<BillEntries, CliError> {
    let payments = index(participants, payments)?;
    let percents = index(participants, percents)?;
    let payment_of = |p: &ParticipantId| payments.get(p).copied().unwrap_or(0.0);

    if percents.is_empty() {
        return Ok(equal_split(
            participants.iter().map(|p| (p.clone(), payment_of(p))),
        ));
    }

    Ok(participants
        .iter()
        .map(|p| {
            let percent = percents.get(p).copied().unwrap_or(0.0);
            (p.clone(), BillEntry::from_percentage(payment_of(p), percent))
        })
        .collect())
}

fn index(
    participants: &[ParticipantId],
    assignments: &[Assignment],
) -> Result<HashMap<ParticipantId, f64>, CliError> {
    let mut indexed = HashMap::with_capacity(assignments.len());
    for assignment in assignments {
        if !participants.contains(&assignment.participant) {
            return Err(CliError::UnknownParticipant(assignment.participant.clone()));
        }
        if indexed
            .insert(assignment.participant.clone(), assignment.value)
            .is_some()
        {
            return Err(CliError::DuplicateAssignment(assignment.participant.clone()));
        }
    }
    Ok(indexed)
}

fn load_ledger(cli: &Cli, settings: &Settings) -> Result<Ledger, CliError> {
    match (&cli.state, &cli.book) {
        (Some(state), _) => Ok(settings.store.load(state)?),
        (None, Some(book)) => Ok(read_book(settings.store.root().join(book))?),
        (None, None) => Err(CliError::MissingSource),
    }
}

fn save(settings: &Settings, ledger: &Ledger, out: &mut impl Write) -> Result<(), CliError> {
    let path = settings.store.save(ledger)?;
    info!(path = %path.display(), "Ledger written");
    writeln!(out, "Saved {} to {}", ledger.name(), path.display())?;
    Ok(())
}
