//! u-triage CLI - interactive triage sessions and queue benchmarks

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use u_triage::command::{dispatch, Command, Outcome};
use u_triage::triage::{ComparisonKpi, TriageConfig, TriageController, DEFAULT_HISTORY_CAPACITY};
use u_triage::workload;

#[derive(Parser)]
#[command(name = "u-triage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive triage session on stdin
    Session {
        /// Doctor names in rotation order (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        doctors: Vec<String>,
        /// Maximum service history entries kept
        #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
        history: usize,
        /// Remove patient records once served
        #[arg(long)]
        drop_served: bool,
    },
    /// Run a scripted demonstration session
    Demo,
    /// Time FCFS against the priority queue on synthetic loads
    Bench {
        /// Load sizes (comma-separated)
        #[arg(long, value_delimiter = ',')]
        sizes: Vec<usize>,
        /// RNG seed for severities
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command {
        Commands::Session {
            doctors,
            history,
            drop_served,
        } => {
            let config = TriageConfig::new(doctors)
                .with_history_capacity(history)
                .with_retain_served_records(!drop_served);
            run_session(&config)
        }
        Commands::Demo => run_demo(),
        Commands::Bench { sizes, seed } => run_bench(&sizes, seed),
    }
}

fn run_session(config: &TriageConfig) -> Result<()> {
    let mut triage = TriageController::new(config).context("invalid session configuration")?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Doctor rotation: {}", config.doctors.join(" -> "));
    println!("Type 'help' for commands, 'exit' to quit.");

    loop {
        print!("triage> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        match line {
            "" => continue,
            "exit" | "quit" => break,
            "help" => {
                print_help();
                continue;
            }
            _ => {}
        }

        match line.parse::<Command>().and_then(|cmd| dispatch(&mut triage, cmd)) {
            Ok(outcome) => render(&outcome),
            Err(e) => println!("error: {e}"),
        }
    }

    println!("Session closed.");
    Ok(())
}

fn run_demo() -> Result<()> {
    let config = TriageConfig::new(["Grey", "Yang"]).with_history_capacity(3);
    let mut triage = TriageController::new(&config)?;

    let script = [
        "add 101 3 Alice",
        "add 102 5 Bob",
        "add 103 3 Carol",
        "add 104 1 Dave",
        "add 105 6 Eve",
        "compare",
        "update 104 4",
        "serve",
        "serve",
        "inorder",
        "history",
        "status",
    ];

    for line in script {
        println!("triage> {line}");
        match line.parse::<Command>().and_then(|cmd| dispatch(&mut triage, cmd)) {
            Ok(outcome) => render(&outcome),
            Err(e) => println!("error: {e}"),
        }
    }
    Ok(())
}

fn run_bench(sizes: &[usize], seed: u64) -> Result<()> {
    let sizes = if sizes.is_empty() {
        workload::DEFAULT_SIZES.to_vec()
    } else {
        sizes.to_vec()
    };

    println!("Benchmarking FCFS vs Priority Queue (heap)");
    println!("------------------------------------------");
    for row in workload::run_benchmark(&sizes, seed)? {
        println!("Number of patients: {:6}", row.patients);
        println!("  Median severity in dataset: {:.2}", row.median_severity);
        println!("  Baseline FCFS time:         {:.6} seconds", row.fcfs.as_secs_f64());
        println!("  Priority Queue time:        {:.6} seconds", row.priority.as_secs_f64());
        println!();
    }
    Ok(())
}

fn print_help() {
    println!("  add <id> <severity> <name>   admit a patient (severity 1=low .. 5=critical)");
    println!("  update <id> <severity>       change a waiting patient's severity");
    println!("  serve                        serve the most urgent patient");
    println!("  compare                      priority order vs FCFS for waiting patients");
    println!("  history | pop | peek         service history");
    println!("  traverse <in|pre|post>order  list patient records");
    println!("  find <id> | remove <id>      look up or delete a record");
    println!("  status                       summary counts");
}

fn render(outcome: &Outcome) {
    match outcome {
        Outcome::Admitted(p) => println!("Admitted {p} (arrival #{})", p.arrival_seq),
        Outcome::SeverityUpdated {
            id,
            previous,
            current,
        } => println!("Patient {id}: severity {previous} -> {current}"),
        Outcome::Served(s) => println!(
            "Serving {} -> {} (service #{})",
            s.patient, s.doctor, s.sequence
        ),
        Outcome::Comparison(cmp) => {
            if cmp.is_empty() {
                println!("No patients waiting.");
                return;
            }
            println!("FCFS order:");
            for p in &cmp.fcfs {
                println!("  {p}");
            }
            println!("Priority order:");
            for p in &cmp.priority {
                println!("  {p}");
            }
            let kpi = ComparisonKpi::calculate(cmp);
            println!(
                "Moved earlier: {}, moved later: {}",
                kpi.advanced, kpi.delayed
            );
            for row in &kpi.by_severity {
                println!(
                    "  severity {}: {} patient(s), avg slot {:.1} (FCFS {:.1})",
                    row.severity, row.patients, row.priority_avg_position, row.fcfs_avg_position
                );
            }
        }
        Outcome::History(entries) => {
            if entries.is_empty() {
                println!("History is empty.");
            }
            for e in entries {
                println!("  {e}");
            }
        }
        Outcome::HistoryPopped(entry) => match entry {
            Some(e) => println!("Popped: {e}"),
            None => println!("History is empty."),
        },
        Outcome::HistoryTop(entry) => match entry {
            Some(e) => println!("Top: {e}"),
            None => println!("History is empty."),
        },
        Outcome::Records { order, patients } => {
            if patients.is_empty() {
                println!("No records.");
                return;
            }
            println!("Records ({order}):");
            for p in patients {
                println!("  {p} [{:?}]", p.status);
            }
        }
        Outcome::Found(p) => println!("{p} [{:?}]", p.status),
        Outcome::Removed(p) => println!("Removed {p}"),
        Outcome::Status(s) => println!(
            "waiting={} records={} history={}/{} served={} next doctor={}",
            s.waiting, s.records, s.history_len, s.history_capacity, s.served_total, s.next_doctor
        ),
    }
}
