use std::io::{self, Write};

use clap::{Parser, Subcommand};
use store::{DeckCatalog, MatchLedger, SqliteStore, StoreConfig, DEFAULT_RECENT_LIMIT};
use types::Initiator;
use workflow::{Controller, Prompt, StepOutcome, WorkflowError};

#[derive(Parser, Debug)]
#[command(about = "Record card-game matches and query the results")]
struct Params {
    /// Path to the SQLite database; falls back to DATABASE_URL, then matches.db
    #[arg(long)]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through recording one match
    Record {
        #[arg(long)]
        player_id: String,
        #[arg(long)]
        player_name: String,
    },
    /// List, add, or remove deck archetypes
    Decks {
        #[command(subcommand)]
        action: DeckAction,
    },
    /// Win/loss summary, overall or for one player
    Stats {
        #[arg(long)]
        player_id: Option<String>,
    },
    /// Per-opponent-deck breakdown for one player
    Versus {
        #[arg(long)]
        player_id: String,
    },
    /// Latest records, newest first
    Recent {
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: u32,
    },
    /// How often each opponent deck shows up across all records
    Distribution,
    /// Delete records, for one player or all of them
    Reset {
        #[arg(long)]
        player_id: Option<String>,
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand, Debug)]
enum DeckAction {
    List,
    Add { name: String },
    Remove { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Params::parse();
    log::info!("args: {args:?}");

    let config = StoreConfig::from_cli_or_env(args.database.clone());
    let pool = config.create_pool().await?;
    let store = SqliteStore::new(pool);
    store.init_schema().await?;

    match args.command {
        Command::Record {
            player_id,
            player_name,
        } => {
            run_recording(store, Initiator::new(player_id, player_name)).await?;
        }
        Command::Decks { action } => match action {
            DeckAction::List => {
                let names = store.deck_names().await?;
                if names.is_empty() {
                    println!("No decks registered.");
                }
                for name in names {
                    println!("{name}");
                }
            }
            DeckAction::Add { name } => match store.add_deck(&name).await {
                Ok(()) => println!("Added deck: {}", name.trim()),
                Err(err) => println!("Could not add deck: {err}"),
            },
            DeckAction::Remove { name } => {
                if store.remove_deck(&name).await? {
                    println!("Removed deck: {name}");
                } else {
                    println!("No deck named: {name}");
                }
            }
        },
        Command::Stats { player_id } => {
            let summary = stats::overall(store.results(player_id.as_deref()).await?);
            println!(
                "{} wins / {} losses over {} games ({:.1}%)",
                summary.wins,
                summary.losses,
                summary.total,
                summary.win_rate()
            );
        }
        Command::Versus { player_id } => {
            let breakdown = stats::by_opponent_deck(store.opponent_results(&player_id).await?);
            if breakdown.is_empty() {
                println!("No records for player {player_id}.");
            }
            for (deck, summary) in breakdown {
                println!(
                    "{deck}: {} games, {} wins ({:.1}%)",
                    summary.total,
                    summary.wins,
                    summary.win_rate()
                );
            }
        }
        Command::Recent { limit } => {
            let records = store.recent_records(limit).await?;
            if records.is_empty() {
                println!("No match records yet.");
            }
            for record in records {
                println!(
                    "{} {} {}: {} vs {} ({})",
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    record.player_name,
                    record.result,
                    record.my_deck,
                    record.opponent_deck,
                    record.turn_order
                );
            }
        }
        Command::Distribution => {
            for (deck, count) in stats::deck_distribution(store.opponent_decks().await?) {
                println!("{deck}: {count}");
            }
        }
        Command::Reset { player_id, all } => match (player_id, all) {
            (Some(player_id), false) => {
                let deleted = store.delete_records_for_player(&player_id).await?;
                println!("Deleted {deleted} records for player {player_id}");
            }
            (None, true) => {
                let deleted = store.delete_all_records().await?;
                println!("Deleted all {deleted} match records");
            }
            _ => println!("Pass exactly one of --player-id or --all"),
        },
    }

    Ok(())
}

async fn run_recording(
    store: SqliteStore,
    initiator: Initiator,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = Controller::new(store);
    let (id, mut prompt) = controller.open_session(initiator);

    let mut buf = String::new();
    loop {
        let value = select_option_from_stdin(&mut buf, &prompt)?;
        match controller.handle_choice(id, &value).await {
            Ok(StepOutcome::Prompt(next)) => prompt = next,
            Ok(StepOutcome::Committed(record)) => {
                println!(
                    "Recorded: {} with {} vs {}, going {}",
                    record.result, record.my_deck, record.opponent_deck, record.turn_order
                );
                return Ok(());
            }
            Err(WorkflowError::InvalidChoice { choice }) => {
                log::error!("Invalid choice: {choice}");
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn select_option_from_stdin(buf: &mut String, prompt: &Prompt) -> io::Result<String> {
    println!("{}", prompt.heading);
    for (idx, option) in prompt.options.iter().enumerate() {
        println!("  {}. {}", idx + 1, option.label);
    }
    loop {
        print!(">> ");
        let _ = io::stdout().flush();
        buf.clear();
        io::stdin().read_line(buf)?;
        let input = buf.trim();
        if let Some(option) = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| prompt.options.get(idx))
        {
            return Ok(option.value.clone());
        }
        // The option value typed out works too.
        if let Some(option) = prompt.options.iter().find(|o| o.value == input) {
            return Ok(option.value.clone());
        }
        log::error!("Not an option: {input}");
    }
}
