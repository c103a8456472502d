//! Interactive task list backed by a Supabase table.
//!
//! Reads commands from stdin and prints the list after every change. Remote
//! calls run in the background; the prompt never waits for them.

use supatodo::cli::{Command, HELP, ParseError};
use supatodo::{AppConfig, SupabaseTaskRepository, TaskAction, TaskEnvironment, TaskReducer, TaskState, view};
use supatodo_runtime::Store;
use supatodo_supabase::SupabaseClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "supatodo=info,supatodo_runtime=warn";

type AppStore = Store<
    TaskState,
    TaskAction,
    TaskEnvironment<SupabaseTaskRepository>,
    TaskReducer<SupabaseTaskRepository>,
>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env()?;
    let client = SupabaseClient::new(config.supabase.clone())?;
    let repository = SupabaseTaskRepository::new(&client, config.table.clone());
    tracing::info!(rest_url = client.rest_url(), table = repository.table(), "Starting task list");

    let store: AppStore = Store::new(
        TaskState::new(),
        TaskReducer::new(),
        TaskEnvironment::new(repository),
    );

    let renderer = spawn_renderer(&store);
    store.send(TaskAction::Mount).await?;
    println!("{HELP}\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(ParseError::Empty) => continue,
            Err(error) => {
                println!("{error}");
                continue;
            },
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::List => print!("{}", store.state(view::render).await),
            command => match store.state(|s| command.into_actions(s)).await {
                Ok(actions) => {
                    for action in actions {
                        tracing::debug!(action = action.name(), "Dispatching");
                        store.send(action).await?;
                    }
                    print!("{}", store.state(view::render).await);
                },
                Err(error) => println!("{error}"),
            },
        }
    }

    renderer.abort();

    if let Err(error) = store.shutdown(config.shutdown_timeout).await {
        tracing::warn!(%error, "Exiting with remote calls still in flight");
    }

    Ok(())
}

/// Re-renders the list every time a remote call reports back
fn spawn_renderer(store: &AppStore) -> JoinHandle<()> {
    let mut actions = store.subscribe_actions();
    let store = store.clone();

    tokio::spawn(async move {
        loop {
            match actions.recv().await {
                Ok(action) if !action.is_event() => {},
                Ok(action) => {
                    tracing::debug!(event = action.name(), "Remote call finished");
                    print!("{}", store.state(view::render).await);
                },
                Err(RecvError::Lagged(_)) => {
                    print!("{}", store.state(view::render).await);
                },
                Err(RecvError::Closed) => break,
            }
        }
    })
}
