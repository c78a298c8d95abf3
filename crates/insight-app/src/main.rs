use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use insight_app::repl::HELP;
use insight_app::{parse_line, render, ConsoleAlerts, ReplCommand, TextObserver};
use insight_export::DirectorySink;
use insight_session::{SessionCommand, SessionConfig, SessionController, SessionRuntime};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("panel-insight")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Mock panel search with audience insights and strategy proposals")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Session configuration file (TOML)"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Random seed for panel identifiers"),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .global(true)
                .default_value(".")
                .value_parser(value_parser!(PathBuf))
                .help("Directory downloaded reports are written to"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level"),
        )
        .subcommand(
            Command::new("search")
                .about("Run one search and print the results")
                .arg(
                    Arg::new("query")
                        .num_args(0..)
                        .help("Audience description, e.g. \"30대 직장인 100명\""),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the result bundle as JSON"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Search and save the first strategy report as a Word document")
                .arg(
                    Arg::new("query")
                        .num_args(1..)
                        .required(true)
                        .help("Audience description"),
                ),
        )
        .subcommand(Command::new("repl").about("Interactive session"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let config = load_config(&matches)?;
    let out_dir = matches
        .get_one::<PathBuf>("out-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));

    match matches.subcommand() {
        Some(("search", args)) => run_search(config, &query_arg(args), args.get_flag("json")),
        Some(("export", args)) => run_export(config, &query_arg(args), out_dir),
        Some(("repl", _)) => run_repl(config, out_dir).await,
        _ => {
            cli().print_help()?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<SessionConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config = config.with_seed(*seed);
    }
    Ok(config)
}

fn query_arg(args: &ArgMatches) -> String {
    args.get_many::<String>("query")
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn run_search(config: SessionConfig, query: &str, json: bool) -> Result<()> {
    let mut session = SessionController::new(config);
    session.search(query);
    session.settle();

    let results = session.state().results();
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else if results.is_empty() {
        println!("조건에 맞는 패널이 없습니다.");
    } else {
        println!("{}", render::render_bundle(results));
    }
    Ok(())
}

fn run_export(config: SessionConfig, query: &str, out_dir: PathBuf) -> Result<()> {
    let mut session = SessionController::new(config)
        .with_alert_sink(Arc::new(ConsoleAlerts))
        .with_document_sink(Arc::new(DirectorySink::new(out_dir)));
    session.search(query);
    session.settle();

    if session.state().results().strategy_cards.is_empty() {
        bail!("no strategy report matches {query:?}");
    }
    session.open_strategy_card(0)?;
    let path = session.download_report()?;
    println!("{}", path.display());
    Ok(())
}

async fn run_repl(config: SessionConfig, out_dir: PathBuf) -> Result<()> {
    let controller = SessionController::new(config)
        .with_observer(Arc::new(TextObserver))
        .with_alert_sink(Arc::new(ConsoleAlerts))
        .with_document_sink(Arc::new(DirectorySink::new(out_dir)));
    let (tx, rx) = mpsc::channel(32);
    let runtime = tokio::spawn(SessionRuntime::new(controller).run(rx));

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("! {e}");
                continue;
            }
        };

        match command {
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::State => {
                let (reply, state) = oneshot::channel();
                tx.send(SessionCommand::Inspect(reply))
                    .await
                    .context("session stopped")?;
                let state = state.await.context("session stopped")?;
                println!("{}", render::render_state(&state));
            }
            other => {
                for session_command in other.into_session_commands() {
                    tx.send(session_command).await.context("session stopped")?;
                }
            }
        }
    }

    drop(tx);
    let controller = runtime.await.context("session task failed")?;
    tracing::debug!(pending = controller.pending_tasks(), "REPL finished");
    Ok(())
}
