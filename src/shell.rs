//! Interactive command shell driving a [`SessionController`].

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

use crate::cli_style::{get_styles, print_banner, print_error, print_success};
use crate::render::render_session;
use crate::search::{RetrievalAlgorithm, SearchResult};
use crate::session::SessionController;

#[derive(Parser)]
#[command(styles=get_styles(), name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
enum InnerCommand {
    /// Searches tracks for the given free-text query.
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Selects the primary retrieval algorithm.
    Algorithm { algorithm: RetrievalAlgorithm },

    /// Selects the algorithm shown in the second comparison panel.
    Algorithm2 { algorithm: RetrievalAlgorithm },

    /// Sets the number of results (5, 10, 20 or 50), shared by both algorithms.
    K { k: usize },

    /// Toggles between single view and comparison mode.
    Compare,

    /// Renders the current results again.
    Show,

    /// Lists the available retrieval algorithms.
    Algorithms,

    /// Prints the current results as JSON.
    Json,

    /// Close this program.
    Exit,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

const PROMPT: &str = "♫ >> ";

fn parse_line(line: &str) -> Option<std::result::Result<InnerCli, clap::Error>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let args =
        shlex::split(line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());
    Some(InnerCli::try_parse_from(
        std::iter::once(" ").chain(args.iter().map(String::as_str)),
    ))
}

fn render(controller: &SessionController) -> CommandExecutionResult {
    let mut stdout = std::io::stdout();
    match render_session(&mut stdout, controller.state()) {
        Ok(()) => CommandExecutionResult::Ok,
        Err(err) => CommandExecutionResult::Error(format!("Failed to render results: {}", err)),
    }
}

fn results_json(controller: &SessionController) -> serde_json::Result<String> {
    let state = controller.state();
    let results: Vec<&SearchResult> = state.result1.iter().chain(state.result2.iter()).collect();
    serde_json::to_string_pretty(&results)
}

async fn execute_command(line: &str, controller: &mut SessionController) -> CommandExecutionResult {
    let cli = match parse_line(line) {
        None => return CommandExecutionResult::Ok,
        Some(Ok(cli)) => cli,
        Some(Err(e)) => {
            if e.print().is_err() {
                println!("{}", e);
            }
            return CommandExecutionResult::Ok;
        }
    };

    match cli.command {
        InnerCommand::Search { query } => {
            controller.submit_search(&query.join(" ")).await;
            render(controller)
        }
        InnerCommand::Algorithm { algorithm } => {
            controller.set_algorithm1(algorithm);
            print_success(&format!("Algorithm 1 set to {}", algorithm.label()));
            render(controller)
        }
        InnerCommand::Algorithm2 { algorithm } => {
            controller.set_algorithm2(algorithm);
            print_success(&format!("Algorithm 2 set to {}", algorithm.label()));
            render(controller)
        }
        InnerCommand::K { k } => match controller.set_k(k) {
            Ok(()) => {
                print_success(&format!("k set to {}", k));
                render(controller)
            }
            Err(err) => CommandExecutionResult::Error(err.to_string()),
        },
        InnerCommand::Compare => {
            controller.toggle_comparison().await;
            render(controller)
        }
        InnerCommand::Show => render(controller),
        InnerCommand::Algorithms => {
            for algorithm in RetrievalAlgorithm::ALL {
                println!("  {:<16} {}", algorithm.as_str(), algorithm.label());
            }
            CommandExecutionResult::Ok
        }
        InnerCommand::Json => match results_json(controller) {
            Ok(json) => {
                println!("{}", json);
                CommandExecutionResult::Ok
            }
            Err(err) => CommandExecutionResult::Error(err.to_string()),
        },
        InnerCommand::Exit => CommandExecutionResult::Exit,
    }
}

#[derive(rustyline_derive::Hinter)]
struct ShellHelper {
    commands_names: Vec<String>,
}

impl ShellHelper {
    fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        ShellHelper { commands_names }
    }
}

impl Completer for ShellHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .cloned()
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for ShellHelper {}
impl Validator for ShellHelper {}
impl Helper for ShellHelper {}

/// Reads commands until `exit`, CTRL-C or CTRL-D.
pub async fn run_shell(mut controller: SessionController) -> Result<()> {
    print_banner();
    InnerCli::command().print_long_help()?;

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();
    let mut rl = Editor::<ShellHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(ShellHelper::new()));

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                match execute_command(&line, &mut controller).await {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => print_error(&err),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                print_error(&format!("{:?}", e));
                break;
            }
        }
    }
    Ok(())
}
