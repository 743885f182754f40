//! Command-line demo front-end for the context engine.
//!
//! Thin by design: argument parsing and output formatting only, all real
//! work happens in `context-engine`.

use clap::{Parser, Subcommand};
use context_engine::{Engine, Overrides};
use context_engine_params::parse_params;
use context_engine_selector::Selectors;

/// Context engine: assembles task, rule, and skill context for an AI coding agent.
#[derive(Debug, Parser)]
#[command(name = "context-engine", about = "Assembles task context for an AI coding agent")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a task and print its assembled context.
    Run {
        /// Task name to resolve.
        task: String,
        /// Additional search roots (repeatable); local paths or `scheme://` sources.
        #[arg(long = "search-path", value_name = "PATH")]
        search_paths: Vec<String>,
        /// `key=value` parameter, repeatable; comma-separated values also accepted.
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
        /// `key=value` selector, repeatable.
        #[arg(long = "select", value_name = "KEY=VALUE")]
        selectors: Vec<String>,
        /// Override agent identity (e.g. `claude`, `cursor`).
        #[arg(long)]
        agent: Option<String>,
        /// Skip bootstrap scripts and skill discovery.
        #[arg(long, default_value_t = false)]
        no_bootstrap: bool,
        /// Append an ad hoc prompt after the task body.
        #[arg(long)]
        prompt: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            task,
            search_paths,
            params,
            selectors,
            agent,
            no_bootstrap,
            prompt,
        } => run(task, search_paths, params, selectors, agent, no_bootstrap, prompt),
    }
}

fn run(
    task: String,
    search_paths: Vec<String>,
    raw_params: Vec<String>,
    raw_selectors: Vec<String>,
    agent: Option<String>,
    no_bootstrap: bool,
    prompt: Option<String>,
) -> anyhow::Result<()> {
    let mut options = context_engine::resolve_options(Overrides {
        search_paths: (!search_paths.is_empty()).then_some(search_paths),
        agent,
        bootstrap: no_bootstrap.then_some(false),
        resume: None,
    });

    options.params = parse_params(&raw_params.join(","))?;

    let mut selectors = Selectors::new();
    for entry in &raw_selectors {
        selectors.set(entry)?;
    }
    options.selectors = selectors;
    options.user_prompt = prompt;

    let result = Engine::new(options).run(&task)?;

    println!("{}", result.task.content);
    for rule in &result.rules {
        println!("--- rule: {} ---", rule.frontmatter.fields.id);
        println!("{}", rule.content);
    }
    if !result.skills.skills.is_empty() {
        println!("{}", result.skills.to_xml());
    }
    eprintln!("tokens: {}", result.tokens);

    Ok(())
}
