//! CLI module for the prompt library
//!
//! Each subcommand is a single sequential run: format a prompt, optionally
//! call a remote endpoint, print the result.

pub mod chat;
pub mod context;
pub mod faq;
pub mod prompt;
pub mod search;
pub mod technique;

use clap::{Parser, Subcommand};

use context::CliContext;

/// Prompt Library - prompt templates for Gemini and Pinecone
#[derive(Parser)]
#[command(name = "prompt-library")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List prompt categories and keys
    List,

    /// Print a formatted prompt
    Prompt(prompt::PromptArgs),

    /// Format a prompt and send it to Gemini
    Generate(prompt::PromptArgs),

    /// Answer an FAQ question with a structured prompt
    Faq(faq::FaqArgs),

    /// Build a prompt with a prompting technique and send it
    Technique(technique::TechniqueArgs),

    /// Run a system + human message task
    Chat(chat::ChatArgs),

    /// List Pinecone indexes
    Indexes,

    /// Query the configured Pinecone index
    Search(search::SearchArgs),
}

/// Run one command to completion
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = CliContext::init()?;

    match cli.command {
        Command::List => prompt::list(&ctx),
        Command::Prompt(args) => prompt::render(&ctx, args),
        Command::Generate(args) => prompt::generate(&ctx, args).await,
        Command::Faq(args) => faq::run(&ctx, args).await,
        Command::Technique(args) => technique::run(&ctx, args).await,
        Command::Chat(args) => chat::run(&ctx, args).await,
        Command::Indexes => search::list_indexes(&ctx).await,
        Command::Search(args) => search::run(&ctx, args).await,
    }
}

/// Parse `name=value`, splitting on the first `=`
pub(crate) fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid NAME=VALUE: no `=` found in `{}`", s))?;

    if name.is_empty() {
        return Err(format!("invalid NAME=VALUE: empty name in `{}`", s));
    }

    Ok((name.to_string(), value.to_string()))
}
