//! `list`, `prompt`, and `generate` commands

use std::collections::HashMap;

use clap::Args;

use super::context::CliContext;
use super::parse_key_value;
use crate::domain::{LlmRequest, PromptLibrary};

#[derive(Args, Debug)]
pub struct PromptArgs {
    /// Prompt category (e.g. similarity_search)
    pub category: String,

    /// Prompt key within the category (e.g. query)
    pub key: String,

    /// Template parameter as NAME=VALUE; repeatable
    #[arg(short = 'p', long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,
}

impl PromptArgs {
    /// Later occurrences of a name win
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params.iter().cloned().collect()
    }
}

pub fn list(ctx: &CliContext) -> anyhow::Result<()> {
    let library = ctx.prompt_library()?;
    print!("{}", format_listing(&library)?);
    Ok(())
}

pub fn render(ctx: &CliContext, args: PromptArgs) -> anyhow::Result<()> {
    let library = ctx.prompt_library()?;
    let prompt = library.get_prompt(&args.category, &args.key, &args.params_map())?;

    println!("{}", prompt);
    Ok(())
}

pub async fn generate(ctx: &CliContext, args: PromptArgs) -> anyhow::Result<()> {
    let service = ctx.prompt_service()?;
    let params = args.params_map();

    let prompt = service.render(&args.category, &args.key, &params)?;
    println!("Prompt:\n{}\n", prompt);

    let response = service.send(LlmRequest::from_prompt(prompt)).await?;
    if let Some(usage) = &response.usage {
        tracing::debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "Generation usage"
        );
    }

    println!("AI Response:\n{}", response.content().trim());
    Ok(())
}

fn format_listing(library: &PromptLibrary) -> anyhow::Result<String> {
    let mut out = String::new();

    for category in library.categories() {
        out.push_str(category);
        out.push('\n');

        for key in library.keys(category)? {
            let params = library.required_parameters(category, key)?;
            if params.is_empty() {
                out.push_str(&format!("  {}\n", key));
            } else {
                out.push_str(&format!("  {} ({})\n", key, params.join(", ")));
            }
        }
    }

    Ok(out)
}
