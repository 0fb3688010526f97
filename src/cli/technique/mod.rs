//! `technique` command

use clap::{Args, ValueEnum};

use super::context::CliContext;
use super::parse_key_value;
use crate::domain::{LlmRequest, PromptTechnique};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TechniqueKind {
    ZeroShot,
    FewShot,
    ChainOfThought,
}

#[derive(Args, Debug)]
pub struct TechniqueArgs {
    /// Prompting technique to apply
    #[arg(value_enum)]
    pub technique: TechniqueKind,

    /// Task or question text
    pub prompt: String,

    /// Few-shot example as INPUT=OUTPUT; repeatable
    #[arg(short = 'e', long = "example", value_parser = parse_key_value)]
    pub examples: Vec<(String, String)>,

    /// Print the built prompt without calling Gemini
    #[arg(long)]
    pub dry_run: bool,
}

impl TechniqueArgs {
    pub fn to_technique(&self) -> PromptTechnique {
        match self.technique {
            TechniqueKind::ZeroShot => PromptTechnique::zero_shot(&self.prompt),
            TechniqueKind::FewShot => {
                PromptTechnique::few_shot(&self.prompt, self.examples.clone())
            }
            TechniqueKind::ChainOfThought => PromptTechnique::chain_of_thought(&self.prompt),
        }
    }
}

pub async fn run(ctx: &CliContext, args: TechniqueArgs) -> anyhow::Result<()> {
    let technique = args.to_technique();
    let prompt = technique.build()?;

    println!("[{} Prompt]\n{}", technique.name(), prompt);
    if args.dry_run {
        return Ok(());
    }

    let service = ctx.prompt_service()?;
    let response = service.send(LlmRequest::from_prompt(prompt)).await?;

    println!("\nAI Response:\n{}", response.content().trim());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;

    #[test]
    fn test_parse_few_shot_examples() {
        let cli = Cli::try_parse_from([
            "prompt-library",
            "technique",
            "few-shot",
            "Translate 'How are you?' into French.",
            "-e",
            "Hello=Bonjour",
            "-e",
            "Goodbye=Au revoir",
            "--dry-run",
        ])
        .unwrap();

        let Command::Technique(args) = cli.command else {
            panic!("Expected technique command");
        };
        assert!(args.dry_run);

        let prompt = args.to_technique().build().unwrap();
        assert!(prompt.contains("Bonjour"));
        assert!(prompt.contains("Au revoir"));
        assert!(prompt.ends_with("Translate 'How are you?' into French. ->"));
    }

    #[test]
    fn test_chain_of_thought_from_args() {
        let cli = Cli::try_parse_from([
            "prompt-library",
            "technique",
            "chain-of-thought",
            "What is 12 * 8?",
        ])
        .unwrap();

        let Command::Technique(args) = cli.command else {
            panic!("Expected technique command");
        };
        assert_eq!(args.to_technique().name(), "Chain-of-Thought");
    }
}
