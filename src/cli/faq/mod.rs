//! `faq` command

use clap::Args;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::context::CliContext;
use crate::infrastructure::services::FaqService;

#[derive(Args, Debug)]
pub struct FaqArgs {
    /// Question to answer; read from stdin when omitted
    pub question: Option<String>,

    /// Print the structured prompt before the answer
    #[arg(long)]
    pub show_prompt: bool,

    /// Print the structured prompt without calling Gemini
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(ctx: &CliContext, args: FaqArgs) -> anyhow::Result<()> {
    let question = match args.question {
        Some(question) => question,
        None => read_question().await?,
    };

    if args.dry_run {
        let library = ctx.prompt_library()?;
        let (kind, prompt) = FaqService::prepare_with(&library, &question)?;
        println!("[{}]\n{}", kind, prompt);
        return Ok(());
    }

    let service = FaqService::new(ctx.prompt_service()?);

    println!("Generating AI response...");
    let answer = service.answer(&question).await?;

    if args.show_prompt {
        println!("\n[{}]\n{}", answer.kind, answer.prompt);
    }
    println!("\nAI Response:\n{}", answer.text);
    Ok(())
}

async fn read_question() -> anyhow::Result<String> {
    let mut stdout = io::stdout();
    stdout.write_all(b"Enter your FAQ question: ").await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(io::stdin()).read_line(&mut line).await?;
    Ok(line)
}
