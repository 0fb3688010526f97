//! `chat` command

use clap::{Args, ValueEnum};

use super::context::CliContext;
use crate::domain::StructuredTask;

const SUMMARIZE_SYSTEM: &str = "Provide a brief summary of the following passage:";
const QA_SYSTEM: &str = "Extract the correct answer from the given passage.";

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatTask {
    Summarize,
    Qa,
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Task to run
    #[arg(value_enum)]
    pub task: ChatTask,

    /// Human message: the passage to summarize or the question to answer
    #[arg(short, long)]
    pub message: String,

    /// Passage the answer is extracted from (qa only)
    #[arg(short, long)]
    pub context: Option<String>,

    /// Override the task's system message
    #[arg(short, long)]
    pub system: Option<String>,

    /// Print the messages without calling Gemini
    #[arg(long)]
    pub dry_run: bool,
}

impl ChatArgs {
    pub fn to_task(&self) -> StructuredTask {
        match self.task {
            ChatTask::Summarize => StructuredTask::summarization(
                self.system.as_deref().unwrap_or(SUMMARIZE_SYSTEM),
                &self.message,
            ),
            ChatTask::Qa => StructuredTask::question_answering(
                self.system.as_deref().unwrap_or(QA_SYSTEM),
                &self.message,
                self.context.clone(),
            ),
        }
    }
}

pub async fn run(ctx: &CliContext, args: ChatArgs) -> anyhow::Result<()> {
    let task = args.to_task();
    let request = task.to_request()?;

    println!("[System]: {}", task.system_message());
    if args.dry_run {
        println!("[Human]: {}", task.human_message()?);
        return Ok(());
    }

    let service = ctx.prompt_service()?;
    let response = service.send(request).await?;

    println!("[AI]: {}", response.content().trim());
    Ok(())
}
