use blogi_protocol::AgentKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "blogi")]
#[command(version, about = "Generate blog posts with AI agents")]
pub struct Cli {
    /// Path to blogi.toml (defaults to ./blogi.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one post and save it to the posts directory
    Generate(GenerateArgs),
    /// List the agent prompt directories available
    Agents,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// blog_researcher_ai_agent or blog_artist_ai_agent
    #[arg(long)]
    pub agent_type: AgentKind,

    /// Prompt directory name, e.g. topic_researcher
    #[arg(long)]
    pub agent_name: String,

    /// Research topic (researcher agents)
    #[arg(long)]
    pub topic: Option<String>,

    /// Image prompt (artist agents); a random one is used when omitted
    #[arg(long)]
    pub image_prompt: Option<String>,

    /// Webhook notified when the image is ready (artist agents)
    #[arg(long)]
    pub webhook_url: Option<String>,

    /// Completion model, overrides BLOGI_MODEL and the config file
    #[arg(long)]
    pub model: Option<String>,

    /// Print the result as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
