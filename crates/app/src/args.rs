use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "micro-parcours")]
#[command(version)]
#[command(about = "Generate and follow short daily micro-courses")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (generation endpoint and course documents)
    Serve {
        #[arg(long, env = "COURSE_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,

        #[arg(long, env = "COURSE_DIR", default_value = "courses")]
        courses_dir: PathBuf,
    },

    /// Pick a topic, then generate a course for it
    Select {
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Generate and display a course for a topic id
    Generate {
        /// Topic id, e.g. `html`
        slug: Option<String>,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// Follow a pre-built course and record progress
    Course {
        slug: String,

        #[command(flatten)]
        client: ClientArgs,

        #[command(flatten)]
        progress: ProgressArgs,

        /// Read course documents from this directory instead of the server
        #[arg(long)]
        courses_dir: Option<PathBuf>,
    },

    /// Open an application path such as `/parcours/new?slug=html`
    Open {
        path: String,

        #[command(flatten)]
        client: ClientArgs,

        #[command(flatten)]
        progress: ProgressArgs,
    },
}

#[derive(Args, Clone)]
pub struct ClientArgs {
    /// Base URL of a running `serve` instance
    #[arg(long, env = "COURSE_SERVER", default_value = "http://127.0.0.1:3000")]
    pub server: String,
}

#[derive(Args, Clone)]
pub struct ProgressArgs {
    /// SQLite database holding course progress
    #[arg(long = "db", env = "COURSE_DB_URL", default_value = "sqlite://progress.sqlite3")]
    pub db_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_slug_is_optional() {
        let cli = Cli::try_parse_from(["micro-parcours", "generate"]).unwrap();
        assert!(matches!(cli.command, Command::Generate { slug: None, .. }));

        let cli = Cli::try_parse_from(["micro-parcours", "generate", "html", "--server", "http://x"])
            .unwrap();
        match cli.command {
            Command::Generate { slug, client } => {
                assert_eq!(slug.as_deref(), Some("html"));
                assert_eq!(client.server, "http://x");
            }
            _ => panic!("expected generate"),
        }
    }
}
