//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "authflow", version, about = "Log in or sign up against an auth backend")]
pub struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, short, default_value = "./config.yaml")]
    pub config: PathBuf,

    /// Print the JSON schema of the configuration and exit.
    #[arg(long)]
    pub schema: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Log in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "AUTHFLOW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account, optionally with a profile image.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "AUTHFLOW_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        profile_image: Option<PathBuf>,
    },
    /// Forget the stored session token.
    Logout,
}
