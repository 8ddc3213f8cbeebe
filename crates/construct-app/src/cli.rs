use std::path::PathBuf;

use clap::{Parser, Subcommand};
use construct_shared::payments::PaymentMethod;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(
        short = 's',
        long = "stdout",
        action,
        help = "Controls if it logs to stdout/stderr instead of to a file"
    )]
    pub is_to_std_out: bool,

    #[arg(
        long = "mock",
        action,
        help = "Use the built in payment and image records instead of the server"
    )]
    pub use_mock_data: bool,

    #[arg(long, env = "CONSTRUCT_SERVER", help = "Base address of the backend")]
    pub server: Option<String>,

    #[arg(
        long = "no-persist",
        action,
        help = "Keep the session in memory only, nothing is written to disk"
    )]
    pub no_persist: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the token for later commands
    Login {
        username: String,
        /// Read from the terminal when not given
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and log into it
    Register {
        username: String,
        email: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        password2: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show who is logged in
    Status,
    /// Navigate to a path and print what it shows
    Open {
        #[arg(default_value = "/")]
        path: String,
    },
    /// Request a new payment
    InitiatePayment {
        #[arg(long)]
        amount: String,
        #[arg(long, value_parser = parse_method)]
        method: Option<PaymentMethod>,
    },
    /// Upload a site image for analysis
    UploadImage { file: Option<PathBuf> },
}

fn parse_method(value: &str) -> Result<PaymentMethod, String> {
    use strum::IntoEnumIterator as _;
    value.parse().map_err(|_| {
        let options: Vec<String> = PaymentMethod::iter().map(|m| m.to_string()).collect();
        format!("expected one of: {}", options.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn method_names_match_display() {
        assert_eq!(parse_method("Mobile Money"), Ok(PaymentMethod::MobileMoney));
        assert!(parse_method("cash").is_err());
    }
}
