//! Log in to Salesforce with credentials from the environment.
//!
//! Prints the instance host on success. The session token is only printed
//! with `--print-token`.
//!
//! ```sh
//! export SF_USERNAME='user@example.com'
//! export SF_PASSWORD='...'
//! export SF_SECURITY_TOKEN='...'
//! RUST_LOG=busbar_sf_auth=debug cargo run --bin sf-login
//! ```

use busbar_sf_login::{authenticate, LoginConfig, LoginCredentials};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: sf-login [--print-token]";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut print_token = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--print-token" => print_token = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return;
            }
            other => {
                eprintln!("Error: unexpected argument {other:?}");
                eprintln!("{USAGE}");
                std::process::exit(2);
            }
        }
    }

    let creds = LoginCredentials::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let session = authenticate(&creds, &LoginConfig::default())
        .await
        .unwrap_or_else(|e| {
            match e.failure() {
                Some(failure) => eprintln!("Error: login failed: {failure}"),
                None => eprintln!("Error: {e}"),
            }
            if let Some(url) = e.advisory() {
                eprintln!("  Approve the connected app first: {url}");
            }
            std::process::exit(1);
        });

    println!("{}", session.instance_host());
    if print_token {
        println!("{}", session.token());
    }
}
