use crate::{
    api,
    auth::{Hasher, HasherConfig, TokenIssuer},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use tracing::info;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub jwt_secret: Option<SecretString>,
    pub token_ttl_seconds: i64,
    pub hasher: HasherConfig,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the configuration is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    // Fail on a malformed DSN before trying to connect.
    Url::parse(&args.dsn).context("Invalid database connection string")?;

    log_startup_args(&args);

    let hasher = Hasher::new(args.hasher).context("Invalid Argon2 configuration")?;
    let issuer = TokenIssuer::new(args.jwt_secret).with_ttl_seconds(args.token_ttl_seconds);

    api::new(args.port, args.dsn, hasher, issuer).await
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("dsn", redact_dsn(&args.dsn)),
        ("jwt_secret_set", args.jwt_secret.is_some().to_string()),
        ("token_ttl_seconds", args.token_ttl_seconds.to_string()),
        ("argon2_memory_kib", args.hasher.memory_kib.to_string()),
        ("argon2_iterations", args.hasher.iterations.to_string()),
        ("argon2_parallelism", args.hasher.parallelism.to_string()),
    ];

    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "{} {} ({})\n\nStartup configuration:",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH)
    );
    for (key, value) in &entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn redact_dsn(dsn: &str) -> String {
    match Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("REDACTED"));
            }
            parsed.to_string()
        }
        Err(_) => "invalid-dsn".to_string(),
    }
}

fn short_commit(hash: &str) -> &str {
    hash.get(0..7).unwrap_or(hash)
}
