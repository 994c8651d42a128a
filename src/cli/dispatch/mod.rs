//! Map parsed CLI arguments to the action to run.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{ARG_DSN, ARG_PORT, auth};
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(5678);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .filter(|v| !v.trim().is_empty())
        .context("missing required argument: --dsn")?;

    let auth_opts = auth::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        dsn,
        jwt_secret: auth_opts.jwt_secret,
        token_ttl_seconds: auth_opts.token_ttl_seconds,
        hasher: auth_opts.hasher,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn builds_server_action() -> Result<()> {
        temp_env::with_vars(
            [
                ("AUTHGATE_PORT", Some("9000")),
                ("AUTHGATE_DSN", Some("postgres://localhost:5432/authgate")),
                ("AUTHGATE_JWT_SECRET", Some("s3cr3t")),
                ("AUTHGATE_TOKEN_TTL_SECONDS", None::<&str>),
            ],
            || {
                let matches = crate::cli::commands::new().try_get_matches_from(vec!["authgate"])?;
                let Action::Server(args) = handler(&matches)?;
                assert_eq!(args.port, 9000);
                assert_eq!(args.dsn, "postgres://localhost:5432/authgate");
                assert_eq!(
                    args.jwt_secret.as_ref().map(|s| s.expose_secret().to_string()),
                    Some("s3cr3t".to_string())
                );
                assert_eq!(args.token_ttl_seconds, session_token::DEFAULT_TTL_SECONDS);
                Ok(())
            },
        )
    }

    #[test]
    fn empty_dsn_is_rejected() {
        temp_env::with_vars([("AUTHGATE_DSN", Some(""))], || {
            let Ok(matches) = crate::cli::commands::new().try_get_matches_from(vec!["authgate"])
            else {
                // clap may already refuse an empty required value
                return;
            };
            let result = handler(&matches);
            assert!(
                result
                    .err()
                    .is_some_and(|e| e.to_string().contains("missing required argument: --dsn"))
            );
        });
    }
}
