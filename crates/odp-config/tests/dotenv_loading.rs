//! `.env` handling in `OdpConfig::load_with_dotenv`.
//!
//! `dotenvy` writes into the real process environment, so these tests live
//! in their own binary and only assert on keys nothing else here reads.

use figment::Jail;
use odp_config::{ConfigError, OdpConfig};

#[test]
fn missing_dotenv_is_not_an_error() {
    Jail::expect_with(|_jail| {
        let config = OdpConfig::load_with_dotenv().expect("config loads without .env");
        assert_eq!(config.retry.max_attempts, 3);
        Ok(())
    });
}

#[test]
fn malformed_dotenv_is_reported() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "this line has no equals sign\n")?;

        let err = OdpConfig::load_with_dotenv().unwrap_err();
        assert!(matches!(err, ConfigError::Dotenv(_)), "{err:?}");
        assert!(err.to_string().starts_with("Failed to load .env"));
        Ok(())
    });
}

#[test]
fn dotenv_values_reach_the_figment_chain() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "TEXT2ODP_SEARCH__DEFAULT_LIMIT=7\n")?;

        let config = OdpConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.search.default_limit, 7);
        Ok(())
    });
}
