use anyhow::Context;
use odp_config::OdpConfig;

/// Load `.env`, then the layered config.
pub fn load_config() -> anyhow::Result<OdpConfig> {
    OdpConfig::load_with_dotenv().context("failed to load text2odp configuration")
}
