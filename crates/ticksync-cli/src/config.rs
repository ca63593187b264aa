//! Environment-derived run configuration.
//!
//! Every required setting is resolved here, once, before any remote call is
//! made. Core logic receives explicit structs and never reads the
//! environment itself.

use std::collections::HashMap;
use std::env;

use anyhow::{Result, bail};

use ticksync_core::params::{DeployParams, ServiceUrls};
use ticksync_kapacitor::{Credentials, EngineConfig};

pub const ENGINE_URL_VAR: &str = "KAPACITOR_URL";
pub const DATABASE_VAR: &str = "KAPACITOR_DB";
pub const SLACK_CHANNEL_VAR: &str = "KAPACITOR_SLACK_CHANNEL";
pub const ASE_URL_VAR: &str = "ASE_URL";
pub const LS_URL_VAR: &str = "LS_URL";
pub const MDM_URL_VAR: &str = "MDM_URL";
pub const USER_VAR: &str = "KAPACITOR_USER";
pub const PASSWORD_VAR: &str = "KAPACITOR_PASSWORD";

/// Everything a deploy run needs, resolved up front.
#[derive(Debug)]
pub struct DeployConfig {
    pub engine: EngineConfig,
    /// Backing-store name written into every task payload.
    pub database: String,
    pub params: DeployParams,
}

impl DeployConfig {
    /// Build the full run configuration from the environment.
    ///
    /// All missing variables are reported together in a single error, so an
    /// operator fixes the environment once instead of one variable per run.
    pub fn from_env() -> Result<Self> {
        let mut values = resolve_required(&[
            ENGINE_URL_VAR,
            DATABASE_VAR,
            SLACK_CHANNEL_VAR,
            ASE_URL_VAR,
            LS_URL_VAR,
            MDM_URL_VAR,
            USER_VAR,
            PASSWORD_VAR,
        ])?;
        let mut take = |name| values.remove(name).unwrap_or_default();

        let credentials = Credentials::new(take(USER_VAR), take(PASSWORD_VAR));
        let database = take(DATABASE_VAR);
        Ok(Self {
            engine: EngineConfig::new(take(ENGINE_URL_VAR), credentials),
            params: DeployParams {
                database: database.clone(),
                slack_channel: take(SLACK_CHANNEL_VAR),
                service_urls: ServiceUrls {
                    ase: take(ASE_URL_VAR),
                    ls: take(LS_URL_VAR),
                    mdm: take(MDM_URL_VAR),
                },
            },
            database,
        })
    }
}

/// Build just the template parameters from the environment.
///
/// `render` needs the substitution values but no engine connection, so it
/// should not demand credentials.
pub fn params_from_env() -> Result<DeployParams> {
    let mut values = resolve_required(&[
        DATABASE_VAR,
        SLACK_CHANNEL_VAR,
        ASE_URL_VAR,
        LS_URL_VAR,
        MDM_URL_VAR,
    ])?;
    let mut take = |name| values.remove(name).unwrap_or_default();

    Ok(DeployParams {
        database: take(DATABASE_VAR),
        slack_channel: take(SLACK_CHANNEL_VAR),
        service_urls: ServiceUrls {
            ase: take(ASE_URL_VAR),
            ls: take(LS_URL_VAR),
            mdm: take(MDM_URL_VAR),
        },
    })
}

/// Read every named variable, failing with one error that lists all of the
/// missing names.
fn resolve_required(names: &[&'static str]) -> Result<HashMap<&'static str, String>> {
    let mut values = HashMap::with_capacity(names.len());
    let mut missing = Vec::new();
    for name in names {
        match env::var(name) {
            Ok(value) => {
                values.insert(*name, value);
            }
            Err(_) => missing.push(*name),
        }
    }
    if !missing.is_empty() {
        bail!(
            "missing required environment variables: {}",
            missing.join(", ")
        );
    }
    Ok(values)
}
