//! Per-run deployment parameters.

/// Substitution values applied to every alert body in a run.
///
/// Built once at process start and passed by reference into the reconciler;
/// core logic never reads the environment itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployParams {
    /// Backing database the alerts read from.
    pub database: String,
    /// Slack channel that alert notifications post to.
    pub slack_channel: String,
    /// Service endpoints substituted into URL declarations.
    pub service_urls: ServiceUrls,
}

/// Endpoint URLs for the three services alert scripts call out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUrls {
    pub ase: String,
    pub ls: String,
    pub mdm: String,
}
