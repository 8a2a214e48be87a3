//! Environment-driven configuration for the task suite.

use std::env;
use tracing::warn;

use crate::record::domain::RecordQuery;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_MONITOR_CAPACITY: usize = 200;
const DEFAULT_RECORD_ACTIVITY: bool = true;

/// Field stamped on every record of a tenant-scoped suite.
pub const TENANT_FIELD: &str = "tenant_id";

/// Runtime configuration of a task suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Log level applied to this crate's events (`TASKDECK_LOG`).
    pub log_level: String,
    /// Tenant whose records the suite reads and writes (`TASKDECK_TENANT`).
    pub tenant: Option<String>,
    /// Number of store requests kept by the request monitor
    /// (`TASKDECK_REQUEST_MONITOR_CAPACITY`).
    pub request_monitor_capacity: usize,
    /// Whether mutations write activity log entries
    /// (`TASKDECK_RECORD_ACTIVITY`).
    pub record_activity: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
            tenant: None,
            request_monitor_capacity: DEFAULT_REQUEST_MONITOR_CAPACITY,
            record_activity: DEFAULT_RECORD_ACTIVITY,
        }
    }
}

impl SuiteConfig {
    /// Reads the configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|name| env::var(name).ok())
    }

    /// Reads the configuration through `get_env`, falling back to defaults
    /// for missing or invalid values.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_level = get_env("TASKDECK_LOG")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.log_level);
        let tenant = get_env("TASKDECK_TENANT")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        let request_monitor_capacity = normalize_capacity(
            read_env_usize(
                "TASKDECK_REQUEST_MONITOR_CAPACITY",
                defaults.request_monitor_capacity,
                &get_env,
            ),
            "TASKDECK_REQUEST_MONITOR_CAPACITY",
        );
        let record_activity = read_env_bool(
            "TASKDECK_RECORD_ACTIVITY",
            defaults.record_activity,
            &get_env,
        );

        Self {
            log_level,
            tenant,
            request_monitor_capacity,
            record_activity,
        }
    }

    /// Returns the listing scope implied by the tenant setting.
    #[must_use]
    pub fn scope_query(&self) -> RecordQuery {
        match &self.tenant {
            Some(tenant) => RecordQuery::all().eq(TENANT_FIELD, tenant.as_str()),
            None => RecordQuery::all(),
        }
    }
}

fn read_env_usize<F>(name: &str, default: usize, get_env: &F) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    match get_env(name) {
        Some(value) => match value.trim().parse::<usize>() {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("Invalid {name}='{value}': {err}. Using default {default}.");
                default
            }
        },
        None => default,
    }
}

fn read_env_bool<F>(name: &str, default: bool, get_env: &F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match get_env(name) {
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                warn!("Invalid {name}='{value}'. Using default {default}.");
                default
            }
        },
        None => default,
    }
}

fn normalize_capacity(value: usize, name: &str) -> usize {
    if value == 0 {
        warn!("{name} set to 0. Using minimum value 1.");
        1
    } else {
        value
    }
}
