//! Host environment collaborators: application version and wall clock

use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// Best-effort lookup of the running application's version
pub trait VersionSource {
    /// The version string, or `None` if it cannot be determined
    fn app_version(&self) -> Option<String>;
}

/// Reports this crate's own package version
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageVersion;

impl VersionSource for PackageVersion {
    fn app_version(&self) -> Option<String> {
        let version = env!("CARGO_PKG_VERSION");
        (!version.is_empty()).then(|| version.to_string())
    }
}

/// Reports a fixed version, or none at all
#[derive(Debug, Clone, Default)]
pub struct StaticVersion(pub Option<String>);

impl StaticVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(Some(version.into()))
    }

    /// A source whose lookup always fails
    pub fn unavailable() -> Self {
        Self(None)
    }
}

impl VersionSource for StaticVersion {
    fn app_version(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Source of the current time
pub trait Clock {
    fn now_utc(&self) -> DateTime<Utc>;

    /// Wall-clock time in the local timezone, used for file names
    fn now_local(&self) -> NaiveDateTime;
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant, reported identically in UTC and local time
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0.and_utc()
    }

    fn now_local(&self) -> NaiveDateTime {
        self.0
    }
}
