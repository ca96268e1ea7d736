//! Read-only aggregation facade in front of the offender-management and
//! personal-relationships upstreams. Resolves a prisoner's contact list and
//! evaluates visit restrictions (bans, closures, arbitrary restriction codes)
//! against caller-supplied date windows.

pub mod config;
pub mod error;
pub mod registry;
pub mod telemetry;
