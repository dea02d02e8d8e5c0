//! Process-wide default center.
//!
//! Created on first use from [`CenterConfig::from_env`] and never dropped.
//! Call `default_center().teardown()` at shutdown to get the leak report.

use crate::center::NotificationCenter;
use crate::config::CenterConfig;
use lazy_static::lazy_static;

lazy_static! {
    static ref DEFAULT_CENTER: NotificationCenter =
        NotificationCenter::with_config(CenterConfig::from_env()).unwrap_or_default();
}

/// The shared center for components that have no center handed to them.
#[must_use]
pub fn default_center() -> &'static NotificationCenter {
    &DEFAULT_CENTER
}
