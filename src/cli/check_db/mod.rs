//! Check-db command - checks both store strategies once

use tracing::info;

use crate::api::state::AppState;
use crate::api::health::DatabaseStatus;

/// Connectivity of both strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionReport {
    pub mapped: DatabaseStatus,
    pub raw: DatabaseStatus,
}

impl ConnectionReport {
    pub fn all_connected(&self) -> bool {
        self.mapped == DatabaseStatus::Connected && self.raw == DatabaseStatus::Connected
    }
}

pub async fn check_stores(state: &AppState) -> ConnectionReport {
    let (mapped, raw) = tokio::join!(
        state.users.check_connection(),
        state.raw_users.check_connection()
    );

    ConnectionReport {
        mapped: mapped.into(),
        raw: raw.into(),
    }
}

/// Print the report and fail when either strategy is unreachable
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let context = crate::create_app_state(&config).await?;

    let report = check_stores(&context.state).await;
    info!(mapped = ?report.mapped, raw = ?report.raw, "database connectivity");
    println!("mapped store: {:?}", report.mapped);
    println!("raw store:    {:?}", report.raw);

    if let Some(database) = context.database {
        database.close().await;
    }

    if !report.all_connected() {
        anyhow::bail!("database is not reachable");
    }

    Ok(())
}
