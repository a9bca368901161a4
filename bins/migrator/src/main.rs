//! Database migration runner for Freightdesk.
//!
//! Usage:
//!   migrator up      - Apply pending migrations (creates the shipments table)
//!   migrator down    - Roll back the last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! Reads `DATABASE_URL` (a `.env` file is honoured).

use freightdesk_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI installs its own tracing subscriber
    cli::run_cli(Migrator).await;
}
