//! Shipments table.
//!
//! Stores booked shipments together with the quote they were priced at.
//! Text columns are unbounded and weight is unscaled: anything booking
//! validation accepts must store unchanged.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(SHIPMENTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS shipments CASCADE;")
            .await?;
        Ok(())
    }
}

const SHIPMENTS_SQL: &str = r"
CREATE TABLE shipments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL,
    vehicle_type TEXT NOT NULL,
    pickup_address TEXT NOT NULL,
    drop_address TEXT NOT NULL,
    commodity TEXT NOT NULL,
    weight NUMERIC NOT NULL,
    special_instructions TEXT NOT NULL DEFAULT '',
    pickup_contact_name TEXT NOT NULL,
    pickup_contact_number TEXT NOT NULL,
    drop_contact_name TEXT NOT NULL,
    drop_contact_number TEXT NOT NULL,
    add_ons JSONB NOT NULL DEFAULT '[]'::jsonb,
    pickup_date DATE,
    drop_date DATE,
    pickup_time TEXT,
    drop_time TEXT,
    truck_option TEXT,
    distance_meters BIGINT NOT NULL,
    duration_seconds BIGINT NOT NULL,
    base_cost BIGINT NOT NULL,
    add_on_cost BIGINT NOT NULL,
    total_cost BIGINT NOT NULL,
    cost_breakdown JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_shipments_weight_positive CHECK (weight > 0),
    CONSTRAINT chk_shipments_costs CHECK (base_cost >= 0 AND add_on_cost >= 0 AND total_cost >= 0)
);

-- Listing is newest first
CREATE INDEX idx_shipments_created ON shipments(created_at DESC);

-- A user's own bookings
CREATE INDEX idx_shipments_user ON shipments(user_id, created_at DESC);
";
