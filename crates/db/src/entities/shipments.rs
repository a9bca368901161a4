//! `SeaORM` Entity for shipments table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "shipments")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_type: String,
    pub pickup_address: String,
    pub drop_address: String,
    pub commodity: String,
    pub weight: Decimal,
    pub special_instructions: String,
    pub pickup_contact_name: String,
    pub pickup_contact_number: String,
    pub drop_contact_name: String,
    pub drop_contact_number: String,
    pub add_ons: Json,
    pub pickup_date: Option<Date>,
    pub drop_date: Option<Date>,
    pub pickup_time: Option<String>,
    pub drop_time: Option<String>,
    pub truck_option: Option<String>,
    pub distance_meters: i64,
    pub duration_seconds: i64,
    pub base_cost: i64,
    pub add_on_cost: i64,
    pub total_cost: i64,
    pub cost_breakdown: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
