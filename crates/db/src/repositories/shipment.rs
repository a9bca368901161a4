//! Shipment repository for database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryOrder, Set,
};
use serde_json::{Value, json};
use tracing::debug;
use uuid::Uuid;

use crate::entities::shipments;
use freightdesk_core::pricing::{AddOn, CostBreakdown, CostResult};
use freightdesk_core::shipment::{ValidatedPatch, ValidatedShipment};
use freightdesk_shared::types::PageRequest;

/// Input for creating a shipment.
#[derive(Debug, Clone)]
pub struct CreateShipmentInput {
    /// Booking user.
    pub user_id: Uuid,
    /// Vehicle type code.
    pub vehicle_type: String,
    /// Pickup address.
    pub pickup_address: String,
    /// Drop address.
    pub drop_address: String,
    /// Commodity.
    pub commodity: String,
    /// Weight in kilograms.
    pub weight: Decimal,
    /// Handling notes.
    pub special_instructions: String,
    /// Contact at pickup.
    pub pickup_contact_name: String,
    /// Phone at pickup.
    pub pickup_contact_number: String,
    /// Contact at drop.
    pub drop_contact_name: String,
    /// Phone at drop.
    pub drop_contact_number: String,
    /// Add-on codes.
    pub add_ons: Vec<String>,
    /// Pickup date.
    pub pickup_date: Option<NaiveDate>,
    /// Drop date.
    pub drop_date: Option<NaiveDate>,
    /// Pickup time slot.
    pub pickup_time: Option<String>,
    /// Drop time slot.
    pub drop_time: Option<String>,
    /// Truck option label.
    pub truck_option: Option<String>,
    /// Route distance in meters.
    pub distance_meters: u64,
    /// Route duration in seconds.
    pub duration_seconds: u64,
    /// Rounded base cost.
    pub base_cost: i64,
    /// Rounded add-on cost.
    pub add_on_cost: i64,
    /// Rounded total cost.
    pub total_cost: i64,
    /// Rounded per-component costs.
    pub breakdown: CostBreakdown,
}

impl CreateShipmentInput {
    /// Combines a validated booking with the quote it was priced at.
    #[must_use]
    pub fn from_quote(user_id: Uuid, shipment: &ValidatedShipment, quote: &CostResult) -> Self {
        Self {
            user_id,
            vehicle_type: shipment.vehicle_type.code().to_string(),
            pickup_address: shipment.pickup_address.clone(),
            drop_address: shipment.drop_address.clone(),
            commodity: shipment.commodity.clone(),
            weight: shipment.weight_kg,
            special_instructions: shipment.special_instructions.clone(),
            pickup_contact_name: shipment.pickup_contact_name.clone(),
            pickup_contact_number: shipment.pickup_contact_number.clone(),
            drop_contact_name: shipment.drop_contact_name.clone(),
            drop_contact_number: shipment.drop_contact_number.clone(),
            add_ons: add_on_codes(&shipment.add_ons),
            pickup_date: shipment.pickup_date,
            drop_date: shipment.drop_date,
            pickup_time: shipment.pickup_time.clone(),
            drop_time: shipment.drop_time.clone(),
            truck_option: shipment.truck_option.clone(),
            distance_meters: quote.distance.value,
            duration_seconds: quote.duration.value,
            base_cost: quote.base_cost,
            add_on_cost: quote.add_on_costs,
            total_cost: quote.total_cost,
            breakdown: quote.breakdown,
        }
    }
}

/// Shipment repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ShipmentRepository {
    db: DatabaseConnection,
}

impl ShipmentRepository {
    /// Creates a new shipment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a priced shipment.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateShipmentInput) -> Result<shipments::Model, DbErr> {
        let now = chrono::Utc::now().into();

        let shipment = shipments::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(input.user_id),
            vehicle_type: Set(input.vehicle_type),
            pickup_address: Set(input.pickup_address),
            drop_address: Set(input.drop_address),
            commodity: Set(input.commodity),
            weight: Set(input.weight),
            special_instructions: Set(input.special_instructions),
            pickup_contact_name: Set(input.pickup_contact_name),
            pickup_contact_number: Set(input.pickup_contact_number),
            drop_contact_name: Set(input.drop_contact_name),
            drop_contact_number: Set(input.drop_contact_number),
            add_ons: Set(json!(input.add_ons)),
            pickup_date: Set(input.pickup_date),
            drop_date: Set(input.drop_date),
            pickup_time: Set(input.pickup_time),
            drop_time: Set(input.drop_time),
            truck_option: Set(input.truck_option),
            distance_meters: Set(to_i64(input.distance_meters)),
            duration_seconds: Set(to_i64(input.duration_seconds)),
            base_cost: Set(input.base_cost),
            add_on_cost: Set(input.add_on_cost),
            total_cost: Set(input.total_cost),
            cost_breakdown: Set(breakdown_json(&input.breakdown)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = shipment.insert(&self.db).await?;
        debug!(shipment_id = %model.id, total_cost = model.total_cost, "shipment stored");
        Ok(model)
    }

    /// Finds a shipment by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<shipments::Model>, DbErr> {
        shipments::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists shipments newest first, returning the page and the total count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<shipments::Model>, u64), DbErr> {
        let page = page.normalized();
        let paginator = shipments::Entity::find()
            .order_by_desc(shipments::Column::CreatedAt)
            .order_by_desc(shipments::Column::Id)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;
        Ok((items, total))
    }

    /// Applies a partial update. Cost columns are left as priced.
    ///
    /// Returns `None` when the shipment does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        id: Uuid,
        patch: ValidatedPatch,
    ) -> Result<Option<shipments::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(existing));
        }

        let mut model = existing.into_active_model();
        if let Some(vehicle) = patch.vehicle_type {
            model.vehicle_type = Set(vehicle.code().to_string());
        }
        if let Some(v) = patch.pickup_address {
            model.pickup_address = Set(v);
        }
        if let Some(v) = patch.drop_address {
            model.drop_address = Set(v);
        }
        if let Some(v) = patch.commodity {
            model.commodity = Set(v);
        }
        if let Some(v) = patch.weight_kg {
            model.weight = Set(v);
        }
        if let Some(v) = patch.special_instructions {
            model.special_instructions = Set(v);
        }
        if let Some(v) = patch.pickup_contact_name {
            model.pickup_contact_name = Set(v);
        }
        if let Some(v) = patch.pickup_contact_number {
            model.pickup_contact_number = Set(v);
        }
        if let Some(v) = patch.drop_contact_name {
            model.drop_contact_name = Set(v);
        }
        if let Some(v) = patch.drop_contact_number {
            model.drop_contact_number = Set(v);
        }
        if let Some(v) = patch.add_ons {
            model.add_ons = Set(json!(add_on_codes(&v)));
        }
        if let Some(v) = patch.pickup_date {
            model.pickup_date = Set(Some(v));
        }
        if let Some(v) = patch.drop_date {
            model.drop_date = Set(Some(v));
        }
        if let Some(v) = patch.pickup_time {
            model.pickup_time = Set(Some(v));
        }
        if let Some(v) = patch.drop_time {
            model.drop_time = Set(Some(v));
        }
        if let Some(v) = patch.truck_option {
            model.truck_option = Set(Some(v));
        }
        model.updated_at = Set(chrono::Utc::now().into());

        model.update(&self.db).await.map(Some)
    }

    /// Deletes a shipment. Returns `false` when nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = shipments::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

fn add_on_codes(add_ons: &[AddOn]) -> Vec<String> {
    add_ons.iter().map(|a| a.code().to_string()).collect()
}

fn breakdown_json(breakdown: &CostBreakdown) -> Value {
    json!({
        "distanceCost": breakdown.distance_cost,
        "weightCost": breakdown.weight_cost,
        "vehicleTypeCost": breakdown.vehicle_type_cost,
        "addOnsCost": breakdown.add_ons_cost,
    })
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
