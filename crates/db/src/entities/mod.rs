//! `SeaORM` entity definitions.

pub mod shipments;

pub mod prelude {
    //! Entity re-exports.
    pub use super::shipments::Entity as Shipments;
}
