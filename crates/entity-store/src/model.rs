//! Persisted entity shapes.
//!
//! Field names serialize in camelCase to match the JSON the management
//! client exchanges. Missing text fields deserialize as empty strings, and
//! form-style values (blank strings, numbers sent as text) are accepted
//! through the [`lenient`] helpers.

use chrono::NaiveDate;
use common::RecordId;
use serde::{Deserialize, Serialize};

use crate::lenient;

/// A row type stored by a repository.
///
/// The identifier is absent until the store assigns one on first save.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Name of the table holding this entity.
    const TABLE: &'static str;

    /// Returns the identifier, if the entity has been persisted.
    fn id(&self) -> Option<RecordId>;

    /// Sets the identifier.
    fn set_id(&mut self, id: RecordId);

    /// Removes the identifier so the next save inserts a new row.
    fn clear_id(&mut self);
}

macro_rules! impl_entity {
    ($ty:ty, $table:literal) => {
        impl Entity for $ty {
            const TABLE: &'static str = $table;

            fn id(&self) -> Option<RecordId> {
                self.id
            }

            fn set_id(&mut self, id: RecordId) {
                self.id = Some(id);
            }

            fn clear_id(&mut self) {
                self.id = None;
            }
        }
    };
}

/// A company that goods are ordered from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Supplier {
    #[serde(deserialize_with = "lenient::record_id")]
    pub id: Option<RecordId>,
    pub company_name: String,
    pub company_contact_no: String,
    pub company_address: String,
    pub contact_person_first_name: String,
    pub contact_person_last_name: String,
    pub contact_person_phone: String,
    pub email: String,
}

impl Supplier {
    /// Creates an unsaved supplier with only a company name.
    pub fn named(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            ..Default::default()
        }
    }

    /// Fields matched by free-text supplier search.
    pub fn search_fields(&self) -> [&str; 6] {
        [
            self.company_name.as_str(),
            self.contact_person_first_name.as_str(),
            self.contact_person_last_name.as_str(),
            self.company_contact_no.as_str(),
            self.contact_person_phone.as_str(),
            self.email.as_str(),
        ]
    }
}

impl_entity!(Supplier, "suppliers");

/// Stored form of a supplier order.
///
/// Holds only the supplier's key; resolving it to a full [`Supplier`] is
/// the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierOrderRecord {
    pub id: Option<RecordId>,
    pub supplier_id: RecordId,
    /// Serialized line items, stored verbatim.
    pub items: String,
    pub total: Option<f64>,
}

impl SupplierOrderRecord {
    /// Creates an unsaved order record for a supplier.
    pub fn new(supplier_id: RecordId, items: impl Into<String>, total: Option<f64>) -> Self {
        Self {
            id: None,
            supplier_id,
            items: items.into(),
            total,
        }
    }
}

impl_entity!(SupplierOrderRecord, "supplier_orders");

/// A registered customer of the shop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    #[serde(deserialize_with = "lenient::record_id")]
    pub id: Option<RecordId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    #[serde(deserialize_with = "lenient::optional_date")]
    pub registration_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::optional_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::integer")]
    pub loyalty_points: i32,
}

impl_entity!(Customer, "customers");

/// An item of stock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    #[serde(deserialize_with = "lenient::record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub category: String,
    #[serde(deserialize_with = "lenient::number")]
    pub price: f64,
    #[serde(deserialize_with = "lenient::integer")]
    pub quantity: i32,
    /// Supplier name as entered by staff; not a foreign key.
    #[serde(deserialize_with = "lenient::text")]
    pub supplier: String,
    pub image_url: String,
}

impl_entity!(Product, "products");

/// A member of staff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    #[serde(deserialize_with = "lenient::record_id")]
    pub id: Option<RecordId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub role: String,
    pub nic_number: String,
    #[serde(deserialize_with = "lenient::optional_date")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::optional_date")]
    pub hire_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::number")]
    pub salary: f64,
    pub address: String,
}

impl Employee {
    /// Fields matched by free-text employee search.
    pub fn search_fields(&self) -> [&str; 6] {
        [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.position.as_str(),
            self.department.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
        ]
    }
}

impl_entity!(Employee, "employees");
