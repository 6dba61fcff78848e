//! # Customer Commands
//!
//! Customer directory maintenance. Invoices keep their own copy of the
//! customer, so editing or deleting a customer never changes an issued
//! invoice.

use geo_core::validation::validate_customer;
use geo_core::Customer;
use geo_db::{Repository, Storage};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::Desk;

/// Customer form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

impl CustomerInput {
    fn into_customer(self, id: String) -> Customer {
        Customer {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }
}

pub async fn list_customers<S: Storage>(desk: &Desk<S>) -> ApiResult<Vec<Customer>> {
    Ok(desk.store().customers().list().await?)
}

pub async fn get_customer<S: Storage>(desk: &Desk<S>, id: &str) -> ApiResult<Customer> {
    desk.store()
        .customers()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer", id))
}

/// Adds a customer under a new id.
pub async fn create_customer<S: Storage>(desk: &Desk<S>, input: CustomerInput) -> ApiResult<Customer> {
    let customer = input.into_customer(Uuid::new_v4().to_string());
    validate_customer(&customer)?;

    desk.store().customers().insert(&customer).await?;
    info!(customer_id = %customer.id, name = %customer.name, "Customer created");
    Ok(customer)
}

pub async fn update_customer<S: Storage>(
    desk: &Desk<S>,
    id: &str,
    input: CustomerInput,
) -> ApiResult<Customer> {
    let customer = input.into_customer(id.to_string());
    validate_customer(&customer)?;

    desk.store().customers().update(&customer).await?;
    info!(customer_id = %customer.id, "Customer updated");
    Ok(customer)
}

pub async fn delete_customer<S: Storage>(desk: &Desk<S>, id: &str) -> ApiResult<()> {
    if !desk.store().customers().delete(id).await? {
        return Err(ApiError::not_found("Customer", id));
    }
    info!(customer_id = %id, "Customer deleted");
    Ok(())
}
