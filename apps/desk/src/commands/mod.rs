//! # Desk Commands
//!
//! The operations a UI shell calls. Every command borrows the [`Desk`] and
//! returns `Result<T, ApiError>` with a serializable `T`.
//!
//! ## Command Modules
//! - [`invoice`] - Draft, create, edit, delete, print, download
//! - [`customer`] - Customer directory CRUD
//! - [`product`] - Catalog CRUD with unique SKUs
//! - [`payment`] - Payment records
//! - [`report`] - Dashboard summary
//! - [`config`] - Settings views
//!
//! [`Desk`]: crate::state::Desk

pub mod config;
pub mod customer;
pub mod invoice;
pub mod payment;
pub mod product;
pub mod report;
