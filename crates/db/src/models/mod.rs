//! Entity descriptors, column enums and typed DTOs.
//!
//! Each submodule contains:
//! - A zero-sized [`Entity`](crate::entity::Entity) descriptor for the table
//! - The table's column enum
//! - Typed input/output structs for entity-specific queries

pub mod category;
pub mod contact;
pub mod page_view;
pub mod project;
pub mod skill;
pub mod technology;
pub mod user;
