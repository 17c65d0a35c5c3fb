//! Administration model of the unique identifier service.
//!
//! The console maintains tenants, participants and their types, roles,
//! users and the claims binding users to roles within a tenant. Records
//! live in a [`UidStore`]; a [`Facade`] offers typed access to one kind of
//! record, and [`TenantEditor`] implements the tenant edit dialog with its
//! staged claim assignments.
//!
//! ```rust
//! use uid_scim::uid::{Facade, InMemoryUidStore, PageRequest, Role};
//!
//! # tokio_test::block_on(async {
//! let roles: Facade<Role> = Facade::new(InMemoryUidStore::new());
//! roles
//!     .create(Role { id: "auditor".into(), name: "Auditor".into(), description: None })
//!     .await?;
//! let page = roles.list(&PageRequest::default().contains("name", "aud")).await?;
//! assert_eq!(page.total_results, 1);
//! # Ok::<(), uid_scim::ScimError>(())
//! # }).unwrap();
//! ```

mod editor;
mod facade;
mod model;
mod staging;
mod store;

pub use editor::TenantEditor;
pub use facade::{Facade, FieldFilter, PageRequest, Versioned};
pub use model::{Claim, Participant, ParticipantType, Role, Tenant, User};
pub use staging::{Changes, Staging};
pub use store::{InMemoryUidStore, Replaced, StoredRecord, UidStore};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// A record kind the console administers.
pub trait Entity: Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Namespace of the kind within a store.
    const KIND: &'static str;

    /// Identity of the record within its kind.
    fn key(&self) -> String;

    /// Label shown in lists and selection boxes.
    fn display(&self) -> String;
}
