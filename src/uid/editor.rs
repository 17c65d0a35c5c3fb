//! Editing of a single tenant and its claims.

use super::facade::Facade;
use super::model::{Claim, Tenant};
use super::staging::Staging;
use super::store::UidStore;
use crate::error::{ScimError, ScimResult};
use crate::resource::EntityTag;

/// Binds the selected tenant to a staging list of its claims.
///
/// The admin actions `create`, `save`, `delete` and `refresh` map onto
/// the methods of the same name.
pub struct TenantEditor<S: UidStore> {
    facade: Facade<Tenant, S>,
    selected: Option<Tenant>,
    original: Option<Tenant>,
    version: Option<EntityTag>,
    claims: Staging<Claim>,
}

impl<S: UidStore> TenantEditor<S> {
    pub fn new(facade: Facade<Tenant, S>) -> Self {
        Self {
            facade,
            selected: None,
            original: None,
            version: None,
            claims: Staging::default(),
        }
    }

    pub fn tenant(&self) -> Option<&Tenant> {
        self.selected.as_ref()
    }

    pub fn tenant_mut(&mut self) -> Option<&mut Tenant> {
        self.selected.as_mut()
    }

    pub fn claims(&self) -> &Staging<Claim> {
        &self.claims
    }

    pub fn claims_mut(&mut self) -> &mut Staging<Claim> {
        &mut self.claims
    }

    pub fn version(&self) -> Option<&EntityTag> {
        self.version.as_ref()
    }

    /// Whether the tenant has never been saved.
    pub fn is_new(&self) -> bool {
        self.selected.is_some() && self.version.is_none()
    }

    /// True if the tenant attributes or its claims differ from what was loaded.
    pub fn is_changed(&self) -> bool {
        self.claims.is_changed() || self.selected != self.original
    }

    /// Start a new tenant: active and without claims.
    pub fn create(&mut self) {
        let tenant = Tenant::new("", "");
        self.original = Some(tenant.clone());
        self.selected = Some(tenant);
        self.version = None;
        self.claims = Staging::default();
    }

    /// Load an existing tenant for editing.
    pub async fn select(&mut self, id: &str) -> ScimResult<()> {
        let stored = self
            .facade
            .lookup(id)
            .await?
            .ok_or_else(|| ScimError::not_found(format!("Tenant '{}' does not exist", id)))?;
        self.load(stored.entity, stored.version);
        Ok(())
    }

    /// Write the tenant with its staged claims.
    ///
    /// If the write fails the staged claim changes are discarded.
    pub async fn save(&mut self) -> ScimResult<()> {
        let mut tenant = self.require()?.clone();
        tenant.claims = self.claims.items().to_vec();
        let result = match &self.version {
            None => self.facade.create(tenant).await,
            Some(version) => self.facade.modify(tenant, Some(version)).await,
        };
        match result {
            Ok(stored) => {
                let changes = self.claims.commit();
                log::debug!(
                    "Saved tenant '{}': {} claims assigned, {} revoked",
                    stored.entity.id,
                    changes.assigned.len(),
                    changes.revoked.len()
                );
                self.load(stored.entity, stored.version);
                Ok(())
            }
            Err(err) => {
                log::warn!("Saving tenant failed, discarding claim changes: {}", err);
                self.claims.discard();
                Err(err)
            }
        }
    }

    /// Delete the selected tenant and clear the selection.
    pub async fn delete(&mut self) -> ScimResult<()> {
        let id = self.require()?.id.clone();
        if self.version.is_some() {
            self.facade.delete(&id).await?;
        }
        self.clear();
        Ok(())
    }

    /// Reload the selected tenant, dropping all edits.
    pub async fn refresh(&mut self) -> ScimResult<()> {
        let id = match (&self.original, &self.version) {
            (Some(original), Some(_)) => original.id.clone(),
            _ => {
                self.create();
                return Ok(());
            }
        };
        match self.facade.lookup(&id).await? {
            Some(stored) => {
                self.load(stored.entity, stored.version);
                Ok(())
            }
            None => {
                self.clear();
                Err(ScimError::not_found(format!("Tenant '{}' does not exist", id)))
            }
        }
    }

    fn load(&mut self, tenant: Tenant, version: EntityTag) {
        self.claims = Staging::new(tenant.claims.clone());
        self.original = Some(tenant.clone());
        self.selected = Some(tenant);
        self.version = Some(version);
    }

    fn clear(&mut self) {
        self.selected = None;
        self.original = None;
        self.version = None;
        self.claims = Staging::default();
    }

    fn require(&self) -> ScimResult<&Tenant> {
        self.selected
            .as_ref()
            .ok_or_else(|| ScimError::no_target("No tenant selected"))
    }
}
