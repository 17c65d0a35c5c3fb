//! Pending assignments of a list that is edited before it is saved.

/// Changes collected by a [`Staging`] list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changes<T> {
    pub assigned: Vec<T>,
    pub revoked: Vec<T>,
}

impl<T> Changes<T> {
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty() && self.revoked.is_empty()
    }
}

/// A list of assigned items with queued assign and revoke operations.
///
/// Assigning an item whose revoke is still queued cancels the revoke and
/// vice versa, so only net changes are ever committed.
#[derive(Debug, Clone)]
pub struct Staging<T> {
    original: Vec<T>,
    current: Vec<T>,
    assigned: Vec<T>,
    revoked: Vec<T>,
    changed: bool,
}

impl<T> Default for Staging<T> {
    fn default() -> Self {
        Self {
            original: Vec::new(),
            current: Vec::new(),
            assigned: Vec::new(),
            revoked: Vec::new(),
            changed: false,
        }
    }
}

impl<T: Clone + PartialEq> Staging<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            original: items.clone(),
            current: items,
            ..Self::default()
        }
    }

    /// The list as edited so far.
    pub fn items(&self) -> &[T] {
        &self.current
    }

    pub fn assigned(&self) -> &[T] {
        &self.assigned
    }

    pub fn revoked(&self) -> &[T] {
        &self.revoked
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Add an item. Returns `false` if it is already in the list.
    pub fn assign(&mut self, item: T) -> bool {
        if self.current.contains(&item) {
            return false;
        }
        match self.revoked.iter().position(|r| *r == item) {
            Some(index) => {
                self.revoked.remove(index);
            }
            None => self.assigned.push(item.clone()),
        }
        self.current.push(item);
        self.changed = true;
        true
    }

    /// Remove an item. Returns `false` if it is not in the list.
    pub fn revoke(&mut self, item: &T) -> bool {
        let Some(index) = self.current.iter().position(|c| c == item) else {
            return false;
        };
        let removed = self.current.remove(index);
        match self.assigned.iter().position(|a| a == item) {
            Some(queued) => {
                self.assigned.remove(queued);
            }
            None => self.revoked.push(removed),
        }
        self.changed = true;
        true
    }

    /// Drop all edits and restore the list as it was loaded or last committed.
    pub fn discard(&mut self) {
        self.current = self.original.clone();
        self.reset();
    }

    /// Forget the queued operations without touching the list.
    pub fn reset(&mut self) {
        self.assigned.clear();
        self.revoked.clear();
        self.changed = false;
    }

    /// Accept the edited list as the new baseline and hand back what changed.
    pub fn commit(&mut self) -> Changes<T> {
        let changes = Changes {
            assigned: std::mem::take(&mut self.assigned),
            revoked: std::mem::take(&mut self.revoked),
        };
        self.original = self.current.clone();
        self.changed = false;
        changes
    }
}
