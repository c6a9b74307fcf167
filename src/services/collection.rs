//! The canonical in-memory customer list and its derived view.

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::types::{CustomerId, UserId};
use crate::gateway::{CustomerFilter, CustomerGateway};
use crate::services::{ServiceError, ServiceResult};

/// Predicate currently shaping the view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ActiveQuery {
    #[default]
    All,
    /// Free-text term matched locally against every display field.
    Search(String),
    /// Field filter answered server-side, re-applied locally after mutations.
    Fields(CustomerFilter),
}

/// Owns the authoritative list of the current user's customers and exposes a
/// filtered/searched view that is always a recomputed subset of it.
///
/// Mutations are never optimistic: state changes only once the gateway has
/// responded. After a successful create/update the returned record is merged
/// into the canonical list by id rather than re-fetching everything.
#[derive(Debug, Default)]
pub struct CustomerCollection {
    canonical: Vec<Customer>,
    view: Vec<Customer>,
    query: ActiveQuery,
}

impl CustomerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The authoritative list, as last confirmed by the backend.
    pub fn canonical(&self) -> &[Customer] {
        &self.canonical
    }

    /// The currently displayed subset.
    pub fn view(&self) -> &[Customer] {
        &self.view
    }

    pub fn active_query(&self) -> &ActiveQuery {
        &self.query
    }

    /// Replace the canonical list from the backend. On failure the previous
    /// list and view stay intact; the error is reported once, no retry.
    pub async fn load<G>(&mut self, gateway: &G, user_id: UserId) -> ServiceResult<()>
    where
        G: CustomerGateway + ?Sized,
    {
        let customers = gateway.list_for_user(user_id).await.map_err(|e| {
            log::error!("Failed to load customers: {e}");
            ServiceError::from(e)
        })?;
        self.canonical = customers;
        self.rebuild_view();
        Ok(())
    }

    /// Local free-text search over first/last name, email and region.
    /// An empty term restores the full canonical set.
    pub fn search(&mut self, term: &str) {
        self.query = if term.is_empty() {
            ActiveQuery::All
        } else {
            ActiveQuery::Search(term.to_string())
        };
        self.rebuild_view();
    }

    /// Delegate a field filter to the backend. The response is intersected
    /// with the canonical list by id so the view stays a subset of it, and
    /// the filter is kept as the active query so later mutations re-derive
    /// the view from the same predicates.
    pub async fn filter<G>(&mut self, gateway: &G, filter: CustomerFilter) -> ServiceResult<()>
    where
        G: CustomerGateway + ?Sized,
    {
        if filter.is_empty() {
            self.query = ActiveQuery::All;
            self.rebuild_view();
            return Ok(());
        }

        let matches = gateway.filter(&filter).await.map_err(|e| {
            log::error!("Failed to filter customers: {e}");
            ServiceError::from(e)
        })?;
        let matched_ids: Vec<CustomerId> = matches.iter().map(|c| c.id).collect();
        self.query = ActiveQuery::Fields(filter);
        self.view = self
            .canonical
            .iter()
            .filter(|c| matched_ids.contains(&c.id))
            .cloned()
            .collect();
        Ok(())
    }

    /// Drop any active predicate and re-fetch the full list.
    pub async fn clear_filters<G>(&mut self, gateway: &G, user_id: UserId) -> ServiceResult<()>
    where
        G: CustomerGateway + ?Sized,
    {
        self.query = ActiveQuery::All;
        self.load(gateway, user_id).await
    }

    /// Create a customer and merge the backend's record into the canonical
    /// list. A duplicate email surfaces as an email-scoped conflict with no
    /// state change; so does any other failure, as a transport error.
    pub async fn create<G>(&mut self, gateway: &G, new_customer: &NewCustomer) -> ServiceResult<Customer>
    where
        G: CustomerGateway + ?Sized,
    {
        let created = gateway.create(new_customer).await.map_err(|e| {
            log::error!("Failed to create customer: {e}");
            ServiceError::from(e)
        })?;
        self.canonical.push(created.clone());
        self.rebuild_view();
        Ok(created)
    }

    /// Update a customer by id, replacing the canonical entry with the
    /// record the backend returns.
    pub async fn update<G>(
        &mut self,
        gateway: &G,
        id: CustomerId,
        updates: &UpdateCustomer,
    ) -> ServiceResult<Customer>
    where
        G: CustomerGateway + ?Sized,
    {
        let updated = gateway.update(id, updates).await.map_err(|e| {
            log::error!("Failed to update customer {id}: {e}");
            ServiceError::from(e)
        })?;
        match self.canonical.iter_mut().find(|c| c.id == id) {
            Some(entry) => *entry = updated.clone(),
            // A record edited elsewhere may no longer be loaded; adopt it.
            None => self.canonical.push(updated.clone()),
        }
        self.rebuild_view();
        Ok(updated)
    }

    /// Delete by id, removing the record from both canonical and view once
    /// the backend confirms. Unknown ids are reported and change nothing.
    pub async fn delete<G>(&mut self, gateway: &G, id: CustomerId) -> ServiceResult<()>
    where
        G: CustomerGateway + ?Sized,
    {
        gateway.delete(id).await.map_err(|e| {
            log::error!("Failed to delete customer {id}: {e}");
            ServiceError::from(e)
        })?;
        self.canonical.retain(|c| c.id != id);
        self.rebuild_view();
        Ok(())
    }

    fn rebuild_view(&mut self) {
        self.view = match &self.query {
            ActiveQuery::All => self.canonical.clone(),
            ActiveQuery::Search(term) => self
                .canonical
                .iter()
                .filter(|c| matches_term(c, term))
                .cloned()
                .collect(),
            ActiveQuery::Fields(filter) => self
                .canonical
                .iter()
                .filter(|c| filter.matches(c))
                .cloned()
                .collect(),
        };
    }
}

/// Case-insensitive substring match across every displayed field.
fn matches_term(customer: &Customer, term: &str) -> bool {
    let needle = term.to_lowercase();
    customer.first_name.to_lowercase().contains(&needle)
        || customer.last_name.to_lowercase().contains(&needle)
        || customer.email.to_lowercase().contains(&needle)
        || customer.region.to_lowercase().contains(&needle)
}
