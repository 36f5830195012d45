//! Repository abstraction over KYC records
//!
//! Screens call `get/list/create/update/delete` instead of holding arrays in
//! component state. `InMemoryRepository` is the only backend shipped here;
//! a database-backed one implements the same trait.

use std::sync::RwLock;

use form_schema::KycForm;
use shared_types::{
    Client, ComplianceItem, Contract, Notification, OnboardingFlow, PaymentMethod, Task, User,
    Verification,
};

use crate::error::StoreError;

/// A record addressable by a string id
pub trait Record: Clone {
    /// Name used in error messages
    const KIND: &'static str;

    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($($ty:ty => $kind:literal),+ $(,)?) => {
        $(
            impl Record for $ty {
                const KIND: &'static str = $kind;

                fn id(&self) -> &str {
                    &self.id
                }
            }
        )+
    };
}

impl_record!(
    User => "user",
    Client => "client",
    OnboardingFlow => "onboarding flow",
    Task => "task",
    Verification => "verification",
    Contract => "contract",
    ComplianceItem => "compliance item",
    PaymentMethod => "payment method",
    Notification => "notification",
    KycForm => "form",
);

pub trait Repository<T: Record> {
    fn get(&self, id: &str) -> Result<T, StoreError>;

    /// All records in insertion order
    fn list(&self) -> Result<Vec<T>, StoreError>;

    fn create(&self, record: T) -> Result<T, StoreError>;

    /// Replace the record with the same id
    fn update(&self, record: T) -> Result<T, StoreError>;

    /// Remove and return the record
    fn delete(&self, id: &str) -> Result<T, StoreError>;

    /// Records matching a predicate, in insertion order
    fn find<P>(&self, predicate: P) -> Result<Vec<T>, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self.list()?.into_iter().filter(|r| predicate(r)).collect())
    }
}

/// Insertion-ordered in-memory repository, safe to share across threads
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Repository pre-loaded with records; later duplicates of an id are dropped
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let mut unique: Vec<T> = Vec::new();
        for record in records {
            if unique.iter().any(|r| r.id() == record.id()) {
                tracing::warn!(kind = T::KIND, id = record.id(), "duplicate seed record dropped");
                continue;
            }
            unique.push(record);
        }
        Self {
            records: RwLock::new(unique),
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().map_err(|_| StoreError::LockPoisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Apply `f` to the stored record and return the updated copy
    pub fn modify<F>(&self, id: &str, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| not_found::<T>(id))?;
        f(record);
        Ok(record.clone())
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found<T: Record>(id: &str) -> StoreError {
    StoreError::NotFound {
        kind: T::KIND,
        id: id.to_string(),
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn get(&self, id: &str) -> Result<T, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| not_found::<T>(id))
    }

    fn list(&self) -> Result<Vec<T>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.clone())
    }

    fn create(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(StoreError::AlreadyExists {
                kind: T::KIND,
                id: record.id().to_string(),
            });
        }
        tracing::debug!(kind = T::KIND, id = record.id(), "record created");
        records.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| not_found::<T>(record.id()))?;
        *slot = record.clone();
        Ok(record)
    }

    fn delete(&self, id: &str) -> Result<T, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| not_found::<T>(id))?;
        tracing::debug!(kind = T::KIND, id, "record deleted");
        Ok(records.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_schema::{FieldType, FormSchema, FormStatus};
    use pretty_assertions::assert_eq;
    use shared_types::{ClientStatus, RiskLevel};

    fn client(id: &str, company: &str, risk: RiskLevel) -> Client {
        Client {
            id: id.to_string(),
            org_id: "org_1".to_string(),
            company: company.to_string(),
            contact_name: "John Smith".to_string(),
            email: "john@example.com".to_string(),
            risk_score: risk,
            status: ClientStatus::Invited,
            created_at: "2024-01-15".to_string(),
            updated_at: "2024-01-15".to_string(),
        }
    }

    #[test]
    fn test_crud_roundtrip() {
        let repo = InMemoryRepository::new();
        repo.create(client("1", "Acme Corporation", RiskLevel::Low)).unwrap();
        repo.create(client("2", "TechStart Inc", RiskLevel::Medium)).unwrap();

        assert_eq!(repo.get("2").unwrap().company, "TechStart Inc");

        let mut updated = repo.get("1").unwrap();
        updated.status = ClientStatus::Approved;
        repo.update(updated).unwrap();
        assert_eq!(repo.get("1").unwrap().status, ClientStatus::Approved);

        let removed = repo.delete("1").unwrap();
        assert_eq!(removed.company, "Acme Corporation");
        let ids: Vec<_> = repo.list().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["2"]);
    }

    #[test]
    fn test_create_duplicate_fails() {
        let repo = InMemoryRepository::new();
        repo.create(client("1", "Acme", RiskLevel::Low)).unwrap();
        let err = repo.create(client("1", "Other", RiskLevel::High)).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { kind: "client", .. }));
        assert_eq!(repo.get("1").unwrap().company, "Acme");
    }

    #[test]
    fn test_missing_ids() {
        let repo: InMemoryRepository<Client> = InMemoryRepository::new();
        assert!(matches!(repo.get("x"), Err(StoreError::NotFound { .. })));
        assert!(matches!(
            repo.update(client("x", "Ghost", RiskLevel::Low)),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(repo.delete("x"), Err(StoreError::NotFound { .. })));
        assert_eq!(
            repo.get("x").unwrap_err().to_string(),
            "client not found: x"
        );
    }

    #[test]
    fn test_find_and_seed() {
        let repo = InMemoryRepository::with_records([
            client("1", "Acme", RiskLevel::Low),
            client("2", "Innovation Labs", RiskLevel::High),
            client("1", "Acme again", RiskLevel::High),
        ]);
        assert_eq!(repo.len().unwrap(), 2);

        let high = repo.find(|c| c.risk_score == RiskLevel::High).unwrap();
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].company, "Innovation Labs");
    }

    #[test]
    fn test_forms_repository_duplicate_and_delete() {
        let repo = InMemoryRepository::new();
        let form = KycForm::new("Basic Client Information", "")
            .with_schema(FormSchema::new().add_field(FieldType::Text));
        let original = repo.create(form).unwrap();

        let copy = repo.create(original.duplicate()).unwrap();
        assert_eq!(repo.len().unwrap(), 2);
        assert_eq!(copy.status, FormStatus::Draft);

        let archived = repo.modify(&original.id, |f| f.archive()).unwrap();
        assert_eq!(archived.status, FormStatus::Archived);

        repo.delete(&copy.id).unwrap();
        assert_eq!(repo.list().unwrap(), vec![archived]);
    }
}
