//! In-memory implementation of every repository trait.
//!
//! All four repos share one `InMemoryStore` so that unique keys, foreign keys
//! and cascading deletes behave the way the Postgres schema does.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::{
        bootstrap::{BootstrapUseCases, SeedCatalog},
        catalog::{DomainRepo, ServiceRepo},
        token::TokenRepo,
        user::{PasswordHasher, UserRepo},
    },
    domain::entities::{
        domain::Domain,
        service::{NewService, Service},
        token::{NewToken, Token},
        user::User,
    },
};

#[derive(Default)]
struct Tables {
    domains: HashMap<Uuid, Domain>,
    services: HashMap<Uuid, Service>,
    tokens: HashMap<Uuid, Token>,
    users: HashMap<Uuid, User>,
}

impl Tables {
    fn delete_tokens_where(&mut self, pred: impl Fn(&Token) -> bool) {
        self.tokens.retain(|_, t| !pred(t));
    }

    fn delete_service_cascade(&mut self, service_id: Uuid) -> bool {
        self.delete_tokens_where(|t| t.service_id == service_id);
        self.services.remove(&service_id).is_some()
    }
}

/// In-memory store implementing `DomainRepo`, `ServiceRepo`, `TokenRepo` and `UserRepo`.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    service_writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with domains, as the schema migration would.
    pub fn with_domains(self, domains: Vec<Domain>) -> Self {
        {
            let mut tables = self.tables.lock().unwrap();
            for domain in domains {
                tables.domains.insert(domain.id, domain);
            }
        }
        self
    }

    /// Seed the store with the domains named in a catalog, using their fixed ids.
    pub fn with_seed_domains(self, catalog: &SeedCatalog) -> Self {
        let domains = catalog
            .services
            .iter()
            .map(|s| Domain {
                id: s.domain_id,
                name: s.domain.to_string(),
            })
            .collect();
        self.with_domains(domains)
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        {
            let mut tables = self.tables.lock().unwrap();
            for user in users {
                tables.users.insert(user.id, user);
            }
        }
        self
    }

    pub fn with_services(self, services: Vec<Service>) -> Self {
        {
            let mut tables = self.tables.lock().unwrap();
            for service in services {
                tables.services.insert(service.id, service);
            }
        }
        self
    }

    pub fn with_tokens(self, tokens: Vec<Token>) -> Self {
        {
            let mut tables = self.tables.lock().unwrap();
            for token in tokens {
                tables.tokens.insert(token.id, token);
            }
        }
        self
    }

    /// Number of service rows ever inserted (for idempotence assertions).
    pub fn service_writes(&self) -> usize {
        self.service_writes.load(Ordering::SeqCst)
    }

    pub fn token_count(&self) -> usize {
        self.tables.lock().unwrap().tokens.len()
    }
}

/// Store seeded with the well-known domains and their services.
pub async fn seeded_store() -> InMemoryStore {
    let catalog = SeedCatalog::well_known();
    let store = std::sync::Arc::new(InMemoryStore::new().with_seed_domains(&catalog));
    BootstrapUseCases::new(store.clone(), store.clone())
        .ensure_well_known_services(&catalog)
        .await
        .expect("bootstrap in-memory store");
    std::sync::Arc::try_unwrap(store)
        .ok()
        .expect("no other store references")
}

#[async_trait]
impl DomainRepo for InMemoryStore {
    async fn create(&self, name: &str) -> AppResult<Domain> {
        let mut tables = self.tables.lock().unwrap();
        if tables.domains.values().any(|d| d.name == name) {
            return Err(AppError::ConstraintViolation(
                "A record with this value already exists".into(),
            ));
        }
        let domain = Domain {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        tables.domains.insert(domain.id, domain.clone());
        Ok(domain)
    }

    async fn get_by_id(&self, domain_id: Uuid) -> AppResult<Option<Domain>> {
        Ok(self.tables.lock().unwrap().domains.get(&domain_id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<Domain>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .domains
            .values()
            .find(|d| d.name == name)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Domain>> {
        let mut domains: Vec<Domain> =
            self.tables.lock().unwrap().domains.values().cloned().collect();
        domains.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(domains)
    }

    async fn delete(&self, domain_id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let service_ids: Vec<Uuid> = tables
            .services
            .values()
            .filter(|s| s.domain_id == domain_id)
            .map(|s| s.id)
            .collect();
        for service_id in service_ids {
            tables.delete_service_cascade(service_id);
        }
        Ok(tables.domains.remove(&domain_id).is_some())
    }
}

#[async_trait]
impl ServiceRepo for InMemoryStore {
    async fn create(&self, service: &NewService) -> AppResult<Service> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.domains.contains_key(&service.domain_id) {
            return Err(AppError::ConstraintViolation(
                "Referenced record not found".into(),
            ));
        }
        if tables.services.values().any(|s| s.name == service.name) {
            return Err(AppError::ConstraintViolation(
                "A record with this value already exists".into(),
            ));
        }
        let created = Service {
            id: Uuid::new_v4(),
            domain_id: service.domain_id,
            name: service.name.clone(),
            service_type: service.service_type,
        };
        tables.services.insert(created.id, created.clone());
        self.service_writes.fetch_add(1, Ordering::SeqCst);
        Ok(created)
    }

    async fn get_by_id(&self, service_id: Uuid) -> AppResult<Option<Service>> {
        Ok(self.tables.lock().unwrap().services.get(&service_id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<Service>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .services
            .values()
            .find(|s| s.name == name)
            .cloned())
    }

    async fn find_by_domain(&self, domain: &str) -> AppResult<Option<Service>> {
        let tables = self.tables.lock().unwrap();
        let Some(domain) = tables.domains.values().find(|d| d.name == domain) else {
            return Ok(None);
        };
        let mut matches: Vec<&Service> = tables
            .services
            .values()
            .filter(|s| s.domain_id == domain.id)
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matches.first().map(|s| (*s).clone()))
    }

    async fn list(&self) -> AppResult<Vec<Service>> {
        let mut services: Vec<Service> =
            self.tables.lock().unwrap().services.values().cloned().collect();
        services.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(services)
    }

    async fn list_by_domain(&self, domain_id: Uuid) -> AppResult<Vec<Service>> {
        let mut services: Vec<Service> = self
            .tables
            .lock()
            .unwrap()
            .services
            .values()
            .filter(|s| s.domain_id == domain_id)
            .cloned()
            .collect();
        services.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(services)
    }

    async fn delete(&self, service_id: Uuid) -> AppResult<bool> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .delete_service_cascade(service_id))
    }
}

#[async_trait]
impl TokenRepo for InMemoryStore {
    async fn create(&self, token: &NewToken) -> AppResult<Token> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.services.contains_key(&token.service_id)
            || !tables.users.contains_key(&token.user_id)
        {
            return Err(AppError::ConstraintViolation(
                "Referenced record not found".into(),
            ));
        }
        let created = Token {
            id: Uuid::new_v4(),
            service_id: token.service_id,
            user_id: token.user_id,
            in_service_username: token.in_service_username.clone(),
            token: token.token.clone(),
            enabled: true,
        };
        tables.tokens.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, token_id: Uuid) -> AppResult<Option<Token>> {
        Ok(self.tables.lock().unwrap().tokens.get(&token_id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Token>> {
        let mut tokens: Vec<Token> = self
            .tables
            .lock()
            .unwrap()
            .tokens
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tokens.sort_by(|a, b| a.in_service_username.cmp(&b.in_service_username));
        Ok(tokens)
    }

    async fn list_by_service(&self, service_id: Uuid) -> AppResult<Vec<Token>> {
        let mut tokens: Vec<Token> = self
            .tables
            .lock()
            .unwrap()
            .tokens
            .values()
            .filter(|t| t.service_id == service_id)
            .cloned()
            .collect();
        tokens.sort_by(|a, b| a.in_service_username.cmp(&b.in_service_username));
        Ok(tokens)
    }

    async fn set_enabled(&self, token_id: Uuid, enabled: bool) -> AppResult<Token> {
        let mut tables = self.tables.lock().unwrap();
        let token = tables.tokens.get_mut(&token_id).ok_or(AppError::NotFound)?;
        token.enabled = enabled;
        Ok(token.clone())
    }

    async fn delete(&self, token_id: Uuid) -> AppResult<bool> {
        Ok(self.tables.lock().unwrap().tokens.remove(&token_id).is_some())
    }
}

#[async_trait]
impl UserRepo for InMemoryStore {
    async fn create(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.values().any(|u| u.username == username) {
            return Err(AppError::ConstraintViolation(
                "A record with this value already exists".into(),
            ));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.lock().unwrap().users.get(&user_id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.tables.lock().unwrap().users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn delete(&self, user_id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        tables.delete_tokens_where(|t| t.user_id == user_id);
        Ok(tables.users.remove(&user_id).is_some())
    }
}

/// Reversible stand-in for Argon2 so tests stay fast.
pub struct PlainPasswordHasher;

impl PasswordHasher for PlainPasswordHasher {
    fn hash(&self, password: &str) -> AppResult<String> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, password_hash: &str) -> AppResult<bool> {
        Ok(password_hash.strip_prefix("plain$") == Some(password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::service_type::ServiceType;
    use crate::test_utils::create_test_domain;

    #[tokio::test]
    async fn duplicate_domain_name_fails_without_partial_row() {
        let store = InMemoryStore::new();
        DomainRepo::create(&store, "example.com").await.unwrap();

        let result = DomainRepo::create(&store, "example.com").await;

        assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
        assert_eq!(DomainRepo::list(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_service_name_fails_without_partial_row() {
        let domain = create_test_domain(|_| {});
        let store = InMemoryStore::new().with_domains(vec![domain.clone()]);
        let new = NewService {
            domain_id: domain.id,
            name: "Example".to_string(),
            service_type: ServiceType::GitHub,
        };
        ServiceRepo::create(&store, &new).await.unwrap();

        let result = ServiceRepo::create(&store, &new).await;

        assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
        assert_eq!(ServiceRepo::list(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn service_requires_existing_domain() {
        let store = InMemoryStore::new();

        let result = ServiceRepo::create(
            &store,
            &NewService {
                domain_id: Uuid::new_v4(),
                name: "Orphan".to_string(),
                service_type: ServiceType::Jira,
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn duplicate_username_fails_without_partial_row() {
        let store = InMemoryStore::new();
        UserRepo::create(&store, "alice", "h1").await.unwrap();

        let result = UserRepo::create(&store, "alice", "h2").await;

        assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
        let users = UserRepo::list(&store).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].password_hash, "h1");
    }

    #[tokio::test]
    async fn seeded_store_has_three_services() {
        let store = seeded_store().await;

        assert_eq!(DomainRepo::list(&store).await.unwrap().len(), 3);
        assert_eq!(ServiceRepo::list(&store).await.unwrap().len(), 3);
        assert_eq!(store.token_count(), 0);
    }

    #[tokio::test]
    async fn listing_by_parent_follows_foreign_keys() {
        let store = seeded_store().await;
        let user = UserRepo::create(&store, "alice", "hash").await.unwrap();
        let github = ServiceRepo::get_by_name(&store, "GitHub")
            .await
            .unwrap()
            .unwrap();
        TokenRepo::create(
            &store,
            &NewToken {
                service_id: github.id,
                user_id: user.id,
                in_service_username: "alice-gh".to_string(),
                token: "ghp_1".to_string(),
            },
        )
        .await
        .unwrap();

        let services = ServiceRepo::list_by_domain(&store, github.domain_id)
            .await
            .unwrap();
        assert_eq!(services, vec![github.clone()]);
        assert_eq!(
            TokenRepo::list_by_service(&store, github.id).await.unwrap().len(),
            1
        );

        DomainRepo::delete(&store, github.domain_id).await.unwrap();

        assert!(ServiceRepo::list_by_domain(&store, github.domain_id)
            .await
            .unwrap()
            .is_empty());
        assert!(TokenRepo::list_by_service(&store, github.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[test]
    fn plain_hasher_round_trip() {
        let hasher = PlainPasswordHasher;
        let hash = hasher.hash("pw").unwrap();
        assert!(hasher.verify("pw", &hash).unwrap());
        assert!(!hasher.verify("other", &hash).unwrap());
    }
}
