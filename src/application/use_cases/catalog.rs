use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::domain::entities::{
    domain::Domain,
    service::{NewService, Service},
    service_type::ServiceType,
};

#[async_trait]
pub trait DomainRepo: Send + Sync {
    async fn create(&self, name: &str) -> AppResult<Domain>;
    async fn get_by_id(&self, domain_id: Uuid) -> AppResult<Option<Domain>>;
    async fn get_by_name(&self, name: &str) -> AppResult<Option<Domain>>;
    async fn list(&self) -> AppResult<Vec<Domain>>;
    /// Removes the domain together with its services and their tokens.
    /// Returns `false` when no domain had this id.
    async fn delete(&self, domain_id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait ServiceRepo: Send + Sync {
    async fn create(&self, service: &NewService) -> AppResult<Service>;
    async fn get_by_id(&self, service_id: Uuid) -> AppResult<Option<Service>>;
    async fn get_by_name(&self, name: &str) -> AppResult<Option<Service>>;
    /// Looks the service up through the name of the domain it belongs to.
    async fn find_by_domain(&self, domain: &str) -> AppResult<Option<Service>>;
    async fn list(&self) -> AppResult<Vec<Service>>;
    async fn list_by_domain(&self, domain_id: Uuid) -> AppResult<Vec<Service>>;
    /// Removes the service and its tokens. Returns `false` when nothing matched.
    async fn delete(&self, service_id: Uuid) -> AppResult<bool>;
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceSummary {
    pub id: Uuid,
    pub name: String,
    pub service_type: ServiceType,
    pub domain_id: Uuid,
    pub domain: String,
}

#[derive(Clone)]
pub struct CatalogUseCases {
    domains: Arc<dyn DomainRepo>,
    services: Arc<dyn ServiceRepo>,
}

impl CatalogUseCases {
    pub fn new(domains: Arc<dyn DomainRepo>, services: Arc<dyn ServiceRepo>) -> Self {
        Self { domains, services }
    }

    #[instrument(skip(self))]
    pub async fn list_domains(&self) -> AppResult<Vec<Domain>> {
        self.domains.list().await
    }

    #[instrument(skip(self))]
    pub async fn list_services(&self) -> AppResult<Vec<ServiceSummary>> {
        let domains: HashMap<Uuid, String> = self
            .domains
            .list()
            .await?
            .into_iter()
            .map(|d| (d.id, d.name))
            .collect();

        let services = self.services.list().await?;
        Ok(services
            .into_iter()
            .map(|s| {
                let domain = domains.get(&s.domain_id).cloned().unwrap_or_default();
                summarize(s, domain)
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn find_service_by_domain(&self, domain: &str) -> AppResult<ServiceSummary> {
        let normalized = domain.trim().to_lowercase();
        let service = self
            .services
            .find_by_domain(&normalized)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(summarize(service, normalized))
    }

    #[instrument(skip(self))]
    pub async fn remove_domain(&self, domain_id: Uuid) -> AppResult<()> {
        if !self.domains.delete(domain_id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(%domain_id, "Domain removed with its services and tokens");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_service(&self, service_id: Uuid) -> AppResult<()> {
        if !self.services.delete(service_id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

fn summarize(service: Service, domain: String) -> ServiceSummary {
    ServiceSummary {
        id: service.id,
        name: service.name,
        service_type: service.service_type,
        domain_id: service.domain_id,
        domain,
    }
}
