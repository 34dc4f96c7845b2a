use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::domain::entities::{service::NewService, service_type::ServiceType};
use crate::use_cases::catalog::{DomainRepo, ServiceRepo};

/// A domain shipped with the schema and the service that must exist for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownService {
    pub domain: &'static str,
    /// Id of the seed row inserted by the initial migration.
    pub domain_id: Uuid,
    pub service_type: ServiceType,
}

/// Reference data the application expects after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedCatalog {
    pub services: Vec<WellKnownService>,
}

pub const GITHUB_DOMAIN_ID: Uuid = Uuid::from_u128(0xfd31fdcd_0ebf_48aa_9362_bbfd910f5030);
pub const GITLAB_DOMAIN_ID: Uuid = Uuid::from_u128(0xa78ff080_9fa9_4c26_8a87_23aa04a52d55);
pub const JIRA_DOMAIN_ID: Uuid = Uuid::from_u128(0xeb03b789_7b52_4e2d_9dc0_f51d048dd81a);

impl SeedCatalog {
    pub fn well_known() -> Self {
        Self {
            services: vec![
                WellKnownService {
                    domain: "github.com",
                    domain_id: GITHUB_DOMAIN_ID,
                    service_type: ServiceType::GitHub,
                },
                WellKnownService {
                    domain: "gitlab.com",
                    domain_id: GITLAB_DOMAIN_ID,
                    service_type: ServiceType::GitLab,
                },
                WellKnownService {
                    domain: "jira.atlassian.com",
                    domain_id: JIRA_DOMAIN_ID,
                    service_type: ServiceType::Jira,
                },
            ],
        }
    }
}

impl Default for SeedCatalog {
    fn default() -> Self {
        Self::well_known()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub created: usize,
    pub already_present: usize,
}

#[derive(Clone)]
pub struct BootstrapUseCases {
    domains: Arc<dyn DomainRepo>,
    services: Arc<dyn ServiceRepo>,
}

impl BootstrapUseCases {
    pub fn new(domains: Arc<dyn DomainRepo>, services: Arc<dyn ServiceRepo>) -> Self {
        Self { domains, services }
    }

    /// Makes sure every well-known domain has its service row.
    ///
    /// Existing services are left alone, so running this again only performs
    /// lookups. A seed domain that is missing from the database is an error:
    /// domains come from the schema migration and are never created here.
    #[instrument(skip(self, catalog))]
    pub async fn ensure_well_known_services(
        &self,
        catalog: &SeedCatalog,
    ) -> AppResult<BootstrapReport> {
        let mut report = BootstrapReport::default();

        for entry in &catalog.services {
            if self.services.find_by_domain(entry.domain).await?.is_some() {
                report.already_present += 1;
                continue;
            }

            let domain = self
                .domains
                .get_by_name(entry.domain)
                .await?
                .ok_or_else(|| AppError::MissingSeedDomain(entry.domain.to_string()))?;

            let service = self
                .services
                .create(&NewService {
                    domain_id: domain.id,
                    name: entry.service_type.display_name().to_string(),
                    service_type: entry.service_type,
                })
                .await?;

            tracing::info!(
                service_id = %service.id,
                domain = entry.domain,
                service_type = %entry.service_type,
                "Seed service created"
            );
            report.created += 1;
        }

        Ok(report)
    }
}
