use serde::Serialize;
use uuid::Uuid;

use super::service_type::ServiceType;

/// Registration of an external platform tied to a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub id: Uuid,
    pub domain_id: Uuid,
    pub name: String,
    pub service_type: ServiceType,
}

#[derive(Debug, Clone)]
pub struct NewService {
    pub domain_id: Uuid,
    pub name: String,
    pub service_type: ServiceType,
}
