use serde::Serialize;
use uuid::Uuid;

/// An external host that services are registered under, e.g. "github.com".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Domain {
    pub id: Uuid,
    pub name: String,
}
