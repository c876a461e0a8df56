use serde::Serialize;

pub const SERVICE_NAME: &str = "Account REST API Service";
pub const SERVICE_VERSION: &str = "1.0";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Health {
    pub status: &'static str,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "OK" }
    }
}

/// Body of the service root endpoint.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl ServiceInfo {
    pub fn current() -> Self {
        Self { name: SERVICE_NAME, version: SERVICE_VERSION }
    }
}
