use data_runtime::configs::ownership::HostRole;
use thiserror::Error;
use zone_core::SessionId;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("host session id not initialized; arbitration cannot run")]
    HostSessionUninitialized,
    #[error("host session id must be non-zero")]
    InvalidHostSession,
    #[error("host session already initialized to {0}")]
    HostSessionAlreadySet(SessionId),
    #[error("ownership arbitration only runs on an authoritative host (role {0:?})")]
    NotAuthoritative(HostRole),
    #[error("local area tracking only runs on a client (role {0:?})")]
    ClientOnly(HostRole),
    #[error("configuration is locked; only admins may change it")]
    ConfigLocked,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
