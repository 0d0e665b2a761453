//! Ban detail entity - one identity a ban matches against

use std::fmt;
use std::net::IpAddr;

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Player identity a ban detail matches on
///
/// Constructed only through [`Identity::new`], so every value holds at least
/// one non-blank field and a well-formed network address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    handle: Option<String>,
    hardware_id: Option<String>,
    network_address: Option<IpAddr>,
}

impl Identity {
    /// Validate and normalize raw identity fields
    ///
    /// Blank strings are treated as absent.
    pub fn new(
        handle: Option<&str>,
        hardware_id: Option<&str>,
        network_address: Option<&str>,
    ) -> Result<Self, DomainError> {
        let handle = non_blank(handle);
        let hardware_id = non_blank(hardware_id);
        let network_address = non_blank(network_address)
            .map(|raw| {
                raw.parse::<IpAddr>()
                    .map_err(|_| DomainError::InvalidNetworkAddress(raw))
            })
            .transpose()?;

        if handle.is_none() && hardware_id.is_none() && network_address.is_none() {
            return Err(DomainError::EmptyIdentity);
        }

        Ok(Self {
            handle,
            hardware_id,
            network_address,
        })
    }

    #[inline]
    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }

    #[inline]
    pub fn hardware_id(&self) -> Option<&str> {
        self.hardware_id.as_deref()
    }

    #[inline]
    pub fn network_address(&self) -> Option<IpAddr> {
        self.network_address
    }

    /// Network address in its canonical textual form
    pub fn network_address_string(&self) -> Option<String> {
        self.network_address.map(|ip| ip.to_string())
    }
}

/// `<handle> (IP: <address>, CompID: <hardware id>)`, absent parts left empty
impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (IP: {}, CompID: {})",
            self.handle.as_deref().unwrap_or_default(),
            self.network_address
                .map(|ip| ip.to_string())
                .unwrap_or_default(),
            self.hardware_id.as_deref().unwrap_or_default(),
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Ban detail entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanDetail {
    pub id: Snowflake,
    pub ban_id: Snowflake,
    pub identity: Identity,
    pub removed_by: Option<Snowflake>,
    pub removed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BanDetail {
    /// Create a new, not yet persisted detail
    pub fn new(id: Snowflake, ban_id: Snowflake, identity: Identity) -> Self {
        let now = Utc::now();
        Self {
            id,
            ban_id,
            identity,
            removed_by: None,
            removed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed_at.is_some()
    }

    /// Replace the matched identity
    pub fn set_identity(&mut self, identity: Identity) {
        self.identity = identity;
        self.updated_at = Utc::now();
    }
}
