//! Application service: deployment helper port allocation and negotiation.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::sync::{PoisonError, RwLock};

use serde::Serialize;

use crate::application::ports::PortProbe;
use crate::domain::deploy::helper_url;
use crate::domain::error::PortError;
use crate::domain::port::{self, ALTERNATIVE_COUNT};

/// Candidates scanned by [`allocate`] when the caller has no better bound.
pub const DEFAULT_MAX_ATTEMPTS: u16 = 10;

/// First available port among `start, start+1, …` (at most `max_attempts`).
pub async fn allocate(probe: &impl PortProbe, start: u16, max_attempts: u16) -> Option<u16> {
    for candidate in port::candidates(start, max_attempts) {
        if probe.is_available(candidate).await {
            return Some(candidate);
        }
    }
    None
}

/// Every available port among `base+1 ..= base+count`.
pub async fn list_alternatives(probe: &impl PortProbe, base: u16, count: u16) -> Vec<u16> {
    let mut available = Vec::new();
    for candidate in port::alternatives(base, count) {
        if probe.is_available(candidate).await {
            available.push(candidate);
        }
    }
    available
}

// ── Negotiated port ───────────────────────────────────────────────────────────

/// The port the deployment helper is believed to listen on.
///
/// Starts unset and falls back to the configured default. Lives in the
/// server state for the lifetime of the process.
#[derive(Debug)]
pub struct NegotiatedPort {
    default: u16,
    current: RwLock<Option<u16>>,
}

impl NegotiatedPort {
    #[must_use]
    pub fn new(default: u16) -> Self {
        Self {
            default,
            current: RwLock::new(None),
        }
    }

    /// Negotiated port, or the default when none was negotiated.
    pub fn get(&self) -> u16 {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .unwrap_or(self.default)
    }

    pub fn set(&self, port: u16) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(port);
    }

    /// Whether a port was explicitly negotiated.
    pub fn is_negotiated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

// ── Use-cases ─────────────────────────────────────────────────────────────────

/// Outcome of checking the current deployment helper port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PortCheck {
    Available {
        available: bool,
        port: u16,
        host: String,
        url: String,
    },
    Occupied {
        available: bool,
        port: u16,
        alternatives: Vec<u16>,
        /// First free port after `port`, scanning up to ten ports past the
        /// alternatives.
        suggested: Option<u16>,
    },
}

/// Probe the current port; when taken, list up to five alternatives and
/// suggest one, scanning past the window when every alternative is busy.
pub async fn check_current(
    probe: &impl PortProbe,
    negotiated: &NegotiatedPort,
    host: &str,
) -> PortCheck {
    let port = negotiated.get();
    if probe.is_available(port).await {
        PortCheck::Available {
            available: true,
            port,
            host: host.to_string(),
            url: helper_url(host, port),
        }
    } else {
        let alternatives = list_alternatives(probe, port, ALTERNATIVE_COUNT).await;
        let suggested = match alternatives.first() {
            Some(first) => Some(*first),
            None => match port.checked_add(ALTERNATIVE_COUNT + 1) {
                Some(start) => allocate(probe, start, DEFAULT_MAX_ATTEMPTS).await,
                None => None,
            },
        };
        PortCheck::Occupied {
            available: false,
            port,
            alternatives,
            suggested,
        }
    }
}

/// Adopt `requested` as the negotiated port if it is free.
///
/// # Errors
///
/// Returns [`PortError::InUse`] with alternatives when the port is taken.
pub async fn negotiate(
    probe: &impl PortProbe,
    negotiated: &NegotiatedPort,
    requested: u16,
) -> Result<u16, PortError> {
    if !probe.is_available(requested).await {
        return Err(PortError::InUse {
            port: requested,
            alternatives: list_alternatives(probe, requested, ALTERNATIVE_COUNT).await,
        });
    }
    negotiated.set(requested);
    Ok(requested)
}
