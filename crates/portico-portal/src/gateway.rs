//! Remote invocation gateway
//!
//! Performs the capability-checked call against a selected host. Checks
//! run in a fixed order so callers can rely on the error kind: missing
//! host record, then grant coverage, then the forwarded call itself.
//! The gateway never retries; failover belongs to the selector layered
//! on top.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, instrument};

use portico_core::{CallTarget, HostTransport, PeerId, RemoteCall, TransportError};
use portico_directory::{Coverage, HostDirectory};

use crate::error::GatewayError;

/// Capability-checked remote invocation over a [`HostTransport`].
#[derive(Clone)]
pub struct Gateway {
    directory: Arc<HostDirectory>,
    transport: Arc<dyn HostTransport>,
}

impl Gateway {
    pub fn new(directory: Arc<HostDirectory>, transport: Arc<dyn HostTransport>) -> Self {
        Self {
            directory,
            transport,
        }
    }

    /// Invoke `target` on `host`, scoped to the instance behind `alias`.
    ///
    /// Order of checks:
    /// 1. the host must hold a current record for the instance
    ///    ([`GatewayError::NoHostRecord`]);
    /// 2. the record's grant must cover `target`, with the presented
    ///    secret for conditional grants ([`GatewayError::CapabilityDenied`]
    ///    / [`GatewayError::ConditionalAccessDenied`]);
    /// 3. the payload is forwarded verbatim and the host's response (or
    ///    typed failure) returned.
    #[instrument(skip(self, payload, secret), fields(host = %host.short_id(), alias, target = %target))]
    pub async fn invoke(
        &self,
        host: &PeerId,
        alias: &str,
        target: &CallTarget,
        payload: Bytes,
        secret: Option<&[u8]>,
        timeout: Duration,
    ) -> Result<Bytes, GatewayError> {
        let record = self
            .directory
            .find_record(host, alias)?
            .ok_or_else(|| GatewayError::NoHostRecord {
                peer: *host,
                alias: alias.to_string(),
            })?;

        match record.grant.covers(target, secret) {
            Coverage::Granted => {}
            Coverage::NotGranted => {
                debug!("Grant does not cover target");
                return Err(GatewayError::CapabilityDenied {
                    target: target.clone(),
                });
            }
            Coverage::SecretMismatch => {
                debug!("Conditional grant secret mismatch");
                return Err(GatewayError::ConditionalAccessDenied);
            }
        }

        let call = RemoteCall::new(record.instance, target.clone(), payload);
        let timeout_ms = timeout.as_millis() as u64;

        match tokio::time::timeout(timeout, self.transport.invoke(host, call)).await {
            Err(_) => Err(GatewayError::Timeout(timeout_ms)),
            Ok(Err(TransportError::Remote(message))) => {
                Err(GatewayError::RemoteExecutionFailed(message))
            }
            Ok(Err(other)) => Err(GatewayError::Offline(other.to_string())),
            Ok(Ok(response)) => Ok(response),
        }
    }
}
