//! Call addressing types
//!
//! A remote invocation names a (module, function) pair inside a network
//! instance and carries an opaque payload. Payloads are postcard-encoded
//! at the edges; the protocol itself never inspects them.

use std::fmt::{self, Display};

use bytes::Bytes;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::CodecError;
use crate::identity::InstanceId;

/// A (module, function) pair addressed by a remote call.
///
/// Capability grants are evaluated against exact pairs, so equality and
/// ordering are derived on the raw names.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CallTarget {
    pub module: String,
    pub function: String,
}

impl CallTarget {
    pub fn new(module: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            function: function.into(),
        }
    }
}

impl Display for CallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.function)
    }
}

impl From<(&str, &str)> for CallTarget {
    fn from((module, function): (&str, &str)) -> Self {
        Self::new(module, function)
    }
}

/// A fully-addressed remote invocation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteCall {
    /// The network instance the call is scoped to.
    pub instance: InstanceId,
    /// The module/function being invoked.
    pub target: CallTarget,
    /// Opaque payload, forwarded verbatim to the host.
    #[serde(with = "serde_bytes_compat")]
    pub payload: Bytes,
}

impl RemoteCall {
    /// Build a call with an already-encoded payload.
    pub fn new(instance: InstanceId, target: CallTarget, payload: Bytes) -> Self {
        Self {
            instance,
            target,
            payload,
        }
    }

    /// Build a call by postcard-encoding a structured payload.
    pub fn encode<T: Serialize>(
        instance: InstanceId,
        target: CallTarget,
        payload: &T,
    ) -> Result<Self, CodecError> {
        let bytes = postcard::to_allocvec(payload).map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(Self::new(instance, target, Bytes::from(bytes)))
    }

    /// Decode the payload as a structured value.
    pub fn decode_payload<T: DeserializeOwned>(&self) -> Result<T, CodecError> {
        Ok(postcard::from_bytes(&self.payload)?)
    }
}

/// Decode a postcard-encoded response payload.
pub fn decode_response<T: DeserializeOwned>(bytes: &Bytes) -> Result<T, CodecError> {
    Ok(postcard::from_bytes(bytes)?)
}

/// Postcard-encode a response payload.
pub fn encode_response<T: Serialize>(value: &T) -> Result<Bytes, CodecError> {
    let bytes = postcard::to_allocvec(value).map_err(|e| CodecError::Encode(e.to_string()))?;
    Ok(Bytes::from(bytes))
}

mod serde_bytes_compat {
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(bytes)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let vec = Vec::<u8>::deserialize(deserializer)?;
        Ok(Bytes::from(vec))
    }
}
