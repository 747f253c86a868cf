//! Sealed IR values: content plus the signature computed over it.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::ops::Deref;
use thiserror::Error;

use crate::signature::{self, SIGNATURE_KEY};
use crate::{IrV1, IrV2, IrView, SchemaVersion, IR_VERSION_V1, IR_VERSION_V2};

/// An assembled IR and its signature.
///
/// The IR is read-only once sealed. [`Signed::rebuild`] is the only way to
/// change a field, and it always recomputes the signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Signed<T> {
    ir: T,
    signature: String,
}

impl<T: Serialize> Signed<T> {
    /// Seal an IR record by hashing its canonical form.
    pub fn seal(ir: T) -> Result<Self, serde_json::Error> {
        let signature = signature::compute(&ir)?;
        Ok(Self { ir, signature })
    }

    /// Apply `edit` to a copy of the IR and re-seal it.
    pub fn rebuild(self, edit: impl FnOnce(&mut T)) -> Result<Self, serde_json::Error> {
        let mut ir = self.ir;
        edit(&mut ir);
        Self::seal(ir)
    }

    /// The IR as a JSON object with its `signature` key.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        let mut value = serde_json::to_value(&self.ir)?;
        if let Value::Object(map) = &mut value {
            map.insert(
                SIGNATURE_KEY.to_string(),
                Value::String(self.signature.clone()),
            );
        }
        Ok(value)
    }
}

impl<T> Signed<T> {
    pub fn ir(&self) -> &T {
        &self.ir
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn into_inner(self) -> T {
        self.ir
    }
}

impl<T> Deref for Signed<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.ir
    }
}

impl<T: Serialize> Serialize for Signed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

/// An assembled IR in whichever schema was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Ir {
    V1(Signed<IrV1>),
    V2(Signed<IrV2>),
}

impl Ir {
    pub fn schema_version(&self) -> SchemaVersion {
        match self {
            Ir::V1(_) => SchemaVersion::V1,
            Ir::V2(_) => SchemaVersion::V2,
        }
    }

    pub fn signature(&self) -> &str {
        match self {
            Ir::V1(ir) => ir.signature(),
            Ir::V2(ir) => ir.signature(),
        }
    }

    /// Shape-independent read access.
    pub fn view(&self) -> &dyn IrView {
        match self {
            Ir::V1(ir) => ir.ir(),
            Ir::V2(ir) => ir.ir(),
        }
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            Ir::V1(ir) => ir.to_value(),
            Ir::V2(ir) => ir.to_value(),
        }
    }
}

/// Errors reading a serialized IR document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown IR version: {0}")]
    UnknownVersion(String),

    #[error("signature mismatch: document says {stored}, content hashes to {computed}")]
    SignatureMismatch { stored: String, computed: String },
}

/// Parse an IR document produced by the compiler.
///
/// The schema is selected by the `version` field. A stored signature must
/// match the content; a document without one is sealed on load.
pub fn parse_document(json: &str) -> Result<Ir, DocumentError> {
    let value: Value = serde_json::from_str(json)?;
    let version = value
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let ir = match version.as_str() {
        IR_VERSION_V1 => Ir::V1(Signed::seal(serde_json::from_value::<IrV1>(value.clone())?)?),
        IR_VERSION_V2 => Ir::V2(Signed::seal(serde_json::from_value::<IrV2>(value.clone())?)?),
        _ => return Err(DocumentError::UnknownVersion(version)),
    };

    if let Some(stored) = value.get(SIGNATURE_KEY).and_then(Value::as_str) {
        if stored != ir.signature() {
            return Err(DocumentError::SignatureMismatch {
                stored: stored.to_string(),
                computed: ir.signature().to_string(),
            });
        }
    }

    Ok(ir)
}
