use sha2::{Digest, Sha256};
use ufo_core::errors::UfoError;

use crate::registry::Registry;
use crate::serde::to_canonical_json_bytes;

/// Computes a stable hexadecimal hash of the loaded vertex table.
///
/// Two registries holding the same vertices in the same order hash equal,
/// regardless of how their symbol handles were numbered.
pub fn canonical_hash(registry: &Registry) -> Result<String, UfoError> {
    let records = registry.export()?;
    let bytes = to_canonical_json_bytes(&records)?;
    Ok(format!("{:x}", Sha256::digest(bytes)))
}
