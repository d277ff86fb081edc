//! Classification tables for rule parameters.
//!
//! Each table is an ordered list of structural keys. A key names a binding
//! and, optionally, the exact type it must carry. The position of a key in
//! the ghost table is its canonical output rank.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Bucket a parameter is sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Caller, role and call-argument inputs
    Parametric,
    /// Persisted contract state mirrored into the verification harness
    Ghost,
}

/// Structural key: binding name plus optional type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamKey {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
}

impl ParamKey {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty.into()),
        }
    }

    /// Key matching any parameter with this binding name.
    pub fn name_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
        }
    }

    /// Check a parameter's binding name and type text against this key.
    ///
    /// Types compare with all whitespace removed, so `Option < Address >`
    /// and `Option<Address>` are the same type.
    pub fn matches(&self, name: &str, ty: &str) -> bool {
        self.name == name
            && self
                .ty
                .as_deref()
                .is_none_or(|key_ty| compact(key_ty) == compact(ty))
    }
}

impl std::fmt::Display for ParamKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.ty {
            Some(ty) => write!(f, "{}: {}", self.name, ty),
            None => write!(f, "{}", self.name),
        }
    }
}

fn compact(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// The two ordered key tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationTables {
    pub parametric: Vec<ParamKey>,
    pub ghost: Vec<ParamKey>,
}

impl ClassificationTables {
    /// Look a parameter up: parametric keys first, then ghost keys.
    pub fn classify(&self, name: &str, ty: &str) -> Option<Bucket> {
        let found = |keys: &[ParamKey]| keys.iter().any(|k| k.matches(name, ty));
        if found(&self.parametric) {
            Some(Bucket::Parametric)
        } else if found(&self.ghost) {
            Some(Bucket::Ghost)
        } else {
            None
        }
    }

    /// Reject empty names and keys listed twice in the same table.
    pub fn validate(&self) -> Result<(), String> {
        validate_table("parametric", &self.parametric)?;
        validate_table("ghost", &self.ghost)
    }
}

fn validate_table(label: &str, keys: &[ParamKey]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for key in keys {
        if key.name.trim().is_empty() {
            return Err(format!("{} table contains an entry with an empty name", label));
        }
        if !seen.insert((key.name.as_str(), key.ty.as_deref().map(compact))) {
            return Err(format!("{} table lists `{}` more than once", label, key));
        }
    }
    Ok(())
}

impl Default for ClassificationTables {
    fn default() -> Self {
        Self {
            parametric: default_parametric_keys(),
            ghost: default_ghost_keys(),
        }
    }
}

const PARAMETRIC_KEYS: &[(&str, &str)] = &[
    ("caller_admin", "Address"),
    ("caller_emergency_admin", "Address"),
    ("caller_rewards_admin", "Address"),
    ("caller_operations_admin", "Address"),
    ("caller_pause_admin", "Address"),
    ("caller_emergency_pause_admins", "Vec<Address>"),
    ("role_name", "Symbol"),
    ("new_address", "Address"),
    ("value", "bool"),
    ("address", "Address"),
    ("addresses", "Vec<Address>"),
    ("new_wasm_hash", "BytesN<32>"),
];

// Order here is the emitted order of ghost parameters.
const GHOST_KEYS: &[(&str, &str)] = &[
    ("admin", "Option<Address>"),
    ("emergency_admin", "Option<Address>"),
    ("rewards_admin", "Option<Address>"),
    ("operations_admin", "Option<Address>"),
    ("pause_admin", "Option<Address>"),
    ("emergency_pause_admins", "Vec<Address>"),
    ("admin_transfer_deadline", "u64"),
    ("em_admin_transfer_deadline", "u64"),
    ("future_admin", "Option<Address>"),
    ("future_em_admin", "Option<Address>"),
    ("emergency_mode", "bool"),
    ("upgrade_deadline", "u64"),
    ("future_wasm", "Option<BytesN<32>>"),
];

pub fn default_parametric_keys() -> Vec<ParamKey> {
    PARAMETRIC_KEYS
        .iter()
        .map(|(name, ty)| ParamKey::new(*name, *ty))
        .collect()
}

pub fn default_ghost_keys() -> Vec<ParamKey> {
    GHOST_KEYS
        .iter()
        .map(|(name, ty)| ParamKey::new(*name, *ty))
        .collect()
}
