//! Sorting parameters into parametric, ghost and unclassified groups.

use super::params::Parameter;
use crate::config::{Bucket, ClassificationTables, UnclassifiedPolicy};
use serde::Serialize;

/// Why a parameter did not make it into the rewritten header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Matched neither table
    Unclassified,
    /// Another parameter already took this ghost key's slot
    DuplicateGhostKey,
    /// `e: Env` written with `mut` or `ref`; the plain form is emitted instead
    EnvBindingMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedParameter {
    pub parameter: Parameter,
    pub reason: DropReason,
}

/// Parameters grouped in output order. `e: Env` is never part of a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    /// Input order preserved
    pub parametric: Vec<Parameter>,
    /// Ghost table order
    pub ghost: Vec<Parameter>,
    /// Kept unclassified parameters, input order (empty under the drop policy)
    pub unclassified: Vec<Parameter>,
    pub dropped: Vec<DroppedParameter>,
}

/// Group `params` against `tables`.
///
/// Parametric lookup wins over ghost lookup. Ghost and unclassified
/// parameters are merged and then re-emitted by walking the ghost table in
/// order, taking for each key the first unplaced parameter it matches;
/// anything never placed is unclassified or a duplicate.
pub fn classify(
    params: Vec<Parameter>,
    tables: &ClassificationTables,
    policy: UnclassifiedPolicy,
) -> Classified {
    let mut result = Classified::default();
    let mut merged = Vec::new();

    for param in params {
        if param.is_env() {
            if !param.is_plain_env() {
                tracing::warn!("Replacing `{}` with the plain env parameter", param.text);
                result.dropped.push(DroppedParameter {
                    parameter: param,
                    reason: DropReason::EnvBindingMode,
                });
            }
            continue;
        }
        match tables.classify(&param.name, &param.ty) {
            Some(Bucket::Parametric) => result.parametric.push(param),
            Some(Bucket::Ghost) | None => merged.push(param),
        }
    }

    let mut placed = vec![false; merged.len()];
    for key in &tables.ghost {
        let slot = merged
            .iter()
            .enumerate()
            .find(|(i, p)| !placed[*i] && key.matches(&p.name, &p.ty))
            .map(|(i, _)| i);
        if let Some(i) = slot {
            placed[i] = true;
            result.ghost.push(merged[i].clone());
        }
    }

    for (param, was_placed) in merged.into_iter().zip(placed) {
        if was_placed {
            continue;
        }
        let is_ghost = tables.ghost.iter().any(|k| k.matches(&param.name, &param.ty));
        match (is_ghost, policy) {
            (true, _) => {
                tracing::warn!("Dropping duplicate ghost parameter `{}`", param.text);
                result.dropped.push(DroppedParameter {
                    parameter: param,
                    reason: DropReason::DuplicateGhostKey,
                });
            }
            (false, UnclassifiedPolicy::Keep) => result.unclassified.push(param),
            (false, UnclassifiedPolicy::Drop) => {
                tracing::warn!("Dropping unclassified parameter `{}`", param.text);
                result.dropped.push(DroppedParameter {
                    parameter: param,
                    reason: DropReason::Unclassified,
                });
            }
        }
    }

    result
}
