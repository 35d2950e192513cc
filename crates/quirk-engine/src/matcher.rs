//! Signature matching
//!
//! Selects the quirk whose signature matches a freshly joined device's raw
//! layout. Candidates are tried in declared order and the first match wins;
//! near-duplicate "Alt" variants of the same model rely on that ordering.
//! No match is a clean fallback to the raw layout, never an error.

use crate::model::{QuirkDefinition, RawEndpoint};
use std::collections::BTreeMap;

/// Strictness of the cluster-set comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Signature and raw cluster sets must be equal (as sets)
    #[default]
    Exact,
    /// The raw device may advertise clusters beyond the signature's
    Superset,
}

/// Find the first candidate whose signature matches the raw device
///
/// Pure function over its inputs. Endpoints the raw device reports beyond
/// those in a candidate's signature do not disqualify it. A later
/// candidate that would also match is logged once as an ambiguity and
/// ignored (declaration order is load-bearing).
#[must_use]
pub fn match_quirk<'a>(
    manufacturer: Option<&str>,
    model: Option<&str>,
    raw_endpoints: &BTreeMap<u8, RawEndpoint>,
    candidates: &'a [QuirkDefinition],
    policy: MatchPolicy,
) -> Option<&'a QuirkDefinition> {
    let mut matched: Option<&QuirkDefinition> = None;

    for candidate in candidates {
        if !signature_matches(candidate, manufacturer, model, raw_endpoints, policy) {
            continue;
        }
        match matched {
            None => matched = Some(candidate),
            Some(first) => {
                tracing::warn!(
                    "Ambiguous quirk match: '{}' also matches, keeping first match '{}'",
                    candidate.name,
                    first.name
                );
            }
        }
    }

    matched
}

/// Check one candidate's signature against the raw layout
fn signature_matches(
    candidate: &QuirkDefinition,
    manufacturer: Option<&str>,
    model: Option<&str>,
    raw_endpoints: &BTreeMap<u8, RawEndpoint>,
    policy: MatchPolicy,
) -> bool {
    // Identity gate: an empty model list matches any identity.
    if !candidate.signature.models.is_empty() {
        let identity_ok = candidate.signature.models.iter().any(|info| {
            manufacturer == Some(info.manufacturer.as_str()) && model == Some(info.model.as_str())
        });
        if !identity_ok {
            return false;
        }
    }

    // Every endpoint the signature names must be present and agree.
    candidate.signature.endpoints.iter().all(|(id, expected)| {
        let Some(raw) = raw_endpoints.get(id) else {
            return false;
        };
        if raw.profile_id != expected.profile_id || raw.device_type != expected.device_type {
            return false;
        }
        clusters_match(&raw.input_clusters, &expected.input_cluster_ids(), policy)
            && clusters_match(&raw.output_clusters, &expected.output_cluster_ids(), policy)
    })
}

fn clusters_match(
    raw: &[u16],
    expected: &std::collections::HashSet<u16>,
    policy: MatchPolicy,
) -> bool {
    let raw_set: std::collections::HashSet<u16> = raw.iter().copied().collect();
    match policy {
        MatchPolicy::Exact => raw_set == *expected,
        MatchPolicy::Superset => expected.is_subset(&raw_set),
    }
}
