use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the RAAS planner library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The selected layer does not define any lanes.
    #[error("layer contains no lanes")]
    NoLanes,

    /// A lane has no depth-0 entry, so its BLUFOR main base is unknown.
    #[error("lane {lane} has no depth 0 entry (BLUFOR main base)")]
    MissingStartDepth { lane: String },

    /// A lane has no entry at its maximum depth, so its OPFOR main base is unknown.
    #[error("lane {lane} has no depth {depth} entry (OPFOR main base)")]
    MissingEndDepth { lane: String, depth: u32 },

    /// Lane depths must run `0..=max` without gaps.
    #[error("lane {lane} skips depth {missing}; depths must be contiguous")]
    NonContiguousDepths { lane: String, missing: u32 },

    /// A lane must hold at least the two main bases.
    #[error("lane {lane} only has depth 0; at least two main bases are required")]
    LaneTooShort { lane: String },

    /// A depth that anchors a main base lists several points.
    #[error("lane {lane} lists {count} points at main base depth {depth}")]
    AmbiguousMainBase {
        lane: String,
        depth: u32,
        count: usize,
    },

    /// Lanes disagree about which point is a given main base.
    #[error("lane {lane} places the {side} main base at {found}, other lanes use {expected}")]
    ConflictingMainBase {
        lane: String,
        side: &'static str,
        expected: String,
        found: String,
    },

    /// Raised when a point name could not be found in the current graph.
    #[error("unknown capture point: {name}{}", format_suggestions(.suggestions))]
    UnknownPoint {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a map name is not present in the layer data.
    #[error("unknown map: {name}{}", format_suggestions(.suggestions))]
    UnknownMap {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a layer name is not present for the selected map.
    #[error("unknown layer {name} on map {map}{}", format_suggestions(.suggestions))]
    UnknownLayer {
        map: String,
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a layer data file could not be read.
    #[error("failed to read layer data from {path}: {source}")]
    LayerDataRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

/// Rank `candidates` by similarity to `query` and keep the best `limit`
/// matches that clear a minimum similarity threshold.
pub(crate) fn fuzzy_matches<'a, I>(query: &str, candidates: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    const MIN_SIMILARITY: f64 = 0.7;

    let needle = query.to_lowercase();
    let mut scored: Vec<(f64, &str)> = candidates
        .into_iter()
        .map(|candidate| {
            let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
            (score, candidate)
        })
        .filter(|(score, _)| *score >= MIN_SIMILARITY)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.to_string())
        .collect()
}
