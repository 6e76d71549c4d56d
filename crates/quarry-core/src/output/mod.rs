//! Results serialization and artifact placement.

mod placer;
mod xml;

pub use placer::{MirrorEntry, OutputPlacer, OutputTarget, PlacementReport};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{QuarryError, QuarryResult};
use crate::types::ResultsTree;

/// Serialization format of results artifacts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ResultsFormat {
    #[default]
    Xml,
    Json,
}

impl ResultsFormat {
    /// File extension for artifacts in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ResultsFormat::Xml => "xml",
            ResultsFormat::Json => "json",
        }
    }

    /// Artifact file name, e.g. `results.xml`.
    pub fn file_name(&self) -> String {
        format!("results.{}", self.extension())
    }

    /// Serialize a tree. Depends only on the tree's current state.
    pub fn serialize(&self, tree: &ResultsTree) -> QuarryResult<String> {
        match self {
            ResultsFormat::Xml => xml::render(tree),
            ResultsFormat::Json => serde_json::to_string_pretty(tree)
                .map_err(|e| QuarryError::serialization(e.to_string())),
        }
    }
}
