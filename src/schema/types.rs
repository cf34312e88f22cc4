// src/schema/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::labels::FieldGroup;

/// What a survey column means, and therefore how its values are coerced.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Identifier,
    Text,
    TextEmail,
    TextPhone,
    Datetime,
    Count,
    Percent,
    Binary,
    Nominal,
    MultiNominal,
    OrdinalRank,
    OrdinalScale,
    OrdinalFrequency,
    OrdinalFloor,
    OrdinalAgeband,
    Continuous,
    Ignore,
}

impl SemanticType {
    pub fn is_ordinal(self) -> bool {
        matches!(
            self,
            SemanticType::OrdinalRank
                | SemanticType::OrdinalScale
                | SemanticType::OrdinalFrequency
                | SemanticType::OrdinalFloor
                | SemanticType::OrdinalAgeband
        )
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            SemanticType::Identifier
                | SemanticType::Count
                | SemanticType::Percent
                | SemanticType::Continuous
        )
    }

    /// Free text that identifies a respondent or carries no category
    /// structure (names, addresses, contact data, timestamps).
    pub fn is_free_text(self) -> bool {
        matches!(
            self,
            SemanticType::Text
                | SemanticType::TextEmail
                | SemanticType::TextPhone
                | SemanticType::Datetime
        )
    }

    /// Storage class implied by the semantic type.
    pub fn default_storage(self) -> StorageType {
        match self {
            SemanticType::Identifier
            | SemanticType::Count
            | SemanticType::Percent
            | SemanticType::Continuous
            | SemanticType::OrdinalScale
            | SemanticType::OrdinalRank
            | SemanticType::OrdinalFloor => StorageType::Numeric,
            SemanticType::Datetime => StorageType::Date,
            SemanticType::Ignore => StorageType::Skip,
            _ => StorageType::Text,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SemanticType::Identifier => "identifier",
            SemanticType::Text => "text",
            SemanticType::TextEmail => "text_email",
            SemanticType::TextPhone => "text_phone",
            SemanticType::Datetime => "datetime",
            SemanticType::Count => "count",
            SemanticType::Percent => "percent",
            SemanticType::Binary => "binary",
            SemanticType::Nominal => "nominal",
            SemanticType::MultiNominal => "multi_nominal",
            SemanticType::OrdinalRank => "ordinal_rank",
            SemanticType::OrdinalScale => "ordinal_scale",
            SemanticType::OrdinalFrequency => "ordinal_frequency",
            SemanticType::OrdinalFloor => "ordinal_floor",
            SemanticType::OrdinalAgeband => "ordinal_ageband",
            SemanticType::Continuous => "continuous",
            SemanticType::Ignore => "ignore",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    Numeric,
    Text,
    Date,
    Skip,
}

/// Explicit grouping of related columns.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ColumnTag {
    /// Fleet size per engine type; summed into `fleet_total`.
    VehicleCount,
    /// Free-text economic activity; split into `econ_main` / `econ_sub1` / `econ_sub2`.
    EconomicActivity,
}

/// One survey column: the raw question text and everything the pipeline
/// needs to type, translate and name it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash)]
pub struct ColumnDefinition {
    pub raw_name: String,
    pub canonical_label: String,
    pub semantic_type: SemanticType,
    pub storage_type: StorageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_group: Option<FieldGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ColumnTag>,
}

impl ColumnDefinition {
    pub fn new(raw_name: &str, canonical_label: &str, semantic_type: SemanticType) -> Self {
        Self {
            raw_name: raw_name.to_string(),
            canonical_label: canonical_label.to_string(),
            semantic_type,
            storage_type: semantic_type.default_storage(),
            field_group: None,
            tags: Vec::new(),
        }
    }

    pub fn group(mut self, group: FieldGroup) -> Self {
        self.field_group = Some(group);
        self
    }

    pub fn tag(mut self, tag: ColumnTag) -> Self {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    pub fn has_tag(&self, tag: ColumnTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Ignored columns never reach a derived dataset.
    pub fn is_ignored(&self) -> bool {
        self.semantic_type == SemanticType::Ignore || self.storage_type == StorageType::Skip
    }
}
