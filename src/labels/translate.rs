// src/labels/translate.rs
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

use super::normalize;
use super::tables::{self, MAPPINGS_VERSION};

/// Translation namespace of a column's in-field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    Weekday,
    DeliveryMode,
    OnlineDeliveryMode,
    Unloading,
    Equipment,
    PopulationGroup,
    EstablishmentType,
    WarehouseOwnership,
    WarehouseType,
    WeeklyFrequency,
    AgeBand,
}

impl FieldGroup {
    pub const ALL: [FieldGroup; 11] = [
        FieldGroup::Weekday,
        FieldGroup::DeliveryMode,
        FieldGroup::OnlineDeliveryMode,
        FieldGroup::Unloading,
        FieldGroup::Equipment,
        FieldGroup::PopulationGroup,
        FieldGroup::EstablishmentType,
        FieldGroup::WarehouseOwnership,
        FieldGroup::WarehouseType,
        FieldGroup::WeeklyFrequency,
        FieldGroup::AgeBand,
    ];

    fn source(self) -> &'static [(&'static str, &'static str)] {
        match self {
            FieldGroup::Weekday => tables::WEEKDAY,
            FieldGroup::DeliveryMode => tables::DELIVERY_MODE,
            FieldGroup::OnlineDeliveryMode => tables::ONLINE_DELIVERY_MODE,
            FieldGroup::Unloading => tables::UNLOADING,
            FieldGroup::Equipment => tables::EQUIPMENT,
            FieldGroup::PopulationGroup => tables::POPULATION_GROUP,
            FieldGroup::EstablishmentType => tables::ESTABLISHMENT_TYPE,
            FieldGroup::WarehouseOwnership => tables::WAREHOUSE_OWNERSHIP,
            FieldGroup::WarehouseType => tables::WAREHOUSE_TYPE,
            FieldGroup::WeeklyFrequency => tables::WEEKLY_FREQUENCY,
            FieldGroup::AgeBand => tables::AGE_BAND,
        }
    }

    /// Target that any answer mentioning "ning" (ninguno, ninguna de las
    /// anteriores, ningún elemento, ...) collapses to.
    pub fn none_target(self) -> Option<&'static str> {
        match self {
            FieldGroup::DeliveryMode | FieldGroup::OnlineDeliveryMode => Some("no_deliveries"),
            FieldGroup::Equipment
            | FieldGroup::PopulationGroup
            | FieldGroup::WarehouseOwnership => Some("none"),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldGroup::Weekday => "weekday",
            FieldGroup::DeliveryMode => "delivery_mode",
            FieldGroup::OnlineDeliveryMode => "online_delivery_mode",
            FieldGroup::Unloading => "unloading",
            FieldGroup::Equipment => "equipment",
            FieldGroup::PopulationGroup => "population_group",
            FieldGroup::EstablishmentType => "establishment_type",
            FieldGroup::WarehouseOwnership => "warehouse_ownership",
            FieldGroup::WarehouseType => "warehouse_type",
            FieldGroup::WeeklyFrequency => "weekly_frequency",
            FieldGroup::AgeBand => "age_band",
        }
    }
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized fragment marking a none-like answer.
const NONE_MARKER: &str = "ning";

/// Outcome of one lookup. Unmapped labels are handed back untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation<'a> {
    Mapped(&'a str),
    Unmapped(&'a str),
}

impl<'a> Translation<'a> {
    pub fn label(&self) -> &'a str {
        match self {
            Translation::Mapped(l) | Translation::Unmapped(l) => *l,
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Translation::Mapped(_))
    }
}

/// Immutable per-group vocabularies; loaded once, shared read-only.
#[derive(Debug)]
pub struct Translator {
    version: &'static str,
    groups: HashMap<FieldGroup, HashMap<String, &'static str>>,
}

static BUILTIN: Lazy<Translator> = Lazy::new(Translator::from_tables);

impl Translator {
    /// The process-wide translator built from the static tables.
    pub fn builtin() -> &'static Translator {
        &BUILTIN
    }

    fn from_tables() -> Self {
        let mut groups = HashMap::with_capacity(FieldGroup::ALL.len());
        for group in FieldGroup::ALL {
            let source = group.source();
            let mut map: HashMap<String, &'static str> = HashMap::with_capacity(source.len() * 2);
            for (from, to) in source {
                map.insert(normalize(from), *to);
            }
            // canonical targets translate to themselves
            for (_, to) in source {
                map.insert(normalize(to), *to);
            }
            groups.insert(group, map);
        }
        debug!(version = MAPPINGS_VERSION, groups = groups.len(), "label mappings loaded");
        Self {
            version: MAPPINGS_VERSION,
            groups,
        }
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Look `label` up in `group`. The label is normalized first, so raw and
    /// normalized spellings translate identically. Table entries win over the
    /// none rule of the group.
    pub fn translate<'a>(&'a self, group: FieldGroup, label: &'a str) -> Translation<'a> {
        let key = normalize(label);
        if let Some(target) = self.groups.get(&group).and_then(|m| m.get(&key)) {
            return Translation::Mapped(*target);
        }
        if key.contains(NONE_MARKER) {
            if let Some(target) = group.none_target() {
                return Translation::Mapped(target);
            }
        }
        trace!(group = %group, label, "unmapped label passes through");
        Translation::Unmapped(label)
    }

    /// Canonical vocabulary of `group`, sorted and deduplicated.
    pub fn targets(&self, group: FieldGroup) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = group.source().iter().map(|(_, to)| *to).collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_weekdays_case_and_accent_insensitive() {
        let t = Translator::builtin();
        assert_eq!(t.translate(FieldGroup::Weekday, "lunes"), Translation::Mapped("monday"));
        assert_eq!(t.translate(FieldGroup::Weekday, "MIÉRCOLES"), Translation::Mapped("wednesday"));
        assert_eq!(t.translate(FieldGroup::Weekday, "sabado").label(), "saturday");
    }

    #[test]
    fn unmapped_label_passes_through_unchanged() {
        let t = Translator::builtin();
        let out = t.translate(FieldGroup::Equipment, "grua portatil");
        assert!(!out.is_mapped());
        assert_eq!(out.label(), "grua portatil");
    }

    #[test]
    fn canonical_labels_are_fixed_points() {
        let t = Translator::builtin();
        for group in FieldGroup::ALL {
            for target in t.targets(group) {
                assert_eq!(normalize(target), target, "{group}: target not normalized");
                let key = normalize(target);
                let out = t.translate(group, &key);
                assert_eq!(out.label(), target, "{group}: {target} not idempotent");
            }
        }
    }

    #[test]
    fn field_groups_are_independent_namespaces() {
        let t = Translator::builtin();
        assert_eq!(t.translate(FieldGroup::DeliveryMode, "Furgón").label(), "van_car");
        assert_eq!(t.translate(FieldGroup::OnlineDeliveryMode, "Furgón").label(), "small_truck");
        assert!(!t.translate(FieldGroup::Weekday, "furgon").is_mapped());
    }

    #[test]
    fn none_like_answers_collapse() {
        let t = Translator::builtin();
        for raw in ["Ninguno", "ninguna", "No aplica", "NO"] {
            assert_eq!(t.translate(FieldGroup::Equipment, raw).label(), "none");
        }
        for raw in ["Ninguna de las anteriores", "ningún elemento", "NINGUNO APLICA"] {
            assert_eq!(t.translate(FieldGroup::Equipment, raw), Translation::Mapped("none"), "{raw}");
            assert_eq!(t.translate(FieldGroup::PopulationGroup, raw).label(), "none", "{raw}");
            assert_eq!(
                t.translate(FieldGroup::DeliveryMode, raw),
                Translation::Mapped("no_deliveries"),
                "{raw}"
            );
            assert_eq!(t.translate(FieldGroup::OnlineDeliveryMode, raw).label(), "no_deliveries");
        }
        // groups without a none target keep the answer as unmapped
        assert!(!t.translate(FieldGroup::Weekday, "ninguno").is_mapped());
        assert!(!t.translate(FieldGroup::WarehouseType, "ninguna de las anteriores").is_mapped());
    }

    #[test]
    fn none_targets_exist_in_their_tables() {
        let t = Translator::builtin();
        for group in FieldGroup::ALL {
            if let Some(target) = group.none_target() {
                assert!(t.targets(group).contains(&target), "{group}");
            }
        }
    }

    #[test]
    fn version_is_exposed() {
        assert_eq!(Translator::builtin().version(), MAPPINGS_VERSION);
    }
}
