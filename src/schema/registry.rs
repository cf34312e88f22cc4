// src/schema/registry.rs
use once_cell::sync::Lazy;
use std::{collections::HashMap, fs, io, path::Path, path::PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::survey;
use super::types::{ColumnDefinition, ColumnTag};
use crate::labels::normalize;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("column `{raw_name}` is defined more than once")]
    DuplicateColumn { raw_name: String },
    #[error("canonical label `{label}` is used by more than one column")]
    DuplicateLabel { label: String },
    #[error("column `{raw_name}` is not in the dictionary")]
    UnknownColumn { raw_name: String },
    #[error("reading dictionary {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing dictionary {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Immutable, ordered table of column definitions.
///
/// Raw names are matched in normalized form, so capitalisation, accents and
/// stray whitespace in export headers do not matter.
#[derive(Debug, Clone)]
pub struct Registry {
    defs: Vec<ColumnDefinition>,
    by_raw: HashMap<String, usize>,
    by_label: HashMap<String, usize>,
}

static BUILTIN: Lazy<Registry> = Lazy::new(|| {
    Registry::new(survey::columns()).expect("built-in survey dictionary must be consistent")
});

impl Registry {
    /// Build a registry, rejecting colliding raw names or canonical labels.
    pub fn new(defs: Vec<ColumnDefinition>) -> Result<Self, RegistryError> {
        let mut by_raw = HashMap::with_capacity(defs.len());
        let mut by_label = HashMap::with_capacity(defs.len());

        for (idx, def) in defs.iter().enumerate() {
            if by_raw.insert(normalize(&def.raw_name), idx).is_some() {
                return Err(RegistryError::DuplicateColumn {
                    raw_name: def.raw_name.clone(),
                });
            }
            if by_label.insert(def.canonical_label.clone(), idx).is_some() {
                return Err(RegistryError::DuplicateLabel {
                    label: def.canonical_label.clone(),
                });
            }
        }

        debug!(columns = defs.len(), "dictionary registry built");
        Ok(Self {
            defs,
            by_raw,
            by_label,
        })
    }

    /// The survey dictionary compiled into the crate.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    /// Load a dictionary from a JSON array of column definitions.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let defs: Vec<ColumnDefinition> =
            serde_json::from_reader(io::BufReader::new(file)).map_err(|source| {
                RegistryError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        let registry = Self::new(defs)?;
        info!(path = %path.display(), columns = registry.len(), "loaded dictionary");
        Ok(registry)
    }

    pub fn lookup(&self, raw_name: &str) -> Result<&ColumnDefinition, RegistryError> {
        self.position(raw_name)
            .map(|idx| &self.defs[idx])
            .ok_or_else(|| RegistryError::UnknownColumn {
                raw_name: raw_name.to_string(),
            })
    }

    /// Declaration-order index of `raw_name`.
    pub fn position(&self, raw_name: &str) -> Option<usize> {
        self.by_raw.get(&normalize(raw_name)).copied()
    }

    /// Every definition, in declaration order.
    pub fn all(&self) -> &[ColumnDefinition] {
        &self.defs
    }

    /// Definitions that reach the derived datasets, in declaration order.
    pub fn active(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.defs.iter().filter(|d| !d.is_ignored())
    }

    pub fn by_canonical(&self, label: &str) -> Option<&ColumnDefinition> {
        self.by_label.get(label).map(|idx| &self.defs[*idx])
    }

    pub fn tagged(&self, tag: ColumnTag) -> impl Iterator<Item = &ColumnDefinition> {
        self.defs.iter().filter(move |d| d.has_tag(tag))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SemanticType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_dictionary_is_consistent() {
        let reg = Registry::builtin();
        assert!(reg.len() > 50);
        assert_eq!(reg.all()[0].canonical_label, "id");
        assert!(reg.by_canonical("supply_day").is_some());
    }

    #[test]
    fn lookup_ignores_case_accents_and_padding() {
        let reg = Registry::builtin();
        let def = reg.lookup("  MARCA TEMPORAL ").unwrap();
        assert_eq!(def.canonical_label, "timestamp");
        let def = reg.lookup("correo electronico").unwrap();
        assert_eq!(def.semantic_type, SemanticType::TextEmail);
    }

    #[test]
    fn lookup_of_unknown_column_fails() {
        let err = Registry::builtin().lookup("columna inventada").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownColumn { .. }));
    }

    #[test]
    fn duplicate_raw_names_are_rejected() {
        let defs = vec![
            ColumnDefinition::new("Pregunta A", "a", SemanticType::Text),
            ColumnDefinition::new("pregunta á ", "b", SemanticType::Text),
        ];
        let err = Registry::new(defs).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateColumn { .. }));
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let defs = vec![
            ColumnDefinition::new("Pregunta A", "same", SemanticType::Text),
            ColumnDefinition::new("Pregunta B", "same", SemanticType::Count),
        ];
        assert!(matches!(
            Registry::new(defs),
            Err(RegistryError::DuplicateLabel { .. })
        ));
    }

    #[test]
    fn vehicle_counts_are_declared_not_inferred() {
        let labels: Vec<&str> = Registry::builtin()
            .tagged(ColumnTag::VehicleCount)
            .map(|d| d.canonical_label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec!["vehicles_diesel", "vehicles_gasoline", "vehicles_cng", "vehicles_electric"]
        );
    }

    #[test]
    fn loads_from_json() -> anyhow::Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(
            tmp,
            r#"[
                {{"raw_name": "id", "canonical_label": "id", "semantic_type": "identifier", "storage_type": "numeric"}},
                {{"raw_name": "Días", "canonical_label": "days", "semantic_type": "multi_nominal", "storage_type": "text", "field_group": "weekday"}}
            ]"#
        )?;
        let reg = Registry::from_json_file(tmp.path())?;
        assert_eq!(reg.len(), 2);
        assert_eq!(
            reg.lookup("dias")?.field_group,
            Some(crate::labels::FieldGroup::Weekday)
        );
        Ok(())
    }
}
