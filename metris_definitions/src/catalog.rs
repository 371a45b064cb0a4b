use std::collections::BTreeMap;
use std::env;

use failure::{Error, ResultExt};

// All main errors that can happen from catalog lookups
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
enum CErrKind {
    #[fail(display = "PUBLIC_CLOUD_SPECS not specified")]
    MissingSpecs,

    #[fail(display = "provider '{}' not present in the catalog", _0)]
    UnknownProvider(String),

    #[fail(display = "vm type '{}' not present in the catalog for provider '{}'", _0, _1)]
    UnknownVmType(String, String),
}
type Result<T> = std::result::Result<T, Error>;

/// Feature tuple for one VM type.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Features {
    pub cpu_cores: i64,
    pub memory_gb: f64,
    pub storage_gb: i64,
    #[serde(default)]
    pub max_nics: i64,
}

#[derive(Deserialize, Clone, Debug, Default)]
struct Vm {
    features: Features,
}

#[derive(Deserialize, Clone, Debug, Default)]
struct Specs {
    vms: BTreeMap<String, Vm>,
}

#[derive(Deserialize, Clone, Debug, Default)]
struct Provider {
    specs: Specs,
}

/// Static lookup of {provider, vm type} to the VM's feature tuple.
///
/// Loaded once at startup from a JSON document and immutable afterwards.
/// VM types are indexed lower-cased; node labels carry mixed case.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct Catalog {
    data: BTreeMap<String, Provider>,
}

impl Catalog {
    /// Parse the catalog from its JSON document.
    pub fn from_json(raw: &str) -> Result<Catalog> {
        let mut catalog: Catalog = serde_json::from_str(raw)?;
        // index vm types lower-cased up front so lookups stay allocation-light
        for provider in catalog.data.values_mut() {
            let vms = std::mem::replace(&mut provider.specs.vms, BTreeMap::new());
            provider.specs.vms = vms
                .into_iter()
                .map(|(name, vm)| (name.to_lowercase(), vm))
                .collect();
        }
        debug!("loaded catalog for {} providers", catalog.data.len());
        Ok(catalog)
    }

    /// Load the catalog from the PUBLIC_CLOUD_SPECS environment variable.
    pub fn from_env() -> Result<Catalog> {
        let raw = env::var("PUBLIC_CLOUD_SPECS").context(CErrKind::MissingSpecs)?;
        Catalog::from_json(&raw)
    }

    /// Look up the feature tuple for a VM type under a provider.
    ///
    /// The VM type is lower-cased before indexing. A miss is an error; the
    /// scrape that asked treats it as a failed sample.
    pub fn lookup(&self, provider: &str, vm_type: &str) -> Result<&Features> {
        let prov = self
            .data
            .get(provider)
            .ok_or_else(|| CErrKind::UnknownProvider(provider.to_string()))?;
        let vm = prov
            .specs
            .vms
            .get(&vm_type.to_lowercase())
            .ok_or_else(|| CErrKind::UnknownVmType(vm_type.to_string(), provider.to_string()))?;
        Ok(&vm.features)
    }
}

#[cfg(test)]
mod tests {
    use super::Catalog;

    const SPECS: &str = r#"{
        "data": {
            "azure": {
                "specs": {
                    "vms": {
                        "Standard_D8_v3": {
                            "features": {
                                "cpu_cores": 8,
                                "memory_gb": 32.0,
                                "storage_gb": 200,
                                "max_nics": 4
                            }
                        }
                    }
                }
            }
        }
    }"#;

    #[test]
    fn lookup_normalises_vm_type_case() {
        let catalog = Catalog::from_json(SPECS).unwrap();
        let features = catalog.lookup("azure", "Standard_D8_v3").unwrap();
        assert_eq!(features.cpu_cores, 8);
        assert_eq!(features.memory_gb, 32.0);
        assert_eq!(features.storage_gb, 200);

        let lowered = catalog.lookup("azure", "standard_d8_v3").unwrap();
        assert_eq!(features, lowered);
    }

    #[test]
    fn lookup_misses_are_errors() {
        let catalog = Catalog::from_json(SPECS).unwrap();
        assert!(catalog.lookup("azure", "foo").is_err());
        assert!(catalog.lookup("aws", "standard_d8_v3").is_err());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(Catalog::from_json("{\"data\": 3}").is_err());
    }
}
