use crate::common::net::normalize_host;
use crate::config::{ConfigError, Target};
use std::collections::HashSet;

/// Ordered, validated list of probe targets. Hosts are unique.
#[derive(Clone, Debug)]
pub struct TargetCatalog {
    targets: Vec<Target>,
}

impl TargetCatalog {
    pub fn new(targets: Vec<Target>) -> Result<Self, ConfigError> {
        if targets.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let mut seen = HashSet::with_capacity(targets.len());
        let mut normalized = Vec::with_capacity(targets.len());
        for mut target in targets {
            let Some(host) = normalize_host(&target.host) else {
                return Err(ConfigError::InvalidHost {
                    label: target.label,
                    host: target.host,
                });
            };
            if !seen.insert(host.clone()) {
                return Err(ConfigError::DuplicateHost { host });
            }
            target.host = host;
            normalized.push(target);
        }

        Ok(Self {
            targets: normalized,
        })
    }

    /// DigitalOcean Spaces endpoints, grouped by geography.
    pub fn builtin() -> Self {
        let targets = [
            ("North America", "US East", "New York (NYC3)", "nyc3.digitaloceanspaces.com"),
            ("North America", "US West", "San Francisco (SFO2)", "sfo2.digitaloceanspaces.com"),
            ("North America", "US West", "San Francisco (SFO3)", "sfo3.digitaloceanspaces.com"),
            ("North America", "Canada East", "Toronto (TOR1)", "tor1.digitaloceanspaces.com"),
            ("Europe", "Netherlands North", "Amsterdam (AMS3)", "ams3.digitaloceanspaces.com"),
            ("Europe", "UK South", "London (LON1)", "lon1.digitaloceanspaces.com"),
            ("Europe", "Germany Central", "Frankfurt (FRA1)", "fra1.digitaloceanspaces.com"),
            ("Asia Pacific", "Southeast Asia", "Singapore (SGP1)", "sgp1.digitaloceanspaces.com"),
            ("Asia Pacific", "South Asia", "Bangalore (BLR1)", "blr1.digitaloceanspaces.com"),
        ]
        .into_iter()
        .map(|(region, subregion, label, host)| Target::new(region, subregion, label, host))
        .collect();

        Self { targets }
    }

    /// Parses a JSON array of `{region, subregion, label, host}` objects.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let targets: Vec<Target> = serde_json::from_str(input)?;
        Self::new(targets)
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
