use crate::models::customer::{CustomerConfig, ResourceConfig, ResourceRequirements};
use clap::ValueEnum;
use std::fmt;
use strum_macros::{EnumString, IntoStaticStr};

/// Deployment environments with a predefined instance configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", Into::<&str>::into(self))
    }
}

fn requirements(cpu: &str, memory: &str) -> ResourceRequirements {
    ResourceRequirements {
        cpu: cpu.to_string(),
        memory: memory.to_string(),
    }
}

/// Returns the instance configuration that belongs to an environment.
///
/// | environment | requests     | limits      | HA, backup, monitoring |
/// |-------------|--------------|-------------|------------------------|
/// | development | 100m / 256Mi | 500m / 1Gi  | off                    |
/// | staging     | 250m / 512Mi | 1000m / 2Gi | on                     |
/// | production  | 500m / 1Gi   | 2000m / 4Gi | on                     |
pub fn environment_config(environment: Environment) -> CustomerConfig {
    let (requests, limits, production_grade) = match environment {
        Environment::Development => (
            requirements("100m", "256Mi"),
            requirements("500m", "1Gi"),
            false,
        ),
        Environment::Staging => (
            requirements("250m", "512Mi"),
            requirements("1000m", "2Gi"),
            true,
        ),
        Environment::Production => (
            requirements("500m", "1Gi"),
            requirements("2000m", "4Gi"),
            true,
        ),
    };

    CustomerConfig {
        resources: ResourceConfig { requests, limits },
        high_availability: production_grade,
        backup_enabled: production_grade,
        monitoring_enabled: production_grade,
        ..Default::default()
    }
}
