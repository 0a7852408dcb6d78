use crate::error::SeedError;

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value; unset or blank means [`LogFormat::Pretty`].
    pub fn parse(raw: Option<&str>) -> Result<Self, SeedError> {
        match raw.map(str::trim) {
            None | Some("") | Some("pretty") => Ok(LogFormat::Pretty),
            Some("json") => Ok(LogFormat::Json),
            Some(other) => Err(SeedError::Config(format!(
                "LOG_FORMAT must be 'pretty' or 'json', got '{other}'"
            ))),
        }
    }
}

/// Seeder configuration loaded from environment variables.
///
/// CLI flags are applied on top by the binary.
#[derive(Debug, Clone)]
pub struct SeederConfig {
    /// PostgreSQL connection string (`DATABASE_URL`, required).
    pub database_url: String,
    /// Pool size (default: `5`).
    pub max_connections: u32,
    /// Apply embedded migrations before seeding (default: `true`).
    pub run_migrations: bool,
    /// Include the opt-in tenant seeders (default: `false`).
    pub demo: bool,
    /// Tenant slug the location seeder writes for (default: `demo-events`).
    pub locations_tenant: String,
    /// Tenant slug the knowledge base is written for (default: `demo-events`).
    pub knowledge_base_tenant: String,
    /// Tenant owning the gamification catalog (default: unset, meaning
    /// platform-wide).
    pub gamification_tenant: Option<String>,
}

pub const DEFAULT_LOCATIONS_TENANT: &str = "demo-events";

impl SeederConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Default        |
    /// |----------------------------|----------------|
    /// | `DATABASE_URL`             | required       |
    /// | `DB_MAX_CONNECTIONS`       | `5`            |
    /// | `SEED_RUN_MIGRATIONS`      | `true`         |
    /// | `SEED_DEMO`                | `false`        |
    /// | `SEED_LOCATIONS_TENANT`    | `demo-events`  |
    /// | `SEED_KB_TENANT`           | `demo-events`  |
    /// | `SEED_GAMIFICATION_TENANT` | unset (global) |
    ///
    /// `LOG_FORMAT` is read by the binary before this runs, since `list` and
    /// `check` log without a database.
    pub fn from_env() -> Result<Self, SeedError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SeedError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| SeedError::Config("DATABASE_URL must be set".into()))?;

        let max_connections: u32 = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                SeedError::Config(format!("DB_MAX_CONNECTIONS must be a positive integer, got '{raw}'"))
            })?,
            None => 5,
        };
        if max_connections == 0 {
            return Err(SeedError::Config("DB_MAX_CONNECTIONS must be at least 1".into()));
        }

        let run_migrations = parse_flag("SEED_RUN_MIGRATIONS", lookup("SEED_RUN_MIGRATIONS"), true)?;
        let demo = parse_flag("SEED_DEMO", lookup("SEED_DEMO"), false)?;

        let locations_tenant = non_blank(lookup("SEED_LOCATIONS_TENANT"))
            .unwrap_or_else(|| DEFAULT_LOCATIONS_TENANT.into());
        let knowledge_base_tenant = non_blank(lookup("SEED_KB_TENANT"))
            .unwrap_or_else(|| DEFAULT_LOCATIONS_TENANT.into());
        let gamification_tenant = non_blank(lookup("SEED_GAMIFICATION_TENANT"));

        Ok(Self {
            database_url,
            max_connections,
            run_migrations,
            demo,
            locations_tenant,
            knowledge_base_tenant,
            gamification_tenant,
        })
    }
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_flag(name: &str, raw: Option<String>, default: bool) -> Result<bool, SeedError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SeedError::Config(format!(
            "{name} must be a boolean, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<SeederConfig, SeedError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SeederConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/tixello")]).unwrap();
        assert_eq!(config.max_connections, 5);
        assert!(config.run_migrations);
        assert!(!config.demo);
        assert_eq!(config.locations_tenant, "demo-events");
        assert_eq!(config.knowledge_base_tenant, "demo-events");
        assert_eq!(config.gamification_tenant, None);
    }

    #[test]
    fn database_url_is_required() {
        assert_matches!(load(&[]), Err(SeedError::Config(msg)) if msg.contains("DATABASE_URL"));
        assert_matches!(load(&[("DATABASE_URL", "  ")]), Err(SeedError::Config(_)));
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/seed"),
            ("DB_MAX_CONNECTIONS", "2"),
            ("SEED_RUN_MIGRATIONS", "no"),
            ("SEED_DEMO", "TRUE"),
            ("SEED_LOCATIONS_TENANT", "ambilet"),
            ("SEED_KB_TENANT", "ambilet"),
            ("SEED_GAMIFICATION_TENANT", " "),
        ])
        .unwrap();
        assert_eq!(config.max_connections, 2);
        assert!(!config.run_migrations);
        assert!(config.demo);
        assert_eq!(config.locations_tenant, "ambilet");
        assert_eq!(config.knowledge_base_tenant, "ambilet");
        assert_eq!(config.gamification_tenant, None);
    }

    #[test]
    fn rejects_malformed_values() {
        let url = ("DATABASE_URL", "postgres://db/seed");
        assert_matches!(load(&[url, ("DB_MAX_CONNECTIONS", "many")]), Err(SeedError::Config(_)));
        assert_matches!(load(&[url, ("DB_MAX_CONNECTIONS", "0")]), Err(SeedError::Config(_)));
        assert_matches!(load(&[url, ("SEED_DEMO", "maybe")]), Err(SeedError::Config(_)));
    }

    #[test]
    fn log_format_is_not_part_of_seeder_config() {
        // A bad LOG_FORMAT must not stop config loading; the binary owns it.
        let config = load(&[("DATABASE_URL", "postgres://db/seed"), ("LOG_FORMAT", "xml")]);
        assert!(config.is_ok());
    }

    #[test]
    fn log_format_values() {
        assert_eq!(LogFormat::parse(None).unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(Some(" ")).unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(Some("json")).unwrap(), LogFormat::Json);
        assert_matches!(LogFormat::parse(Some("xml")), Err(SeedError::Config(_)));
    }
}
