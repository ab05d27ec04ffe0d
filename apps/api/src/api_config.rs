use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use companyrating_core::AppError;
use tracing_subscriber::EnvFilter;

/// Where rating records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub store_backend: StoreBackend,
    pub api_host: String,
    pub api_port: u16,
    pub admin_user: String,
    pub admin_password: String,
    pub cookie_secure: bool,
    pub frontend_url: Option<String>,
    pub public_dir: PathBuf,
    pub upload_dir: PathBuf,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(env::args().nth(1).as_deref(), |name| env::var(name).ok())
    }

    fn from_lookup(
        command: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let migrate_only = command == Some("migrate");

        let store_backend = match lookup("STORE_BACKEND")
            .unwrap_or_else(|| "postgres".to_owned())
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" => StoreBackend::Postgres {
                database_url: required_non_empty(&lookup, "DATABASE_URL")?,
                max_connections: parsed_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "STORE_BACKEND must be either 'postgres' or 'memory', got '{other}'"
                )));
            }
        };

        if migrate_only && store_backend == StoreBackend::Memory {
            return Err(AppError::Validation(
                "the migrate command requires STORE_BACKEND=postgres".to_owned(),
            ));
        }

        let api_host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let api_port = match lookup("API_PORT").or_else(|| lookup("PORT")) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))?,
            None => 3000,
        };

        let admin_user = lookup("ADMIN_USER")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "admin".to_owned());
        let admin_password = required_non_empty(&lookup, "ADMIN_PASSWORD")?;

        let cookie_secure = lookup("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|| "false".to_owned())
            .eq_ignore_ascii_case("true");
        let frontend_url = lookup("FRONTEND_URL").filter(|value| !value.trim().is_empty());

        let public_dir = PathBuf::from(lookup("PUBLIC_DIR").unwrap_or_else(|| "public".to_owned()));
        let upload_dir = lookup("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| public_dir.join("uploads"));

        Ok(Self {
            migrate_only,
            store_backend,
            api_host,
            api_port,
            admin_user,
            admin_password,
            cookie_secure,
            frontend_url,
            public_dir,
            upload_dir,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, AppError> {
    let value = lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn parsed_or(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u32,
) -> Result<u32, AppError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|parsed| *parsed > 0)
            .ok_or_else(|| AppError::Validation(format!("{name} must be a positive integer"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use companyrating_core::AppError;

    use super::{ApiConfig, StoreBackend};

    fn load(command: Option<&str>, vars: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(command, |name| vars.get(name).cloned())
    }

    #[test]
    fn memory_backend_uses_defaults() {
        let config = load(
            None,
            &[("STORE_BACKEND", "memory"), ("ADMIN_PASSWORD", "secret")],
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.api_port, 3000);
        assert_eq!(config.admin_user, "admin");
        assert_eq!(config.upload_dir, PathBuf::from("public/uploads"));
        assert!(config.frontend_url.is_none());
        assert!(!config.cookie_secure);
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let result = load(None, &[("ADMIN_PASSWORD", "secret")]);
        assert!(matches!(result, Err(AppError::Validation(message)) if message.contains("DATABASE_URL")));

        let config = load(
            Some("migrate"),
            &[
                ("DATABASE_URL", "postgres://localhost/ratings"),
                ("DATABASE_MAX_CONNECTIONS", "4"),
                ("ADMIN_PASSWORD", "secret"),
                ("PORT", "8080"),
            ],
        )
        .unwrap_or_else(|_| unreachable!());

        assert!(config.migrate_only);
        assert_eq!(
            config.store_backend,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/ratings".to_owned(),
                max_connections: 4,
            }
        );
        assert_eq!(config.api_port, 8080);
    }

    #[test]
    fn admin_password_is_required() {
        let result = load(None, &[("STORE_BACKEND", "memory"), ("ADMIN_PASSWORD", " ")]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(
            load(
                None,
                &[("STORE_BACKEND", "mongo"), ("ADMIN_PASSWORD", "secret")]
            )
            .is_err()
        );
        assert!(
            load(
                None,
                &[
                    ("STORE_BACKEND", "memory"),
                    ("ADMIN_PASSWORD", "secret"),
                    ("API_PORT", "port")
                ]
            )
            .is_err()
        );
        assert!(
            load(
                Some("migrate"),
                &[("STORE_BACKEND", "memory"), ("ADMIN_PASSWORD", "secret")]
            )
            .is_err()
        );
    }
}
