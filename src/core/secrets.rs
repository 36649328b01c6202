use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SecretsConfig;
use crate::env::Env;
use crate::error::{Error, Result};

/// Logical keys for the three database secrets, in their fixed resolution
/// order: name, username, password.
pub const DB_NAME_KEY: &str = "database.secrets.pg_dbname";
pub const USER_NAME_KEY: &str = "database.secrets.pg_username";
pub const PASSWORD_KEY: &str = "database.secrets.pg_password";

/// Where a logical secret key resolves on disk. Derived, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretDescriptor {
    pub logical_key: String,
    /// Configured value stripped of leading/trailing path separators.
    pub namespace: String,
    pub full_path: PathBuf,
}

/// The three database secrets, fully populated or not constructed at all.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DbSecrets {
    pub db_name: String,
    pub db_name_file: String,
    pub user_name: String,
    pub user_name_file: String,
    pub password: String,
    pub password_file: String,
}

/// Resolves logical secret keys to files on disk and reads their contents.
///
/// Production secrets are mounted at fixed absolute paths managed outside
/// the repository; development secrets live in a predictable subtree of the
/// working copy. The mode decides which rule applies.
pub struct SecretResolver<'a> {
    env: &'a Env,
    config: &'a SecretsConfig,
}

impl<'a> SecretResolver<'a> {
    pub fn new(env: &'a Env, config: &'a SecretsConfig) -> Self {
        Self { env, config }
    }

    /// Compute where the backing file for a logical key lives.
    pub fn resolve(&self, logical_key: &str) -> Result<SecretDescriptor> {
        let configured = self.config.lookup(logical_key)?;
        let namespace = configured.trim_matches('/').to_string();

        let full_path = if self.env.is_production() {
            // Already-absolute mounted path; used as configured.
            PathBuf::from(configured)
        } else {
            self.env.project_root().join(&namespace)
        };

        Ok(SecretDescriptor {
            logical_key: logical_key.to_string(),
            namespace,
            full_path,
        })
    }

    /// Resolve and read all three secrets in fixed order.
    ///
    /// The first failure aborts the whole operation; either every field of
    /// `DbSecrets` is populated or nothing is exposed.
    pub fn resolve_all(&self) -> Result<DbSecrets> {
        let (db_name_file, db_name) = self.resolve_and_read(DB_NAME_KEY)?;
        let (user_name_file, user_name) = self.resolve_and_read(USER_NAME_KEY)?;
        let (password_file, password) = self.resolve_and_read(PASSWORD_KEY)?;

        Ok(DbSecrets {
            db_name,
            db_name_file,
            user_name,
            user_name_file,
            password,
            password_file,
        })
    }

    fn resolve_and_read(&self, logical_key: &str) -> Result<(String, String)> {
        let descriptor = self.resolve(logical_key)?;
        let value = read_secret(logical_key, &descriptor.full_path)?;
        Ok((descriptor.full_path.display().to_string(), value))
    }
}

/// Read a secret file and strip surrounding whitespace.
///
/// A path that resolves to a directory is a configuration error, not an
/// empty secret, and is reported as not found. Trailing newlines are common
/// in mounted secret files and are always stripped.
pub fn read_secret(logical_key: &str, path: &Path) -> Result<String> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {
            return Err(Error::secret_file_not_found(
                logical_key,
                path.display().to_string(),
            ));
        }
        Ok(_) => {}
        Err(_) => {
            return Err(Error::secret_file_not_found(
                logical_key,
                path.display().to_string(),
            ));
        }
    }

    let content = fs::read_to_string(path).map_err(|e| {
        Error::secret_read_failed(logical_key, path.display().to_string(), e.to_string())
    })?;

    Ok(content.trim().to_string())
}
