use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Explicit configuration for one harvest run.
///
/// Loaded once from a dotenv-style key-value file and passed into the
/// components that need it; nothing else in the crate reads ambient files.
/// Values missing from the file are prompted for interactively and persisted
/// back in plaintext - a recorded weakness of the credentials file, carried
/// as-is.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub glints_email: String,
    pub glints_password: String,
    pub project_id: String,
    pub dataset_id: String,
    pub key_json: String,
    env_path: PathBuf,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(env_path: P) -> Result<Self> {
        let env_path = env_path.as_ref().to_path_buf();

        let mut values: HashMap<String, String> = HashMap::new();
        if env_path.exists() {
            for item in dotenvy::from_path_iter(&env_path)
                .with_context(|| format!("failed to read {:?}", env_path))?
            {
                let (key, value) = item.context("malformed credentials file")?;
                values.insert(key, value);
            }
        } else {
            warn!("Credentials file {:?} not found; prompting for values.", env_path);
        }

        let mut prompted = false;
        let config = AppConfig {
            glints_email: take_or_prompt(&mut values, "GLINTS_EMAIL", "Glints email", &mut prompted)?,
            glints_password: take_or_prompt_secret(
                &mut values,
                "GLINTS_PASSWORD",
                "Glints password",
                &mut prompted,
            )?,
            project_id: take_or_prompt(&mut values, "PROJECT_ID", "BigQuery project id", &mut prompted)?,
            dataset_id: take_or_prompt(&mut values, "DATASET_ID", "BigQuery dataset id", &mut prompted)?,
            key_json: take_or_prompt(
                &mut values,
                "KEY_JSON",
                "Service-account key filename",
                &mut prompted,
            )?,
            env_path,
        };

        if prompted {
            config.persist()?;
            info!("Credentials persisted to {:?}.", config.env_path);
        }

        Ok(config)
    }

    /// The service-account key lives next to the credentials file.
    pub fn key_path(&self) -> PathBuf {
        match self.env_path.parent() {
            Some(dir) => dir.join(&self.key_json),
            None => PathBuf::from(&self.key_json),
        }
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.env_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {:?}", parent))?;
            }
        }

        let body = format!(
            "GLINTS_EMAIL={}\nGLINTS_PASSWORD={}\nPROJECT_ID={}\nDATASET_ID={}\nKEY_JSON={}\n",
            self.glints_email, self.glints_password, self.project_id, self.dataset_id, self.key_json
        );
        fs::write(&self.env_path, body)
            .with_context(|| format!("failed to write {:?}", self.env_path))
    }
}

fn take_or_prompt(
    values: &mut HashMap<String, String>,
    key: &str,
    prompt: &str,
    prompted: &mut bool,
) -> Result<String> {
    match values.remove(key).filter(|v| !v.is_empty()) {
        Some(value) => Ok(value),
        None => {
            *prompted = true;
            Input::<String>::new()
                .with_prompt(prompt)
                .interact_text()
                .with_context(|| format!("failed to read {}", key))
        }
    }
}

fn take_or_prompt_secret(
    values: &mut HashMap<String, String>,
    key: &str,
    prompt: &str,
    prompted: &mut bool,
) -> Result<String> {
    match values.remove(key).filter(|v| !v.is_empty()) {
        Some(value) => Ok(value),
        None => {
            *prompted = true;
            Password::new()
                .with_prompt(prompt)
                .interact()
                .with_context(|| format!("failed to read {}", key))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_a_complete_credentials_file_without_prompting() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join(".env");
        let mut file = fs::File::create(&env_path).unwrap();
        writeln!(file, "GLINTS_EMAIL=me@example.com").unwrap();
        writeln!(file, "GLINTS_PASSWORD=hunter2").unwrap();
        writeln!(file, "PROJECT_ID=my-project").unwrap();
        writeln!(file, "DATASET_ID=jobs").unwrap();
        writeln!(file, "KEY_JSON=service-account.json").unwrap();

        let config = AppConfig::load(&env_path).unwrap();
        assert_eq!(config.glints_email, "me@example.com");
        assert_eq!(config.glints_password, "hunter2");
        assert_eq!(config.project_id, "my-project");
        assert_eq!(config.dataset_id, "jobs");
        assert_eq!(config.key_json, "service-account.json");
    }

    #[test]
    fn key_path_is_resolved_next_to_the_credentials_file() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join(".env");
        let mut file = fs::File::create(&env_path).unwrap();
        writeln!(file, "GLINTS_EMAIL=a").unwrap();
        writeln!(file, "GLINTS_PASSWORD=b").unwrap();
        writeln!(file, "PROJECT_ID=c").unwrap();
        writeln!(file, "DATASET_ID=d").unwrap();
        writeln!(file, "KEY_JSON=key.json").unwrap();

        let config = AppConfig::load(&env_path).unwrap();
        assert_eq!(config.key_path(), dir.path().join("key.json"));
    }
}
