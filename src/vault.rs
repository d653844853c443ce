use serde::de::DeserializeOwned;
use serde_json::{from_reader, from_value, Value};
use std::fs::File;
use std::path::PathBuf;

const CONFIG_FILE: &str = "config.json";

pub trait Vault {
    fn path(&self) -> &PathBuf;
    fn read_vault_values<T: DeserializeOwned>(&self, name: String) -> Result<T, String>;
}

/// A value that lives under a well-known key of the Vault's
/// configuration file.
pub trait VaultReadable: DeserializeOwned {
    const KEY: &'static str;

    fn from_vault<V: Vault>(vault: &V) -> Result<Self, String> {
        return vault.read_vault_values(Self::KEY.into());
    }
}

pub struct VaultImpl {
    pub path: PathBuf,
}

impl Vault for VaultImpl {
    fn path(&self) -> &PathBuf {
        return &self.path;
    }

    fn read_vault_values<T: DeserializeOwned>(&self, name: String) -> Result<T, String> {
        let config_path = self.path.join(CONFIG_FILE);
        let file = File::open(&config_path)
            .map_err(|why| format!("Could not open the Vault's configuration file: {}", why))?;

        let config: Value = from_reader(file)
            .map_err(|why| format!("Could not parse the Vault's configuration file: {}", why))?;

        let section = config
            .get(&name)
            .ok_or(format!(
                "No \"{}\" key in the Vault's configuration file",
                name
            ))?
            .clone();

        return from_value(section).map_err(|why| format!("Could not decode \"{}\": {}", name, why));
    }
}
