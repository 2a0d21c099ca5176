use super::EnvError;
use std::collections::HashMap;
use std::env;
use std::ffi::OsString;

/// The shell's private copy of the environment, taken at startup.
///
/// Plain `set` only touches the snapshot. `export` also writes the variable
/// into the real process environment so spawned children see it.
#[derive(Clone, Debug, Default)]
pub struct EnvVarManager {
    vars: HashMap<Box<str>, Box<str>>,
}

impl EnvVarManager {
    pub fn from_process() -> Self {
        let vars = env::vars_os().map(|(k, v)| (lossy(k), lossy(v))).collect();

        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().into(), v.as_ref().into()))
            .collect();

        Self { vars }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(|value| value.as_ref())
    }

    /// Returns the value only if the variable is set and non-empty.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        validate(name, value)?;
        self.vars.insert(name.into(), value.into());
        Ok(())
    }

    pub fn export(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        self.set(name, value)?;
        env::set_var(name, value);
        Ok(())
    }
}

fn lossy(s: OsString) -> Box<str> {
    s.to_string_lossy().into()
}

fn validate(name: &str, value: &str) -> Result<(), EnvError> {
    if name.is_empty() || name.contains(['=', '\0']) {
        return Err(EnvError::InvalidName(name.to_string()));
    }
    if value.contains('\0') {
        return Err(EnvError::InvalidValue(name.to_string()));
    }
    Ok(())
}
