use std::io::Write;

use tracing::Level;

use crate::{
    hash::fnv1a,
    hashmap::OpenAddressingMap,
    options::MapOptions,
    shell::{self, MapShell, ShellError},
};

pub type StringMap = OpenAddressingMap<String, String, fn(&String) -> i64>;

fn string_map(options: &MapOptions) -> StringMap {
    let hasher: fn(&String) -> i64 = fnv1a::<String>;
    OpenAddressingMap::from_options(options, hasher)
}

/// Drives one string to string map from shell commands, writing replies to `out`.
pub struct Session<W> {
    map: StringMap,
    options: MapOptions,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(options: MapOptions, out: W) -> Session<W> {
        Session {
            map: string_map(&options),
            options,
            out,
        }
    }

    pub fn map(&self) -> &StringMap {
        &self.map
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn report(&mut self, e: &dyn std::error::Error) -> Result<(), ShellError> {
        tracing::event!(Level::DEBUG, "error" = %e);
        shell::error(&mut self.out, e)?;
        Ok(())
    }
}

impl<W: Write> MapShell for Session<W> {
    fn insert(&mut self, key: &str, value: &str) -> Result<(), ShellError> {
        match self.map.insert(key.to_string(), value.to_string()) {
            Ok(()) => shell::ok(&mut self.out)?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn get(&mut self, key: &str) -> Result<(), ShellError> {
        match self.map.get(&key.to_string()) {
            Ok(v) => shell::value(&mut self.out, v)?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn assign(&mut self, key: &str, value: &str) -> Result<(), ShellError> {
        match self.map.assign(&key.to_string(), value.to_string()) {
            Ok(()) => shell::ok(&mut self.out)?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ShellError> {
        match self.map.remove(&key.to_string()) {
            Ok(v) => shell::value(&mut self.out, &v)?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn contains(&mut self, key: &str) -> Result<(), ShellError> {
        let found = self.map.contains_key(&key.to_string());
        shell::boolean(&mut self.out, found)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ShellError> {
        self.map.clear();
        shell::ok(&mut self.out)?;
        Ok(())
    }

    fn len(&mut self) -> Result<(), ShellError> {
        shell::len(&mut self.out, self.map.len())?;
        Ok(())
    }

    fn stats(&mut self) -> Result<(), ShellError> {
        shell::stats(&mut self.out, &self.map.stats(), self.map.load_factor())?;
        Ok(())
    }

    fn options(&mut self) -> Result<(), ShellError> {
        for descriptor in MapOptions::descriptors() {
            shell::option(&mut self.out, &descriptor)?;
        }
        Ok(())
    }

    fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ShellError> {
        let mut updated = self.options.clone();
        if let Err(e) = updated.set_option(name, value) {
            return self.report(&e);
        }
        tracing::event!(Level::INFO, "capacity" = updated.capacity, "Rebuilding map");
        self.map = string_map(&updated);
        self.options = updated;
        shell::ok(&mut self.out)?;
        Ok(())
    }

    fn quit(&mut self) -> Result<(), ShellError> {
        Err(ShellError::Quit)
    }
}
