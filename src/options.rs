use std::{env, fmt};

use crate::{error::OptionError, hashmap::DEFAULT_CAPACITY};

pub const CAPACITY: &str = "Capacity";
pub const CAPACITY_VAR: &str = "PROBEMAP_CAPACITY";

const MIN_CAPACITY: i64 = 1;

pub enum OptionType {
    Spin,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OptionType::Spin => "spin",
            }
        )
    }
}

/// Describes one setting the shell accepts through `setoption`.
pub struct MapOptionDescriptor {
    pub name: &'static str,
    pub ty: OptionType,
    pub default: Option<String>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl fmt::Display for MapOptionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "option name {} type {}", self.name, self.ty)?;
        if let Some(default) = &self.default {
            write!(f, " default {default}")?;
        }
        if let Some(min) = self.min {
            write!(f, " min {min}")?;
        }
        if let Some(max) = self.max {
            write!(f, " max {max}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapOptions {
    pub capacity: usize,
}

impl Default for MapOptions {
    fn default() -> MapOptions {
        MapOptions {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl MapOptions {
    pub fn descriptors() -> Vec<MapOptionDescriptor> {
        vec![MapOptionDescriptor {
            name: CAPACITY,
            ty: OptionType::Spin,
            default: Some(DEFAULT_CAPACITY.to_string()),
            min: Some(MIN_CAPACITY),
            max: None,
        }]
    }

    /// Reads `PROBEMAP_CAPACITY`, keeping the default when it is unset.
    pub fn from_env() -> Result<MapOptions, OptionError> {
        MapOptions::from_capacity_var(env::var(CAPACITY_VAR).ok().as_deref())
    }

    fn from_capacity_var(value: Option<&str>) -> Result<MapOptions, OptionError> {
        let mut options = MapOptions::default();
        if let Some(value) = value {
            options.set_option(CAPACITY, Some(value))?;
        }
        Ok(options)
    }

    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), OptionError> {
        match name {
            CAPACITY => {
                self.capacity = parse_spin(name, value, MIN_CAPACITY)?;
                Ok(())
            }
            _ => Err(OptionError::Unknown(name.to_string())),
        }
    }
}

fn parse_spin(name: &str, value: Option<&str>, min: i64) -> Result<usize, OptionError> {
    let value = value.ok_or_else(|| OptionError::MissingValue(name.to_string()))?;
    let parsed: i64 = value.trim().parse().map_err(|_| OptionError::Invalid {
        name: name.to_string(),
        value: value.to_string(),
    })?;
    if parsed < min {
        return Err(OptionError::OutOfRange {
            name: name.to_string(),
            value: parsed,
            min,
        });
    }
    usize::try_from(parsed).map_err(|_| OptionError::Invalid {
        name: name.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity() {
        assert_eq!(MapOptions::default().capacity, 1000);
    }

    #[test]
    fn set_capacity() {
        let mut options = MapOptions::default();
        assert_eq!(options.set_option("Capacity", Some("16")), Ok(()));
        assert_eq!(options.capacity, 16);
    }

    #[test]
    fn rejects_bad_values() {
        let mut options = MapOptions::default();
        assert_eq!(
            options.set_option("Capacity", Some("0")),
            Err(OptionError::OutOfRange {
                name: String::from("Capacity"),
                value: 0,
                min: 1,
            })
        );
        assert_eq!(
            options.set_option("Capacity", Some("lots")),
            Err(OptionError::Invalid {
                name: String::from("Capacity"),
                value: String::from("lots"),
            })
        );
        assert_eq!(
            options.set_option("Capacity", None),
            Err(OptionError::MissingValue(String::from("Capacity")))
        );
        assert_eq!(
            options.set_option("Threads", Some("4")),
            Err(OptionError::Unknown(String::from("Threads")))
        );
        assert_eq!(options.capacity, 1000);
    }

    #[test]
    fn capacity_from_var() {
        assert_eq!(MapOptions::from_capacity_var(None), Ok(MapOptions::default()));
        assert_eq!(
            MapOptions::from_capacity_var(Some("64")).map(|o| o.capacity),
            Ok(64)
        );
        assert!(MapOptions::from_capacity_var(Some("-3")).is_err());
    }

    #[test]
    fn descriptor_line() {
        let line = MapOptions::descriptors()[0].to_string();
        assert_eq!(line, "option name Capacity type spin default 1000 min 1");
    }
}
