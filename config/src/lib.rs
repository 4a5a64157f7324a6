//! Process-wide configuration for the notes core.
//!
//! The config is a YAML document parsed into a JSON value tree and kept behind
//! a global lock, so any part of the app can read (or override) a value by its
//! key path without having a config object passed around.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate quick_error;
extern crate serde;
extern crate serde_json;
extern crate serde_yaml;

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::ser::Serialize;
pub use serde_json::{Map, Value};

/// Used whenever the config file named by `NOTES_CONFIG_FILE` (or the default
/// `config.yaml`) does not exist.
static DEFAULT_CONFIG: &'static str = include_str!("../../config.yaml");

quick_error! {
    #[derive(Debug)]
    pub enum ConfigError {
        Io(err: io::Error) {
            cause(err)
            description("io error")
            display("config: io error: {}", err)
            from()
        }
        Yaml(err: serde_yaml::Error) {
            cause(err)
            description("yaml error")
            display("config: yaml error: {}", err)
            from()
        }
        Json(err: serde_json::Error) {
            cause(err)
            description("value error")
            display("config: value error: {}", err)
            from()
        }
        NotFound(key: String) {
            description("key not found")
            display("config: key not found: {}", key)
        }
        DeadEnd(key: String) {
            description("dead end")
            display("config: {} does not lead to an object", key)
        }
    }
}

pub type CResult<T> = Result<T, ConfigError>;

lazy_static! {
    static ref CONFIG: RwLock<Value> = {
        match load_config() {
            Ok(x) => RwLock::new(x),
            Err(e) => {
                println!("config: error loading config, using an empty one: {}", e);
                RwLock::new(Value::Object(Map::new()))
            }
        }
    };
}

/// load/parse our config file (or the built-in defaults)
fn load_config() -> CResult<Value> {
    let path_env = match env::var("NOTES_CONFIG_FILE") {
        Ok(x) => x,
        Err(_) => String::from("config.yaml"),
    };
    let path = Path::new(&path_env[..]);
    let contents = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::from(DEFAULT_CONFIG)
    };
    parse_yaml(&contents)
}

/// Parse a YAML string into a value tree
pub fn parse_yaml(contents: &str) -> CResult<Value> {
    let data: Value = serde_yaml::from_str(contents)?;
    Ok(data)
}

fn read_guard() -> RwLockReadGuard<'static, Value> {
    match (*CONFIG).read() {
        Ok(x) => x,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_guard() -> RwLockWriteGuard<'static, Value> {
    match (*CONFIG).write() {
        Ok(x) => x,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Walk a value tree by key path, returning the value at the end of it.
pub fn walk<'a>(keys: &[&str], data: &'a Value) -> CResult<&'a Value> {
    let mut cur = data;
    for key in keys {
        cur = match *cur {
            Value::Object(ref obj) => match obj.get(*key) {
                Some(x) => x,
                None => return Err(ConfigError::NotFound(keys.join("."))),
            },
            _ => return Err(ConfigError::DeadEnd(keys.join("."))),
        };
    }
    Ok(cur)
}

/// Get a value from our config
pub fn get<T: DeserializeOwned>(keys: &[&str]) -> CResult<T> {
    let guard = read_guard();
    let val = walk(keys, &guard)?;
    Ok(serde_json::from_value(val.clone())?)
}

/// Like `get()` but hands back `default` if the key is missing or has the
/// wrong type.
pub fn get_or<T: DeserializeOwned>(keys: &[&str], default: T) -> T {
    match get(keys) {
        Ok(x) => x,
        Err(_) => default,
    }
}

/// Set a value into the config, creating any missing objects along the path.
pub fn set<T: Serialize>(keys: &[&str], val: &T) -> CResult<()> {
    let (last, butlast) = match keys.split_last() {
        Some(x) => x,
        None => return Err(ConfigError::NotFound(String::from("<empty key path>"))),
    };
    let newval = serde_json::to_value(val)?;
    let mut guard = write_guard();
    let mut cur: &mut Value = &mut guard;
    for key in butlast {
        cur = match cur {
            Value::Object(obj) => obj
                .entry(String::from(*key))
                .or_insert_with(|| Value::Object(Map::new())),
            _ => return Err(ConfigError::DeadEnd(keys.join("."))),
        };
    }
    match cur {
        Value::Object(obj) => {
            obj.insert(String::from(*last), newval);
            Ok(())
        }
        _ => Err(ConfigError::DeadEnd(keys.join("."))),
    }
}

/// Overlay a (runtime) value tree onto the config. Objects are merged key by
/// key, anything else replaces what was there.
pub fn merge(overlay: &Value) {
    let mut guard = write_guard();
    merge_into(&mut guard, overlay);
}

fn merge_into(target: &mut Value, overlay: &Value) {
    match (target, overlay) {
        (&mut Value::Object(ref mut dest), &Value::Object(ref src)) => {
            for (key, val) in src {
                merge_into(dest.entry(key.clone()).or_insert(Value::Null), val);
            }
        }
        (target, overlay) => *target = overlay.clone(),
    }
}
