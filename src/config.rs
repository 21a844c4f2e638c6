use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Returns the value of the named environment variable if it exists or panics.
pub fn get_variable(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("must define {} environment variable", name))
}

/// Returns the value of the named environment variable, or `default`
/// if it isn't set.
pub fn get_variable_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}

/// Where group records are kept.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreKind {
    /// Kept in memory; lost on exit.
    Memory,

    /// One file per key inside the given directory.
    File(PathBuf),
}

impl StoreKind {
    /// Reads `PLANNER_STORE` and, for file stores, `PLANNER_DATA_DIR`.
    pub fn from_env() -> Self {
        match get_variable_or("PLANNER_STORE", "file").as_str() {
            "memory" => StoreKind::Memory,
            "file" => StoreKind::File(PathBuf::from(get_variable("PLANNER_DATA_DIR"))),
            other => panic!("PLANNER_STORE must be `memory` or `file`, not {:?}", other),
        }
    }
}

/// Parses the named environment variable or panics.
pub fn parse_variable<T: FromStr>(name: &str) -> T {
    get_variable(name)
        .parse()
        .unwrap_or_else(|_| panic!("parse {} as {}", name, std::any::type_name::<T>()))
}
