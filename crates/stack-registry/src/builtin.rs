//! The compiled-in module catalog.
//!
//! Descriptors are embedded at build time from `builtin/*.toml` so the tool
//! works with zero configuration. Plugin directories and the
//! `STACKSMITH_MODULE_PATH` override can shadow or extend these.

use crate::source::StaticSource;

const REACT: &str = include_str!("../builtin/react.toml");
const VUE: &str = include_str!("../builtin/vue.toml");
const TAILWIND: &str = include_str!("../builtin/tailwind.toml");
const EXPRESS: &str = include_str!("../builtin/express.toml");
const JWT_AUTH: &str = include_str!("../builtin/jwt-auth.toml");
const REDUX: &str = include_str!("../builtin/redux.toml");
const ZUSTAND: &str = include_str!("../builtin/zustand.toml");
const PINIA: &str = include_str!("../builtin/pinia.toml");
const ESLINT: &str = include_str!("../builtin/eslint.toml");

const CATALOG: &[&str] = &[
    REACT, VUE, TAILWIND, EXPRESS, JWT_AUTH, REDUX, ZUSTAND, PINIA, ESLINT,
];

/// The built-in catalog as a discovery source.
pub fn builtin_source() -> StaticSource {
    StaticSource::from_toml_texts("builtin", CATALOG)
}
