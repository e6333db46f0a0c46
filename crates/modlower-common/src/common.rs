//! Common types shared between the binder, the emitter and the facade crate.

use serde::{Deserialize, Serialize};

/// ECMAScript language version of the emitted code.
///
/// Only the distinction between `ES3` and later targets changes the System
/// lowering: ES3 cannot use reserved words such as `default` as property
/// names, so import reads are emitted as element accesses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptTarget {
    ES3,
    ES5,
    ES2015,
    ES2016,
    ES2017,
    ES2018,
    ES2019,
    ES2020,
    ES2021,
    ES2022,
    #[default]
    ESNext,
}

impl ScriptTarget {
    /// Returns true when the target predates ES5 property-name rules.
    #[must_use]
    pub const fn is_es3(self) -> bool {
        matches!(self, Self::ES3)
    }
}

#[cfg(test)]
#[path = "../tests/common.rs"]
mod tests;
