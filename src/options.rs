/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::{fs, path::Path};

use serde::Deserialize;

use crate::Error;

/// Where the entries of a sequence value are placed when building a
/// hierarchy from a mapping.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SequenceTarget {
    /// Each entry's fields are applied to the element being built, with no
    /// element created for the sequence's own key.
    #[default]
    Parent,

    /// One element named after the sequence's key is created and each
    /// entry's fields are applied to it.
    Wrapper,

    /// Each entry becomes its own element named after the sequence's key.
    Repeated,
}

/// How a scheduled `CalendarItem` field holding a bare scalar is written.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScalarFields {
    /// As an element whose text is the scalar.
    #[default]
    Text,

    /// Not at all.
    Skip,
}

/// Options controlling how structured data is turned into elements.
///
/// All fields are optional when loading from TOML:
///
/// ```toml
/// sequence_target = "wrapper"
/// scalar_fields = "text"
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
    pub sequence_target: SequenceTarget,
    pub scalar_fields: ScalarFields,
}

impl BuildOptions {
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        Ok(toml::from_str(s)?)
    }

    /// Reads options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;

        Self::from_toml_str(&contents)
    }
}
