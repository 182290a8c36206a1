/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use thiserror::Error;

/// An error arising outside of element construction, which never fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to write XML")]
    Xml(#[from] xml::writer::Error),

    #[error("serialized XML was not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to read configuration")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration")]
    Config(#[from] toml::de::Error),

    #[error("unknown item kind `{0}`")]
    UnknownItemKind(String),

    #[error("invalid folder identifier: {0}")]
    InvalidFolderId(String),
}
