// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while building or driving a menu.

use coffer_contents::{ContentsError, MenuKind};

/// A rejected menu call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    /// The underlying store or pagination rejected the call.
    #[error(transparent)]
    Contents(#[from] ContentsError),
    /// The menu kind cannot do what was asked.
    #[error("{feature} is not supported by {kind:?} menus")]
    Unsupported {
        /// Kind of the menu.
        kind: MenuKind,
        /// What was asked for.
        feature: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contents_errors_convert() {
        let err: MenuError = ContentsError::UnknownPage("shop".into()).into();
        assert_eq!(err.to_string(), "no page with key `shop`");
    }

    #[test]
    fn unsupported_names_the_kind() {
        let err = MenuError::Unsupported {
            kind: MenuKind::Hopper,
            feature: "dynamic sizing",
        };
        assert_eq!(err.to_string(), "dynamic sizing is not supported by Hopper menus");
    }
}
