// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;

/// Fatal errors while attaching a controller to a DOM element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// There is no global `window` (not running in a browser main thread).
    NoWindow,
    /// The window has no document.
    NoDocument,
    /// The selector is not valid CSS.
    InvalidSelector {
        /// The rejected selector.
        selector: String,
    },
    /// The selector matched no element.
    ElementNotFound {
        /// The selector that was queried.
        selector: String,
    },
    /// The selector matched an element that is not an `HTMLElement` (for example SVG).
    NotHtmlElement {
        /// The selector that was queried.
        selector: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => f.write_str("no global window is available"),
            Self::NoDocument => f.write_str("the window has no document"),
            Self::InvalidSelector { selector } => write!(f, "invalid selector {selector:?}"),
            Self::ElementNotFound { selector } => {
                write!(f, "zoom element not found for selector {selector:?}")
            }
            Self::NotHtmlElement { selector } => {
                write!(f, "element matched by {selector:?} is not an HTML element")
            }
        }
    }
}

impl std::error::Error for Error {}
