// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element configuration: bounds, dragging, container origin, and zoom limits.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// Attribute enabling bounds constraints (`fit_to_bounds`, `zoom_to_fit`, drag clamping).
pub const BOUNDS_ATTRIBUTE: &str = "data-bounds";
/// Attribute enabling single-pointer dragging.
pub const DRAGGABLE_ATTRIBUTE: &str = "data-draggable";
/// Attribute selecting the offset parent as the container instead of the window.
pub const ORIGIN_PARENT_ATTRIBUTE: &str = "data-origin-parent";
/// Attribute holding the minimum zoom limit (a percentage or `fit`).
pub const MIN_ZOOM_ATTRIBUTE: &str = "data-min-zoom";
/// Attribute holding the maximum zoom limit (a percentage or `fit`).
pub const MAX_ZOOM_ATTRIBUTE: &str = "data-max-zoom";

/// Default minimum zoom, in percent.
pub const DEFAULT_MIN_ZOOM: f64 = 10.0;
/// Default maximum zoom, in percent.
pub const DEFAULT_MAX_ZOOM: f64 = 4000.0;

/// Which container the element is positioned and fitted against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Origin {
    /// The browser viewport.
    #[default]
    Window,
    /// The element's offset parent (nearest positioned ancestor).
    Parent,
}

/// A minimum or maximum zoom limit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomLimit {
    /// A fixed zoom percentage.
    Percent(f64),
    /// Stop once the element exactly fits its container.
    Fit,
}

impl ZoomLimit {
    /// Parses an optional attribute value, falling back to `default` when absent.
    pub fn from_attribute(value: Option<&str>, default: f64) -> Result<Self, ParseZoomLimitError> {
        match value {
            Some(value) => value.parse(),
            None => Ok(Self::Percent(default)),
        }
    }
}

impl FromStr for ZoomLimit {
    type Err = ParseZoomLimitError;

    /// Accepts `fit`, or a leading integer with optional sign. Anything after the
    /// digits is ignored, so `"150px"` parses as `150`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "fit" {
            return Ok(Self::Fit);
        }

        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let end = digits
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(digits.len());
        if end == 0 {
            return Err(ParseZoomLimitError {
                input: s.to_string(),
            });
        }

        let mut value = 0.0_f64;
        for b in digits[..end].bytes() {
            value = value * 10.0 + f64::from(b - b'0');
        }
        Ok(Self::Percent(if negative { -value } else { value }))
    }
}

/// Error returned when a zoom limit is neither `fit` nor a number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseZoomLimitError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseZoomLimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid zoom limit {:?}: expected `fit` or an integer percentage",
            self.input
        )
    }
}

impl core::error::Error for ParseZoomLimitError {}

/// Read access to the declared attributes of the controlled element.
pub trait Attributes {
    /// Returns `true` if the attribute is present, whatever its value.
    fn has_attribute(&self, name: &str) -> bool;

    /// Returns the attribute's value, if present.
    fn attribute(&self, name: &str) -> Option<String>;
}

/// Behavior switches for a controlled element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Keep the element within its container (centering, clamping, zoom-to-fit).
    pub bounds: bool,
    /// Allow single-pointer dragging.
    pub draggable: bool,
    /// Container used for fitting and clamping.
    pub origin: Origin,
    /// Lower zoom limit.
    pub min_zoom: ZoomLimit,
    /// Upper zoom limit.
    pub max_zoom: ZoomLimit,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bounds: false,
            draggable: false,
            origin: Origin::Window,
            min_zoom: ZoomLimit::Percent(DEFAULT_MIN_ZOOM),
            max_zoom: ZoomLimit::Percent(DEFAULT_MAX_ZOOM),
        }
    }
}

impl Config {
    /// Reads the configuration from element attributes.
    ///
    /// Returns the first malformed zoom limit as an error.
    pub fn try_from_attributes(attrs: &impl Attributes) -> Result<Self, ParseZoomLimitError> {
        let min_zoom = ZoomLimit::from_attribute(
            attrs.attribute(MIN_ZOOM_ATTRIBUTE).as_deref(),
            DEFAULT_MIN_ZOOM,
        )?;
        let max_zoom = ZoomLimit::from_attribute(
            attrs.attribute(MAX_ZOOM_ATTRIBUTE).as_deref(),
            DEFAULT_MAX_ZOOM,
        )?;
        Ok(Self {
            min_zoom,
            max_zoom,
            ..Self::flags_from_attributes(attrs)
        })
    }

    /// Reads the configuration from element attributes, replacing malformed
    /// zoom limits with their defaults.
    #[must_use]
    pub fn from_attributes(attrs: &impl Attributes) -> Self {
        let min_zoom = ZoomLimit::from_attribute(
            attrs.attribute(MIN_ZOOM_ATTRIBUTE).as_deref(),
            DEFAULT_MIN_ZOOM,
        )
        .unwrap_or(ZoomLimit::Percent(DEFAULT_MIN_ZOOM));
        let max_zoom = ZoomLimit::from_attribute(
            attrs.attribute(MAX_ZOOM_ATTRIBUTE).as_deref(),
            DEFAULT_MAX_ZOOM,
        )
        .unwrap_or(ZoomLimit::Percent(DEFAULT_MAX_ZOOM));
        Self {
            min_zoom,
            max_zoom,
            ..Self::flags_from_attributes(attrs)
        }
    }

    fn flags_from_attributes(attrs: &impl Attributes) -> Self {
        Self {
            bounds: attrs.has_attribute(BOUNDS_ATTRIBUTE),
            draggable: attrs.has_attribute(DRAGGABLE_ATTRIBUTE),
            origin: if attrs.has_attribute(ORIGIN_PARENT_ATTRIBUTE) {
                Origin::Parent
            } else {
                Origin::Window
            },
            ..Self::default()
        }
    }

    /// Sets whether the element is kept within its container.
    #[must_use]
    pub fn with_bounds(mut self, bounds: bool) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets whether single-pointer dragging is enabled.
    #[must_use]
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Sets the container origin.
    #[must_use]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Sets both zoom limits.
    #[must_use]
    pub fn with_zoom_limits(mut self, min_zoom: ZoomLimit, max_zoom: ZoomLimit) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use super::*;

    struct Attrs(Vec<(&'static str, &'static str)>);

    impl Attributes for Attrs {
        fn has_attribute(&self, name: &str) -> bool {
            self.0.iter().any(|(n, _)| *n == name)
        }

        fn attribute(&self, name: &str) -> Option<String> {
            self.0
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn parses_fit_and_integers() {
        assert_eq!("fit".parse::<ZoomLimit>(), Ok(ZoomLimit::Fit));
        assert_eq!(" 250 ".parse::<ZoomLimit>(), Ok(ZoomLimit::Percent(250.0)));
        assert_eq!("150px".parse::<ZoomLimit>(), Ok(ZoomLimit::Percent(150.0)));
        assert_eq!("-5".parse::<ZoomLimit>(), Ok(ZoomLimit::Percent(-5.0)));
    }

    #[test]
    fn rejects_non_numeric_limits() {
        let err = "huge".parse::<ZoomLimit>().unwrap_err();
        assert_eq!(err.input, "huge");
        assert!("".parse::<ZoomLimit>().is_err());
        assert!("-".parse::<ZoomLimit>().is_err());
    }

    #[test]
    fn missing_attributes_use_defaults() {
        let config = Config::from_attributes(&Attrs(Vec::new()));
        assert_eq!(config, Config::default());
        assert_eq!(config.min_zoom, ZoomLimit::Percent(10.0));
        assert_eq!(config.max_zoom, ZoomLimit::Percent(4000.0));
    }

    #[test]
    fn reads_flags_and_limits() {
        let attrs = Attrs(Vec::from([
            (BOUNDS_ATTRIBUTE, ""),
            (DRAGGABLE_ATTRIBUTE, ""),
            (ORIGIN_PARENT_ATTRIBUTE, ""),
            (MIN_ZOOM_ATTRIBUTE, "fit"),
            (MAX_ZOOM_ATTRIBUTE, "800"),
        ]));
        let config = Config::try_from_attributes(&attrs).unwrap();
        assert!(config.bounds);
        assert!(config.draggable);
        assert_eq!(config.origin, Origin::Parent);
        assert_eq!(config.min_zoom, ZoomLimit::Fit);
        assert_eq!(config.max_zoom, ZoomLimit::Percent(800.0));
    }

    #[test]
    fn malformed_limit_falls_back_leniently() {
        let attrs = Attrs(Vec::from([(BOUNDS_ATTRIBUTE, ""), (MAX_ZOOM_ATTRIBUTE, "lots")]));
        assert!(Config::try_from_attributes(&attrs).is_err());

        let config = Config::from_attributes(&attrs);
        assert!(config.bounds);
        assert_eq!(config.max_zoom, ZoomLimit::Percent(DEFAULT_MAX_ZOOM));
    }
}
