//! Client-side argument checks.
//!
//! Every operation runs the relevant checks before it sends a request, so a
//! malformed name fails fast with [`MediaError::Validation`] instead of a
//! round-trip to the service.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{MediaError, Result};

pub const MAX_TAGS: usize = 50;
pub const MAX_TAG_KEY_LEN: usize = 512;
pub const MAX_TAG_VALUE_LEN: usize = 256;
pub const MAX_ENTITY_NAME_LEN: usize = 260;
pub const MAX_LIVE_EVENT_NAME_LEN: usize = 32;
pub const MAX_LIVE_OUTPUT_NAME_LEN: usize = 256;
pub const MAX_STREAMING_ENDPOINT_NAME_LEN: usize = 24;
pub const MAX_DESCRIPTION_LEN: usize = 2048;
pub const MAX_LIVE_EVENT_DESCRIPTION_LEN: usize = 256;
pub const MAX_SCALE_UNITS: u32 = 10;

static SUBSCRIPTION_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("static regex")
});

static RESOURCE_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-\w.()]{1,90}$").expect("static regex"));

static ACCOUNT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]{3,24}$").expect("static regex"));

// Live events, live outputs and streaming endpoints end up in host names.
static HOST_SAFE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+(-*[a-zA-Z0-9])*$").expect("static regex"));

const ENTITY_NAME_FORBIDDEN: &[char] = &['<', '>', '%', '&', ':', '\\', '?', '/', '*', '+', '\'', '"'];
const TAG_KEY_FORBIDDEN: &[char] = &['<', '>', '%', '&', '\\', '?', '/'];

fn not_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(MediaError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn max_len(field: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(MediaError::validation(
            field,
            format!("length {len} exceeds the maximum of {max}"),
        ));
    }
    Ok(())
}

fn matches(field: &str, value: &str, re: &Regex, expected: &str) -> Result<()> {
    if !re.is_match(value) {
        return Err(MediaError::validation(
            field,
            format!("'{value}' must be {expected}"),
        ));
    }
    Ok(())
}

/// A GUID such as `00000000-0000-0000-0000-000000000000`.
pub fn subscription_id(value: &str) -> Result<()> {
    not_empty("subscriptionId", value)?;
    matches("subscriptionId", value, &SUBSCRIPTION_ID, "a GUID")
}

/// 1-90 characters of letters, digits, `_ - . ( )`, not ending in a period.
pub fn resource_group(value: &str) -> Result<()> {
    not_empty("resourceGroupName", value)?;
    max_len("resourceGroupName", value, 90)?;
    matches(
        "resourceGroupName",
        value,
        &RESOURCE_GROUP,
        "letters, digits, underscores, hyphens, periods or parentheses",
    )?;
    if value.ends_with('.') {
        return Err(MediaError::validation(
            "resourceGroupName",
            "must not end with a period",
        ));
    }
    Ok(())
}

/// 3-24 lowercase letters and digits.
pub fn account_name(value: &str) -> Result<()> {
    not_empty("accountName", value)?;
    matches(
        "accountName",
        value,
        &ACCOUNT_NAME,
        "3 to 24 lowercase letters or digits",
    )
}

/// Names of assets, transforms, jobs, content key policies, streaming
/// locators and streaming policies.
pub fn entity_name(field: &str, value: &str) -> Result<()> {
    not_empty(field, value)?;
    max_len(field, value, MAX_ENTITY_NAME_LEN)?;
    if let Some(c) = value
        .chars()
        .find(|c| ENTITY_NAME_FORBIDDEN.contains(c) || c.is_control())
    {
        return Err(MediaError::validation(
            field,
            format!("contains the forbidden character {c:?}"),
        ));
    }
    if value.ends_with('.') {
        return Err(MediaError::validation(field, "must not end with a period"));
    }
    Ok(())
}

fn host_safe_name(field: &str, value: &str, max: usize) -> Result<()> {
    not_empty(field, value)?;
    max_len(field, value, max)?;
    matches(
        field,
        value,
        &HOST_SAFE_NAME,
        "alphanumeric with hyphens only between characters",
    )
}

pub fn live_event_name(value: &str) -> Result<()> {
    host_safe_name("liveEventName", value, MAX_LIVE_EVENT_NAME_LEN)
}

pub fn live_output_name(value: &str) -> Result<()> {
    host_safe_name("liveOutputName", value, MAX_LIVE_OUTPUT_NAME_LEN)
}

pub fn streaming_endpoint_name(value: &str) -> Result<()> {
    host_safe_name(
        "streamingEndpointName",
        value,
        MAX_STREAMING_ENDPOINT_NAME_LEN,
    )
}

/// At most 50 tags; keys 1-512 characters without `< > % & \ ? /`, values
/// at most 256 characters.
pub fn tags(tags: &BTreeMap<String, String>) -> Result<()> {
    if tags.len() > MAX_TAGS {
        return Err(MediaError::validation(
            "tags",
            format!("{} tags exceed the maximum of {MAX_TAGS}", tags.len()),
        ));
    }
    for (key, value) in tags {
        if key.is_empty() {
            return Err(MediaError::validation("tags", "tag key must not be empty"));
        }
        if key.chars().count() > MAX_TAG_KEY_LEN {
            return Err(MediaError::validation(
                "tags",
                format!("tag key '{key}' is longer than {MAX_TAG_KEY_LEN} characters"),
            ));
        }
        if let Some(c) = key.chars().find(|c| TAG_KEY_FORBIDDEN.contains(c)) {
            return Err(MediaError::validation(
                "tags",
                format!("tag key '{key}' contains the forbidden character {c:?}"),
            ));
        }
        if value.chars().count() > MAX_TAG_VALUE_LEN {
            return Err(MediaError::validation(
                "tags",
                format!("value of tag '{key}' is longer than {MAX_TAG_VALUE_LEN} characters"),
            ));
        }
    }
    Ok(())
}

/// Azure region names such as `westeurope`.
pub fn location(value: &str) -> Result<()> {
    not_empty("location", value)
}

pub fn optional_tags(value: Option<&BTreeMap<String, String>>) -> Result<()> {
    match value {
        Some(t) => tags(t),
        None => Ok(()),
    }
}

pub fn description(field: &str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(v) => max_len(field, v, max),
        None => Ok(()),
    }
}

pub fn scale_units(value: u32) -> Result<()> {
    if value > MAX_SCALE_UNITS {
        return Err(MediaError::validation(
            "scaleUnits",
            format!("{value} exceeds the maximum of {MAX_SCALE_UNITS}"),
        ));
    }
    Ok(())
}

pub fn non_empty_list<T>(field: &str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(MediaError::validation(field, "must contain at least one entry"));
    }
    Ok(())
}
