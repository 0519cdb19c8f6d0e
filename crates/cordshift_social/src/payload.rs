//! Request body helpers.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cordshift_core::ProfileUpdate;
use serde_json::{Map, Value as JsonValue};

/// Guess an image MIME type from its magic bytes. Defaults to PNG.
pub fn image_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/png"
    }
}

/// Encode image bytes the way both APIs accept uploads.
///
/// # Examples
///
/// ```
/// use cordshift_social::data_uri;
///
/// assert_eq!(data_uri(b"GIF89a"), "data:image/gif;base64,R0lGODlh");
/// ```
pub fn data_uri(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", image_mime(bytes), STANDARD.encode(bytes))
}

/// JSON body for `PATCH /users/@me` with only the fields that are set.
pub(crate) fn profile_update_body(update: &ProfileUpdate) -> JsonValue {
    let mut body = Map::new();
    if let Some(name) = &update.global_name {
        body.insert("global_name".into(), JsonValue::from(name.clone()));
    }
    if let Some(bio) = &update.bio {
        body.insert("bio".into(), JsonValue::from(bio.clone()));
    }
    if let Some(pronouns) = &update.pronouns {
        body.insert("pronouns".into(), JsonValue::from(pronouns.clone()));
    }
    if let Some(color) = update.accent_color {
        body.insert("accent_color".into(), JsonValue::from(color));
    }
    if let Some(avatar) = &update.avatar {
        body.insert("avatar".into(), JsonValue::from(data_uri(avatar)));
    }
    if let Some(banner) = &update.banner {
        body.insert("banner".into(), JsonValue::from(data_uri(banner)));
    }
    JsonValue::Object(body)
}

/// Fold the `user_profile` object of a profile response into a user object.
pub(crate) fn merge_user_profile(user: &mut JsonValue, profile: &JsonValue) {
    let (Some(user), Some(extra)) = (
        user.as_object_mut(),
        profile.get("user_profile").and_then(JsonValue::as_object),
    ) else {
        return;
    };
    for (key, value) in extra {
        if !value.is_null() {
            user.insert(key.clone(), value.clone());
        }
    }
}
