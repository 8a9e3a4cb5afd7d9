// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Typed inter-frame message protocol.
//!
//! Landing and navigation frames exchange JSON envelopes of the shape
//! `{"type": "SCREAMING_CASE", "data": {...}}`. The message set is a closed
//! union: [`decode`] validates both the type tag and the payload shape and
//! returns a [`ProtocolError`] for anything else, so the controller can log
//! exactly what it dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::slideshow::SliderConfig;

/// Decode failure at the frame boundary.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message envelope: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),
    #[error("unknown message type {0:?}")]
    UnknownType(String),
    #[error("invalid payload for {message_type}: {source}")]
    InvalidPayload {
        message_type: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Route request payload carried by `CREATE_ROUTE`. Older landing builds
/// send the message with no payload at all; the destination then travels
/// out of band, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
}

/// Every message either frame may send or receive.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameMessage {
    /// Landing frame finished loading.
    LandingReady,
    /// Navigation frame finished loading.
    NavigationReady,
    /// Landing asks navigation to route to a destination.
    CreateRoute(RouteRequest),
    /// Bring the navigation frame to the front.
    ShowNavigation,
    /// Bring the landing frame to the front.
    ShowLanding,
    /// User pressed the home control on the navigation screen.
    BackToHome,
    /// Sent to a frame when it becomes the visible one.
    Activate,
    /// Initial handshake sent to a frame after its ready signal.
    Init,
    /// Backend pushed a new slider configuration.
    SliderConfigUpdated(SliderConfig),
    /// Forward slider config to the navigation frame's mini slider.
    UpdateMiniSlider(SliderConfig),
    /// Navigation computed the requested route.
    RouteReady,
    /// Navigation started animating the route.
    RouteActivated,
    /// Navigation dismissed the active route.
    HideRoute,
    /// A frame reports the app version it is running.
    VersionUpdate { version: String },
}

impl FrameMessage {
    /// The wire type tag.
    pub fn message_type(&self) -> &'static str {
        match self {
            Self::LandingReady => "LANDING_READY",
            Self::NavigationReady => "NAVIGATION_READY",
            Self::CreateRoute(_) => "CREATE_ROUTE",
            Self::ShowNavigation => "SHOW_NAVIGATION",
            Self::ShowLanding => "SHOW_LANDING",
            Self::BackToHome => "BACK_TO_HOME",
            Self::Activate => "ACTIVATE",
            Self::Init => "INIT",
            Self::SliderConfigUpdated(_) => "SLIDER_CONFIG_UPDATED",
            Self::UpdateMiniSlider(_) => "UPDATE_MINI_SLIDER",
            Self::RouteReady => "ROUTE_READY",
            Self::RouteActivated => "ROUTE_ACTIVATED",
            Self::HideRoute => "HIDE_ROUTE",
            Self::VersionUpdate { .. } => "VERSION_UPDATE",
        }
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    message_type: String,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Serialize, Deserialize)]
struct VersionPayload {
    version: String,
}

/// Decode one frame message from its JSON text.
pub fn decode(text: &str) -> Result<FrameMessage, ProtocolError> {
    let envelope: Envelope =
        serde_json::from_str(text).map_err(ProtocolError::MalformedEnvelope)?;
    decode_envelope(envelope)
}

/// Decode from an already-parsed JSON value.
pub fn decode_value(value: Value) -> Result<FrameMessage, ProtocolError> {
    let envelope: Envelope =
        serde_json::from_value(value).map_err(ProtocolError::MalformedEnvelope)?;
    decode_envelope(envelope)
}

fn decode_envelope(envelope: Envelope) -> Result<FrameMessage, ProtocolError> {
    // Unit messages tolerate an absent, null, or empty-object payload.
    let message = match envelope.message_type.as_str() {
        "LANDING_READY" => FrameMessage::LandingReady,
        "NAVIGATION_READY" => FrameMessage::NavigationReady,
        "CREATE_ROUTE" => {
            FrameMessage::CreateRoute(payload_or_default(envelope.data, "CREATE_ROUTE")?)
        }
        "SHOW_NAVIGATION" => FrameMessage::ShowNavigation,
        "SHOW_LANDING" => FrameMessage::ShowLanding,
        "BACK_TO_HOME" => FrameMessage::BackToHome,
        "ACTIVATE" => FrameMessage::Activate,
        "INIT" => FrameMessage::Init,
        "SLIDER_CONFIG_UPDATED" => {
            FrameMessage::SliderConfigUpdated(payload(envelope.data, "SLIDER_CONFIG_UPDATED")?)
        }
        "UPDATE_MINI_SLIDER" => {
            FrameMessage::UpdateMiniSlider(payload(envelope.data, "UPDATE_MINI_SLIDER")?)
        }
        "ROUTE_READY" => FrameMessage::RouteReady,
        "ROUTE_ACTIVATED" => FrameMessage::RouteActivated,
        "HIDE_ROUTE" => FrameMessage::HideRoute,
        "VERSION_UPDATE" => {
            let VersionPayload { version } = payload(envelope.data, "VERSION_UPDATE")?;
            FrameMessage::VersionUpdate { version }
        }
        _ => return Err(ProtocolError::UnknownType(envelope.message_type)),
    };
    Ok(message)
}

fn payload<T: for<'de> Deserialize<'de>>(
    data: Option<Value>,
    message_type: &'static str,
) -> Result<T, ProtocolError> {
    let data = data.unwrap_or(Value::Null);
    serde_json::from_value(data).map_err(|source| ProtocolError::InvalidPayload {
        message_type,
        source,
    })
}

/// Like [`payload`], but an absent or `null` payload decodes to the
/// default value instead of an error.
fn payload_or_default<T: Default + for<'de> Deserialize<'de>>(
    data: Option<Value>,
    message_type: &'static str,
) -> Result<T, ProtocolError> {
    match data {
        None | Some(Value::Null) => Ok(T::default()),
        Some(data) => serde_json::from_value(data).map_err(|source| {
            ProtocolError::InvalidPayload {
                message_type,
                source,
            }
        }),
    }
}

/// Encode a message into its wire envelope.
pub fn encode(message: &FrameMessage) -> Value {
    let data = match message {
        FrameMessage::CreateRoute(req) => serde_json::to_value(req).ok(),
        FrameMessage::SliderConfigUpdated(cfg) | FrameMessage::UpdateMiniSlider(cfg) => {
            serde_json::to_value(cfg).ok()
        }
        FrameMessage::VersionUpdate { version } => serde_json::to_value(VersionPayload {
            version: version.clone(),
        })
        .ok(),
        _ => None,
    };

    match data {
        Some(data) => serde_json::json!({ "type": message.message_type(), "data": data }),
        None => serde_json::json!({ "type": message.message_type() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_messages_decode_with_or_without_data() {
        assert_eq!(
            decode(r#"{"type":"LANDING_READY"}"#).unwrap(),
            FrameMessage::LandingReady
        );
        assert_eq!(
            decode(r#"{"type":"BACK_TO_HOME","data":{}}"#).unwrap(),
            FrameMessage::BackToHome
        );
        assert_eq!(
            decode(r#"{"type":"HIDE_ROUTE","data":null}"#).unwrap(),
            FrameMessage::HideRoute
        );
    }

    #[test]
    fn create_route_carries_an_optional_destination() {
        let msg = decode(r#"{"type":"CREATE_ROUTE","data":{"locationId":"ID0009"}}"#).unwrap();
        assert_eq!(
            msg,
            FrameMessage::CreateRoute(RouteRequest {
                location_id: Some("ID0009".to_owned())
            })
        );

        // Older landing builds send no payload at all.
        let msg = decode(r#"{"type":"CREATE_ROUTE"}"#).unwrap();
        assert_eq!(msg, FrameMessage::CreateRoute(RouteRequest::default()));
    }

    #[test]
    fn slider_config_payload_round_trips() {
        let text = r#"{"type":"SLIDER_CONFIG_UPDATED",
            "data":{"slides":[{"imageUrl":"a.jpg"}],"transitionDuration":3000}}"#;
        let msg = decode(text).unwrap();
        let FrameMessage::SliderConfigUpdated(cfg) = &msg else {
            panic!("wrong variant");
        };
        assert_eq!(cfg.slides.len(), 1);
        assert_eq!(cfg.transition_duration, 3000);

        let encoded = encode(&msg);
        assert_eq!(encoded["type"], "SLIDER_CONFIG_UPDATED");
        assert_eq!(encoded["data"]["slides"][0]["imageUrl"], "a.jpg");
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = decode(r#"{"type":"REBOOT"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownType(t) if t == "REBOOT"));
    }

    #[test]
    fn wrong_payload_shape_is_rejected() {
        let err = decode(r#"{"type":"SLIDER_CONFIG_UPDATED","data":5}"#).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidPayload {
                message_type: "SLIDER_CONFIG_UPDATED",
                ..
            }
        ));
    }

    #[test]
    fn garbage_is_a_malformed_envelope() {
        assert!(matches!(
            decode("not json"),
            Err(ProtocolError::MalformedEnvelope(_))
        ));
        assert!(matches!(
            decode(r#"{"data":{}}"#),
            Err(ProtocolError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn version_update_round_trips() {
        let msg = FrameMessage::VersionUpdate {
            version: "2.4.1".to_owned(),
        };
        let decoded = decode_value(encode(&msg)).unwrap();
        assert_eq!(decoded, msg);
    }
}
