//! Authentication capability probe.

/// Capability status reported when no biometric hardware can gate access.
pub const HW_UNAVAILABLE: &str = "ErrorHwUnavailable";

/// Answer `canAuthenticate`.
///
/// This backend never gates secrets behind biometrics, so the answer is
/// always [`HW_UNAVAILABLE`].
pub fn can_authenticate() -> serde_json::Value {
    serde_json::Value::String(HW_UNAVAILABLE.to_string())
}
