use crate::core::errors::XtbError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outbound command envelope.
///
/// `custom_tag` is attached per call for tracing only. The server echoes it,
/// but responses are correlated by FIFO order, never by tag.
#[derive(Debug, Clone, Serialize)]
pub struct Command<T> {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<T>,
    #[serde(rename = "customTag")]
    pub custom_tag: Uuid,
}

impl<T: Serialize> Command<T> {
    pub fn new(command: impl Into<String>, arguments: Option<T>) -> Self {
        Self {
            command: command.into(),
            arguments,
            custom_tag: Uuid::new_v4(),
        }
    }

    pub fn encode(&self) -> Result<String, XtbError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Inbound response envelope, shared by every command.
///
/// The error fields are populated only when `status` is false, and
/// `return_data` only when `status` is true; `stream_session_id` appears on
/// the login exchange alone.
#[derive(Debug, Clone, Deserialize)]
pub struct Response<T> {
    pub status: bool,
    #[serde(rename = "returnData")]
    pub return_data: Option<T>,
    #[serde(rename = "errorCode")]
    pub error_code: Option<String>,
    #[serde(rename = "errorDescr")]
    pub error_descr: Option<String>,
    #[serde(rename = "streamSessionId")]
    pub stream_session_id: Option<String>,
    #[serde(rename = "customTag")]
    pub custom_tag: Option<Uuid>,
}

impl<T: DeserializeOwned> Response<T> {
    pub fn decode(raw: &str) -> Result<Self, XtbError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Uniform success/error discrimination applied to every command. Absent
    /// error fields decode to empty strings.
    pub fn into_result(self) -> Result<Option<T>, XtbError> {
        if self.status {
            Ok(self.return_data)
        } else {
            Err(XtbError::Api {
                code: self.error_code.unwrap_or_default(),
                message: self.error_descr.unwrap_or_default(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn command_encodes_name_arguments_and_tag() {
        let command = Command::new("getSymbol", Some(json!({"symbol": "EURUSD"})));
        let encoded = command.encode().unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(value["command"], "getSymbol");
        assert_eq!(value["arguments"]["symbol"], "EURUSD");
        assert!(Uuid::parse_str(value["customTag"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn command_without_arguments_omits_the_field() {
        let command = Command::<Value>::new("ping", None);
        let encoded = command.encode().unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();

        assert!(value.get("arguments").is_none());
    }

    #[test]
    fn success_response_yields_payload() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct VersionPayload {
            version: String,
        }

        let response: Response<VersionPayload> =
            Response::decode(r#"{"status":true,"returnData":{"version":"5.2"}}"#).unwrap();
        let payload = response.into_result().unwrap().unwrap();
        assert_eq!(payload.version, "5.2");
    }

    #[test]
    fn failure_response_yields_api_error_with_code_and_description() {
        let response: Response<Value> = Response::decode(
            r#"{"status":false,"errorCode":"BE001","errorDescr":"bad params"}"#,
        )
        .unwrap();
        match response.into_result() {
            Err(XtbError::Api { code, message }) => {
                assert_eq!(code, "BE001");
                assert_eq!(message, "bad params");
            }
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[test]
    fn failure_response_with_absent_fields_defaults_to_empty_strings() {
        let response: Response<Value> = Response::decode(r#"{"status":false}"#).unwrap();
        match response.into_result() {
            Err(XtbError::Api { code, message }) => {
                assert_eq!(code, "");
                assert_eq!(message, "");
            }
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[test]
    fn round_trip_preserves_primitive_struct_and_array_payloads() {
        let raw = r#"{"status":true,"returnData":[1,2,3]}"#;
        let response: Response<Vec<i64>> = Response::decode(raw).unwrap();
        assert_eq!(response.into_result().unwrap().unwrap(), vec![1, 2, 3]);

        let raw = r#"{"status":true,"returnData":"5.2"}"#;
        let response: Response<String> = Response::decode(raw).unwrap();
        assert_eq!(response.into_result().unwrap().unwrap(), "5.2");
    }

    #[test]
    fn login_response_carries_the_stream_session_token() {
        let response: Response<Value> =
            Response::decode(r#"{"status":true,"streamSessionId":"8469308861804289383"}"#).unwrap();
        assert_eq!(
            response.stream_session_id.as_deref(),
            Some("8469308861804289383")
        );
    }
}
