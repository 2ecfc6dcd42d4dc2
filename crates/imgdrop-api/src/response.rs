//! JSON body shared by every `/uploads` response.

use imgdrop_core::messages;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    /// Name the stored file can be fetched by; only set on upload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
}

impl ApiResponse {
    pub fn uploaded(image_name: impl Into<String>) -> Self {
        Self {
            success: true,
            message: messages::UPLOAD_SUCCESS.to_string(),
            image_name: Some(image_name.into()),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            image_name: None,
        }
    }

    /// `success: false` with a normal status code.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            image_name: None,
        }
    }
}
