//! Channel linking client methods

use serde_json::{Value, json};

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::{Channel, ChannelStatus, ChannelType, ConnectResponse};

impl ApiClient {
    /// List linked channels
    pub async fn list_channels(&self) -> Result<Vec<Channel>, ClientError> {
        self.execute(ApiRequest::get("/channels")).await
    }

    /// Start the OAuth flow for a channel; open the returned URL in a browser
    pub async fn connect_channel(
        &self,
        channel: ChannelType,
    ) -> Result<ConnectResponse, ClientError> {
        self.execute(ApiRequest::post(format!("/channels/{channel}/connect")))
            .await
    }

    /// Link a channel without OAuth (development backends only).
    ///
    /// `account` is the Instagram username, Kakao channel id or Naver
    /// TalkTalk id depending on the channel.
    pub async fn mock_connect_channel(
        &self,
        channel: ChannelType,
        account: &str,
    ) -> Result<Value, ClientError> {
        let body = match channel {
            ChannelType::Instagram => json!({ "username": account }),
            ChannelType::Kakao => json!({ "channel_id": account }),
            ChannelType::Naver => json!({ "talktalk_id": account }),
        };
        let request = ApiRequest::post(format!("/channels/{channel}/mock-connect")).json(&body)?;
        self.execute(request).await
    }

    /// Unlink a channel
    pub async fn disconnect_channel(&self, channel: ChannelType) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/channels/{channel}")))
            .await
    }

    /// Connection and webhook health of a channel
    pub async fn channel_status(&self, channel: ChannelType) -> Result<ChannelStatus, ClientError> {
        self.execute(ApiRequest::get(format!("/channels/{channel}/status")))
            .await
    }

    /// Renew the platform token of a linked channel
    pub async fn refresh_channel_token(&self, channel: ChannelType) -> Result<Channel, ClientError> {
        self.execute(ApiRequest::post(format!("/channels/{channel}/refresh")))
            .await
    }
}
