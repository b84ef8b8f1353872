// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::http::{header, HeaderMap};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// 存放闪现消息的 Cookie 名称
pub const FLASH_COOKIE: &str = "flash";

#[derive(Error, Debug)]
#[error("Invalid flash secret key")]
pub struct InvalidSecretKey;

/// 闪现消息类别，对应页面上的提示样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Info,
    Danger,
}

impl FlashCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashCategory::Success => "success",
            FlashCategory::Info => "info",
            FlashCategory::Danger => "danger",
        }
    }
}

/// 一次重定向携带的提示消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub category: FlashCategory,
    pub text: String,
}

impl FlashMessage {
    pub fn new(category: FlashCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

/// 闪现消息签名器
///
/// Cookie 值格式为 `base64url(json).hex(hmac_sha256)`。
/// 签名不匹配或格式错误的 Cookie 会被忽略。
#[derive(Clone)]
pub struct FlashSigner {
    mac: HmacSha256,
}

impl FlashSigner {
    pub fn new(secret_key: &str) -> Result<Self, InvalidSecretKey> {
        let mac = HmacSha256::new_from_slice(secret_key.as_bytes()).map_err(|_| InvalidSecretKey)?;
        Ok(Self { mac })
    }

    fn sign(&self, payload: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// 编码并签名消息
    pub fn encode(&self, message: &FlashMessage) -> Result<String, serde_json::Error> {
        let json = serde_json::to_vec(message)?;
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = self.sign(&payload);
        Ok(format!("{}.{}", payload, signature))
    }

    /// 校验签名并解码消息
    pub fn decode(&self, value: &str) -> Option<FlashMessage> {
        let (payload, signature) = value.split_once('.')?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            debug!("Ignoring flash cookie with bad signature");
            return None;
        }

        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }

    /// 生成写入消息的 `Set-Cookie` 值
    pub fn set_cookie(&self, message: &FlashMessage) -> Result<String, serde_json::Error> {
        Ok(format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            self.encode(message)?
        ))
    }

    /// 生成清除消息的 `Set-Cookie` 值
    pub fn clear_cookie() -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", FLASH_COOKIE)
    }

    /// 从请求头读取闪现消息
    ///
    /// 返回 `None` 表示没有有效的消息
    pub fn read(&self, headers: &HeaderMap) -> Option<FlashMessage> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == FLASH_COOKIE)
            .and_then(|(_, value)| self.decode(value))
    }

    /// 请求是否携带闪现 Cookie（无论是否有效）
    pub fn has_cookie(headers: &HeaderMap) -> bool {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .any(|pair| pair.trim().starts_with("flash="))
    }
}
