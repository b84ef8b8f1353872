// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 站点提交表单
///
/// 缺少 `url` 字段时按空字符串处理，交由校验逻辑报告
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UrlFormDto {
    #[serde(default)]
    pub url: String,
}
