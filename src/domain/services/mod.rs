// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - url_normalizer：地址验证与规范化（纯函数）
/// - page_extractor：从 HTML 提取 title / h1 / description
/// - page_checker：抓取 + 提取，组成一次页面检查
pub mod page_checker;
pub mod page_extractor;
pub mod url_normalizer;
