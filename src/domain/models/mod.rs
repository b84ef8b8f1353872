// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 站点（Url）和站点检查（UrlCheck）两个核心实体，以及检查结果值对象
pub mod url;
pub mod url_check;
