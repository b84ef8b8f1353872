// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模块
///
/// 包含核心业务实体、仓库接口和领域服务
pub mod models;
pub mod repositories;
pub mod services;
