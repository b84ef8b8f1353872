// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与数据库交互。
///
/// 包含的子模块：
/// - 数据库（database）：连接池、启动重试和实体映射
/// - 仓库实现（repositories）：领域仓库接口基于 SeaORM 的实现
///
/// 基础设施层遵循依赖倒置原则，依赖于领域层的抽象接口。
pub mod database;
pub mod repositories;
