// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层基于 SeaORM 提供。
///
/// 包含的仓库接口：
/// - 站点仓库（url_repository）：站点的查找、插入和带最近检查的列表
/// - 站点检查仓库（url_check_repository）：检查记录的写入和历史查询
pub mod url_check_repository;
pub mod url_repository;
