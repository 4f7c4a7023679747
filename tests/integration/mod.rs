// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 集成测试模块
///
/// 使用真实组件（HTTP模拟服务器、内存数据库）验证
/// 抓取引擎、robots检查与持久化的端到端行为
mod browser_engine_tests;
mod robots_tests;
mod static_engine_tests;
mod store_tests;
