// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod branding_service;
pub mod enrichment_service;
pub mod parser_service;
pub mod pipeline_service;
pub mod validation_service;
