// ABOUTME: Configuration module for deployment-specific server settings
// ABOUTME: Environment-variable driven; no configuration files are read at runtime
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 FundScope

//! Server configuration loaded from the environment

pub mod environment;

pub use environment::{DatabaseUrl, Environment, LogLevel, ServerConfig};
