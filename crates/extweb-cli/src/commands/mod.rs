// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Command implementations for the extweb CLI.

/// `extweb build` - release build.
pub mod build;
/// `extweb dev` - development build with optional watch mode.
pub mod dev;
/// `extweb init` - project scaffolding.
pub mod init;
