// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI support library for the `extweb` binary.

/// CLI subcommands.
pub mod commands;
/// File system watching for rebuild-on-change.
pub mod watcher;
