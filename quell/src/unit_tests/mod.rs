// Copyright (c) The quell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod fixtures;
mod nowarn_tests;
