// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod assistant;
pub mod cli;
pub mod db;
pub mod models;
pub mod stats;
pub mod store;
pub mod sync;
pub mod utils;
pub mod commands;
