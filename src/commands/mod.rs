// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod settings;
pub mod stats;
pub mod sync;
pub mod assistant;
pub mod config;
pub mod reset;
pub mod doctor;
