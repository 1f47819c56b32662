// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over the transaction and budget collections. Everything here
//! is a pure function of its inputs; callers pass complete snapshots.

pub mod aggregate;
pub mod budget;
pub mod compare;
pub mod period;
pub mod query;
pub mod rollup;
