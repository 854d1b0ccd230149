// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker row evaluator.
//!
//! Rows are classified against a fixed table of hands, checked from the
//! strongest to the weakest with the first match winning. Aces are high
//! except in the A-2-3-4-5 straight where they count as one.

mod row;
pub use row::{HandRank, ROW_LEN, RowValue, evaluate_row};
