// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Response payload and currency formatting for POST /predict

use serde::{Deserialize, Serialize};

use crate::pricing::DamageLabel;

/// Damage labels keyed by photographed side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageSummary {
    pub front: DamageLabel,
    pub back: DamageLabel,
    pub left: DamageLabel,
    pub right: DamageLabel,
}

/// Successful prediction payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Currency-formatted price, e.g. "₹4,50,000.00"
    pub predicted_price: String,
    pub damage_summary: DamageSummary,
}

impl PredictResponse {
    pub fn new(price: f64, damage_summary: DamageSummary) -> Self {
        Self {
            predicted_price: format_inr(price),
            damage_summary,
        }
    }
}

/// Format a price with Indian numbering grouping and a rupee prefix.
///
/// Two decimal digits; the last three integer digits form one group, then
/// pairs: 450000 renders as "₹4,50,000.00". Formatting happens at f64 width
/// so two-decimal amounts survive the rounding; the model's f32 output is
/// widened before it reaches here. The raw value is otherwise formatted
/// as-is - negative predictions keep their sign after the symbol, matching
/// the reference locale behavior.
pub fn format_inr(amount: f64) -> String {
    let rendered = format!("{:.2}", amount);
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
    format!("₹{}{}.{}", sign, group_indian(int_part), frac_part)
}

/// Indian digit grouping over an ASCII digit string
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
