// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Currency formatting contract for the prediction response

use vehicle_price_node::api::predict::{format_inr, DamageSummary, PredictResponse};
use vehicle_price_node::pricing::DamageLabel;

#[test]
fn test_reference_scenario_price_format() {
    // The reference example: ₹4,50,000.00
    assert_eq!(format_inr(450000.0), "₹4,50,000.00");
}

#[test]
fn test_grouping_boundaries() {
    assert_eq!(format_inr(1.0), "₹1.00");
    assert_eq!(format_inr(100.0), "₹100.00");
    assert_eq!(format_inr(1000.0), "₹1,000.00");
    assert_eq!(format_inr(10000.0), "₹10,000.00");
    assert_eq!(format_inr(100000.0), "₹1,00,000.00");
    assert_eq!(format_inr(1000000.0), "₹10,00,000.00");
    assert_eq!(format_inr(10000000.0), "₹1,00,00,000.00");
}

#[test]
fn test_two_decimal_digits_always() {
    assert_eq!(format_inr(450000.5), "₹4,50,000.50");
    assert_eq!(format_inr(0.125), "₹0.12");
}

#[test]
fn test_unclamped_negative_prediction_renders() {
    // The model output is not clamped to non-negative; formatting must not
    // hide that
    assert!(format_inr(-125000.0).starts_with("₹-"));
}

#[test]
fn test_response_payload_keys() {
    let response = PredictResponse::new(
        450000.0,
        DamageSummary {
            front: DamageLabel::NoDamage,
            back: DamageLabel::NoDamage,
            left: DamageLabel::NoDamage,
            right: DamageLabel::NoDamage,
        },
    );
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["predicted_price"], "₹4,50,000.00");
    for side in ["front", "back", "left", "right"] {
        assert_eq!(json["damage_summary"][side], "no_damage");
    }
}
