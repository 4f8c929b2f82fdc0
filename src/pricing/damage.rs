// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Damage categories and their fixed severity ordering

use serde::{Deserialize, Serialize};
use std::fmt;

/// Photographed side of the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Front,
    Back,
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Back => "back",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Damage category produced by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageLabel {
    NoDamage,
    Scratch,
    Dent,
}

impl DamageLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageLabel::NoDamage => "no_damage",
            DamageLabel::Scratch => "scratch",
            DamageLabel::Dent => "dent",
        }
    }

    /// Severity ordering fixed at training time: no_damage < scratch < dent.
    /// The regressor was fit on these exact values; never re-derive them.
    pub fn severity_score(&self) -> u8 {
        match self {
            DamageLabel::NoDamage => 0,
            DamageLabel::Scratch => 1,
            DamageLabel::Dent => 2,
        }
    }
}

impl fmt::Display for DamageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One classified photograph: which side it shows and what the classifier saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageObservation {
    pub side: Side,
    pub label: DamageLabel,
}

impl DamageObservation {
    pub fn new(side: Side, label: DamageLabel) -> Self {
        Self { side, label }
    }

    pub fn severity_score(&self) -> u8 {
        self.label.severity_score()
    }
}
