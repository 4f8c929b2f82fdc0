// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart request parsing for POST /predict

use axum_extra::extract::Multipart;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::api::errors::RequestError;
use crate::pricing::VehicleAttributes;

/// The four file fields carrying side photographs
const IMAGE_FIELDS: [&str; 4] = ["frontImage", "backImage", "leftImage", "rightImage"];

/// Fully parsed prediction request: tabular attributes plus the raw bytes of
/// the four side photographs
#[derive(Debug)]
pub struct PredictRequest {
    pub attributes: VehicleAttributes,
    pub front_image: Vec<u8>,
    pub back_image: Vec<u8>,
    pub left_image: Vec<u8>,
    pub right_image: Vec<u8>,
}

impl PredictRequest {
    /// Drain the multipart stream and validate every required field.
    ///
    /// Required text fields: brand, model, year, kmDriven, fuel,
    /// transmission, owners, color. Required file fields: frontImage,
    /// backImage, leftImage, rightImage. Anything missing or unparseable is
    /// a RequestError; unrecognized fields are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, RequestError> {
        let mut text_fields: HashMap<String, String> = HashMap::new();
        let mut file_fields: HashMap<String, Vec<u8>> = HashMap::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| RequestError::Multipart(e.to_string()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if IMAGE_FIELDS.contains(&name.as_str()) {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| RequestError::Multipart(e.to_string()))?;
                file_fields.insert(name, bytes.to_vec());
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| RequestError::Multipart(e.to_string()))?;
                text_fields.insert(name, value);
            }
        }

        let attributes = VehicleAttributes {
            brand: require_text(&text_fields, "brand")?,
            model: require_text(&text_fields, "model")?,
            year: parse_number(&text_fields, "year")?,
            km_driven: parse_number(&text_fields, "kmDriven")?,
            fuel_type: require_text(&text_fields, "fuel")?,
            transmission: require_text(&text_fields, "transmission")?,
            // u32 parsing enforces owners >= 0
            owner_count: parse_number(&text_fields, "owners")?,
            color: require_text(&text_fields, "color")?,
        };

        Ok(Self {
            attributes,
            front_image: require_file(&mut file_fields, "frontImage")?,
            back_image: require_file(&mut file_fields, "backImage")?,
            left_image: require_file(&mut file_fields, "leftImage")?,
            right_image: require_file(&mut file_fields, "rightImage")?,
        })
    }
}

fn require_text(
    fields: &HashMap<String, String>,
    field: &'static str,
) -> Result<String, RequestError> {
    match fields.get(field) {
        Some(value) if !value.trim().is_empty() => Ok(value.clone()),
        Some(_) => Err(RequestError::InvalidField {
            field,
            message: "value is empty".to_string(),
        }),
        None => Err(RequestError::MissingField(field)),
    }
}

fn parse_number<T>(fields: &HashMap<String, String>, field: &'static str) -> Result<T, RequestError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = fields.get(field).ok_or(RequestError::MissingField(field))?;
    raw.trim().parse::<T>().map_err(|e| RequestError::InvalidField {
        field,
        message: e.to_string(),
    })
}

fn require_file(
    fields: &mut HashMap<String, Vec<u8>>,
    field: &'static str,
) -> Result<Vec<u8>, RequestError> {
    fields.remove(field).ok_or(RequestError::MissingField(field))
}
