//! Wire format of the estimate endpoint.
//!
//! Field names follow the marketplace form (`selected_quartier_id`, `superficie`,
//! `standing`, ...). Every field is optional at the serde level so that a
//! missing field surfaces as a `MissingFieldError` naming it, instead of a
//! generic deserialization failure.

use crate::core::multi_story::level_count_from_label;
use crate::domain::model::{
    BuildingCategory, CostEstimate, FinishTier, HouseShape, NeighborhoodId, ProjectSpec,
    RoofingType, RoomCount, Structure,
};
use crate::utils::error::{EstimateError, Result};
use crate::utils::validation::validate_required_field;
use serde::{Deserialize, Serialize};

/// Accepts both `"12"` and `12` for ids and counts coming from HTML forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Number(serde_json::Number),
    Text(String),
}

impl TextOrNumber {
    pub fn to_text(&self) -> String {
        match self {
            // 12.0 與 12 指同一個 id
            Self::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 => format!("{}", f),
                _ => n.to_string(),
            },
            Self::Text(s) => s.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub selected_quartier_id: Option<TextOrNumber>,
    pub superficie: Option<f64>,
    pub standing: Option<FinishTier>,
    pub ouvrage: Option<BuildingCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niveau: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logement_type: Option<HouseShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub couverture_section: Option<RoofingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pieces: Option<TextOrNumber>,
}

impl EstimateRequest {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| EstimateError::validation("body", e.to_string()))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| EstimateError::validation("body", e.to_string()))
    }

    /// Checks the conditionally-required fields for the chosen branch and
    /// builds the typed project.
    pub fn to_project_spec(&self) -> Result<ProjectSpec> {
        let neighborhood_id = NeighborhoodId::new(
            validate_required_field("selected_quartier_id", &self.selected_quartier_id)?.to_text(),
        );
        let land_area_m2 = *validate_required_field("superficie", &self.superficie)?;
        let finish_tier = *validate_required_field("standing", &self.standing)?;
        let category = *validate_required_field("ouvrage", &self.ouvrage)?;

        let structure = match category {
            BuildingCategory::MultiStory => {
                let label = validate_required_field("niveau", &self.niveau)?;
                Structure::MultiStory {
                    levels: level_count_from_label(label),
                }
            }
            BuildingCategory::Standalone => {
                let shape = *validate_required_field("logement_type", &self.logement_type)?;
                let pieces = validate_required_field("pieces", &self.pieces)?;
                let rooms = parse_room_label(&pieces.to_text())?;
                if finish_tier.requires_roofing() {
                    validate_required_field("couverture_section", &self.couverture_section)?;
                }
                Structure::Standalone {
                    shape,
                    rooms,
                    roofing: self.couverture_section,
                }
            }
        };

        ProjectSpec::new(neighborhood_id, land_area_m2, finish_tier, structure)
    }
}

/// Parses a room count as sent by the form: `"2"` to `"10"`, or the open-ended
/// `"10 et plus"` which is looked up as 10.
pub fn parse_room_label(label: &str) -> Result<RoomCount> {
    let trimmed = label.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, rest) = trimmed.split_at(digits_end);

    let rooms: u8 = digits.parse().map_err(|_| {
        EstimateError::validation("pieces", format!("unrecognized room count '{}'", label))
    })?;

    let rest = rest.trim().to_lowercase();
    if !rest.is_empty() {
        let open_ended = matches!(rest.as_str(), "+" | "et plus" | "ou plus" | "or more");
        if !open_ended || rooms != RoomCount::MAX {
            return Err(EstimateError::validation(
                "pieces",
                format!("unrecognized room count '{}'", label),
            ));
        }
    }

    RoomCount::new(rooms)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CostEstimate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body plus the HTTP status it should be sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateReply {
    pub status_code: u16,
    pub body: EstimateResponse,
}

impl EstimateReply {
    pub fn success(estimate: CostEstimate) -> Self {
        Self {
            status_code: 200,
            body: EstimateResponse {
                success: true,
                data: Some(estimate),
                error: None,
            },
        }
    }

    pub fn failure(error: &EstimateError) -> Self {
        Self {
            status_code: error.status_code(),
            body: EstimateResponse {
                success: false,
                data: None,
                error: Some(error.user_friendly_message()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LevelCount;

    fn house_request() -> EstimateRequest {
        EstimateRequest::from_value(serde_json::json!({
            "selected_quartier_id": 14,
            "superficie": 250,
            "standing": "economique",
            "ouvrage": "logement",
            "logement_type": "plain_pied",
            "couverture_section": "legere",
            "pieces": "3"
        }))
        .unwrap()
    }

    #[test]
    fn test_room_labels() {
        assert_eq!(parse_room_label("2").unwrap().get(), 2);
        assert_eq!(parse_room_label(" 7 ").unwrap().get(), 7);
        assert_eq!(parse_room_label("10").unwrap().get(), 10);
        assert_eq!(parse_room_label("10 et plus").unwrap(), parse_room_label("10").unwrap());
        assert_eq!(parse_room_label("10+").unwrap().get(), 10);
        assert!(parse_room_label("1").is_err());
        assert!(parse_room_label("11").is_err());
        assert!(parse_room_label("3 et plus").is_err());
        assert!(parse_room_label("trois").is_err());
        assert!(parse_room_label("").is_err());
    }

    #[test]
    fn test_integral_float_reads_as_integer() {
        let as_float: TextOrNumber = serde_json::from_str("12.0").unwrap();
        assert_eq!(as_float.to_text(), "12");
        let as_int: TextOrNumber = serde_json::from_str("12").unwrap();
        assert_eq!(as_int.to_text(), "12");
        let fractional: TextOrNumber = serde_json::from_str("12.5").unwrap();
        assert_eq!(fractional.to_text(), "12.5");
        let text: TextOrNumber = serde_json::from_str("\" 12 \"").unwrap();
        assert_eq!(text.to_text(), "12");
    }

    #[test]
    fn test_house_request_to_spec() {
        let spec = house_request().to_project_spec().unwrap();
        assert_eq!(spec.neighborhood_id().as_str(), "14");
        assert_eq!(spec.building_category(), BuildingCategory::Standalone);
        assert_eq!(spec.finish_tier(), FinishTier::Economic);
    }

    #[test]
    fn test_missing_roofing_for_economic_house() {
        let mut request = house_request();
        request.couverture_section = None;
        let err = request.to_project_spec().unwrap_err();
        assert!(matches!(
            err,
            EstimateError::MissingFieldError { ref field } if field == "couverture_section"
        ));
    }

    #[test]
    fn test_roofing_not_required_for_high_tier() {
        let mut request = house_request();
        request.standing = Some(FinishTier::High);
        request.couverture_section = None;
        assert!(request.to_project_spec().is_ok());
    }

    #[test]
    fn test_missing_level_for_block() {
        let mut request = house_request();
        request.ouvrage = Some(BuildingCategory::MultiStory);
        let err = request.to_project_spec().unwrap_err();
        assert!(matches!(err, EstimateError::MissingFieldError { ref field } if field == "niveau"));

        request.niveau = Some("R+4".to_string());
        let spec = request.to_project_spec().unwrap();
        assert_eq!(
            spec.structure(),
            &Structure::MultiStory {
                levels: LevelCount::new(5).unwrap()
            }
        );
    }

    #[test]
    fn test_unknown_tier_is_a_validation_error() {
        let err = EstimateRequest::from_json(r#"{"standing": "premium"}"#).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_failure_reply_has_no_data() {
        let reply = EstimateReply::failure(&EstimateError::NotFound {
            neighborhood_id: "99".to_string(),
        });
        assert_eq!(reply.status_code, 404);
        assert!(!reply.body.success);
        assert!(reply.body.data.is_none());
        let json = serde_json::to_value(&reply.body).unwrap();
        assert!(json.get("data").is_none());
    }
}
