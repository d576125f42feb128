use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

/// Lowest soil pH the editor accepts.
pub const MIN_SOIL_PH: f64 = 0.0;
/// Highest soil pH the editor accepts.
pub const MAX_SOIL_PH: f64 = 14.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    #[default]
    Empty,
    Plant,
    Tree,
    Lawn,
    Water,
    Path,
    Building,
    Decking,
}

impl CellType {
    /// Plants and trees are the only types whose metadata the editor shows.
    pub fn has_details(self) -> bool {
        matches!(self, CellType::Plant | CellType::Tree)
    }

    pub fn label(self) -> &'static str {
        match self {
            CellType::Empty => "Square",
            CellType::Plant => "Plant",
            CellType::Tree => "Tree",
            CellType::Lawn => "Lawn",
            CellType::Water => "Water",
            CellType::Path => "Path",
            CellType::Building => "Building",
            CellType::Decking => "Decking",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SunExposure {
    Sun,
    Shade,
    /// Partial sun.
    Both,
}

/// One grid unit: a type plus optional plant/tree metadata.
///
/// Metadata survives a type change; it is simply not meaningful unless
/// [`CellType::has_details`] holds.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    #[serde(rename = "type")]
    pub cell_type: CellType,
    pub name: Option<String>,
    pub soil_ph: Option<f64>,
    pub sun_exposure: Option<SunExposure>,
    pub notes: Option<String>,
    pub info_url: Option<String>,
}

impl Cell {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn of_type(cell_type: CellType) -> Self {
        Self {
            cell_type,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.cell_type == CellType::Empty
    }

    /// Checks the fields that carry a numeric range.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ph) = self.soil_ph {
            if !ph.is_finite() || !(MIN_SOIL_PH..=MAX_SOIL_PH).contains(&ph) {
                return Err(format!(
                    "Soil pH must be between {MIN_SOIL_PH} and {MAX_SOIL_PH} (got {ph})."
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_type_and_skips_missing_fields() {
        let cell = Cell::of_type(CellType::Tree).with_name("Oak");
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "tree", "name": "Oak" }));
    }

    #[test]
    fn deserialises_camel_case_metadata() {
        let cell: Cell = serde_json::from_value(serde_json::json!({
            "type": "plant",
            "name": "Basil",
            "soilPh": 6.5,
            "sunExposure": "both",
            "infoUrl": "https://example.com/basil"
        }))
        .unwrap();
        assert_eq!(cell.cell_type, CellType::Plant);
        assert_eq!(cell.soil_ph, Some(6.5));
        assert_eq!(cell.sun_exposure, Some(SunExposure::Both));
        assert_eq!(cell.info_url.as_deref(), Some("https://example.com/basil"));
        assert!(cell.notes.is_none());
    }

    #[test]
    fn rejects_soil_ph_out_of_range() {
        let mut cell = Cell::of_type(CellType::Plant);
        cell.soil_ph = Some(14.5);
        assert!(cell.validate().is_err());
        cell.soil_ph = Some(f64::NAN);
        assert!(cell.validate().is_err());
        cell.soil_ph = Some(0.0);
        assert!(cell.validate().is_ok());
    }

    #[test]
    fn only_plants_and_trees_have_details() {
        assert!(CellType::Plant.has_details());
        assert!(CellType::Tree.has_details());
        assert!(!CellType::Lawn.has_details());
        assert!(!CellType::Empty.has_details());
    }
}
