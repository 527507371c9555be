//! Listing model
//!
//! Types shared by the terminal front and the browser (WASM) front:
//! - Mode: which data-entry workflow is active
//! - FieldName: the fixed set of listing fields the save endpoint accepts
//! - ExtractedFields: field values produced by the PDF extraction endpoint
//! - Listing: the currently persisted listing as returned by `/api/villa`

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Data-entry workflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Fields come from an uploaded PDF
    Pdf,
    /// Fields are typed into the form
    #[default]
    Manual,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Pdf => "pdf",
            Mode::Manual => "manual",
        }
    }

    /// DOM id of the selector control
    pub fn selector_id(&self) -> &'static str {
        match self {
            Mode::Pdf => "mode-pdf",
            Mode::Manual => "mode-manual",
        }
    }

    /// DOM id of the content panel
    pub fn panel_id(&self) -> &'static str {
        match self {
            Mode::Pdf => "content-pdf",
            Mode::Manual => "content-manual",
        }
    }
}

/// Anything other than `"pdf"` selects the manual workflow.
impl From<&str> for Mode {
    fn from(raw: &str) -> Self {
        if raw == "pdf" {
            Mode::Pdf
        } else {
            Mode::Manual
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing field accepted by `/admin/save`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    Reference,
    Title,
    TitleEn,
    Price,
    Location,
    DistanceCity,
    Description,
    DescriptionEn,
    TerrainArea,
    BuiltArea,
    Bedrooms,
    PoolSize,
    Features,
    FeaturesEn,
    Equipment,
    EquipmentEn,
    BusinessInfo,
    BusinessInfoEn,
    InvestmentBenefits,
    InvestmentBenefitsEn,
    Documents,
    DocumentsEn,
    ContactPhone,
    ContactEmail,
    ContactWebsite,
}

impl FieldName {
    /// Every known field, in form order
    pub const ALL: [FieldName; 25] = [
        FieldName::Reference,
        FieldName::Title,
        FieldName::TitleEn,
        FieldName::Price,
        FieldName::Location,
        FieldName::DistanceCity,
        FieldName::Description,
        FieldName::DescriptionEn,
        FieldName::TerrainArea,
        FieldName::BuiltArea,
        FieldName::Bedrooms,
        FieldName::PoolSize,
        FieldName::Features,
        FieldName::FeaturesEn,
        FieldName::Equipment,
        FieldName::EquipmentEn,
        FieldName::BusinessInfo,
        FieldName::BusinessInfoEn,
        FieldName::InvestmentBenefits,
        FieldName::InvestmentBenefitsEn,
        FieldName::Documents,
        FieldName::DocumentsEn,
        FieldName::ContactPhone,
        FieldName::ContactEmail,
        FieldName::ContactWebsite,
    ];

    /// Form key, also the input element id
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Reference => "reference",
            FieldName::Title => "title",
            FieldName::TitleEn => "title_en",
            FieldName::Price => "price",
            FieldName::Location => "location",
            FieldName::DistanceCity => "distance_city",
            FieldName::Description => "description",
            FieldName::DescriptionEn => "description_en",
            FieldName::TerrainArea => "terrain_area",
            FieldName::BuiltArea => "built_area",
            FieldName::Bedrooms => "bedrooms",
            FieldName::PoolSize => "pool_size",
            FieldName::Features => "features",
            FieldName::FeaturesEn => "features_en",
            FieldName::Equipment => "equipment",
            FieldName::EquipmentEn => "equipment_en",
            FieldName::BusinessInfo => "business_info",
            FieldName::BusinessInfoEn => "business_info_en",
            FieldName::InvestmentBenefits => "investment_benefits",
            FieldName::InvestmentBenefitsEn => "investment_benefits_en",
            FieldName::Documents => "documents",
            FieldName::DocumentsEn => "documents_en",
            FieldName::ContactPhone => "contact_phone",
            FieldName::ContactEmail => "contact_email",
            FieldName::ContactWebsite => "contact_website",
        }
    }

    pub fn parse(key: &str) -> Option<FieldName> {
        FieldName::ALL.iter().copied().find(|f| f.as_str() == key)
    }

    /// Form label
    pub fn label(&self) -> &'static str {
        match self {
            FieldName::Reference => "Référence",
            FieldName::Title => "Titre",
            FieldName::TitleEn => "Titre (anglais)",
            FieldName::Price => "Prix (€)",
            FieldName::Location => "Localisation",
            FieldName::DistanceCity => "Distance du centre-ville",
            FieldName::Description => "Description",
            FieldName::DescriptionEn => "Description (anglais)",
            FieldName::TerrainArea => "Surface du terrain (m²)",
            FieldName::BuiltArea => "Surface construite (m²)",
            FieldName::Bedrooms => "Chambres",
            FieldName::PoolSize => "Piscine",
            FieldName::Features => "Équipements principaux",
            FieldName::FeaturesEn => "Équipements principaux (anglais)",
            FieldName::Equipment => "Équipement et confort",
            FieldName::EquipmentEn => "Équipement et confort (anglais)",
            FieldName::BusinessInfo => "Exploitation commerciale",
            FieldName::BusinessInfoEn => "Exploitation commerciale (anglais)",
            FieldName::InvestmentBenefits => "Atouts investisseurs",
            FieldName::InvestmentBenefitsEn => "Atouts investisseurs (anglais)",
            FieldName::Documents => "Documents disponibles",
            FieldName::DocumentsEn => "Documents disponibles (anglais)",
            FieldName::ContactPhone => "Téléphone",
            FieldName::ContactEmail => "Email",
            FieldName::ContactWebsite => "Site web",
        }
    }

    /// Rendered as a textarea
    pub fn is_multiline(&self) -> bool {
        matches!(
            self,
            FieldName::Description
                | FieldName::DescriptionEn
                | FieldName::Features
                | FieldName::FeaturesEn
                | FieldName::Equipment
                | FieldName::EquipmentEn
                | FieldName::BusinessInfo
                | FieldName::BusinessInfoEn
                | FieldName::InvestmentBenefits
                | FieldName::InvestmentBenefitsEn
                | FieldName::Documents
                | FieldName::DocumentsEn
        )
    }

    /// Carries an AI enhancement button
    pub fn is_enhanceable(&self) -> bool {
        self.is_multiline() || matches!(self, FieldName::Title | FieldName::TitleEn)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field values keyed by known field name.
///
/// Keys outside [`FieldName::ALL`] are dropped on decode, so anything serialized
/// from here is always a subset of the known field set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    values: BTreeMap<FieldName, String>,
}

impl ExtractedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a JSON object. Returns `None` for anything that is not an object.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let values = object
            .iter()
            .filter_map(|(key, value)| {
                let field = FieldName::parse(key)?;
                Some((field, text_of(value)))
            })
            .collect();
        Some(Self { values })
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: FieldName, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Pairs to put on the wire: empty values are omitted.
    pub fn form_pairs(&self) -> Vec<(FieldName, &str)> {
        self.iter().filter(|(_, value)| !value.is_empty()).collect()
    }
}

impl FromIterator<(FieldName, String)> for ExtractedFields {
    fn from_iter<I: IntoIterator<Item = (FieldName, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Text form of a JSON value, following the server's loose typing.
///
/// Falsy values (`null`, `false`, `0`) become empty strings so they are
/// omitted on save; string lists are joined one item per line.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) {
                String::new()
            } else {
                n.to_string()
            }
        }
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(text_of)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(_) => value.to_string(),
    }
}

/// Currently persisted listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub fields: ExtractedFields,
    /// Image filenames in gallery order
    pub images: Vec<String>,
}

impl Listing {
    /// Decode the `/api/villa` body. `{error: ...}` means there is no listing yet.
    pub fn from_json(value: &Value) -> Option<Self> {
        if value.get("error").is_some() {
            return None;
        }
        let fields = ExtractedFields::from_json(value)?;
        let images = value
            .get("images")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Some(Self { fields, images })
    }
}
