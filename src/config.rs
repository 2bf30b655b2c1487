//! Proposal configuration
//!
//! Branding, issuer details and the fixed wording of the proposal document.
//! Every field has a default so a partial JSON file only overrides what it
//! names.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::document::geometry::Rgb;

/// Company issuing the proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuerConfig {
    pub company: String,
    pub address_lines: Vec<String>,
    pub email: String,
    pub phone: String,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            company: "Osmoz Digital Services".to_string(),
            address_lines: vec!["Draria, Alger, Algérie".to_string()],
            email: "contact@osmoz.dz".to_string(),
            phone: "+213 (0) 556 20 74 44".to_string(),
        }
    }
}

/// Everything configurable about the generated proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalConfig {
    /// Brand name printed in the header
    pub brand_name: String,
    /// Tagline under the brand name
    pub tagline: String,
    /// Primary color as `#rrggbb`
    pub primary_color: String,
    /// Title shown above the reference number
    pub document_title: String,
    /// Prefix of the cosmetic reference label
    pub reference_prefix: String,
    pub issuer: IssuerConfig,
    /// Sector line in the recipient block
    pub recipient_sector: String,
    /// Client used when none is given
    pub default_client: String,
    pub intro_heading: String,
    /// Introduction paragraph; `{client}` is replaced with the client name
    pub intro_template: String,
    pub modules_heading: String,
    /// Currency code appended to amounts
    pub currency: String,
    /// Suffix after the grand total (tax mention)
    pub total_suffix: String,
    /// City used in the signature date line
    pub city: String,
    /// Proposal validity in calendar days
    pub validity_days: u32,
    /// Generated-by footer line; `{days}` is replaced with `validity_days`
    pub generated_by: String,
    /// Legal registration footer line
    pub legal_line: String,
    /// Prefix of the exported file name
    pub file_prefix: String,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self {
            brand_name: "OSMOZ".to_string(),
            tagline: "DIGITAL REAL ESTATE SOLUTIONS".to_string(),
            primary_color: "#2563eb".to_string(),
            document_title: "OFFRE COMMERCIALE".to_string(),
            reference_prefix: "OSM".to_string(),
            issuer: IssuerConfig::default(),
            recipient_sector: "Secteur : Promotion Immobilière".to_string(),
            default_client: "Djoudi Promotion".to_string(),
            intro_heading: "Objet de la Mission".to_string(),
            intro_template: "Suite à nos échanges, nous avons le plaisir de vous soumettre \
                cette proposition d'accompagnement. L'objectif est de digitaliser \
                intégralement le parcours client de {client}, en optimisant la gestion \
                de vos stocks et en automatisant votre force de vente."
                .to_string(),
            modules_heading: "01  Détail des modules sélectionnés".to_string(),
            currency: "DZD".to_string(),
            total_suffix: "HT".to_string(),
            city: "Alger".to_string(),
            validity_days: 30,
            generated_by: "Document généré par le configurateur Osmoz v2.0 • \
                Validité {days} jours calendaires"
                .to_string(),
            legal_line: "Osmoz Digital Services - RC: 16/00-1234567B12 - \
                IF: 001234567890123 - AI: 12345678901"
                .to_string(),
            file_prefix: "Offre_Osmoz".to_string(),
        }
    }
}

impl ProposalConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).with_context(|| {
            format!("Failed to read proposal config from {:?}", path.as_ref())
        })?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse proposal config JSON")?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize proposal config to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write proposal config to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load from `path` when given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Primary color, falling back to the default blue on a malformed value
    pub fn primary_rgb(&self) -> Rgb {
        Rgb::from_hex(&self.primary_color).unwrap_or(Rgb::BRAND_BLUE)
    }

    /// Introduction paragraph for a client
    pub fn introduction(&self, client: &str) -> String {
        self.intro_template.replace("{client}", client)
    }

    /// Generated-by footer line with the validity period filled in
    pub fn generated_by_line(&self) -> String {
        self.generated_by
            .replace("{days}", &self.validity_days.to_string())
    }

    /// Caption above the issuer signature
    pub fn issuer_signature_label(&self) -> String {
        format!("LE PRESTATAIRE ({})", self.brand_name.to_uppercase())
    }

    /// Caption above the client signature
    pub fn client_signature_label(&self, client: &str) -> String {
        format!("LE CLIENT ({})", client.to_uppercase())
    }
}
