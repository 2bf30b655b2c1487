//! Tier catalog: the sellable phases and their two pricing tiers.
//!
//! The catalog is loaded once at startup. Afterwards only the administrative
//! price path may change it; features and structure are fixed.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::types::Tier;

/// One pricing level of a phase
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TierOffer {
    /// Price in the smallest currency unit. Not validated: negative values
    /// are carried as-is.
    pub price: i64,
    /// Feature labels in display order
    #[serde(default)]
    pub features: Vec<String>,
}

impl TierOffer {
    /// Create an offer from a price and feature labels
    pub fn new<I, S>(price: i64, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            price,
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether a feature label is part of this offer (exact text match)
    pub fn has_feature(&self, text: &str) -> bool {
        self.features.iter().any(|f| f == text)
    }
}

/// One sellable service module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub selected_tier: Tier,
    pub starter: TierOffer,
    pub standard_plus: TierOffer,
}

fn default_enabled() -> bool {
    true
}

impl Phase {
    /// The offer for a given tier
    pub fn offer(&self, tier: Tier) -> &TierOffer {
        match tier {
            Tier::Starter => &self.starter,
            Tier::StandardPlus => &self.standard_plus,
        }
    }

    /// Mutable access to the offer for a given tier
    pub fn offer_mut(&mut self, tier: Tier) -> &mut TierOffer {
        match tier {
            Tier::Starter => &mut self.starter,
            Tier::StandardPlus => &mut self.standard_plus,
        }
    }

    /// The offer matching the current tier selection
    pub fn selected_offer(&self) -> &TierOffer {
        self.offer(self.selected_tier)
    }

    /// Price of the current tier selection
    pub fn selected_price(&self) -> i64 {
        self.selected_offer().price
    }

    /// Extra cost of Standard Plus over Starter
    pub fn upgrade_delta(&self) -> i64 {
        self.standard_plus.price.saturating_sub(self.starter.price)
    }
}

/// Ordered list of phases
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub phases: Vec<Phase>,
}

impl Catalog {
    /// Create a catalog from phases, normalised to the startup state
    pub fn new(phases: Vec<Phase>) -> Self {
        let mut catalog = Self { phases };
        catalog.reset_selection();
        catalog
    }

    /// Number of phases
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Check if the catalog has no phases
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Find a phase by id
    pub fn get(&self, id: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Every phase enabled with Starter selected
    pub fn reset_selection(&mut self) {
        for phase in &mut self.phases {
            phase.enabled = true;
            phase.selected_tier = Tier::Starter;
        }
    }

    /// Save the catalog to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize catalog to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write catalog to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load a catalog from a JSON file
    ///
    /// Selection fields in the file are ignored: a freshly loaded catalog
    /// always starts with every phase enabled on Starter.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog from {:?}", path.as_ref()))?;

        let catalog: Self =
            serde_json::from_str(&content).context("Failed to parse catalog JSON")?;

        Ok(Self::new(catalog.phases))
    }

    /// Validate structural fields. Prices are deliberately left alone.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (index, phase) in self.phases.iter().enumerate() {
            if phase.id.trim().is_empty() {
                anyhow::bail!("Phase #{} has an empty id", index + 1);
            }
            if !seen.insert(phase.id.as_str()) {
                anyhow::bail!("Duplicate phase id '{}'", phase.id);
            }
            if phase.title.trim().is_empty() {
                anyhow::bail!("Phase '{}' has an empty title", phase.id);
            }
        }
        Ok(())
    }

    /// The built-in real estate digitalisation catalog
    pub fn builtin() -> Self {
        Self::new(vec![
            builtin_phase(
                "p1",
                "PHASE 1 — Présence Web & Acquisition",
                "Mise en place de votre vitrine digitale et capture de prospects.",
                "Attirer et convertir les premiers visiteurs.",
                15_000,
                &[
                    "Landing page optimisée",
                    "Formulaire de contact simple",
                    "Hébergement inclus",
                    "Nom de domaine .com/.dz",
                ],
                25_000,
                &[
                    "Site multi-pages (SEO)",
                    "Blog & News interactives",
                    "Intégration Newsletters",
                ],
            ),
            builtin_phase(
                "p2",
                "PHASE 2 — CRM & Pilotage Commercial",
                "Centralisation de vos prospects et suivi du cycle de vente.",
                "Optimiser la conversion prospect-client.",
                80_000,
                &[
                    "Gestion des contacts de base",
                    "Fiches prospects standards",
                    "Historique des échanges",
                    "Attribution manuelle",
                ],
                140_000,
                &[
                    "Pipeline de vente dynamique",
                    "Relances automatiques",
                    "Segmentation avancée (Scoring)",
                    "Application Mobile Commerciale",
                ],
            ),
            builtin_phase(
                "p3",
                "PHASE 3 — Gestion du Stock Immobilier",
                "Inventaire temps réel de vos lots (appartements, locaux).",
                "Assurer une visibilité parfaite sur la disponibilité.",
                90_000,
                &[
                    "Tableau de bord de base",
                    "Statuts Libre/Réservé/Vendu",
                    "Plans de masse PDF",
                    "Recherche simple",
                ],
                160_000,
                &[
                    "Maquette 3D Interactive",
                    "Filtrage avancé multi-critères",
                    "Génération automatique de fiches de lots",
                    "Alerte stock critique",
                ],
            ),
            builtin_phase(
                "p4",
                "PHASE 4 — Réservations & Suivi des Ventes",
                "Digitalisation du processus contractuel.",
                "Accélérer les délais de signature.",
                70_000,
                &[
                    "Gestion des acomptes",
                    "Suivi des paiements simples",
                    "Calendrier de signatures",
                    "Échéancier de base",
                ],
                130_000,
                &[
                    "Workflow de validation notaire",
                    "Portail Client sécurisé",
                    "Suivi des désistements",
                ],
            ),
            builtin_phase(
                "p5",
                "PHASE 5 — Reporting & Analytics",
                "Tableaux de bord pour la direction.",
                "Prendre des décisions basées sur la donnée.",
                30_000,
                &[
                    "Rapport mensuel PDF",
                    "Ventes par commercial",
                    "Graphiques de base",
                    "Export Excel",
                ],
                70_000,
                &[
                    "Tableaux de bord Temps Réel",
                    "Prévisionnel de CA (Forecasting)",
                    "Alertes sur objectifs",
                ],
            ),
            // Maintenance prices are monthly
            builtin_phase(
                "p6",
                "PHASE 6 — Automatisations & Maintenance",
                "Support technique et automatisation des tâches.",
                "Garantir la stabilité et l'évolutivité.",
                20_000,
                &[
                    "Support mail 48h",
                    "Maintenance corrective",
                    "Sauvegardes hebdo",
                    "1h de formation/mois",
                ],
                70_000,
                &[
                    "Support Hotline 4h",
                    "Maintenance évolutive",
                    "Sauvegardes quotidiennes",
                    "Accompagnement stratégique continu",
                ],
            ),
        ])
    }
}

/// Build a catalog phase whose Standard Plus list repeats every Starter
/// feature followed by its exclusives.
#[allow(clippy::too_many_arguments)]
fn builtin_phase(
    id: &str,
    title: &str,
    description: &str,
    objective: &str,
    starter_price: i64,
    starter_features: &[&str],
    plus_price: i64,
    plus_exclusives: &[&str],
) -> Phase {
    let plus_features = starter_features.iter().chain(plus_exclusives.iter()).copied();
    Phase {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        objective: objective.to_string(),
        enabled: true,
        selected_tier: Tier::Starter,
        starter: TierOffer::new(starter_price, starter_features.iter().copied()),
        standard_plus: TierOffer::new(plus_price, plus_features),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 6);
        assert!(catalog.validate().is_ok());

        let p1 = catalog.get("p1").expect("p1 exists");
        assert_eq!(p1.starter.price, 15_000);
        assert_eq!(p1.standard_plus.price, 25_000);
        assert_eq!(p1.standard_plus.features.len(), 7);
        assert_eq!(p1.upgrade_delta(), 10_000);
    }

    #[test]
    fn test_upgrade_delta_saturates() {
        let mut p1 = Catalog::builtin().phases.remove(0);
        p1.starter.price = i64::MIN;
        p1.standard_plus.price = i64::MAX;
        assert_eq!(p1.upgrade_delta(), i64::MAX);
    }

    #[test]
    fn test_builtin_plus_repeats_starter_features() {
        for phase in &Catalog::builtin().phases {
            for feature in &phase.starter.features {
                assert!(
                    phase.standard_plus.has_feature(feature),
                    "{} missing '{}'",
                    phase.id,
                    feature
                );
            }
        }
    }

    #[test]
    fn test_startup_state_all_enabled_on_starter() {
        for phase in &Catalog::builtin().phases {
            assert!(phase.enabled);
            assert_eq!(phase.selected_tier, Tier::Starter);
        }
    }

    #[test]
    fn test_selected_offer_follows_tier() {
        let mut phase = Catalog::builtin().phases.remove(1);
        assert_eq!(phase.selected_price(), 80_000);
        phase.selected_tier = Tier::StandardPlus;
        assert_eq!(phase.selected_price(), 140_000);
        phase.offer_mut(Tier::Starter).price = 1;
        assert_eq!(phase.starter.price, 1);
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut catalog = Catalog::builtin();
        catalog.phases[1].id = "p1".to_string();
        let err = catalog.validate().expect_err("duplicate id must fail");
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_validate_accepts_negative_prices() {
        let mut catalog = Catalog::builtin();
        catalog.phases[0].starter.price = -5;
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_resets_selection() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");

        let mut catalog = Catalog::builtin();
        catalog.phases[0].enabled = false;
        catalog.phases[0].selected_tier = Tier::StandardPlus;
        catalog.phases[0].starter.price = 12_345;
        catalog.save_to_file(&path).expect("save");

        let loaded = Catalog::load_from_file(&path).expect("load");
        assert!(loaded.phases[0].enabled);
        assert_eq!(loaded.phases[0].selected_tier, Tier::Starter);
        assert_eq!(loaded.phases[0].starter.price, 12_345);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = Catalog::load_from_file("/nonexistent/catalog.json").expect_err("missing");
        assert!(format!("{:#}", err).contains("catalog.json"));
    }
}
