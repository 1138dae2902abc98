//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de l’écran (formule, valeurs connues, résultat, erreur, démarche)
//! et offrir des opérations simples (C/CLR/AC, formules préparées) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing de formule).
//! - Actions déterministes, sans effet de bord caché.
//! - Défense en profondeur : bornes sur la précision d’affichage.

use fisica::noyau::{Bindings, DemarcheNoyau};

/// Décimales affichées par défaut.
pub const DECIMALES_DEFAUT: usize = 6;

/// Garde-fou : au-delà, un f64 n’a plus rien à dire.
pub const DECIMALES_MAX: usize = 17;

/// Formule préparée (page cinématique) : texte + valeurs d’exemple.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    pub nom: &'static str,
    pub formule: &'static str,
    pub variables: &'static str,
}

/// Mouvement rectiligne uniforme : position finale, puis temps de parcours.
pub const PRESETS: [Preset; 2] = [
    Preset {
        nom: "MRU : position",
        formule: "x0 + v*tf",
        variables: "x0 = 0, v = 1, tf = 5",
    },
    Preset {
        nom: "MRU : temps",
        formule: "(xf - x0)/v",
        variables: "xf = 10, x0 = 0, v = 2",
    },
];

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrées utilisateur ---
    pub entree: String,    // formule infixe
    pub variables: String, // "x0 = 0, v = 1, tf = 5"

    // --- sorties ---
    pub resultat: String,     // valeur formatée
    pub erreur: String,       // message d’erreur (si parsing/éval échoue)
    pub resultat_dispo: bool, // false si rien à afficher

    // --- démarche (panneau d’explication) ---
    pub demarche: DemarcheNoyau,

    // --- paramètres ---
    pub decimales: usize,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            variables: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            resultat_dispo: false,
            demarche: DemarcheNoyau::default(),
            decimales: DECIMALES_DEFAUT,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrées + résultats + décimales par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.variables.clear();
        self.clear_resultats();
        self.decimales = DECIMALES_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement la formule (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher aux entrées).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.resultat_dispo = false;
        self.demarche = DemarcheNoyau::default();
        self.focus_entree = true;
    }

    /// Charge une formule préparée avec ses valeurs d’exemple.
    pub fn charger_preset(&mut self, preset: &Preset) {
        self.entree = preset.formule.to_string();
        self.variables = preset.variables.to_string();
        self.clear_resultats();
    }

    /// Utilitaire : placer une erreur.
    ///
    /// On coupe résultat + démarche (non fiables si l’évaluation échoue).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.resultat.clear();
        self.resultat_dispo = false;
        self.demarche = DemarcheNoyau::default();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet (valeur + démarche).
    pub fn set_resultats(&mut self, valeur: f64, demarche: DemarcheNoyau) {
        self.erreur.clear();
        self.resultat = format_valeur(valeur, self.decimales);
        self.resultat_dispo = true;
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// Garde-fou : limite les décimales.
    pub fn set_decimales(&mut self, decimales: usize) {
        self.decimales = decimales.min(DECIMALES_MAX);
        self.focus_entree = true;
    }

    /// Valeurs connues, lues dans le champ `variables`.
    pub fn liaisons(&self) -> Result<Bindings, String> {
        parse_bindings(&self.variables)
    }
}

/// Lit des paires `nom = nombre` séparées par ',', ';' ou des retours à la ligne.
/// Un nom répété : la dernière valeur gagne.
pub fn parse_bindings(texte: &str) -> Result<Bindings, String> {
    let mut out = Bindings::new();

    for morceau in texte.split([',', ';', '\n']) {
        let morceau = morceau.trim();
        if morceau.is_empty() {
            continue;
        }

        let (nom, valeur) = morceau
            .split_once('=')
            .ok_or_else(|| format!("liaison sans '=': '{morceau}'"))?;
        let nom = nom.trim();
        let valeur = valeur.trim();

        if !est_identifiant(nom) {
            return Err(format!("nom de variable invalide: '{nom}'"));
        }
        let v: f64 = valeur
            .parse()
            .map_err(|_| format!("valeur invalide pour {nom}: '{valeur}'"))?;

        out.insert(nom.to_string(), v);
    }

    Ok(out)
}

fn est_identifiant(nom: &str) -> bool {
    let mut chars = nom.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Affichage d’une valeur flottante (NaN => indéfini).
pub fn format_valeur(v: f64, decimales: usize) -> String {
    if v.is_nan() {
        "indéfini".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "∞" } else { "-∞" }.to_string()
    } else {
        format!("{v:.decimales$}")
    }
}
