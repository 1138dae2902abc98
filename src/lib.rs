//! fisica: formules de physique saisies en texte, évaluées sous des valeurs connues.
//!
//! Le noyau est pur (aucune E/S, aucun état global mutable) ; l’interface egui
//! (binaire `fisica`) ne fait que lui passer des chaînes et des liaisons.

pub mod noyau;

pub use noyau::{add_multipliers, eval_expression, evaluate_prefix, parse_to_prefix};
