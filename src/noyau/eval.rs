//! Noyau: pipeline complet
//!
//! texte -> multiplications explicites -> jetons -> Expression -> préfixe
//!       -> OperationBuilder -> évaluation sous liaisons
//!
//! `parse_to_prefix` et `evaluate_prefix` sont les deux opérations offertes à l’appelant ;
//! `eval_expression` enchaîne les deux et rend en plus la démarche (trace affichable).

use super::analyse::analyze_with;
use super::erreur::{Error, ParseError};
use super::jetons::{format_tokens, tokenize_with};
use super::multiplication::add_multipliers_with;
use super::prefixe::{evaluate_prefix, Bindings};
use super::table::Table;

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct DemarcheNoyau {
    pub multiplications: String,
    pub jetons: String,
    pub prefixe: String,
    pub note: String,
}

/// Texte infixe -> séquence préfixe.
///
/// `"a*b - c"` => `["-", "*", "a", "b", "c"]`
pub fn parse_to_prefix(expression: &str) -> Result<Vec<String>, Error> {
    parse_avec_demarche(expression, &Table::STANDARD).map(|(prefixe, _)| prefixe)
}

/// API publique : évalue une expression infixe sous des liaisons et retourne:
/// - la valeur (flottant)
/// - la démarche (multiplications, jetons, préfixe)
pub fn eval_expression(
    expr_str: &str,
    bindings: &Bindings,
) -> Result<(f64, DemarcheNoyau), Error> {
    let (prefixe, demarche) = parse_avec_demarche(expr_str, &Table::STANDARD)?;
    let valeur = evaluate_prefix(&prefixe, bindings)?;
    Ok((valeur, demarche))
}

fn parse_avec_demarche(
    expr_str: &str,
    table: &Table,
) -> Result<(Vec<String>, DemarcheNoyau), Error> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ParseError::EmptyExpression.into());
    }

    // 1) Multiplications implicites
    let explicite = add_multipliers_with(s, table);

    // 2) Jetons
    let jetons = tokenize_with(&explicite, table)?;
    let jetons_txt = format_tokens(&jetons);

    // 3) Arbre puis notation préfixe
    let expression = analyze_with(&jetons, table)?;
    let prefixe = expression.to_prefix_notation();

    let d = DemarcheNoyau {
        multiplications: explicite,
        jetons: jetons_txt,
        prefixe: prefixe.join(" "),
        note: "Pipeline: multiplications implicites → jetons → arbre (paliers) → préfixe → pile d’opérations → valeur.".into(),
    };

    Ok((prefixe, d))
}
