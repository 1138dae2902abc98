//! Noyau: compilateur d’expressions infixes + évaluateur préfixe
//!
//! Organisation interne :
//! - table.rs          : opérateurs, liste blanche des fonctions, garde-fous (lecture seule)
//! - reconnaisseurs.rs : lexèmes par candidats “en course” (plus long lexème)
//! - multiplication.rs : multiplications implicites rendues explicites
//! - jetons.rs         : tokenisation récursive (groupes, fonctions)
//! - analyse.rs        : jetons -> Expression par paliers de précédence
//! - expr.rs           : arbre d’expression + notation préfixe
//! - prefixe.rs        : OperationBuilder (pile) + évaluation sous liaisons
//! - erreur.rs         : TokenizeError / ParseError / EvaluationError
//! - eval.rs           : pipeline complet + démarche

pub mod analyse;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod jetons;
pub mod multiplication;
pub mod prefixe;
pub mod reconnaisseurs;
pub mod table;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{Error, EvaluationError, ParseError, TokenizeError};
pub use eval::{eval_expression, parse_to_prefix, DemarcheNoyau};
pub use multiplication::add_multipliers;
pub use prefixe::{evaluate_prefix, Atom, Bindings, Operation, OperationBuilder};
