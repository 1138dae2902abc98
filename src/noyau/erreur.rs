//! Erreurs du noyau.
//!
//! Trois familles, une par étape du pipeline :
//! - TokenizeError  : caractère non supporté, parenthèses déséquilibrées
//! - ParseError     : entrée vide, fenêtre de jetons sans racine utilisable
//! - EvaluationError: séquence préfixe mal formée, variable sans valeur
//!
//! Aucune reprise : chaque étape échoue immédiatement, sans sortie partielle.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("caractère inattendu: '{character}' (position {position})")]
    UnsupportedCharacter { character: char, position: usize },

    #[error("parenthèse fermante sans ouvrante (position {position})")]
    UnexpectedClosingParenthesis { position: usize },

    #[error("parenthèse non fermée (ouverte position {position})")]
    UnclosedParenthesis { position: usize },

    #[error("jeton incomplet: '{text}' (position {position})")]
    IncompleteToken { text: String, position: usize },

    #[error("parenthèses trop imbriquées (position {position})")]
    NestingTooDeep { position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Entrée vide")]
    EmptyExpression,

    #[error("opérande manquant pour '{operator}'")]
    MissingOperand { operator: char },

    #[error("opérateur manquant entre deux termes")]
    MissingOperator,

    #[error("fonction sans argument: '{name}'")]
    FunctionWithoutArgument { name: String },

    #[error("expression trop imbriquée")]
    NestingTooDeep,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("séquence préfixe vide")]
    EmptySequence,

    #[error("opérande manquant pour '{symbol}'")]
    UnfilledOperand { symbol: String },

    #[error("atome en trop après une expression complète: '{atom}'")]
    TrailingAtom { atom: String },

    #[error("variable sans valeur: '{name}'")]
    UnboundVariable { name: String },

    #[error("séquence préfixe trop imbriquée")]
    NestingTooDeep,
}

/// Erreur du pipeline complet (parse puis évaluation).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}
