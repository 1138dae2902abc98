// src/noyau/expr.rs
//
// Arbre d’expression produit par l’analyse des jetons.
// - Trivial   : littéral numérique ou identifiant, texte inchangé
// - Binary    : opérateur + - * / ^ avec ses deux opérandes
// - Function  : fonction de la liste blanche appliquée à un opérande
//
// Une seule opération : aplatir en notation préfixe (polonaise), parcours en profondeur.
// Les opérandes sont des Box : un BinaryOperation sans opérande n’est pas représentable.

use super::table::{Function, Operator};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    Trivial(String),
    BinaryOperation {
        operator: Operator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    FunctionExpression {
        function: Function,
        operand: Box<Expression>,
    },
}

impl Expression {
    pub fn trivial(texte: impl Into<String>) -> Expression {
        Expression::Trivial(texte.into())
    }

    pub fn binary(operator: Operator, left: Expression, right: Expression) -> Expression {
        Expression::BinaryOperation {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn function(function: Function, operand: Expression) -> Expression {
        Expression::FunctionExpression {
            function,
            operand: Box::new(operand),
        }
    }

    /// Notation préfixe : l’opérateur (ou le nom de fonction) précède ses opérandes.
    ///
    /// `(2*x) + 1` => `["+", "*", "2", "x", "1"]`
    pub fn to_prefix_notation(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.ecrire_prefixe(&mut out);
        out
    }

    fn ecrire_prefixe(&self, out: &mut Vec<String>) {
        match self {
            Expression::Trivial(texte) => out.push(texte.clone()),
            Expression::BinaryOperation {
                operator,
                left,
                right,
            } => {
                out.push(operator.symbol().to_string());
                left.ecrire_prefixe(out);
                right.ecrire_prefixe(out);
            }
            Expression::FunctionExpression { function, operand } => {
                out.push(function.name().to_string());
                operand.ecrire_prefixe(out);
            }
        }
    }
}
