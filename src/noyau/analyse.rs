// src/noyau/analyse.rs
//
// Jetons -> arbre d’expression, par paliers de précédence.
//
// Paliers (du plus lâche au plus serré) : {+, -}  {*, /}  {^}  {terme}
// - On cherche, dans la fenêtre de jetons, l’opérateur binaire du palier le plus lâche :
//   il devient la racine locale (appliqué en dernier), puis on analyse chaque moitié.
// - À palier égal : le plus à DROITE pour + - * / (a - b - c = (a - b) - c),
//   le plus à GAUCHE pour ^ (a^b^c = a^(b^c)).
// - Un + ou - en tête de fenêtre, ou juste après un autre opérateur, est un signe :
//   "-E" => 0 - E, "+E" => E. Le signe lie moins fort que ^ (-2^2 = -(2^2)).
// - Sans opérateur binaire, la fenêtre doit être un seul terme : Group (récursion),
//   Function (récursion + enveloppe) ou Terminal.

use super::erreur::ParseError;
use super::expr::Expression;
use super::jetons::Token;
use super::table::{Operator, Palier, Table, PROFONDEUR_MAX};

pub fn analyze(tokens: &[Token]) -> Result<Expression, ParseError> {
    analyze_with(tokens, &Table::STANDARD)
}

pub fn analyze_with(tokens: &[Token], table: &Table) -> Result<Expression, ParseError> {
    analyser(tokens, table, 0)
}

fn analyser(tokens: &[Token], table: &Table, profondeur: usize) -> Result<Expression, ParseError> {
    if profondeur > PROFONDEUR_MAX {
        return Err(ParseError::NestingTooDeep);
    }
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let signe = signe_en_tete(tokens);

    if let Some((i, op)) = point_de_coupure(tokens) {
        // un signe en tête passe avant une coupure sur ^
        if signe.is_none() || op.palier() < Palier::Puissance {
            let gauche = &tokens[..i];
            let droite = &tokens[i + 1..];
            if droite.is_empty() {
                return Err(ParseError::MissingOperand {
                    operator: op.symbol(),
                });
            }
            return Ok(Expression::binary(
                op,
                analyser(gauche, table, profondeur + 1)?,
                analyser(droite, table, profondeur + 1)?,
            ));
        }
    }

    if let Some(op) = signe {
        let reste = &tokens[1..];
        if reste.is_empty() {
            return Err(ParseError::MissingOperand {
                operator: op.symbol(),
            });
        }
        let e = analyser(reste, table, profondeur + 1)?;
        return Ok(match op {
            Operator::Minus => Expression::binary(Operator::Minus, Expression::trivial("0"), e),
            _ => e,
        });
    }

    match tokens {
        [seul] => resoudre(seul, table, profondeur),
        [premier, ..] => match premier.operator() {
            Some(op) => Err(ParseError::MissingOperand {
                operator: op.symbol(),
            }),
            None => Err(ParseError::MissingOperator),
        },
        [] => Err(ParseError::EmptyExpression),
    }
}

/// Index + opérateur de la racine locale, parmi les opérateurs en position binaire.
fn point_de_coupure(tokens: &[Token]) -> Option<(usize, Operator)> {
    let mut meilleur: Option<(usize, Operator)> = None;

    for (i, tok) in tokens.iter().enumerate() {
        let op = match tok.operator() {
            Some(op) => op,
            None => continue,
        };

        // position binaire : un terme juste avant
        if i == 0 || tokens[i - 1].operator().is_some() {
            continue;
        }

        meilleur = match meilleur {
            None => Some((i, op)),
            Some((_, m)) if op.palier() < m.palier() => Some((i, op)),
            Some((_, m)) if op.palier() == m.palier() && op.palier() != Palier::Puissance => {
                Some((i, op))
            }
            garde => garde,
        };
    }

    meilleur
}

fn signe_en_tete(tokens: &[Token]) -> Option<Operator> {
    match tokens.first() {
        Some(Token::Sum) => Some(Operator::Sum),
        Some(Token::Minus) => Some(Operator::Minus),
        _ => None,
    }
}

/// Fenêtre réduite à un seul jeton.
fn resoudre(token: &Token, table: &Table, profondeur: usize) -> Result<Expression, ParseError> {
    match token {
        Token::Terminal(texte) => {
            if table.fonction(texte).is_some() {
                return Err(ParseError::FunctionWithoutArgument { name: texte.clone() });
            }
            Ok(Expression::trivial(texte.as_str()))
        }
        Token::Group(enfants) => analyser(enfants, table, profondeur + 1),
        Token::Function(f, enfants) => {
            if enfants.is_empty() {
                return Err(ParseError::FunctionWithoutArgument {
                    name: f.name().to_string(),
                });
            }
            let operande = analyser(enfants, table, profondeur + 1)?;
            Ok(Expression::function(*f, operande))
        }
        op => Err(ParseError::MissingOperand {
            operator: op.operator().map_or('?', Operator::symbol),
        }),
    }
}
