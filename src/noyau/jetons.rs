// src/noyau/jetons.rs

use super::erreur::TokenizeError;
use super::reconnaisseurs::{plus_long_lexeme, Classe};
use super::table::{Function, Operator, Palier, Table, PROFONDEUR_MAX};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    // Nombre ("2.35") ou identifiant ("x0") : le texte est gardé tel quel.
    Terminal(String),

    Sum,
    Minus,
    Multiply,
    Divide,
    Pow,

    // Contenu d’une paire de parenthèses, déjà tokenisé.
    Group(Vec<Token>),

    // Nom de la liste blanche collé à sa parenthèse : "cos(x - 2)".
    Function(Function, Vec<Token>),
}

impl Token {
    pub fn from_operator(op: Operator) -> Token {
        match op {
            Operator::Sum => Token::Sum,
            Operator::Minus => Token::Minus,
            Operator::Multiply => Token::Multiply,
            Operator::Divide => Token::Divide,
            Operator::Pow => Token::Pow,
        }
    }

    pub fn operator(&self) -> Option<Operator> {
        match self {
            Token::Sum => Some(Operator::Sum),
            Token::Minus => Some(Operator::Minus),
            Token::Multiply => Some(Operator::Multiply),
            Token::Divide => Some(Operator::Divide),
            Token::Pow => Some(Operator::Pow),
            Token::Terminal(_) | Token::Group(_) | Token::Function(..) => None,
        }
    }

    pub fn palier(&self) -> Palier {
        self.operator().map_or(Palier::Atome, Operator::palier)
    }
}

/// Tokenize une chaîne (déjà pré-traitée) avec la table standard.
/// Supporte:
/// - nombres chiffre+('.'chiffre+)? et identifiants [A-Za-z_][A-Za-z_0-9]*
/// - opérateurs + - * / ^
/// - groupes ( ... ), tokenisés récursivement
/// - fonctions de la liste blanche : nom collé à '(' => Token::Function
pub fn tokenize(text: &str) -> Result<Vec<Token>, TokenizeError> {
    tokenize_with(text, &Table::STANDARD)
}

pub fn tokenize_with(text: &str, table: &Table) -> Result<Vec<Token>, TokenizeError> {
    let chars: Vec<char> = text.chars().collect();
    let (tokens, _) = scan(&chars, 0, table, None, 0)?;
    Ok(tokens)
}

/// Balaye `chars` à partir de `debut`.
///
/// `ouvrante` vaut la position de la '(' quand on est dans un groupe : le balayage s’arrête
/// alors sur la ')' correspondante. Retourne les jetons et l’index qui suit la partie consommée.
fn scan(
    chars: &[char],
    debut: usize,
    table: &Table,
    ouvrante: Option<usize>,
    profondeur: usize,
) -> Result<(Vec<Token>, usize), TokenizeError> {
    let mut tokens: Vec<Token> = Vec::new();

    // fin du dernier identifiant émis (pour reconnaître "nom(" sans espace)
    let mut fin_identifiant: Option<usize> = None;

    let mut i = debut;
    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == '(' {
            if profondeur >= PROFONDEUR_MAX {
                return Err(TokenizeError::NestingTooDeep { position: i });
            }

            let (enfants, suivant) = scan(chars, i + 1, table, Some(i), profondeur + 1)?;

            let fonction = match tokens.last() {
                Some(Token::Terminal(nom)) if fin_identifiant == Some(i) => table.fonction(nom),
                _ => None,
            };
            match fonction {
                Some(f) => {
                    tokens.pop();
                    tokens.push(Token::Function(f, enfants));
                }
                None => tokens.push(Token::Group(enfants)),
            }

            fin_identifiant = None;
            i = suivant;
            continue;
        }

        if c == ')' {
            return match ouvrante {
                Some(_) => Ok((tokens, i + 1)),
                None => Err(TokenizeError::UnexpectedClosingParenthesis { position: i }),
            };
        }

        let lex = plus_long_lexeme(chars, i, table).ok_or(TokenizeError::UnsupportedCharacter {
            character: c,
            position: i,
        })?;
        let texte: String = chars[lex.debut..lex.fin].iter().collect();

        if !lex.complet {
            return Err(TokenizeError::IncompleteToken {
                text: texte,
                position: i,
            });
        }

        match lex.classe {
            Classe::Operateur => {
                let op = table
                    .operateur(c)
                    .ok_or(TokenizeError::UnsupportedCharacter {
                        character: c,
                        position: i,
                    })?;
                tokens.push(Token::from_operator(op));
                fin_identifiant = None;
            }
            Classe::Nombre => {
                tokens.push(Token::Terminal(texte));
                fin_identifiant = None;
            }
            Classe::Identifiant => {
                tokens.push(Token::Terminal(texte));
                fin_identifiant = Some(lex.fin);
            }
        }

        i = lex.fin;
    }

    match ouvrante {
        Some(position) => Err(TokenizeError::UnclosedParenthesis { position }),
        None => Ok((tokens, i)),
    }
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Token::Terminal(texte) => texte.clone(),
            Token::Group(enfants) => format!("( {} )", format_tokens(enfants)),
            Token::Function(f, enfants) => format!("{}( {} )", f.name(), format_tokens(enfants)),
            op => op
                .operator()
                .map(|o| o.symbol().to_string())
                .unwrap_or_default(),
        };
        out.push(s);
    }
    out.join(" ")
}
