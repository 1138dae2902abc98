// src/noyau/multiplication.rs
//
// Pré-traitement : rendre explicites les multiplications implicites.
//   "2x"         => "2*x"
//   "k(a + b)c"  => "k*(a + b)*c"
//   "x2"         => "x2"        (un seul identifiant, jamais coupé)
//   "sin(x)"     => "sin(x)"    (fonction de la liste blanche collée à sa parenthèse)
//
// Règles:
// - Le texte est découpé en segments au niveau des parenthèses ; chaque groupe est traité
//   récursivement puis ré-enveloppé.
// - Dans un segment, on reconnaît les atomes par plus long lexème (reconnaisseurs.rs).
// - On insère '*' devant un atome (nombre, identifiant, groupe) si l’atome précédent est une
//   valeur (nombre, identifiant, groupe fermé).
// - Exception : '(' collé à un nom de fonction de la liste blanche.
//
// Ce pré-traitement ne signale aucune erreur : parenthèses orphelines et caractères inconnus
// sont recopiés tels quels, la tokenisation les refusera ensuite.
// Il est idempotent : un '*' inséré sépare deux atomes et bloque toute nouvelle insertion.

use super::reconnaisseurs::{plus_long_lexeme, Classe};
use super::table::{Table, PROFONDEUR_MAX};

/// Nature du dernier atome émis dans le segment courant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Precedent {
    Rien,
    Operateur,
    Valeur,
    /// Identifiant de la liste blanche ; `fin` = index juste après le nom.
    Fonction { fin: usize },
}

impl Precedent {
    fn est_valeur(self) -> bool {
        matches!(self, Precedent::Valeur | Precedent::Fonction { .. })
    }
}

/// Multiplications explicites, table standard.
pub fn add_multipliers(text: &str) -> String {
    add_multipliers_with(text, &Table::STANDARD)
}

pub fn add_multipliers_with(text: &str, table: &Table) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    segment(&chars, table, 0, &mut out);
    out
}

fn segment(chars: &[char], table: &Table, profondeur: usize, out: &mut String) {
    // garde-fou : au-delà, on recopie sans toucher (la tokenisation refusera)
    if profondeur > PROFONDEUR_MAX {
        out.extend(chars);
        return;
    }

    let mut prec = Precedent::Rien;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            out.push(c);
            i += 1;
            continue;
        }

        if c == '(' {
            let appel = matches!(prec, Precedent::Fonction { fin } if fin == i);
            if prec.est_valeur() && !appel {
                out.push('*');
            }

            let fermante = parenthese_fermante(chars, i);
            let fin_groupe = fermante.unwrap_or(chars.len());

            out.push('(');
            segment(&chars[i + 1..fin_groupe], table, profondeur + 1, out);

            match fermante {
                Some(j) => {
                    out.push(')');
                    i = j + 1;
                    prec = Precedent::Valeur;
                }
                None => {
                    // '(' jamais fermée : tout le reste était le groupe
                    i = chars.len();
                }
            }
            continue;
        }

        if c == ')' {
            // orpheline
            out.push(c);
            i += 1;
            prec = Precedent::Rien;
            continue;
        }

        match plus_long_lexeme(chars, i, table) {
            None => {
                out.push(c);
                i += 1;
                prec = Precedent::Rien;
            }
            Some(lex) => {
                let texte: String = chars[lex.debut..lex.fin].iter().collect();

                prec = match lex.classe {
                    Classe::Operateur => Precedent::Operateur,
                    Classe::Nombre | Classe::Identifiant => {
                        if prec.est_valeur() {
                            out.push('*');
                        }
                        if lex.classe == Classe::Identifiant && table.fonction(&texte).is_some() {
                            Precedent::Fonction { fin: lex.fin }
                        } else {
                            Precedent::Valeur
                        }
                    }
                };

                out.push_str(&texte);
                i = lex.fin;
            }
        }
    }
}

/// Index de la ')' qui ferme la '(' en `ouvrante`, en tenant compte de l’imbrication.
pub(crate) fn parenthese_fermante(chars: &[char], ouvrante: usize) -> Option<usize> {
    let mut profondeur = 0usize;
    for (j, &c) in chars.iter().enumerate().skip(ouvrante) {
        match c {
            '(' => profondeur += 1,
            ')' => {
                profondeur -= 1;
                if profondeur == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
    }
    None
}
