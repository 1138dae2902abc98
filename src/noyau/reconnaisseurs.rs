// src/noyau/reconnaisseurs.rs
//
// Reconnaisseurs de lexèmes “en course”.
// - À une position donnée, on amorce un candidat par classe dont le premier caractère convient.
// - On avance tous les candidats d’un caractère à la fois, en éliminant ceux qui rejettent.
// - Quand plus aucun candidat ne survit, le premier survivant de l’étape précédente gagne
//   (plus long lexème, sans retour arrière).
//
// Grammaires:
// - Nombre      : chiffre+ ('.' chiffre+)?
// - Identifiant : [A-Za-z_][A-Za-z_0-9]*
// - Opérateur   : un seul caractère de la table (+ - * / ^)
//
// Partagé par le pré-traitement (multiplications implicites) et la tokenisation.

use super::table::Table;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classe {
    Nombre,
    Identifiant,
    Operateur,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EtatNombre {
    Entier,
    Point, // "12." : pas encore acceptable
    Decimales,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Candidat {
    Nombre(EtatNombre),
    Identifiant,
    Operateur,
}

impl Candidat {
    /// Un candidat par classe qui “supporte” le caractère initial (ordre fixe).
    fn amorcer(c: char, table: &Table) -> Vec<Candidat> {
        let mut out = Vec::with_capacity(1);
        if c.is_ascii_digit() {
            out.push(Candidat::Nombre(EtatNombre::Entier));
        }
        if c.is_ascii_alphabetic() || c == '_' {
            out.push(Candidat::Identifiant);
        }
        if table.operateur(c).is_some() {
            out.push(Candidat::Operateur);
        }
        out
    }

    /// None = le candidat rejette `c` et sort de la course.
    fn avancer(self, c: char) -> Option<Candidat> {
        use EtatNombre::*;

        match self {
            Candidat::Nombre(Entier) if c.is_ascii_digit() => Some(Candidat::Nombre(Entier)),
            Candidat::Nombre(Entier) if c == '.' => Some(Candidat::Nombre(Point)),
            Candidat::Nombre(Point | Decimales) if c.is_ascii_digit() => {
                Some(Candidat::Nombre(Decimales))
            }
            Candidat::Nombre(_) => None,

            Candidat::Identifiant if c.is_ascii_alphanumeric() || c == '_' => {
                Some(Candidat::Identifiant)
            }
            Candidat::Identifiant => None,

            Candidat::Operateur => None,
        }
    }

    fn accepte(self) -> bool {
        !matches!(self, Candidat::Nombre(EtatNombre::Point))
    }

    fn classe(self) -> Classe {
        match self {
            Candidat::Nombre(_) => Classe::Nombre,
            Candidat::Identifiant => Classe::Identifiant,
            Candidat::Operateur => Classe::Operateur,
        }
    }
}

/// Lexème reconnu sur `chars[debut..fin]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lexeme {
    pub classe: Classe,
    pub debut: usize,
    pub fin: usize,
    /// false si le gagnant s’est arrêté dans un état non acceptant (ex: "3.").
    pub complet: bool,
}

/// Plus long lexème commençant à `debut`.
/// None si aucune classe ne supporte le caractère initial.
pub fn plus_long_lexeme(chars: &[char], debut: usize, table: &Table) -> Option<Lexeme> {
    let first = *chars.get(debut)?;
    let mut actifs = Candidat::amorcer(first, table);
    if actifs.is_empty() {
        return None;
    }

    let mut i = debut + 1;
    while let Some(&c) = chars.get(i) {
        let suivants: Vec<Candidat> = actifs.iter().filter_map(|cand| cand.avancer(c)).collect();
        if suivants.is_empty() {
            break;
        }
        actifs = suivants;
        i += 1;
    }

    // premier survivant acceptant, sinon le premier survivant tout court (lexème incomplet)
    let gagnant = actifs
        .iter()
        .copied()
        .find(|c| c.accepte())
        .unwrap_or(actifs[0]);

    Some(Lexeme {
        classe: gagnant.classe(),
        debut,
        fin: i,
        complet: gagnant.accepte(),
    })
}
