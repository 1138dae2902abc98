// src/noyau/table.rs
//
// Tables figées du noyau (lecture seule).
// - Operator : les cinq opérateurs binaires + - * / ^
// - Function : liste blanche des fonctions reconnues (unaires)
// - Table    : regroupe les deux, passée par référence à chaque étape
//
// Aucune table n’est modifiable à l’exécution : `Table::STANDARD` est une const.

/// Garde-fou : profondeur maximale (parenthèses imbriquées, arbre, pile du builder).
pub const PROFONDEUR_MAX: usize = 512;

/// Palier de précédence : du plus lâche (appliqué en dernier) au plus serré.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Palier {
    Additif,
    Multiplicatif,
    Puissance,
    Atome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Sum,
    Minus,
    Multiply,
    Divide,
    Pow,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Sum,
        Operator::Minus,
        Operator::Multiply,
        Operator::Divide,
        Operator::Pow,
    ];

    pub fn symbol(self) -> char {
        match self {
            Operator::Sum => '+',
            Operator::Minus => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Pow => '^',
        }
    }

    pub fn palier(self) -> Palier {
        match self {
            Operator::Sum | Operator::Minus => Palier::Additif,
            Operator::Multiply | Operator::Divide => Palier::Multiplicatif,
            Operator::Pow => Palier::Puissance,
        }
    }

    /// Arithmétique flottante standard : division par zéro => inf/NaN, jamais d’erreur.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operator::Sum => a + b,
            Operator::Minus => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => a / b,
            Operator::Pow => a.powf(b),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Exp,
    Ln,
    Log,
    Abs,
}

impl Function {
    pub const ALL: [Function; 11] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Sqrt,
        Function::Exp,
        Function::Ln,
        Function::Log,
        Function::Abs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sqrt => "sqrt",
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Log => "log",
            Function::Abs => "abs",
        }
    }

    /// `log` = logarithme décimal, `ln` = népérien.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => x.tan(),
            Function::Asin => x.asin(),
            Function::Acos => x.acos(),
            Function::Atan => x.atan(),
            Function::Sqrt => x.sqrt(),
            Function::Exp => x.exp(),
            Function::Ln => x.ln(),
            Function::Log => x.log10(),
            Function::Abs => x.abs(),
        }
    }
}

/// Configuration lecture seule, partagée par référence entre les étapes.
#[derive(Debug)]
pub struct Table {
    operateurs: &'static [Operator],
    fonctions: &'static [Function],
}

impl Table {
    pub const STANDARD: Table = Table {
        operateurs: &Operator::ALL,
        fonctions: &Function::ALL,
    };

    pub fn operateur(&self, c: char) -> Option<Operator> {
        self.operateurs.iter().copied().find(|op| op.symbol() == c)
    }

    /// Opérateur à partir d’un atome texte ("+", "-", ...). Un seul caractère exigé.
    pub fn operateur_texte(&self, s: &str) -> Option<Operator> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.operateur(c),
            _ => None,
        }
    }

    /// Correspondance EXACTE : un préfixe ("si" pour "sin") ne compte pas.
    pub fn fonction(&self, name: &str) -> Option<Function> {
        self.fonctions.iter().copied().find(|f| f.name() == name)
    }

    pub fn fonctions(&self) -> &'static [Function] {
        self.fonctions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fonction_correspondance_exacte() {
        let t = &Table::STANDARD;
        assert_eq!(t.fonction("cos"), Some(Function::Cos));
        assert_eq!(t.fonction("co"), None);
        assert_eq!(t.fonction("cosh"), None);
        assert_eq!(t.fonction("COS"), None);
    }

    #[test]
    fn operateur_texte_un_seul_caractere() {
        let t = &Table::STANDARD;
        assert_eq!(t.operateur_texte("^"), Some(Operator::Pow));
        assert_eq!(t.operateur_texte("--"), None);
        assert_eq!(t.operateur_texte(""), None);
        assert_eq!(t.operateur_texte("x"), None);
    }

    #[test]
    fn paliers_ordonnes() {
        assert!(Operator::Sum.palier() < Operator::Divide.palier());
        assert_eq!(Operator::Sum.palier(), Operator::Minus.palier());
        assert!(Operator::Multiply.palier() < Operator::Pow.palier());
        assert!(Operator::Pow.palier() < Palier::Atome);
    }

    #[test]
    fn division_par_zero_sans_erreur() {
        assert!(Operator::Divide.apply(1.0, 0.0).is_infinite());
        assert!(Operator::Divide.apply(0.0, 0.0).is_nan());
    }
}
