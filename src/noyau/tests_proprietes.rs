//! Propriétés du pipeline (proptest).
//!
//! - add_multipliers est idempotent, quelle que soit l’entrée
//! - parse puis évaluation préfixe = évaluation directe de l’arbre qui a servi à écrire le texte

use proptest::prelude::*;

use super::prefixe::Bindings;
use super::{add_multipliers, eval_expression, parse_to_prefix};

const VARIABLES: [&str; 5] = ["x", "y", "x0", "v", "tf"];

/// Arbre de référence, indépendant du noyau.
#[derive(Clone, Debug)]
enum Arbre {
    Nombre(u32),
    Var(&'static str),
    Bin(char, Box<Arbre>, Box<Arbre>),
    Fonction(&'static str, Box<Arbre>),
}

fn arbre() -> impl Strategy<Value = Arbre> {
    let feuille = prop_oneof![
        (0u32..100).prop_map(Arbre::Nombre),
        prop::sample::select(VARIABLES.to_vec()).prop_map(Arbre::Var),
    ];
    feuille.prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            3 => (
                prop::sample::select(vec!['+', '-', '*', '/', '^']),
                inner.clone(),
                inner.clone()
            )
                .prop_map(|(op, a, b)| Arbre::Bin(op, Box::new(a), Box::new(b))),
            1 => (prop::sample::select(vec!["sin", "cos", "abs", "exp"]), inner)
                .prop_map(|(f, a)| Arbre::Fonction(f, Box::new(a))),
        ]
    })
}

fn palier(op: char) -> u8 {
    match op {
        '+' | '-' => 1,
        '*' | '/' => 2,
        _ => 3,
    }
}

/// Écriture infixe avec le minimum de parenthèses (gauche pour + - * /, droite pour ^).
fn ecrire(a: &Arbre) -> String {
    match a {
        Arbre::Nombre(n) => n.to_string(),
        Arbre::Var(v) => v.to_string(),
        Arbre::Fonction(f, x) => format!("{f}({})", ecrire(x)),
        Arbre::Bin(op, g, d) => {
            let p = palier(*op);
            let g_par = matches!(&**g, Arbre::Bin(o, ..) if palier(*o) < p || (p == 3 && palier(*o) == 3));
            let d_par = matches!(&**d, Arbre::Bin(o, ..) if palier(*o) < p || (p < 3 && palier(*o) == p));
            format!("{} {op} {}", entourer(ecrire(g), g_par), entourer(ecrire(d), d_par))
        }
    }
}

fn entourer(s: String, oui: bool) -> String {
    if oui {
        format!("({s})")
    } else {
        s
    }
}

fn valeur(a: &Arbre, b: &Bindings) -> f64 {
    match a {
        Arbre::Nombre(n) => f64::from(*n),
        Arbre::Var(v) => b[*v],
        Arbre::Fonction(f, x) => {
            let x = valeur(x, b);
            match *f {
                "sin" => x.sin(),
                "cos" => x.cos(),
                "abs" => x.abs(),
                _ => x.exp(),
            }
        }
        Arbre::Bin(op, g, d) => {
            let (x, y) = (valeur(g, b), valeur(d, b));
            match op {
                '+' => x + y,
                '-' => x - y,
                '*' => x * y,
                '/' => x / y,
                _ => x.powf(y),
            }
        }
    }
}

fn liaisons() -> impl Strategy<Value = Bindings> {
    prop::collection::vec(-10.0f64..10.0, VARIABLES.len()).prop_map(|vals| {
        VARIABLES
            .iter()
            .zip(vals)
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    })
}

proptest! {
    #[test]
    fn multiplications_idempotentes(s in "[a-z0-9 ()+*/^.#-]{0,24}") {
        let une = add_multipliers(&s);
        prop_assert_eq!(add_multipliers(&une), une);
    }

    #[test]
    fn multiplications_idempotentes_sur_formules(s in "(sin|cos|x|x2|2|3\\.5|tf| |\\(|\\)|\\+|\\*){0,12}") {
        let une = add_multipliers(&s);
        prop_assert_eq!(add_multipliers(&une), une);
    }

    #[test]
    fn parse_puis_evaluation_egale_evaluation_directe(a in arbre(), b in liaisons()) {
        let texte = ecrire(&a);
        let attendu = valeur(&a, &b);

        let (obtenu, _d) = eval_expression(&texte, &b)
            .map_err(|e| TestCaseError::fail(format!("{texte:?}: {e}")))?;

        prop_assert!(
            obtenu == attendu || (obtenu.is_nan() && attendu.is_nan()),
            "{} : obtenu {}, attendu {}", texte, obtenu, attendu
        );
    }

    #[test]
    fn prefixe_commence_par_la_racine(a in arbre()) {
        let texte = ecrire(&a);
        let prefixe = parse_to_prefix(&texte)
            .map_err(|e| TestCaseError::fail(format!("{texte:?}: {e}")))?;

        let racine = match &a {
            Arbre::Nombre(n) => n.to_string(),
            Arbre::Var(v) => v.to_string(),
            Arbre::Bin(op, ..) => op.to_string(),
            Arbre::Fonction(f, _) => f.to_string(),
        };
        prop_assert_eq!(&prefixe[0], &racine);
    }
}
