//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - toute entrée, même absurde, rend Ok ou une erreur typée : jamais de panique
//! - invariant clé : si parse_to_prefix réussit, la séquence préfixe se reconstruit sans erreur

use std::time::{Duration, Instant};

use super::erreur::{Error, ParseError};
use super::prefixe::{Bindings, OperationBuilder};
use super::{eval_expression, parse_to_prefix};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération (bornée) ------------------------ */

const VARIABLES: [&str; 5] = ["x", "y", "x0", "v", "tf"];
const FONCTIONS: [&str; 4] = ["sin", "cos", "sqrt", "abs"];

fn liaisons() -> Bindings {
    VARIABLES
        .iter()
        .enumerate()
        .map(|(i, v)| (v.to_string(), i as f64 + 0.5))
        .collect()
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(4) {
        0 => format!("{}", rng.pick(50)),
        1 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        _ => VARIABLES[rng.pick(VARIABLES.len() as u32) as usize].to_string(),
    }
}

/// Expressions bien formées, avec multiplications implicites et signes.
fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(9) {
        0 => gen_atom(rng),
        1 => format!("{} + {}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("{} - {}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("{}*{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({})/({})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(4)),
        6 => {
            // multiplication implicite : nombre collé à un groupe ou une variable
            format!("{}({})", rng.pick(9) + 1, gen_expr(rng, depth - 1))
        }
        7 => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        _ => format!("-({})", gen_expr(rng, depth - 1)),
    }
}

/// Bruit : fragments valides et invalides mélangés.
fn gen_bruit(rng: &mut Rng) -> String {
    const MORCEAUX: [&str; 16] = [
        "x", "2", "3.5", "+", "-", "*", "/", "^", "(", ")", " ", "sin", "sin(", "#", ".", "x2",
    ];
    let n = rng.pick(12) as usize + 1;
    (0..n)
        .map(|_| MORCEAUX[rng.pick(MORCEAUX.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let b = liaisons();

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let (valeur, d) =
            eval_expression(&expr, &b).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));

        // déterminisme : même entrée => même sortie (NaN compris)
        let (encore, d2) = eval_expression(&expr, &b).unwrap_or_else(|e| panic!("err: {e}"));
        assert!(
            valeur == encore || (valeur.is_nan() && encore.is_nan()),
            "expr={expr:?}"
        );
        assert_eq!(d, d2);
    }
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for i in 0..400 {
        budget(t0, max);

        // une entrée sur deux reste bien formée, l’autre est du bruit
        let expr = if i % 2 == 0 {
            gen_expr(&mut rng, 3)
        } else {
            gen_bruit(&mut rng)
        };
        match parse_to_prefix(&expr) {
            Ok(prefixe) => {
                // toute sortie du parseur est une séquence préfixe bien formée
                assert!(
                    OperationBuilder::from_prefix(&prefixe).is_ok(),
                    "expr={expr:?} prefixe={prefixe:?}"
                );
                seen_ok += 1;
            }
            Err(e) => {
                assert!(!e.to_string().is_empty());
                assert!(!matches!(e, Error::Evaluation(_)), "expr={expr:?}");
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 10, "trop peu d’erreurs: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(1);

    let expr = somme_balancee("1/2", 800);
    let (valeur, _d) =
        eval_expression(&expr, &Bindings::new()).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(valeur, 400.0);
}

#[test]
fn fuzz_safe_somme_plate_bornee() {
    // somme plate : arbre penché à gauche, profondeur = nombre de termes
    let courte = vec!["1"; 300].join("+");
    let (valeur, _d) = eval_expression(&courte, &Bindings::new()).unwrap();
    assert_eq!(valeur, 300.0);

    let longue = vec!["1"; 2000].join("+");
    assert_eq!(
        parse_to_prefix(&longue),
        Err(Error::Parse(ParseError::NestingTooDeep))
    );
}

#[test]
fn fuzz_safe_signes_en_serie() {
    let mut rng = Rng::new(42);
    for _ in 0..50 {
        let n = rng.pick(6) as usize;
        let signes: String = (0..n).map(|_| if rng.coin() { '-' } else { '+' }).collect();
        let moins = signes.chars().filter(|&c| c == '-').count();
        let attendu = if moins % 2 == 0 { 3.0 } else { -3.0 };

        let expr = format!("2 + {signes}3 - 2");
        let (valeur, _d) = eval_expression(&expr, &Bindings::new()).unwrap();
        assert_eq!(valeur, attendu, "expr={expr:?}");
    }
}
