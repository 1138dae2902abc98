// src/noyau/prefixe.rs
//
// Évaluation d’une séquence en notation préfixe.
//
// Construction (OperationBuilder), sans récursion :
// - la pile démarre avec un seul noeud Empty ;
// - un atome donne une Operation : littéral => Identity, "+ - * / ^" => coquille binaire,
//   nom de la liste blanche => coquille de fonction, sinon => Variable ;
// - une coquille incomplète est empilée (elle recevra les atomes suivants) ;
// - un noeud complet est “fermé” : dépilé et rangé dans le premier emplacement libre du noeud
//   en dessous, ce qui peut compléter ce dernier, et ainsi de suite.
// - build() rend l’unique racine complète.
//
// Invariant : un noeud est complet (is_valid) exactement quand tous ses emplacements sont remplis.
// Un emplacement ne contient jamais Empty.
//
// Évaluation : arithmétique flottante standard (1/0 = inf, 0/0 = NaN) ; une variable absente
// des liaisons est une erreur explicite.

use std::collections::HashMap;
use std::fmt;

use super::erreur::EvaluationError;
use super::table::{Function, Operator, Table, PROFONDEUR_MAX};

/// Liaisons nom -> valeur fournies au moment de l’évaluation.
pub type Bindings = HashMap<String, f64>;

/// Atome d’une séquence préfixe : nombre déjà connu ou texte (littéral, opérateur, nom).
#[derive(Clone, Debug, PartialEq)]
pub enum Atom {
    Number(f64),
    Symbol(String),
}

impl From<f64> for Atom {
    fn from(v: f64) -> Self {
        Atom::Number(v)
    }
}

impl From<&str> for Atom {
    fn from(s: &str) -> Self {
        Atom::Symbol(s.to_string())
    }
}

impl From<String> for Atom {
    fn from(s: String) -> Self {
        Atom::Symbol(s)
    }
}

impl From<&String> for Atom {
    fn from(s: &String) -> Self {
        Atom::Symbol(s.clone())
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Number(v) => write!(f, "{v}"),
            Atom::Symbol(s) => f.write_str(s),
        }
    }
}

/// Littéral numérique : commence par un chiffre ou '.', éventuellement après un signe.
/// ("inf", "nan" restent des noms de variables.)
fn litteral(s: &str) -> Option<f64> {
    let corps = s.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(s);
    let premier = corps.chars().next()?;
    if !(premier.is_ascii_digit() || premier == '.') {
        return None;
    }
    s.parse::<f64>().ok()
}

#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    Empty,
    Identity(f64),
    Variable(String),
    BinaryOperator {
        operator: Operator,
        a: Option<Box<Operation>>,
        b: Option<Box<Operation>>,
    },
    Function {
        function: Function,
        argument: Option<Box<Operation>>,
    },
}

impl Operation {
    pub fn from_atom(atom: &Atom, table: &Table) -> Operation {
        match atom {
            Atom::Number(v) => Operation::Identity(*v),
            Atom::Symbol(s) => {
                if let Some(v) = litteral(s) {
                    Operation::Identity(v)
                } else if let Some(operator) = table.operateur_texte(s) {
                    Operation::BinaryOperator {
                        operator,
                        a: None,
                        b: None,
                    }
                } else if let Some(function) = table.fonction(s) {
                    Operation::Function {
                        function,
                        argument: None,
                    }
                } else {
                    Operation::Variable(s.clone())
                }
            }
        }
    }

    /// Complet : feuille, ou tous les emplacements remplis. Empty ne l’est jamais.
    pub fn is_valid(&self) -> bool {
        match self {
            Operation::Empty => false,
            Operation::Identity(_) | Operation::Variable(_) => true,
            Operation::BinaryOperator { a, b, .. } => a.is_some() && b.is_some(),
            Operation::Function { argument, .. } => argument.is_some(),
        }
    }

    /// Range `operande` dans le premier emplacement libre. Sans effet sur un noeud sans place.
    fn apply(&mut self, operande: Operation) {
        match self {
            Operation::BinaryOperator { a, b, .. } => {
                if a.is_none() {
                    *a = Some(Box::new(operande));
                } else if b.is_none() {
                    *b = Some(Box::new(operande));
                }
            }
            Operation::Function { argument, .. } => {
                if argument.is_none() {
                    *argument = Some(Box::new(operande));
                }
            }
            Operation::Empty | Operation::Identity(_) | Operation::Variable(_) => {}
        }
    }

    /// Texte de l’atome qui a produit ce noeud (messages d’erreur).
    fn symbole(&self) -> String {
        match self {
            Operation::Empty => String::new(),
            Operation::Identity(v) => v.to_string(),
            Operation::Variable(nom) => nom.clone(),
            Operation::BinaryOperator { operator, .. } => operator.symbol().to_string(),
            Operation::Function { function, .. } => function.name().to_string(),
        }
    }

    pub fn evaluate(&self, bindings: &Bindings) -> Result<f64, EvaluationError> {
        match self {
            Operation::Empty => Err(EvaluationError::EmptySequence),
            Operation::Identity(v) => Ok(*v),
            Operation::Variable(nom) => {
                bindings
                    .get(nom)
                    .copied()
                    .ok_or_else(|| EvaluationError::UnboundVariable { name: nom.clone() })
            }
            Operation::BinaryOperator {
                operator,
                a: Some(a),
                b: Some(b),
            } => Ok(operator.apply(a.evaluate(bindings)?, b.evaluate(bindings)?)),
            Operation::Function {
                function,
                argument: Some(x),
            } => Ok(function.apply(x.evaluate(bindings)?)),
            incomplet => Err(EvaluationError::UnfilledOperand {
                symbol: incomplet.symbole(),
            }),
        }
    }
}

/// Pile de noeuds partiellement construits. Un builder par évaluation, jeté ensuite.
#[derive(Debug)]
pub struct OperationBuilder<'t> {
    pile: Vec<Operation>,
    table: &'t Table,
}

impl OperationBuilder<'static> {
    pub fn builder() -> Self {
        OperationBuilder::with_table(&Table::STANDARD)
    }

    /// Construit depuis une suite d’atomes (nombres et/ou textes).
    pub fn from_prefix<I>(atoms: I) -> Result<Operation, EvaluationError>
    where
        I: IntoIterator,
        I::Item: Into<Atom>,
    {
        let mut b = OperationBuilder::builder();
        for atom in atoms {
            b.push(atom)?;
        }
        b.build()
    }

    /// Construit depuis un texte préfixe séparé par des espaces : "+ x0 * v tf".
    pub fn from_prefix_text(text: &str) -> Result<Operation, EvaluationError> {
        OperationBuilder::from_prefix(text.split_whitespace())
    }
}

impl<'t> OperationBuilder<'t> {
    pub fn with_table(table: &'t Table) -> Self {
        OperationBuilder {
            pile: vec![Operation::Empty],
            table,
        }
    }

    pub fn push(&mut self, atom: impl Into<Atom>) -> Result<&mut Self, EvaluationError> {
        let atom = atom.into();

        // une racine déjà complète ne reçoit plus rien
        if self.pile.last().is_some_and(Operation::is_valid) {
            return Err(EvaluationError::TrailingAtom {
                atom: atom.to_string(),
            });
        }

        let operation = Operation::from_atom(&atom, self.table);

        if operation.is_valid() {
            self.fermer(operation);
        } else {
            if self.pile.len() >= PROFONDEUR_MAX {
                return Err(EvaluationError::NestingTooDeep);
            }
            if matches!(self.pile.last(), Some(Operation::Empty)) {
                self.pile.pop();
            }
            self.pile.push(operation);
        }

        Ok(self)
    }

    /// Range un noeud complet dans ceux du dessous, tant qu’ils se complètent.
    fn fermer(&mut self, mut complet: Operation) {
        loop {
            match self.pile.pop() {
                None | Some(Operation::Empty) => {
                    self.pile.push(complet);
                    return;
                }
                Some(mut parent) => {
                    parent.apply(complet);
                    if parent.is_valid() {
                        complet = parent;
                    } else {
                        self.pile.push(parent);
                        return;
                    }
                }
            }
        }
    }

    /// Racine complète ; erreur si la séquence n’était pas bien formée.
    pub fn build(mut self) -> Result<Operation, EvaluationError> {
        match self.pile.pop() {
            None | Some(Operation::Empty) => Err(EvaluationError::EmptySequence),
            Some(racine) if self.pile.is_empty() && racine.is_valid() => Ok(racine),
            Some(sommet) => Err(EvaluationError::UnfilledOperand {
                symbol: sommet.symbole(),
            }),
        }
    }
}

/// Évalue une séquence préfixe sous des liaisons.
///
/// `["+", "x0", "*", "v", "tf"]` avec x0 = 0, v = 1, tf = 5 => 5
pub fn evaluate_prefix<I>(atoms: I, bindings: &Bindings) -> Result<f64, EvaluationError>
where
    I: IntoIterator,
    I::Item: Into<Atom>,
{
    OperationBuilder::from_prefix(atoms)?.evaluate(bindings)
}
