// src/app/vue.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Deux champs : formule infixe + valeurs connues ("x0 = 0, v = 1")
// - Clavier : Enter évalue (quand un des deux champs est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Formules préparées (cinématique) en un clic
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;
use fisica::noyau::eval_expression;
use fisica::noyau::table::{Function, Operator};

use super::etat::{AppCalc, DECIMALES_MAX, PRESETS};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Fisica");
                ui.add_space(6.0);

                self.ui_presets(ui);

                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_presets(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label("Cinématique :");
            for preset in &PRESETS {
                let resp = ui
                    .add_sized([132.0, 28.0], egui::Button::new(preset.nom))
                    .on_hover_text(preset.formule);
                if resp.clicked() {
                    self.charger_preset(preset);
                }
            }
        });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Formule :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: x0 + v*tf, 2sin(t)cos(t), (xf - x0)/v")
                .id_source("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        ui.label("Valeurs connues :");
        let resp_vars = ui.add(
            egui::TextEdit::singleline(&mut self.variables)
                .desired_width(ui.available_width())
                .hint_text("Ex: x0 = 0, v = 1, tf = 5")
                .id_source("variables_edit")
                .code_editor(),
        );

        // --- Clavier : Enter évalue (seulement si un champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if enter && (resp.has_focus() || resp_vars.has_focus()) {
            self.eval_via_noyau();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            // Contrat: C = formule seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement la formule", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.separator();

            ui.label("Affichage :");
            let mut d = self.decimales as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut d)
                    .speed(1)
                    .range(0..=DECIMALES_MAX as u32)
                    .suffix(" décimales"),
            );
            if resp.changed() {
                self.set_decimales(d as usize);
            }
        });

        ui.add_space(8.0);

        // Opérateurs + fonctions + "="
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);

            for op in Operator::ALL {
                let s = op.symbol().to_string();
                self.bouton_insert(ui, &s, &s, InsertKind::Op);
            }

            ui.separator();

            for f in Function::ALL {
                self.bouton_insert(ui, f.name(), &format!("{}(", f.name()), InsertKind::Func);
            }

            ui.separator();

            for v in ["x0", "xf", "v", "t", "tf"] {
                self.bouton_insert(ui, v, v, InsertKind::Word);
            }

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
            }
        });

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_fisica")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                ui.label("");
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                ui.label("");
                ui.label("");
                ui.label("");
                ui.end_row();
            });
    }

    /// DEL : retire d’un coup un appel de fonction ouvert ("asin(", "sqrt(").
    fn backspace_entree(&mut self) {
        let entree = self.entree.trim_end();

        // le plus long d’abord : "asin(" avant "sin("
        let motif = Function::ALL
            .iter()
            .map(|f| format!("{}(", f.name()))
            .filter(|m| entree.ends_with(m.as_str()))
            .max_by_key(|m| m.len());

        let garde = match motif {
            Some(m) => entree.len() - m.len(),
            None => entree
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0),
        };

        self.entree.truncate(garde);
        let propre = self.entree.trim_end().len();
        self.entree.truncate(propre);
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        if self.resultat_dispo {
            Self::champ_monospace(ui, "resultat_out", &self.resultat, 1);
        } else {
            ui.monospace("indisponible");
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(
                    ui,
                    "Multiplications",
                    "demarche_mult",
                    &self.demarche.multiplications,
                );
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "Préfixe", "demarche_prefixe", &self.demarche.prefixe);
                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Lecture seule : Frame + Label monospace, pas de TextEdit.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() {
            return;
        }
        self.inserer(to_insert, kind);
        self.focus_entree = true;
    }

    /// Insertion en fin de formule, espaces posés pour ne pas coller deux noms.
    fn inserer(&mut self, to_insert: &str, kind: InsertKind) {
        let dernier = self.entree.chars().rev().find(|c| !c.is_whitespace());

        match kind {
            InsertKind::CloseParen => {
                let propre = self.entree.trim_end().len();
                self.entree.truncate(propre);
            }
            InsertKind::OpenParen => {
                // "k(" reste collé (multiplication implicite), "sin(" reste un appel
                if matches!(dernier, Some(c) if c.is_ascii_digit() || c == ')') {
                    self.entree.push(' ');
                }
            }
            InsertKind::Func | InsertKind::Word => {
                // "v" puis "tf" ne doit pas donner "vtf"
                if matches!(dernier, Some(c) if c.is_ascii_alphanumeric() || c == '_' || c == ')')
                    && !self.entree.ends_with(char::is_whitespace)
                {
                    self.entree.push(' ');
                }
            }
            InsertKind::Op => {
                let propre = self.entree.trim_end().len();
                self.entree.truncate(propre);
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
            }
            InsertKind::Digit => {}
        }

        self.entree.push_str(to_insert);
        if matches!(kind, InsertKind::Op) {
            self.entree.push(' ');
        }
    }

    /// Évalue la formule via le noyau, puis dépose résultat/démarche dans l’état UI.
    fn eval_via_noyau(&mut self) {
        let liaisons = match self.liaisons() {
            Ok(b) => b,
            Err(msg) => {
                self.set_erreur(msg);
                return;
            }
        };

        match eval_expression(&self.entree, &liaisons) {
            Ok((valeur, demarche)) => self.set_resultats(valeur, demarche),
            Err(e) => self.set_erreur(e.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Word,
    Func,
    Op,
    OpenParen,
    CloseParen,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saisie(etapes: &[(&str, InsertKind)]) -> String {
        let mut app = AppCalc::default();
        for (s, k) in etapes {
            app.inserer(s, *k);
        }
        app.entree
    }

    #[test]
    fn insertion_ne_colle_pas_deux_noms() {
        let s = saisie(&[
            ("x0", InsertKind::Word),
            ("+", InsertKind::Op),
            ("v", InsertKind::Word),
            ("tf", InsertKind::Word),
        ]);
        assert_eq!(s, "x0 + v tf");
    }

    #[test]
    fn insertion_fonction_reste_un_appel() {
        let s = saisie(&[
            ("2", InsertKind::Digit),
            ("sin(", InsertKind::Func),
            ("t", InsertKind::Word),
            (")", InsertKind::CloseParen),
        ]);
        assert_eq!(s, "2 sin(t)");
        assert_eq!(
            fisica::noyau::parse_to_prefix(&s).unwrap(),
            ["*", "2", "sin", "t"]
        );
    }

    #[test]
    fn del_retire_la_fonction_la_plus_longue() {
        let mut app = AppCalc::default();
        app.entree = "1 + asin(".into();
        app.backspace_entree();
        assert_eq!(app.entree, "1 +");
        app.backspace_entree();
        assert_eq!(app.entree, "1");
        app.backspace_entree();
        assert_eq!(app.entree, "");
        app.backspace_entree();
        assert_eq!(app.entree, "");
    }

    #[test]
    fn evaluation_preset_mru() {
        let mut app = AppCalc::default();
        app.charger_preset(&PRESETS[0]);
        app.eval_via_noyau();
        assert!(app.erreur.is_empty(), "{}", app.erreur);
        assert_eq!(app.resultat, "5.000000");
        assert_eq!(app.demarche.prefixe, "+ x0 * v tf");
    }

    #[test]
    fn evaluation_variable_manquante() {
        let mut app = AppCalc::default();
        app.entree = "x0 + v*tf".into();
        app.variables = "x0 = 0".into();
        app.eval_via_noyau();
        assert!(!app.resultat_dispo);
        assert!(app.erreur.contains("v"));
    }
}
