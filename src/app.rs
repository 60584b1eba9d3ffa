//! Main application UI.
//! Two screens: the word list table with filters, and the flashcard game.

use crate::controller::StudyController;
use crate::models::{Advance, Knowledge, SessionState, WordId};
use chrono::{DateTime, Local, Utc};
use eframe::egui;

/// Page sizes offered next to the pager
const PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

/// Application screen states
#[derive(Default, Clone, Copy, PartialEq)]
enum AppScreen {
    #[default]
    WordList,
    FlashCards,
}

/// Word being edited in the modal form
struct EditForm {
    id: WordId,
    word: String,
    translation: String,
    example: String,
}

pub struct VocabApp {
    controller: StudyController,
    current_screen: AppScreen,
    name_filter: String,
    edit_form: Option<EditForm>,
    show_reset_dialog: bool,
    notice: Option<String>,
}

/// Formats a save timestamp in local time
fn format_saved_at(time: DateTime<Utc>) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}

impl eframe::App for VocabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.current_screen, AppScreen::WordList, "Home");
                ui.selectable_value(&mut self.current_screen, AppScreen::FlashCards, "Flash Cards");
            });
        });

        match self.current_screen {
            AppScreen::WordList => self.render_word_list(ctx),
            AppScreen::FlashCards => self.render_flashcards(ctx),
        }

        self.render_edit_dialog(ctx);

        if self.show_reset_dialog {
            let mut confirmed = false;
            let mut cancelled = false;
            egui::Window::new("Reset all data to default?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label("Imported datasets and knowledge tags will be lost.");
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            cancelled = true;
                        }
                        if ui.button("Yes").clicked() {
                            confirmed = true;
                        }
                    });
                });

            if confirmed {
                self.show_reset_dialog = false;
                self.handle_reset();
            }
            if cancelled {
                self.show_reset_dialog = false;
            }
        }

        if let Some(message) = &self.notice {
            let mut close = false;
            egui::Window::new("Notice")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        close = true;
                    }
                });
            if close {
                self.notice = None;
            }
        }
    }
}

impl VocabApp {
    pub fn new(controller: StudyController) -> Self {
        Self {
            controller,
            current_screen: AppScreen::WordList,
            name_filter: String::new(),
            edit_form: None,
            show_reset_dialog: false,
            notice: None,
        }
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    /// Dataset picker shared by both screens
    fn dataset_selector(&mut self, ui: &mut egui::Ui, id: &str) {
        let active = self.controller.store().active_name().to_string();
        let mut selected: Option<String> = None;

        egui::ComboBox::from_id_salt(id)
            .selected_text(active.as_str())
            .width(200.0)
            .show_ui(ui, |ui| {
                for name in self.controller.store().dataset_names() {
                    if ui.selectable_label(name == active, name).clicked() {
                        selected = Some(name.to_string());
                    }
                }
            });

        if let Some(name) = selected {
            if let Err(e) = self.controller.select_dataset(&name) {
                self.notify(e.to_string());
            }
        }
    }

    /// Renders the word list with filters, the table and paging
    fn render_word_list(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!("Word List: {}", self.controller.store().active_name()));

            ui.horizontal(|ui| {
                self.dataset_selector(ui, "word_list_dataset");
                if ui.button("Import Dataset").clicked() {
                    self.handle_import();
                }
                if ui.button("Export Dataset").clicked() {
                    self.handle_export();
                }
                if let Some(saved) = self.controller.store().last_saved() {
                    ui.label(format!("Last saved: {}", format_saved_at(saved)));
                }
            });

            ui.separator();
            self.render_filters(ui);
            ui.separator();

            // Actions are applied after the table is drawn to avoid borrowing conflicts
            let mut action_knowledge: Option<(WordId, Knowledge)> = None;
            let mut action_edit: Option<EditForm> = None;

            {
                let rows = self.controller.page_rows();
                if rows.is_empty() {
                    ui.label("No words match the current filters.");
                }

                egui::ScrollArea::vertical()
                    .id_salt("word_table")
                    .max_height(ui.available_height() - 40.0)
                    .show(ui, |ui| {
                        egui::Grid::new("words_grid")
                            .striped(true)
                            .num_columns(8)
                            .show(ui, |ui| {
                                for title in [
                                    "No.", "Word", "Type", "Level", "Translation", "Example",
                                    "Knowledge", "Actions",
                                ] {
                                    ui.strong(title);
                                }
                                ui.end_row();

                                for (position, word) in &rows {
                                    ui.label((position + 1).to_string());
                                    ui.label(&word.word);
                                    ui.label(word.types.join(", "));
                                    ui.label(&word.level);
                                    ui.label(&word.translation);
                                    ui.label(&word.example);

                                    egui::ComboBox::from_id_salt(("knowledge", *position))
                                        .selected_text(word.knowledge.label())
                                        .show_ui(ui, |ui| {
                                            for tag in Knowledge::ALL {
                                                if ui
                                                    .selectable_label(word.knowledge == tag, tag.label())
                                                    .clicked()
                                                    && word.knowledge != tag
                                                {
                                                    action_knowledge = Some((word.id.clone(), tag));
                                                }
                                            }
                                        });

                                    if ui.button("Edit").clicked() {
                                        action_edit = Some(EditForm {
                                            id: word.id.clone(),
                                            word: word.word.clone(),
                                            translation: word.translation.clone(),
                                            example: word.example.clone(),
                                        });
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            }

            ui.horizontal(|ui| {
                let page = self.controller.page();
                let page_count = self.controller.page_count();
                if ui.add_enabled(page > 0, egui::Button::new("< Prev")).clicked() {
                    self.controller.set_page(page - 1);
                }
                ui.label(format!(
                    "Page {} / {} ({} words)",
                    page + 1,
                    page_count,
                    self.controller.filtered_words().len()
                ));
                if ui
                    .add_enabled(page + 1 < page_count, egui::Button::new("Next >"))
                    .clicked()
                {
                    self.controller.set_page(page + 1);
                }

                let per_page = self.controller.rows_per_page();
                let mut chosen: Option<usize> = None;
                egui::ComboBox::from_id_salt("rows_per_page")
                    .selected_text(format!("{} / page", per_page))
                    .show_ui(ui, |ui| {
                        for size in PAGE_SIZES {
                            if ui
                                .selectable_label(size == per_page, format!("{} / page", size))
                                .clicked()
                            {
                                chosen = Some(size);
                            }
                        }
                    });
                if let Some(size) = chosen {
                    if let Err(e) = self.controller.set_rows_per_page(size) {
                        self.notify(e.to_string());
                    }
                }
            });

            // Execute deferred actions
            if let Some((id, knowledge)) = action_knowledge {
                if let Err(e) = self.controller.set_knowledge(&id, knowledge) {
                    self.notify(e.to_string());
                }
            }
            if action_edit.is_some() {
                self.edit_form = action_edit;
            }
        });
    }

    fn render_filters(&mut self, ui: &mut egui::Ui) {
        let (types, levels) = match self.controller.active_dataset() {
            Some(dataset) => (dataset.distinct_types(), dataset.distinct_levels()),
            None => (Vec::new(), Vec::new()),
        };
        let criteria = self.controller.criteria().clone();

        let mut toggled_type: Option<String> = None;
        let mut toggled_level: Option<String> = None;
        let mut toggled_knowledge: Option<Knowledge> = None;
        let mut clear = false;

        ui.horizontal_wrapped(|ui| {
            if ui
                .add(egui::TextEdit::singleline(&mut self.name_filter).hint_text("Filter by name"))
                .changed()
            {
                self.controller.set_name_filter(&self.name_filter);
            }

            ui.menu_button(format!("Types ({})", criteria.types.len()), |ui| {
                for tag in &types {
                    let mut checked = criteria.types.contains(tag);
                    if ui.checkbox(&mut checked, tag).changed() {
                        toggled_type = Some(tag.clone());
                    }
                }
            });

            ui.menu_button(format!("Levels ({})", criteria.levels.len()), |ui| {
                for level in &levels {
                    let mut checked = criteria.levels.contains(level);
                    if ui.checkbox(&mut checked, level).changed() {
                        toggled_level = Some(level.clone());
                    }
                }
            });

            ui.menu_button(format!("Knowledge ({})", criteria.knowledge.len()), |ui| {
                for tag in Knowledge::ALL {
                    let mut checked = criteria.knowledge.contains(&tag);
                    if ui.checkbox(&mut checked, tag.label()).changed() {
                        toggled_knowledge = Some(tag);
                    }
                }
            });

            if ui.button("Clear Filters").clicked() {
                clear = true;
            }
            if ui.button("Clear Data").clicked() {
                self.show_reset_dialog = true;
            }
        });

        if let Some(tag) = toggled_type {
            self.controller.toggle_type_filter(&tag);
        }
        if let Some(level) = toggled_level {
            self.controller.toggle_level_filter(&level);
        }
        if let Some(tag) = toggled_knowledge {
            self.controller.toggle_knowledge_filter(tag);
        }
        if clear {
            self.name_filter.clear();
            self.controller.clear_filters();
        }
    }

    fn render_edit_dialog(&mut self, ctx: &egui::Context) {
        let Some(form) = self.edit_form.as_mut() else {
            return;
        };

        let mut save = false;
        let mut cancel = false;
        egui::Window::new("Edit Word")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading(&form.word);
                ui.label("Translation");
                ui.text_edit_singleline(&mut form.translation);
                ui.label("Example");
                ui.text_edit_multiline(&mut form.example);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                    if ui.button("OK").clicked() {
                        save = true;
                    }
                });
            });

        if save {
            if let Some(form) = self.edit_form.take() {
                if let Err(e) = self
                    .controller
                    .edit_word(&form.id, &form.translation, &form.example)
                {
                    self.notify(e.to_string());
                }
            }
        } else if cancel {
            self.edit_form = None;
        }
    }

    /// Renders the flashcard game: setup, then one card at a time
    fn render_flashcards(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Flash Card Game");
                ui.add_space(10.0);
                self.dataset_selector(ui, "flashcards_dataset");
                ui.add_space(20.0);

                let in_progress = self
                    .controller
                    .session()
                    .is_some_and(|s| matches!(s.state(), SessionState::InProgress { .. }));

                if in_progress {
                    self.render_card(ui);
                } else {
                    self.render_game_setup(ui);
                }
            });
        });
    }

    fn render_game_setup(&mut self, ui: &mut egui::Ui) {
        let current = self.controller.sample_size();
        let mut chosen: Option<usize> = None;

        egui::ComboBox::from_id_salt("sample_size")
            .selected_text(format!("{} words", current))
            .width(200.0)
            .show_ui(ui, |ui| {
                for &size in self.controller.sample_sizes() {
                    if ui
                        .selectable_label(size == current, format!("{} words", size))
                        .clicked()
                    {
                        chosen = Some(size);
                    }
                }
            });

        if let Some(size) = chosen {
            if let Err(e) = self.controller.set_sample_size(size) {
                self.notify(e.to_string());
            }
        }

        ui.add_space(10.0);
        if ui.button("Start Game").clicked() {
            if let Err(e) = self.controller.start_session() {
                self.notify(format!(
                    "{}. Please review your word list or choose another dataset.",
                    e
                ));
            }
        }
    }

    fn render_card(&mut self, ui: &mut egui::Ui) {
        let Some(session) = self.controller.session() else {
            return;
        };
        let Some(word) = session.current_word() else {
            return;
        };

        // Clone values to avoid borrowing issues
        let progress = session.progress_message();
        let revealed = session.is_revealed();
        let at_start = session.current_index() == 0;
        let text = word.word.clone();
        let types = word.types.join(", ");
        let translation = word.translation.clone();
        let example = word.example.clone();

        ui.heading(progress);
        ui.add_space(10.0);

        ui.group(|ui| {
            ui.set_min_height(150.0);
            ui.set_min_width(300.0);
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                if revealed {
                    ui.label(egui::RichText::new(&translation).size(24.0).strong());
                    ui.label(egui::RichText::new(&example).size(18.0));
                } else {
                    ui.label(egui::RichText::new(&text).size(24.0).strong());
                    if !types.is_empty() {
                        ui.label(egui::RichText::new(&types).size(18.0).italics());
                    }
                }
                ui.add_space(20.0);
            });
        });

        ui.add_space(10.0);

        let mut action_flip = false;
        let mut action_previous = false;
        let mut action_next = false;
        let mut action_quit = false;

        if ui
            .button(if revealed { "Hide Answer" } else { "Show Answer" })
            .clicked()
        {
            action_flip = true;
        }
        ui.horizontal(|ui| {
            if ui.add_enabled(!at_start, egui::Button::new("Previous")).clicked() {
                action_previous = true;
            }
            if ui.button("Next").clicked() {
                action_next = true;
            }
        });
        ui.add_space(20.0);
        if ui.button("Quit Game").clicked() {
            action_quit = true;
        }

        // Execute deferred actions
        if action_flip {
            self.controller.reveal();
        }
        if action_previous {
            self.controller.previous_card();
        }
        if action_next && self.controller.next_card() == Advance::Completed {
            self.controller.end_session();
            self.notify("Game Over! You have completed all the words.");
        }
        if action_quit {
            self.controller.end_session();
        }
    }

    /// Handles dataset import from a JSON file
    fn handle_import(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        else {
            return;
        };

        match self.controller.import_file(&path) {
            Ok((name, count)) => {
                self.name_filter = self.controller.criteria().name_substring.clone();
                self.notify(format!(
                    "Dataset '{}' imported successfully with {} words!",
                    name, count
                ));
            }
            Err(e) => {
                log::warn!("Import of '{}' failed: {}", path.display(), e);
                self.notify(format!(
                    "Failed to import dataset: {}\n\nThe file must be a JSON array of words:\n[\n  {{\"id\": 1, \"word\": \"...\", \"types\": [...], \"level\": \"A1\", ...}}\n]",
                    e
                ));
            }
        }
    }

    /// Handles export of the active dataset to a JSON file
    fn handle_export(&mut self) {
        let name = self.controller.store().active_name().to_string();
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("{}.json", name))
            .add_filter("JSON files", &["json"])
            .save_file()
        else {
            return;
        };

        match self.controller.export_active_to(&path) {
            Ok(()) => self.notify(format!("Dataset '{}' exported successfully!", name)),
            Err(e) => self.notify(format!("Export failed: {}", e)),
        }
    }

    fn handle_reset(&mut self) {
        match self.controller.reset_to_default() {
            Ok(()) => {
                self.name_filter.clear();
                self.edit_form = None;
                self.notify("Data has been reset to default.");
            }
            Err(e) => self.notify(format!("Reset failed: {}", e)),
        }
    }
}
