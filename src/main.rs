use chrono::Local;
use iced::widget::{
    button, column, container, image as preview_image, progress_bar, row, scrollable, text,
    text_editor, text_input, Column,
};
use iced::{window, Alignment, ContentFit, Element, Length, Size, Subscription, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod media;
mod state;
mod ui;

use config::Settings;
use media::Preview;
use state::persistence::SaveReport;
use state::{CloseChoice, Workspace, SLOTS_PER_PAGE};
use ui::{EditorSlots, QueryHighlighter};

/// Main application state
struct ProofPair {
    settings: Settings,
    /// Pairs, cached text and the current page
    workspace: Workspace,
    /// The editors the workspace reads from and writes into
    slots: EditorSlots,
    previews: [Option<preview_image::Handle>; SLOTS_PER_PAGE],
    /// Bumped on every page change so late previews are dropped
    page_generation: u64,
    search_query: String,
    /// Query the editors are currently highlighting
    highlight_query: String,
    append_text: String,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    OpenFolder,
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,
    SaveAll,
    /// Something happened in one of the four editors
    SlotAction(usize, text_editor::Action),
    SearchChanged(String),
    Search,
    DeleteMatches,
    AppendChanged(String),
    AppendToAll,
    PreviewLoaded {
        slot: usize,
        generation: u64,
        result: Result<Preview, String>,
    },
    AutoSaveTick,
    CloseRequested(window::Id),
}

impl ProofPair {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load_or_default();
        tracing::info!("🎨 proofpair started");

        (
            ProofPair {
                settings,
                workspace: Workspace::new(),
                slots: EditorSlots::default(),
                previews: Default::default(),
                page_generation: 0,
                search_query: String::new(),
                highlight_query: String::new(),
                append_text: String::new(),
                status: "Open a folder of scans and transcripts to start.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenFolder => {
                if self.workspace.unsaved_count() > 0 {
                    let choice = ask_unsaved("Save your changes before opening another folder?");
                    if !self.workspace.resolve_close(choice, &self.slots) {
                        return Task::none();
                    }
                }

                let mut dialog = FileDialog::new().set_title("Select Folder with Scans and Transcripts");
                if let Some(last) = &self.settings.last_folder {
                    dialog = dialog.set_directory(last);
                }

                match dialog.pick_folder() {
                    Some(folder) => self.open_folder(folder),
                    None => Task::none(),
                }
            }
            Message::FirstPage => {
                let moved = self.workspace.first_page(&mut self.slots);
                self.after_turn(moved)
            }
            Message::PrevPage => {
                let moved = self.workspace.prev_page(&mut self.slots);
                self.after_turn(moved)
            }
            Message::NextPage => {
                let moved = self.workspace.next_page(&mut self.slots);
                self.after_turn(moved)
            }
            Message::LastPage => {
                let moved = self.workspace.last_page(&mut self.slots);
                self.after_turn(moved)
            }
            Message::SaveAll => {
                let report = self.workspace.save_all(&self.slots);
                self.status = save_status("Saved", &report);
                Task::none()
            }
            Message::SlotAction(slot, action) => {
                if let Some(text) = self.slots.perform(slot, action) {
                    self.workspace.record_edit(slot, text);
                }
                Task::none()
            }
            Message::SearchChanged(query) => {
                self.search_query = query;
                Task::none()
            }
            Message::Search => {
                if let Some(matches) = self.workspace.highlight(&self.slots, &self.search_query) {
                    // Each search replaces the previous highlighting
                    self.highlight_query = self.search_query.clone();
                    let found: usize = matches.iter().map(Vec::len).sum();
                    self.status = format!("{found} matches for {:?} on this page.", self.search_query);
                }
                Task::none()
            }
            Message::DeleteMatches => {
                if !self.search_query.is_empty() {
                    let changed = self.workspace.delete_occurrences(&mut self.slots, &self.search_query);
                    self.status = format!(
                        "Removed {:?} from {changed} files. Save to write them.",
                        self.search_query
                    );
                }
                Task::none()
            }
            Message::AppendChanged(text) => {
                self.append_text = text;
                Task::none()
            }
            Message::AppendToAll => {
                if let Some(report) = self.workspace.append_to_all(&mut self.slots, &self.append_text) {
                    self.status = save_status("Appended and saved", &report);
                }
                Task::none()
            }
            Message::PreviewLoaded {
                slot,
                generation,
                result,
            } => {
                if generation != self.page_generation {
                    return Task::none();
                }
                self.previews[slot] = match result {
                    Ok(preview) => Some(preview_image::Handle::from_rgba(
                        preview.width,
                        preview.height,
                        preview.pixels,
                    )),
                    Err(e) => {
                        tracing::warn!("{e}");
                        None
                    }
                };
                Task::none()
            }
            Message::AutoSaveTick => {
                let report = self.workspace.auto_save(&self.slots);
                self.status = save_status("Auto-saved", &report);
                Task::none()
            }
            Message::CloseRequested(id) => {
                let choice = ask_unsaved("Save all changes before closing?");
                if self.workspace.resolve_close(choice, &self.slots) {
                    tracing::info!("👋 closing");
                    window::close(id)
                } else {
                    Task::none()
                }
            }
        }
    }

    /// Scan `folder` and show its first page
    fn open_folder(&mut self, folder: PathBuf) -> Task<Message> {
        self.status = format!("Opening {}...", folder.display());

        let scan = match state::pairing::pair_folder(&folder, &self.settings.pairing_rules()) {
            Ok(scan) => scan,
            Err(e) => {
                tracing::error!("{e}");
                self.status = format!("Could not open folder: {e}");
                return Task::none();
            }
        };

        let unreadable = scan.unreadable_count();
        self.workspace.open(scan, &mut self.slots);
        self.highlight_query.clear();

        self.status = format!("{} pairs loaded.", self.workspace.pair_count());
        if unreadable > 0 {
            self.status.push_str(&format!(" {unreadable} transcripts could not be read."));
        }

        self.settings.last_folder = Some(folder);
        self.settings.save();

        self.load_previews()
    }

    fn after_turn(&mut self, moved: bool) -> Task<Message> {
        if moved {
            self.load_previews()
        } else {
            Task::none()
        }
    }

    /// Start decoding the images of the current page
    fn load_previews(&mut self) -> Task<Message> {
        self.page_generation += 1;
        self.previews = Default::default();

        let generation = self.page_generation;
        let max_edge = self.settings.preview_size;
        let jobs: Vec<(usize, PathBuf)> = self
            .workspace
            .visible_pairs()
            .map(|(slot, pair)| (slot, pair.image_path.clone()))
            .collect();

        Task::batch(jobs.into_iter().map(|(slot, path)| {
            Task::perform(media::load_preview(path, max_edge), move |result| {
                Message::PreviewLoaded {
                    slot,
                    generation,
                    result,
                }
            })
        }))
    }

    /// Auto-save runs only while a folder is open; close requests always
    fn subscription(&self) -> Subscription<Message> {
        let close = window::close_requests().map(Message::CloseRequested);

        let auto_save = match self.settings.auto_save_interval() {
            Some(interval) if self.workspace.is_open() => {
                iced::time::every(interval).map(|_| Message::AutoSaveTick)
            }
            _ => Subscription::none(),
        };

        Subscription::batch([close, auto_save])
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let opened = self.workspace.is_open();
        let nav = self.workspace.nav_state();

        let search_row = row![
            text_input("Search text", &self.search_query)
                .on_input(Message::SearchChanged)
                .on_submit(Message::Search),
            button("Search").on_press_maybe(opened.then_some(Message::Search)),
            button("Delete matches").on_press_maybe(opened.then_some(Message::DeleteMatches)),
            text_input("Text to append", &self.append_text)
                .on_input(Message::AppendChanged)
                .on_submit(Message::AppendToAll),
            button("Append to all files").on_press_maybe(opened.then_some(Message::AppendToAll)),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let nav_row = row![
            button("Open folder").on_press(Message::OpenFolder),
            button("First page").on_press_maybe(nav.first.then_some(Message::FirstPage)),
            button("Previous page").on_press_maybe(nav.prev.then_some(Message::PrevPage)),
            button("Next page").on_press_maybe(nav.next.then_some(Message::NextPage)),
            button("Last page").on_press_maybe(nav.last.then_some(Message::LastPage)),
            button("Save all").on_press_maybe(opened.then_some(Message::SaveAll)),
        ]
        .spacing(10);

        let progress_row = row![
            progress_bar(0.0..=100.0, f32::from(self.workspace.progress())).height(12),
            text(format!(
                "{} · page {} of {} · {} pairs · {} unsaved",
                self.workspace
                    .folder()
                    .map(|folder| state::data::file_label(folder))
                    .unwrap_or_else(|| "No folder".to_string()),
                self.workspace.current_page() + 1,
                self.workspace.page_count(),
                self.workspace.pair_count(),
                self.workspace.unsaved_count()
            ))
            .size(14),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let slots = Column::with_children((0..SLOTS_PER_PAGE).map(|slot| self.slot_row(slot)))
            .spacing(12);

        column![
            search_row,
            nav_row,
            progress_row,
            text(&self.status).size(14),
            scrollable(slots).height(Length::Fill),
        ]
        .spacing(12)
        .padding(16)
        .into()
    }

    /// One (scan, transcript) row
    fn slot_row(&self, slot: usize) -> Element<Message> {
        let size = self.settings.preview_size as f32;

        let preview: Element<Message> = match &self.previews[slot] {
            Some(handle) => preview_image(handle.clone())
                .width(size)
                .height(size)
                .content_fit(ContentFit::Contain)
                .into(),
            None => {
                let label = self
                    .workspace
                    .visible_pairs()
                    .nth(slot)
                    .map(|(_, pair)| pair.label())
                    .unwrap_or_default();
                container(text(label).size(12))
                    .center_x(size)
                    .center_y(size)
                    .into()
            }
        };

        let editor = text_editor(self.slots.content(slot)).height(size);
        // Unbound slots stay read-only
        let editor = if self.slots.is_bound(slot) {
            editor.on_action(move |action| Message::SlotAction(slot, action))
        } else {
            editor
        };
        let editor = editor
            .highlight_with::<QueryHighlighter>(self.highlight_query.clone(), ui::match_format);

        row![preview, editor].spacing(12).into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Three-way unsaved-changes prompt
fn ask_unsaved(description: &str) -> CloseChoice {
    let answer = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Unsaved changes")
        .set_description(description)
        .set_buttons(MessageButtons::YesNoCancel)
        .show();

    match answer {
        MessageDialogResult::Yes => CloseChoice::SaveAndExit,
        MessageDialogResult::No => CloseChoice::DiscardAndExit,
        _ => CloseChoice::Cancel,
    }
}

/// Status line for a finished save
fn save_status(what: &str, report: &SaveReport) -> String {
    let mut status = format!(
        "{what} {} files at {}.",
        report.written,
        Local::now().format("%H:%M:%S")
    );
    if let Some(first) = report.failed.first() {
        let name = first.path().map(|path| state::data::file_label(path)).unwrap_or_default();
        status.push_str(&format!(" {} could not be written (first: {name}).", report.failed.len()));
    }
    if !report.skipped.is_empty() {
        status.push_str(&format!(" {} unreadable files left untouched.", report.skipped.len()));
    }
    status
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("proofpair=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> iced::Result {
    init_logging();

    iced::application("Scan & Transcript Proofreader", ProofPair::update, ProofPair::view)
        .subscription(ProofPair::subscription)
        .theme(ProofPair::theme)
        .window(window::Settings {
            size: Size::new(1400.0, 800.0),
            // Closing goes through the unsaved-changes prompt
            exit_on_close_request: false,
            ..window::Settings::default()
        })
        .centered()
        .run_with(ProofPair::new)
}
