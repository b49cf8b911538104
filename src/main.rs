use clap::Parser;
use iced::keyboard;
use iced::widget::image::Handle;
use iced::widget::{column, container, text, Image};
use iced::{Alignment, ContentFit, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod preview;
mod state;
mod ui;

use config::{Cli, FileConfig, Settings};
use error::{DeclutterError, Result};
use state::{Action, ImageSet, TargetDir, Triage};

/// What the image area is showing
#[derive(Debug, Clone)]
enum PreviewState {
    Loading,
    Ready(Handle),
    Failed(String),
}

/// Main application state
struct Declutter {
    /// Cursor, image list and target directory
    triage: Triage,
    /// Longest preview edge in pixels
    preview_max_edge: u32,
    preview: PreviewState,
    /// Result of the last keep/unkeep, shown under the status line
    last_action: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User pressed one of the arrow keys
    Action(Action),
    /// Background decode finished for the image at this index
    PreviewLoaded(usize, std::result::Result<Handle, String>),
}

impl Declutter {
    /// Create the application and start loading the first image
    fn new(triage: Triage, preview_max_edge: u32) -> (Self, Task<Message>) {
        let app = Declutter {
            triage,
            preview_max_edge,
            preview: PreviewState::Loading,
            last_action: String::new(),
        };
        let task = app.load_current();

        (app, task)
    }

    /// Decode the image under the cursor off the UI thread
    fn load_current(&self) -> Task<Message> {
        let index = self.triage.cursor();
        let path = self.triage.current().to_path_buf();

        Task::perform(
            preview::load_preview(path, self.preview_max_edge),
            move |result| {
                Message::PreviewLoaded(
                    index,
                    result.map(|p| Handle::from_rgba(p.width, p.height, p.pixels)),
                )
            },
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Action(action) => {
                let before = self.triage.cursor();

                match self.triage.perform(action) {
                    Ok(outcome) => self.last_action = outcome.describe(),
                    Err(e) => {
                        tracing::error!("{:?} failed: {}", action, e);
                        self.last_action = format!("⚠️  {}", e);
                    }
                }

                if self.triage.cursor() != before {
                    self.preview = PreviewState::Loading;
                    return self.load_current();
                }

                Task::none()
            }
            Message::PreviewLoaded(index, result) => {
                // User already moved on
                if index != self.triage.cursor() {
                    return Task::none();
                }

                self.preview = match result {
                    Ok(handle) => PreviewState::Ready(handle),
                    Err(e) => {
                        tracing::warn!("{}", e);
                        PreviewState::Failed(e)
                    }
                };

                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let picture: Element<'_, Message> = match &self.preview {
            PreviewState::Loading => text("Loading…").size(16).into(),
            PreviewState::Ready(handle) => Image::<Handle>::new(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            PreviewState::Failed(e) => text(format!("Cannot show image: {}", e)).size(16).into(),
        };

        // Status is recomputed on every render so the check mark always
        // belongs to the image on screen
        let content = column![
            container(picture)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
            text(self.triage.status()).size(20),
            text(&self.last_action).size(14),
            text(ui::KEY_LEGEND).size(12),
        ]
        .spacing(10)
        .padding(20)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, _modifiers| ui::keys::action_for(&key).map(Message::Action))
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .init();
}

/// Ask for a source folder with the native picker
fn pick_source() -> Result<PathBuf> {
    FileDialog::new()
        .set_title("Select Folder with Photos")
        .pick_folder()
        .ok_or(DeclutterError::NoSourceSelected)
}

fn run(cli: Cli) -> Result<()> {
    let file = FileConfig::discover(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, file);

    let source = match settings.source {
        Some(source) => source,
        None => pick_source()?,
    };

    let images = ImageSet::scan(&source)?;
    let target = TargetDir::open(&settings.target, settings.key_mode)?;
    let triage = Triage::new(images, target);
    tracing::info!(
        "Keeping into {} ({:?} names)",
        triage.target().path().display(),
        triage.target().key_mode()
    );
    let preview_max_edge = settings.preview_max_edge;

    iced::application("Declutter", Declutter::update, Declutter::view)
        .theme(Declutter::theme)
        .subscription(Declutter::subscription)
        .window_size((1280.0, 960.0))
        .centered()
        .run_with(move || Declutter::new(triage, preview_max_edge))?;

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(e) = run(cli) {
        tracing::error!("{}", e);
        return Err(e);
    }

    tracing::info!("Done.");
    Ok(())
}
