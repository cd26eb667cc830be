//! The single page: a themed card with the upload form.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use egui::RichText;
use tracing::info;

use crate::config::Config;
use crate::download;
use crate::errors::AppError;
use crate::form::{ResumeForm, SelectedResume, SubmitStatus, UploadJob};
use crate::theme::ThemeStore;
use crate::transfer::TransferClient;

mod toast;

use toast::Toasts;

/// What the transfer task reports back: the saved path, or the error to show.
type TransferOutcome = Result<std::path::PathBuf, AppError>;

pub struct CvvApp {
    theme: ThemeStore,
    form: ResumeForm,
    toasts: Toasts,
    client: Arc<TransferClient>,
    runtime: tokio::runtime::Runtime,
    outcome_rx: Option<Receiver<TransferOutcome>>,
}

impl CvvApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        let theme = ThemeStore::load(config.default_theme);
        theme.apply(&cc.egui_ctx);

        Ok(Self {
            theme,
            form: ResumeForm::default(),
            toasts: Toasts::default(),
            client: Arc::new(TransferClient::new(config.api_url)),
            runtime,
            outcome_rx: None,
        })
    }

    /// Routes a picked or dropped file through form validation.
    fn attach_file(&mut self, path: std::path::PathBuf) {
        let attached = SelectedResume::inspect(path)
            .map_err(AppError::from)
            .and_then(|candidate| self.form.attach(candidate));
        if let Err(e) = attached {
            let notice = e.notice();
            self.toasts.error(notice.title, notice.detail);
        }
    }

    fn submit(&mut self, ctx: &egui::Context) {
        let job = match self.form.try_submit() {
            Ok(job) => job,
            // The button is disabled in flight; keep the refusal silent.
            Err(AppError::SubmissionInFlight) => return,
            Err(e) => {
                let notice = e.notice();
                self.toasts.error(notice.title, notice.detail);
                return;
            }
        };

        self.toasts
            .processing("Processing your resume", "This can take a few seconds.");

        let (tx, rx) = mpsc::channel();
        self.outcome_rx = Some(rx);

        let client = Arc::clone(&self.client);
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = run_submission(client, job).await;
            let _ = tx.send(outcome);
            ctx.request_repaint();
        });
    }

    /// Picks up the result of an in-flight submission, if any.
    fn poll_transfer(&mut self) {
        let Some(rx) = &self.outcome_rx else { return };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(AppError::Io(std::io::Error::other(
                "the transfer task was interrupted",
            ))),
        };
        self.outcome_rx = None;

        match outcome {
            Ok(path) => {
                self.form.complete_success();
                self.toasts.success(
                    "Resume optimized",
                    format!("Saved to {}", path.display()),
                );
            }
            Err(e) => {
                self.form.complete_failure();
                let notice = e.notice();
                self.toasts.error(notice.title, notice.detail);
            }
        }
    }

    fn theme_toggle(&mut self, ui: &mut egui::Ui) {
        let dark = ui.visuals().dark_mode;
        let icon = if dark { "☀" } else { "🌙" };
        let hover = if dark {
            "Switch to light mode"
        } else {
            "Switch to dark mode"
        };
        if ui.button(icon).on_hover_text(hover).clicked() {
            self.theme.set_mode(self.theme.mode().toggled());
            self.theme.apply(ui.ctx());
        }
    }

    fn file_area(&mut self, ui: &mut egui::Ui) {
        let submitting = self.form.status() == SubmitStatus::Submitting;

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            match self.form.file().cloned() {
                None => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(12.0);
                        if ui
                            .add_enabled(!submitting, egui::Button::new("Select your resume"))
                            .clicked()
                        {
                            if let Some(path) = pdf_dialog().pick_file() {
                                self.attach_file(path);
                            }
                        }
                        ui.label(RichText::new("or drop it here. PDF (max 10 MB)").weak());
                        ui.add_space(12.0);
                    });
                }
                Some(file) => {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("📄").size(18.0));
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&file.name).strong());
                            ui.label(RichText::new(format_size(file.size)).weak());
                        });
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui
                                    .add_enabled(!submitting, egui::Button::new("✕"))
                                    .on_hover_text("Remove file")
                                    .clicked()
                                {
                                    self.form.clear_file();
                                }
                            },
                        );
                    });
                    ui.label(RichText::new("Drop a new file to replace it").weak());
                }
            }
        });
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if self.form.status() == SubmitStatus::Submitting {
            return;
        }
        let dropped: Vec<_> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        for path in dropped {
            self.attach_file(path);
        }
    }
}

impl eframe::App for CvvApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_transfer();
        self.handle_dropped_files(ctx);

        let submitting = self.form.status() == SubmitStatus::Submitting;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                self.theme_toggle(ui);
            });

            ui.vertical_centered(|ui| {
                ui.set_max_width(560.0);
                ui.add_space(24.0);
                ui.heading("Resume Optimizer");
                ui.label("Upload your resume and the job description to optimize it automatically");
                ui.add_space(16.0);

                ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                    ui.label(RichText::new("Your resume (PDF)").strong());
                    self.file_area(ui);
                    ui.add_space(12.0);

                    ui.label(RichText::new("Job description").strong());
                    ui.add_enabled(
                        !submitting,
                        egui::TextEdit::multiline(&mut self.form.description)
                            .hint_text("Paste the job description or the desired skills here...")
                            .desired_rows(4)
                            .desired_width(f32::INFINITY),
                    );
                });

                ui.add_space(16.0);
                let submit_label = if submitting {
                    "Processing..."
                } else {
                    "Optimize Resume"
                };
                let clicked = ui
                    .add_enabled(!submitting, egui::Button::new(submit_label))
                    .clicked();
                if clicked {
                    self.submit(ctx);
                }

                if submitting {
                    ui.add_space(12.0);
                    ui.add(
                        egui::ProgressBar::new(0.0)
                            .desired_width(ui.available_width())
                            .animate(true),
                    );
                    ui.label(RichText::new("This can take a few seconds").weak());
                }
            });
        });

        self.toasts.show(ctx);
    }
}

async fn run_submission(client: Arc<TransferClient>, job: UploadJob) -> TransferOutcome {
    let pdf = tokio::fs::read(&job.path).await?;
    let resume = client
        .create_cvv(&job.file_name, pdf, &job.description)
        .await?;
    let path = download::save_to_downloads(&resume)?;
    info!("optimized resume saved to {}", path.display());
    Ok(path)
}

fn pdf_dialog() -> rfd::FileDialog {
    rfd::FileDialog::new().add_filter("PDF", &["pdf"])
}

/// Human-readable size, binary units, two decimals past KB.
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["bytes", "KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{bytes} bytes");
    }
    let exponent = (bytes.ilog2() / 10).min(UNITS.len() as u32 - 1);
    let value = bytes as f64 / f64::from(1u32 << (10 * exponent));
    format!("{value:.2} {}", UNITS[exponent as usize])
}
