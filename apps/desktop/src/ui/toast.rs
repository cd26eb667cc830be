//! Transient notification overlay, bottom-left, one toast at a time.
//! A new toast replaces the current one, which is how the "processing"
//! toast gets swapped for the outcome.

use egui::{Align2, Color32, RichText};

const TOAST_SECONDS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    /// Shown for the whole flight; never auto-dismissed.
    Processing,
}

impl ToastKind {
    fn icon(self) -> Option<&'static str> {
        match self {
            ToastKind::Success => Some("✔"),
            ToastKind::Error => Some("✖"),
            ToastKind::Processing => None,
        }
    }

    fn color(self) -> Color32 {
        match self {
            ToastKind::Success => Color32::from_rgb(0x2e, 0xa0, 0x43),
            ToastKind::Error => Color32::from_rgb(0xd3, 0x3a, 0x3a),
            ToastKind::Processing => Color32::GRAY,
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    kind: ToastKind,
    title: String,
    detail: String,
    shown_at: Option<f64>,
}

#[derive(Debug, Default)]
pub struct Toasts {
    current: Option<Toast>,
}

impl Toasts {
    pub fn success(&mut self, title: impl Into<String>, detail: impl Into<String>) {
        self.push(ToastKind::Success, title, detail);
    }

    pub fn error(&mut self, title: impl Into<String>, detail: impl Into<String>) {
        self.push(ToastKind::Error, title, detail);
    }

    pub fn processing(&mut self, title: impl Into<String>, detail: impl Into<String>) {
        self.push(ToastKind::Processing, title, detail);
    }

    fn push(&mut self, kind: ToastKind, title: impl Into<String>, detail: impl Into<String>) {
        self.current = Some(Toast {
            kind,
            title: title.into(),
            detail: detail.into(),
            shown_at: None,
        });
    }

    /// Renders the active toast and drops it once its time is up.
    pub fn show(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        let Some(toast) = &mut self.current else { return };

        let shown_at = *toast.shown_at.get_or_insert(now);
        if toast.kind != ToastKind::Processing {
            let remaining = TOAST_SECONDS - (now - shown_at);
            if remaining <= 0.0 {
                self.current = None;
                return;
            }
            ctx.request_repaint_after(std::time::Duration::from_secs_f64(remaining.min(0.25)));
        }

        let toast = toast.clone();
        let mut dismissed = false;
        egui::Area::new(egui::Id::new("toast-overlay"))
            .anchor(Align2::LEFT_BOTTOM, egui::vec2(16.0, -16.0))
            .show(ctx, |ui| {
                egui::Frame::popup(&ctx.style()).show(ui, |ui| {
                    ui.set_max_width(320.0);
                    ui.horizontal(|ui| {
                        match toast.kind.icon() {
                            Some(icon) => {
                                ui.label(RichText::new(icon).color(toast.kind.color()).size(16.0));
                            }
                            None => {
                                ui.add(egui::Spinner::new().size(16.0));
                            }
                        }
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&toast.title).strong());
                            ui.label(&toast.detail);
                        });
                        if ui.small_button("✕").clicked() {
                            dismissed = true;
                        }
                    });
                });
            });

        if dismissed {
            self.current = None;
        }
    }
}
