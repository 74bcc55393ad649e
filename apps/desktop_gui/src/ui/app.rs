use std::time::{Duration, Instant};

use arboard::Clipboard;
use chrono::{DateTime, Local, Utc};
use crossbeam_channel::{Receiver, Sender};
use deploy_core::{
    effects::{cursor_visible, scan_line_offset, Typewriter, SCAN_LINE_INTERVAL, SCAN_LINE_PERIOD},
    explorer_address_url, open_in_browser,
    presentation::{
        deploy_button_label, display_symbol, format_supply, step_line, DEPLOYING_BANNER,
        FOOTER_CREDITS, FORM_TITLE, HEADER_LOGO, SEQUENCE_TITLE, SUCCESS_BANNER,
    },
    EventOutcome, Settings, ViewController,
};
use eframe::egui;
use shared::domain::{DeploymentPhase, TokenDraft, TokenField, DEPLOYMENT_STEPS};
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::theme;

const COPY_FEEDBACK: Duration = Duration::from_millis(1500);
const READY_STATUS: &str = "STATUS: READY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SuccessAction {
    CopyAddress,
    OpenExplorer,
    DeployAnother,
}

pub struct DeployerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    settings: Settings,
    view: ViewController,
    status: String,
    launched_at: Instant,
    copied_at: Option<Instant>,
    theme_applied: bool,
}

impl DeployerApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: Settings,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            settings,
            view: ViewController::new(),
            status: READY_STATUS.to_string(),
            launched_at: Instant::now(),
            copied_at: None,
            theme_applied: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Sequencer(event) => match self.view.apply(event) {
                    EventOutcome::Revealed {
                        index,
                        progress_percent,
                    } => {
                        self.status = format!("STEP [{index:02}] OK · {progress_percent}%");
                    }
                    EventOutcome::Completed => {
                        self.status = "DEPLOYMENT CONFIRMED".to_string();
                    }
                    EventOutcome::AlreadyRevealed(_) | EventOutcome::Stale => {}
                },
                UiEvent::Error(err) => self.report(err),
            }
        }
    }

    fn report(&mut self, err: UiError) {
        tracing::warn!(context = ?err.context(), "{}", err.message());
        self.status = err.status_line();
    }

    fn start_deployment(&mut self) {
        match self.view.deploy() {
            Ok(attempt) => {
                let queued = dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::StartDeployment { attempt },
                    &mut self.status,
                );
                if !queued && self.view.abort(attempt) {
                    tracing::warn!(%attempt, "deployment rolled back: backend did not take it");
                }
            }
            Err(err) => self.report(UiError::from_message(
                UiErrorContext::Deployment,
                err.to_string(),
            )),
        }
    }

    fn deploy_another(&mut self) {
        match self.view.reset() {
            Ok(previous) => {
                self.status = READY_STATUS.to_string();
                if let Some(attempt) = previous {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::CancelDeployment { attempt },
                        &mut self.status,
                    );
                }
            }
            Err(err) => self.report(UiError::from_message(
                UiErrorContext::Deployment,
                err.to_string(),
            )),
        }
        self.copied_at = None;
    }

    fn copy_address(&mut self) {
        let Some(address) = self.view.runtime().address() else {
            return;
        };
        let text = address.to_string();
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => {
                self.copied_at = Some(Instant::now());
                self.status = "ADDRESS COPIED TO CLIPBOARD".to_string();
            }
            Err(err) => self.report(UiError::from_message(
                UiErrorContext::Clipboard,
                err.to_string(),
            )),
        }
    }

    /// Address page on the configured explorer, once an address exists.
    fn explorer_link(&self) -> Option<Url> {
        let address = self.view.runtime().address()?;
        match explorer_address_url(&self.settings.explorer_base_url, address) {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::debug!(%err, "explorer link unavailable");
                None
            }
        }
    }

    fn open_explorer(&mut self) {
        let Some(url) = self.explorer_link() else {
            self.report(UiError::from_message(
                UiErrorContext::Explorer,
                "no explorer link for this address",
            ));
            return;
        };
        if let Err(err) = open_in_browser(&url) {
            self.report(UiError::from_message(UiErrorContext::Explorer, err.to_string()));
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.theme_applied {
            return;
        }
        ctx.set_visuals(theme::terminal_visuals());
        theme::monospace_styles(ctx);
        self.theme_applied = true;
    }

    fn show_header(&self, ui: &mut egui::Ui, elapsed: Duration) {
        ui.label(
            egui::RichText::new(HEADER_LOGO.trim_matches('\n'))
                .monospace()
                .size(9.0)
                .color(theme::NEON_GREEN),
        );
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new(subtitle_line(elapsed))
                .size(16.0)
                .color(theme::NEON_CYAN),
        );
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            theme::badge(ui, &self.settings.network_label.to_uppercase(), theme::NEON_CYAN);
            if self.settings.testnet_mode {
                theme::badge(ui, "TESTNET MODE", theme::NEON_MAGENTA);
            }
        });
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let mut deploy_clicked = false;
        theme::terminal_frame(theme::NEON_GREEN).show(ui, |ui| {
            theme::title_bar(ui, FORM_TITLE, theme::NEON_GREEN);
            for field in TokenField::ALL {
                self.field_input(ui, field);
                ui.add_space(4.0);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(READY_STATUS).color(theme::NEON_GREEN));
                ui.add_space(12.0);
                ui.label(egui::RichText::new("GAS: OPTIMIZED").color(theme::DIM_TEXT));
            });
            ui.add_space(8.0);

            let valid = self.view.is_valid();
            let fill = if valid {
                theme::NEON_GREEN.gamma_multiply(0.2)
            } else {
                theme::PANEL
            };
            let button = egui::Button::new(
                egui::RichText::new(deploy_button_label(valid))
                    .strong()
                    .size(16.0),
            )
            .min_size(egui::vec2(ui.available_width(), 44.0))
            .fill(fill);
            deploy_clicked = ui.add_enabled(valid, button).clicked();
        });

        if deploy_clicked {
            self.start_deployment();
        }
    }

    fn field_input(&mut self, ui: &mut egui::Ui, field: TokenField) {
        let label = if field.is_required() {
            format!("{} *", field.label())
        } else {
            field.label().to_string()
        };
        ui.label(egui::RichText::new(label).color(theme::NEON_CYAN).size(12.0));

        let mut buf = self.view.draft().field(field).to_string();
        let edit = if field == TokenField::Description {
            egui::TextEdit::multiline(&mut buf).desired_rows(3)
        } else {
            egui::TextEdit::singleline(&mut buf)
        };
        let response = ui.add(
            edit.id_salt(("token_field", field.label()))
                .hint_text(field.placeholder())
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            self.view.update_field(field, field.constrain_input(&buf));
        }
    }

    fn show_sequence(&mut self, ui: &mut egui::Ui) {
        let phase = self.view.phase();
        let accent = if phase == DeploymentPhase::Success {
            theme::NEON_CYAN
        } else {
            theme::NEON_GREEN
        };

        let mut action = None;
        theme::terminal_frame(accent).show(ui, |ui| {
            theme::title_bar(ui, SEQUENCE_TITLE, accent);
            let banner = if phase == DeploymentPhase::Success {
                SUCCESS_BANNER
            } else {
                DEPLOYING_BANNER
            };
            ui.label(egui::RichText::new(banner).monospace().color(accent));
            ui.add_space(8.0);

            let runtime = self.view.runtime();
            for (index, step) in DEPLOYMENT_STEPS.iter().enumerate() {
                let revealed = runtime.is_revealed(index);
                let color = if revealed {
                    theme::NEON_GREEN
                } else {
                    theme::DIM_TEXT
                };
                ui.label(
                    egui::RichText::new(step_line(index, step, revealed))
                        .monospace()
                        .color(color),
                );
            }
            ui.add_space(8.0);
            ui.add(
                egui::ProgressBar::new(runtime.progress() / 100.0)
                    .text(format!("{}%", runtime.progress_percent()))
                    .fill(accent.gamma_multiply(0.6)),
            );

            if phase == DeploymentPhase::Success {
                action = self.show_success(ui);
            }
        });

        match action {
            Some(SuccessAction::CopyAddress) => self.copy_address(),
            Some(SuccessAction::OpenExplorer) => self.open_explorer(),
            Some(SuccessAction::DeployAnother) => self.deploy_another(),
            None => {}
        }
    }

    fn show_success(&self, ui: &mut egui::Ui) -> Option<SuccessAction> {
        let address = self.view.runtime().address();
        let explorer_link = self.explorer_link();
        let mut action = None;

        ui.add_space(12.0);
        egui::Grid::new("deploy_summary")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for (key, value) in summary_rows(self.view.draft(), self.view.completed_at()) {
                    ui.label(egui::RichText::new(key).color(theme::DIM_TEXT));
                    ui.label(value);
                    ui.end_row();
                }
            });

        if let Some(address) = address {
            ui.add_space(10.0);
            ui.label(egui::RichText::new("CONTRACT ADDRESS").color(theme::DIM_TEXT));
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(address.as_str())
                        .monospace()
                        .color(theme::NEON_CYAN),
                );
                let copied = self
                    .copied_at
                    .is_some_and(|at| at.elapsed() < COPY_FEEDBACK);
                if ui.button(if copied { "COPIED" } else { "COPY" }).clicked() {
                    action = Some(SuccessAction::CopyAddress);
                }
            });
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            let view_button = egui::Button::new(
                egui::RichText::new("[ VIEW ON BASESCAN ]").color(theme::NEON_CYAN),
            );
            let response = ui.add_enabled(explorer_link.is_some(), view_button);
            let response = match &explorer_link {
                Some(link) => response.on_hover_text(link.as_str()),
                None => response.on_disabled_hover_text("explorer link unavailable"),
            };
            if response.clicked() {
                action = Some(SuccessAction::OpenExplorer);
            }
            if ui
                .add(egui::Button::new(
                    egui::RichText::new("[ DEPLOY ANOTHER ]").color(theme::NEON_GREEN),
                ))
                .clicked()
            {
                action = Some(SuccessAction::DeployAnother);
            }
        });

        action
    }

    fn show_footer(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            theme::badge(ui, self.view.phase().label(), theme::NEON_MAGENTA);
            ui.label(egui::RichText::new(&self.status).color(theme::NEON_GREEN).size(12.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(FOOTER_CREDITS).color(theme::DIM_TEXT).size(12.0));
            });
        });
    }
}

/// Typewriter subtitle with the blinking block cursor appended.
fn subtitle_line(elapsed: Duration) -> String {
    let mut line = Typewriter::subtitle().visible_text(elapsed).to_string();
    line.push(if cursor_visible(elapsed) { '█' } else { ' ' });
    line
}

fn summary_rows(
    token: &TokenDraft,
    deployed_at: Option<DateTime<Utc>>,
) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("NAME", token.name.clone()),
        ("SYMBOL", display_symbol(token)),
        ("SUPPLY", format_supply(&token.total_supply)),
        ("DECIMALS", token.decimals.clone()),
    ];
    if !token.description.trim().is_empty() {
        rows.push(("DESCRIPTION", token.description.trim().to_string()));
    }
    if let Some(deployed_at) = deployed_at {
        rows.push((
            "DEPLOYED",
            deployed_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        ));
    }
    rows
}

fn repaint_interval(phase: DeploymentPhase) -> Duration {
    match phase {
        DeploymentPhase::Deploying => Duration::from_millis(16),
        _ => SCAN_LINE_INTERVAL,
    }
}

impl eframe::App for DeployerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);
        let elapsed = self.launched_at.elapsed();

        egui::TopBottomPanel::bottom("footer")
            .frame(
                egui::Frame::NONE
                    .fill(theme::PANEL)
                    .inner_margin(egui::Margin::symmetric(12, 6)),
            )
            .show(ctx, |ui| self.show_footer(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(760.0);
                        self.show_header(ui, elapsed);
                        ui.add_space(16.0);
                        match self.view.phase() {
                            DeploymentPhase::Idle => self.show_form(ui),
                            DeploymentPhase::Deploying
                            | DeploymentPhase::Success
                            | DeploymentPhase::Error => self.show_sequence(ui),
                        }
                    });
                });

            let painter = ui.ctx().layer_painter(egui::LayerId::new(
                egui::Order::Foreground,
                egui::Id::new("scan_lines"),
            ));
            theme::paint_scan_lines(
                &painter,
                ui.clip_rect(),
                scan_line_offset(elapsed),
                SCAN_LINE_PERIOD,
            );
        });

        ctx.request_repaint_after(repaint_interval(self.view.phase()));
    }
}
