// src/gui/app.rs
use std::{error::Error, sync::Arc, time::Duration};

use eframe::egui;
use tracing::info;

use crate::{
    config::{options::PipelineOptions, state::GuiState},
    core::{Fetch, HttpFetcher},
    data::{Datasets, RoundData},
    service::PollService,
    specs::rounds::color_for,
    view,
};

use super::{components, progress::GuiProgress};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    crate::log::init();
    let fetcher: Box<dyn Fetch> = Box::new(HttpFetcher::new()?);
    let service = PollService::new(fetcher, PipelineOptions::default());

    eframe::run_native(
        "Brazil 2026 · Poll Tracker",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(service)))),
    )?;
    Ok(())
}

pub struct App {
    service: PollService<Box<dyn Fetch>>,
    pub state: GuiState,
    pub status: String,
}

impl App {
    pub fn new(service: PollService<Box<dyn Fetch>>) -> Self {
        info!("Init: dashboard, ttl={:?}", service.options().ttl);
        Self { service, state: GuiState::default(), status: s!("Loading…") }
    }

    fn refresh(&mut self) {
        info!("UI: manual refresh");
        self.service.invalidate();
        self.status = s!("Refreshing…");
    }

    fn draw_data(&self, ui: &mut egui::Ui, round: &RoundData) {
        let spec = round.spec;
        let rs = self.state.current();
        let selected = rs.selected_refs();
        let filter = rs.filter();

        let raw = view::filter_dataset(&round.raw, &filter);
        let smoothed = view::filter_series(&round.smoothed, &filter);

        ui.heading(format!("{} · latest average", spec.round.label()));
        components::metrics::draw(ui, view::latest(&round.smoothed).as_ref(), &selected);
        ui.separator();

        let inst_label = rs.institute.as_deref().unwrap_or("all institutes");
        let raw_traces = view::traces(&raw, &selected, color_for);
        let smooth_traces = view::traces(&smoothed, &selected, color_for);

        ui.columns(2, |cols| {
            cols[0].strong(format!("Polls · {inst_label}"));
            components::chart::draw(
                &mut cols[0],
                "raw_chart",
                &[components::chart::Layer { traces: &raw_traces, style: components::chart::Style::LinesAndMarkers }],
            );

            cols[1].strong("Rolling average · all institutes");
            let all_raw = view::filter_dataset(&round.raw, &view::Filter { institute: None, ..filter.clone() });
            let faint = view::traces(&all_raw, &selected, color_for);
            components::chart::draw(
                &mut cols[1],
                "smoothed_chart",
                &[
                    components::chart::Layer { traces: &faint, style: components::chart::Style::FaintMarkers },
                    components::chart::Layer { traces: &smooth_traces, style: components::chart::Style::Lines },
                ],
            );
        });
        ui.separator();

        ui.strong("Polling institute activity");
        components::institutes::draw(ui, &view::institute_counts(&round.raw));
        ui.separator();

        ui.strong("Polls");
        components::data_table::draw(ui, &raw, &spec, &selected);
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Cheap within the TTL; refetches synchronously once it has expired.
        // After a failure nothing is fetched until the TTL passes or Refresh.
        let loaded = {
            let mut progress = GuiProgress::new(&mut self.status);
            self.service.datasets_or_empty(Some(&mut progress))
        };
        ctx.request_repaint_after(Duration::from_secs(60));

        let datasets: Option<Arc<Datasets>> = if loaded.is_empty() {
            self.status = match self.service.last_error() {
                Some(e) => format!("Could not load polling data: {e}"),
                None => s!("The page had no polls. Nothing to show."),
            };
            None
        } else {
            Some(loaded)
        };

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                if let Some(age) = self.service.age() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.weak(format!("data age {}m", age.as_secs() / 60));
                    });
                }
            });
        });

        let mut refresh = false;
        egui::SidePanel::left("filters").resizable(false).show(ctx, |ui| {
            refresh = components::filters::draw(ui, &mut self.state, datasets.as_deref());
        });

        egui::CentralPanel::default().show(ctx, |ui| match &datasets {
            None => {
                ui.centered_and_justified(|ui| {
                    ui.heading(&self.status);
                });
            }
            Some(ds) => {
                let round = ds.round(self.state.round);
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.draw_data(ui, round);
                });
            }
        });

        if refresh {
            self.refresh();
        }
    }
}
