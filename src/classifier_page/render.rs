use crate::classifier_client::interface::ClassificationResult;
use crate::classifier_page::core::{Model, Msg, PreviewStatus, Selection};
use crate::classifier_page::metrics::MODEL_METRICS;
use crate::classifier_page::result_view::{probability_rows, ProbabilityRow};
use crate::image_file::ImageFile;
use crate::preview_store::impl_egui::PreviewStoreEgui;
use eframe::egui;
use egui::{Color32, RichText};
use std::sync::Arc;

const PAGE_WIDTH: f32 = 560.0;
const PREVIEW_MAX_HEIGHT: f32 = 240.0;
const ROW_HEIGHT: f32 = 22.0;

const ACCENT: Color32 = Color32::from_rgb(96, 165, 250);
const GREEN: Color32 = Color32::from_rgb(74, 222, 128);
const ERROR: Color32 = Color32::from_rgb(248, 113, 113);
const TEXT: Color32 = Color32::from_rgb(196, 199, 204);
const HEADING: Color32 = Color32::from_rgb(184, 192, 202);
const MUTED: Color32 = Color32::from_rgb(139, 149, 160);
const MUTED_DARK: Color32 = Color32::from_rgb(107, 114, 128);
const CARD_FILL: Color32 = Color32::from_rgb(28, 32, 38);
const TRACK: Color32 = Color32::from_rgba_premultiplied(20, 20, 20, 20);
const BORDER: Color32 = Color32::from_rgb(70, 78, 90);

/// Draws the page from the model and returns the messages the user produced
/// this frame.
#[derive(Clone)]
pub struct Render {
    preview_store: Arc<PreviewStoreEgui>,
}

impl Render {
    pub fn new(preview_store: Arc<PreviewStoreEgui>) -> Self {
        Self { preview_store }
    }

    pub fn render(&self, ctx: &egui::Context, model: &Model) -> Vec<Msg> {
        let mut msgs = drag_and_drop(ctx, model);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal(|ui| {
                    let margin = ((ui.available_width() - PAGE_WIDTH) / 2.0).max(0.0);
                    ui.add_space(margin);
                    ui.vertical(|ui| {
                        ui.set_max_width(PAGE_WIDTH);
                        ui.add_space(24.0);
                        intro(ui);
                        self.input_card(ui, model, &mut msgs);
                        if let Some(result) = model.request.result() {
                            result_card(ui, result);
                            metrics_card(ui);
                        }
                        footer(ui);
                    });
                });
            });
        });

        msgs
    }

    fn input_card(&self, ui: &mut egui::Ui, model: &Model, msgs: &mut Vec<Msg>) {
        card(ui, |ui| {
            card_heading(ui, Some("1"), "Entrada");

            let zone_stroke = if model.drag_over { ACCENT } else { BORDER };
            let zone_fill = if model.drag_over {
                ACCENT.gamma_multiply(0.08)
            } else {
                Color32::TRANSPARENT
            };

            let zone = egui::Frame::none()
                .fill(zone_fill)
                .stroke(egui::Stroke::new(2.0, zone_stroke))
                .rounding(12.0)
                .inner_margin(24.0)
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.vertical_centered(|ui| match &model.selection {
                        Some(selection) => self.preview(ui, selection),
                        None => placeholder(ui),
                    });
                })
                .response;

            let zone = ui
                .interact(zone.rect, ui.id().with("upload-zone"), egui::Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            if zone.clicked() {
                msgs.push(Msg::BrowseRequested);
            }

            ui.add_space(12.0);

            let loading = model.request.is_loading();
            let caption = if loading {
                "Clasificando…"
            } else {
                "Clasificar imagen"
            };
            let button = egui::Button::new(RichText::new(caption).strong().color(Color32::WHITE))
                .fill(ACCENT)
                .min_size(egui::vec2(ui.available_width(), 40.0));
            if ui.add_enabled(!loading, button).clicked() {
                msgs.push(Msg::ClassifyRequested);
            }

            if let Some(error) = model.request.error() {
                ui.add_space(8.0);
                ui.label(RichText::new(error.to_string()).size(13.0).color(ERROR));
            }
        });
    }

    fn preview(&self, ui: &mut egui::Ui, selection: &Selection) {
        let texture = self.preview_store.texture(selection.preview.id);

        match (&selection.preview.status, texture) {
            (PreviewStatus::Ready, Some(texture)) => {
                let max_size = egui::vec2(ui.available_width(), PREVIEW_MAX_HEIGHT);
                ui.add(
                    egui::Image::new((texture.id(), texture.size_vec2()))
                        .max_size(max_size)
                        .rounding(10.0),
                );
            }
            (PreviewStatus::Failed(message), _) => {
                ui.label(RichText::new(selection.file.name()).color(TEXT));
                ui.label(RichText::new(message).size(12.0).color(MUTED_DARK));
            }
            _ => {
                ui.spinner();
                ui.label(RichText::new(selection.file.name()).color(MUTED));
            }
        }
    }
}

fn drag_and_drop(ctx: &egui::Context, model: &Model) -> Vec<Msg> {
    let (hovering, dropped) = ctx.input(|i| {
        (
            !i.raw.hovered_files.is_empty(),
            i.raw.dropped_files.first().cloned(),
        )
    });

    match dropped {
        Some(file) => match (file.bytes, file.path) {
            (Some(bytes), _) => vec![
                Msg::DragHovered(false),
                Msg::FileSelected(ImageFile::from_dropped(&file.name, &file.mime, bytes)),
            ],
            (None, Some(path)) => vec![Msg::FileDropped(path)],
            (None, None) => vec![Msg::DragHovered(false)],
        },
        None if hovering != model.drag_over => vec![Msg::DragHovered(hovering)],
        None => vec![],
    }
}

fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(CARD_FILL)
        .rounding(14.0)
        .inner_margin(20.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            add_contents(ui);
        });
    ui.add_space(16.0);
}

fn card_heading(ui: &mut egui::Ui, number: Option<&str>, title: &str) {
    ui.horizontal(|ui| {
        if let Some(number) = number {
            ui.label(RichText::new(number).strong().color(ACCENT));
        }
        ui.label(RichText::new(title).strong().size(16.0).color(HEADING));
    });
    ui.add_space(8.0);
}

fn intro(ui: &mut egui::Ui) {
    ui.label(
        RichText::new("Sistema de clasificación automática de edificaciones urbanas")
            .size(25.0)
            .strong()
            .color(Color32::WHITE),
    );
    ui.label(
        RichText::new(
            "Sube una imagen de calle y obtén la categoría de la edificación \
             usando deep learning (transfer learning con ResNet50).",
        )
        .size(15.0)
        .color(MUTED),
    );
    ui.add_space(24.0);
}

fn placeholder(ui: &mut egui::Ui) {
    ui.label(RichText::new("🏢").size(44.0));
    ui.label(
        RichText::new("Imagen RGB de una edificación urbana")
            .size(14.0)
            .color(MUTED),
    );
    ui.label(
        RichText::new("Arrastra una imagen aquí o haz clic para seleccionar")
            .size(13.0)
            .color(MUTED_DARK),
    );
}

fn result_card(ui: &mut egui::Ui, result: &ClassificationResult) {
    card(ui, |ui| {
        card_heading(ui, Some("2"), "Resultado — Modelo (ResNet50, ImageNet)");

        ui.horizontal_wrapped(|ui| {
            ui.label(
                RichText::new("Categoría predicha:")
                    .size(20.0)
                    .strong()
                    .color(GREEN),
            );
            ui.label(RichText::new(&result.label).size(15.0).color(TEXT));
        });
        ui.add_space(12.0);

        ui.label(
            RichText::new("Probabilidad por clase:")
                .size(13.0)
                .color(MUTED),
        );
        ui.add_space(4.0);

        for row in probability_rows(result) {
            probability_row(ui, &row);
        }
    });
}

fn probability_row(ui: &mut egui::Ui, row: &ProbabilityRow) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [150.0, ROW_HEIGHT],
            egui::Label::new(RichText::new(&row.class_name).size(13.0).color(MUTED)),
        );

        let track_width = (ui.available_width() - 52.0).max(40.0);
        let (track, response) =
            ui.allocate_exact_size(egui::vec2(track_width, ROW_HEIGHT), egui::Sense::hover());
        response.on_hover_text(format!("{:.4}", row.probability));
        let mut bar = track;
        bar.set_width(track.width() * (row.bar_width / 100.0) as f32);
        ui.painter().rect_filled(track, 6.0, TRACK);
        ui.painter().rect_filled(bar, 6.0, ACCENT);

        ui.add_sized(
            [44.0, ROW_HEIGHT],
            egui::Label::new(RichText::new(&row.percentage).size(13.0).strong().color(HEADING)),
        );
    });
    ui.add_space(4.0);
}

fn metrics_card(ui: &mut egui::Ui) {
    card(ui, |ui| {
        card_heading(ui, None, "Métricas del modelo");
        ui.label(
            RichText::new("Evaluación del desempeño (métricas estándar de clasificación):")
                .size(13.0)
                .color(MUTED),
        );
        ui.add_space(8.0);

        ui.columns(MODEL_METRICS.len(), |columns| {
            for (column, metric) in columns.iter_mut().zip(MODEL_METRICS.iter()) {
                egui::Frame::none()
                    .fill(Color32::from_black_alpha(50))
                    .rounding(10.0)
                    .inner_margin(16.0)
                    .show(column, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new(metric.value).size(24.0).strong().color(GREEN));
                            ui.label(RichText::new(metric.label).size(12.0).color(MUTED_DARK));
                        });
                    });
            }
        });
    });
}

fn footer(ui: &mut egui::Ui) {
    ui.add_space(24.0);
    ui.separator();
    ui.add_space(12.0);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new("Clasificador de edificaciones urbanas")
                .strong()
                .size(13.0)
                .color(MUTED),
        );
        ui.label(
            RichText::new(
                "Prototipo para análisis urbano, distribución logística y aplicaciones académicas.",
            )
            .size(13.0)
            .color(MUTED_DARK),
        );
    });
    ui.add_space(24.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(ctx: &egui::Context, input: egui::RawInput, model: &Model) -> Vec<Msg> {
        let mut msgs = vec![];
        let _ = ctx.run(input, |ctx| msgs = drag_and_drop(ctx, model));
        msgs
    }

    #[test]
    fn test_hover_toggles_highlight() {
        let ctx = egui::Context::default();
        let mut input = egui::RawInput::default();
        input.hovered_files.push(egui::HoveredFile::default());

        let msgs = frame(&ctx, input, &Model::default());

        assert_eq!(msgs, vec![Msg::DragHovered(true)]);
    }

    #[test]
    fn test_leaving_clears_highlight() {
        let ctx = egui::Context::default();
        let model = Model {
            drag_over: true,
            ..Model::default()
        };

        let msgs = frame(&ctx, egui::RawInput::default(), &model);

        assert_eq!(msgs, vec![Msg::DragHovered(false)]);
    }

    #[test]
    fn test_dropped_path_is_read_later() {
        let ctx = egui::Context::default();
        let mut input = egui::RawInput::default();
        input.dropped_files.push(egui::DroppedFile {
            path: Some("/tmp/street.jpg".into()),
            name: "street.jpg".to_string(),
            ..Default::default()
        });

        let msgs = frame(&ctx, input, &Model::default());

        assert_eq!(msgs, vec![Msg::FileDropped("/tmp/street.jpg".into())]);
    }

    #[test]
    fn test_dropped_bytes_are_selected_directly() {
        let ctx = egui::Context::default();
        let mut input = egui::RawInput::default();
        input.dropped_files.push(egui::DroppedFile {
            name: "street.png".to_string(),
            mime: "image/png".to_string(),
            bytes: Some(Arc::from(vec![1u8, 2, 3])),
            ..Default::default()
        });

        let msgs = frame(&ctx, input, &Model::default());

        match msgs.as_slice() {
            [Msg::DragHovered(false), Msg::FileSelected(file)] => {
                assert_eq!(file.name(), "street.png");
                assert!(file.is_image());
            }
            other => panic!("unexpected msgs: {:?}", other),
        }
    }

    #[test]
    fn test_dropped_non_image_bytes_clear_highlight() {
        let ctx = egui::Context::default();
        let hovered = Model {
            drag_over: true,
            ..Model::default()
        };
        let mut input = egui::RawInput::default();
        input.dropped_files.push(egui::DroppedFile {
            name: "notes.txt".to_string(),
            mime: "text/plain".to_string(),
            bytes: Some(Arc::from(b"hello".to_vec())),
            ..Default::default()
        });

        let msgs = frame(&ctx, input, &hovered);
        let model = msgs.into_iter().fold(hovered, |model, msg| {
            crate::classifier_page::core::transition(model, msg).0
        });

        assert!(!model.drag_over);
        assert!(model.selection.is_none());
    }

    #[test]
    fn test_page_renders_every_state() {
        let ctx = egui::Context::default();
        let render = Render::new(Arc::new(PreviewStoreEgui::new(ctx.clone())));
        let result = crate::classifier_page::tests::fixture::result_alpha();

        for request in [
            crate::classifier_page::core::RequestState::Idle,
            crate::classifier_page::core::RequestState::Loading {
                request_id: Default::default(),
                preview_id: Default::default(),
            },
            crate::classifier_page::core::RequestState::Succeeded(result),
        ] {
            let model = Model {
                request,
                ..Model::default()
            };
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                assert!(render.render(ctx, &model).is_empty());
            });
        }
    }
}
