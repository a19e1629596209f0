use crate::classifier_client::interface::ClassifierClient;
use crate::classifier_page::core::{init, transition, Effect, Model, Msg};
use crate::classifier_page::render::Render;
use crate::classifier_page::run_effect::RunEffect;
use crate::file_picker::interface::FilePicker;
use crate::library::logger::interface::Logger;
use crate::library::state_machine::StateMachine;
use crate::preview_store::impl_egui::PreviewStoreEgui;
use crate::preview_store::interface::PreviewStore;
use eframe::egui;
use std::sync::mpsc::Sender;
use std::sync::Arc;

pub struct ClassifierPage {
    state_machine: StateMachine<Model, Msg, Effect>,
    render: Render,
    preview_store: Arc<PreviewStoreEgui>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ClassifierPage {
    pub fn new(
        ctx: egui::Context,
        logger: Arc<dyn Logger + Send + Sync>,
        classifier_client: Arc<dyn ClassifierClient + Send + Sync>,
        file_picker: Arc<dyn FilePicker + Send + Sync>,
    ) -> Self {
        let logger = logger.with_namespace("page");
        let preview_store = Arc::new(PreviewStoreEgui::new(ctx.clone()));

        let run_effect = RunEffect::new(
            logger.clone(),
            classifier_client,
            file_picker,
            preview_store.clone(),
            Arc::new(move || ctx.request_repaint()),
        );

        let state_machine = StateMachine::new(
            init(),
            Arc::new(transition),
            Arc::new(move |effect: Effect, event_sender: Sender<Msg>| {
                run_effect.run_effect(effect, event_sender)
            }),
            logger.with_namespace("core"),
        );

        Self {
            state_machine,
            render: Render::new(preview_store.clone()),
            preview_store,
            logger,
        }
    }
}

impl eframe::App for ClassifierPage {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state_machine.process_pending();

        let msgs = self.render.render(ctx, self.state_machine.state());

        for msg in msgs {
            self.state_machine.send(msg);
        }
    }
}

impl Drop for ClassifierPage {
    fn drop(&mut self) {
        let _ = self.logger.info(&format!(
            "Releasing {} preview(s)",
            self.preview_store.len()
        ));
        self.preview_store.clear();
    }
}
