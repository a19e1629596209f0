use crate::classifier_client::interface::{ClassificationResult, ClassifyError};
use crate::image_file::ImageFile;
use crate::preview_store::interface::PreviewId;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RequestId(pub u64);

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Model {
    pub selection: Option<Selection>,
    pub request: RequestState,
    pub drag_over: bool,
    pub next_preview_id: PreviewId,
    pub next_request_id: RequestId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub file: ImageFile,
    pub preview: Preview,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    pub id: PreviewId,
    pub status: PreviewStatus,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PreviewStatus {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    /// `preview_id` names the selection the request was started for.
    Loading {
        request_id: RequestId,
        preview_id: PreviewId,
    },
    Succeeded(ClassificationResult),
    Failed(ClassifyError),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading { .. })
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            RequestState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClassifyError> {
        match self {
            RequestState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    BrowseRequested,
    FileDropped(PathBuf),
    FileSelected(ImageFile),
    DragHovered(bool),
    PreviewLoaded {
        preview_id: PreviewId,
        result: Result<(), String>,
    },
    ClassifyRequested,
    ClassifyDone {
        request_id: RequestId,
        result: Result<ClassificationResult, ClassifyError>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    PickFile,
    ReadFile { path: PathBuf },
    CreatePreview { preview_id: PreviewId, file: ImageFile },
    ReleasePreview { preview_id: PreviewId },
    Classify { request_id: RequestId, file: ImageFile },
}

pub fn init() -> (Model, Vec<Effect>) {
    (Model::default(), vec![])
}

pub fn transition(model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match msg {
        Msg::BrowseRequested => (model, vec![Effect::PickFile]),

        Msg::FileDropped(path) => (
            Model {
                drag_over: false,
                ..model
            },
            vec![Effect::ReadFile { path }],
        ),

        Msg::DragHovered(drag_over) => (Model { drag_over, ..model }, vec![]),

        Msg::FileSelected(file) => select_file(model, file),

        Msg::PreviewLoaded { preview_id, result } => {
            let mut model = model;
            match model.selection.as_mut() {
                Some(selection) if selection.preview.id == preview_id => {
                    selection.preview.status = match result {
                        Ok(()) => PreviewStatus::Ready,
                        Err(message) => PreviewStatus::Failed(message),
                    };
                    (model, vec![])
                }
                // The selection moved on while this preview was being built.
                _ => (model, vec![Effect::ReleasePreview { preview_id }]),
            }
        }

        Msg::ClassifyRequested => classify(model),

        Msg::ClassifyDone { request_id, result } => match model.request {
            RequestState::Loading {
                request_id: current,
                preview_id,
            } if current == request_id => {
                let still_selected = model
                    .selection
                    .as_ref()
                    .is_some_and(|s| s.preview.id == preview_id);
                let request = match result {
                    // Answer for an image that is no longer shown.
                    _ if !still_selected => RequestState::Idle,
                    Ok(result) => RequestState::Succeeded(result),
                    Err(error) => RequestState::Failed(error),
                };
                (Model { request, ..model }, vec![])
            }
            _ => (model, vec![]),
        },
    }
}

fn select_file(model: Model, file: ImageFile) -> (Model, Vec<Effect>) {
    if !file.is_image() {
        return (model, vec![]);
    }

    let mut effects = vec![];

    if let Some(previous) = &model.selection {
        effects.push(Effect::ReleasePreview {
            preview_id: previous.preview.id,
        });
    }

    let preview_id = model.next_preview_id;
    effects.push(Effect::CreatePreview {
        preview_id,
        file: file.clone(),
    });

    // An in-flight request keeps running; its answer is dropped on arrival.
    let request = if model.request.is_loading() {
        model.request
    } else {
        RequestState::Idle
    };

    (
        Model {
            selection: Some(Selection {
                file,
                preview: Preview {
                    id: preview_id,
                    status: PreviewStatus::Loading,
                },
            }),
            request,
            drag_over: false,
            next_preview_id: PreviewId(preview_id.0 + 1),
            ..model
        },
        effects,
    )
}

fn classify(model: Model) -> (Model, Vec<Effect>) {
    if model.request.is_loading() {
        return (model, vec![]);
    }

    let Some((file, preview_id)) = model
        .selection
        .as_ref()
        .map(|s| (s.file.clone(), s.preview.id))
    else {
        return (
            Model {
                request: RequestState::Failed(ClassifyError::NoImageSelected),
                ..model
            },
            vec![],
        );
    };

    let request_id = model.next_request_id;
    let effects = vec![Effect::Classify { request_id, file }];

    (
        Model {
            request: RequestState::Loading {
                request_id,
                preview_id,
            },
            next_request_id: RequestId(request_id.0 + 1),
            ..model
        },
        effects,
    )
}
