use crate::classifier_client::probabilities::Probabilities;
use crate::image_file::ImageFile;
use serde::Deserialize;

const GENERIC_FAILURE: &str = "Error al clasificar la imagen.";

/// Body of a successful `/predict` answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "class")]
    pub class_id: String,
    pub label: String,
    pub confidence: f64,
    pub probabilities: Probabilities,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("Selecciona una imagen primero.")]
    NoImageSelected,
    #[error("Error del servidor ({status})")]
    Server { status: u16 },
    #[error("{}", GENERIC_FAILURE)]
    Parse { detail: String },
    #[error("{0}")]
    Network(String),
    #[error("La solicitud superó el tiempo de espera ({seconds} s).")]
    Timeout { seconds: u64 },
}

impl ClassifyError {
    pub fn network(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            ClassifyError::Network(GENERIC_FAILURE.to_string())
        } else {
            ClassifyError::Network(message)
        }
    }
}

pub trait ClassifierClient: Send + Sync {
    fn classify(&self, file: &ImageFile) -> Result<ClassificationResult, ClassifyError>;
}

pub fn parse_classification(body: &[u8]) -> Result<ClassificationResult, ClassifyError> {
    let result: ClassificationResult =
        serde_json::from_slice(body).map_err(|e| ClassifyError::Parse {
            detail: e.to_string(),
        })?;

    if result.probabilities.is_empty() {
        return Err(ClassifyError::Parse {
            detail: "probabilities is empty".to_string(),
        });
    }

    Ok(result)
}
