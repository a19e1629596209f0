use crate::classifier_client::interface::{
    parse_classification, ClassificationResult, ClassifierClient, ClassifyError,
};
use crate::config::Config;
use crate::image_file::ImageFile;
use crate::library::logger::interface::Logger;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const FILE_FIELD: &str = "file";

/// Rounds up so sub-second deadlines never read as zero.
fn whole_seconds(timeout: Duration) -> u64 {
    timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0)
}

/// Sends the image to the remote `/predict` endpoint as a multipart form.
pub struct ClassifierClientHttp {
    client: Client,
    endpoint: Url,
    timeout: Option<Duration>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ClassifierClientHttp {
    pub fn new(
        config: &Config,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, reqwest::Error> {
        // None overrides the blocking client's built-in 30 s default.
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.api_url.clone(),
            timeout: config.request_timeout,
            logger: logger.with_namespace("http"),
        })
    }

    fn file_part(file: &ImageFile) -> Part {
        let bytes = file.bytes().to_vec();
        match Part::bytes(bytes.clone())
            .file_name(file.name().to_string())
            .mime_str(file.media_type())
        {
            Ok(part) => part,
            Err(_) => Part::bytes(bytes).file_name(file.name().to_string()),
        }
    }

    fn map_transport_error(&self, error: reqwest::Error) -> ClassifyError {
        if error.is_timeout() {
            let seconds = self.timeout.map(whole_seconds).unwrap_or_default();
            return ClassifyError::Timeout { seconds };
        }
        ClassifyError::network(error.to_string())
    }

    fn check_confidence(&self, result: &ClassificationResult) {
        let max = result
            .probabilities
            .iter()
            .map(|(_, p)| p)
            .fold(f64::NEG_INFINITY, f64::max);
        if (max - result.confidence).abs() > 1e-3 {
            let _ = self.logger.info(&format!(
                "confidence {} differs from top probability {} for {}",
                result.confidence, max, result.class_id
            ));
        }
    }
}

impl ClassifierClient for ClassifierClientHttp {
    fn classify(&self, file: &ImageFile) -> Result<ClassificationResult, ClassifyError> {
        let _ = self.logger.info(&format!(
            "POST {} ({}, {} bytes)",
            self.endpoint,
            file.name(),
            file.bytes().len()
        ));

        let form = Form::new().part(FILE_FIELD, Self::file_part(file));

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let _ = self.logger.error(&format!("server answered {}", status));
            return Err(ClassifyError::Server {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|e| self.map_transport_error(e))?;

        let result = parse_classification(&body).inspect_err(|e| {
            if let ClassifyError::Parse { detail } = e {
                let _ = self.logger.error(&format!("unexpected body: {}", detail));
            }
        })?;

        self.check_confidence(&result);

        Ok(result)
    }
}
