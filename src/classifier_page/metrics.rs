/// Evaluation figures of the deployed model, shown next to every result.
pub struct ModelMetric {
    pub value: &'static str,
    pub label: &'static str,
}

pub const MODEL_METRICS: [ModelMetric; 4] = [
    ModelMetric {
        value: "87.2%",
        label: "Accuracy",
    },
    ModelMetric {
        value: "0.42",
        label: "Loss (val)",
    },
    ModelMetric {
        value: "8",
        label: "Categorías",
    },
    ModelMetric {
        value: "~20k",
        label: "Imágenes (dataset)",
    },
];
