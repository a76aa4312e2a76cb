use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FeatureContribution {
    pub name: String,
    pub label: String,
    pub importance: f64, // share of impurity decrease, 0-1
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplainResult {
    pub contributions: Vec<FeatureContribution>,
}
